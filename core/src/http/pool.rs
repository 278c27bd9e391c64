/*
 * pool.rs
 * Copyright (C) 2026 Chris Burdess
 *
 * This file is part of Sfoglia, a minimal text-mode web browser.
 *
 * Sfoglia is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Sfoglia is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Sfoglia.  If not, see <http://www.gnu.org/licenses/>.
 */

//! Keep-alive connection pool: one live connection per (host, port),
//! reused for the lifetime of the owning Fetcher. No eviction.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use log::debug;

use crate::error::FetchError;
use crate::http::connection::Connection;
use crate::net::HttpStream;

/// Maps (host, port) to an open connection. Owned by the Fetcher rather
/// than process-global, so tests get isolated pools.
#[derive(Default)]
pub struct ConnectionPool {
    entries: HashMap<(String, u16), Connection>,
}

impl ConnectionPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the pooled connection for (host, port), establishing one on
    /// first use. An entry established under a different scheme is
    /// replaced, never reused.
    pub async fn obtain(
        &mut self,
        host: &str,
        port: u16,
        secure: bool,
    ) -> Result<&mut Connection, FetchError> {
        let key = (host.to_string(), port);
        match self.entries.entry(key) {
            Entry::Occupied(slot) if slot.get().secure() == secure => Ok(slot.into_mut()),
            Entry::Occupied(mut slot) => {
                // Same key, different scheme: replace rather than reuse.
                debug!("reconnecting to {}:{} (tls: {})", host, port, secure);
                let stream = HttpStream::connect(host, port, secure)
                    .await
                    .map_err(FetchError::Connection)?;
                *slot.get_mut() = Connection::new(stream, secure);
                Ok(slot.into_mut())
            }
            Entry::Vacant(slot) => {
                debug!("connecting to {}:{} (tls: {})", host, port, secure);
                let stream = HttpStream::connect(host, port, secure)
                    .await
                    .map_err(FetchError::Connection)?;
                Ok(slot.insert(Connection::new(stream, secure)))
            }
        }
    }
}
