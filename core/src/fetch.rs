/*
 * fetch.rs
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

//! Fetch facade: dispatch on URL scheme. http/https go through the
//! transaction engine; file, data, and view-source are resolved here.

use log::debug;

use crate::error::FetchError;
use crate::http::HttpEngine;
use crate::url::Url;

/// One fetcher per embedding. Owns the connection pool and response
/// cache (via the engine), so independent instances are fully isolated.
#[derive(Default)]
pub struct Fetcher {
    engine: HttpEngine,
}

impl Fetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the decoded textual body for a URL. view-source forwards to
    /// the wrapped URL; file reads the filesystem; data returns its
    /// payload unchanged.
    pub async fn fetch(&mut self, url: &Url) -> Result<String, FetchError> {
        // view-source wrappers forward entirely to the wrapped URL.
        let mut url = url;
        while let Url::ViewSource(inner) = url {
            url = inner.as_ref();
        }
        match url {
            Url::Http(target) => self.engine.execute(target).await,
            Url::File { path } => {
                debug!("reading local file {}", path);
                tokio::fs::read_to_string(path).await.map_err(FetchError::Io)
            }
            Url::Data { data, .. } => Ok(data.clone()),
            Url::ViewSource(_) => unreachable!("view-source unwrapped above"),
        }
    }
}
