/*
 * error.rs
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

//! Fetch pipeline errors. None are recovered internally; every failure
//! aborts the in-progress fetch and surfaces to the caller.

use std::fmt;
use std::io;

/// Errors from URL parsing, transport, HTTP framing, or local file reads.
#[derive(Debug)]
pub enum FetchError {
    /// The URL string could not be parsed (missing or unknown scheme, bad port, ...).
    Malformed(String),
    /// TCP connect or TLS handshake failure, or the transport died mid-response.
    Connection(io::Error),
    /// Malformed status line, header line, or chunk-size line; also bad gzip or non-UTF-8 body.
    Protocol(String),
    /// A redirect chain exceeded five hops.
    TooManyRedirects,
    /// A 3xx response carried no Location header.
    MissingLocation,
    /// Local file read failure (file: scheme).
    Io(io::Error),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Malformed(m) => write!(f, "malformed URL: {}", m),
            FetchError::Connection(e) => write!(f, "connection failed: {}", e),
            FetchError::Protocol(m) => write!(f, "protocol error: {}", m),
            FetchError::TooManyRedirects => write!(f, "too many redirects"),
            FetchError::MissingLocation => write!(f, "redirect with no Location header"),
            FetchError::Io(e) => write!(f, "file read failed: {}", e),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Connection(e) | FetchError::Io(e) => Some(e),
            _ => None,
        }
    }
}
