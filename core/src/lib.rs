/*
 * lib.rs
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

//! Sfoglia core: the resource-fetch pipeline of a minimal web browser.
//!
//! URL parsing into a scheme-tagged variant, a keep-alive HTTP/1.1
//! client (hand-framed requests, push-parsed responses, chunked and
//! gzip decoding, bounded redirect chasing), a time-bounded response
//! cache, and a facade dispatching on scheme (http, https, file, data,
//! view-source). Presentation is the caller's concern; `text` offers
//! the minimal tag stripper the terminal frontend uses.

pub mod error;
pub mod fetch;
pub mod http;
pub mod net;
pub mod text;
pub mod url;

pub use error::FetchError;
pub use fetch::Fetcher;
pub use url::{HttpTarget, Url};
