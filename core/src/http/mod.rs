/*
 * mod.rs
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

//! HTTP/1.1 client: keep-alive connections, push-parsed responses,
//! time-bounded response cache, bounded redirect chasing.

pub mod cache;
pub mod connection;
pub mod engine;
pub mod parser;
pub mod pool;

pub use cache::ResponseCache;
pub use connection::{Connection, USER_AGENT};
pub use engine::HttpEngine;
pub use parser::{ParseState, ResponseBuffer, ResponseParser};
pub use pool::ConnectionPool;
