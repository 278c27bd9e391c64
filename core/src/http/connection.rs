/*
 * connection.rs
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

//! One keep-alive connection: the transport stream plus a parse buffer.
//! Frames GET requests and drives the response parser, first to the end
//! of the headers and then, on the engine's instruction, through the body.

use std::io;
use std::time::Duration;

use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::time::timeout;

use crate::error::FetchError;
use crate::http::parser::{ParseState, ResponseBuffer, ResponseParser};
use crate::net::HttpStream;

/// Fixed User-Agent token sent with every request.
pub const USER_AGENT: &str = "Sfoglia/0.1";

/// Bound on each socket read. A hung peer fails the fetch instead of
/// blocking the caller indefinitely.
const READ_TIMEOUT: Duration = Duration::from_secs(30);

/// A pooled transport connection to one (host, port), tagged with the
/// scheme it was established for.
pub struct Connection {
    stream: HttpStream,
    secure: bool,
    read_buf: BytesMut,
}

impl Connection {
    pub fn new(stream: HttpStream, secure: bool) -> Self {
        Self {
            stream,
            secure,
            read_buf: BytesMut::with_capacity(8192),
        }
    }

    /// The scheme this connection was established under. A TLS stream is
    /// never silently reused for a plain request or vice versa.
    pub fn secure(&self) -> bool {
        self.secure
    }

    /// Write a GET request: request line, Host, keep-alive, User-Agent,
    /// Accept-Encoding, blank line. CRLF endings throughout.
    pub async fn send_get(&mut self, path: &str, host_header: &str) -> Result<(), FetchError> {
        let mut req = format!("GET {} HTTP/1.1\r\n", path);
        req.push_str(&format!("Host: {}\r\n", host_header));
        req.push_str("Connection: keep-alive\r\n");
        req.push_str(&format!("User-Agent: {}\r\n", USER_AGENT));
        req.push_str("Accept-Encoding: gzip\r\n");
        req.push_str("\r\n");
        self.stream
            .write_all(req.as_bytes())
            .await
            .map_err(FetchError::Connection)?;
        self.stream.flush().await.map_err(FetchError::Connection)?;
        Ok(())
    }

    /// Read and parse up to the end of the response headers. The body is
    /// left unread so the engine can decide on redirects first.
    pub async fn read_headers(&mut self) -> Result<(ResponseParser, ResponseBuffer), FetchError> {
        let mut parser = ResponseParser::new();
        let mut out = ResponseBuffer::new();
        loop {
            parser.receive(&mut self.read_buf, &mut out)?;
            if parser.state() == ParseState::HeadersComplete {
                return Ok((parser, out));
            }
            if self.fill_buf().await? == 0 {
                return Err(FetchError::Connection(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "connection closed before response headers",
                )));
            }
        }
    }

    /// Read the response body per the framing headers: chunked, exactly
    /// `content_length` bytes, or until the peer closes the stream.
    pub async fn read_body(
        &mut self,
        parser: &mut ResponseParser,
        out: &mut ResponseBuffer,
        content_length: Option<usize>,
        chunked: bool,
    ) -> Result<(), FetchError> {
        parser.set_body_mode(content_length, chunked);
        loop {
            parser.receive(&mut self.read_buf, out)?;
            if parser.state() == ParseState::Done {
                return Ok(());
            }
            if self.fill_buf().await? == 0 {
                if parser.finish_at_eof() {
                    return Ok(());
                }
                return Err(FetchError::Connection(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "connection closed mid-body",
                )));
            }
        }
    }

    /// One bounded socket read into the parse buffer. Returns the number
    /// of bytes read; 0 means the peer closed the connection.
    async fn fill_buf(&mut self) -> Result<usize, FetchError> {
        let mut tmp = [0u8; 8192];
        let n = timeout(READ_TIMEOUT, self.stream.read(&mut tmp))
            .await
            .map_err(|_| {
                FetchError::Connection(io::Error::new(
                    io::ErrorKind::TimedOut,
                    "response read timed out",
                ))
            })?
            .map_err(FetchError::Connection)?;
        self.read_buf.extend_from_slice(&tmp[..n]);
        Ok(n)
    }
}
