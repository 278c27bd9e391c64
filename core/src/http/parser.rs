/*
 * parser.rs
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

//! HTTP/1.1 response push parser: status line, headers, body
//! (Content-Length, chunked, or read-until-close). Feed bytes via
//! `receive`; the parsed response accumulates in a `ResponseBuffer`.

use bytes::Buf;
use bytes::BytesMut;
use std::collections::HashMap;

use crate::error::FetchError;

/// A fully or partially parsed response. Header names are case-folded;
/// a later duplicate overwrites the earlier value.
#[derive(Debug, Default)]
pub struct ResponseBuffer {
    pub status: u16,
    pub reason: String,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl ResponseBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a header by case-folded name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|v| v.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    StatusLine,
    Headers,
    /// Headers done; caller must inspect framing headers and call set_body_mode().
    HeadersComplete,
    /// Reading exactly `remaining` body bytes.
    Body,
    /// No framing header: body is delimited by connection close.
    BodyToEnd,
    ChunkSize,
    ChunkData,
    /// Zero-size chunk seen; one final CRLF line remains.
    ChunkEnd,
    Done,
}

/// Push parser for one HTTP/1.1 response. Reusable across keep-alive
/// requests via `reset`.
pub struct ResponseParser {
    state: ParseState,
    remaining: usize,
}

impl ResponseParser {
    pub fn new() -> Self {
        Self {
            state: ParseState::StatusLine,
            remaining: 0,
        }
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    pub fn reset(&mut self) {
        self.state = ParseState::StatusLine;
        self.remaining = 0;
    }

    /// Find CRLF in buf; return the byte count before it, or None.
    fn find_crlf(buf: &[u8]) -> Option<usize> {
        let mut i = 0;
        while i + 1 < buf.len() {
            if buf[i] == b'\r' && buf[i + 1] == b'\n' {
                return Some(i);
            }
            i += 1;
        }
        None
    }

    /// Split one CRLF-terminated line off the front of buf as UTF-8 text.
    /// Returns None when the line is still incomplete.
    fn take_line(buf: &mut BytesMut, what: &str) -> Result<Option<String>, FetchError> {
        let line_end = match Self::find_crlf(buf) {
            Some(n) => n,
            None => return Ok(None),
        };
        let line = buf.split_to(line_end + 2);
        let text = std::str::from_utf8(&line[..line_end])
            .map_err(|_| FetchError::Protocol(format!("invalid UTF-8 in {}", what)))?;
        Ok(Some(text.to_string()))
    }

    /// Consume and parse as much as possible from buf. Partial data
    /// remains in buf for the next call.
    pub fn receive(
        &mut self,
        buf: &mut BytesMut,
        out: &mut ResponseBuffer,
    ) -> Result<(), FetchError> {
        loop {
            match self.state {
                ParseState::StatusLine => {
                    let line = match Self::take_line(buf, "status line")? {
                        Some(l) => l,
                        None => return Ok(()),
                    };
                    // HTTP/1.1 200 OK (reason may be absent)
                    let mut parts = line.splitn(3, ' ');
                    let _version = parts.next();
                    let code = parts
                        .next()
                        .and_then(|s| s.parse::<u16>().ok())
                        .ok_or_else(|| {
                            FetchError::Protocol(format!("malformed status line {:?}", line))
                        })?;
                    out.status = code;
                    out.reason = parts.next().unwrap_or("").to_string();
                    self.state = ParseState::Headers;
                }
                ParseState::Headers => {
                    let line = match Self::take_line(buf, "header")? {
                        Some(l) => l,
                        None => return Ok(()),
                    };
                    if line.is_empty() {
                        self.state = ParseState::HeadersComplete;
                        return Ok(());
                    }
                    let colon = line.find(':').ok_or_else(|| {
                        FetchError::Protocol(format!("malformed header line {:?}", line))
                    })?;
                    let name = line[..colon].to_ascii_lowercase();
                    let value = line[colon + 1..].trim().to_string();
                    out.headers.insert(name, value);
                }
                ParseState::Body => {
                    let to_read = self.remaining.min(buf.len());
                    if to_read > 0 {
                        let chunk = buf.split_to(to_read);
                        out.body.extend_from_slice(&chunk);
                        self.remaining -= to_read;
                    }
                    if self.remaining == 0 {
                        self.state = ParseState::Done;
                    } else {
                        return Ok(());
                    }
                }
                ParseState::BodyToEnd => {
                    if !buf.is_empty() {
                        let chunk = buf.split_to(buf.len());
                        out.body.extend_from_slice(&chunk);
                    }
                    // Connection close signals the end; see finish_at_eof.
                    return Ok(());
                }
                ParseState::ChunkSize => {
                    let line = match Self::take_line(buf, "chunk size")? {
                        Some(l) => l,
                        None => return Ok(()),
                    };
                    // Chunk extensions after ';' are ignored.
                    let hex = line.split(';').next().unwrap_or(&line).trim();
                    let size = usize::from_str_radix(hex, 16).map_err(|_| {
                        FetchError::Protocol(format!("malformed chunk size {:?}", line))
                    })?;
                    if size == 0 {
                        self.state = ParseState::ChunkEnd;
                    } else {
                        self.remaining = size;
                        self.state = ParseState::ChunkData;
                    }
                }
                ParseState::ChunkData => {
                    let to_read = self.remaining.min(buf.len());
                    if to_read > 0 {
                        let chunk = buf.split_to(to_read);
                        out.body.extend_from_slice(&chunk);
                        self.remaining -= to_read;
                    }
                    if self.remaining == 0 {
                        // Trailing CRLF after the chunk payload.
                        if buf.len() >= 2 {
                            buf.advance(2);
                            self.state = ParseState::ChunkSize;
                        } else {
                            return Ok(());
                        }
                    } else {
                        return Ok(());
                    }
                }
                ParseState::ChunkEnd => {
                    // Consume the final CRLF after the zero-size chunk.
                    if Self::take_line(buf, "chunk terminator")?.is_none() {
                        return Ok(());
                    }
                    self.state = ParseState::Done;
                }
                ParseState::HeadersComplete | ParseState::Done => return Ok(()),
            }
        }
    }

    /// Called once headers are parsed, before any body bytes are consumed.
    /// `content_length` is only passed when present and positive.
    pub fn set_body_mode(&mut self, content_length: Option<usize>, chunked: bool) {
        if self.state != ParseState::HeadersComplete {
            return;
        }
        if chunked {
            self.state = ParseState::ChunkSize;
        } else if let Some(cl) = content_length {
            self.remaining = cl;
            self.state = ParseState::Body;
        } else {
            self.state = ParseState::BodyToEnd;
        }
    }

    /// The peer closed the connection. For close-delimited bodies this is
    /// the normal end of the response; anywhere else it is premature.
    pub fn finish_at_eof(&mut self) -> bool {
        if self.state == ParseState::BodyToEnd {
            self.state = ParseState::Done;
            true
        } else {
            false
        }
    }
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(parser: &mut ResponseParser, out: &mut ResponseBuffer, bytes: &[u8]) {
        let mut buf = BytesMut::from(bytes);
        parser.receive(&mut buf, out).unwrap();
        // Framing headers drive the body mode mid-stream, as the
        // connection does.
        if parser.state() == ParseState::HeadersComplete {
            let chunked = out.header("transfer-encoding") == Some("chunked");
            let cl = out
                .header("content-length")
                .and_then(|v| v.parse::<usize>().ok())
                .filter(|&n| n > 0);
            parser.set_body_mode(cl, chunked);
            parser.receive(&mut buf, out).unwrap();
        }
    }

    #[test]
    fn status_line_and_headers() {
        let mut p = ResponseParser::new();
        let mut out = ResponseBuffer::new();
        feed(
            &mut p,
            &mut out,
            b"HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 2\r\n\r\nhi",
        );
        assert_eq!(out.status, 200);
        assert_eq!(out.reason, "OK");
        assert_eq!(out.header("content-type"), Some("text/html"));
        assert_eq!(out.body, b"hi");
        assert_eq!(p.state(), ParseState::Done);
    }

    #[test]
    fn status_line_without_reason() {
        let mut p = ResponseParser::new();
        let mut out = ResponseBuffer::new();
        let mut buf = BytesMut::from(&b"HTTP/1.1 204\r\n\r\n"[..]);
        p.receive(&mut buf, &mut out).unwrap();
        assert_eq!(out.status, 204);
        assert_eq!(out.reason, "");
    }

    #[test]
    fn duplicate_headers_overwrite() {
        let mut p = ResponseParser::new();
        let mut out = ResponseBuffer::new();
        let mut buf = BytesMut::from(
            &b"HTTP/1.1 200 OK\r\nX-Test: first\r\nx-test: second\r\n\r\n"[..],
        );
        p.receive(&mut buf, &mut out).unwrap();
        assert_eq!(out.header("x-test"), Some("second"));
    }

    #[test]
    fn chunked_5_3_0_yields_8_bytes() {
        let mut p = ResponseParser::new();
        let mut out = ResponseBuffer::new();
        feed(
            &mut p,
            &mut out,
            b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n5\r\nhello\r\n3\r\nwld\r\n0\r\n\r\n",
        );
        assert_eq!(out.body.len(), 8);
        assert_eq!(out.body, b"hellowld");
        assert_eq!(p.state(), ParseState::Done);
    }

    #[test]
    fn chunked_survives_fragmented_input() {
        let mut p = ResponseParser::new();
        let mut out = ResponseBuffer::new();
        let raw: &[u8] =
            b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n5\r\nhello\r\n3\r\nwld\r\n0\r\n\r\n";
        let mut buf = BytesMut::new();
        for chunk in raw.chunks(3) {
            buf.extend_from_slice(chunk);
            p.receive(&mut buf, &mut out).unwrap();
            if p.state() == ParseState::HeadersComplete {
                p.set_body_mode(None, true);
            }
        }
        p.receive(&mut buf, &mut out).unwrap();
        assert_eq!(out.body, b"hellowld");
        assert_eq!(p.state(), ParseState::Done);
    }

    #[test]
    fn read_to_end_finishes_at_eof() {
        let mut p = ResponseParser::new();
        let mut out = ResponseBuffer::new();
        let mut buf = BytesMut::from(&b"HTTP/1.1 200 OK\r\n\r\nstream tail"[..]);
        p.receive(&mut buf, &mut out).unwrap();
        assert_eq!(p.state(), ParseState::HeadersComplete);
        p.set_body_mode(None, false);
        p.receive(&mut buf, &mut out).unwrap();
        assert_eq!(p.state(), ParseState::BodyToEnd);
        assert!(p.finish_at_eof());
        assert_eq!(out.body, b"stream tail");
    }

    #[test]
    fn malformed_status_line_rejected() {
        let mut p = ResponseParser::new();
        let mut out = ResponseBuffer::new();
        let mut buf = BytesMut::from(&b"garbage\r\n"[..]);
        assert!(matches!(
            p.receive(&mut buf, &mut out),
            Err(FetchError::Protocol(_))
        ));
    }

    #[test]
    fn header_without_colon_rejected() {
        let mut p = ResponseParser::new();
        let mut out = ResponseBuffer::new();
        let mut buf = BytesMut::from(&b"HTTP/1.1 200 OK\r\nbroken header\r\n\r\n"[..]);
        assert!(matches!(
            p.receive(&mut buf, &mut out),
            Err(FetchError::Protocol(_))
        ));
    }

    #[test]
    fn bad_chunk_size_rejected() {
        let mut p = ResponseParser::new();
        let mut out = ResponseBuffer::new();
        let mut buf = BytesMut::from(&b"HTTP/1.1 200 OK\r\n\r\n"[..]);
        p.receive(&mut buf, &mut out).unwrap();
        p.set_body_mode(None, true);
        buf.extend_from_slice(b"zz\r\n");
        assert!(matches!(
            p.receive(&mut buf, &mut out),
            Err(FetchError::Protocol(_))
        ));
    }
}
