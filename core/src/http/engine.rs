/*
 * engine.rs
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

//! HTTP transaction engine: pooled connection, cache consult, request
//! framing, response decode, redirect chasing, cache populate. Redirects
//! run as a bounded loop rather than recursion; the observable semantics
//! are unchanged (five hops succeed, the sixth fails).

use std::io::Read;

use flate2::read::GzDecoder;
use log::debug;

use crate::error::FetchError;
use crate::http::cache::ResponseCache;
use crate::http::pool::ConnectionPool;
use crate::url::{HttpTarget, Url};

/// A 3xx seen after this many hops have already been followed fails
/// with TooManyRedirects.
const REDIRECT_LIMIT: u32 = 5;

/// Drives GET transactions over the pool, consulting and populating the
/// response cache.
#[derive(Default)]
pub struct HttpEngine {
    pool: ConnectionPool,
    cache: ResponseCache,
}

impl HttpEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the decoded body for an http/https target, following up to
    /// five redirects.
    pub async fn execute(&mut self, target: &HttpTarget) -> Result<String, FetchError> {
        let mut target = target.clone();
        let mut hops = 0u32;
        loop {
            let url = target.absolute_url();
            let conn = self
                .pool
                .obtain(&target.host, target.port, target.secure)
                .await?;

            // Cache check sits after the connection: a hit still keeps
            // the pooled socket warm but frames no request and reads
            // nothing from the network.
            if let Some(body) = self.cache.lookup(&url) {
                return Ok(body.to_string());
            }

            debug!("GET {}", url);
            conn.send_get(&target.path, &target.host_header()).await?;
            let (mut parser, mut response) = conn.read_headers().await?;

            if (300..400).contains(&response.status) {
                if hops >= REDIRECT_LIMIT {
                    return Err(FetchError::TooManyRedirects);
                }
                hops += 1;
                let location = response
                    .header("location")
                    .ok_or(FetchError::MissingLocation)?;
                let resolved = resolve_location(&target, location);
                debug!("redirect {} -> {} (hop {})", url, resolved, hops);
                target = match Url::parse(&resolved)? {
                    Url::Http(t) => t,
                    _ => {
                        return Err(FetchError::Malformed(format!(
                            "redirect to non-http URL {:?}",
                            resolved
                        )))
                    }
                };
                continue;
            }

            let chunked = response.header("transfer-encoding") == Some("chunked");
            let content_length = response
                .header("content-length")
                .and_then(|v| v.parse::<usize>().ok())
                .filter(|&n| n > 0);
            conn.read_body(&mut parser, &mut response, content_length, chunked)
                .await?;

            let raw = std::mem::take(&mut response.body);
            let raw = if response.header("content-encoding") == Some("gzip") {
                gunzip(&raw)?
            } else {
                raw
            };
            let body = String::from_utf8(raw)
                .map_err(|_| FetchError::Protocol("response body is not valid UTF-8".to_string()))?;

            if response.status == 200 {
                self.cache
                    .insert(&url, &body, response.header("cache-control"));
            }
            return Ok(body);
        }
    }
}

/// Resolve a Location header against the current target: absolute URL,
/// absolute path, or relative path appended to the current one.
fn resolve_location(target: &HttpTarget, location: &str) -> String {
    if location.contains("://") {
        location.to_string()
    } else if location.starts_with('/') {
        format!("{}://{}{}", target.scheme(), target.host, location)
    } else if target.path.ends_with('/') {
        format!("{}://{}{}{}", target.scheme(), target.host, target.path, location)
    } else {
        format!(
            "{}://{}{}/{}",
            target.scheme(),
            target.host,
            target.path,
            location
        )
    }
}

fn gunzip(data: &[u8]) -> Result<Vec<u8>, FetchError> {
    let mut decoder = GzDecoder::new(data);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|_| FetchError::Protocol("invalid gzip body".to_string()))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(path: &str) -> HttpTarget {
        HttpTarget {
            secure: false,
            host: "example.org".to_string(),
            port: 80,
            path: path.to_string(),
        }
    }

    #[test]
    fn location_absolute_url_taken_verbatim() {
        let t = target("/a");
        assert_eq!(
            resolve_location(&t, "https://other.org:8443/x"),
            "https://other.org:8443/x"
        );
    }

    #[test]
    fn location_absolute_path_prefixes_scheme_and_host() {
        let t = target("/a/b.html");
        assert_eq!(
            resolve_location(&t, "/c.html"),
            "http://example.org/c.html"
        );
    }

    #[test]
    fn location_relative_appends_to_current_path() {
        assert_eq!(
            resolve_location(&target("/dir/"), "next.html"),
            "http://example.org/dir/next.html"
        );
        // Separator inserted only when the current path lacks one.
        assert_eq!(
            resolve_location(&target("/dir"), "next.html"),
            "http://example.org/dir/next.html"
        );
    }

    #[test]
    fn gunzip_round_trips() {
        use flate2::write::GzEncoder;
        use flate2::Compression;
        use std::io::Write;

        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(b"hello gzip").unwrap();
        let compressed = enc.finish().unwrap();
        assert_eq!(gunzip(&compressed).unwrap(), b"hello gzip");
    }

    #[test]
    fn gunzip_rejects_garbage() {
        assert!(matches!(
            gunzip(b"not gzip at all"),
            Err(FetchError::Protocol(_))
        ));
    }
}
