/*
 * url.rs
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

//! URL parsing into a closed scheme-tagged variant. Supported schemes:
//! http, https, file, data, view-source. No network I/O here.

use crate::error::FetchError;

/// Host, port, and path of an http/https URL. `secure` selects TLS and
/// the default port (80 plain, 443 secure).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpTarget {
    pub secure: bool,
    pub host: String,
    pub port: u16,
    /// Always non-empty, always starts with "/".
    pub path: String,
}

impl HttpTarget {
    pub fn scheme(&self) -> &'static str {
        if self.secure {
            "https"
        } else {
            "http"
        }
    }

    /// Default port for the scheme (80 / 443).
    pub fn default_port(&self) -> u16 {
        if self.secure {
            443
        } else {
            80
        }
    }

    /// Absolute URL string `scheme://host/path`, used as the cache key.
    /// The port is not part of the key.
    pub fn absolute_url(&self) -> String {
        format!("{}://{}{}", self.scheme(), self.host, self.path)
    }

    /// Host header value: bare host on the default port, host:port otherwise.
    pub fn host_header(&self) -> String {
        if self.port == self.default_port() {
            self.host.clone()
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

/// A parsed URL. Exhaustive matching in the fetch facade makes every
/// new scheme a compile-time decision point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Url {
    Http(HttpTarget),
    File {
        path: String,
    },
    Data {
        mime_type: String,
        data: String,
    },
    /// Not independently fetchable; forwards to the wrapped URL's fetch.
    ViewSource(Box<Url>),
}

impl Url {
    /// Parse a URL string. Split on the first ":" to isolate the scheme,
    /// then decompose the remainder per scheme.
    pub fn parse(raw: &str) -> Result<Url, FetchError> {
        let (scheme, rest) = raw
            .split_once(':')
            .ok_or_else(|| FetchError::Malformed(format!("no scheme in {:?}", raw)))?;

        match scheme {
            "data" => {
                // MIME type before the first comma, literal payload after.
                let (mime_type, data) = rest.split_once(',').ok_or_else(|| {
                    FetchError::Malformed("data URL has no comma separator".to_string())
                })?;
                Ok(Url::Data {
                    mime_type: mime_type.to_string(),
                    data: data.to_string(),
                })
            }
            "view-source" => {
                let inner = Url::parse(rest)?;
                Ok(Url::ViewSource(Box::new(inner)))
            }
            "file" => {
                let path = rest.strip_prefix("//").unwrap_or(rest);
                Ok(Url::File {
                    path: path.to_string(),
                })
            }
            "http" | "https" => {
                let secure = scheme == "https";
                let mut rest = rest.strip_prefix("//").unwrap_or(rest).to_string();
                // A bare host still yields path "/".
                if !rest.contains('/') {
                    rest.push('/');
                }
                let slash = rest.find('/').unwrap_or(rest.len());
                let authority = &rest[..slash];
                let path = rest[slash..].to_string();
                let (host, port) = match authority.split_once(':') {
                    Some((h, p)) => {
                        let port = p.parse::<u16>().map_err(|_| {
                            FetchError::Malformed(format!("invalid port {:?}", p))
                        })?;
                        (h.to_string(), port)
                    }
                    None => (authority.to_string(), if secure { 443 } else { 80 }),
                };
                Ok(Url::Http(HttpTarget {
                    secure,
                    host,
                    port,
                    path,
                }))
            }
            other => Err(FetchError::Malformed(format!(
                "unsupported scheme {:?}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(raw: &str) -> HttpTarget {
        match Url::parse(raw).unwrap() {
            Url::Http(t) => t,
            other => panic!("expected http URL, got {:?}", other),
        }
    }

    #[test]
    fn http_default_port_and_path() {
        let t = http("http://example.org/index.html");
        assert!(!t.secure);
        assert_eq!(t.host, "example.org");
        assert_eq!(t.port, 80);
        assert_eq!(t.path, "/index.html");
    }

    #[test]
    fn https_default_port() {
        let t = http("https://example.org/");
        assert!(t.secure);
        assert_eq!(t.port, 443);
    }

    #[test]
    fn bare_host_yields_root_path() {
        let t = http("http://example.org");
        assert_eq!(t.path, "/");
        assert_eq!(t.absolute_url(), "http://example.org/");
    }

    #[test]
    fn explicit_port_extracted_from_host() {
        let t = http("http://localhost:8080/page");
        assert_eq!(t.host, "localhost");
        assert_eq!(t.port, 8080);
        assert_eq!(t.path, "/page");
        assert_eq!(t.host_header(), "localhost:8080");
    }

    #[test]
    fn reserialize_reconstructs_request_target() {
        let t = http("https://example.org:8443/a/b.html");
        assert_eq!(t.scheme(), "https");
        assert_eq!(t.host_header(), "example.org:8443");
        assert_eq!(t.absolute_url(), "https://example.org/a/b.html");
    }

    #[test]
    fn file_url_strips_double_slash() {
        assert_eq!(
            Url::parse("file:///etc/hosts").unwrap(),
            Url::File {
                path: "/etc/hosts".to_string()
            }
        );
    }

    #[test]
    fn data_url_splits_on_first_comma() {
        assert_eq!(
            Url::parse("data:text/html,Hello, world").unwrap(),
            Url::Data {
                mime_type: "text/html".to_string(),
                data: "Hello, world".to_string()
            }
        );
    }

    #[test]
    fn view_source_wraps_inner_url() {
        match Url::parse("view-source:http://example.org/").unwrap() {
            Url::ViewSource(inner) => match *inner {
                Url::Http(t) => assert_eq!(t.host, "example.org"),
                other => panic!("unexpected inner {:?}", other),
            },
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn unknown_scheme_rejected() {
        assert!(matches!(
            Url::parse("gopher://example.org/"),
            Err(FetchError::Malformed(_))
        ));
        assert!(matches!(Url::parse("no-scheme"), Err(FetchError::Malformed(_))));
    }

    #[test]
    fn bad_port_rejected() {
        assert!(matches!(
            Url::parse("http://example.org:notaport/"),
            Err(FetchError::Malformed(_))
        ));
    }
}
