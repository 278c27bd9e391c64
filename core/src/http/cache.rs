/*
 * cache.rs
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

//! Time-bounded response cache keyed by absolute URL. Entries come only
//! from 200 responses with a parseable max-age directive; expiry is
//! checked lazily on lookup. Parse failures behave as cache misses and
//! are never raised.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use log::debug;

struct CacheEntry {
    body: String,
    /// None means the entry never expires. Reserved: the max-age policy
    /// below always sets a deadline.
    expires: Option<Instant>,
}

/// Response cache owned by the Fetcher (not process-global), so tests
/// get independent caches.
#[derive(Default)]
pub struct ResponseCache {
    entries: HashMap<String, CacheEntry>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached body while unexpired; an expired entry is
    /// evicted and reported as a miss.
    pub fn lookup(&mut self, url: &str) -> Option<&str> {
        let expired = match self.entries.get(url) {
            Some(entry) => match entry.expires {
                Some(deadline) => Instant::now() >= deadline,
                None => false,
            },
            None => return None,
        };
        if expired {
            debug!("cache entry for {} expired", url);
            self.entries.remove(url);
            return None;
        }
        debug!("cache hit for {}", url);
        self.entries.get(url).map(|e| e.body.as_str())
    }

    /// Store the body if the Cache-Control value carries a parseable
    /// max-age directive. Anything else inserts nothing.
    pub fn insert(&mut self, url: &str, body: &str, cache_control: Option<&str>) {
        let Some(max_age) = parse_max_age(cache_control.unwrap_or("")) else {
            return;
        };
        debug!("caching {} for {}s", url, max_age);
        self.entries.insert(
            url.to_string(),
            CacheEntry {
                body: body.to_string(),
                expires: Some(Instant::now() + Duration::from_secs(max_age)),
            },
        );
    }
}

/// First max-age directive in a comma-separated Cache-Control value,
/// as a non-negative integer. Case as given; malformed values yield None.
fn parse_max_age(cache_control: &str) -> Option<u64> {
    for directive in cache_control.split(',') {
        if let Some(value) = directive.trim().strip_prefix("max-age=") {
            return value.parse::<u64>().ok();
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_age_first_directive_wins() {
        assert_eq!(parse_max_age("max-age=60, max-age=120"), Some(60));
        assert_eq!(parse_max_age("no-cache, max-age=30"), Some(30));
    }

    #[test]
    fn max_age_malformed_is_none() {
        assert_eq!(parse_max_age(""), None);
        assert_eq!(parse_max_age("no-cache"), None);
        assert_eq!(parse_max_age("max-age=-5"), None);
        assert_eq!(parse_max_age("max-age=abc"), None);
        // Case as given: an uppercase directive does not match.
        assert_eq!(parse_max_age("Max-Age=60"), None);
    }

    #[test]
    fn insert_then_lookup_within_max_age() {
        let mut cache = ResponseCache::new();
        cache.insert("http://example.org/", "body", Some("max-age=60"));
        assert_eq!(cache.lookup("http://example.org/"), Some("body"));
    }

    #[test]
    fn expired_entry_evicted_on_lookup() {
        let mut cache = ResponseCache::new();
        cache.insert("http://example.org/", "body", Some("max-age=0"));
        assert_eq!(cache.lookup("http://example.org/"), None);
        // Evicted, not just hidden.
        assert!(cache.entries.is_empty());
    }

    #[test]
    fn no_directive_means_no_insertion() {
        let mut cache = ResponseCache::new();
        cache.insert("http://example.org/", "body", None);
        cache.insert("http://example.org/b", "body", Some("private, no-store"));
        assert!(cache.entries.is_empty());
    }
}
