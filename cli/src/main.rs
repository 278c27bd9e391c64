/*
 * main.rs
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

//! Terminal frontend: fetch one URL and print its text content.
//! view-source URLs print the raw body instead.

use std::process::ExitCode;

use sfoglia_core::text::extract_text;
use sfoglia_core::{Fetcher, Url};

/// Shown when no URL argument is given.
const DEFAULT_URL: &str = "file:///usr/local/share/sfoglia/welcome.html";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::init();

    let raw = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_URL.to_string());

    let url = match Url::parse(&raw) {
        Ok(url) => url,
        Err(e) => {
            eprintln!("sfoglia: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut fetcher = Fetcher::new();
    match fetcher.fetch(&url).await {
        Ok(body) => {
            if matches!(url, Url::ViewSource(_)) {
                print!("{}", body);
            } else {
                print!("{}", extract_text(&body));
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("sfoglia: {}", e);
            ExitCode::FAILURE
        }
    }
}
