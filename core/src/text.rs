/*
 * text.rs
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

//! Minimal text extraction from a fetched body: tag stripping and a
//! fixed entity table. Not an HTML parser.

/// The entity table. Anything else passes through literally, ampersand
/// and semicolon included.
const ENTITIES: [(&str, &str); 5] = [
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&copy;", "\u{a9}"),
    ("&ndash;", "\u{2013}"),
    ("&amp;", "&"),
];

/// Drop everything between '<' and '>'.
pub fn lex(body: &str) -> String {
    let mut text = String::new();
    let mut in_tag = false;
    for c in body.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    text
}

/// Decode the fixed entity table. An unrecognized or unterminated
/// entity is left unchanged.
pub fn decode_entities(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '&' {
            if let Some(offset) = chars[i + 1..].iter().position(|&c| c == ';') {
                let candidate: String = chars[i..i + offset + 2].iter().collect();
                if let Some((_, replacement)) =
                    ENTITIES.iter().find(|(name, _)| *name == candidate)
                {
                    result.push_str(replacement);
                    i += offset + 2;
                    continue;
                }
            }
        }
        result.push(chars[i]);
        i += 1;
    }
    result
}

/// Tag-stripped, entity-decoded text of a body: the rendering
/// collaborator's whole input.
pub fn extract_text(body: &str) -> String {
    decode_entities(&lex(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_strips_tags() {
        assert_eq!(lex("<html><b>Hi</b> there</html>"), "Hi there");
    }

    #[test]
    fn decode_known_entities() {
        assert_eq!(decode_entities("a &lt;b&gt; c"), "a <b> c");
        assert_eq!(decode_entities("&amp;amp;"), "&amp;");
        assert_eq!(decode_entities("&copy; 2026 &ndash; now"), "\u{a9} 2026 \u{2013} now");
    }

    #[test]
    fn unknown_entity_passes_through() {
        assert_eq!(decode_entities("&foo; stays"), "&foo; stays");
    }

    #[test]
    fn unterminated_entity_passes_through() {
        assert_eq!(decode_entities("tail &foo"), "tail &foo");
        assert_eq!(decode_entities("&"), "&");
    }

    #[test]
    fn extract_text_combines_both() {
        assert_eq!(extract_text("<p>1 &lt; 2</p>"), "1 < 2");
    }
}
