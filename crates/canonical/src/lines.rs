//! Line normalizer: raw note text in, ordered content lines out.
//!
//! Steps, in order:
//!
//! 1. Optional NFKC normalization.
//! 2. Leading YAML front matter removal.
//! 3. Per line: trim, strip heading markers, strip wiki embeds/links,
//!    collapse whitespace.
//! 4. Drop empty lines and lines shorter than `min_line_chars`.
//!
//! The normalizer never fails; a note that is all noise yields no lines.

use std::borrow::Cow;

use unicode_normalization::UnicodeNormalization;

use crate::config::NormalizeConfig;
use crate::whitespace::collapse_whitespace;

const FRONT_MATTER_FENCE: &str = "---";
const MAX_HEADING_LEVEL: usize = 6;

/// Normalize raw note text into its ordered sequence of content lines.
pub fn normalize_lines(text: &str, cfg: &NormalizeConfig) -> Vec<String> {
    let normalized: Cow<str> = if cfg.normalize_unicode {
        Cow::Owned(text.nfkc().collect::<String>())
    } else {
        Cow::Borrowed(text)
    };

    let body = if cfg.strip_front_matter {
        strip_front_matter(normalized.as_ref())
    } else {
        normalized.as_ref()
    };

    body.lines()
        .filter_map(|raw| clean_line(raw, cfg))
        .collect()
}

/// Returns `text` without a leading `---` delimited front matter block.
pub(crate) fn strip_front_matter(text: &str) -> &str {
    let mut lines = text.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return text;
    };
    if first.trim_end() != FRONT_MATTER_FENCE {
        return text;
    }

    let mut offset = first.len();
    for line in lines {
        offset += line.len();
        if line.trim_end() == FRONT_MATTER_FENCE {
            return &text[offset..];
        }
    }
    // Unterminated: treat the fence as content.
    text
}

fn clean_line(raw: &str, cfg: &NormalizeConfig) -> Option<String> {
    let mut line = raw.trim();
    if cfg.strip_headings {
        line = strip_heading_marker(line);
    }

    let cleaned = if cfg.strip_embeds && line.contains("[[") {
        collapse_whitespace(&strip_wiki_syntax(line))
    } else {
        collapse_whitespace(line)
    };

    if cleaned.is_empty() || cleaned.chars().count() < cfg.min_line_chars {
        None
    } else {
        Some(cleaned)
    }
}

/// `## Title` -> `Title`. `#tag` and `#######` are left alone.
pub(crate) fn strip_heading_marker(line: &str) -> &str {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if hashes == 0 || hashes > MAX_HEADING_LEVEL {
        return line;
    }
    let rest = &line[hashes..];
    if rest.is_empty() {
        ""
    } else if rest.starts_with(char::is_whitespace) {
        rest.trim_start()
    } else {
        line
    }
}

/// Delete `![[embed]]`, unwrap `[[target|alias]]` to `alias` and
/// `[[target]]` to `target`. Unclosed `[[` is kept verbatim.
pub(crate) fn strip_wiki_syntax(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;

    while let Some(open) = rest.find("[[") {
        let inner_start = open + 2;
        let Some(inner_len) = rest[inner_start..].find("]]") else {
            break;
        };
        let inner = &rest[inner_start..inner_start + inner_len];
        let is_embed = rest[..open].ends_with('!');

        if is_embed {
            out.push_str(&rest[..open - 1]);
        } else {
            out.push_str(&rest[..open]);
            let shown = inner.split_once('|').map_or(inner, |(_, alias)| alias);
            out.push_str(shown);
        }
        rest = &rest[inner_start + inner_len + 2..];
    }

    out.push_str(rest);
    out
}
