use std::sync::LazyLock;

use clap::ValueEnum;
use regex::Regex;
use serde::Deserialize;

/// Optional whitespace, then a comma or the end of the row.
static SEPARATOR_AHEAD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*(?:,|$)").unwrap());

/// How a data row is cut into cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerPolicy {
    /// Comma-separated cells with positional empty slots and quoted commas.
    #[default]
    Standard,
    /// Lenient token scan: empty cells produce no token, so later cells
    /// shift left, and an unquoted cell must be a single word.
    Compat,
}

impl TokenizerPolicy {
    pub fn split_row(self, row: &str) -> Vec<String> {
        match self {
            // quotes are consumed by the splitter itself
            TokenizerPolicy::Standard => split_standard(row)
                .into_iter()
                .map(|t| t.trim().to_string())
                .collect(),
            TokenizerPolicy::Compat => split_compat(row).iter().map(|t| clean_cell(t)).collect(),
        }
    }
}

/// Trim and drop one leading and one trailing double quote.
pub fn clean_cell(raw: &str) -> String {
    let t = raw.trim();
    let t = t.strip_prefix('"').unwrap_or(t);
    let t = t.strip_suffix('"').unwrap_or(t);
    t.to_string()
}

fn split_standard(row: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut cur = String::new();
    let mut in_quotes = false;
    let mut chars = row.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    cur.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                cur.push(c);
            }
            continue;
        }
        match c {
            ',' => cells.push(std::mem::take(&mut cur)),
            '"' if cur.trim().is_empty() => {
                cur.clear();
                in_quotes = true;
            }
            _ => cur.push(c),
        }
    }
    cells.push(cur);
    cells
}

/// Scan left to right for tokens that are either a `"..."` span or a run of
/// characters with no comma, quote or whitespace. A token only counts when the
/// text after it is optional whitespace followed by a comma or end of row.
fn split_compat(row: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while let Some(c) = row[pos..].chars().next() {
        if c == '"' {
            match closing_quote(row, pos) {
                Some(end) => {
                    tokens.push(row[pos..end].to_string());
                    pos = end;
                }
                None => pos += c.len_utf8(),
            }
        } else if is_word_char(c) {
            let end = row[pos..]
                .find(|ch: char| !is_word_char(ch))
                .map_or(row.len(), |off| pos + off);
            if SEPARATOR_AHEAD_RE.is_match(&row[end..]) {
                tokens.push(row[pos..end].to_string());
            }
            pos = end;
        } else {
            pos += c.len_utf8();
        }
    }
    tokens
}

/// Shortest `"..."` span opening at `open` that is followed by a separator.
/// Returns the byte offset just past the closing quote.
fn closing_quote(row: &str, open: usize) -> Option<usize> {
    let body = open + 1;
    for (off, ch) in row[body..].char_indices() {
        match ch {
            '\n' | '\r' | '\u{2028}' | '\u{2029}' => return None,
            '"' => {
                let end = body + off + 1;
                if SEPARATOR_AHEAD_RE.is_match(&row[end..]) {
                    return Some(end);
                }
            }
            _ => {}
        }
    }
    None
}

fn is_word_char(c: char) -> bool {
    c != ',' && c != '"' && !c.is_whitespace()
}
