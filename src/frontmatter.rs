//! Front-matter parsing.
//!
//! Every content file starts with a front-matter block: a `---` line, a flat
//! set of `key: "value"` pairs, and a closing `---` line. The body follows.
//!
//! ```text
//! ---
//! title: "Hello World"
//! date: "2020-01-01"
//! description: "First post"
//! ---
//!
//! Body prose starts here.
//! ```
//!
//! Recognized keys: `title` (required), `date` (required, ISO-8601 calendar
//! date), `description` (optional). Values may be double-quoted or bare.
//! Unknown keys are ignored — content files are user-authored prose, not
//! config, so a stray key shouldn't fail the file.
//!
//! Errors from this module carry no file path; the transform stage wraps
//! them with the offending file's path for the error report.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Delimiter line for the front-matter block.
const MARKER: &str = "---";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrontMatterError {
    #[error("missing front-matter block (file must start with '---')")]
    MissingBlock,
    #[error("unterminated front-matter block (no closing '---')")]
    Unterminated,
    #[error("missing required front-matter field '{0}'")]
    MissingField(&'static str),
    #[error("invalid date '{0}' (expected ISO-8601, e.g. 2020-01-01)")]
    InvalidDate(String),
}

/// Parsed front-matter of one content file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontMatter {
    pub title: String,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Split raw file contents into the front-matter block and the body.
///
/// The block must start on the very first line. Returns the lines between
/// the delimiters (joined) and the body after the closing delimiter.
pub fn split(raw: &str) -> Result<(&str, &str), FrontMatterError> {
    // Tolerate a UTF-8 BOM from Windows editors.
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let Some(rest) = raw
        .strip_prefix(MARKER)
        .and_then(|r| r.strip_prefix("\r\n").or_else(|| r.strip_prefix('\n')))
    else {
        return Err(FrontMatterError::MissingBlock);
    };

    for (offset, line) in line_spans(rest) {
        if line.trim_end_matches('\r') == MARKER {
            let block = &rest[..offset];
            let body = &rest[offset + line.len()..];
            let body = body.strip_prefix('\n').unwrap_or(body);
            return Ok((block, body));
        }
    }

    Err(FrontMatterError::Unterminated)
}

/// Iterate lines with their byte offsets, newline excluded.
fn line_spans(s: &str) -> impl Iterator<Item = (usize, &str)> {
    s.split_inclusive('\n').scan(0usize, |offset, chunk| {
        let start = *offset;
        *offset += chunk.len();
        Some((start, chunk.strip_suffix('\n').unwrap_or(chunk)))
    })
}

/// Parse a front-matter block into a [`FrontMatter`].
///
/// Missing `title` or `date` (or a present-but-empty `title`) is an error,
/// as is a date that doesn't parse as an ISO calendar date.
pub fn parse(block: &str) -> Result<FrontMatter, FrontMatterError> {
    let mut title = None;
    let mut date_raw = None;
    let mut description = None;

    for line in block.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        // Flat key: value mapping. Lines without a colon are ignored.
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = unquote(value.trim());
        match key.trim() {
            "title" => title = Some(value.to_string()),
            "date" => date_raw = Some(value.to_string()),
            "description" => {
                if !value.is_empty() {
                    description = Some(value.to_string());
                }
            }
            // Unknown keys are fine
            _ => {}
        }
    }

    let title = title
        .filter(|t| !t.is_empty())
        .ok_or(FrontMatterError::MissingField("title"))?;
    let date_raw = date_raw
        .filter(|d| !d.is_empty())
        .ok_or(FrontMatterError::MissingField("date"))?;
    let date = NaiveDate::parse_from_str(&date_raw, "%Y-%m-%d")
        .map_err(|_| FrontMatterError::InvalidDate(date_raw))?;

    Ok(FrontMatter {
        title,
        date,
        description,
    })
}

/// Split raw contents into parsed front-matter and body in one step.
pub fn extract(raw: &str) -> Result<(FrontMatter, &str), FrontMatterError> {
    let (block, body) = split(raw)?;
    Ok((parse(block)?, body))
}

/// Strip one pair of surrounding double quotes, if present.
fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn extract_quoted_values() {
        let raw = "---\ntitle: \"Hello\"\ndate: \"2020-01-01\"\n---\n\n# Hi\n";
        let (fm, body) = extract(raw).unwrap();

        assert_eq!(fm.title, "Hello");
        assert_eq!(fm.date, date("2020-01-01"));
        assert_eq!(fm.description, None);
        assert_eq!(body, "\n# Hi\n");
    }

    #[test]
    fn extract_bare_values() {
        let raw = "---\ntitle: Hello\ndate: 2020-01-01\n---\nbody";
        let (fm, body) = extract(raw).unwrap();

        assert_eq!(fm.title, "Hello");
        assert_eq!(body, "body");
    }

    #[test]
    fn description_is_optional() {
        let raw = "---\ntitle: \"T\"\ndate: \"2021-06-15\"\ndescription: \"A post\"\n---\n";
        let (fm, _) = extract(raw).unwrap();
        assert_eq!(fm.description.as_deref(), Some("A post"));
    }

    #[test]
    fn missing_title_reported() {
        let raw = "---\ndate: \"2020-01-01\"\n---\nbody";
        assert_eq!(
            extract(raw).unwrap_err(),
            FrontMatterError::MissingField("title")
        );
    }

    #[test]
    fn empty_title_reported_as_missing() {
        let raw = "---\ntitle: \"\"\ndate: \"2020-01-01\"\n---\n";
        assert_eq!(
            extract(raw).unwrap_err(),
            FrontMatterError::MissingField("title")
        );
    }

    #[test]
    fn missing_date_reported() {
        let raw = "---\ntitle: \"T\"\n---\nbody";
        assert_eq!(
            extract(raw).unwrap_err(),
            FrontMatterError::MissingField("date")
        );
    }

    #[test]
    fn unparsable_date_reported() {
        let raw = "---\ntitle: \"T\"\ndate: \"January 1st\"\n---\n";
        assert_eq!(
            extract(raw).unwrap_err(),
            FrontMatterError::InvalidDate("January 1st".into())
        );
    }

    #[test]
    fn no_block_at_file_start() {
        assert_eq!(
            extract("# Just markdown\n").unwrap_err(),
            FrontMatterError::MissingBlock
        );
    }

    #[test]
    fn unterminated_block() {
        let raw = "---\ntitle: \"T\"\ndate: \"2020-01-01\"\n\n# oops no closer";
        assert_eq!(extract(raw).unwrap_err(), FrontMatterError::Unterminated);
    }

    #[test]
    fn crlf_line_endings() {
        let raw = "---\r\ntitle: \"T\"\r\ndate: \"2020-01-01\"\r\n---\r\nbody";
        let (fm, body) = extract(raw).unwrap();
        assert_eq!(fm.title, "T");
        assert_eq!(body.trim_start_matches('\r'), "body");
    }

    #[test]
    fn unknown_keys_ignored() {
        let raw = "---\ntitle: \"T\"\ndate: \"2020-01-01\"\nlayout: \"fancy\"\n---\n";
        let (fm, _) = extract(raw).unwrap();
        assert_eq!(fm.title, "T");
    }

    #[test]
    fn a_dashed_line_in_body_is_not_a_delimiter() {
        let raw = "---\ntitle: \"T\"\ndate: \"2020-01-01\"\n---\ntext\n---\nmore";
        let (_, body) = extract(raw).unwrap();
        assert!(body.contains("more"));
    }

    #[test]
    fn colon_in_value_preserved() {
        let raw = "---\ntitle: \"Rust: the book\"\ndate: \"2020-01-01\"\n---\n";
        let (fm, _) = extract(raw).unwrap();
        assert_eq!(fm.title, "Rust: the book");
    }
}
