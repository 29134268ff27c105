//! The text whose glyphs get looked up.

use std::{
    io::{BufRead, BufReader, Read},
    path::Path,
};

use crate::Error;

/// Hiragana "te" followed by two Latin letters.
pub const SAMPLE_TEXT: &str = "てst";

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum TextSource {
    /// Always query [`SAMPLE_TEXT`]; the input file is only opened.
    #[default]
    Sample,
    /// Query the contents of the input file.
    File,
}

/// Builds the query text from the already opened input.
pub fn query_text(
    source: TextSource,
    input: impl Read,
    path: &Path,
    is_range: bool,
) -> Result<String, Error> {
    if source == TextSource::Sample {
        return Ok(SAMPLE_TEXT.to_string());
    }
    let read_error = |source| Error::ReadInput {
        path: path.to_path_buf(),
        source,
    };
    let mut text = String::new();
    for (i, line) in BufReader::new(input).lines().enumerate() {
        let line = line.map_err(read_error)?;
        let line = if i == 0 {
            line.strip_prefix('\u{feff}').unwrap_or(line.as_str())
        } else {
            line.as_str()
        };
        if is_range {
            text.extend(parse_ranges(line).map_err(|text| Error::BadRange {
                line: i + 1,
                text,
            })?);
        } else {
            text.push_str(line);
        }
    }
    Ok(text)
}

fn parse_codepoint(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    let hex = ["U+", "u+", "0x", "0X"]
        .iter()
        .find_map(|prefix| raw.strip_prefix(prefix))
        .unwrap_or(raw);
    u32::from_str_radix(hex, 16).ok()
}

/// Expands a line of comma separated hex code points and `start-end` ranges.
///
/// On failure returns the offending item.
pub fn parse_ranges(line: &str) -> Result<Vec<char>, String> {
    let mut chars = Vec::new();
    for item in line.split(',') {
        if item.trim().is_empty() {
            continue;
        }
        let bounds = match item.split_once('-') {
            Some((start, end)) => parse_codepoint(start).zip(parse_codepoint(end)),
            None => parse_codepoint(item).map(|cp| (cp, cp)),
        };
        let Some((start, end)) = bounds.filter(|(start, end)| start <= end) else {
            return Err(item.trim().to_string());
        };
        for cp in start..=end {
            let Some(c) = char::from_u32(cp) else {
                return Err(item.trim().to_string());
            };
            chars.push(c);
        }
    }
    Ok(chars)
}
