//! Free-text cut lists ("1200 x 4, 800x2") and stock-length lists.

use thiserror::Error;

use crate::types::CutRequest;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid length in '{0}'")]
    InvalidLength(String),

    #[error("invalid quantity in '{0}'")]
    InvalidQuantity(String),

    #[error("expected LENGTH or LENGTHxQTY, got '{0}'")]
    Malformed(String),
}

const QTY_SEPARATORS: [char; 4] = ['x', 'X', '*', '×'];

fn parse_positive(s: &str) -> Option<u32> {
    match s.trim().parse::<u32>() {
        Ok(0) | Err(_) => None,
        Ok(v) => Some(v),
    }
}

/// Parses one entry: `1200` (quantity 1) or `1200 x 4`.
pub fn parse_cut(entry: &str) -> Result<CutRequest, ParseError> {
    let entry = entry.trim();
    let parts: Vec<&str> = entry.split(QTY_SEPARATORS).collect();
    let (length, qty) = match parts.as_slice() {
        [length] => (*length, None),
        [length, qty] => (*length, Some(*qty)),
        _ => return Err(ParseError::Malformed(entry.to_string())),
    };

    let length =
        parse_positive(length).ok_or_else(|| ParseError::InvalidLength(entry.to_string()))?;
    let qty = match qty {
        Some(q) => parse_positive(q).ok_or_else(|| ParseError::InvalidQuantity(entry.to_string()))?,
        None => 1,
    };
    Ok(CutRequest { length, qty })
}

/// Parses a whole cut list. Entries are separated by commas, semicolons or
/// newlines; blank entries are skipped.
pub fn parse_cut_list(text: &str) -> Result<Vec<CutRequest>, ParseError> {
    text.split([',', ';', '\n'])
        .filter(|entry| !entry.trim().is_empty())
        .map(parse_cut)
        .collect()
}

/// Parses stock lengths separated by commas or whitespace. Duplicates are
/// dropped, keeping the first occurrence so the given order survives.
pub fn parse_stock_lengths(text: &str) -> Result<Vec<u32>, ParseError> {
    let mut lengths = Vec::new();
    for token in text.split(|c: char| c == ',' || c.is_whitespace()) {
        if token.is_empty() {
            continue;
        }
        let length =
            parse_positive(token).ok_or_else(|| ParseError::InvalidLength(token.to_string()))?;
        if !lengths.contains(&length) {
            lengths.push(length);
        }
    }
    Ok(lengths)
}
