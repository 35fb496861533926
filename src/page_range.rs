use crate::error::{ParseError, Result, SplitError};
use std::collections::BTreeSet;

/// One comma-separated piece of a selection expression, still 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub start: u32,
    pub end: Option<u32>,
}

impl PageRange {
    /// Parse a token like "5" or "2-7". Whitespace around either number is allowed.
    pub fn parse(s: &str) -> std::result::Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("empty page reference".to_string());
        }

        if let Some((start_str, end_str)) = s.split_once('-') {
            let start = parse_page_number(start_str)?;
            let end = parse_page_number(end_str)?;
            Ok(PageRange {
                start,
                end: Some(end),
            })
        } else {
            Ok(PageRange {
                start: parse_page_number(s)?,
                end: None,
            })
        }
    }

    /// Zero-based indices covered by this range, clipped to `[0, total_pages)`.
    ///
    /// Out-of-range pages are dropped rather than reported, and a range whose
    /// end precedes its start covers nothing.
    pub fn indices(&self, total_pages: u32) -> impl Iterator<Item = u32> {
        let end = self.end.unwrap_or(self.start);
        // Page 0 has no zero-based counterpart; clamp it out.
        let first = self.start.max(1) - 1;
        let last = end.min(total_pages);
        first..last
    }
}

fn parse_page_number(s: &str) -> std::result::Result<u32, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("missing page number".to_string());
    }
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("invalid page number '{}'", s));
    }
    // All digits, so the only failure left is overflow; it clips like any
    // other page past the end.
    Ok(s.parse::<u32>().unwrap_or(u32::MAX))
}

/// Resolved, deduplicated zero-based page indices, always iterated ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageIndexSet {
    indices: BTreeSet<u32>,
}

impl PageIndexSet {
    /// Every page of a `total_pages` document.
    pub fn all(total_pages: u32) -> Self {
        PageIndexSet {
            indices: (0..total_pages).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.indices.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<u32> {
        self.iter().collect()
    }

    /// The selection as 1-based page numbers, for display.
    pub fn page_numbers(&self) -> Vec<u32> {
        self.iter().map(|i| i + 1).collect()
    }
}

/// Parse a comma-separated list of page references like "1-3,5".
///
/// Empty tokens (stray commas) are skipped.
pub fn parse_page_ranges(s: &str) -> std::result::Result<Vec<PageRange>, ParseError> {
    s.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| {
            PageRange::parse(part).map_err(|reason| ParseError::Selection {
                expression: s.to_string(),
                reason,
            })
        })
        .collect()
}

/// Resolve a selection expression against a document of `total_pages` pages.
///
/// `None`, `""` or whitespace selects every page.
pub fn resolve(expression: Option<&str>, total_pages: u32) -> Result<PageIndexSet> {
    if total_pages == 0 {
        return Err(SplitError::InvalidDocument(
            "document has no pages".to_string(),
        ));
    }

    let expression = match expression.map(str::trim) {
        None | Some("") => return Ok(PageIndexSet::all(total_pages)),
        Some(e) => e,
    };

    let mut indices = BTreeSet::new();
    for range in parse_page_ranges(expression)? {
        indices.extend(range.indices(total_pages));
    }
    Ok(PageIndexSet { indices })
}
