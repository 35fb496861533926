//! Output file naming.
//!
//! A template such as `{base}_{num:03d}.pdf` is compiled once per split, so a
//! bad placeholder is reported before any page is written. Rendering is pure:
//! the same [`NameVars`] always produce the same name.
//!
//! Placeholders:
//!
//! - `{base}`: source file name without directory or extension
//! - `{num}`: 1-based position of the page within this split's output
//! - `{page}`: 1-based page number in the source document
//!
//! `num` and `page` take an optional integer format: `{num:03d}` zero-pads to
//! width 3, `{num:3}` pads with spaces, `{num:d}` is the plain number.
//! `{{` and `}}` produce literal braces.
//!
//! Substitution never adds path separators of its own, but `base` is inserted
//! verbatim. Callers taking `base` from untrusted names must sanitize it.

use crate::error::ParseError;
use regex::Regex;
use std::sync::LazyLock;

/// Integer format spec after the colon: optional zero flag, width, `d`.
static FORMAT_SPEC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0)?([0-9]*)d?$").expect("format spec pattern is valid"));

pub const DEFAULT_TEMPLATE_STEM: &str = "{base}_{num:03d}";

/// Default template for a source with the given extension, e.g. `{base}_{num:03d}.pdf`.
pub fn default_template(extension: Option<&str>) -> String {
    match extension {
        Some(ext) if !ext.is_empty() => format!("{}.{}", DEFAULT_TEMPLATE_STEM, ext),
        _ => DEFAULT_TEMPLATE_STEM.to_string(),
    }
}

/// Per-output values substituted into a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameVars<'a> {
    pub base: &'a str,
    pub num: u32,
    pub page: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Base,
    Num,
    Page,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Padding {
    None,
    Zero(usize),
    Space(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(Field, Padding),
}

/// A compiled naming template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl NamingTemplate {
    pub fn compile(template: &str) -> Result<Self, ParseError> {
        let fail = |reason: String| ParseError::Template {
            template: template.to_string(),
            reason,
        };

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '}' => return Err(fail("single '}' must be written as '}}'".to_string())),
                '{' => {
                    let mut body = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some('{') => return Err(fail("nested '{' in placeholder".to_string())),
                            Some(ch) => body.push(ch),
                            None => return Err(fail("unterminated placeholder".to_string())),
                        }
                    }

                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(parse_placeholder(&body).map_err(fail)?);
                }
                _ => literal.push(c),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(NamingTemplate {
            source: template.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the template mentions `num` or `page`. Without either, every
    /// output of a multi-page split lands on the same name.
    pub fn varies_per_page(&self) -> bool {
        self.segments.iter().any(|s| {
            matches!(
                s,
                Segment::Placeholder(Field::Num, _) | Segment::Placeholder(Field::Page, _)
            )
        })
    }

    /// Substitute `vars`. Fails if the result is not a usable file name.
    pub fn render(&self, vars: &NameVars<'_>) -> Result<String, ParseError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(Field::Base, _) => out.push_str(vars.base),
                Segment::Placeholder(Field::Num, pad) => out.push_str(&pad.apply(vars.num)),
                Segment::Placeholder(Field::Page, pad) => out.push_str(&pad.apply(vars.page)),
            }
        }

        if out.is_empty() || out == "." || out == ".." || out.contains('\0') {
            return Err(ParseError::Template {
                template: self.source.clone(),
                reason: format!(
                    "renders to invalid file name {:?} (base={:?}, num={}, page={})",
                    out, vars.base, vars.num, vars.page
                ),
            });
        }
        Ok(out)
    }
}

impl Padding {
    fn apply(self, n: u32) -> String {
        match self {
            Padding::None => n.to_string(),
            Padding::Zero(width) => format!("{:0width$}", n, width = width),
            Padding::Space(width) => format!("{:>width$}", n, width = width),
        }
    }
}

fn parse_placeholder(body: &str) -> Result<Segment, String> {
    let (name, spec) = match body.split_once(':') {
        Some((name, spec)) => (name, Some(spec)),
        None => (body, None),
    };

    let field = match name {
        "base" => Field::Base,
        "num" => Field::Num,
        "page" => Field::Page,
        "" => return Err("empty placeholder '{}'".to_string()),
        other => {
            return Err(format!(
                "unknown placeholder '{}' (expected base, num or page)",
                other
            ))
        }
    };

    let padding = match spec {
        None => Padding::None,
        Some(_) if field == Field::Base => {
            return Err("'base' does not take a format spec".to_string())
        }
        Some(spec) => {
            let caps = FORMAT_SPEC
                .captures(spec)
                .ok_or_else(|| format!("unsupported format spec '{}' for '{}'", spec, name))?;
            let zero = caps.get(1).is_some();
            match caps.get(2).map(|m| m.as_str()).filter(|w| !w.is_empty()) {
                None => Padding::None,
                Some(width) => {
                    let width = width
                        .parse::<usize>()
                        .map_err(|_| format!("width '{}' is too large", width))?;
                    if zero {
                        Padding::Zero(width)
                    } else {
                        Padding::Space(width)
                    }
                }
            }
        }
    };

    Ok(Segment::Placeholder(field, padding))
}
