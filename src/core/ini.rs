//! INI reader for sradl input files
//!
//! Input files are plain INI: `[Section]` headers followed by `key = value`
//! (or `key: value`) lines. Lines starting with `#` or `;` are comments.
//! Sections and keys keep the order in which they were written, which is the
//! order jobs are submitted in.

use crate::SradlError;
use indexmap::IndexMap;
use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, one_of},
    combinator::{all_consuming, map, rest},
    sequence::{delimited, preceded},
    IResult,
};
use std::path::Path;

/// Ordered key/value pairs of one section
pub type Section = IndexMap<String, String>;

/// A parsed INI file, or several merged together
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    sections: IndexMap<String, Section>,
}

#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Section(&'a str),
    Pair(&'a str, &'a str),
    Blank,
}

fn section_header(input: &str) -> IResult<&str, Line<'_>> {
    map(
        delimited(char('['), take_while1(|c: char| c != ']'), char(']')),
        |name: &str| Line::Section(name.trim()),
    )(input)
}

fn comment(input: &str) -> IResult<&str, Line<'_>> {
    map(preceded(one_of("#;"), rest), |_| Line::Blank)(input)
}

fn key_value(input: &str) -> IResult<&str, Line<'_>> {
    let (input, key) = take_while1(|c: char| c != '=' && c != ':')(input)?;
    let (input, _) = one_of("=:")(input)?;
    let (input, value) = rest(input)?;
    Ok((input, Line::Pair(key.trim(), value.trim())))
}

fn parse_line(line: &str) -> IResult<&str, Line<'_>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(("", Line::Blank));
    }
    all_consuming(alt((section_header, comment, key_value)))(trimmed)
}

impl IniDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse INI text. `origin` names the source in error messages.
    pub fn parse(text: &str, origin: &str) -> Result<Self, SradlError> {
        let mut doc = IniDocument::new();
        let mut current: Option<String> = None;

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let (_, line) = parse_line(raw).map_err(|_| {
                SradlError::Parse(format!(
                    "{}:{}: expected '[section]', 'key = value' or a comment, found '{}'",
                    origin,
                    line_no,
                    raw.trim()
                ))
            })?;

            match line {
                Line::Blank => {}
                Line::Section(name) => {
                    doc.sections.entry(name.to_string()).or_default();
                    current = Some(name.to_string());
                }
                Line::Pair(key, value) => {
                    let section_name = current.as_ref().ok_or_else(|| {
                        SradlError::Parse(format!(
                            "{}:{}: '{}' appears before any [section] header",
                            origin, line_no, key
                        ))
                    })?;
                    let section = doc.sections.entry(section_name.clone()).or_default();
                    if section.contains_key(key) {
                        return Err(SradlError::Parse(format!(
                            "{}:{}: duplicate key '{}' in section [{}]",
                            origin, line_no, key, section_name
                        )));
                    }
                    section.insert(key.to_string(), value.to_string());
                }
            }
        }

        Ok(doc)
    }

    /// Read and parse an INI file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SradlError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            SradlError::Io(std::io::Error::new(
                e.kind(),
                format!("cannot read {}: {}", path.display(), e),
            ))
        })?;
        Self::parse(&text, &path.display().to_string())
    }

    /// Overlay a later document on this one. Later values win.
    pub fn merge(&mut self, other: IniDocument) {
        for (name, section) in other.sections {
            let target = self.sections.entry(name).or_default();
            for (key, value) in section {
                target.insert(key, value);
            }
        }
    }

    /// Lowercase the keys of one section, for sections read
    /// case-insensitively. Two keys differing only in case are an error.
    pub fn fold_key_case(&mut self, section: &str, origin: &str) -> Result<(), SradlError> {
        let Some(keys) = self.sections.get_mut(section) else {
            return Ok(());
        };

        let mut folded = Section::with_capacity(keys.len());
        for (key, value) in keys.drain(..) {
            let lower = key.to_ascii_lowercase();
            if folded.contains_key(&lower) {
                return Err(SradlError::Parse(format!(
                    "{}: duplicate key '{}' in section [{}] (keys are case-insensitive)",
                    origin, key, section
                )));
            }
            folded.insert(lower, value);
        }
        *keys = folded;
        Ok(())
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|s| s.get(key))
            .map(String::as_str)
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }
}
