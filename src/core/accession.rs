//! Accession records: display name to run accession, with replicate ranges

use crate::SradlError;
use serde::Serialize;
use std::collections::HashSet;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Inclusive run-number range shared by replicates of one sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReplicateRange {
    pub start: u64,
    pub end: u64,
}

impl ReplicateRange {
    pub fn new(start: u64, end: u64) -> Result<Self, SradlError> {
        if start > end {
            return Err(SradlError::Config(format!(
                "range start {} is greater than range end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Number of runs covered, both ends included
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    pub fn iter(&self) -> RangeInclusive<u64> {
        self.start..=self.end
    }
}

impl FromStr for ReplicateRange {
    type Err = SradlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 2 {
            return Err(SradlError::Config(format!(
                "a range needs two integers separated by a comma, but '{}' has {}",
                s,
                parts.len()
            )));
        }

        let bound = |text: &str| {
            text.parse::<u64>().map_err(|_| {
                SradlError::Config(format!("'{}' in range '{}' is not an integer", text, s))
            })
        };
        ReplicateRange::new(bound(parts[0])?, bound(parts[1])?)
    }
}

/// One job: a display name and the accession it is downloaded from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessionRecord {
    pub name: String,
    pub accession: String,
}

impl AccessionRecord {
    pub fn new(name: impl Into<String>, accession: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            accession: accession.into(),
        }
    }
}

/// All records of a run, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AccessionMap {
    records: Vec<AccessionRecord>,
}

/// Does `file_name` start with `accession` followed by '.' or '_'?
/// Returns the remainder (including the separator) when it does.
pub fn accession_suffix<'a>(file_name: &'a str, accession: &str) -> Option<&'a str> {
    let rest = file_name.strip_prefix(accession)?;
    if rest.starts_with('.') || rest.starts_with('_') {
        Some(rest)
    } else {
        None
    }
}

/// Every prefix of `s` that ends right before a '.' or '_'
fn separator_prefixes(s: &str) -> impl Iterator<Item = &str> {
    s.char_indices()
        .filter(|&(_, c)| c == '.' || c == '_')
        .map(move |(i, _)| &s[..i])
}

fn name_clash(name: &str, accession: &str) -> SradlError {
    SradlError::Config(format!(
        "name '{}' clashes with accession {}; renamed files would be renamed again",
        name, accession
    ))
}

fn check_token(kind: &str, key: &str, value: &str) -> Result<(), SradlError> {
    if value.is_empty() {
        return Err(SradlError::Config(format!("{} for '{}' is empty", kind, key)));
    }
    if value.chars().any(|c| c.is_whitespace() || c == '/' || c == '\\') {
        return Err(SradlError::Config(format!(
            "{} '{}' for '{}' must not contain whitespace or path separators",
            kind, value, key
        )));
    }
    Ok(())
}

impl AccessionMap {
    /// Build the record list from `[SRR_code]` entries.
    ///
    /// Without ranges each entry is `name = number` and yields one record.
    /// With ranges each entry is `name = start,end` and yields one record per
    /// run, named `name_0`, `name_1`, ... in run order.
    pub fn build<'a, I>(entries: I, prefix: &str, ranges: bool) -> Result<Self, SradlError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut records = Vec::new();

        for (name, value) in entries {
            check_token("name", name, name)?;
            if ranges {
                let range: ReplicateRange = value.parse().map_err(|e| match e {
                    SradlError::Config(msg) => {
                        SradlError::Config(format!("invalid range for '{}': {}", name, msg))
                    }
                    other => other,
                })?;
                for (i, run) in range.iter().enumerate() {
                    records.push(AccessionRecord::new(
                        format!("{}_{}", name, i),
                        format!("{}{}", prefix, run),
                    ));
                }
            } else {
                check_token("code", name, value)?;
                records.push(AccessionRecord::new(name, format!("{}{}", prefix, value)));
            }
        }

        let map = AccessionMap { records };
        map.validate()?;
        Ok(map)
    }

    fn validate(&self) -> Result<(), SradlError> {
        let mut names = HashSet::new();
        let mut accessions = HashSet::new();

        for record in &self.records {
            if !names.insert(record.name.as_str()) {
                return Err(SradlError::Config(format!(
                    "name '{}' is used more than once",
                    record.name
                )));
            }
            if !accessions.insert(record.accession.as_str()) {
                return Err(SradlError::Config(format!(
                    "accession {} is listed more than once (again for '{}')",
                    record.accession, record.name
                )));
            }
        }

        // A renamed file must never look like a download again: no name may
        // equal an accession, and neither may start with the other plus '.' or '_'
        for record in &self.records {
            if let Some(accession) = separator_prefixes(&record.name)
                .chain(std::iter::once(record.name.as_str()))
                .find(|p| accessions.contains(p))
            {
                return Err(name_clash(&record.name, accession));
            }
            if let Some(name) = separator_prefixes(&record.accession).find(|p| names.contains(p)) {
                return Err(name_clash(name, &record.accession));
            }
        }

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AccessionRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[AccessionRecord] {
        &self.records
    }

    pub fn get(&self, name: &str) -> Option<&AccessionRecord> {
        self.records.iter().find(|r| r.name == name)
    }
}

impl<'a> IntoIterator for &'a AccessionMap {
    type Item = &'a AccessionRecord;
    type IntoIter = std::slice::Iter<'a, AccessionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
