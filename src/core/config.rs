use crate::core::accession::AccessionMap;
use crate::core::ini::IniDocument;
use crate::SradlError;
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};

pub const CONFIG_SECTION: &str = "Config";
pub const CODE_SECTION: &str = "SRR_code";

pub const DEFAULT_PREFIX: &str = "SRR";
pub const DEFAULT_PREFETCH: &str = "prefetch";
pub const DEFAULT_FQDUMP: &str = "fastq-dump";
pub const DEFAULT_MAX_DW_SIZE: &str = "50G";
pub const DEFAULT_QUEUE_CMD: &str = "qsub";

/// Effective settings of one run: the `[Config]` values (or their defaults)
/// and the expanded `[SRR_code]` mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// `[SRR_code]` values are `start,end` ranges rather than single numbers
    pub ranges: bool,
    /// Prepended to every code to form the accession
    pub prefix: String,
    pub prefetch_exe: String,
    pub fqdump_exe: String,
    /// Passed to `prefetch --max-size`
    pub max_dw_size: String,
    /// Command the job scripts are piped into, with any extra arguments
    pub queue_cmd: String,
    pub accessions: AccessionMap,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ranges: false,
            prefix: DEFAULT_PREFIX.to_string(),
            prefetch_exe: DEFAULT_PREFETCH.to_string(),
            fqdump_exe: DEFAULT_FQDUMP.to_string(),
            max_dw_size: DEFAULT_MAX_DW_SIZE.to_string(),
            queue_cmd: DEFAULT_QUEUE_CMD.to_string(),
            accessions: AccessionMap::default(),
        }
    }
}

/// Parse an INI-style boolean
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

fn missing_code_section() -> SradlError {
    SradlError::Config(format!(
        "no [{code}] section was found, or it was empty.\n\n\
         Add a [{code}] section to the input file with one 'name = number' line per run,\n\
         giving the run number without its prefix (e.g. 'liver = 1234567' for SRR1234567).\n\
         If your accessions do not start with {prefix}, set 'prefix' in the [{config}] section.",
        code = CODE_SECTION,
        prefix = DEFAULT_PREFIX,
        config = CONFIG_SECTION,
    ))
}

fn non_empty(key: &str, value: &str) -> Result<String, SradlError> {
    if value.is_empty() {
        return Err(SradlError::Config(format!(
            "'{}' in [{}] must not be empty",
            key, CONFIG_SECTION
        )));
    }
    Ok(value.to_string())
}

impl Settings {
    /// Build settings from a parsed (and possibly merged) input document
    pub fn from_document(doc: &IniDocument) -> Result<Self, SradlError> {
        let mut settings = Settings::default();

        for name in doc.section_names() {
            if name != CONFIG_SECTION && name != CODE_SECTION {
                warn!("Ignoring unknown section [{}]", name);
            }
        }

        if let Some(section) = doc.section(CONFIG_SECTION) {
            let mut seen = HashSet::new();
            for (key, value) in section {
                let lower = key.to_ascii_lowercase();
                if !seen.insert(lower.clone()) {
                    return Err(SradlError::Config(format!(
                        "'{}' is set more than once in [{}] (keys are case-insensitive)",
                        key, CONFIG_SECTION
                    )));
                }
                match lower.as_str() {
                    "ranges" => {
                        settings.ranges = parse_bool(value).ok_or_else(|| {
                            SradlError::Config(format!(
                                "'ranges' must be True or False, not '{}'",
                                value
                            ))
                        })?;
                        debug!("Using ranges: {}", settings.ranges);
                    }
                    "prefix" => {
                        debug!("Using non-default prefix '{}'", value);
                        settings.prefix = value.clone();
                    }
                    "prefetch_path" => settings.prefetch_exe = non_empty(key, value)?,
                    "fqdump_path" => settings.fqdump_exe = non_empty(key, value)?,
                    "max_dw_size" => settings.max_dw_size = non_empty(key, value)?,
                    "queue_cmd" => settings.queue_cmd = non_empty(key, value)?,
                    _ => warn!("Ignoring unknown key '{}' in [{}]", key, CONFIG_SECTION),
                }
            }
        } else {
            debug!("No [{}] section, using defaults", CONFIG_SECTION);
        }

        let codes = doc
            .section(CODE_SECTION)
            .filter(|s| !s.is_empty())
            .ok_or_else(missing_code_section)?;

        settings.accessions = AccessionMap::build(
            codes.iter().map(|(k, v)| (k.as_str(), v.as_str())),
            &settings.prefix,
            settings.ranges,
        )?;

        Ok(settings)
    }

    /// Rows printed by `-v`
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ranges", self.ranges.to_string()),
            ("prefix", self.prefix.clone()),
            ("prefetch", self.prefetch_exe.clone()),
            ("fastq-dump", self.fqdump_exe.clone()),
            ("max download size", self.max_dw_size.clone()),
            ("queue command", self.queue_cmd.clone()),
            ("runs", self.accessions.len().to_string()),
        ]
    }
}

/// Read, merge and interpret one or more input files. Later files override
/// keys of earlier ones.
pub fn load_settings<P: AsRef<Path>>(paths: &[P]) -> Result<Settings, SradlError> {
    if paths.is_empty() {
        return Err(SradlError::Config("no input file given".to_string()));
    }

    let mut doc = IniDocument::new();
    for path in paths {
        debug!("Reading input file {}", path.as_ref().display());
        let mut file = IniDocument::from_file(path)?;
        file.fold_key_case(CONFIG_SECTION, &path.as_ref().display().to_string())?;
        doc.merge(file);
    }

    Settings::from_document(&doc)
}
