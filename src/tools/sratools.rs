//! Command lines for the SRA Toolkit

use crate::core::accession::AccessionRecord;
use crate::core::config::Settings;

/// Quote `arg` for a POSIX shell, leaving plain words untouched
pub fn shell_quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_-./=:+,@%".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

fn join(words: &[&str]) -> String {
    words
        .iter()
        .map(|w| shell_quote(w))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn prefetch_command(settings: &Settings, accession: &str) -> String {
    join(&[
        settings.prefetch_exe.as_str(),
        "--max-size",
        settings.max_dw_size.as_str(),
        "--output-directory",
        ".",
        accession,
    ])
}

pub fn fastq_dump_command(settings: &Settings, accession: &str) -> String {
    join(&[
        settings.fqdump_exe.as_str(),
        "--split-files",
        "--gzip",
        accession,
    ])
}

/// Shell lines a download job runs, in order
pub fn download_commands(settings: &Settings, record: &AccessionRecord) -> Vec<String> {
    vec![
        prefetch_command(settings, &record.accession),
        fastq_dump_command(settings, &record.accession),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_shell_quote() {
        assert_eq!(shell_quote("SRR123"), "SRR123");
        assert_eq!(shell_quote("/opt/sra/bin/prefetch"), "/opt/sra/bin/prefetch");
        assert_eq!(shell_quote("my tools/prefetch"), "'my tools/prefetch'");
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
        assert_eq!(shell_quote(""), "''");
    }

    #[test]
    fn test_download_commands() {
        let settings = Settings {
            prefetch_exe: "/opt/sra tk/prefetch".to_string(),
            ..Settings::default()
        };
        let record = AccessionRecord::new("liver", "SRR42");

        assert_eq!(
            download_commands(&settings, &record),
            vec![
                "'/opt/sra tk/prefetch' --max-size 50G --output-directory . SRR42".to_string(),
                "fastq-dump --split-files --gzip SRR42".to_string(),
            ]
        );
    }
}
