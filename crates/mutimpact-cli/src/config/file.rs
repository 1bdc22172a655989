use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileToolsConfig {
    pub mafft: Option<String>,
    pub mafft_args: Option<Vec<String>>,
    pub dssp: Option<String>,
    pub dssp_args: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileOutputConfig {
    pub full_table: Option<String>,
    pub ml_table: Option<String>,
    pub validated_table: Option<String>,
    pub write_validated: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FilePipelineConfig {
    pub join_strategy: Option<String>,
    pub parallel_extraction: Option<bool>,
}

/// The optional TOML configuration file; every key may be omitted.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub tools: Option<FileToolsConfig>,
    pub output: Option<FileOutputConfig>,
    pub pipeline: Option<FilePipelineConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        Self::from_toml(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_sections() {
        let cfg = FileConfig::from_toml(
            r#"
            [tools]
            mafft = "/opt/mafft/bin/mafft"
            mafft-args = ["--maxiterate", "1000", "--localpair"]
            dssp = "mkdssp"

            [output]
            full-table = "full.csv"
            write-validated = true

            [pipeline]
            join-strategy = "positions-first"
            parallel-extraction = false
            "#,
        )
        .unwrap();

        let tools = cfg.tools.unwrap();
        assert_eq!(tools.mafft.as_deref(), Some("/opt/mafft/bin/mafft"));
        assert_eq!(tools.mafft_args.unwrap().len(), 3);
        assert_eq!(tools.dssp_args, None);
        let output = cfg.output.unwrap();
        assert_eq!(output.full_table.as_deref(), Some("full.csv"));
        assert_eq!(output.write_validated, Some(true));
        let pipeline = cfg.pipeline.unwrap();
        assert_eq!(pipeline.join_strategy.as_deref(), Some("positions-first"));
        assert_eq!(pipeline.parallel_extraction, Some(false));
    }

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(FileConfig::from_toml("").unwrap(), FileConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(FileConfig::from_toml("[tools]\nclustal = \"clustalo\"\n").is_err());
        assert!(FileConfig::from_toml("[scoring]\nweight = 1.0\n").is_err());
    }
}
