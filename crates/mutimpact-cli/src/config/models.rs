use mutimpact::engine::config as core_config;
use mutimpact::workflows::features::InputPaths;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct ToolConfig {
    pub mafft: PathBuf,
    pub mafft_args: Vec<String>,
    pub dssp: PathBuf,
    pub dssp_args: Vec<String>,
}

/// Final output locations, already joined onto the output directory.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputPaths {
    pub directory: PathBuf,
    pub full_table: PathBuf,
    pub ml_table: PathBuf,
    pub validated_table: Option<PathBuf>,
}

pub struct AppConfig {
    pub inputs: InputPaths,
    pub outputs: OutputPaths,
    pub tools: ToolConfig,
    pub core_config: core_config::PipelineConfig,
}
