use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::{AppConfig, OutputPaths, ToolConfig};
use crate::cli::AnalyzeArgs;
use crate::error::{CliError, Result};
use mutimpact::engine::config as core_config;
use mutimpact::workflows::features::InputPaths;
use std::path::PathBuf;

/// Merges CLI flags, `-S` overrides, the config file and built-in defaults,
/// in that order of precedence.
pub fn build_config(args: &AnalyzeArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let tools_file = file_config.tools.take().unwrap_or_default();
    let tools = ToolConfig {
        mafft: args
            .mafft
            .clone()
            .unwrap_or_else(|| PathBuf::from(tools_file.mafft.unwrap_or(defaults.mafft))),
        mafft_args: tools_file.mafft_args.unwrap_or(defaults.mafft_args),
        dssp: args
            .dssp
            .clone()
            .unwrap_or_else(|| PathBuf::from(tools_file.dssp.unwrap_or(defaults.dssp))),
        dssp_args: tools_file.dssp_args.unwrap_or(defaults.dssp_args),
    };

    let output_file = file_config.output.take().unwrap_or_default();
    let write_validated =
        args.write_validated || output_file.write_validated.unwrap_or(defaults.write_validated);
    let directory = args.output.clone();
    let outputs = OutputPaths {
        full_table: directory.join(output_file.full_table.unwrap_or(defaults.full_table)),
        ml_table: directory.join(output_file.ml_table.unwrap_or(defaults.ml_table)),
        validated_table: write_validated.then(|| {
            directory.join(
                output_file
                    .validated_table
                    .unwrap_or(defaults.validated_table),
            )
        }),
        directory,
    };

    let pipeline_file = file_config.pipeline.take().unwrap_or_default();
    let join_strategy = match pipeline_file.join_strategy {
        Some(name) => name
            .parse::<core_config::JoinStrategy>()
            .map_err(|e| CliError::Config(e.to_string()))?,
        None => defaults.join_strategy,
    };
    let parallel_extraction = !args.sequential
        && pipeline_file
            .parallel_extraction
            .unwrap_or(defaults.parallel_extraction);

    let core_config = core_config::PipelineConfigBuilder::new()
        .chain_id(args.chain.clone())
        .join_strategy(join_strategy)
        .parallel_extraction(parallel_extraction)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        inputs: InputPaths {
            reference: args.fasta.clone(),
            mutations: args.mutations.clone(),
            structure: args.structure.clone(),
            homologs: args.homologs.clone(),
        },
        outputs,
        tools,
        core_config,
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid boolean value for {}: {}", key, value)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    if set_values.is_empty() {
        return Ok(config);
    }
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Argument(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key {
            "tools.mafft" => {
                config.tools.get_or_insert_with(Default::default).mafft = Some(value_str.to_string());
            }
            "tools.mafft-args" => {
                config.tools.get_or_insert_with(Default::default).mafft_args =
                    Some(value_str.split_whitespace().map(str::to_string).collect());
            }
            "tools.dssp" => {
                config.tools.get_or_insert_with(Default::default).dssp = Some(value_str.to_string());
            }
            "tools.dssp-args" => {
                config.tools.get_or_insert_with(Default::default).dssp_args =
                    Some(value_str.split_whitespace().map(str::to_string).collect());
            }
            "output.full-table" => {
                config.output.get_or_insert_with(Default::default).full_table =
                    Some(value_str.to_string());
            }
            "output.ml-table" => {
                config.output.get_or_insert_with(Default::default).ml_table =
                    Some(value_str.to_string());
            }
            "output.validated-table" => {
                config.output.get_or_insert_with(Default::default).validated_table =
                    Some(value_str.to_string());
            }
            "output.write-validated" => {
                config.output.get_or_insert_with(Default::default).write_validated =
                    Some(parse_bool(key, value_str)?);
            }
            "pipeline.join-strategy" => {
                config.pipeline.get_or_insert_with(Default::default).join_strategy =
                    Some(value_str.to_string());
            }
            "pipeline.parallel-extraction" => {
                config
                    .pipeline
                    .get_or_insert_with(Default::default)
                    .parallel_extraction = Some(parse_bool(key, value_str)?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
