use crate::cli::AnalyzeArgs;
use crate::config::{self, AppConfig};
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use mutimpact::{
    core::io::{mutations as mutation_io, table},
    engine::{
        progress::ProgressReporter,
        tools::{DsspAnalyzer, MafftAligner},
    },
    workflows::features::{self, AnalysisInputs, AnalysisResult},
};
use std::fs;
use tracing::{debug, info};

pub fn run(args: AnalyzeArgs) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let app_config = config::build_config(&args)?;

    info!("Checking inputs and loading files...");
    let inputs = AnalysisInputs::load(&app_config.inputs)?;

    fs::create_dir_all(&app_config.outputs.directory)?;

    let aligner = MafftAligner::new(&app_config.outputs.directory)
        .with_executable(&app_config.tools.mafft)
        .with_args(app_config.tools.mafft_args.clone());
    debug!(scratch = %aligner.scratch_dir().display(), "Alignment scratch directory ready.");
    let analyzer = DsspAnalyzer::new()
        .with_executable(&app_config.tools.dssp)
        .with_args(app_config.tools.dssp_args.clone());

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Analyzing {} mutation(s) on chain {}...",
        inputs.mutations.len(),
        app_config.core_config.chain_id
    );
    info!("Invoking the core feature workflow...");
    let result = features::run(
        &inputs,
        &app_config.core_config,
        &aligner,
        &analyzer,
        &reporter,
    )?;

    write_outputs(&app_config, &result)
}

fn write_outputs(app_config: &AppConfig, result: &AnalysisResult) -> Result<()> {
    let outputs = &app_config.outputs;

    table::write_table_to_path(&outputs.full_table, &result.rows, table::TableLayout::Full)?;
    info!(path = %outputs.full_table.display(), rows = result.rows.len(), "Full feature table written.");

    table::write_table_to_path(
        &outputs.ml_table,
        &result.rows,
        table::TableLayout::MachineLearning,
    )?;
    info!(path = %outputs.ml_table.display(), "ML feature table written.");

    if let Some(path) = &outputs.validated_table {
        mutation_io::write_validated_to_path(path, &result.mutations)?;
        info!(path = %path.display(), "Validated mutation table written.");
        println!("✓ Validated mutations written to: {}", path.display());
    }

    println!(
        "✓ Full feature table ({} rows) written to: {}",
        result.rows.len(),
        outputs.full_table.display()
    );
    println!("✓ ML feature table written to: {}", outputs.ml_table.display());
    Ok(())
}
