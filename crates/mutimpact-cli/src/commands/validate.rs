use crate::cli::ValidateArgs;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use mutimpact::{
    core::io::mutations as mutation_io, engine::progress::ProgressReporter, workflows::features,
};
use std::fs;
use tracing::info;

pub fn run(args: ValidateArgs) -> Result<()> {
    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let mutations = features::validate_files(&args.fasta, &args.mutations, &reporter)?;

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    mutation_io::write_validated_to_path(&args.output, &mutations)?;
    info!(
        path = %args.output.display(),
        count = mutations.len(),
        "Validated mutation table written."
    );
    println!(
        "✓ {} mutation(s) passed validation; written to: {}",
        mutations.len(),
        args.output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use mutimpact::engine::error::PipelineError;
    use tempfile::tempdir;

    fn write_inputs(dir: &std::path::Path, mutations: &str) -> (std::path::PathBuf, std::path::PathBuf) {
        let fasta = dir.join("ref.fasta");
        let table = dir.join("mutations.csv");
        fs::write(&fasta, ">ref\nACDEFG\n").unwrap();
        fs::write(&table, mutations).unwrap();
        (fasta, table)
    }

    #[test]
    fn writes_validated_table_into_new_directory() {
        let dir = tempdir().unwrap();
        let (fasta, mutations) = write_inputs(dir.path(), "position,wt,mut,note\n3,d,e,x\n");
        let output = dir.path().join("out").join("validated.csv");

        run(ValidateArgs {
            fasta,
            mutations,
            output: output.clone(),
        })
        .unwrap();

        assert_eq!(
            fs::read_to_string(output).unwrap(),
            "position,wt,mut\n3,D,E\n"
        );
    }

    #[test]
    fn invalid_mutation_writes_nothing() {
        let dir = tempdir().unwrap();
        let (fasta, mutations) = write_inputs(dir.path(), "position,wt,mut\n1,A,A\n");
        let output = dir.path().join("validated.csv");

        let err = run(ValidateArgs {
            fasta,
            mutations,
            output: output.clone(),
        })
        .unwrap_err();

        assert!(matches!(
            err,
            CliError::Pipeline(PipelineError::NoOpMutation { .. })
        ));
        assert!(!output.exists());
    }

    #[test]
    fn missing_reference_is_input_not_found() {
        let dir = tempdir().unwrap();
        let (_, mutations) = write_inputs(dir.path(), "position,wt,mut\n3,D,E\n");
        let err = run(ValidateArgs {
            fasta: dir.path().join("absent.fasta"),
            mutations,
            output: dir.path().join("validated.csv"),
        })
        .unwrap_err();
        assert!(matches!(
            err,
            CliError::Pipeline(PipelineError::InputNotFound { .. })
        ));
    }
}
