use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "mutimpact - builds per-mutation structural, conservation and physicochemical feature tables for protein variants.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full feature pipeline and write the feature tables.
    Analyze(AnalyzeArgs),
    /// Check a mutation table against the reference sequence and write the validated rows.
    Validate(ValidateArgs),
}

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    // --- Inputs ---
    /// Reference protein sequence (FASTA, exactly one record).
    #[arg(short = 'f', long, required = true, value_name = "PATH")]
    pub fasta: PathBuf,

    /// Mutation table (CSV with columns position, wt, mut).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub mutations: PathBuf,

    /// Structure file (PDB, or mmCIF for .cif/.mmcif).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub structure: PathBuf,

    /// Chain identifier in the structure file.
    #[arg(long, required = true, value_name = "ID")]
    pub chain: String,

    /// Homologous sequences (FASTA) for the conservation profile.
    #[arg(long, required = true, value_name = "PATH")]
    pub homologs: PathBuf,

    // --- Outputs ---
    /// Directory for the feature tables and alignment scratch files.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub output: PathBuf,

    /// Optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Also write the validated mutation table, overriding the config file.
    #[arg(long)]
    pub write_validated: bool,

    // --- Tool Overrides ---
    /// Override the MAFFT executable.
    #[arg(long, value_name = "PATH")]
    pub mafft: Option<PathBuf>,

    /// Override the DSSP executable.
    #[arg(long, value_name = "PATH")]
    pub dssp: Option<PathBuf>,

    // --- Pipeline Overrides ---
    /// Run the structural and conservation stages one after the other.
    #[arg(long)]
    pub sequential: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S pipeline.join-strategy=positions-first
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `validate` subcommand.
#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Reference protein sequence (FASTA, exactly one record).
    #[arg(short = 'f', long, required = true, value_name = "PATH")]
    pub fasta: PathBuf,

    /// Mutation table (CSV with columns position, wt, mut).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub mutations: PathBuf,

    /// Output path for the validated mutation table.
    #[arg(short, long, value_name = "PATH", default_value = "validated_mutations.csv")]
    pub output: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn analyze_arguments_parse() {
        let cli = Cli::try_parse_from([
            "mutimpact",
            "-vv",
            "analyze",
            "-f",
            "ref.fasta",
            "-m",
            "mutations.csv",
            "-s",
            "model.pdb",
            "--chain",
            "A",
            "--homologs",
            "homologs.fasta",
            "-o",
            "out",
            "--sequential",
            "-S",
            "pipeline.join-strategy=positions-first",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Analyze(args) => {
                assert_eq!(args.chain, "A");
                assert!(args.sequential);
                assert!(!args.write_validated);
                assert_eq!(args.set_values, vec!["pipeline.join-strategy=positions-first"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn validate_output_has_a_default() {
        let cli =
            Cli::try_parse_from(["mutimpact", "validate", "-f", "ref.fasta", "-m", "m.csv"]).unwrap();
        match cli.command {
            Commands::Validate(args) => {
                assert_eq!(args.output, PathBuf::from("validated_mutations.csv"))
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from([
            "mutimpact", "-q", "-v", "validate", "-f", "r.fasta", "-m", "m.csv",
        ]);
        assert!(result.is_err());
    }
}
