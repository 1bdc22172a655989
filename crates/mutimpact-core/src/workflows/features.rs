use crate::core::io::{fasta, mutations as mutation_io, structure as structure_io};
use crate::core::models::features::{ChemistryFeature, ConservationColumn, FeatureRow, StructuralFeature};
use crate::core::models::mutation::{Mutation, RawMutation};
use crate::core::models::sequence::{ReferenceSequence, SequenceRecord};
use crate::core::models::structure::StructureModel;
use crate::engine::aggregation;
use crate::engine::chemistry::compute_chemistry_features;
use crate::engine::config::PipelineConfig;
use crate::engine::conservation::build_conservation_profile;
use crate::engine::error::PipelineError;
use crate::engine::mapping::build_coordinate_mapping;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::stability::score_stability;
use crate::engine::structural::extract_structural_features;
use crate::engine::tools::{AccessibilityAnalyzer, SequenceAligner};
use crate::engine::validation::validate_mutations;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Locations of the four pipeline inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPaths {
    pub reference: PathBuf,
    pub mutations: PathBuf,
    pub structure: PathBuf,
    pub homologs: PathBuf,
}

impl InputPaths {
    /// Fails on the first path that does not exist, in declaration order.
    pub fn ensure_exist(&self) -> Result<(), PipelineError> {
        for path in [&self.reference, &self.mutations, &self.structure, &self.homologs] {
            if !path.exists() {
                return Err(PipelineError::InputNotFound { path: path.clone() });
            }
        }
        Ok(())
    }
}

/// Parsed pipeline inputs, ready for [`run`].
#[derive(Debug, Clone)]
pub struct AnalysisInputs {
    pub reference: ReferenceSequence,
    pub mutations: Vec<RawMutation>,
    pub structure: StructureModel,
    pub structure_path: PathBuf,
    pub homologs: Vec<SequenceRecord>,
}

impl AnalysisInputs {
    #[instrument(skip_all, name = "load_inputs")]
    pub fn load(paths: &InputPaths) -> Result<Self, PipelineError> {
        paths.ensure_exist()?;
        let inputs = Self {
            reference: fasta::load_reference(&paths.reference)?,
            mutations: mutation_io::load_mutations(&paths.mutations)?,
            structure: structure_io::load_structure(&paths.structure)?,
            structure_path: paths.structure.clone(),
            homologs: fasta::load_homologs(&paths.homologs)?,
        };
        info!(
            reference_length = inputs.reference.len(),
            mutations = inputs.mutations.len(),
            chains = inputs.structure.chains().len(),
            homologs = inputs.homologs.len(),
            "Inputs loaded."
        );
        Ok(inputs)
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub mutations: Vec<Mutation>,
    pub rows: Vec<FeatureRow>,
}

/// Loads the reference and mutation table and validates the mutations.
#[instrument(skip_all, name = "validation_workflow")]
pub fn validate_files(
    reference_path: &Path,
    mutations_path: &Path,
    reporter: &ProgressReporter,
) -> Result<Vec<Mutation>, PipelineError> {
    for path in [reference_path, mutations_path] {
        if !path.exists() {
            return Err(PipelineError::InputNotFound {
                path: path.to_path_buf(),
            });
        }
    }
    reporter.phase("Validation", || {
        let reference = fasta::load_reference(reference_path)?;
        let raw = mutation_io::load_mutations(mutations_path)?;
        validate_mutations(&reference, &raw)
    })
}

#[instrument(skip_all, name = "feature_workflow", fields(chain = %config.chain_id))]
pub fn run(
    inputs: &AnalysisInputs,
    config: &PipelineConfig,
    aligner: &dyn SequenceAligner,
    analyzer: &dyn AccessibilityAnalyzer,
    reporter: &ProgressReporter,
) -> Result<AnalysisResult, PipelineError> {
    // === Phase 1: Validation ===
    let mutations = reporter.phase("Validation", || {
        validate_mutations(&inputs.reference, &inputs.mutations)
    })?;

    // === Phase 2: Structural and conservation features ===
    let (structural, conservation) = if config.parallel_extraction {
        let (structural, conservation) = reporter.phase("Structure and conservation", || {
            rayon::join(
                || structural_stage(inputs, &config.chain_id, analyzer),
                || build_conservation_profile(&inputs.reference, &inputs.homologs, aligner),
            )
        });
        (structural?, conservation?)
    } else {
        let structural = reporter.phase("Structural features", || {
            structural_stage(inputs, &config.chain_id, analyzer)
        })?;
        let conservation = reporter.phase("Conservation profile", || {
            build_conservation_profile(&inputs.reference, &inputs.homologs, aligner)
        })?;
        (structural, conservation)
    };
    reporter.report(Progress::Message(format!(
        "{} structural positions, {} conservation positions",
        structural.len(),
        conservation.len()
    )));

    // === Phase 3: Chemistry, aggregation and scoring ===
    let rows = reporter.phase("Aggregation", || {
        let chemistry = compute_chemistry_features(&mutations)?;
        assemble(config, &mutations, &structural, &conservation, &chemistry)
    })?;

    info!(rows = rows.len(), "Feature workflow complete.");
    Ok(AnalysisResult { mutations, rows })
}

fn structural_stage(
    inputs: &AnalysisInputs,
    chain_id: &str,
    analyzer: &dyn AccessibilityAnalyzer,
) -> Result<Vec<StructuralFeature>, PipelineError> {
    let mapping = build_coordinate_mapping(&inputs.structure, chain_id, &inputs.reference)?;
    let accessibility = analyzer.analyze(&inputs.structure, &inputs.structure_path)?;
    extract_structural_features(&inputs.structure, chain_id, &mapping, &accessibility)
}

fn assemble(
    config: &PipelineConfig,
    mutations: &[Mutation],
    structural: &[StructuralFeature],
    conservation: &[ConservationColumn],
    chemistry: &[ChemistryFeature],
) -> Result<Vec<FeatureRow>, PipelineError> {
    let rows = aggregation::aggregate(
        config.join_strategy,
        mutations,
        structural,
        conservation,
        chemistry,
    )?;
    Ok(score_stability(rows))
}
