use mutimpact::engine::config::JoinStrategy;

pub struct DefaultsConfig {
    pub mafft: String,
    pub mafft_args: Vec<String>,
    pub dssp: String,
    pub dssp_args: Vec<String>,
    pub full_table: String,
    pub ml_table: String,
    pub validated_table: String,
    pub write_validated: bool,
    pub join_strategy: JoinStrategy,
    pub parallel_extraction: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            mafft: "mafft".to_string(),
            mafft_args: vec!["--auto".to_string()],
            dssp: "mkdssp".to_string(),
            dssp_args: vec!["--output-format".to_string(), "dssp".to_string()],
            full_table: "final_mutation_analysis.csv".to_string(),
            ml_table: "mutation_feature_matrix.csv".to_string(),
            validated_table: "validated_mutations.csv".to_string(),
            write_validated: false,
            join_strategy: JoinStrategy::LeftJoins,
            parallel_extraction: true,
        }
    }
}
