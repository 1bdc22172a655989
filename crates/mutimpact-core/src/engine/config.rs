use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

/// How position-keyed features are attached to the mutation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinStrategy {
    /// Structure, conservation and chemistry are each left-joined onto the mutations.
    #[default]
    LeftJoins,
    /// Structure and conservation are inner-joined on position first, then
    /// left-joined onto the mutations, then chemistry is attached.
    PositionsFirst,
}

impl std::str::FromStr for JoinStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left-joins" | "left" => Ok(JoinStrategy::LeftJoins),
            "positions-first" | "matrix" => Ok(JoinStrategy::PositionsFirst),
            other => Err(ConfigError::InvalidValue {
                name: "join_strategy",
                reason: format!("unknown strategy '{other}'"),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub chain_id: String,
    pub join_strategy: JoinStrategy,
    pub parallel_extraction: bool,
}

#[derive(Default)]
pub struct PipelineConfigBuilder {
    chain_id: Option<String>,
    join_strategy: Option<JoinStrategy>,
    parallel_extraction: Option<bool>,
}

impl PipelineConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chain_id(mut self, chain_id: impl Into<String>) -> Self {
        self.chain_id = Some(chain_id.into());
        self
    }
    pub fn join_strategy(mut self, strategy: JoinStrategy) -> Self {
        self.join_strategy = Some(strategy);
        self
    }
    pub fn parallel_extraction(mut self, enabled: bool) -> Self {
        self.parallel_extraction = Some(enabled);
        self
    }

    pub fn build(self) -> Result<PipelineConfig, ConfigError> {
        let chain_id = self
            .chain_id
            .ok_or(ConfigError::MissingParameter("chain_id"))?;
        if chain_id.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "chain_id",
                reason: "chain identifier must not be empty".to_string(),
            });
        }
        Ok(PipelineConfig {
            chain_id,
            join_strategy: self.join_strategy.unwrap_or_default(),
            parallel_extraction: self.parallel_extraction.unwrap_or(true),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_applies_defaults() {
        let config = PipelineConfigBuilder::new().chain_id("A").build().unwrap();
        assert_eq!(config.chain_id, "A");
        assert_eq!(config.join_strategy, JoinStrategy::LeftJoins);
        assert!(config.parallel_extraction);
    }

    #[test]
    fn builder_requires_chain_id() {
        let err = PipelineConfigBuilder::new().build().unwrap_err();
        assert_eq!(err, ConfigError::MissingParameter("chain_id"));
    }

    #[test]
    fn builder_rejects_blank_chain_id() {
        let err = PipelineConfigBuilder::new()
            .chain_id("  ")
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { name: "chain_id", .. }));
    }

    #[test]
    fn join_strategy_parses_config_spellings() {
        assert_eq!(
            "positions-first".parse::<JoinStrategy>().unwrap(),
            JoinStrategy::PositionsFirst
        );
        assert_eq!(
            "Left-Joins".parse::<JoinStrategy>().unwrap(),
            JoinStrategy::LeftJoins
        );
        assert!("outer".parse::<JoinStrategy>().is_err());
    }
}
