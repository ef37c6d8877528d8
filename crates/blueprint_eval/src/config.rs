//! Configuration for evaluation runs.

/// Configuration for an evaluation run.
///
/// Controls the canonical defaults Prepare applies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalConfig {
    /// Default example-generation flag for every attribute.
    pub generate_examples: bool,

    /// Type-name suffix of collection result types.
    pub collection_suffix: String,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            generate_examples: true,
            collection_suffix: "Collection".to_string(),
        }
    }
}

impl EvalConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration that disables example generation everywhere.
    #[must_use]
    pub fn without_examples() -> Self {
        Self {
            generate_examples: false,
            ..Self::default()
        }
    }

    /// Builder method to set the example-generation default.
    #[must_use]
    pub fn with_generate_examples(mut self, generate: bool) -> Self {
        self.generate_examples = generate;
        self
    }

    /// Builder method to set the collection type-name suffix.
    #[must_use]
    pub fn with_collection_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.collection_suffix = suffix.into();
        self
    }
}
