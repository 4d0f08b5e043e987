/// Configuration for the parsing engine
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct EngineConfig {
    /// Maximum number of stack frames, including the bottom frame
    pub stack_depth: usize,

    /// Enable panic-mode error recovery
    pub error_recovery: bool,

    /// Maximum number of reported syntax errors before giving up
    pub max_errors: usize,

    /// Return after every reduction in incremental mode
    pub yield_on_reduce: bool,
}

impl EngineConfig {
    #[must_use]
    pub const fn with_stack_depth(mut self, stack_depth: usize) -> Self {
        self.stack_depth = stack_depth;
        self
    }

    #[must_use]
    pub const fn without_recovery(mut self) -> Self {
        self.error_recovery = false;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            stack_depth: 5000,
            error_recovery: true,
            max_errors: 100,
            yield_on_reduce: false,
        }
    }
}
