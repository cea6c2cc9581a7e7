/// Resource limits for evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalOptions {
    /// Maximum nesting of evaluation frames in the big-step evaluator
    pub max_depth: usize,
    /// Maximum number of transitions the CK machine may take
    pub max_steps: usize,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            max_depth: 1_000,
            max_steps: 1_000_000,
        }
    }
}

impl EvalOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }
}
