//! MCTS configuration parameters.

pub const DEFAULT_EXPLORATION: f64 = 0.75;
pub const DEFAULT_ITERATIONS: u32 = 1000;

#[derive(Clone, Debug, PartialEq)]
pub struct MctsConfig {
    /// UCB1 exploration constant. Higher values favor exploration over
    /// exploitation.
    pub exploration_constant: f64,

    /// Iterations per decision.
    pub iterations: u32,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            exploration_constant: DEFAULT_EXPLORATION,
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl MctsConfig {
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MctsConfig::default();
        assert!((config.exploration_constant - 0.75).abs() < f64::EPSILON);
        assert_eq!(config.iterations, 1000);
    }

    #[test]
    fn test_builder_pattern() {
        let config = MctsConfig::default()
            .with_exploration(1.5)
            .with_iterations(20);

        assert_eq!(config.exploration_constant, 1.5);
        assert_eq!(config.iterations, 20);
    }
}
