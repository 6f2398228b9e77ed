//! Role profiles binding instructions and sampling settings to an agent

use serde::{Deserialize, Serialize};

/// Configuration of one agent role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleProfile {
    /// Agent name, e.g. "Junior" or "Master"
    pub name: String,
    /// Role instructions sent as the system prompt
    pub instructions: String,
    /// Sampling temperature for this role
    pub temperature: f32,
    /// Maximum executor loop iterations
    pub max_iterations: usize,
    /// Whether the agent keeps conversation memory across requests
    pub retain_memory: bool,
}

impl RoleProfile {
    /// Create a new profile
    pub fn new(
        name: impl Into<String>,
        instructions: impl Into<String>,
        temperature: f32,
        max_iterations: usize,
    ) -> Self {
        Self {
            name: name.into(),
            instructions: instructions.into(),
            temperature,
            max_iterations,
            retain_memory: true,
        }
    }

    /// Disable conversation memory for this role
    pub fn without_memory(mut self) -> Self {
        self.retain_memory = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_defaults_to_memory() {
        let profile = RoleProfile::new("Junior", "gather data", 0.5, 10);
        assert!(profile.retain_memory);
        assert!(!profile.without_memory().retain_memory);
    }
}
