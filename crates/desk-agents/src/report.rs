//! Result types produced by agents and the coordinator

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reply from a single agent run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentReply {
    /// Name of the agent that produced this reply
    pub agent: String,
    /// The request the agent was given
    pub input: String,
    /// The agent's final text, or an explanatory error message
    pub output: String,
    /// Whether the run completed without error
    pub success: bool,
}

impl AgentReply {
    /// Build a successful reply
    pub fn ok(agent: impl Into<String>, input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            agent: agent.into(),
            input: input.into(),
            output: output.into(),
            success: true,
        }
    }

    /// Build a failed reply carrying an explanatory message
    pub fn failed(
        agent: impl Into<String>,
        input: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Self {
            agent: agent.into(),
            input: input.into(),
            output: output.into(),
            success: false,
        }
    }
}

/// Final report from one orchestrated query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeskReport {
    /// Unique report ID
    pub id: Uuid,
    /// Always "Coordinator"
    pub agent: String,
    /// Original query
    pub input: String,
    /// Synthesized output text
    pub output: String,
    /// Names of the agents that contributed
    pub delegates: Vec<String>,
    /// Ticker symbols detected in the query
    pub symbols: Vec<String>,
    /// Whether every contributing agent succeeded
    pub success: bool,
    /// When the report was produced
    pub timestamp: DateTime<Utc>,
}

impl DeskReport {
    /// Build a new report stamped with a fresh ID and the current time
    pub fn new(
        input: impl Into<String>,
        output: impl Into<String>,
        delegates: Vec<String>,
        success: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            agent: "Coordinator".to_string(),
            input: input.into(),
            output: output.into(),
            delegates,
            symbols: Vec::new(),
            success,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_reply_constructors() {
        let ok = AgentReply::ok("Junior", "price of AAPL", "AAPL: $191.50");
        assert!(ok.success);

        let failed = AgentReply::failed("Master", "analyze X", "Error processing request: timeout");
        assert!(!failed.success);
        assert!(failed.output.contains("Error"));
    }

    #[test]
    fn test_desk_report_is_stamped() {
        let report = DeskReport::new("query", "output", vec!["Junior".to_string()], true);
        assert_eq!(report.agent, "Coordinator");
        assert!(!report.id.is_nil());
        assert_eq!(report.delegates, vec!["Junior".to_string()]);
    }
}
