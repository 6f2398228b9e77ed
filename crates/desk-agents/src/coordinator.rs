//! Coordinator routing queries between the Junior and Master agents.
//!
//! Every query is classified, dispatched to one or both agents, and the
//! outcome is recorded in the workflow history. Failures never escape past
//! a report's success flag.

use crate::agents::AnalystAgent;
use crate::cache::CacheTiers;
use crate::classifier::{self, Complexity};
use crate::config::DeskConfig;
use crate::error::DeskError;
use crate::prompts;
use crate::report::{AgentReply, DeskReport};
use desk_llm::CompletionProvider;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

const SYNTHESIS_NOTES: &str = "📋 SYNTHESIS & RECOMMENDATIONS:\n\
Based on the comprehensive analysis above, here are the key takeaways:\n\
- Data accuracy verified by Junior Agent\n\
- Strategic insights provided by Master Agent\n\
- Combined analysis provides balanced perspective\n\n\
⚠️ IMPORTANT NOTES:\n\
- This analysis is for informational purposes only\n\
- Always conduct your own research before making investment decisions\n\
- Consider consulting with financial professionals\n\
- Past performance does not guarantee future results";

/// Snapshot of the coordinator's readiness
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeskStatus {
    pub junior_ready: bool,
    pub master_ready: bool,
    pub junior_tools: usize,
    pub master_tools: usize,
    pub history_len: usize,
}

/// Which single agent a routed query goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Junior,
    Master,
}

/// Routes queries to the right agents and keeps the workflow history
pub struct Coordinator {
    junior: Option<AnalystAgent>,
    master: Option<AnalystAgent>,
    history: Mutex<Vec<DeskReport>>,
}

impl Coordinator {
    /// Create a coordinator with no agents attached
    pub fn new() -> Self {
        Self {
            junior: None,
            master: None,
            history: Mutex::new(Vec::new()),
        }
    }

    /// Attach the Junior and Master agents
    pub fn with_agents(junior: AnalystAgent, master: AnalystAgent) -> Self {
        Self {
            junior: Some(junior),
            master: Some(master),
            history: Mutex::new(Vec::new()),
        }
    }

    /// Build a fully wired coordinator from a provider and configuration
    pub fn setup(provider: Arc<dyn CompletionProvider>, config: &DeskConfig) -> Self {
        let tiers = CacheTiers::new(config.cache_ttl_realtime, config.cache_ttl_fundamental);
        Self::with_agents(
            AnalystAgent::junior(provider.clone(), config, &tiers),
            AnalystAgent::master(provider, config, &tiers),
        )
    }

    /// Route a query, run the agents, and record the report.
    ///
    /// Simple queries go to the Junior agent, complex ones to the Master,
    /// and everything else runs both concurrently with the results
    /// synthesized into one combined report.
    pub async fn orchestrate(&self, query: &str) -> DeskReport {
        let complexity = classifier::classify(query);
        let symbols = classifier::extract_symbols(query);
        info!(?complexity, ?symbols, query_length = query.len(), "Query classified");

        let mut report = match complexity {
            Complexity::Simple => self.run_single(query, Route::Junior).await,
            Complexity::Complex => self.run_single(query, Route::Master).await,
            Complexity::MultiStep => self.run_multi_step(query).await,
        };
        report.symbols = symbols;

        self.history.lock().await.push(report.clone());
        report
    }

    async fn run_single(&self, query: &str, route: Route) -> DeskReport {
        let (agent, role, header) = match route {
            Route::Junior => (&self.junior, "Junior", "🤖 JUNIOR AGENT ANALYSIS:\n\n"),
            Route::Master => (&self.master, "Master", "🎯 MASTER AGENT ANALYSIS:\n\n"),
        };

        let Some(agent) = agent else {
            let err = DeskError::UninitializedAgent(role.to_string());
            return DeskReport::new(query, format!("Error: {err}"), vec![], false);
        };

        let reply = agent.run(query).await;
        let output = if reply.success {
            format!("{header}{}", reply.output)
        } else {
            reply.output.clone()
        };

        DeskReport::new(query, output, vec![reply.agent.clone()], reply.success)
    }

    async fn run_multi_step(&self, query: &str) -> DeskReport {
        let (Some(junior), Some(master)) = (&self.junior, &self.master) else {
            let missing = if self.junior.is_none() {
                "Junior"
            } else {
                "Master"
            };
            let err = DeskError::UninitializedAgent(missing.to_string());
            return DeskReport::new(query, format!("Error: {err}"), vec![], false);
        };

        // No data dependency between the two; run them concurrently
        let (junior_reply, master_reply) = tokio::join!(junior.run(query), master.run(query));

        let output = synthesize(query, &junior_reply, &master_reply);
        let success = junior_reply.success && master_reply.success;

        DeskReport::new(
            query,
            output,
            vec![junior_reply.agent.clone(), master_reply.agent.clone()],
            success,
        )
    }

    /// Convenience: current price for one symbol
    pub async fn stock_price(&self, symbol: &str) -> DeskReport {
        self.orchestrate(&prompts::stock_price_prompt(symbol)).await
    }

    /// Convenience: full analysis of one symbol
    pub async fn comprehensive(&self, symbol: &str) -> DeskReport {
        self.orchestrate(&prompts::comprehensive_prompt(symbol))
            .await
    }

    /// Convenience: multi-symbol portfolio review
    pub async fn portfolio(&self, symbols: &[String]) -> DeskReport {
        self.orchestrate(&prompts::portfolio_prompt(symbols)).await
    }

    /// Snapshot of the recorded workflow history
    pub async fn history(&self) -> Vec<DeskReport> {
        self.history.lock().await.clone()
    }

    /// Drop all recorded reports
    pub async fn clear_history(&self) {
        self.history.lock().await.clear();
    }

    /// Readiness and bookkeeping summary
    pub async fn status(&self) -> DeskStatus {
        DeskStatus {
            junior_ready: self.junior.is_some(),
            master_ready: self.master.is_some(),
            junior_tools: self.junior.as_ref().map_or(0, AnalystAgent::tool_count),
            master_tools: self.master.as_ref().map_or(0, AnalystAgent::tool_count),
            history_len: self.history.lock().await.len(),
        }
    }
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new()
    }
}

/// Combine both replies into one report body.
///
/// Each agent's section appears only when that agent succeeded; the fixed
/// synthesis and disclaimer blocks always close the report.
fn synthesize(query: &str, junior: &AgentReply, master: &AgentReply) -> String {
    let mut output = format!("🤖 ORCHESTRATED ANALYSIS: {query}\n\n");

    if junior.success {
        output.push_str(&format!(
            "📊 DATA GATHERING (Junior Agent):\n{}\n\n",
            junior.output
        ));
    }

    if master.success {
        output.push_str(&format!(
            "🎯 ADVANCED ANALYSIS (Master Agent):\n{}\n\n",
            master.output
        ));
    }

    output.push_str(SYNTHESIS_NOTES);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::RoleProfile;
    use crate::test_support::{FailingProvider, ScriptedProvider};
    use desk_core::ToolRegistry;
    use desk_llm::{CompletionResponse, Message, StopReason};

    fn text_response(text: &str) -> CompletionResponse {
        CompletionResponse {
            message: Message::assistant(text),
            stop_reason: StopReason::EndTurn,
            usage: Default::default(),
        }
    }

    fn agent(name: &str, provider: Arc<dyn CompletionProvider>) -> AnalystAgent {
        let config = DeskConfig::default();
        let profile = RoleProfile::new(name, "test instructions", 0.5, 5).without_memory();
        AnalystAgent::new(profile, provider, Arc::new(ToolRegistry::new()), &config)
    }

    fn coordinator_with(
        junior_provider: Arc<dyn CompletionProvider>,
        master_provider: Arc<dyn CompletionProvider>,
    ) -> Coordinator {
        Coordinator::with_agents(
            agent("Junior", junior_provider),
            agent("Master", master_provider),
        )
    }

    #[tokio::test]
    async fn test_simple_query_routes_to_junior() {
        let junior = Arc::new(ScriptedProvider::new(vec![text_response("AAPL: $191.50")]));
        let master = Arc::new(ScriptedProvider::new(vec![]));
        let coordinator = coordinator_with(junior, master.clone());

        let report = coordinator.orchestrate("stock price of AAPL").await;

        assert!(report.success);
        assert!(report.output.starts_with("🤖 JUNIOR AGENT ANALYSIS:\n\n"));
        assert_eq!(report.delegates, vec!["Junior".to_string()]);
        assert_eq!(master.calls(), 0);
    }

    #[tokio::test]
    async fn test_complex_query_routes_to_master() {
        let junior = Arc::new(ScriptedProvider::new(vec![]));
        let master = Arc::new(ScriptedProvider::new(vec![text_response("strong buy")]));
        let coordinator = coordinator_with(junior.clone(), master);

        let report = coordinator
            .orchestrate("comprehensive analysis of NVDA")
            .await;

        assert!(report.success);
        assert!(report.output.starts_with("🎯 MASTER AGENT ANALYSIS:\n\n"));
        assert_eq!(report.delegates, vec!["Master".to_string()]);
        assert_eq!(junior.calls(), 0);
    }

    #[tokio::test]
    async fn test_multi_step_runs_both_and_synthesizes() {
        let junior = Arc::new(ScriptedProvider::new(vec![text_response("the data")]));
        let master = Arc::new(ScriptedProvider::new(vec![text_response("the insight")]));
        let coordinator = coordinator_with(junior, master);

        let report = coordinator.orchestrate("Tell me about Apple").await;

        assert!(report.success);
        assert!(report.output.contains("🤖 ORCHESTRATED ANALYSIS: Tell me about Apple"));
        assert!(report.output.contains("📊 DATA GATHERING (Junior Agent):\nthe data"));
        assert!(report.output.contains("🎯 ADVANCED ANALYSIS (Master Agent):\nthe insight"));
        assert!(report.output.contains("IMPORTANT NOTES"));
        assert_eq!(
            report.delegates,
            vec!["Junior".to_string(), "Master".to_string()]
        );
    }

    #[tokio::test]
    async fn test_multi_step_partial_failure() {
        // Junior fails, Master succeeds: only the Master section appears
        // and the combined report is marked unsuccessful
        let master = Arc::new(ScriptedProvider::new(vec![text_response("the insight")]));
        let coordinator = coordinator_with(Arc::new(FailingProvider), master);

        let report = coordinator.orchestrate("Tell me about Apple").await;

        assert!(!report.success);
        assert!(!report.output.contains("DATA GATHERING"));
        assert!(report.output.contains("ADVANCED ANALYSIS (Master Agent)"));
        assert!(report.output.contains("IMPORTANT NOTES"));
    }

    #[tokio::test]
    async fn test_uninitialized_agent_gives_failed_report() {
        let coordinator = Coordinator::new();

        let report = coordinator.orchestrate("stock price of AAPL").await;

        assert!(!report.success);
        assert!(report.output.contains("Junior agent not initialized"));
        assert!(report.delegates.is_empty());
    }

    #[tokio::test]
    async fn test_report_carries_extracted_symbols() {
        let junior = Arc::new(ScriptedProvider::new(vec![text_response("$191.50")]));
        let master = Arc::new(ScriptedProvider::new(vec![text_response("compared")]));
        let coordinator = coordinator_with(junior, master);

        let report = coordinator.orchestrate("stock price of AAPL").await;
        assert_eq!(report.symbols, vec!["AAPL".to_string()]);

        let report = coordinator.orchestrate("Compare MSFT and GOOGL").await;
        assert_eq!(
            report.symbols,
            vec!["GOOGL".to_string(), "MSFT".to_string()]
        );
    }

    #[tokio::test]
    async fn test_recorded_history_carries_symbols_too() {
        let junior = Arc::new(ScriptedProvider::new(vec![text_response("$191.50")]));
        let master = Arc::new(ScriptedProvider::new(vec![]));
        let coordinator = coordinator_with(junior, master);

        coordinator.stock_price("NVDA").await;

        let history = coordinator.history().await;
        assert_eq!(history[0].symbols, vec!["NVDA".to_string()]);
    }

    #[tokio::test]
    async fn test_every_orchestration_appends_history() {
        let junior = Arc::new(ScriptedProvider::new(vec![text_response("ok")]));
        let master = Arc::new(ScriptedProvider::new(vec![]));
        let coordinator = coordinator_with(junior, master);

        assert!(coordinator.history().await.is_empty());

        let report = coordinator.orchestrate("quick price check").await;

        let history = coordinator.history().await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, report.id);
    }

    #[tokio::test]
    async fn test_failed_orchestration_is_recorded_too() {
        let coordinator = Coordinator::new();
        coordinator.orchestrate("price of AAPL").await;

        assert_eq!(coordinator.history().await.len(), 1);
        assert!(!coordinator.history().await[0].success);
    }

    #[tokio::test]
    async fn test_clear_history() {
        let junior = Arc::new(ScriptedProvider::new(vec![text_response("ok")]));
        let master = Arc::new(ScriptedProvider::new(vec![]));
        let coordinator = coordinator_with(junior, master);

        coordinator.orchestrate("quick price check").await;
        coordinator.clear_history().await;

        assert!(coordinator.history().await.is_empty());
    }

    #[tokio::test]
    async fn test_status() {
        let junior = Arc::new(ScriptedProvider::new(vec![text_response("ok")]));
        let master = Arc::new(ScriptedProvider::new(vec![]));
        let coordinator = coordinator_with(junior, master);

        coordinator.orchestrate("quick price check").await;

        let status = coordinator.status().await;
        assert!(status.junior_ready);
        assert!(status.master_ready);
        assert_eq!(status.history_len, 1);
    }

    #[tokio::test]
    async fn test_convenience_prompts_route_as_expected() {
        let junior = Arc::new(ScriptedProvider::new(vec![text_response("$191.50")]));
        let master = Arc::new(ScriptedProvider::new(vec![text_response("analysis")]));
        let coordinator = coordinator_with(junior, master);

        // "Get the current stock price for AAPL" carries simple keywords only
        let report = coordinator.stock_price("AAPL").await;
        assert_eq!(report.delegates, vec!["Junior".to_string()]);

        // "Perform comprehensive analysis of AAPL" carries complex keywords only
        let report = coordinator.comprehensive("AAPL").await;
        assert_eq!(report.delegates, vec!["Master".to_string()]);
    }
}
