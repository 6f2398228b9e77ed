//! Interactive CLI for the analyst desk.
//!
//! # Usage
//!
//! ```bash
//! export OPENAI_API_KEY="sk-..."
//! export OPENAI_MODEL="gpt-4"
//!
//! # One-shot commands
//! desk ask "comprehensive analysis of AAPL"
//! desk price AAPL
//! desk analyze NVDA
//!
//! # Or run without a subcommand for the interactive session
//! desk
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use desk_agents::{Coordinator, DeskConfig};
use desk_llm::OpenAiProvider;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "desk", about = "Multi-agent financial analyst desk", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Ask a free-form question
    Ask {
        /// The query to orchestrate
        query: String,
    },
    /// Look up the current price of a symbol
    Price {
        /// Ticker symbol, e.g. AAPL
        symbol: String,
    },
    /// Run a comprehensive analysis of a symbol
    Analyze {
        /// Ticker symbol, e.g. AAPL
        symbol: String,
    },
    /// Review a portfolio of symbols
    Portfolio {
        /// Ticker symbols, e.g. AAPL MSFT GOOGL
        #[arg(required = true)]
        symbols: Vec<String>,
    },
}

fn print_banner() {
    println!(
        r"
╔══════════════════════════════════════════════════════════════╗
║                      Analyst Desk                            ║
║                                                              ║
║  Ask in natural language:                                    ║
║    What is the stock price of AAPL?                          ║
║    Give me a comprehensive analysis of NVDA                  ║
║                                                              ║
║  Session commands:                                           ║
║    /history  - show past reports                             ║
║    /clear    - clear report history                          ║
║    /status   - show agent status                             ║
║    /exit     - quit                                          ║
╚══════════════════════════════════════════════════════════════╝
"
    );
}

fn build_coordinator() -> anyhow::Result<Coordinator> {
    let config = DeskConfig::from_env().context("invalid configuration")?;
    let provider = Arc::new(
        OpenAiProvider::from_env().context("OPENAI_API_KEY must be set")?,
    );
    Ok(Coordinator::setup(provider, &config))
}

async fn repl(coordinator: &Coordinator) -> anyhow::Result<()> {
    print_banner();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("desk> ");
        stdout.flush()?;

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => {
                println!("\nGoodbye!");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {e}");
                continue;
            }
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        match input {
            "/exit" | "/quit" => {
                println!("Goodbye!");
                break;
            }
            "/history" => {
                let history = coordinator.history().await;
                if history.is_empty() {
                    println!("No reports yet.\n");
                }
                for report in history {
                    let marker = if report.success { "ok" } else { "failed" };
                    let symbols = if report.symbols.is_empty() {
                        "-".to_string()
                    } else {
                        report.symbols.join(", ")
                    };
                    println!(
                        "[{}] ({marker}) {} -> {} agent(s), symbols: {symbols}",
                        report.timestamp.format("%Y-%m-%d %H:%M:%S"),
                        report.input,
                        report.delegates.len(),
                    );
                }
                println!();
            }
            "/clear" => {
                coordinator.clear_history().await;
                println!("History cleared.\n");
            }
            "/status" => {
                let status = coordinator.status().await;
                println!(
                    "Junior: {} ({} tools)\nMaster: {} ({} tools)\nReports recorded: {}\n",
                    if status.junior_ready { "ready" } else { "not initialized" },
                    status.junior_tools,
                    if status.master_ready { "ready" } else { "not initialized" },
                    status.master_tools,
                    status.history_len,
                );
            }
            query => {
                let report = coordinator.orchestrate(query).await;
                println!("{}\n", report.output);
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn,desk_agents=info".to_string()),
        )
        .init();

    let cli = Cli::parse();
    let coordinator = build_coordinator()?;

    match cli.command {
        Some(Command::Ask { query }) => {
            let report = coordinator.orchestrate(&query).await;
            println!("{}", report.output);
        }
        Some(Command::Price { symbol }) => {
            let report = coordinator.stock_price(&symbol).await;
            println!("{}", report.output);
        }
        Some(Command::Analyze { symbol }) => {
            let report = coordinator.comprehensive(&symbol).await;
            println!("{}", report.output);
        }
        Some(Command::Portfolio { symbols }) => {
            let report = coordinator.portfolio(&symbols).await;
            println!("{}", report.output);
        }
        None => repl(&coordinator).await?,
    }

    Ok(())
}
