use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenv::dotenv;

use careerflow_rs::config::RosterConfig;
use careerflow_rs::engine::roster::FINISH;
use careerflow_rs::engine::{Message, Orchestrator, Supervisor, WorkerNode};
use careerflow_rs::oracle::{ScriptedGenerator, ScriptedRouter};
use careerflow_rs::tools::{DocumentTextTool, DraftDocumentTool, JobSearchTool, ToolRegistry};

use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the effective worker roster and registered tools
    Roster {
        /// Optional roster YAML overriding instructions/tools
        #[arg(short, long)]
        file: Option<String>,
    },
    /// Drive the engine end-to-end with scripted oracles
    DryRun {
        /// The request text
        #[arg(short, long)]
        input: String,

        /// Routing sequence; FINISH is appended automatically
        #[arg(
            short,
            long,
            default_values_t = ["Searcher", "Analyzer", "Generator"].map(String::from)
        )]
        route: Vec<String>,

        /// Cap on worker dispatches
        #[arg(long)]
        max_steps: Option<u32>,

        /// Optional roster YAML overriding instructions/tools
        #[arg(short, long)]
        file: Option<String>,
    },
}

async fn load_config(file: Option<&str>) -> anyhow::Result<RosterConfig> {
    match file {
        Some(path) => RosterConfig::load(path)
            .await
            .with_context(|| format!("loading roster file {}", path)),
        None => Ok(RosterConfig::default()),
    }
}

async fn build_registry() -> ToolRegistry {
    let registry = ToolRegistry::new();

    registry.register(Arc::new(DocumentTextTool)).await;
    log::info!("Registered tool: extract_document_text");

    registry
        .register(Arc::new(DraftDocumentTool::new(Arc::new(
            ScriptedGenerator::echo("(cover letter draft)"),
        ))))
        .await;
    log::info!("Registered tool: draft_document");

    match JobSearchTool::from_env() {
        Ok(tool) => {
            registry.register(Arc::new(tool)).await;
            log::info!("Registered tool: search_jobs");
        }
        Err(e) => log::warn!("Job board not configured, search_jobs unavailable: {}", e),
    }

    registry
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();

    match args.command {
        Commands::Roster { file } => {
            let config = load_config(file.as_deref()).await?;
            let registry = build_registry().await;

            println!("Workers (max {} steps):", config.max_steps());
            for descriptor in config.roster() {
                println!(
                    "  {} -> tools: {}",
                    descriptor.name,
                    descriptor.tools.join(", ")
                );
                println!("    {}", descriptor.instruction);
            }
            println!("Registered tools: {}", registry.names().await.join(", "));
        }
        Commands::DryRun {
            input,
            route,
            max_steps,
            file,
        } => {
            let config = load_config(file.as_deref()).await?;

            let mut symbols: Vec<&str> = route.iter().map(|s| s.as_str()).collect();
            symbols.push(FINISH);
            let router = Arc::new(ScriptedRouter::from_symbols(&symbols));

            // Scripted generators answer without calling tools, so the
            // nodes carry empty capability sets in a dry run
            let workers: Vec<WorkerNode> = config
                .roster()
                .iter()
                .map(|d| {
                    WorkerNode::new(
                        d.name,
                        d.instruction.clone(),
                        Arc::new(ScriptedGenerator::echo(&format!("{} report", d.name))),
                        vec![],
                    )
                })
                .collect();

            let names = workers.iter().map(|w| w.name()).collect();
            let supervisor = Supervisor::new(router, names);
            let orchestrator = Orchestrator::new(supervisor, workers)
                .with_max_steps(max_steps.unwrap_or_else(|| config.max_steps()));

            let history: Vec<Message> = vec![];
            let result = orchestrator.run(input, history).await?;

            println!("Run finished with {} messages:", result.messages.len());
            for message in &result.messages {
                println!("  [{}] {}", message.name, message.content);
            }
            println!("Final route symbol: {:?}", result.state.next);
        }
    }

    Ok(())
}
