mod repl;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pmm_core::approval::ApprovalPolicy;
use pmm_core::backend::{ModelBackend, OpenAiBackend};
use pmm_core::catalogue::ToolCatalogue;
use pmm_core::config::AppConfig;
use pmm_core::orchestrator::TurnOrchestrator;
use pmm_core::profiles::resolve_setup;
use pmm_core::store::{InMemoryStore, SessionStore};
use pmm_core::types::AgentMode;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pmm-gateway",
    about = "A product marketing agent gateway: tool-aware chat over HTTP or a local REPL",
    version,
    author
)]
struct Cli {
    /// Path to config file (default: ~/.config/pmm-gateway/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the model name
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Override the API base URL
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Agent mode selecting the advertised tool groups
    /// (full, intake, research, planning, risk)
    #[arg(long, global = true)]
    mode: Option<String>,

    /// Specialist profile (pmm, competitive_analyst, messaging_specialist,
    /// launch_coordinator)
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start interactive chat (default)
    Chat {
        /// Session id to resume
        #[arg(short, long)]
        session: Option<String>,
    },

    /// Start the HTTP server
    Serve {
        /// Bind host
        #[arg(long)]
        host: Option<String>,
        /// Bind port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Show or manage configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Initialize default configuration file
    Init,
    /// Print config file path
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up tracing.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| "pmm_gateway=info,warn".into()))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // Load config.
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => AppConfig::load().context("failed to load config")?,
    };

    // Apply CLI overrides.
    if let Some(model) = &cli.model {
        config.provider.model = model.clone();
    }
    if let Some(api_base) = &cli.api_base {
        config.provider.api_base = api_base.clone();
    }
    if let Some(mode) = &cli.mode {
        config.gateway.mode = mode.parse::<AgentMode>()?;
    }
    if let Some(profile) = &cli.profile {
        config.gateway.profile = Some(profile.clone());
    }

    match cli.command {
        Some(Commands::Serve { host, port }) => {
            if let Some(h) = host {
                config.server.host = h;
            }
            if let Some(p) = port {
                config.server.port = p;
            }
            let (store, _, orchestrator) = build_gateway(&config)?;
            pmm_server::serve(config, store, orchestrator).await?;
        }
        Some(Commands::Config { action }) => {
            handle_config_command(action, &config)?;
        }
        Some(Commands::Chat { session }) => {
            let (_, catalogue, orchestrator) = build_gateway(&config)?;
            repl::run(config, catalogue, orchestrator, session).await?;
        }
        None => {
            let (_, catalogue, orchestrator) = build_gateway(&config)?;
            repl::run(config, catalogue, orchestrator, None).await?;
        }
    }

    Ok(())
}

type Gateway = (
    Arc<dyn SessionStore>,
    Arc<ToolCatalogue>,
    Arc<TurnOrchestrator>,
);

/// Wire the store, catalogue, backend, and orchestrator from config.
fn build_gateway(config: &AppConfig) -> Result<Gateway> {
    let setup = resolve_setup(config)?;
    let catalogue = Arc::new(pmm_tools::catalogue());
    let backend: Arc<dyn ModelBackend> = Arc::new(OpenAiBackend::new(&setup.provider));
    let store: Arc<dyn SessionStore> = Arc::new(InMemoryStore::new(setup.system_prompt));
    let orchestrator = Arc::new(TurnOrchestrator::new(
        Arc::clone(&store),
        backend,
        Arc::clone(&catalogue),
        ApprovalPolicy::standard(),
        &setup.groups,
        config.gateway.reject_empty_messages,
    ));

    tracing::info!(
        "Advertising {} of {} tools, model: {}, endpoint: {}",
        orchestrator.advertised().len(),
        catalogue.len(),
        setup.provider.model,
        setup.provider.api_base,
    );

    Ok((store, catalogue, orchestrator))
}

fn handle_config_command(action: Option<ConfigAction>, config: &AppConfig) -> Result<()> {
    match action {
        Some(ConfigAction::Show) | None => {
            let toml_str = toml::to_string_pretty(config)?;
            println!("{}", toml_str);
        }
        Some(ConfigAction::Init) => {
            let path = AppConfig::default_path();
            if path.exists() {
                println!("Config already exists at: {}", path.display());
            } else {
                config.save()?;
                println!("Created default config at: {}", path.display());
            }
        }
        Some(ConfigAction::Path) => {
            println!("{}", AppConfig::default_path().display());
        }
    }
    Ok(())
}
