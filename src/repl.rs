use anyhow::Result;
use pmm_core::catalogue::ToolCatalogue;
use pmm_core::config::AppConfig;
use pmm_core::emitter::StreamEvent;
use pmm_core::orchestrator::TurnOrchestrator;
use pmm_core::types::ToolCall;
use rustyline::error::ReadlineError;
use rustyline::{Config as RlConfig, DefaultEditor};
use std::io::Write;
use std::sync::Arc;

const BANNER: &str = r#"
  ╔═══════════════════════════════════════════╗
  ║           pmm-gateway v0.1.0              ║
  ║   Product marketing agent gateway         ║
  ╚═══════════════════════════════════════════╝

  Type your message and press Enter to chat.
  Commands:
    /new           — Start a fresh session
    /session       — Show the current session id
    /tools         — List advertised tools
    /config        — Show current config
    /help          — Show this help
    /exit          — Quit
"#;

/// Run the interactive REPL.
pub async fn run(
    config: AppConfig,
    catalogue: Arc<ToolCatalogue>,
    orchestrator: Arc<TurnOrchestrator>,
    session: Option<String>,
) -> Result<()> {
    println!("{}", BANNER);
    println!(
        "  Model: {}  |  Endpoint: {}",
        config.provider.model, config.provider.api_base
    );
    println!();

    let rl_config = RlConfig::builder().auto_add_history(true).build();
    let history_path = AppConfig::data_dir().join("repl_history.txt");
    let mut rl = DefaultEditor::with_config(rl_config)?;
    let _ = rl.load_history(&history_path);

    let mut session_id = session;

    loop {
        let label = session_id.as_deref().map(short_id).unwrap_or("new");
        let prompt = format!("\x1b[1;36m{}\x1b[0m \x1b[1;32m❯\x1b[0m ", label);

        match rl.readline(&prompt) {
            Ok(line) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }

                if input.starts_with('/') {
                    let keep_going =
                        handle_command(input, &mut session_id, &orchestrator, &config)?;
                    if !keep_going {
                        break;
                    }
                    continue;
                }

                if let Err(e) = run_turn(input, &mut session_id, &catalogue, &orchestrator).await {
                    eprintln!("\x1b[0;31mError: {}\x1b[0m", e);
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(e) => {
                eprintln!("Input error: {}", e);
                break;
            }
        }
    }

    if let Some(parent) = history_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let _ = rl.save_history(&history_path);

    Ok(())
}

/// Drive one streaming turn: print text deltas as they arrive, then run
/// any surfaced tool calls for display.
async fn run_turn(
    input: &str,
    session_id: &mut Option<String>,
    catalogue: &ToolCatalogue,
    orchestrator: &TurnOrchestrator,
) -> Result<()> {
    let mut rx = orchestrator.stream_turn(session_id.as_deref(), input).await?;

    print!("\x1b[1;33massistant\x1b[0m: ");
    let _ = std::io::stdout().flush();

    let mut calls: Vec<ToolCall> = Vec::new();
    while let Some(event) = rx.recv().await {
        match event {
            StreamEvent::Text { content } => {
                print!("{}", content);
                let _ = std::io::stdout().flush();
            }
            StreamEvent::ToolCall(call) => {
                println!("\n  \x1b[0;35m⚡ Tool requested: {}\x1b[0m", call.name);
                calls.push(call);
            }
            StreamEvent::Done { session_id: id } => {
                *session_id = Some(id);
            }
            StreamEvent::Error { error } => {
                println!("\n\x1b[0;31mError: {}\x1b[0m", error);
            }
        }
    }
    println!();

    // Results are shown to the user only; they are never appended to the
    // transcript.
    for call in calls {
        execute_call(call, catalogue).await;
    }

    Ok(())
}

async fn execute_call(call: ToolCall, catalogue: &ToolCatalogue) {
    if let Some(reason) = &call.validation_error {
        println!("  \x1b[0;31m✗ {} rejected: {}\x1b[0m", call.name, reason);
        return;
    }
    let Some(tool) = catalogue.lookup(&call.name) else {
        println!("  \x1b[0;31m✗ unknown tool: {}\x1b[0m", call.name);
        return;
    };

    match tool.execute(call.arguments).await {
        Ok(output) => {
            if call.approval_required {
                println!("  \x1b[1;33m⚠ PROVISIONAL (requires approval)\x1b[0m");
            }
            println!("  \x1b[0;32m✓ {}\x1b[0m", call.name);
            println!("    {}", output.replace('\n', "\n    "));
        }
        Err(e) => {
            println!("  \x1b[0;31m✗ {} failed: {}\x1b[0m", call.name, e);
        }
    }
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

/// Handle a slash command. Returns `true` to continue the loop, `false` to exit.
fn handle_command(
    input: &str,
    session_id: &mut Option<String>,
    orchestrator: &TurnOrchestrator,
    config: &AppConfig,
) -> Result<bool> {
    let cmd = input.split_whitespace().next().unwrap_or(input);

    match cmd {
        "/exit" | "/quit" | "/q" => {
            println!("Goodbye!");
            return Ok(false);
        }
        "/new" => {
            *session_id = None;
            println!("Started a fresh session. The next message opens it.");
        }
        "/session" => match session_id {
            Some(id) => println!("Current session: {}", id),
            None => println!("No session yet. Send a message to open one."),
        },
        "/tools" => {
            let advertised = orchestrator.advertised();
            println!("  Advertised tools ({}):", advertised.len());
            for schema in advertised {
                println!("    • {} — {}", schema.name, schema.description);
            }
        }
        "/config" => {
            let toml_str = toml::to_string_pretty(config)?;
            println!("{}", toml_str);
        }
        "/help" | "/?" => {
            println!("  /new           — Start a fresh session");
            println!("  /session       — Show the current session id");
            println!("  /tools         — List advertised tools");
            println!("  /config        — Show current config");
            println!("  /help          — Show this help");
            println!("  /exit          — Quit");
        }
        _ => {
            println!(
                "Unknown command: {}. Type /help for available commands.",
                cmd
            );
        }
    }

    Ok(true)
}
