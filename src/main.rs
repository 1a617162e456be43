use std::io::{BufRead, Write};

use anyhow::Context;
use chat_directives::cache::Resources;
use chat_directives::config::AssistantConfig;
use chat_directives::links;
use chat_directives::llm::{ChatMessage, CompletionRequest, LlmBackend, LlmConfig, create_provider};
use chat_directives::router::{CommandRouter, RoutedCommand};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AssistantConfig::from_env().context("loading configuration")?;

    // API key only matters for hosted backends; Ollama runs without one.
    let api_key = std::env::var("OPENAI_API_KEY").ok();
    if api_key.is_none() && config.backend == LlmBackend::OpenAiCompatible {
        eprintln!("Error: OPENAI_API_KEY not set");
        eprintln!("  export OPENAI_API_KEY=sk-...");
        eprintln!("  (or set CHAT_DIRECTIVES_BACKEND=ollama for local inference)");
        std::process::exit(1);
    }

    eprintln!("💬 {} v{}", config.name, env!("CARGO_PKG_VERSION"));
    eprintln!("   Model: {}", config.model);
    eprintln!(
        "   Directives: {}name value pairs, {}flag switches",
        config.directives.var_marker, config.directives.flag_marker
    );
    eprintln!("   Type a message and press Enter. /quit to exit.\n");

    let llm_config = LlmConfig {
        backend: config.backend,
        api_key: api_key.map(secrecy::SecretString::from),
        model: config.model.clone(),
        base_url: config.base_url.clone(),
    };
    let llm = create_provider(&llm_config)?;

    let resources = Resources::init(config.link_cache_ttl_secs)?;
    let router = CommandRouter::new(config.directives);

    let mut history = vec![ChatMessage::system(
        "You are a concise personal assistant. Directive tokens have already \
         been stripped from the user's messages.",
    )];

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end_matches(['\r', '\n']);
        if line == "/quit" {
            break;
        }

        match router.handle(line) {
            RoutedCommand::Alert {
                time,
                message,
                urgent,
            } => {
                tracing::info!(%time, urgent, "Alert scheduled");
                println!(
                    "⏰ Alert at {time}{}: {message}",
                    if urgent { " (urgent)" } else { "" }
                );
            }
            RoutedCommand::Task(task) => {
                tracing::info!(id = %task.id, title = %task.title, priority = ?task.priority, "Task created");
                println!("☑ Task created: {} [{:?}]", task.title, task.priority);
            }
            RoutedCommand::Note { title, body } => {
                tracing::info!(%title, "Note saved");
                println!("📝 Note '{title}': {body}");
            }
            RoutedCommand::Link { url } => {
                let title = links::fetch_title(&resources, &url).await;
                println!("🔗 {title}");
            }
            RoutedCommand::Chat { message } => {
                if message.is_empty() {
                    continue;
                }
                history.push(ChatMessage::user(&message));
                match llm.complete(CompletionRequest::new(history.clone())).await {
                    Ok(response) => {
                        println!("{}", response.content);
                        history.push(ChatMessage::assistant(response.content));
                    }
                    Err(e) => {
                        // Keep the loop alive; drop the failed turn from history.
                        history.pop();
                        tracing::warn!(error = %e, "Completion failed");
                        println!("(no reply: {e})");
                    }
                }
            }
        }
    }

    resources.shutdown().await;
    Ok(())
}
