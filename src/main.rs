//! colloq CLI binary entry point.

use std::io::{self, Write};

use clap::Parser;
use colloq::chat::ChatAgent;
use colloq::cli::{self, ChatArgs, Cli, Commands};
use colloq::config::ColloqConfig;
use colloq::gateway::CompletionGateway;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Models => {
            println!("{}", cli::render_catalog());
            Ok(())
        }
        Commands::Chat(ref args) => handle_chat(&cli, args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn handle_chat(cli: &Cli, args: &ChatArgs) -> colloq::error::Result<()> {
    let config = ColloqConfig::load(cli.env_file.as_deref(), cli.config.as_deref())?;
    let gateway = CompletionGateway::from_config(&config)?;
    let mut agent = ChatAgent::new(args.session_config(&config), gateway)?;

    let stdout = io::stdout();
    let mut output = stdout.lock();

    match &args.message {
        Some(message) => cli::repl::reply(&mut agent, message, &mut output).await?,
        None => cli::repl::run(&mut agent, io::stdin().lock(), &mut output).await?,
    }
    output.flush()?;
    Ok(())
}
