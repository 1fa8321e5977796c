//! Console front-end for colloq.

pub mod repl;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::ColloqConfig;
use crate::models::ChatModel;
use crate::session::SessionConfig;

/// colloq CLI
#[derive(Parser, Debug)]
#[command(name = "colloq", version, about = "Chat with hosted language models")]
pub struct Cli {
    /// Env file to load instead of ./.env
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    /// Config file to load instead of ~/.colloq/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Chat with a model
    Chat(ChatArgs),
    /// List the built-in model catalog
    Models,
}

/// Arguments for the `chat` subcommand.
#[derive(Parser, Debug)]
pub struct ChatArgs {
    /// Model ID (e.g. llama-3.3-70b-versatile)
    #[arg(short, long)]
    pub model: Option<String>,

    /// System prompt; pass an empty string for none
    #[arg(short, long)]
    pub system: Option<String>,

    /// Temperature (0.0 - 2.0)
    #[arg(short, long)]
    pub temperature: Option<f64>,

    /// Agent display name
    #[arg(long)]
    pub name: Option<String>,

    /// Send a single message and exit
    #[arg(long)]
    pub message: Option<String>,
}

impl ChatArgs {
    /// Session parameters: configured defaults, overridden by flags.
    pub fn session_config(&self, config: &ColloqConfig) -> SessionConfig {
        let defaults = config.defaults();
        SessionConfig::builder()
            .name(self.name.clone().unwrap_or_else(|| defaults.name.clone()))
            .model(
                self.model
                    .as_deref()
                    .map(ChatModel::from)
                    .unwrap_or_else(|| defaults.model.clone()),
            )
            .temperature(self.temperature.unwrap_or(defaults.temperature))
            .maybe_system_prompt(self.system.clone().or_else(|| defaults.system_prompt.clone()))
            .build()
    }
}

/// Render the model catalog, one model per line.
pub fn render_catalog() -> String {
    ChatModel::KNOWN
        .iter()
        .map(|model| {
            let context = model
                .context_window()
                .map(|tokens| format!("{}K", tokens / 1024))
                .unwrap_or_default();
            let speed = model.speed().map(|s| s.to_string()).unwrap_or_default();
            format!(
                "{:<26} {:<7} {:<4} {}",
                model.as_str(),
                speed,
                context,
                model.description()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
