//! hookrelay CLI - Transform and send sample webhooks
//!
//! Preview what a Discord or Vercel payload becomes in Mattermost, and push
//! payloads through a running relay without hand-written curl commands.

mod api;
mod config;
mod samples;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde_json::Value;
use std::fs;
use std::io::Read;

use api::{RelayClient, SendOutcome};
use config::Config;
use hookrelay::{MattermostMessage, PayloadTransformer, WebhookSource};
use hookrelay_integration_discord::DiscordTransformer;
use hookrelay_integration_vercel::VercelTransformer;

#[derive(Parser)]
#[command(name = "hookrelay")]
#[command(about = "hookrelay CLI - Transform and send sample webhooks", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the Mattermost message a payload turns into (offline)
    Transform {
        /// Webhook source: discord, vercel
        source: WebhookSource,
        /// Read payload from file (stdin if omitted)
        #[arg(short, long)]
        file: Option<String>,
    },

    /// Send a payload through a running relay
    Send {
        /// Webhook source: discord, vercel
        source: WebhookSource,
        /// Read payload from file (stdin if neither --file nor --sample)
        #[arg(short, long, conflicts_with = "sample")]
        file: Option<String>,
        /// Use a bundled sample payload
        #[arg(short, long)]
        sample: Option<String>,
        /// Named destination (overrides default)
        #[arg(short, long)]
        destination: Option<String>,
        /// Mattermost webhook URL (overrides any destination)
        #[arg(short = 'u', long)]
        webhook_url: Option<String>,
    },

    /// List bundled sample payloads
    Samples {
        /// Webhook source: discord, vercel
        source: WebhookSource,
        /// Print a sample's body
        #[arg(long)]
        show: Option<String>,
    },

    /// Check that the relay is up
    Health,

    /// Manage named Mattermost destinations
    Destination {
        #[command(subcommand)]
        action: DestinationAction,
    },

    /// Show current configuration
    Config,
}

#[derive(Subcommand)]
enum DestinationAction {
    /// Add a destination
    Add {
        /// Destination name (e.g., "ops", "deploys")
        name: String,
        /// Mattermost incoming webhook URL
        #[arg(long)]
        url: String,
        /// Description (optional)
        #[arg(long)]
        description: Option<String>,
    },
    /// List all destinations
    List,
    /// Set default destination
    Set {
        /// Destination name to set as default
        name: String,
    },
    /// Remove a destination
    Remove {
        /// Destination name to remove
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Transform { source, file } => cmd_transform(source, file),
        Commands::Send { source, file, sample, destination, webhook_url } => {
            cmd_send(source, file, sample, destination, webhook_url).await
        }
        Commands::Samples { source, show } => cmd_samples(source, show),
        Commands::Health => cmd_health().await,
        Commands::Destination { action } => cmd_destination(action),
        Commands::Config => cmd_config(),
    }
}

// ============================================
// Command Implementations
// ============================================

fn cmd_transform(source: WebhookSource, file: Option<String>) -> Result<()> {
    let raw = read_payload(file.as_deref())?;
    let message = transform(source, &raw)?;

    println!("{}", serde_json::to_string_pretty(&message)?);

    Ok(())
}

async fn cmd_send(
    source: WebhookSource,
    file: Option<String>,
    sample: Option<String>,
    destination: Option<String>,
    webhook_url: Option<String>,
) -> Result<()> {
    let config = Config::load()?;

    let payload = match sample {
        Some(name) => match samples::find(source, &name) {
            Some(sample) => sample.json()?,
            None => bail!(
                "Sample '{}' not found. Run 'hookrelay samples {}' to list them.",
                name,
                source
            ),
        },
        None => read_payload(file.as_deref())?,
    };

    let target = config.resolve_webhook_url(webhook_url.as_deref(), destination.as_deref())?;

    let client = RelayClient::new(&config.base_url);
    println!(
        "{} {}",
        "→".dimmed(),
        client.webhook_endpoint(source, target.as_deref()).dimmed()
    );

    match client.send(source, &payload, target.as_deref()).await? {
        SendOutcome::Relayed(bridge) if bridge.success => {
            println!("{} {}", "✓".green(), bridge.message);
            println!("  Delivery: {}", bridge.delivery_id.to_string().dimmed());
        }
        SendOutcome::Relayed(bridge) => {
            println!("{} {} ({})", "✗".red(), bridge.message, bridge.status);
            println!("  Delivery: {}", bridge.delivery_id.to_string().dimmed());
            bail!("Mattermost rejected the message");
        }
        SendOutcome::Rejected { status, error } => {
            bail!("Relay rejected the payload ({}): {}", status, error);
        }
    }

    Ok(())
}

fn cmd_samples(source: WebhookSource, show: Option<String>) -> Result<()> {
    if let Some(name) = show {
        let sample = samples::find(source, &name)
            .with_context(|| format!("Sample '{}' not found", name))?;
        println!("{}", sample.body.trim_end());
        return Ok(());
    }

    println!("{}", format!("{} samples:", source.display_name()).bold());
    for sample in samples::samples_for(source) {
        println!("  {:<22} {}", sample.name.cyan(), sample.description.dimmed());
    }

    println!("\n{}", "Send one with:".dimmed());
    println!("  hookrelay send {} --sample <name>", source);

    Ok(())
}

async fn cmd_health() -> Result<()> {
    let config = Config::load()?;
    let client = RelayClient::new(&config.base_url);

    print!("Checking {}... ", config.base_url);

    match client.health().await {
        Ok(health) => {
            println!("{}", "OK".green());
            println!("  Status:    {}", health.status.green());
            println!("  Version:   {}", health.version);
            println!("  Endpoints: {}", health.endpoints.join(", "));
            println!("  Timestamp: {}", health.timestamp.dimmed());
        }
        Err(e) => {
            println!("{}", "Failed".red());
            bail!("Could not reach hookrelay: {}", e);
        }
    }

    Ok(())
}

fn cmd_destination(action: DestinationAction) -> Result<()> {
    let mut config = Config::load()?;

    match action {
        DestinationAction::Add { name, url, description } => {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                bail!("Webhook URL must start with http:// or https://");
            }
            config.add_destination(name.clone(), url, description);
            config.save()?;
            println!("{} Destination '{}' added", "✓".green(), name);
        }

        DestinationAction::List => {
            if config.destinations.is_empty() {
                println!("No destinations configured.");
                println!("\n{}", "Add one with:".dimmed());
                println!("  hookrelay destination add <name> --url <MATTERMOST_WEBHOOK_URL>");
                return Ok(());
            }

            println!("{}", "Destinations:".bold());
            for (name, dest) in &config.destinations {
                let is_default = config.default_destination.as_ref() == Some(name);
                let default_marker = if is_default { " (default)".green().to_string() } else { String::new() };
                let description = dest.description.as_deref().unwrap_or("-");

                println!(
                    "  {} {} ({}){}",
                    name.cyan(),
                    description.dimmed(),
                    truncate_string(&dest.url, 40),
                    default_marker
                );
            }
        }

        DestinationAction::Set { name } => {
            if config.set_default_destination(name.clone()) {
                config.save()?;
                println!("{} Default destination set to '{}'", "✓".green(), name);
            } else {
                bail!("Destination '{}' not found", name);
            }
        }

        DestinationAction::Remove { name } => {
            if config.remove_destination(&name) {
                config.save()?;
                println!("{} Destination '{}' removed", "✓".green(), name);
            } else {
                bail!("Destination '{}' not found", name);
            }
        }
    }

    Ok(())
}

fn cmd_config() -> Result<()> {
    let config = Config::load()?;

    println!("{}", "Configuration:".bold());
    println!("  Path: {:?}", Config::config_path()?);
    println!("  Relay URL: {}", config.base_url);
    println!(
        "  Default Destination: {}",
        config.default_destination.as_deref().unwrap_or("None").cyan()
    );
    println!("  Destinations: {}", config.destinations.len());

    Ok(())
}

// ============================================
// Helpers
// ============================================

/// Read a JSON payload from `file`, or stdin when `None`
fn read_payload(file: Option<&str>) -> Result<Value> {
    let content = match file {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))?
        }
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    parse_payload(&content)
}

fn parse_payload(content: &str) -> Result<Value> {
    if content.trim().is_empty() {
        bail!("Payload is empty");
    }
    serde_json::from_str(content).context("Payload is not valid JSON")
}

/// Run the same transformer the relay would for `source`
fn transform(source: WebhookSource, raw: &Value) -> Result<MattermostMessage> {
    let transformer: Box<dyn PayloadTransformer> = match source {
        WebhookSource::Discord => Box::new(DiscordTransformer::new()),
        WebhookSource::Vercel => Box::new(VercelTransformer::new()),
    };

    transformer
        .transform(raw)
        .with_context(|| format!("Could not transform {} payload", source.display_name()))
}

/// Truncate string safely for UTF-8 (by char count, not bytes)
fn truncate_string(s: &str, max_chars: usize) -> String {
    let chars: Vec<char> = s.chars().take(max_chars).collect();
    if s.chars().count() > max_chars {
        format!("{}...", chars.into_iter().collect::<String>())
    } else {
        s.to_string()
    }
}
