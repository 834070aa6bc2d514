//! Pushwoosh CLI - preview and send notifications.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::WrapErr as _;
use pushwoosh_client::{ClientConfig, ConfigError, DeliveryClient, PushOutcome};
use pushwoosh_core::{Message, Platform, SendDate};

#[derive(Parser)]
#[command(name = "pushwoosh")]
#[command(about = "Send push notifications through Pushwoosh", long_about = None)]
struct Cli {
    /// Config file (defaults to <config dir>/pushwoosh/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the serialized notification without sending it
    Preview(MessageArgs),

    /// Send the notification
    Send(MessageArgs),
}

#[derive(Args)]
struct MessageArgs {
    /// Notification text
    #[arg(long)]
    content: String,

    /// Target device (repeatable); omit to broadcast
    #[arg(long = "device")]
    devices: Vec<String>,

    /// Target platform by name or id (repeatable)
    #[arg(long = "platform")]
    platforms: Vec<Platform>,

    /// Audience filter as "<name> <operator> <operand>" (repeatable)
    #[arg(long = "condition")]
    conditions: Vec<String>,

    /// Delivery time as "YYYY-MM-DD HH:MM"; defaults to now
    #[arg(long)]
    send_date: Option<String>,

    /// URL to open
    #[arg(long)]
    link: Option<String>,

    /// iOS badge count
    #[arg(long)]
    ios_badges: Option<i64>,

    /// JSON payload attached to the notification
    #[arg(long)]
    data: Option<String>,

    /// Leave Windows (WNS) fields out of the notification
    #[arg(long)]
    no_wns: bool,
}

impl MessageArgs {
    /// Build the message, leaving devices for the caller to attach.
    fn build(&self) -> color_eyre::eyre::Result<Message> {
        let mut message = Message::new(self.content.as_str());
        message.platforms = self.platforms.clone();
        message.link = self.link.clone();
        message.ios_badges = self.ios_badges;

        if let Some(send_date) = &self.send_date {
            let at = chrono::NaiveDateTime::parse_from_str(send_date, "%Y-%m-%d %H:%M")
                .wrap_err_with(|| format!("invalid send date: {}", send_date))?;
            message.send_date = SendDate::At(at);
        }

        if let Some(data) = &self.data {
            message.data = Some(serde_json::from_str(data).wrap_err("--data is not valid JSON")?);
        }

        if self.no_wns {
            message.wns_type = None;
        }

        for condition in &self.conditions {
            let (name, operator, operand) = parse_condition(condition)?;
            message.add_condition(name, operator, operand);
        }

        Ok(message)
    }
}

/// Split `"A.tags.offer EQ winter"` into its parts.
///
/// Scalar operands are kept exactly as typed. A JSON list operand turns the
/// whole condition into the structured `[name, operator, list]` form.
fn parse_condition(raw: &str) -> color_eyre::eyre::Result<(&str, &str, serde_json::Value)> {
    let mut parts = raw.trim().splitn(3, ' ');
    let (Some(name), Some(operator), Some(operand)) = (parts.next(), parts.next(), parts.next())
    else {
        color_eyre::eyre::bail!("condition must be \"<name> <operator> <operand>\": {}", raw);
    };

    let operand = match serde_json::from_str::<serde_json::Value>(operand) {
        Ok(list @ serde_json::Value::Array(_)) => serde_json::json!([name, operator, list]),
        _ => serde_json::Value::String(operand.to_string()),
    };

    Ok((name, operator, operand))
}

fn load_config(path: Option<&Path>) -> color_eyre::eyre::Result<ClientConfig> {
    let config = match path {
        Some(path) => ClientConfig::load_from(path).wrap_err("failed to load config")?,
        None => match ClientConfig::load() {
            Ok(config) => config,
            Err(ConfigError::NotFound(path)) => {
                tracing::debug!(path = %path.display(), "no config file, using environment");
                ClientConfig::default()
            }
            Err(e) => return Err(e).wrap_err("failed to load config"),
        },
    };

    Ok(config.with_env())
}

#[tokio::main]
async fn main() -> color_eyre::eyre::Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Preview(args) => {
            let mut message = args.build()?;
            message.add_devices(args.devices.iter().map(String::as_str));

            let wire = serde_json::Value::Object(message.serialize());
            println!("{}", serde_json::to_string_pretty(&wire)?);
        }
        Commands::Send(args) => {
            let config = load_config(cli.config.as_deref())?;
            let mut client = DeliveryClient::from_config(&config)?;
            let mut message = args.build()?;

            let outcome = if args.devices.is_empty() {
                client.push(&message).await?
            } else {
                client
                    .push_to_devices(&mut message, args.devices.iter().map(String::as_str))
                    .await?
            };

            match outcome {
                PushOutcome::Delivered(response) => match response.body {
                    Some(body) => println!("{}", serde_json::to_string_pretty(&body)?),
                    None => tracing::warn!(status = response.status, "response was not JSON"),
                },
                PushOutcome::NothingToSend => tracing::info!("nothing to send"),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_condition() {
        let (name, operator, operand) = parse_condition("A.tags.offer EQ winter sale").unwrap();
        assert_eq!(name, "A.tags.offer");
        assert_eq!(operator, "EQ");
        assert_eq!(operand, serde_json::json!("winter sale"));

        let (_, _, operand) = parse_condition("City IN [\"Paris\",\"Lyon\"]").unwrap();
        assert_eq!(operand, serde_json::json!(["City", "IN", ["Paris", "Lyon"]]));

        assert!(parse_condition("Level 3").is_err());
    }

    fn conditions_for(raw: &str) -> serde_json::Value {
        let cli = Cli::parse_from(["pushwoosh", "preview", "--content", "Hi", "--condition", raw]);
        let Commands::Preview(args) = cli.command else {
            panic!("expected preview");
        };
        args.build().unwrap().serialize()["conditions"].clone()
    }

    #[test]
    fn test_condition_list_operand_keeps_name_and_operator() {
        assert_eq!(
            conditions_for("City IN [\"Paris\",\"Lyon\"]"),
            serde_json::json!([["City", "IN", ["Paris", "Lyon"]]])
        );
    }

    #[test]
    fn test_condition_scalar_operand_kept_verbatim() {
        assert_eq!(conditions_for("Tag EQ null"), serde_json::json!(["Tag EQ null"]));
        assert_eq!(conditions_for("Price EQ 1.50"), serde_json::json!(["Price EQ 1.50"]));
        assert_eq!(conditions_for("Score EQ 1e2"), serde_json::json!(["Score EQ 1e2"]));
        assert_eq!(
            conditions_for("Profile EQ {\"a\":1}"),
            serde_json::json!(["Profile EQ {\"a\":1}"])
        );
    }

    #[test]
    fn test_build_message() {
        let cli = Cli::parse_from([
            "pushwoosh",
            "preview",
            "--content",
            "Hello",
            "--platform",
            "ios",
            "--platform",
            "3",
            "--condition",
            "Level GTE 3",
            "--send-date",
            "2024-03-05 09:07",
            "--no-wns",
        ]);
        let Commands::Preview(args) = cli.command else {
            panic!("expected preview");
        };

        let wire = args.build().unwrap().serialize();
        assert_eq!(wire["platforms"], serde_json::json!([1, 3]));
        assert_eq!(wire["conditions"], serde_json::json!(["Level GTE 3"]));
        assert_eq!(wire["send_date"], serde_json::json!("2024-03-05 9:07"));
        assert!(!wire.contains_key("wns_type"));
    }
}
