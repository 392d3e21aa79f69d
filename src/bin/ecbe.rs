//! Operator command line for composing and submitting CBS/ETWS messages.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use ecbe::{Console, ConsoleConfig, FormField, FormState, MessageType};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ecbe", version, about = "Compose and submit Cell Broadcast / ETWS messages")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true, env = "ECBE_CONFIG")]
    config: Option<PathBuf>,

    /// CBC base URL, e.g. http://10.0.0.5:8080
    #[arg(long, global = true)]
    backend: Option<String>,

    /// Print backend responses as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Compose a message and submit it to the CBC
    Submit {
        #[arg(value_enum)]
        kind: Kind,

        /// Message identifier (see `ecbe catalog`)
        #[arg(long)]
        message_id: Option<String>,

        /// Message content (CBS only)
        #[arg(long)]
        text: Option<String>,

        /// Set any form field, e.g. --set geographic_scope=cell_wide
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_edit)]
        edits: Vec<(FormField, String)>,

        /// Print the request document instead of sending it
        #[arg(long)]
        dry_run: bool,
    },
    /// Withdraw a previously submitted message
    Withdraw { message_id: u16 },
    /// List current broadcasts
    Broadcasts,
    /// Show selectable message identifiers
    Catalog {
        #[arg(value_enum)]
        kind: Option<Kind>,
    },
}

#[derive(Copy, Clone, ValueEnum)]
enum Kind {
    Cbs,
    Etws,
}

impl From<Kind> for MessageType {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Cbs => MessageType::Cbs,
            Kind::Etws => MessageType::Etws,
        }
    }
}

fn parse_edit(raw: &str) -> std::result::Result<(FormField, String), String> {
    let (field, value) =
        raw.split_once('=').ok_or_else(|| format!("expected FIELD=VALUE, got '{raw}'"))?;
    let field = field.parse::<FormField>().map_err(|e| e.to_string())?;
    Ok((field, value.to_string()))
}

fn load_config(cli: &Cli) -> Result<ConsoleConfig> {
    let config = match &cli.config {
        Some(path) => ConsoleConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => ConsoleConfig::default(),
    };
    Ok(config.with_env_overrides(cli.backend.as_deref())?)
}

fn print_response(value: &serde_json::Value, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else if !value.is_null() {
        println!("{value}");
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;

    match &cli.cmd {
        Cmd::Submit { kind, message_id, text, edits, dry_run } => {
            let message_type = MessageType::from(*kind);
            let mut form = FormState::new(message_type);
            if let Some(id) = message_id {
                form = form.update(FormField::MessageId, id)?;
            }
            if let Some(text) = text {
                form = form.update(FormField::Text, text)?;
            }
            form = form.update_all(edits.iter().map(|(field, value)| (*field, value.as_str())))?;

            let console = Console::from_config(config)?;
            if *dry_run {
                let request = console.preview(&form).map_err(|e| {
                    let prompt = e.operator_prompt(message_type);
                    anyhow::Error::new(e).context(prompt)
                })?;
                println!("{}", serde_json::to_string_pretty(&request)?);
                return Ok(());
            }

            match console.submit(&form).await {
                Ok(submission) => {
                    println!("{}", submission.operator_notice());
                    print_response(&submission.response, cli.json)
                }
                Err(e) => {
                    let prompt = e.operator_prompt(message_type);
                    Err(anyhow::Error::new(e).context(prompt))
                }
            }
        }
        Cmd::Withdraw { message_id } => {
            let console = Console::from_config(config)?;
            let response = console
                .withdraw(*message_id)
                .await
                .with_context(|| format!("Error withdrawing message {message_id}"))?;
            println!("Message {message_id} withdrawn");
            print_response(&response, cli.json)
        }
        Cmd::Broadcasts => {
            let console = Console::from_config(config)?;
            let response = console.broadcasts().await.context("Error listing broadcasts")?;
            print_response(&response, true)
        }
        Cmd::Catalog { kind } => {
            let console = Console::from_config(config)?;
            let types: Vec<MessageType> = match kind {
                Some(kind) => vec![MessageType::from(*kind)],
                None => MessageType::ALL.to_vec(),
            };
            for message_type in types {
                println!("{message_type}:");
                for entry in console.catalog().entries(message_type) {
                    println!("  {}", entry.label);
                }
                if message_type == MessageType::Etws {
                    let names: Vec<&str> =
                        console.catalog().warning_types().iter().map(|w| w.as_str()).collect();
                    println!("  warning types: {}", names.join(", "));
                }
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ecbe=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::CommandFactory;
    use std::io::Write;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn edits_split_on_the_first_equals_sign() {
        let (field, value) = parse_edit("text=a=b").unwrap();
        assert_eq!(field, FormField::Text);
        assert_eq!(value, "a=b");

        assert_eq!(parse_edit("num_of_bcast=10").unwrap().0, FormField::BroadcastCount);
        assert!(parse_edit("text").is_err());
        assert!(parse_edit("colour=red").is_err());
    }

    #[test]
    fn submit_arguments_parse() {
        let cli = Cli::try_parse_from([
            "ecbe",
            "submit",
            "etws",
            "--message-id",
            "4352",
            "--set",
            "popup_on_display=false",
            "--dry-run",
            "--backend",
            "http://127.0.0.1:8080",
        ])
        .unwrap();

        assert_eq!(cli.backend.as_deref(), Some("http://127.0.0.1:8080"));
        match cli.cmd {
            Cmd::Submit { kind, message_id, edits, dry_run, .. } => {
                assert_eq!(MessageType::from(kind), MessageType::Etws);
                assert_eq!(message_id.as_deref(), Some("4352"));
                assert_eq!(edits, vec![(FormField::PopupOnDisplay, "false".to_string())]);
                assert!(dry_run);
            }
            _ => panic!("expected submit"),
        }
    }

    #[test]
    fn backend_flag_replaces_bad_file_value() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"backend_url: cbc.local:8080\n").unwrap();
        let path = file.path().to_str().unwrap();

        let cli = Cli::try_parse_from([
            "ecbe",
            "--config",
            path,
            "--backend",
            "http://127.0.0.1:8080",
            "broadcasts",
        ])
        .unwrap();

        let config = load_config(&cli).unwrap();
        assert_eq!(config.backend_url, "http://127.0.0.1:8080");
    }

    #[test]
    fn withdraw_takes_a_numeric_identifier() {
        assert!(Cli::try_parse_from(["ecbe", "withdraw", "4370"]).is_ok());
        assert!(Cli::try_parse_from(["ecbe", "withdraw", "70000"]).is_err());
    }
}
