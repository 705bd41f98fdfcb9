//! fieldwire - PDU codec tool
//!
//! Encodes requests from YAML or flags, and decodes request and reply PDUs.

mod config;

use clap::{Args, Parser, Subcommand};
use config::{Config, ConfigError};
use fieldwire_protocol::{Request, WriteFifo8Request};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fieldwire")]
#[command(about = "Encode and decode fieldbus request/response PDUs")]
#[command(version)]
struct Cli {
    /// Path to YAML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode the request and print its PDU as hex
    Encode(RequestArgs),

    /// Decode a request PDU and print its parameters as JSON
    ParseRequest {
        /// Request PDU in hex
        pdu: String,
    },

    /// Dispatch a reply PDU against the request and print the result as JSON
    ParseReply {
        #[command(flatten)]
        request: RequestArgs,

        /// Reply PDU in hex
        pdu: String,
    },
}

/// Write FIFO 8 parameters given on the command line; override the config file.
#[derive(Args)]
struct RequestArgs {
    /// FIFO id (0-255)
    #[arg(long, requires = "values")]
    id: Option<i64>,

    /// Values to write, in hex
    #[arg(long, requires = "id")]
    values: Option<String>,
}

impl RequestArgs {
    fn resolve(&self, config: &Config) -> Result<WriteFifo8Request, Box<dyn std::error::Error>> {
        match (self.id, &self.values) {
            (Some(id), Some(values)) => Ok(WriteFifo8Request::new(id, parse_hex(values)?)?),
            _ => Ok(config.build_request()?),
        }
    }
}

/// Parses hex with optional `0x` prefix and embedded whitespace.
fn parse_hex(input: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let digits: String = digits.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(digits)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), serde_json::Error> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Failed to load config: {}", e);
            return Err(e.into());
        }
    };
    if cli.pretty {
        config.output.pretty = true;
    }

    match cli.command {
        Commands::Encode(args) => {
            let request = args.resolve(&config)?;
            tracing::info!("{}", request);
            println!("{}", hex::encode(request.to_buffer()));
        }
        Commands::ParseRequest { pdu } => {
            let frame = parse_hex(&pdu)?;
            let request = WriteFifo8Request::from_buffer(&frame)?;
            tracing::info!("{}", request);
            print_json(&request.to_options(), config.output.pretty)?;
        }
        Commands::ParseReply { request, pdu } => {
            let request = request.resolve(&config)?;
            let frame = parse_hex(&pdu)?;
            let reply = request.create_response(&frame)?;
            if let Some(exc) = reply.exception() {
                tracing::warn!("{}", exc);
            }
            print_json(&reply, config.output.pretty)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("47120200 02").unwrap(), vec![0x47, 0x12, 0x02, 0x00, 0x02]);
        assert_eq!(parse_hex("0xC702").unwrap(), vec![0xC7, 0x02]);
        assert_eq!(parse_hex("  0Xc7 02 ").unwrap(), vec![0xC7, 0x02]);
        assert!(parse_hex("47 1").is_err());
        assert!(parse_hex("zz").is_err());
    }

    #[test]
    fn test_request_args_override_config() {
        let args = RequestArgs {
            id: Some(0x12),
            values: Some("0002".to_string()),
        };
        let request = args.resolve(&Config::default()).unwrap();
        assert_eq!(
            request.to_buffer().as_ref(),
            &[0x47, 0x12, 0x02, 0x00, 0x02]
        );
    }

    #[test]
    fn test_request_args_fall_back_to_config() {
        let args = RequestArgs {
            id: None,
            values: None,
        };
        let err = args.resolve(&Config::default()).unwrap_err();
        assert!(err.downcast_ref::<ConfigError>().is_some());
    }

    #[test]
    fn test_request_args_validate() {
        let args = RequestArgs {
            id: Some(300),
            values: Some("00".to_string()),
        };
        let err = args.resolve(&Config::default()).unwrap_err();
        assert!(err
            .downcast_ref::<fieldwire_protocol::ProtocolError>()
            .is_some_and(|e| e.is_validation()));
    }

    #[test]
    fn test_parse_reply_cli() {
        let cli = Cli::try_parse_from([
            "fieldwire",
            "parse-reply",
            "--id",
            "1",
            "--values",
            "0001",
            "c702",
        ])
        .unwrap();

        match cli.command {
            Commands::ParseReply { request, pdu } => {
                let request = request.resolve(&Config::default()).unwrap();
                let reply = request.create_response(&parse_hex(&pdu).unwrap()).unwrap();
                assert_eq!(reply.exception().unwrap().exception_code(), 2);
            }
            _ => panic!("expected parse-reply"),
        }
    }
}
