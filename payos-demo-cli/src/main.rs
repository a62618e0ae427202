//! payOS Demo CLI
//!
//! Command-line interface for trying the payOS SDK against a merchant channel.
//! Credentials come from `PAYOS_CLIENT_ID`, `PAYOS_API_KEY` and
//! `PAYOS_CHECKSUM_KEY`.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

mod commands;
mod ui;

#[derive(Parser)]
#[command(name = "payos-demo")]
#[command(about = "payOS Demo CLI - Create payment links and verify webhooks", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a payment link
    Create(CreateOpts),

    /// Show a payment link by id or order code
    Get {
        /// Payment link id or numeric order code
        reference: String,
    },

    /// Cancel a payment link
    Cancel {
        /// Payment link id or numeric order code
        reference: String,

        /// Reason shown to the buyer
        #[arg(short, long)]
        reason: Option<String>,
    },

    /// List the e-invoices of a payment link
    Invoices {
        /// Payment link id or numeric order code
        reference: String,

        /// Download every issued invoice into this directory
        #[arg(short = 'o', long)]
        download: Option<PathBuf>,
    },

    /// Register the channel's webhook URL
    ConfirmWebhook {
        /// Publicly reachable webhook endpoint
        url: String,
    },

    /// Verify a webhook body saved to a file
    VerifyWebhook {
        /// File holding the raw JSON body
        file: PathBuf,
    },

    /// Create a payment link through the deprecated API
    LegacyCreate(CreateOpts),
}

#[derive(Args)]
struct CreateOpts {
    /// Amount in VND
    #[arg(short, long)]
    amount: i64,

    /// Description shown on the transfer (max 25 characters for most banks)
    #[arg(short, long, default_value = "payOS demo")]
    description: String,

    /// Order code (defaults to a time-based value)
    #[arg(long)]
    order_code: Option<i64>,

    /// Single line item name
    #[arg(long)]
    item: Option<String>,

    /// Redirect after payment
    #[arg(long, default_value = "http://localhost:3000/success")]
    return_url: String,

    /// Redirect after cancellation
    #[arg(long, default_value = "http://localhost:3000/cancel")]
    cancel_url: String,

    /// Expire the link after this many minutes
    #[arg(long)]
    expires_in: Option<i64>,
}

impl From<CreateOpts> for commands::payments::CreateArgs {
    fn from(opts: CreateOpts) -> Self {
        Self {
            amount: opts.amount,
            description: opts.description,
            order_code: opts.order_code,
            item: opts.item,
            return_url: opts.return_url,
            cancel_url: opts.cancel_url,
            expires_in_minutes: opts.expires_in,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("payos_demo_cli=debug,payos_lib=debug,payos=warn")
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("payos_demo_cli=info,payos_lib=warn,payos=warn")
            .init();
    }

    // Dispatch commands
    let result = match cli.command {
        Commands::Create(opts) => commands::payments::create(opts.into(), cli.verbose).await,
        Commands::Get { reference } => commands::payments::get(&reference, cli.verbose).await,
        Commands::Cancel { reference, reason } => {
            commands::payments::cancel(&reference, reason.as_deref(), cli.verbose).await
        }
        Commands::Invoices {
            reference,
            download,
        } => commands::invoices::list(&reference, download.as_deref(), cli.verbose).await,
        Commands::ConfirmWebhook { url } => commands::webhooks::confirm(&url, cli.verbose).await,
        Commands::VerifyWebhook { file } => commands::webhooks::verify(&file, cli.verbose),
        Commands::LegacyCreate(opts) => commands::legacy::create(opts.into(), cli.verbose).await,
    };

    if let Err(e) = &result {
        tracing::debug!(error = ?e, "command failed");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_create() {
        let cli = Cli::try_parse_from([
            "payos-demo",
            "create",
            "--amount",
            "2000",
            "--item",
            "Coffee",
            "--expires-in",
            "15",
        ])
        .unwrap();
        match cli.command {
            Commands::Create(opts) => {
                assert_eq!(opts.amount, 2000);
                assert_eq!(opts.item.as_deref(), Some("Coffee"));
                assert_eq!(opts.expires_in, Some(15));
                assert_eq!(opts.description, "payOS demo");
            }
            _ => panic!("expected create"),
        }
    }

    #[test]
    fn test_parse_cancel_with_global_verbose() {
        let cli = Cli::try_parse_from(["payos-demo", "cancel", "12345", "-r", "Out of stock", "-v"])
            .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Cancel { reference, reason } => {
                assert_eq!(reference, "12345");
                assert_eq!(reason.as_deref(), Some("Out of stock"));
            }
            _ => panic!("expected cancel"),
        }
    }

    #[test]
    fn test_parse_verify_webhook() {
        let cli = Cli::try_parse_from(["payos-demo", "verify-webhook", "body.json"]).unwrap();
        assert!(matches!(cli.command, Commands::VerifyWebhook { ref file } if file == &PathBuf::from("body.json")));
    }

    #[test]
    fn test_parse_invoices_download() {
        let cli = Cli::try_parse_from(["payos-demo", "invoices", "12345", "--download", "out"])
            .unwrap();
        match cli.command {
            Commands::Invoices {
                reference,
                download,
            } => {
                assert_eq!(reference, "12345");
                assert_eq!(download, Some(PathBuf::from("out")));
            }
            _ => panic!("expected invoices"),
        }
    }

    #[test]
    fn test_amount_is_required() {
        assert!(Cli::try_parse_from(["payos-demo", "legacy-create"]).is_err());
    }
}
