mod recovery;
mod serve;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// ActivateFlow funnel analytics toolchain.
#[derive(Parser)]
#[command(name = "activateflow", version, about = "ActivateFlow funnel analytics service")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the ActivateFlow HTTP API server
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "8080")]
        port: u16,

        /// Keep snapshots in memory instead of on disk
        #[arg(long)]
        memory: bool,

        /// Path to a PEM TLS certificate (requires the `tls` build feature)
        #[arg(long, requires = "tls_key")]
        tls_cert: Option<PathBuf>,

        /// Path to a PEM TLS private key (requires the `tls` build feature)
        #[arg(long, requires = "tls_cert")]
        tls_key: Option<PathBuf>,
    },

    /// Estimate recovered users and revenue for a hypothetical stage lift
    Recovery {
        /// Users currently stalled at the stage
        #[arg(long)]
        current_users: u64,

        /// Expected lift in percent
        #[arg(long)]
        lift_percent: f64,

        /// Revenue per activated user
        #[arg(long)]
        revenue: f64,

        /// Label for the modeled action
        #[arg(long, default_value = "manual estimate")]
        action_name: String,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            port,
            memory,
            tls_cert,
            tls_key,
        } => {
            let rt = tokio::runtime::Runtime::new().expect("failed to create tokio runtime");
            if let Err(e) = rt.block_on(serve::start_server(port, memory, tls_cert, tls_key)) {
                eprintln!("Server error: {}", e);
                process::exit(1);
            }
        }

        Commands::Recovery {
            current_users,
            lift_percent,
            revenue,
            action_name,
        } => {
            recovery::run(current_users, lift_percent, revenue, &action_name, cli.output);
        }
    }
}
