use clap::{Parser, Subcommand};

mod commands;
use commands::{handle_classify_command, handle_config_command, utils::print_error, ConfigCommands};

#[derive(Parser)]
#[command(name = "sentinel-cli")]
#[command(about = "Sentinel CLI - Configuration and dry-run tool for the JSON-RPC method filter")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Configuration Management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Classify a JSON-RPC payload without forwarding it
    Classify {
        /// Path to config file holding the filter settings
        #[arg(short, long, default_value = "config/config.toml")]
        file: String,

        /// Payload file, or `-` to read from stdin
        #[arg(default_value = "-")]
        payload: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Config(config_command) => handle_config_command(config_command).await,
        Commands::Classify { file, payload } => handle_classify_command(&file, &payload),
    };

    if let Err(e) = result {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
