use bytes::Bytes;
use clap::Subcommand;
use sentinel_core::{config::AppConfig, upstream::UpstreamClient};
use std::path::Path;

use super::utils::{print_error, print_info, print_success, CliError, CliResult};

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Validate the current configuration
    Validate {
        /// Path to config file (defaults to config/config.toml)
        #[arg(short, long, default_value = "config/config.toml")]
        file: String,
    },

    /// Show current configuration
    Show {
        /// Path to config file (defaults to config/config.toml)
        #[arg(short, long, default_value = "config/config.toml")]
        file: String,

        /// Show sensitive values (like the API key)
        #[arg(long)]
        show_sensitive: bool,
    },

    /// Generate a sample configuration file
    Generate {
        /// Output path for the config file
        #[arg(short, long, default_value = "config/config.toml")]
        output: String,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },

    /// Send a probe request to the configured upstream
    TestUpstream {
        /// Path to config file (defaults to config/config.toml)
        #[arg(short, long, default_value = "config/config.toml")]
        file: String,
    },
}

pub async fn handle_config_command(command: ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Validate { file } => validate_config(&file),
        ConfigCommands::Show { file, show_sensitive } => show_config(&file, show_sensitive),
        ConfigCommands::Generate { output, force } => generate_config(&output, force),
        ConfigCommands::TestUpstream { file } => test_upstream(&file).await,
    }
}

const SAMPLE_CONFIG: &str = r#"# Sentinel JSON-RPC method filter configuration

environment = "development"

[server]
bind_address = "127.0.0.1"
bind_port = 3030
# max_body_bytes = 1048576

[upstream]
url = "http://127.0.0.1:8545"
timeout_seconds = 5

[filter]
# Methods rejected with 405 before reaching the upstream.
denylist = [
    "eth_sendTransaction",
    "eth_sign",
    "personal_sign",
    "personal_unlockAccount",
]
# "normalized" ignores case and surrounding whitespace; "exact" compares bytes.
match_policy = "normalized"
require_api_key = false
# api_key = "YOUR_API_KEY"

[logging]
level = "info"
format = "pretty"
"#;

fn validate_config(file: &str) -> CliResult<()> {
    if !Path::new(file).exists() {
        print_error(&format!("Configuration file not found: {file}"));
        return Err(CliError::Config(format!("File not found: {file}")));
    }

    print_info(&format!("Loading configuration from {file}..."));
    let config = AppConfig::from_file(file)?;

    print_info("Validating configuration...");
    config.validate().map_err(CliError::Config)?;

    print_success("Configuration is valid!");

    println!("Configuration Summary:");
    println!("  Server: {}:{}", config.server.bind_address, config.server.bind_port);
    println!("  Upstream: {}", config.upstream.url);
    println!(
        "  Filter: {} methods ({})",
        config.filter.denylist.len(),
        config.filter.match_policy
    );

    Ok(())
}

fn show_config(file: &str, show_sensitive: bool) -> CliResult<()> {
    let config = AppConfig::from_file(file)?;

    println!("Configuration from {file}:");

    println!("\n[Server]");
    println!("  Bind Address: {}", config.server.bind_address);
    println!("  Bind Port: {}", config.server.bind_port);
    match config.server.max_body_bytes {
        Some(limit) => println!("  Max Body Bytes: {limit}"),
        None => println!("  Max Body Bytes: unbounded"),
    }

    println!("\n[Upstream]");
    println!("  URL: {}", config.upstream.url);
    println!("  Timeout: {}s", config.upstream.timeout_seconds);

    println!("\n[Filter]");
    println!("  Match Policy: {}", config.filter.match_policy);
    println!("  Denylist ({} methods):", config.filter.denylist.len());
    for method in &config.filter.denylist {
        println!("    {method}");
    }
    println!("  Require API Key: {}", config.filter.require_api_key);
    match &config.filter.api_key {
        Some(key) if show_sensitive => println!("  API Key: {key}"),
        Some(_) => println!("  API Key: [hidden - use --show-sensitive to reveal]"),
        None => println!("  API Key: not set"),
    }

    println!("\n[Logging]");
    println!("  Level: {}", config.logging.level);
    println!("  Format: {}", config.logging.format);

    Ok(())
}

fn generate_config(output: &str, force: bool) -> CliResult<()> {
    if Path::new(output).exists() && !force {
        return Err(CliError::Config(format!(
            "File {output} already exists. Use --force to overwrite."
        )));
    }

    std::fs::write(output, SAMPLE_CONFIG)?;

    print_success(&format!("Sample configuration generated: {output}"));
    print_info("Remember to:");
    print_info("  1. Point [upstream] url at your JSON-RPC node");
    print_info("  2. Adjust the denylist for the methods you want to refuse");

    Ok(())
}

async fn test_upstream(file: &str) -> CliResult<()> {
    let config = AppConfig::from_file(file)?;
    let client = UpstreamClient::new(&config.upstream)?;

    print_info(&format!("Testing upstream {}...", client.url()));

    let probe = serde_json::json!({
        "jsonrpc": "2.0",
        "method": "web3_clientVersion",
        "params": [],
        "id": 1
    });

    let start = std::time::Instant::now();
    let response = client.forward(Bytes::from(probe.to_string()), Some("application/json")).await?;
    let elapsed = start.elapsed();

    if (200..300).contains(&response.status) {
        print_success(&format!("Upstream responded ({:.0}ms)", elapsed.as_millis()));
        Ok(())
    } else {
        print_error(&format!("Upstream answered HTTP {}", response.status));
        Err(CliError::Network(format!("unexpected status {}", response.status)))
    }
}
