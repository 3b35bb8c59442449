use sentinel_core::{
    config::AppConfig,
    filter::{Decision, MethodFilter},
};
use std::io::Read;

use super::utils::{CliError, CliResult};

/// Reads a payload from a file path, or from stdin when the path is `-`.
fn read_payload(payload: &str) -> CliResult<Vec<u8>> {
    if payload == "-" {
        let mut buffer = Vec::new();
        std::io::stdin().read_to_end(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(std::fs::read(payload)?)
    }
}

/// Classifies `body` with the filter described by `config`.
///
/// # Errors
///
/// Returns [`CliError::Config`] if the filter cannot be built, or [`CliError::Rejected`] with the
/// status and message the proxy would answer with.
pub fn classify_payload(config: &AppConfig, body: &[u8]) -> CliResult<()> {
    let filter = MethodFilter::new(&config.filter).map_err(|e| CliError::Config(e.to_string()))?;

    match filter.classify(body) {
        Decision::Allow => Ok(()),
        Decision::Reject(rejection) => {
            Err(CliError::Rejected(rejection.status_code(), rejection.to_string()))
        }
    }
}

pub fn handle_classify_command(file: &str, payload: &str) -> CliResult<()> {
    let config = AppConfig::from_file(file)?;
    let body = read_payload(payload)?;

    classify_payload(&config, &body)?;
    println!("ALLOW");
    Ok(())
}
