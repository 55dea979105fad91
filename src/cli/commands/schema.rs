use crate::{
    cli::{CliError, CommandResult},
    config::Config,
};

/// Prints the JSON schema of the config file, for editor completion.
pub(crate) fn execute() -> CommandResult {
    let schema = schemars::schema_for!(Config);
    serde_json::to_string_pretty(&schema).map_err(|e| CliError::ServiceError(e.to_string()))
}
