use crate::config::{Config, DEFAULT_CONFIG_FILE};
use schemars::schema_for;

/// Print the JSON Schema of the config file
pub fn execute() -> anyhow::Result<()> {
    let mut schema = schema_for!(Config);
    let metadata = schema.schema.metadata();
    metadata.title = Some(DEFAULT_CONFIG_FILE.to_string());
    metadata.description = Some("brainstorm session configuration".to_string());

    let json = serde_json::to_string_pretty(&schema)?;
    println!("{}", json);
    Ok(())
}
