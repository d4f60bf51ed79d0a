use serde_json::Value;

/// Parse a JSON value given on the command line.
pub fn parse_json(raw: &str, field: &str) -> anyhow::Result<Value> {
    serde_json::from_str(raw).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}
