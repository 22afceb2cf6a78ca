use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;

/// Accepts a bare array, a single object, or `{key: [...]}`; a UTF-8 BOM is ignored.
pub fn parse_records<T: DeserializeOwned>(input: &str, key: &str) -> Result<Vec<T>> {
    let trimmed = input.trim_start_matches('\u{feff}').trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let value: serde_json::Value =
        serde_json::from_str(trimmed).context("Failed to parse JSON document")?;

    let items = match value {
        serde_json::Value::Null => return Ok(Vec::new()),
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(mut object) => match object.remove(key) {
            Some(serde_json::Value::Array(items)) => items,
            Some(_) => bail!("`{}` must be an array", key),
            None => vec![serde_json::Value::Object(object)],
        },
        other => bail!("Expected a JSON array or object, found {}", other),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value(item).with_context(|| format!("Invalid record at index {}", i))
        })
        .collect()
}
