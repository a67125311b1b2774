//! Custom property parsing (`--cp KEY=VALUE,...`)

use std::collections::BTreeMap;

use crate::error::UsageError;

/// Parse `KEY=VALUE` items into a property map.
///
/// Items split on the first `=`, so values may contain `=`. Keys are trimmed
/// and must not be empty; later duplicates win.
pub fn parse_properties<S: AsRef<str>>(
    items: &[S],
) -> Result<BTreeMap<String, String>, UsageError> {
    let mut properties = BTreeMap::new();
    for item in items {
        let item = item.as_ref();
        if item.trim().is_empty() {
            continue;
        }
        let (key, value) = item
            .split_once('=')
            .ok_or_else(|| UsageError::InvalidProperty(item.to_string()))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(UsageError::InvalidProperty(item.to_string()));
        }
        properties.insert(key.to_string(), value.to_string());
    }
    Ok(properties)
}
