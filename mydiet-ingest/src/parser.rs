//! Parse the extraction model's response into a `RawDietRecord`.
//!
//! Accepted top-level shapes:
//!   {"piano_settimanale": [...], "tabella_sostituzioni": [...]}   current schema
//!   [{"giorno": ..., "pasti": [...]}, ...]                          legacy plan-only schema
//!   null                                                            no record
//!
//! The response may arrive wrapped in a ```json fence, possibly with some
//! prose around it.

use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::types::{RawDay, RawDietRecord};

/// Pull the JSON body out of a model reply.
///
/// The reply may be bare JSON, or carry a markdown code fence anywhere in it
/// ("Ecco il JSON:\n```json\n{...}\n```"), with or without a newline after
/// the info string. Text around the fence is dropped.
pub fn extract_json_block(text: &str) -> &str {
    let t = text.trim();
    if t.starts_with(['{', '[']) {
        return t;
    }
    let Some(open) = t.find("```") else {
        return t;
    };
    let rest = &t[open + 3..];

    // Skip an info string such as "json", unless what follows is the body itself
    let info_len = rest
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(rest.len());
    let after_info = &rest[info_len..];
    let body = if after_info.starts_with(|c: char| c.is_whitespace() || c == '{' || c == '[') {
        after_info
    } else {
        rest
    };

    match body.find("```") {
        Some(close) => body[..close].trim(),
        None => body.trim(),
    }
}

/// Convert an already-parsed JSON value. `None` means "no record".
pub fn parse_raw_value(value: Value) -> Result<Option<RawDietRecord>> {
    match value {
        Value::Null => Ok(None),
        Value::Object(_) => {
            let rec: RawDietRecord =
                serde_json::from_value(value).context("decoding diet record")?;
            debug!(
                days = rec.weekly_plan.len(),
                groups = rec.substitution_table.len(),
                "decoded diet record"
            );
            Ok(Some(rec))
        }
        Value::Array(_) => {
            let wrapped = serde_json::json!({ "piano_settimanale": value });
            let rec: RawDietRecord =
                serde_json::from_value(wrapped).context("decoding legacy plan list")?;
            debug!(days = rec.weekly_plan.len(), "decoded legacy plan-only record");
            Ok(Some(rec))
        }
        other => bail!("expected a JSON object or list at top level, got {}", kind_of(&other)),
    }
}

/// Parse model response text.
pub fn parse_raw_str(text: &str) -> Result<Option<RawDietRecord>> {
    let body = extract_json_block(text);
    if body.is_empty() {
        return Ok(None);
    }
    let value: Value = serde_json::from_str(body).context("model response is not valid JSON")?;
    parse_raw_value(value)
}

/// Parse a model response saved to disk.
pub fn parse_raw_file(path: impl AsRef<Path>) -> Result<Option<RawDietRecord>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_raw_str(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Days only, for callers holding just the legacy plan list.
pub fn parse_days(text: &str) -> Result<Vec<RawDay>> {
    Ok(parse_raw_str(text)?.map(|rec| rec.weekly_plan).unwrap_or_default())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
