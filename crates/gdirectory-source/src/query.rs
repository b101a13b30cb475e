//! Turns typed request parameters into query pairs.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::{SourceError, SourceResult};

/// Name of the query parameter carrying the bearer token.
pub const ACCESS_TOKEN_PARAM: &str = "access_token";

/// Builds the query for one request: `access_token` first, then every set
/// parameter in key order.
///
/// `params` must serialize to a flat JSON object (or unit for requests
/// without filters). Strings are sent as-is, booleans and numbers in their
/// JSON spelling, nulls are dropped.
pub fn query_pairs<P>(access_token: &str, params: &P) -> SourceResult<Vec<(String, String)>>
where
    P: Serialize + ?Sized,
{
    let value = serde_json::to_value(params).map_err(|e| {
        SourceError::invalid_params(format!("failed to serialize parameters: {}", e))
            .with_source(e)
    })?;

    let fields: BTreeMap<String, Value> = match value {
        Value::Null => BTreeMap::new(),
        Value::Object(map) => map.into_iter().collect(),
        other => {
            return Err(SourceError::invalid_params(format!(
                "parameters must serialize to an object, got {}",
                other
            )));
        }
    };

    let mut pairs = Vec::with_capacity(fields.len() + 1);
    pairs.push((ACCESS_TOKEN_PARAM.to_string(), access_token.to_string()));

    for (key, value) in fields {
        let value = match value {
            Value::Null => continue,
            Value::String(s) => s,
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::Array(_) | Value::Object(_) => {
                return Err(SourceError::invalid_params(format!(
                    "parameter '{}' is not a scalar",
                    key
                )));
            }
        };
        pairs.push((key, value));
    }

    Ok(pairs)
}
