//! Field deserializers that never fail.
//!
//! Fetched collections come from several backends with loose typing: ids
//! arrive as strings or numbers, amounts as numbers, numeric strings or
//! `null`. A field that does not fit its type falls back to its empty value
//! so one bad field never rejects the whole collection.

use serde::{Deserialize, Deserializer};
use serde_json::Value as Json;

use super::Assignee;

fn text(value: Json) -> Option<String> {
    match value {
        Json::String(s) => Some(s),
        Json::Number(n) => Some(n.to_string()),
        Json::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn number(value: &Json) -> Option<f64> {
    match value {
        Json::Number(n) => n.as_f64(),
        Json::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// String, number or bool as text; anything else is empty.
pub(crate) fn string<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    Ok(text(Json::deserialize(de)?).unwrap_or_default())
}

/// String, number or bool as text; anything else is `None`.
pub(crate) fn opt_string<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    Ok(text(Json::deserialize(de)?))
}

/// Number or numeric string; anything else is zero.
pub(crate) fn float<'de, D: Deserializer<'de>>(de: D) -> Result<f64, D::Error> {
    Ok(number(&Json::deserialize(de)?).unwrap_or_default())
}

/// Number or numeric string; anything else is `None`.
pub(crate) fn opt_float<'de, D: Deserializer<'de>>(de: D) -> Result<Option<f64>, D::Error> {
    Ok(number(&Json::deserialize(de)?))
}

/// An assignee object, or a bare id; anything else is `None`.
pub(crate) fn assignee<'de, D: Deserializer<'de>>(de: D) -> Result<Option<Assignee>, D::Error> {
    let value = Json::deserialize(de)?;
    Ok(match value {
        Json::Object(_) => serde_json::from_value(value).ok(),
        other => text(other).map(|id| Assignee {
            id,
            name: String::new(),
        }),
    })
}
