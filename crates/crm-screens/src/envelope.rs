//! Decoding of fetch response bodies.
//!
//! The CRM backend wraps collections inconsistently: most endpoints answer
//! `{ "data": [...] }`, the reporting endpoints answer `{ "details": [...] }`
//! and a few return the bare array.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::Result;

#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Data { data: Vec<T> },
    Details { details: Vec<T> },
    Bare(Vec<T>),
}

impl<T> Envelope<T> {
    fn into_records(self) -> Vec<T> {
        match self {
            Envelope::Data { data } => data,
            Envelope::Details { details } => details,
            Envelope::Bare(records) => records,
        }
    }
}

/// Decodes a fetch response body into records.
///
/// ```
/// use crm_screens::{decode_records, Task};
///
/// let tasks: Vec<Task> = decode_records(r#"{ "data": [{ "_id": "t1", "title": "Call" }] }"#).unwrap();
/// assert_eq!(tasks[0].id, "t1");
/// ```
pub fn decode_records<T: DeserializeOwned>(body: &str) -> Result<Vec<T>> {
    let envelope: Envelope<T> = serde_json::from_str(body)?;
    let records = envelope.into_records();
    tracing::debug!(count = records.len(), "decoded records");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Lead, RevenueRow, TargetRow, Task};
    use crate::error::ScreenError;

    #[test]
    fn accepts_all_three_shapes() {
        let data: Vec<Lead> = decode_records(r#"{ "data": [{ "name": "A" }] }"#).unwrap();
        let details: Vec<RevenueRow> =
            decode_records(r#"{ "details": [{ "client": "B", "amount": 10 }] }"#).unwrap();
        let bare: Vec<serde_json::Value> = decode_records(r#"[{ "x": 1 }, { "x": 2 }]"#).unwrap();

        assert_eq!(data[0].name, "A");
        assert_eq!(details[0].amount, 10.0);
        assert_eq!(bare.len(), 2);
    }

    #[test]
    fn empty_collections_decode() {
        let records: Vec<Lead> = decode_records(r#"{ "data": [] }"#).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn one_bad_field_does_not_reject_the_collection() {
        let rows: Vec<TargetRow> = decode_records(
            r#"{ "details": [
                { "member": "Ana", "target": 100, "achieved": 120 },
                { "member": "Bo", "target": null, "achieved": "n/a" }
            ] }"#,
        )
        .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].target, 0.0);
        assert_eq!(rows[1].achievement_pct(), None);

        let tasks: Vec<Task> = decode_records(r#"{ "data": [{ "_id": 17, "title": "Call" }] }"#).unwrap();
        assert_eq!(tasks[0].id, "17");
        assert_eq!(tasks[0].title, "Call");
    }

    #[test]
    fn rejects_unrecognised_bodies() {
        let err = decode_records::<Lead>(r#"{ "items": [] }"#).unwrap_err();
        assert!(matches!(err, ScreenError::Decode(_)));
        assert!(decode_records::<Lead>("not json").is_err());
    }
}
