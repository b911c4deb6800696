//! The [`Record`] trait: how the engine reads fields out of a record.

use crate::value::{Number, Value};

/// Trait for types the query pipeline can read.
///
/// The engine never assumes more about a record than what a
/// [`Schema`](crate::Schema) declares, so a record only has to answer
/// "what is the value at this field path". Paths are dot-separated for
/// nested data (`"assigned_to.name"`). Unknown or missing paths must return
/// [`Value::None`], never panic.
///
/// # Manual Implementation
///
/// ```
/// use crm_seeker::{Record, Value, Number};
///
/// struct Reminder {
///     title: String,
///     remind_at: String,
/// }
///
/// impl Record for Reminder {
///     fn field_value(&self, path: &str) -> Value<'_> {
///         match path {
///             "title" => Value::String(&self.title),
///             "remind_at" => Value::String(&self.remind_at),
///             _ => Value::None,
///         }
///     }
/// }
/// ```
///
/// Untyped JSON works out of the box:
///
/// ```
/// use crm_seeker::{Record, Value};
///
/// let lead = serde_json::json!({ "owner": { "name": "Dana" } });
/// assert_eq!(lead.field_value("owner.name"), Value::String("Dana"));
/// assert_eq!(lead.field_value("owner.email"), Value::None);
/// ```
pub trait Record {
    /// Returns the value at `path`, or [`Value::None`] if it is absent.
    fn field_value(&self, path: &str) -> Value<'_>;
}

impl<T: Record + ?Sized> Record for &T {
    fn field_value(&self, path: &str) -> Value<'_> {
        (**self).field_value(path)
    }
}

impl Record for serde_json::Value {
    fn field_value(&self, path: &str) -> Value<'_> {
        let mut current = self;
        for segment in path.split('.') {
            let next = match current {
                serde_json::Value::Object(map) => map.get(segment),
                serde_json::Value::Array(items) => {
                    segment.parse::<usize>().ok().and_then(|i| items.get(i))
                }
                _ => None,
            };
            match next {
                Some(value) => current = value,
                None => return Value::None,
            }
        }
        json_leaf(current)
    }
}

fn json_leaf(value: &serde_json::Value) -> Value<'_> {
    match value {
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(Number::I64(i))
            } else if let Some(u) = n.as_u64() {
                Value::Number(Number::U64(u))
            } else {
                n.as_f64()
                    .map(|f| Value::Number(Number::F64(f)))
                    .unwrap_or(Value::None)
            }
        }
        serde_json::Value::Null | serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
            Value::None
        }
    }
}
