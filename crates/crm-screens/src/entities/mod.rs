//! Typed CRM entities.
//!
//! Each entity is a plain `Deserialize` struct implementing
//! [`Record`](crm_seeker::Record) through an explicit `match` on its field
//! constants, so a renamed field shows up as a compile error at the constant
//! rather than as a silently empty search column. [`Entity`] is the tagged
//! union over all of them and [`EntityKind`] maps each to its static
//! [`Schema`].

mod event;
mod lead;
mod lenient;
mod reminder;
mod revenue;
mod target;
mod task;

use crm_seeker::{Number, Record, Schema, Value};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub use event::{CalendarEvent, CALENDAR_EVENT_SCHEMA};
pub use lead::{Lead, LEAD_SCHEMA};
pub use reminder::{Reminder, REMINDER_SCHEMA};
pub use revenue::{RevenueRow, REVENUE_SCHEMA};
pub use target::{TargetRow, TARGET_SCHEMA};
pub use task::{Task, TASK_SCHEMA};

/// Which entity a record, schema or screen deals with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Lead,
    Task,
    Reminder,
    CalendarEvent,
    RevenueRow,
    TargetRow,
}

impl EntityKind {
    /// Every entity kind.
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Lead,
        EntityKind::Task,
        EntityKind::Reminder,
        EntityKind::CalendarEvent,
        EntityKind::RevenueRow,
        EntityKind::TargetRow,
    ];

    /// Returns the static schema for this kind.
    pub fn schema(self) -> &'static Schema {
        match self {
            EntityKind::Lead => &LEAD_SCHEMA,
            EntityKind::Task => &TASK_SCHEMA,
            EntityKind::Reminder => &REMINDER_SCHEMA,
            EntityKind::CalendarEvent => &CALENDAR_EVENT_SCHEMA,
            EntityKind::RevenueRow => &REVENUE_SCHEMA,
            EntityKind::TargetRow => &TARGET_SCHEMA,
        }
    }

    /// Returns every field path this kind answers.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            EntityKind::Lead => Lead::FIELDS,
            EntityKind::Task => Task::FIELDS,
            EntityKind::Reminder => Reminder::FIELDS,
            EntityKind::CalendarEvent => CalendarEvent::FIELDS,
            EntityKind::RevenueRow => RevenueRow::FIELDS,
            EntityKind::TargetRow => TargetRow::FIELDS,
        }
    }

    /// Returns `true` if `field` is a known path on this kind.
    pub fn has_field(self, field: &str) -> bool {
        self.fields().contains(&field)
    }

    /// Returns the display name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Lead => "lead",
            EntityKind::Task => "task",
            EntityKind::Reminder => "reminder",
            EntityKind::CalendarEvent => "calendar_event",
            EntityKind::RevenueRow => "revenue_row",
            EntityKind::TargetRow => "target_row",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A typed CRM record with a fixed entity kind.
pub trait CrmRecord: Record + DeserializeOwned {
    /// The entity kind this type represents.
    const KIND: EntityKind;

    /// Returns the schema for this type.
    fn schema() -> &'static Schema {
        Self::KIND.schema()
    }
}

/// Any CRM record, tagged by `kind`.
///
/// ```
/// use crm_screens::{Entity, EntityKind};
/// use crm_seeker::{Record, Value};
///
/// let entity: Entity = serde_json::from_str(
///     r#"{ "kind": "reminder", "id": "r1", "title": "Call back", "remind_at": "2024-05-10T09:00" }"#,
/// ).unwrap();
///
/// assert_eq!(entity.kind(), EntityKind::Reminder);
/// assert_eq!(entity.field_value("title"), Value::String("Call back"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entity {
    Lead(Lead),
    Task(Task),
    Reminder(Reminder),
    CalendarEvent(CalendarEvent),
    RevenueRow(RevenueRow),
    TargetRow(TargetRow),
}

impl Entity {
    /// Returns the kind of the wrapped record.
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Lead(_) => EntityKind::Lead,
            Entity::Task(_) => EntityKind::Task,
            Entity::Reminder(_) => EntityKind::Reminder,
            Entity::CalendarEvent(_) => EntityKind::CalendarEvent,
            Entity::RevenueRow(_) => EntityKind::RevenueRow,
            Entity::TargetRow(_) => EntityKind::TargetRow,
        }
    }

    /// Returns the schema of the wrapped record.
    pub fn schema(&self) -> &'static Schema {
        self.kind().schema()
    }
}

impl Record for Entity {
    fn field_value(&self, path: &str) -> Value<'_> {
        match self {
            Entity::Lead(r) => r.field_value(path),
            Entity::Task(r) => r.field_value(path),
            Entity::Reminder(r) => r.field_value(path),
            Entity::CalendarEvent(r) => r.field_value(path),
            Entity::RevenueRow(r) => r.field_value(path),
            Entity::TargetRow(r) => r.field_value(path),
        }
    }
}

/// A person a record is assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Assignee {
    #[serde(alias = "_id", deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
}

// ============================================================================
// Field helpers
// ============================================================================

pub(crate) fn opt_str(value: &Option<String>) -> Value<'_> {
    value.as_deref().map_or(Value::None, Value::String)
}

pub(crate) fn opt_num(value: Option<f64>) -> Value<'static> {
    value.map_or(Value::None, |n| Value::Number(Number::F64(n)))
}

pub(crate) fn assignee_field<'a>(assignee: &'a Option<Assignee>, field: &str) -> Value<'a> {
    match (assignee, field) {
        (Some(a), "id") => Value::String(&a.id),
        (Some(a), "name") => Value::String(&a.name),
        _ => Value::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_schema_is_valid_and_names_known_fields() {
        for kind in EntityKind::ALL {
            let schema = kind.schema();
            assert!(schema.validate().is_ok(), "{kind}");
            assert!(kind.has_field(schema.start_field()), "{kind}");
            assert!(kind.has_field(schema.end_field()), "{kind}");
            assert!(kind.has_field(schema.default_sort_field()), "{kind}");
            for field in schema.searchable() {
                assert!(kind.has_field(field), "{kind}: {field}");
            }
            if let Some(status) = schema.status() {
                assert!(kind.has_field(status), "{kind}: {status}");
            }
            if let Some(owner) = schema.owner() {
                assert!(kind.has_field(owner), "{kind}: {owner}");
            }
        }
    }

    #[test]
    fn kind_names_round_trip_through_serde() {
        for kind in EntityKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn entity_tag_selects_variant() {
        let entity: Entity = serde_json::from_str(
            r#"{ "kind": "target_row", "member": "Ana", "target": 200, "achieved": 150 }"#,
        )
        .unwrap();
        assert_eq!(entity.kind(), EntityKind::TargetRow);
        assert_eq!(entity.schema().name(), "target_row");
        assert_eq!(
            entity.field_value(TargetRow::ACHIEVEMENT_PCT),
            Value::Number(Number::F64(75.0))
        );
    }

    #[test]
    fn assignee_accepts_mongo_id() {
        let a: Assignee = serde_json::from_str(r#"{ "_id": "u1", "name": "Dana" }"#).unwrap();
        assert_eq!(a.id, "u1");
    }
}
