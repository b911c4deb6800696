//! Reminders attached to leads.

use crm_seeker::{Classifier, Record, Schema, Value};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::{lenient, opt_str, CrmRecord, EntityKind};

/// A point-in-time reminder.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Reminder {
    #[serde(alias = "_id", default, deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub note: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub lead_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub owner_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub remind_at: Option<String>,
}

impl Reminder {
    pub const ID: &'static str = "id";
    pub const TITLE: &'static str = "title";
    pub const NOTE: &'static str = "note";
    pub const LEAD_NAME: &'static str = "lead_name";
    pub const OWNER_ID: &'static str = "owner_id";
    pub const REMIND_AT: &'static str = "remind_at";

    pub const FIELDS: &'static [&'static str] = &[
        Self::ID,
        Self::TITLE,
        Self::NOTE,
        Self::LEAD_NAME,
        Self::OWNER_ID,
        Self::REMIND_AT,
    ];
}

/// Reminders have no end field; the window and the ended/upcoming split
/// both use `remind_at`.
pub static REMINDER_SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::new(EntityKind::Reminder.as_str(), Reminder::REMIND_AT)
        .search_fields([Reminder::TITLE, Reminder::NOTE, Reminder::LEAD_NAME])
        .classifier(Classifier::Temporal)
        .owner_field(Reminder::OWNER_ID)
});

impl Record for Reminder {
    fn field_value(&self, path: &str) -> Value<'_> {
        match path {
            Self::ID => Value::String(&self.id),
            Self::TITLE => Value::String(&self.title),
            Self::NOTE => opt_str(&self.note),
            Self::LEAD_NAME => opt_str(&self.lead_name),
            Self::OWNER_ID => opt_str(&self.owner_id),
            Self::REMIND_AT => opt_str(&self.remind_at),
            _ => Value::None,
        }
    }
}

impl CrmRecord for Reminder {
    const KIND: EntityKind = EntityKind::Reminder;
}
