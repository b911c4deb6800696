//! Calendar events.

use crm_seeker::{Classifier, Record, Schema, Value};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::{lenient, opt_str, CrmRecord, EntityKind};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CalendarEvent {
    #[serde(alias = "_id", default, deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub organizer_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub start: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub end: Option<String>,
}

impl CalendarEvent {
    pub const ID: &'static str = "id";
    pub const TITLE: &'static str = "title";
    pub const DESCRIPTION: &'static str = "description";
    pub const LOCATION: &'static str = "location";
    pub const ORGANIZER_ID: &'static str = "organizer_id";
    pub const START: &'static str = "start";
    pub const END: &'static str = "end";

    pub const FIELDS: &'static [&'static str] = &[
        Self::ID,
        Self::TITLE,
        Self::DESCRIPTION,
        Self::LOCATION,
        Self::ORGANIZER_ID,
        Self::START,
        Self::END,
    ];
}

pub static CALENDAR_EVENT_SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::new(EntityKind::CalendarEvent.as_str(), CalendarEvent::START)
        .range_end(CalendarEvent::END)
        .search_fields([
            CalendarEvent::TITLE,
            CalendarEvent::DESCRIPTION,
            CalendarEvent::LOCATION,
        ])
        .classifier(Classifier::Temporal)
        .owner_field(CalendarEvent::ORGANIZER_ID)
});

impl Record for CalendarEvent {
    fn field_value(&self, path: &str) -> Value<'_> {
        match path {
            Self::ID => Value::String(&self.id),
            Self::TITLE => Value::String(&self.title),
            Self::DESCRIPTION => opt_str(&self.description),
            Self::LOCATION => opt_str(&self.location),
            Self::ORGANIZER_ID => opt_str(&self.organizer_id),
            Self::START => opt_str(&self.start),
            Self::END => opt_str(&self.end),
            _ => Value::None,
        }
    }
}

impl CrmRecord for CalendarEvent {
    const KIND: EntityKind = EntityKind::CalendarEvent;
}
