//! Tasks on the dashboard and team-lead views.

use crm_seeker::{Classifier, Record, Schema, Value};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::{assignee_field, lenient, opt_str, Assignee, CrmRecord, EntityKind};

/// A task with a start and optional end date.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Task {
    #[serde(alias = "_id", default, deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::assignee")]
    pub assigned_to: Option<Assignee>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub end_date: Option<String>,
}

impl Task {
    pub const ID: &'static str = "id";
    pub const TITLE: &'static str = "title";
    pub const DESCRIPTION: &'static str = "description";
    pub const PRIORITY: &'static str = "priority";
    pub const STATUS: &'static str = "status";
    pub const ASSIGNEE_ID: &'static str = "assigned_to.id";
    pub const ASSIGNEE_NAME: &'static str = "assigned_to.name";
    pub const START_DATE: &'static str = "start_date";
    pub const END_DATE: &'static str = "end_date";

    pub const FIELDS: &'static [&'static str] = &[
        Self::ID,
        Self::TITLE,
        Self::DESCRIPTION,
        Self::PRIORITY,
        Self::STATUS,
        Self::ASSIGNEE_ID,
        Self::ASSIGNEE_NAME,
        Self::START_DATE,
        Self::END_DATE,
    ];
}

pub static TASK_SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::new(EntityKind::Task.as_str(), Task::START_DATE)
        .range_end(Task::END_DATE)
        .search_fields([
            Task::TITLE,
            Task::DESCRIPTION,
            Task::PRIORITY,
            Task::ASSIGNEE_NAME,
        ])
        .classifier(Classifier::Temporal)
        .owner_field(Task::ASSIGNEE_ID)
        .default_sort(Task::START_DATE)
});

impl Record for Task {
    fn field_value(&self, path: &str) -> Value<'_> {
        match path {
            Self::ID => Value::String(&self.id),
            Self::TITLE => Value::String(&self.title),
            Self::DESCRIPTION => opt_str(&self.description),
            Self::PRIORITY => opt_str(&self.priority),
            Self::STATUS => opt_str(&self.status),
            Self::START_DATE => opt_str(&self.start_date),
            Self::END_DATE => opt_str(&self.end_date),
            _ => match path.strip_prefix("assigned_to.") {
                Some(rest) => assignee_field(&self.assigned_to, rest),
                None => Value::None,
            },
        }
    }
}

impl CrmRecord for Task {
    const KIND: EntityKind = EntityKind::Task;
}
