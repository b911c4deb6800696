//! Leads captured by the lead forms.

use crm_seeker::{Classifier, Record, Schema, Value};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::{assignee_field, lenient, opt_num, opt_str, Assignee, CrmRecord, EntityKind};

/// A sales lead.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Lead {
    #[serde(alias = "_id", default, deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_float")]
    pub budget: Option<f64>,
    #[serde(default, deserialize_with = "lenient::assignee")]
    pub assigned_to: Option<Assignee>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub follow_up_date: Option<String>,
}

impl Lead {
    pub const ID: &'static str = "id";
    pub const NAME: &'static str = "name";
    pub const EMAIL: &'static str = "email";
    pub const PHONE: &'static str = "phone";
    pub const COMPANY: &'static str = "company";
    pub const SOURCE: &'static str = "source";
    pub const STATUS: &'static str = "status";
    pub const BUDGET: &'static str = "budget";
    pub const ASSIGNEE_ID: &'static str = "assigned_to.id";
    pub const ASSIGNEE_NAME: &'static str = "assigned_to.name";
    pub const CREATED_AT: &'static str = "created_at";
    pub const FOLLOW_UP_DATE: &'static str = "follow_up_date";

    pub const FIELDS: &'static [&'static str] = &[
        Self::ID,
        Self::NAME,
        Self::EMAIL,
        Self::PHONE,
        Self::COMPANY,
        Self::SOURCE,
        Self::STATUS,
        Self::BUDGET,
        Self::ASSIGNEE_ID,
        Self::ASSIGNEE_NAME,
        Self::CREATED_AT,
        Self::FOLLOW_UP_DATE,
    ];
}

/// Leads search by contact details, bucket by pipeline status and are
/// windowed by creation date.
pub static LEAD_SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::new(EntityKind::Lead.as_str(), Lead::CREATED_AT)
        .search_fields([
            Lead::NAME,
            Lead::EMAIL,
            Lead::PHONE,
            Lead::COMPANY,
            Lead::ASSIGNEE_NAME,
        ])
        .status_field(Lead::STATUS)
        .classifier(Classifier::Categorical)
        .owner_field(Lead::ASSIGNEE_ID)
        .default_sort(Lead::CREATED_AT)
});

impl Record for Lead {
    fn field_value(&self, path: &str) -> Value<'_> {
        match path {
            Self::ID => Value::String(&self.id),
            Self::NAME => Value::String(&self.name),
            Self::EMAIL => opt_str(&self.email),
            Self::PHONE => opt_str(&self.phone),
            Self::COMPANY => opt_str(&self.company),
            Self::SOURCE => opt_str(&self.source),
            Self::STATUS => opt_str(&self.status),
            Self::BUDGET => opt_num(self.budget),
            Self::CREATED_AT => opt_str(&self.created_at),
            Self::FOLLOW_UP_DATE => opt_str(&self.follow_up_date),
            _ => match path.strip_prefix("assigned_to.") {
                Some(rest) => assignee_field(&self.assigned_to, rest),
                None => Value::None,
            },
        }
    }
}

impl CrmRecord for Lead {
    const KIND: EntityKind = EntityKind::Lead;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_assignee_paths() {
        let lead: Lead = serde_json::from_str(
            r#"{ "_id": "l1", "name": "Acme", "assigned_to": { "id": "u9", "name": "Dana" } }"#,
        )
        .unwrap();

        assert_eq!(lead.field_value(Lead::ID), Value::String("l1"));
        assert_eq!(lead.field_value(Lead::ASSIGNEE_NAME), Value::String("Dana"));
        assert_eq!(lead.field_value(Lead::ASSIGNEE_ID), Value::String("u9"));
        assert_eq!(lead.field_value("assigned_to.email"), Value::None);
        assert_eq!(lead.field_value(Lead::EMAIL), Value::None);
    }

    #[test]
    fn unassigned_lead_has_no_assignee_values() {
        let lead = Lead::default();
        assert_eq!(lead.field_value(Lead::ASSIGNEE_NAME), Value::None);
    }
}
