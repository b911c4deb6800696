//! Sales-target rows and achievement.

use crm_seeker::{Classifier, Number, Record, Schema, Value};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::{lenient, opt_str, CrmRecord, EntityKind};

/// A team member's quota for a period.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TargetRow {
    #[serde(alias = "_id", default, deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub member: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub member_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub team: Option<String>,
    #[serde(default, deserialize_with = "lenient::float")]
    pub target: f64,
    #[serde(default, deserialize_with = "lenient::float")]
    pub achieved: f64,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub period_start: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub period_end: Option<String>,
}

impl TargetRow {
    pub const ID: &'static str = "id";
    pub const MEMBER: &'static str = "member";
    pub const MEMBER_ID: &'static str = "member_id";
    pub const TEAM: &'static str = "team";
    pub const TARGET: &'static str = "target";
    pub const ACHIEVED: &'static str = "achieved";
    /// Computed: `achieved / target * 100`.
    pub const ACHIEVEMENT_PCT: &'static str = "achievement_pct";
    pub const PERIOD_START: &'static str = "period_start";
    pub const PERIOD_END: &'static str = "period_end";

    pub const FIELDS: &'static [&'static str] = &[
        Self::ID,
        Self::MEMBER,
        Self::MEMBER_ID,
        Self::TEAM,
        Self::TARGET,
        Self::ACHIEVED,
        Self::ACHIEVEMENT_PCT,
        Self::PERIOD_START,
        Self::PERIOD_END,
    ];

    /// Achieved amount as a percentage of the target.
    ///
    /// `None` for a zero or non-finite target.
    pub fn achievement_pct(&self) -> Option<f64> {
        if self.target == 0.0 || !self.target.is_finite() {
            return None;
        }
        Some(self.achieved / self.target * 100.0)
    }
}

pub static TARGET_SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::new(EntityKind::TargetRow.as_str(), TargetRow::PERIOD_START)
        .range_end(TargetRow::PERIOD_END)
        .search_fields([TargetRow::MEMBER, TargetRow::TEAM])
        .status_field(TargetRow::ACHIEVEMENT_PCT)
        .classifier(Classifier::Achievement)
        .owner_field(TargetRow::MEMBER_ID)
        .default_sort(TargetRow::MEMBER)
});

impl Record for TargetRow {
    fn field_value(&self, path: &str) -> Value<'_> {
        match path {
            Self::ID => Value::String(&self.id),
            Self::MEMBER => Value::String(&self.member),
            Self::MEMBER_ID => opt_str(&self.member_id),
            Self::TEAM => opt_str(&self.team),
            Self::TARGET => Value::Number(Number::F64(self.target)),
            Self::ACHIEVED => Value::Number(Number::F64(self.achieved)),
            Self::ACHIEVEMENT_PCT => self
                .achievement_pct()
                .map_or(Value::None, |p| Value::Number(Number::F64(p))),
            Self::PERIOD_START => opt_str(&self.period_start),
            Self::PERIOD_END => opt_str(&self.period_end),
            _ => Value::None,
        }
    }
}

impl CrmRecord for TargetRow {
    const KIND: EntityKind = EntityKind::TargetRow;
}
