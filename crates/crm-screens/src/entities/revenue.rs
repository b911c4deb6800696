//! Revenue report rows.

use crm_seeker::{Number, Record, Schema, Value};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::{lenient, opt_str, CrmRecord, EntityKind};

/// One closed sale in the revenue report.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RevenueRow {
    #[serde(alias = "_id", default, deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub client: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub product: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub sales_person: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub sales_person_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::float")]
    pub amount: f64,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub date: Option<String>,
}

impl RevenueRow {
    pub const ID: &'static str = "id";
    pub const CLIENT: &'static str = "client";
    pub const PRODUCT: &'static str = "product";
    pub const SALES_PERSON: &'static str = "sales_person";
    pub const SALES_PERSON_ID: &'static str = "sales_person_id";
    pub const AMOUNT: &'static str = "amount";
    pub const DATE: &'static str = "date";

    pub const FIELDS: &'static [&'static str] = &[
        Self::ID,
        Self::CLIENT,
        Self::PRODUCT,
        Self::SALES_PERSON,
        Self::SALES_PERSON_ID,
        Self::AMOUNT,
        Self::DATE,
    ];
}

pub static REVENUE_SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::new(EntityKind::RevenueRow.as_str(), RevenueRow::DATE)
        .search_fields([
            RevenueRow::CLIENT,
            RevenueRow::PRODUCT,
            RevenueRow::SALES_PERSON,
        ])
        .owner_field(RevenueRow::SALES_PERSON_ID)
});

impl Record for RevenueRow {
    fn field_value(&self, path: &str) -> Value<'_> {
        match path {
            Self::ID => Value::String(&self.id),
            Self::CLIENT => Value::String(&self.client),
            Self::PRODUCT => opt_str(&self.product),
            Self::SALES_PERSON => opt_str(&self.sales_person),
            Self::SALES_PERSON_ID => opt_str(&self.sales_person_id),
            Self::AMOUNT => Value::Number(Number::F64(self.amount)),
            Self::DATE => opt_str(&self.date),
            _ => Value::None,
        }
    }
}

impl CrmRecord for RevenueRow {
    const KIND: EntityKind = EntityKind::RevenueRow;
}
