//! Schema descriptors.
//!
//! A [`Schema`] is the static, per-entity declaration of which fields the
//! engine may touch: free-text search fields, the date range used by the
//! window filter, the status field feeding the classifier, an optional owner
//! field, and the default sort key. One engine, many schemas.

use crate::error::{Result, SeekerError};

/// Which bucketing policy the status filter applies to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Classifier {
    /// No classification; only `BucketFilter::All` makes sense.
    #[default]
    None,
    /// Ended vs upcoming, comparing the range end (or start) with "now".
    Temporal,
    /// Over / partial / under achievement from a percentage status field.
    Achievement,
    /// The status field's own value, case-folded.
    Categorical,
}

impl Classifier {
    /// Returns the display name of this classifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Classifier::None => "none",
            Classifier::Temporal => "temporal",
            Classifier::Achievement => "achievement",
            Classifier::Categorical => "categorical",
        }
    }

    /// Returns `true` if the classifier reads `status_field`.
    pub fn needs_status_field(self) -> bool {
        matches!(self, Classifier::Achievement | Classifier::Categorical)
    }
}

impl std::fmt::Display for Classifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-entity declaration of the fields the pipeline reads.
///
/// ```
/// use crm_seeker::{Classifier, Schema};
///
/// let tasks = Schema::new("task", "start")
///     .search_fields(["title", "description"])
///     .range_end("end")
///     .classifier(Classifier::Temporal)
///     .default_sort("start");
///
/// assert_eq!(tasks.end_field(), "end");
/// assert!(tasks.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    name: String,
    search_fields: Vec<String>,
    range_start_field: String,
    range_end_field: Option<String>,
    status_field: Option<String>,
    classifier: Classifier,
    owner_field: Option<String>,
    default_sort_field: String,
}

impl Schema {
    /// Creates a schema whose date range starts at `range_start`.
    ///
    /// The default sort field starts out as the range start.
    pub fn new(name: impl Into<String>, range_start: impl Into<String>) -> Self {
        let range_start_field = range_start.into();
        Schema {
            name: name.into(),
            search_fields: Vec::new(),
            default_sort_field: range_start_field.clone(),
            range_start_field,
            range_end_field: None,
            status_field: None,
            classifier: Classifier::None,
            owner_field: None,
        }
    }

    /// Sets the free-text search fields.
    pub fn search_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the field marking the end of the record's date range.
    pub fn range_end(mut self, field: impl Into<String>) -> Self {
        self.range_end_field = Some(field.into());
        self
    }

    /// Sets the field read by threshold and categorical classifiers.
    pub fn status_field(mut self, field: impl Into<String>) -> Self {
        self.status_field = Some(field.into());
        self
    }

    /// Sets the classification policy.
    pub fn classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Sets the field compared against `FilterSpec::owner_id`.
    pub fn owner_field(mut self, field: impl Into<String>) -> Self {
        self.owner_field = Some(field.into());
        self
    }

    /// Sets the default sort key.
    pub fn default_sort(mut self, field: impl Into<String>) -> Self {
        self.default_sort_field = field.into();
        self
    }

    /// Checks the declaration for fields the pipeline cannot work without.
    pub fn validate(&self) -> Result<()> {
        let empty = |role: &'static str| SeekerError::EmptyField {
            schema: self.name.clone(),
            role,
        };

        if self.range_start_field.trim().is_empty() {
            return Err(empty("range start"));
        }
        if self.default_sort_field.trim().is_empty() {
            return Err(empty("default sort"));
        }
        if self.search_fields.iter().any(|f| f.trim().is_empty()) {
            return Err(empty("search"));
        }
        if self.classifier.needs_status_field()
            && self
                .status_field
                .as_deref()
                .map_or(true, |f| f.trim().is_empty())
        {
            return Err(SeekerError::MissingStatusField {
                schema: self.name.clone(),
                classifier: self.classifier.as_str(),
            });
        }
        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Returns the entity name this schema describes.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the free-text search fields.
    pub fn searchable(&self) -> &[String] {
        &self.search_fields
    }

    /// Returns the range start field.
    pub fn start_field(&self) -> &str {
        &self.range_start_field
    }

    /// Returns the declared range end field, if any.
    pub fn declared_end_field(&self) -> Option<&str> {
        self.range_end_field.as_deref()
    }

    /// Returns the range end field, falling back to the start field.
    pub fn end_field(&self) -> &str {
        self.range_end_field
            .as_deref()
            .unwrap_or(&self.range_start_field)
    }

    /// Returns the status field, if any.
    pub fn status(&self) -> Option<&str> {
        self.status_field.as_deref()
    }

    /// Returns the classification policy.
    pub fn classification(&self) -> Classifier {
        self.classifier
    }

    /// Returns the owner field, if any.
    pub fn owner(&self) -> Option<&str> {
        self.owner_field.as_deref()
    }

    /// Returns the default sort key.
    pub fn default_sort_field(&self) -> &str {
        &self.default_sort_field
    }

    /// Returns `true` if `field` is the range start or range end field.
    pub fn is_range_field(&self, field: &str) -> bool {
        field == self.range_start_field || self.range_end_field.as_deref() == Some(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_field_falls_back_to_start() {
        let schema = Schema::new("reminder", "remind_at");
        assert_eq!(schema.end_field(), "remind_at");
        assert_eq!(schema.declared_end_field(), None);

        let schema = schema.range_end("snooze_until");
        assert_eq!(schema.end_field(), "snooze_until");
    }

    #[test]
    fn default_sort_starts_as_range_start() {
        let schema = Schema::new("event", "start");
        assert_eq!(schema.default_sort_field(), "start");
        assert_eq!(schema.default_sort("title").default_sort_field(), "title");
    }

    #[test]
    fn range_field_detection() {
        let schema = Schema::new("task", "start").range_end("end");
        assert!(schema.is_range_field("start"));
        assert!(schema.is_range_field("end"));
        assert!(!schema.is_range_field("title"));
    }

    #[test]
    fn validate_rejects_empty_fields() {
        assert_eq!(
            Schema::new("lead", " ").validate(),
            Err(SeekerError::EmptyField {
                schema: "lead".into(),
                role: "range start"
            })
        );
        assert!(matches!(
            Schema::new("lead", "created_at")
                .search_fields(["name", ""])
                .validate(),
            Err(SeekerError::EmptyField { role: "search", .. })
        ));
    }

    #[test]
    fn validate_requires_status_field_for_thresholds() {
        let schema = Schema::new("target", "period_start").classifier(Classifier::Achievement);
        assert_eq!(
            schema.validate(),
            Err(SeekerError::MissingStatusField {
                schema: "target".into(),
                classifier: "achievement"
            })
        );

        let schema = schema.status_field("achievement_pct");
        assert!(schema.validate().is_ok());

        // Temporal works off the range fields alone
        assert!(Schema::new("task", "start")
            .classifier(Classifier::Temporal)
            .validate()
            .is_ok());
    }
}
