//! Screen configuration.
//!
//! Maps screen names to the entity they list, their page size and their
//! initial sort. Configuration is read from YAML or JSON:
//!
//! ```yaml
//! screens:
//!   leads:
//!     entity: lead
//!     page_size: 25
//!     sort: { field: created_at, dir: desc }
//!   targets:
//!     entity: target_row
//! ```
//!
//! [`ScreenConfig::builtin`] carries the defaults for the stock CRM screens.

use std::collections::BTreeMap;
use std::path::Path;

use crm_seeker::{Record, SortSpec};
use serde::{Deserialize, Serialize};

use crate::entities::{
    CalendarEvent, CrmRecord, Entity, EntityKind, Lead, Reminder, RevenueRow, TargetRow, Task,
};
use crate::error::{Result, ScreenError};
use crate::screen::Screen;

/// Page size used when a screen does not set one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

/// Settings for one screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSettings {
    /// The entity the screen lists.
    pub entity: EntityKind,
    /// Records per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Initial sort. Falls back to the entity schema's default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortSpec>,
}

impl ScreenSettings {
    /// Settings with the default page size and schema sort.
    pub fn new(entity: EntityKind) -> Self {
        ScreenSettings {
            entity,
            page_size: DEFAULT_PAGE_SIZE,
            sort: None,
        }
    }

    /// Sets the page size.
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the initial sort.
    pub fn sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Returns the initial sort, resolved against the entity schema.
    pub fn effective_sort(&self) -> SortSpec {
        self.sort
            .clone()
            .unwrap_or_else(|| SortSpec::default_for(self.entity.schema()))
    }

    fn validate(&self, screen: &str) -> Result<()> {
        if self.page_size == 0 {
            return Err(ScreenError::InvalidPageSize {
                screen: screen.to_string(),
            });
        }
        if let Some(sort) = &self.sort {
            if !self.entity.has_field(&sort.field) {
                return Err(ScreenError::UnknownSortField {
                    screen: screen.to_string(),
                    field: sort.field.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Named screen settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScreenConfig {
    #[serde(default)]
    pub screens: BTreeMap<String, ScreenSettings>,
}

impl ScreenConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock CRM screens.
    pub fn builtin() -> Self {
        ScreenConfig::new()
            .screen(
                "leads",
                ScreenSettings::new(EntityKind::Lead).sort(SortSpec::desc(Lead::CREATED_AT)),
            )
            .screen(
                "calendar",
                ScreenSettings::new(EntityKind::CalendarEvent)
                    .sort(SortSpec::asc(CalendarEvent::START)),
            )
            .screen("tasks", ScreenSettings::new(EntityKind::Task))
            .screen(
                "team_lead_tasks",
                ScreenSettings::new(EntityKind::Task)
                    .page_size(20)
                    .sort(SortSpec::asc(Task::ASSIGNEE_NAME)),
            )
            .screen(
                "reminders",
                ScreenSettings::new(EntityKind::Reminder).sort(SortSpec::asc(Reminder::REMIND_AT)),
            )
            .screen(
                "revenue_report",
                ScreenSettings::new(EntityKind::RevenueRow)
                    .page_size(20)
                    .sort(SortSpec::desc(RevenueRow::DATE)),
            )
            .screen(
                "sales_targets",
                ScreenSettings::new(EntityKind::TargetRow).sort(SortSpec::asc(TargetRow::MEMBER)),
            )
    }

    /// Adds or replaces a screen.
    pub fn screen(mut self, name: impl Into<String>, settings: ScreenSettings) -> Self {
        self.screens.insert(name.into(), settings);
        self
    }

    /// Overlays `other` on top of this configuration. Screens in `other`
    /// replace same-named screens here.
    pub fn merge(mut self, other: ScreenConfig) -> Self {
        self.screens.extend(other.screens);
        self
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Parses and validates a YAML configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::Yaml`] if parsing fails, or a validation error.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: ScreenConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::Decode`] if parsing fails, or a validation error.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ScreenConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration file, picking the format from its extension
    /// (`.yaml`, `.yml` or `.json`).
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::UnsupportedFormat`] for other extensions,
    /// [`ScreenError::Io`] if the file cannot be read, or any parse or
    /// validation error.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let parse: fn(&str) -> Result<Self> = match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml,
            "json" => Self::from_json,
            _ => return Err(ScreenError::UnsupportedFormat(path.display().to_string())),
        };

        let content = std::fs::read_to_string(path)?;
        let config = parse(&content)?;
        tracing::debug!(
            path = %path.display(),
            screens = config.screens.len(),
            "loaded screen configuration"
        );
        Ok(config)
    }

    /// Checks every screen's page size and sort field.
    pub fn validate(&self) -> Result<()> {
        self.screens
            .iter()
            .try_for_each(|(name, settings)| settings.validate(name))
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Returns the settings for a screen.
    pub fn get(&self, name: &str) -> Option<&ScreenSettings> {
        self.screens.get(name)
    }

    /// Returns the configured screen names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.screens.keys().map(String::as_str)
    }

    /// Opens a typed screen.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::UnknownScreen`] for an unconfigured name and
    /// [`ScreenError::EntityMismatch`] when the screen lists a different
    /// entity than `T`.
    ///
    /// ```
    /// use crm_screens::{Lead, ScreenConfig};
    ///
    /// let screen = ScreenConfig::builtin().open::<Lead>("leads").unwrap();
    /// assert_eq!(screen.page().page_size(), 10);
    /// assert!(ScreenConfig::builtin().open::<Lead>("calendar").is_err());
    /// ```
    pub fn open<T: CrmRecord>(&self, name: &str) -> Result<Screen<T>> {
        let settings = self.lookup(name)?;
        if settings.entity != T::KIND {
            return Err(ScreenError::EntityMismatch {
                screen: name.to_string(),
                expected: T::KIND,
                actual: settings.entity,
            });
        }
        Self::build(name, settings)
    }

    /// Opens a screen over tagged [`Entity`] records.
    pub fn open_entities(&self, name: &str) -> Result<Screen<Entity>> {
        let settings = self.lookup(name)?;
        Self::build(name, settings)
    }

    /// Opens a screen over untyped JSON records.
    pub fn open_untyped(&self, name: &str) -> Result<Screen<serde_json::Value>> {
        let settings = self.lookup(name)?;
        Self::build(name, settings)
    }

    fn lookup(&self, name: &str) -> Result<&ScreenSettings> {
        self.get(name)
            .ok_or_else(|| ScreenError::UnknownScreen(name.to_string()))
    }

    fn build<T: Record>(name: &str, settings: &ScreenSettings) -> Result<Screen<T>> {
        settings.validate(name)?;
        let screen = Screen::new(name, settings.entity.schema().clone(), settings.page_size)?
            .with_default_sort(settings.effective_sort());
        Ok(screen)
    }
}
