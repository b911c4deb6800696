//! crm-screens - typed CRM entities and list-screen state.
//!
//! Builds on [`crm_seeker`] with the concrete records the CRM front end
//! fetches and the state each list screen keeps between renders:
//!
//! - [`Lead`], [`Task`], [`Reminder`], [`CalendarEvent`], [`RevenueRow`],
//!   [`TargetRow`]: typed records with static schemas
//! - [`decode_records`]: unwraps `{ data }`, `{ details }` or bare-array
//!   fetch responses
//! - [`Screen`]: search, window, bucket, sort and page state over one
//!   collection
//! - [`ScreenConfig`]: named screen settings from YAML or JSON
//!
//! # Example
//!
//! ```rust
//! use chrono::DateTime;
//! use crm_screens::{Bucket, ScreenConfig, Task};
//!
//! let now = DateTime::parse_from_rfc3339("2024-06-02T00:00:00Z").unwrap();
//! let mut tasks = ScreenConfig::builtin().open::<Task>("tasks").unwrap();
//!
//! tasks
//!     .refresh_from_json(
//!         r#"{ "data": [
//!             { "_id": "1", "title": "Send quote", "start_date": "2024-06-01", "end_date": "2024-06-01" },
//!             { "_id": "2", "title": "Demo", "start_date": "2024-06-05" }
//!         ] }"#,
//!         &now,
//!     )
//!     .unwrap();
//!
//! tasks.set_bucket(Bucket::Upcoming);
//! let view = tasks.view(&now);
//! assert_eq!(view.total_count, 1);
//! assert_eq!(view.slice[0].title, "Demo");
//! ```

mod config;
mod entities;
mod envelope;
mod error;
mod screen;

pub use config::{ScreenConfig, ScreenSettings, DEFAULT_PAGE_SIZE};
pub use entities::{
    Assignee, CalendarEvent, CrmRecord, Entity, EntityKind, Lead, Reminder, RevenueRow,
    TargetRow, Task, CALENDAR_EVENT_SCHEMA, LEAD_SCHEMA, REMINDER_SCHEMA, REVENUE_SCHEMA,
    TARGET_SCHEMA, TASK_SCHEMA,
};
pub use envelope::decode_records;
pub use error::{Result, ScreenError};
pub use screen::Screen;

// Re-export the engine types screens are driven with
pub use crm_seeker::{Bucket, BucketFilter, Dir, FilterSpec, PageSpec, QueryResult, SortSpec};
