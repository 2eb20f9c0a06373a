//! Project model
//!
//! One school-infrastructure construction project: location, naming, schedule,
//! funding, progress, and evidence.

use chrono::{DateTime, NaiveDate, Utc};
use ie_core::traits::{Entity, Identifiable};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::lenient;
use crate::status::ProjectStatus;

/// Reference to an uploaded file, kept by name only
///
/// No binary content is stored. The name is reduced to its final path
/// component, so `C:\photos\site.jpg` and `/tmp/site.jpg` both become `site.jpg`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FileRef(String);

impl FileRef {
    pub fn from_name(name: &str) -> Option<Self> {
        let base = name
            .rsplit(|c| c == '/' || c == '\\')
            .next()
            .unwrap_or_default()
            .trim();
        if base.is_empty() {
            None
        } else {
            Some(Self(base.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for FileRef {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        FileRef::from_name(&value).ok_or_else(|| format!("'{}' is not a file name", value))
    }
}

impl From<FileRef> for String {
    fn from(value: FileRef) -> Self {
        value.0
    }
}

impl std::fmt::Display for FileRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A captured site location
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,

    /// Accuracy radius in meters
    #[validate(range(min = 0.0))]
    pub accuracy: f64,

    pub captured_at: DateTime<Utc>,
}

/// Project entity
///
/// A draft is a `Project` whose `id` is empty. Numeric fields accept malformed
/// form input and coerce it to zero (see [`lenient`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Opaque identifier; empty until the record is persisted
    #[serde(default)]
    pub id: String,

    // Location
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub division: String,
    #[serde(default)]
    pub barangay: String,
    #[serde(default)]
    pub school_id: String,
    #[serde(default)]
    pub school_name: String,

    // Naming
    #[serde(default)]
    pub project_name: String,
    /// Official project identifier (distinct from the internal `id`)
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub contract_id: String,

    // Schedule
    #[serde(default, deserialize_with = "lenient::integer")]
    pub year: i32,
    #[serde(default)]
    pub batch_of_funds: String,
    #[serde(default, deserialize_with = "lenient::optional_date")]
    pub invitation_to_bid: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::optional_date")]
    pub pre_submission_conference: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::optional_date")]
    pub bid_opening: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::optional_date")]
    pub resolution_to_award: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::optional_date")]
    pub notice_to_proceed: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::optional_date")]
    pub target_completion_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::optional_date")]
    pub actual_completion_date: Option<NaiveDate>,

    // Funding
    #[serde(default, deserialize_with = "lenient::number")]
    pub project_allocation: f64,
    #[serde(default)]
    pub contractor_name: String,

    // Progress
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub accomplishment_percentage: i32,
    #[serde(default = "today")]
    pub status_as_of_date: NaiveDate,

    // Evidence
    #[serde(default)]
    pub photos: Vec<FileRef>,
    #[serde(default)]
    pub documents: Vec<FileRef>,
    #[serde(default)]
    pub certificate_url: Option<FileRef>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,

    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub other_remarks: Option<String>,
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

impl Default for Project {
    fn default() -> Self {
        Self::new_draft(today())
    }
}

impl Identifiable for Project {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Project {
    const TYPE_NAME: &'static str = "Project";
}

impl Project {
    /// An empty, unsaved project whose status is reported as of `as_of`
    pub fn new_draft(as_of: NaiveDate) -> Self {
        Self {
            id: String::new(),
            region: String::new(),
            division: String::new(),
            barangay: String::new(),
            school_id: String::new(),
            school_name: String::new(),
            project_name: String::new(),
            project_id: String::new(),
            contract_id: String::new(),
            year: 0,
            batch_of_funds: String::new(),
            invitation_to_bid: None,
            pre_submission_conference: None,
            bid_opening: None,
            resolution_to_award: None,
            notice_to_proceed: None,
            target_completion_date: None,
            actual_completion_date: None,
            project_allocation: 0.0,
            contractor_name: String::new(),
            status: ProjectStatus::NotYetStarted,
            accomplishment_percentage: 0,
            status_as_of_date: as_of,
            photos: Vec::new(),
            documents: Vec::new(),
            certificate_url: None,
            coordinates: None,
            other_remarks: None,
        }
    }

    /// Past its target date without being completed or fully accomplished
    pub fn is_delayed(&self, today: NaiveDate) -> bool {
        if self.status == ProjectStatus::Completed {
            return false;
        }
        match self.target_completion_date {
            Some(target) => today > target && self.accomplishment_percentage < 100,
            None => false,
        }
    }

    /// Whether 100% accomplishment and a closing status agree
    ///
    /// Advisory only; inconsistent records are still accepted.
    pub fn accomplishment_consistent(&self) -> bool {
        if self.accomplishment_percentage >= 100 {
            self.status.expects_full_accomplishment()
        } else {
            self.status != ProjectStatus::Completed
        }
    }

    /// Case-insensitive match against the identifying text fields
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [
            &self.school_name,
            &self.school_id,
            &self.project_name,
            &self.project_id,
            &self.region,
            &self.division,
            &self.contractor_name,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}
