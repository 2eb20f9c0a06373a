//! Project status
//!
//! A closed set of five lifecycle states. The order carries no ranking.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a construction project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProjectStatus {
    UnderProcurement,
    #[default]
    NotYetStarted,
    Ongoing,
    ForFinalInspection,
    Completed,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 5] = [
        ProjectStatus::UnderProcurement,
        ProjectStatus::NotYetStarted,
        ProjectStatus::Ongoing,
        ProjectStatus::ForFinalInspection,
        ProjectStatus::Completed,
    ];

    /// Human-readable label, as shown in reports and exports
    pub fn label(&self) -> &'static str {
        match self {
            Self::UnderProcurement => "Under Procurement",
            Self::NotYetStarted => "Not Yet Started",
            Self::Ongoing => "Ongoing",
            Self::ForFinalInspection => "For Final Inspection and Punchlisting",
            Self::Completed => "Completed",
        }
    }

    /// Variant name, as used in URLs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnderProcurement => "UnderProcurement",
            Self::NotYetStarted => "NotYetStarted",
            Self::Ongoing => "Ongoing",
            Self::ForFinalInspection => "ForFinalInspection",
            Self::Completed => "Completed",
        }
    }

    /// Statuses where a fully accomplished project is expected
    pub fn expects_full_accomplishment(&self) -> bool {
        matches!(self, Self::ForFinalInspection | Self::Completed)
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown project status '{0}'")]
pub struct ParseStatusError(pub String);

impl FromStr for ProjectStatus {
    type Err = ParseStatusError;

    /// Accepts the variant name, the label, or any casing/spacing of either
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match key.as_str() {
            "underprocurement" => Ok(Self::UnderProcurement),
            "notyetstarted" => Ok(Self::NotYetStarted),
            "ongoing" => Ok(Self::Ongoing),
            "forfinalinspection" | "forfinalinspectionandpunchlisting" => {
                Ok(Self::ForFinalInspection)
            }
            "completed" => Ok(Self::Completed),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

impl Serialize for ProjectStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for ProjectStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
