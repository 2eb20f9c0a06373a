//! Status policy engine
//!
//! Maps a project's status to a visibility profile: for each field group,
//! whether it is shown and whether it is editable. Both the editing surface
//! and the update guard read from this one table.
//!
//! `shown` and `editable` are independent answers. Timelines and contract
//! funds are shown for every status; only their editability varies.

use ie_models::ProjectStatus;
use serde::Serialize;

/// A group of project attributes that share visibility rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldGroup {
    BasicInfo,
    Timelines,
    ContractFunds,
    Accomplishment,
    /// Photo, document, and location capture while work is in progress
    OngoingExtras,
    /// Actual completion date, certificate, and final location
    CompletionExtras,
}

impl FieldGroup {
    pub const ALL: [FieldGroup; 6] = [
        FieldGroup::BasicInfo,
        FieldGroup::Timelines,
        FieldGroup::ContractFunds,
        FieldGroup::Accomplishment,
        FieldGroup::OngoingExtras,
        FieldGroup::CompletionExtras,
    ];

    /// Attributes (JSON names) belonging to this group
    pub fn attributes(&self) -> &'static [&'static str] {
        match self {
            FieldGroup::BasicInfo => &[
                "region",
                "division",
                "barangay",
                "schoolId",
                "schoolName",
                "projectName",
                "projectId",
            ],
            FieldGroup::Timelines => &[
                "invitationToBid",
                "preSubmissionConference",
                "bidOpening",
                "resolutionToAward",
                "noticeToProceed",
                "targetCompletionDate",
            ],
            FieldGroup::ContractFunds => &[
                "year",
                "batchOfFunds",
                "projectAllocation",
                "contractorName",
                "contractId",
            ],
            FieldGroup::Accomplishment => &["accomplishmentPercentage", "statusAsOfDate"],
            FieldGroup::OngoingExtras => &["photos", "documents", "coordinates"],
            FieldGroup::CompletionExtras => {
                &["actualCompletionDate", "certificateUrl", "coordinates"]
            }
        }
    }

    /// Groups an attribute belongs to; empty for ungrouped attributes
    pub fn of(attribute: &str) -> Vec<FieldGroup> {
        FieldGroup::ALL
            .into_iter()
            .filter(|group| group.attributes().contains(&attribute))
            .collect()
    }
}

/// Whether a group is shown, and whether it is editable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GroupAccess {
    pub shown: bool,
    pub editable: bool,
}

impl GroupAccess {
    pub const HIDDEN: GroupAccess = GroupAccess {
        shown: false,
        editable: false,
    };
    pub const READ_ONLY: GroupAccess = GroupAccess {
        shown: true,
        editable: false,
    };
    pub const EDITABLE: GroupAccess = GroupAccess {
        shown: true,
        editable: true,
    };
}

/// Editing mode, consulted before the status-derived rules
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditMode {
    /// A realigned draft is being prepared: basic info is editable whatever the status
    pub realigning: bool,
}

impl EditMode {
    pub fn realigning() -> Self {
        Self { realigning: true }
    }
}

/// Access rules for every field group under one status and mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityProfile {
    pub basic_info: GroupAccess,
    pub timelines: GroupAccess,
    pub contract_funds: GroupAccess,
    pub accomplishment: GroupAccess,
    pub ongoing_extras: GroupAccess,
    pub completion_extras: GroupAccess,
}

impl VisibilityProfile {
    pub fn access(&self, group: FieldGroup) -> GroupAccess {
        match group {
            FieldGroup::BasicInfo => self.basic_info,
            FieldGroup::Timelines => self.timelines,
            FieldGroup::ContractFunds => self.contract_funds,
            FieldGroup::Accomplishment => self.accomplishment,
            FieldGroup::OngoingExtras => self.ongoing_extras,
            FieldGroup::CompletionExtras => self.completion_extras,
        }
    }

    /// An attribute is writable when any of its groups is editable.
    /// Ungrouped attributes (status, remarks) are always writable.
    pub fn is_writable(&self, attribute: &str) -> bool {
        let groups = FieldGroup::of(attribute);
        groups.is_empty() || groups.into_iter().any(|g| self.access(g).editable)
    }

    /// An attribute is shown when any of its groups is shown
    pub fn is_shown(&self, attribute: &str) -> bool {
        let groups = FieldGroup::of(attribute);
        groups.is_empty() || groups.into_iter().any(|g| self.access(g).shown)
    }
}

/// Visibility profile for a status under the given mode
pub fn visibility_profile(status: ProjectStatus, mode: EditMode) -> VisibilityProfile {
    use GroupAccess as A;

    let mut profile = match status {
        ProjectStatus::NotYetStarted | ProjectStatus::UnderProcurement => VisibilityProfile {
            basic_info: A::EDITABLE,
            timelines: A::EDITABLE,
            contract_funds: A::EDITABLE,
            accomplishment: A::HIDDEN,
            ongoing_extras: A::HIDDEN,
            completion_extras: A::HIDDEN,
        },
        ProjectStatus::Ongoing | ProjectStatus::ForFinalInspection => VisibilityProfile {
            basic_info: A::EDITABLE,
            timelines: A::READ_ONLY,
            contract_funds: A::READ_ONLY,
            accomplishment: A::EDITABLE,
            ongoing_extras: A::EDITABLE,
            completion_extras: A::HIDDEN,
        },
        ProjectStatus::Completed => VisibilityProfile {
            basic_info: A::READ_ONLY,
            timelines: A::READ_ONLY,
            contract_funds: A::READ_ONLY,
            accomplishment: A::READ_ONLY,
            ongoing_extras: A::HIDDEN,
            completion_extras: A::EDITABLE,
        },
    };

    if mode.realigning {
        profile.basic_info = A::EDITABLE;
    }

    profile
}
