//! Attribute table for [`Project`]
//!
//! Maps each JSON attribute name to its struct field so the update guard can
//! compare and restore attributes by name.

use ie_models::Project;

use crate::base::ChangeTracker;

macro_rules! project_attributes {
    ($($name:literal => $field:ident),* $(,)?) => {
        /// Every writable attribute name; `id` is not among them
        pub const ATTRIBUTES: &[&str] = &[$($name),*];

        /// Attributes whose values differ between `stored` and `draft`
        pub fn diff(stored: &Project, draft: &Project) -> ChangeTracker {
            let mut changes = ChangeTracker::new();
            $(
                if stored.$field != draft.$field {
                    changes.mark_changed($name);
                }
            )*
            changes
        }

        /// Copy one attribute from `stored` into `draft`. Returns false for unknown names.
        pub fn restore(draft: &mut Project, stored: &Project, attribute: &str) -> bool {
            match attribute {
                $(
                    $name => {
                        draft.$field = stored.$field.clone();
                        true
                    }
                )*
                _ => false,
            }
        }
    };
}

project_attributes! {
    "region" => region,
    "division" => division,
    "barangay" => barangay,
    "schoolId" => school_id,
    "schoolName" => school_name,
    "projectName" => project_name,
    "projectId" => project_id,
    "contractId" => contract_id,
    "year" => year,
    "batchOfFunds" => batch_of_funds,
    "invitationToBid" => invitation_to_bid,
    "preSubmissionConference" => pre_submission_conference,
    "bidOpening" => bid_opening,
    "resolutionToAward" => resolution_to_award,
    "noticeToProceed" => notice_to_proceed,
    "targetCompletionDate" => target_completion_date,
    "actualCompletionDate" => actual_completion_date,
    "projectAllocation" => project_allocation,
    "contractorName" => contractor_name,
    "status" => status,
    "accomplishmentPercentage" => accomplishment_percentage,
    "statusAsOfDate" => status_as_of_date,
    "photos" => photos,
    "documents" => documents,
    "certificateUrl" => certificate_url,
    "coordinates" => coordinates,
    "otherRemarks" => other_remarks,
}
