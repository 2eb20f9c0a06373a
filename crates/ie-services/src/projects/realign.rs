//! Realignment: reuse a project's funding and schedule for a different school

use chrono::NaiveDate;
use ie_models::{Project, ProjectStatus};

/// Draft for a realigned project
///
/// Keeps allocation, year, batch, contract, contractor, and the six milestone
/// dates. Location, naming, progress, and evidence start over. The result has
/// an empty id; saving it creates a new record and leaves the source untouched.
pub fn realign(source: &Project, today: NaiveDate) -> Project {
    Project {
        id: String::new(),
        region: String::new(),
        division: String::new(),
        barangay: String::new(),
        school_id: String::new(),
        school_name: String::new(),
        project_name: String::new(),
        project_id: String::new(),
        status: ProjectStatus::NotYetStarted,
        accomplishment_percentage: 0,
        status_as_of_date: today,
        actual_completion_date: None,
        coordinates: None,
        photos: Vec::new(),
        documents: Vec::new(),
        certificate_url: None,
        ..source.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use ie_models::{Coordinates, FileRef};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn completed() -> Project {
        let mut p = Project::new_draft(date(2024, 6, 1));
        p.id = "src-1".into();
        p.region = "Region VII".into();
        p.division = "Cebu City".into();
        p.barangay = "Lahug".into();
        p.school_id = "119876".into();
        p.school_name = "Lahug ES".into();
        p.project_name = "Two-storey classroom".into();
        p.project_id = "2024-R7-001".into();
        p.contract_id = "C-778".into();
        p.contractor_name = "JMB Builders".into();
        p.year = 2024;
        p.batch_of_funds = "Batch 2".into();
        p.project_allocation = 12_500_000.0;
        p.invitation_to_bid = Some(date(2024, 1, 10));
        p.notice_to_proceed = Some(date(2024, 3, 1));
        p.target_completion_date = Some(date(2024, 12, 15));
        p.actual_completion_date = Some(date(2024, 12, 1));
        p.status = ProjectStatus::Completed;
        p.accomplishment_percentage = 100;
        p.photos = vec![FileRef::from_name("site.jpg").unwrap()];
        p.certificate_url = FileRef::from_name("coc.pdf");
        p.coordinates = Some(Coordinates {
            latitude: 10.33,
            longitude: 123.9,
            accuracy: 8.0,
            captured_at: Utc::now(),
        });
        p.other_remarks = Some("Turned over".into());
        p
    }

    #[test]
    fn test_realign_resets_identity_and_progress() {
        let draft = realign(&completed(), date(2025, 2, 1));

        assert!(draft.id.is_empty());
        assert_eq!(draft.status, ProjectStatus::NotYetStarted);
        assert_eq!(draft.accomplishment_percentage, 0);
        assert_eq!(draft.status_as_of_date, date(2025, 2, 1));
        assert!(draft.region.is_empty());
        assert!(draft.school_name.is_empty());
        assert!(draft.project_id.is_empty());
        assert!(draft.actual_completion_date.is_none());
        assert!(draft.coordinates.is_none());
        assert!(draft.photos.is_empty());
        assert!(draft.certificate_url.is_none());
    }

    #[test]
    fn test_realign_keeps_funding_and_schedule() {
        let source = completed();
        let draft = realign(&source, date(2025, 2, 1));

        assert_eq!(draft.project_allocation, source.project_allocation);
        assert_eq!(draft.year, source.year);
        assert_eq!(draft.batch_of_funds, source.batch_of_funds);
        assert_eq!(draft.contract_id, source.contract_id);
        assert_eq!(draft.contractor_name, source.contractor_name);
        assert_eq!(draft.invitation_to_bid, source.invitation_to_bid);
        assert_eq!(draft.notice_to_proceed, source.notice_to_proceed);
        assert_eq!(draft.target_completion_date, source.target_completion_date);
    }
}
