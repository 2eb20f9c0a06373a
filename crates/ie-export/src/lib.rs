//! # ie-export
//!
//! CSV export of the project list.
//!
//! Columns are fixed. Rows follow store order and are separated by `\n`, with
//! no newline after the last row. A field is quoted only when it contains a
//! comma, a double quote, or a line break, and inner quotes are doubled.

use chrono::NaiveDate;
use ie_models::Project;

pub const COLUMNS: [&str; 21] = [
    "Region",
    "Division",
    "Barangay",
    "School Name",
    "School ID",
    "Project Name",
    "Project ID",
    "Status",
    "Accomplishment(%)",
    "Allocation",
    "Batch",
    "Year",
    "Contractor",
    "Contract ID",
    "Target Date",
    "Actual Date",
    "Invitation to Bid",
    "Notice to Proceed",
    "Lat",
    "Lng",
    "Other Remarks",
];

/// Quote a field when it contains a delimiter, quote, or line break
pub fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn date(value: Option<NaiveDate>) -> String {
    value.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

fn row(project: &Project) -> [String; 21] {
    let (lat, lng) = match &project.coordinates {
        Some(c) => (c.latitude.to_string(), c.longitude.to_string()),
        None => (String::new(), String::new()),
    };

    [
        project.region.clone(),
        project.division.clone(),
        project.barangay.clone(),
        project.school_name.clone(),
        project.school_id.clone(),
        project.project_name.clone(),
        project.project_id.clone(),
        project.status.label().to_string(),
        project.accomplishment_percentage.to_string(),
        project.project_allocation.to_string(),
        project.batch_of_funds.clone(),
        // zero means the year was never entered
        if project.year == 0 {
            String::new()
        } else {
            project.year.to_string()
        },
        project.contractor_name.clone(),
        project.contract_id.clone(),
        date(project.target_completion_date),
        date(project.actual_completion_date),
        date(project.invitation_to_bid),
        date(project.notice_to_proceed),
        lat,
        lng,
        project.other_remarks.clone().unwrap_or_default(),
    ]
}

fn join(fields: impl IntoIterator<Item = impl AsRef<str>>) -> String {
    fields
        .into_iter()
        .map(|f| escape_field(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Render the projects as CSV text
pub fn export_projects(projects: &[Project]) -> String {
    std::iter::once(join(COLUMNS))
        .chain(projects.iter().map(|p| join(row(p))))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Download name for an export made on `today`
pub fn export_filename(today: NaiveDate) -> String {
    format!("school_projects_{}.csv", today.format("%Y-%m-%d"))
}
