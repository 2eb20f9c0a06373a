//! Prompt builders
//!
//! Wording is free-form; only the embedded record fields matter.

use chrono::NaiveDate;
use ie_models::Project;
use std::fmt::Write;

fn date_or_unset(value: Option<NaiveDate>) -> String {
    value
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "Not set".to_string())
}

pub fn risk_analysis(project: &Project, today: NaiveDate) -> String {
    format!(
        "Analyze the following construction project status and provide a brief risk assessment (max 150 words).\n\
         Focus on the timeline (target vs actual/current date), accomplishment percentage, and status.\n\
         Identify if the project is delayed, on track, or ahead, and suggest 1 key action item.\n\
         \n\
         Project Data:\n\
         - Project: {}\n\
         - School: {}\n\
         - Allocation: {}\n\
         - Target Completion: {}\n\
         - Current Status: {}\n\
         - Accomplishment: {}%\n\
         - Remarks: {}\n\
         - Today's Date: {}\n",
        project.project_name,
        project.school_name,
        project.project_allocation,
        date_or_unset(project.target_completion_date),
        project.status,
        project.accomplishment_percentage,
        project.other_remarks.as_deref().unwrap_or("None"),
        today.format("%Y-%m-%d"),
    )
}

pub fn smart_remarks(project: &Project) -> String {
    format!(
        "Generate a concise, professional \"Other Remarks\" update for a construction project report based on this data:\n\
         Status: {}\n\
         Accomplishment: {}%\n\
         Target Date: {}\n\
         \n\
         Keep it under 20 words.\n",
        project.status,
        project.accomplishment_percentage,
        date_or_unset(project.target_completion_date),
    )
}

pub fn regional_report(region: &str, projects: &[Project], today: NaiveDate) -> String {
    let mut prompt = format!(
        "Write an executive summary of school construction projects in {} as of {}.\n\
         Cover overall progress, delayed projects, and funding utilization, then list recommendations.\n\
         \n\
         Projects:\n",
        region,
        today.format("%Y-%m-%d"),
    );
    for p in projects {
        // writing to a String cannot fail
        let _ = writeln!(
            prompt,
            "- {} ({}): {}, {}% complete, allocation {}, target {}{}",
            p.school_name,
            p.project_name,
            p.status,
            p.accomplishment_percentage,
            p.project_allocation,
            date_or_unset(p.target_completion_date),
            if p.is_delayed(today) { ", DELAYED" } else { "" },
        );
    }
    prompt
}
