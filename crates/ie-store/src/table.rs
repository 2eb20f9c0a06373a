//! Mutations shared by the store implementations

use ie_models::Project;

use crate::repository::{ProjectMutation, RepositoryError, RepositoryResult};

pub(crate) fn insert(rows: &mut Vec<Project>, project: Project) -> RepositoryResult<()> {
    if project.id.is_empty() {
        return Err(RepositoryError::Conflict(
            "cannot insert a project without an id".into(),
        ));
    }
    if rows.iter().any(|p| p.id == project.id) {
        return Err(RepositoryError::Conflict(format!(
            "project {} already exists",
            project.id
        )));
    }
    rows.insert(0, project);
    Ok(())
}

pub(crate) fn update(
    rows: &mut [Project],
    id: &str,
    mutate: ProjectMutation<'_>,
) -> RepositoryResult<Project> {
    let pos = rows
        .iter()
        .position(|p| p.id == id)
        .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;

    let mut next = mutate(&rows[pos])?;
    // the stored id always wins
    next.id = rows[pos].id.clone();
    rows[pos] = next.clone();
    Ok(next)
}

pub(crate) fn seed(rows: &mut Vec<Project>, projects: Vec<Project>) -> RepositoryResult<usize> {
    if !rows.is_empty() {
        return Ok(0);
    }
    let mut seeded: Vec<Project> = Vec::with_capacity(projects.len());
    for project in projects {
        if project.id.is_empty() || seeded.iter().any(|p| p.id == project.id) {
            return Err(RepositoryError::Conflict(format!(
                "seed record has a missing or duplicate id '{}'",
                project.id
            )));
        }
        seeded.push(project);
    }
    let added = seeded.len();
    *rows = seeded;
    Ok(added)
}
