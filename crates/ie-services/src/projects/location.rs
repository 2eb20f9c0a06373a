//! Site location capture

use ie_contracts::projects::ProjectBaseContract;
use ie_contracts::{visibility_profile, EditMode};
use ie_core::error::ValidationErrors;
use ie_core::{IeError, IeResult};
use ie_models::{Coordinates, Entity, Project};
use ie_store::ProjectRepository;
use tracing::{info, warn};

use crate::result::ServiceResult;

/// What the host's location provider returned
#[derive(Debug, Clone, PartialEq)]
pub enum LocationCapture {
    Granted(Coordinates),
    /// Permission denied or no fix available
    Denied { reason: String },
}

/// Attach captured coordinates to a stored project
///
/// Allowed while ongoing or completion extras are editable for the
/// project's current status.
pub struct CaptureLocationService<'a> {
    store: &'a dyn ProjectRepository,
}

impl<'a> CaptureLocationService<'a> {
    pub fn new(store: &'a dyn ProjectRepository) -> Self {
        Self { store }
    }

    pub async fn call(&self, id: &str, capture: LocationCapture) -> IeResult<ServiceResult<Project>> {
        let coordinates = match capture {
            LocationCapture::Granted(coordinates) => coordinates,
            LocationCapture::Denied { reason } => {
                if self.store.find_by_id(id).await?.is_none() {
                    return Err(IeError::not_found(Project::TYPE_NAME, id));
                }
                warn!(project_id = %id, reason = %reason, "Location capture denied");
                return Ok(ServiceResult::failure_with_error(
                    "coordinates",
                    format!("could not be captured: {}", reason),
                ));
            }
        };

        let outcome = self
            .store
            .update(
                id,
                Box::new(move |stored: &Project| {
                    let mut errors = ValidationErrors::new();
                    let profile = visibility_profile(stored.status, EditMode::default());
                    if !profile.is_writable("coordinates") {
                        errors.add(
                            "coordinates",
                            format!("cannot be captured while the project is {}", stored.status),
                        );
                    }
                    ProjectBaseContract::new()
                        .validate_coordinates(Some(&coordinates), &mut errors);
                    errors.into_result()?;

                    let mut next = stored.clone();
                    next.coordinates = Some(coordinates);
                    Ok(next)
                }),
            )
            .await;

        match outcome.map_err(IeError::from) {
            Ok(project) => {
                info!(project_id = %project.id, "Location captured");
                Ok(ServiceResult::success(project))
            }
            Err(IeError::Validation(errors)) => Ok(ServiceResult::failure(errors)),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use ie_models::ProjectStatus;
    use ie_store::MemoryProjectStore;

    fn stored(status: ProjectStatus) -> Project {
        let mut p = Project::new_draft(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        p.id = "p-1".into();
        p.status = status;
        p
    }

    fn fix(latitude: f64) -> Coordinates {
        Coordinates {
            latitude,
            longitude: 123.89,
            accuracy: 15.0,
            captured_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_capture_while_ongoing() {
        let store = MemoryProjectStore::with_projects(vec![stored(ProjectStatus::Ongoing)]);
        let result = CaptureLocationService::new(&store)
            .call("p-1", LocationCapture::Granted(fix(10.3)))
            .await
            .unwrap();

        assert!(result.is_success());
        let saved = store.find_by_id("p-1").await.unwrap().unwrap();
        assert_eq!(saved.coordinates.unwrap().latitude, 10.3);
    }

    #[tokio::test]
    async fn test_capture_not_allowed_before_start() {
        let store = MemoryProjectStore::with_projects(vec![stored(ProjectStatus::NotYetStarted)]);
        let result = CaptureLocationService::new(&store)
            .call("p-1", LocationCapture::Granted(fix(10.3)))
            .await
            .unwrap();

        assert!(result.is_failure());
        assert!(store.find_by_id("p-1").await.unwrap().unwrap().coordinates.is_none());
    }

    #[tokio::test]
    async fn test_denied_capture_leaves_record() {
        let store = MemoryProjectStore::with_projects(vec![stored(ProjectStatus::Completed)]);
        let result = CaptureLocationService::new(&store)
            .call(
                "p-1",
                LocationCapture::Denied {
                    reason: "User denied Geolocation".into(),
                },
            )
            .await
            .unwrap();

        assert!(result.is_failure());
        assert!(result.errors().has_error("coordinates"));
        assert!(store.find_by_id("p-1").await.unwrap().unwrap().coordinates.is_none());
    }

    #[tokio::test]
    async fn test_out_of_range_fix_rejected() {
        let store = MemoryProjectStore::with_projects(vec![stored(ProjectStatus::Ongoing)]);
        let result = CaptureLocationService::new(&store)
            .call("p-1", LocationCapture::Granted(fix(95.0)))
            .await
            .unwrap();
        assert!(result.is_failure());
    }

    #[tokio::test]
    async fn test_unknown_project() {
        let store = MemoryProjectStore::new();
        let err = CaptureLocationService::new(&store)
            .call("nope", LocationCapture::Granted(fix(10.0)))
            .await
            .unwrap_err();
        assert!(matches!(err, IeError::NotFound { .. }));
    }
}
