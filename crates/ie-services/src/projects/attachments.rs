//! File references on a project
//!
//! Only names are recorded. The owning field group must be editable for the
//! project's current status.

use ie_contracts::{visibility_profile, EditMode};
use ie_core::error::ValidationErrors;
use ie_core::{IeError, IeResult};
use ie_models::{FileRef, Project};
use ie_store::ProjectRepository;
use serde::Deserialize;
use tracing::info;

use crate::result::ServiceResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttachmentKind {
    Photo,
    Document,
    Certificate,
}

impl AttachmentKind {
    /// Project attribute the reference is stored in
    pub fn attribute(&self) -> &'static str {
        match self {
            AttachmentKind::Photo => "photos",
            AttachmentKind::Document => "documents",
            AttachmentKind::Certificate => "certificateUrl",
        }
    }
}

pub struct AttachProjectFileService<'a> {
    store: &'a dyn ProjectRepository,
}

impl<'a> AttachProjectFileService<'a> {
    pub fn new(store: &'a dyn ProjectRepository) -> Self {
        Self { store }
    }

    /// Append a photo or document, or replace the certificate
    pub async fn call(
        &self,
        id: &str,
        kind: AttachmentKind,
        name: &str,
    ) -> IeResult<ServiceResult<Project>> {
        let Some(file) = FileRef::from_name(name) else {
            return Ok(ServiceResult::failure_with_error("name", "must be a file name"));
        };

        let outcome = self
            .store
            .update(
                id,
                Box::new(move |stored: &Project| {
                    let profile = visibility_profile(stored.status, EditMode::default());
                    if !profile.is_writable(kind.attribute()) {
                        let mut errors = ValidationErrors::new();
                        errors.add(
                            kind.attribute(),
                            format!("cannot be changed while the project is {}", stored.status),
                        );
                        return Err(errors.into());
                    }

                    let mut next = stored.clone();
                    match kind {
                        AttachmentKind::Photo => next.photos.push(file),
                        AttachmentKind::Document => next.documents.push(file),
                        AttachmentKind::Certificate => next.certificate_url = Some(file),
                    }
                    Ok(next)
                }),
            )
            .await;

        match outcome.map_err(IeError::from) {
            Ok(project) => {
                info!(project_id = %project.id, kind = ?kind, "File attached");
                Ok(ServiceResult::success(project))
            }
            Err(IeError::Validation(errors)) => Ok(ServiceResult::failure(errors)),
            Err(e) => Err(e),
        }
    }
}
