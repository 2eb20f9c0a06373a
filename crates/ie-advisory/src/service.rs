//! Advisory service: prompts, timeouts, fallbacks, and per-key serialization

use chrono::NaiveDate;
use ie_models::Project;
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::error::AdvisoryError;
use crate::generator::TextGenerator;
use crate::prompts;

pub const RISK_FALLBACK: &str =
    "Unable to perform AI analysis at this time. Please check your API key.";
pub const RISK_EMPTY: &str = "Could not generate analysis.";
pub const REPORT_FALLBACK: &str =
    "Unable to generate the regional report at this time. Please check your API key.";

pub fn no_projects_message(region: &str) -> String {
    format!("No projects found for {}. Cannot generate report.", region)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AdvisoryStatus {
    /// Text came from the model
    Generated,
    /// Fixed text replaced a failed or empty call
    Fallback,
    /// A call for the same key is still outstanding; nothing was sent
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdvisoryReply {
    pub text: String,
    pub status: AdvisoryStatus,
}

impl AdvisoryReply {
    fn generated(text: String) -> Self {
        Self {
            text,
            status: AdvisoryStatus::Generated,
        }
    }

    fn fallback(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            status: AdvisoryStatus::Fallback,
        }
    }

    fn busy() -> Self {
        Self {
            text: String::new(),
            status: AdvisoryStatus::Busy,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.status == AdvisoryStatus::Busy
    }
}

/// Keys with an outstanding call
#[derive(Default)]
struct InFlight {
    keys: Mutex<HashSet<String>>,
}

/// Removes its key when dropped
struct InFlightGuard<'a> {
    owner: &'a InFlight,
    key: String,
}

impl InFlight {
    fn try_acquire(&self, key: String) -> Option<InFlightGuard<'_>> {
        if self.keys.lock().insert(key.clone()) {
            Some(InFlightGuard { owner: self, key })
        } else {
            None
        }
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.owner.keys.lock().remove(&self.key);
    }
}

pub struct AdvisoryService {
    generator: Arc<dyn TextGenerator>,
    timeout: Duration,
    in_flight: InFlight,
}

impl AdvisoryService {
    pub fn new(generator: Arc<dyn TextGenerator>, timeout: Duration) -> Self {
        Self {
            generator,
            timeout,
            in_flight: InFlight::default(),
        }
    }

    /// One attempt, bounded by the timeout
    async fn call(&self, prompt: &str) -> Result<String, AdvisoryError> {
        match tokio::time::timeout(self.timeout, self.generator.generate(prompt)).await {
            Ok(result) => result,
            Err(_) => Err(AdvisoryError::Timeout(self.timeout.as_secs())),
        }
    }

    /// Short risk assessment for one project
    pub async fn analyze_risk(&self, project: &Project, today: NaiveDate) -> AdvisoryReply {
        let _guard = match self.acquire(record_key(project)) {
            Ok(guard) => guard,
            Err(busy) => return busy,
        };

        match self.call(&prompts::risk_analysis(project, today)).await {
            Ok(text) if text.trim().is_empty() => AdvisoryReply::fallback(RISK_EMPTY),
            Ok(text) => AdvisoryReply::generated(text),
            Err(e) => {
                error!(project_id = %project.id, error = %e, "Risk analysis failed");
                AdvisoryReply::fallback(RISK_FALLBACK)
            }
        }
    }

    /// Suggested remarks, trimmed. Empty on failure so the caller keeps what it had.
    pub async fn smart_remarks(&self, project: &Project) -> AdvisoryReply {
        let _guard = match self.acquire(record_key(project)) {
            Ok(guard) => guard,
            Err(busy) => return busy,
        };

        match self.call(&prompts::smart_remarks(project)).await {
            Ok(text) if !text.trim().is_empty() => AdvisoryReply::generated(text.trim().to_string()),
            Ok(_) => AdvisoryReply::fallback(""),
            Err(e) => {
                warn!(project_id = %project.id, error = %e, "Remark generation failed");
                AdvisoryReply::fallback("")
            }
        }
    }

    /// Executive summary over the projects already selected for `region`
    pub async fn regional_report(
        &self,
        region: &str,
        projects: &[Project],
        today: NaiveDate,
    ) -> AdvisoryReply {
        if projects.is_empty() {
            info!(region = %region, "No projects for regional report");
            return AdvisoryReply::fallback(no_projects_message(region));
        }

        let _guard = match self.acquire(Some(format!("region:{}", region.trim().to_lowercase()))) {
            Ok(guard) => guard,
            Err(busy) => return busy,
        };

        match self.call(&prompts::regional_report(region, projects, today)).await {
            Ok(text) if !text.trim().is_empty() => AdvisoryReply::generated(text),
            Ok(_) => AdvisoryReply::fallback(REPORT_FALLBACK),
            Err(e) => {
                error!(region = %region, error = %e, "Regional report failed");
                AdvisoryReply::fallback(REPORT_FALLBACK)
            }
        }
    }

    /// Unsaved drafts have no key and are never refused
    fn acquire(&self, key: Option<String>) -> Result<Option<InFlightGuard<'_>>, AdvisoryReply> {
        let Some(key) = key else {
            return Ok(None);
        };
        match self.in_flight.try_acquire(key.clone()) {
            Some(guard) => Ok(Some(guard)),
            None => {
                warn!(key = %key, "Advisory call already in flight");
                Err(AdvisoryReply::busy())
            }
        }
    }
}

fn record_key(project: &Project) -> Option<String> {
    (!project.id.is_empty()).then(|| format!("record:{}", project.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::MockTextGenerator;
    use async_trait::async_trait;
    use tokio::sync::Notify;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    fn project(id: &str) -> Project {
        let mut p = Project::new_draft(today());
        p.id = id.into();
        p.region = "Region VII".into();
        p.project_name = "Covered court".into();
        p
    }

    fn service(mock: MockTextGenerator) -> AdvisoryService {
        AdvisoryService::new(Arc::new(mock), Duration::from_secs(5))
    }

    fn network_error() -> AdvisoryError {
        AdvisoryError::Api {
            status: 502,
            body: "bad gateway".into(),
        }
    }

    #[tokio::test]
    async fn test_risk_returns_text_verbatim() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate()
            .withf(|prompt| prompt.contains("Covered court"))
            .times(1)
            .returning(|_| Ok("  On track.\n".to_string()));

        let reply = service(mock).analyze_risk(&project("p-1"), today()).await;
        assert_eq!(reply, AdvisoryReply::generated("  On track.\n".into()));
    }

    #[tokio::test]
    async fn test_risk_fallbacks() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate().times(1).returning(|_| Err(network_error()));
        let reply = service(mock).analyze_risk(&project("p-1"), today()).await;
        assert_eq!(reply.text, RISK_FALLBACK);
        assert_eq!(reply.status, AdvisoryStatus::Fallback);

        let mut mock = MockTextGenerator::new();
        mock.expect_generate().returning(|_| Ok(String::new()));
        let reply = service(mock).analyze_risk(&project("p-1"), today()).await;
        assert_eq!(reply.text, RISK_EMPTY);
    }

    #[tokio::test]
    async fn test_missing_key_is_a_fallback() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate().returning(|_| Err(AdvisoryError::MissingApiKey));
        let reply = service(mock).analyze_risk(&project("p-1"), today()).await;
        assert_eq!(reply.text, RISK_FALLBACK);
    }

    #[tokio::test]
    async fn test_remarks_trimmed_or_empty() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate()
            .returning(|_| Ok("  Roofing works at 60%, on schedule.  ".to_string()));
        let reply = service(mock).smart_remarks(&project("")).await;
        assert_eq!(reply.text, "Roofing works at 60%, on schedule.");

        let mut mock = MockTextGenerator::new();
        mock.expect_generate().returning(|_| Err(network_error()));
        let reply = service(mock).smart_remarks(&project("p-1")).await;
        assert_eq!(reply.text, "");
        assert_eq!(reply.status, AdvisoryStatus::Fallback);
    }

    #[tokio::test]
    async fn test_report_without_projects_skips_model() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate().times(0);
        let reply = service(mock).regional_report("CARAGA", &[], today()).await;
        assert_eq!(reply.text, "No projects found for CARAGA. Cannot generate report.");
    }

    #[tokio::test]
    async fn test_report_failure() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate().times(1).returning(|_| Err(network_error()));
        let reply = service(mock)
            .regional_report("Region VII", &[project("p-1")], today())
            .await;
        assert_eq!(reply.text, REPORT_FALLBACK);
    }

    /// Blocks until released
    struct Gate {
        release: Notify,
    }

    #[async_trait]
    impl TextGenerator for Gate {
        async fn generate(&self, _prompt: &str) -> Result<String, AdvisoryError> {
            self.release.notified().await;
            Ok("done".into())
        }
    }

    #[tokio::test]
    async fn test_same_record_is_busy_while_in_flight() {
        let gate = Arc::new(Gate {
            release: Notify::new(),
        });
        let service = Arc::new(AdvisoryService::new(gate.clone(), Duration::from_secs(5)));

        let first = {
            let service = service.clone();
            tokio::spawn(async move { service.analyze_risk(&project("p-1"), today()).await })
        };
        tokio::task::yield_now().await;
        while service.in_flight.keys.lock().is_empty() {
            tokio::task::yield_now().await;
        }

        let second = service.smart_remarks(&project("p-1")).await;
        assert!(second.is_busy());

        gate.release.notify_one();
        let first = first.await.unwrap();
        assert_eq!(first.text, "done");

        // released after completion
        gate.release.notify_one();
        let third = service.analyze_risk(&project("p-1"), today()).await;
        assert_eq!(third.status, AdvisoryStatus::Generated);
    }

    struct Slow;

    #[async_trait]
    impl TextGenerator for Slow {
        async fn generate(&self, _prompt: &str) -> Result<String, AdvisoryError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok("late".into())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_a_fallback() {
        let service = AdvisoryService::new(Arc::new(Slow), Duration::from_secs(30));
        let reply = service.analyze_risk(&project("p-1"), today()).await;
        assert_eq!(reply.text, RISK_FALLBACK);
    }
}
