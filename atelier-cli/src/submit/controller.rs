//! Request lifecycle state machine for mutating submissions.
//!
//! The controller guarantees at most one in-flight mutation, refuses to
//! submit while media is still compressing, and abandons requests that
//! outlive the deadline so a dead connection cannot wedge the flow.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use futures::future::{AbortHandle, Abortable, Aborted};
use log::{debug, info, warn};
use serde_json::Value;

use crate::api::{ApiClient, ApiError, Operation};
use crate::media::{MediaStaging, StagedFile};

/// Mutating requests that take longer than this are abandoned.
pub const SUBMIT_TIMEOUT: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionState {
    Idle,
    Compressing,
    Submitting,
    Succeeded,
    Failed(String),
}

impl SubmissionState {
    /// Whether a new submission may start. Succeeded and Failed are
    /// terminal for one attempt but do not block the next.
    fn accepts_submission(&self) -> bool {
        !matches!(self, Self::Compressing | Self::Submitting)
    }
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Succeeded(Value),
    Failed(String),
    /// Media compression has not finished; nothing was sent.
    BlockedCompressing,
    /// Another submission is already in flight; nothing was sent.
    AlreadySubmitting,
}

pub struct SubmissionController {
    state: Mutex<SubmissionState>,
    timeout: Duration,
    aborts_fired: AtomicUsize,
}

impl Default for SubmissionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::with_timeout(SUBMIT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            state: Mutex::new(SubmissionState::Idle),
            timeout,
            aborts_fired: AtomicUsize::new(0),
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.lock_state().clone()
    }

    /// Number of requests abandoned at the deadline.
    pub fn aborts_fired(&self) -> usize {
        self.aborts_fired.load(Ordering::SeqCst)
    }

    /// Return to Idle, typically after a success has been reported and
    /// the form reset.
    pub fn reset(&self) {
        *self.lock_state() = SubmissionState::Idle;
    }

    /// Stage gallery files while holding the Compressing state, so a
    /// concurrent submit attempt is refused rather than racing the
    /// half-staged batch.
    pub async fn stage_gallery(
        &self,
        staging: &MediaStaging,
        paths: &[std::path::PathBuf],
    ) -> anyhow::Result<Vec<StagedFile>> {
        {
            let mut state = self.lock_state();
            if matches!(*state, SubmissionState::Submitting) {
                anyhow::bail!("cannot stage media while a submission is in flight");
            }
            *state = SubmissionState::Compressing;
        }
        let result = staging.stage_gallery(paths).await;
        {
            let mut state = self.lock_state();
            if matches!(*state, SubmissionState::Compressing) {
                *state = SubmissionState::Idle;
            }
        }
        result
    }

    /// Run one mutating operation through the client. The call is
    /// refused without touching the wire when media is still staging or
    /// another submission is in flight.
    pub async fn submit(
        &self,
        client: &ApiClient,
        staging: &MediaStaging,
        operation: Operation,
    ) -> SubmitOutcome {
        {
            let mut state = self.lock_state();
            if matches!(*state, SubmissionState::Submitting) {
                debug!("submission already in flight; ignoring duplicate");
                return SubmitOutcome::AlreadySubmitting;
            }
            if staging.in_flight() > 0 || !state.accepts_submission() {
                debug!("media still compressing; refusing to submit");
                return SubmitOutcome::BlockedCompressing;
            }
            *state = SubmissionState::Submitting;
        }

        let (abort_handle, registration) = AbortHandle::new_pair();
        let request = Abortable::new(client.execute(operation), registration);
        tokio::pin!(request);
        let deadline = tokio::time::sleep(self.timeout);
        tokio::pin!(deadline);

        let result: Result<Value, ApiError> = tokio::select! {
            outcome = &mut request => match outcome {
                Ok(inner) => inner,
                Err(Aborted) => Err(ApiError::Timeout),
            },
            _ = &mut deadline => {
                abort_handle.abort();
                self.aborts_fired.fetch_add(1, Ordering::SeqCst);
                warn!("submission exceeded {:?}; abandoning request", self.timeout);
                Err(ApiError::Timeout)
            }
        };

        match result {
            Ok(value) => {
                *self.lock_state() = SubmissionState::Succeeded;
                info!("submission succeeded");
                SubmitOutcome::Succeeded(value)
            }
            Err(err) => {
                let message = err.to_string();
                warn!("submission failed: {message}");
                *self.lock_state() = SubmissionState::Failed(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, SubmissionState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::api::transport::testing::FakeTransport;
    use crate::api::{Resource, Session};
    use crate::list::Collection;
    use crate::records::Project;

    fn client_over(transport: Arc<FakeTransport>) -> ApiClient {
        let mut session = Session::anonymous();
        session.login("tok-abc", "Priya");
        ApiClient::new(transport, session)
    }

    #[tokio::test]
    async fn slow_server_hits_the_deadline_and_aborts_once() {
        let transport = Arc::new(FakeTransport::with_delay(Duration::from_secs(10)));
        let client = client_over(transport.clone());
        let staging = MediaStaging::new();
        let controller = SubmissionController::with_timeout(Duration::from_millis(50));

        let outcome = controller
            .submit(&client, &staging, Operation::delete(Resource::Projects, "p1"))
            .await;

        let SubmitOutcome::Failed(message) = outcome else {
            panic!("expected a failed outcome");
        };
        assert_eq!(message, ApiError::Timeout.to_string());
        assert_eq!(controller.aborts_fired(), 1);
        assert_eq!(controller.state(), SubmissionState::Failed(message));
        // The request reached the transport before being abandoned.
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn duplicate_submit_sends_exactly_one_request() {
        let transport = Arc::new(FakeTransport::with_delay(Duration::from_millis(300)));
        transport.push_response(Ok(json!({"_id": "p1"})));
        let client = Arc::new(client_over(transport.clone()));
        let staging = Arc::new(MediaStaging::new());
        let controller = Arc::new(SubmissionController::new());

        let first = {
            let (controller, client, staging) =
                (controller.clone(), client.clone(), staging.clone());
            tokio::spawn(async move {
                controller
                    .submit(&client, &staging, Operation::delete(Resource::Projects, "p1"))
                    .await
            })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(controller.state(), SubmissionState::Submitting);
        let second = controller
            .submit(&client, &staging, Operation::delete(Resource::Projects, "p1"))
            .await;
        assert!(matches!(second, SubmitOutcome::AlreadySubmitting));

        assert!(matches!(first.await.unwrap(), SubmitOutcome::Succeeded(_)));
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn pending_media_blocks_submission_without_a_request() {
        let transport = Arc::new(FakeTransport::new());
        let client = client_over(transport.clone());
        let staging = MediaStaging::new();
        let controller = SubmissionController::new();

        let guard = staging.begin_batch();
        let blocked = controller
            .submit(&client, &staging, Operation::delete(Resource::Events, "e1"))
            .await;
        assert!(matches!(blocked, SubmitOutcome::BlockedCompressing));
        assert_eq!(transport.request_count(), 0);

        drop(guard);
        let allowed = controller
            .submit(&client, &staging, Operation::delete(Resource::Events, "e1"))
            .await;
        assert!(matches!(allowed, SubmitOutcome::Succeeded(_)));
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn successful_create_resets_the_form_and_refreshes_the_list() {
        let created = json!({
            "_id": "p9",
            "title": "Clay Pavilion",
            "category": "Architecture",
        });
        let transport = Arc::new(FakeTransport::new());
        transport.push_response(Ok(created.clone()));
        transport.push_response(Ok(json!([created])));
        let client = client_over(transport.clone());
        let staging = MediaStaging::new();
        let controller = SubmissionController::new();

        let mut form = Project::create_form().with_text("title", "Clay Pavilion");
        let body = crate::submit::multipart_body(&form, None, Vec::new());
        let outcome = controller
            .submit(&client, &staging, Operation::create(Resource::Projects, body))
            .await;
        assert!(matches!(outcome, SubmitOutcome::Succeeded(_)));

        // Success resets the form to pristine defaults and refetches.
        let pristine = Project::create_form();
        assert_ne!(form, pristine);
        controller.reset();
        form = pristine;
        assert_eq!(form, Project::create_form());
        assert_eq!(controller.state(), SubmissionState::Idle);

        let mut collection = Collection::new();
        collection.refresh(client.fetch_list::<Project>(Resource::Projects).await.unwrap());
        assert!(collection.get("p9").is_some());
    }

    #[tokio::test]
    async fn failure_reports_the_server_message_and_allows_retry() {
        let transport = Arc::new(FakeTransport::new());
        transport.push_response(Err(ApiError::Server {
            status: 500,
            message: "Disk full".into(),
        }));
        transport.push_response(Ok(json!({"_id": "e2"})));
        let client = client_over(transport.clone());
        let staging = MediaStaging::new();
        let controller = SubmissionController::new();

        let failed = controller
            .submit(&client, &staging, Operation::delete(Resource::Events, "e2"))
            .await;
        let SubmitOutcome::Failed(message) = failed else {
            panic!("expected failure");
        };
        assert_eq!(message, "Disk full");

        // A failed attempt does not wedge the controller.
        let retried = controller
            .submit(&client, &staging, Operation::delete(Resource::Events, "e2"))
            .await;
        assert!(matches!(retried, SubmitOutcome::Succeeded(_)));
        assert_eq!(transport.request_count(), 2);
    }

    #[tokio::test]
    async fn opening_toggle_is_a_single_put_to_the_toggle_path() {
        let transport = Arc::new(FakeTransport::new());
        transport.push_response(Ok(json!({"_id": "c3", "isOpen": false})));
        let client = client_over(transport.clone());
        let staging = MediaStaging::new();
        let controller = SubmissionController::new();

        let outcome = controller
            .submit(&client, &staging, Operation::toggle_opening("c3"))
            .await;
        assert!(matches!(outcome, SubmitOutcome::Succeeded(_)));

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, crate::api::HttpMethod::Put);
        assert_eq!(requests[0].path, "/careers/c3/toggle");
    }
}
