//! One submission cycle: begin, call, complete.

use lexa_core::{interpret, AnalysisRequest, Profile, RawAnalysis, Session, Ticket};
use tracing::debug;

use crate::error::ClientResult;
use crate::service::AnalysisService;

/// What happened to a submission's outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// The outcome is now the session's current result or error.
    Applied,
    /// A newer submission started first; the outcome was dropped.
    Stale,
}

/// Record the outcome of a call started with `ticket`.
///
/// Successful payloads are interpreted against `profile`. Failures become the
/// session's error message.
pub fn complete(
    session: &mut Session,
    ticket: Ticket,
    profile: &Profile,
    outcome: ClientResult<RawAnalysis>,
) -> Submission {
    let applied = match outcome {
        Ok(raw) => session.succeed(ticket, interpret(&raw, profile)),
        Err(e) => {
            debug!(session = %session.id(), seq = ticket.seq(), error = %e, "Analysis request failed");
            session.fail(ticket, e.user_message())
        }
    };

    if applied {
        Submission::Applied
    } else {
        Submission::Stale
    }
}

/// Submit `input` and wait for the outcome.
///
/// Errors are returned only for submissions that never left the client:
/// blank input or a submission already in flight. Transport and server
/// failures are recorded in the session instead.
pub async fn submit<S>(
    session: &mut Session,
    service: &S,
    profile: &Profile,
    input: &str,
) -> ClientResult<Submission>
where
    S: AnalysisService + ?Sized,
{
    let request = AnalysisRequest::new(profile.request_field, input)?;
    let ticket = session.begin(request.text())?;

    debug!(session = %session.id(), seq = ticket.seq(), profile = %profile.name, "Submitting");

    let outcome = service.analyze(&request).await;
    Ok(complete(session, ticket, profile, outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use async_trait::async_trait;
    use lexa_core::{CoreError, Phase, SubmitPolicy};
    use reqwest::StatusCode;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Replays canned outcomes and counts calls.
    struct FakeService {
        respond: fn(&AnalysisRequest) -> ClientResult<RawAnalysis>,
        calls: AtomicUsize,
    }

    impl FakeService {
        fn new(respond: fn(&AnalysisRequest) -> ClientResult<RawAnalysis>) -> Self {
            Self {
                respond,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl AnalysisService for FakeService {
        async fn analyze(&self, request: &AnalysisRequest) -> ClientResult<RawAnalysis> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.respond)(request)
        }
    }

    fn echo_status(request: &AnalysisRequest) -> ClientResult<RawAnalysis> {
        Ok(RawAnalysis::from_value(&json!({
            "status": "Correcto",
            "message": request.text(),
            "tokens": [{"type": 1, "value": "git"}]
        })))
    }

    fn server_error(_: &AnalysisRequest) -> ClientResult<RawAnalysis> {
        Err(ClientError::Server {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".to_string(),
        })
    }

    #[tokio::test]
    async fn test_submit_success() {
        let service = FakeService::new(echo_status);
        let mut session = Session::default();

        let outcome = submit(&mut session, &service, &Profile::git(), "  git status ")
            .await
            .unwrap();

        assert_eq!(outcome, Submission::Applied);
        let state = session.result().unwrap();
        assert_eq!(state.message.as_deref(), Some("git status"));
        assert_eq!(session.input(), "git status");
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_replaces_previous_result() {
        let mut session = Session::default();
        submit(&mut session, &FakeService::new(echo_status), &Profile::git(), "git status")
            .await
            .unwrap();
        assert!(session.result().is_some());

        let outcome = submit(&mut session, &FakeService::new(server_error), &Profile::git(), "git status")
            .await
            .unwrap();

        assert_eq!(outcome, Submission::Applied);
        assert!(session.result().is_none());
        assert_eq!(
            session.error(),
            Some("Server error: 500 Internal Server Error - boom")
        );
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn test_blank_input_makes_no_call() {
        let service = FakeService::new(echo_status);
        let mut session = Session::default();

        let err = submit(&mut session, &service, &Profile::git(), "   ")
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Core(CoreError::EmptyInput)));
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
        assert_eq!(session.phase(), &Phase::Idle);
    }

    #[tokio::test]
    async fn test_in_flight_submission_rejected() {
        let service = FakeService::new(echo_status);
        let mut session = Session::new(SubmitPolicy::Reject);
        let _pending = session.begin("git status").unwrap();

        let err = submit(&mut session, &service, &Profile::git(), "git init")
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Core(CoreError::SubmissionInFlight)));
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_late_response_is_discarded() {
        let mut session = Session::new(SubmitPolicy::Supersede);
        let profile = Profile::git();

        let slow = session.begin("git push --force").unwrap();
        let fast = session.begin("git status").unwrap();

        let fresh = RawAnalysis::from_value(&json!({"status": "Correcto"}));
        assert_eq!(complete(&mut session, fast, &profile, Ok(fresh)), Submission::Applied);

        let late = RawAnalysis::from_value(&json!({"status": "Advertencia"}));
        assert_eq!(complete(&mut session, slow, &profile, Ok(late)), Submission::Stale);

        let late_failure = server_error(&AnalysisRequest::new(profile.request_field, "x").unwrap());
        assert_eq!(complete(&mut session, slow, &profile, late_failure), Submission::Stale);

        let status = session.result().unwrap().status.as_ref().unwrap();
        assert_eq!(status.label, "Correcto");
    }
}
