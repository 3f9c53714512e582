//! Async driver
//!
//! [`App`] owns a [`Model`] and a gateway. Events go in through
//! [`App::dispatch`]; the resulting effect is spawned on a `JoinSet` and,
//! once it finishes, its completion event is fed back into the model by
//! [`App::step`].

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::{Id, JoinSet};
use tracing::{debug, warn};

use crate::config::ClientConfig;

use super::{
    controller::{Effect, EffectKind, Event, Model, PollPolicy, Rejected, Ticket},
    error::ClientError,
    gateway::Gateway,
    screen::{render, Frame},
};

/// Client application: model + gateway + in-flight requests
pub struct App<G> {
    gateway: Arc<G>,
    model: Model,
    tasks: JoinSet<Event>,
    pending: HashMap<Id, (EffectKind, Ticket)>,
    request_timeout: Duration,
}

impl<G: Gateway + 'static> App<G> {
    /// Start on the sign-up screen
    pub fn new(gateway: G, config: &ClientConfig) -> Self {
        let model = Model::new().with_poll_policy(PollPolicy::from(config));
        Self::with_model(gateway, model, config.request_timeout)
    }

    /// Start from an existing model
    pub fn with_model(gateway: G, model: Model, request_timeout: Duration) -> Self {
        Self {
            gateway: Arc::new(gateway),
            model,
            tasks: JoinSet::new(),
            pending: HashMap::new(),
            request_timeout,
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Current frame
    pub fn frame(&self) -> Frame {
        render(&self.model)
    }

    /// Number of gateway calls still running
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    /// Apply a user event and start its effect, if any
    pub fn dispatch(&mut self, event: Event) -> Result<(), Rejected> {
        if let Some(effect) = self.model.update(event)? {
            self.spawn(effect);
        }
        Ok(())
    }

    /// Wait for the next completion and apply it
    ///
    /// Returns `false` when nothing was in flight.
    pub async fn step(&mut self) -> bool {
        let Some(joined) = self.tasks.join_next_with_id().await else {
            return false;
        };

        let event = match joined {
            Ok((id, event)) => {
                self.pending.remove(&id);
                event
            }
            Err(err) => {
                let Some((kind, ticket)) = self.pending.remove(&err.id()) else {
                    warn!(error = %err, "Lost track of a failed request task");
                    return true;
                };
                warn!(?kind, error = %err, "Request task failed");
                kind.failed(ticket, ClientError::Network(format!("request task failed: {}", err)))
            }
        };

        match self.model.update(event) {
            Ok(Some(effect)) => self.spawn(effect),
            Ok(None) => {}
            Err(rejected) => debug!(%rejected, "Completion rejected"),
        }
        true
    }

    /// Drive until no request is in flight, including follow-up polls
    pub async fn settle(&mut self) {
        while self.step().await {}
    }

    fn spawn(&mut self, effect: Effect) {
        let kind = effect.kind();
        let ticket = effect.ticket();
        debug!(?kind, epoch = ticket.epoch, seq = ticket.seq, "Issuing request");

        let handle = self
            .tasks
            .spawn(execute(Arc::clone(&self.gateway), effect, self.request_timeout));
        self.pending.insert(handle.id(), (kind, ticket));
    }
}

/// Run one effect against the gateway and turn the answer into an event
async fn execute<G: Gateway>(gateway: Arc<G>, effect: Effect, timeout: Duration) -> Event {
    match effect {
        Effect::LogIn {
            ticket,
            credentials,
        } => Event::LogInCompleted {
            ticket,
            result: bounded(timeout, gateway.log_in(&credentials)).await,
        },
        Effect::LoadDashboard { ticket, token } => Event::DashboardLoaded {
            ticket,
            result: bounded(timeout, gateway.load_dashboard(&token)).await,
        },
        Effect::LogOut { ticket, token } => Event::LogOutCompleted {
            ticket,
            result: bounded(timeout, gateway.log_out(&token)).await,
        },
        Effect::RunCode {
            ticket,
            code,
            problem_id,
        } => Event::RunCompleted {
            ticket,
            result: bounded(timeout, gateway.run_code(&code, &problem_id)).await,
        },
        Effect::SubmitCode {
            ticket,
            code,
            problem_id,
            token,
        } => Event::SubmitCompleted {
            ticket,
            result: bounded(
                timeout,
                gateway.submit_code(&code, &problem_id, token.as_deref()),
            )
            .await,
        },
        Effect::FetchFeedback {
            ticket,
            submission_id,
            delay,
        } => {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            Event::FeedbackPolled {
                ticket,
                result: bounded(timeout, gateway.get_feedback(&submission_id)).await,
            }
        }
    }
}

async fn bounded<T>(
    timeout: Duration,
    call: impl Future<Output = Result<T, ClientError>>,
) -> Result<T, ClientError> {
    tokio::time::timeout(timeout, call)
        .await
        .unwrap_or_else(|_| Err(ClientError::Network("request timed out".to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        client::{
            controller::{Remote, View},
            gateway::Credentials,
            screen::Screen,
            MockGateway,
        },
        constants::STARTER_CODE,
        fixtures,
    };

    fn config() -> ClientConfig {
        ClientConfig {
            request_timeout: Duration::from_secs(1),
            poll_interval: Duration::from_millis(1),
            max_poll_attempts: 5,
        }
    }

    fn credentials() -> Credentials {
        Credentials {
            email: "a@b.com".into(),
            password: "pw".into(),
        }
    }

    async fn logged_in(gateway: MockGateway) -> App<MockGateway> {
        let mut app = App::with_model(
            gateway,
            Model::starting_at(View::LogIn).with_poll_policy(PollPolicy::from(&config())),
            Duration::from_secs(1),
        );
        app.dispatch(Event::LogInSubmitted(credentials())).unwrap();
        app.settle().await;
        app
    }

    #[tokio::test]
    async fn test_full_flow_with_mock() {
        let mut app = logged_in(MockGateway::new()).await;
        assert_eq!(app.model().view(), View::Dashboard);
        assert!(app.model().dashboard().ready().is_some());

        let problem = fixtures::problem("two-sum").unwrap();
        app.dispatch(Event::ProblemSelected(problem)).unwrap();
        assert_eq!(app.model().code(), STARTER_CODE);

        app.dispatch(Event::CodeEdited("return [0, 1];".into())).unwrap();
        app.dispatch(Event::SubmitRequested).unwrap();
        app.settle().await;

        assert_eq!(app.model().view(), View::Feedback);
        let submission_id = app.model().submission().unwrap().submission_id.clone();
        let feedback = app.model().feedback().ready().unwrap();
        assert_eq!(feedback.submission_id, submission_id);
        assert_eq!(app.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_second_submit_while_pending_issues_no_request() {
        let mut app = logged_in(MockGateway::new().with_latency(Duration::from_millis(20))).await;
        app.dispatch(Event::ProblemSelected(fixtures::problem("two-sum").unwrap()))
            .unwrap();
        app.dispatch(Event::CodeEdited("x = 1".into())).unwrap();

        app.dispatch(Event::SubmitRequested).unwrap();
        app.dispatch(Event::SubmitRequested).unwrap();
        assert_eq!(app.in_flight(), 1);

        app.settle().await;
        assert_eq!(app.gateway().calls().submit_code, 1);
    }

    #[tokio::test]
    async fn test_pending_feedback_is_polled() {
        let mut app = logged_in(MockGateway::new().with_pending_polls(2)).await;
        app.dispatch(Event::ProblemSelected(fixtures::problem("two-sum").unwrap()))
            .unwrap();
        app.dispatch(Event::CodeEdited("x = 1".into())).unwrap();
        app.dispatch(Event::SubmitRequested).unwrap();
        app.settle().await;

        assert!(app.model().feedback().ready().is_some());
        assert_eq!(app.gateway().calls().get_feedback, 3);
    }

    #[tokio::test]
    async fn test_poll_limit_surfaces_error() {
        let mut app = logged_in(MockGateway::new().with_pending_polls(100)).await;
        app.dispatch(Event::ProblemSelected(fixtures::problem("two-sum").unwrap()))
            .unwrap();
        app.dispatch(Event::CodeEdited("x = 1".into())).unwrap();
        app.dispatch(Event::SubmitRequested).unwrap();
        app.settle().await;

        assert!(app.model().feedback().is_failed());
        assert_eq!(app.gateway().calls().get_feedback, 5);
        assert!(matches!(app.frame().screen, Screen::Feedback { .. }));
    }

    #[tokio::test]
    async fn test_slow_gateway_times_out() {
        let gateway = MockGateway::new().with_latency(Duration::from_millis(200));
        let mut app = App::with_model(gateway, Model::starting_at(View::LogIn), Duration::from_millis(20));

        app.dispatch(Event::LogInSubmitted(credentials())).unwrap();
        app.settle().await;

        assert_eq!(app.model().view(), View::LogIn);
        assert_eq!(
            *app.model().login(),
            Remote::Failed(ClientError::Network("request timed out".into()))
        );
    }

    #[tokio::test]
    async fn test_late_response_after_logout_discarded() {
        let mut app = logged_in(MockGateway::new().with_latency(Duration::from_millis(10))).await;
        app.dispatch(Event::NavigateTo(View::Dashboard)).unwrap();
        app.dispatch(Event::LoggedOut).unwrap();
        app.settle().await;

        assert_eq!(app.model().view(), View::LogIn);
        assert_eq!(*app.model().dashboard(), Remote::Idle);
        assert_eq!(app.gateway().calls().log_out, 1);
        tokio_test::assert_ok!(app.dispatch(Event::NavigateTo(View::SignUp)));
    }
}
