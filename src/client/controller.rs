//! View controller
//!
//! [`Model`] holds the whole client state: active view, session, selected
//! problem, current submission and the request state of every screen. It is
//! only changed through [`Model::update`], which is synchronous and returns at
//! most one [`Effect`] for the driver to execute.
//!
//! Every effect carries a [`Ticket`]. Entering a view bumps the epoch, so a
//! completion that arrives after the user navigated away no longer matches the
//! pending slot and is dropped.

use std::time::Duration;

use tracing::{debug, warn};

use crate::{
    config::ClientConfig,
    constants::STARTER_CODE,
    models::{Dashboard, Feedback, FeedbackStatus, Problem, RunReport, Submission, SubmissionReceipt, User},
    utils::{validate_email, validate_source_code},
};

use super::{
    error::ClientError,
    gateway::{Credentials, SignUpForm},
};

/// Message shown on the login screen after a sign-up
pub const SIGNED_UP_NOTICE: &str = "Account created, please log in";

/// Active screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    SignUp,
    LogIn,
    Dashboard,
    Exercise,
    Feedback,
}

impl View {
    /// Check if the view is only reachable with a logged-in session
    pub fn requires_session(self) -> bool {
        matches!(self, Self::Dashboard | Self::Exercise | Self::Feedback)
    }
}

/// Login state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Bearer token of the logged-in user
    pub fn token(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.token.as_str())
    }
}

/// Identity of an issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub epoch: u64,
    pub seq: u64,
}

/// Request state of a single screen-level action
#[derive(Debug, Clone, PartialEq)]
pub enum Remote<T> {
    Idle,
    Loading(Ticket),
    Ready(T),
    Failed(ClientError),
}

impl<T> Default for Remote<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> Remote<T> {
    /// Check if a completion for `ticket` is still wanted
    pub fn accepts(&self, ticket: Ticket) -> bool {
        matches!(self, Self::Loading(pending) if *pending == ticket)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ClientError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }

    fn settle(&mut self, result: Result<T, ClientError>) {
        *self = match result {
            Ok(value) => Self::Ready(value),
            Err(err) => Self::Failed(err),
        };
    }

    /// Forget an in-flight request; its completion will be discarded
    fn abandon(&mut self) {
        if self.is_loading() {
            *self = Self::Idle;
        }
    }
}

/// Feedback polling bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl PollPolicy {
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts: max_attempts.max(1),
        }
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::from(&ClientConfig::default())
    }
}

impl From<&ClientConfig> for PollPolicy {
    fn from(config: &ClientConfig) -> Self {
        Self::new(config.poll_interval, config.max_poll_attempts)
    }
}

/// Inputs to the controller
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    SignUpSubmitted(SignUpForm),
    LogInSubmitted(Credentials),
    LogInCompleted {
        ticket: Ticket,
        result: Result<User, ClientError>,
    },
    LoggedOut,
    /// Server-side session teardown finished; the model is already reset
    LogOutCompleted {
        ticket: Ticket,
        result: Result<(), ClientError>,
    },
    NavigateTo(View),
    DashboardLoaded {
        ticket: Ticket,
        result: Result<Dashboard, ClientError>,
    },
    ProblemSelected(Problem),
    CodeEdited(String),
    RunRequested,
    RunCompleted {
        ticket: Ticket,
        result: Result<RunReport, ClientError>,
    },
    SubmitRequested,
    SubmitCompleted {
        ticket: Ticket,
        result: Result<SubmissionReceipt, ClientError>,
    },
    FeedbackPolled {
        ticket: Ticket,
        result: Result<FeedbackStatus, ClientError>,
    },
    /// Re-issue the failed action of the current screen
    Retry,
}

/// Gateway call requested by the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LogIn {
        ticket: Ticket,
        credentials: Credentials,
    },
    LoadDashboard {
        ticket: Ticket,
        token: String,
    },
    /// Invalidate the token of a session that was just closed
    LogOut {
        ticket: Ticket,
        token: String,
    },
    RunCode {
        ticket: Ticket,
        code: String,
        problem_id: String,
    },
    SubmitCode {
        ticket: Ticket,
        code: String,
        problem_id: String,
        token: Option<String>,
    },
    FetchFeedback {
        ticket: Ticket,
        submission_id: String,
        /// Wait before asking, used between polls
        delay: Duration,
    },
}

impl Effect {
    pub fn ticket(&self) -> Ticket {
        match self {
            Self::LogIn { ticket, .. }
            | Self::LoadDashboard { ticket, .. }
            | Self::LogOut { ticket, .. }
            | Self::RunCode { ticket, .. }
            | Self::SubmitCode { ticket, .. }
            | Self::FetchFeedback { ticket, .. } => *ticket,
        }
    }

    pub fn kind(&self) -> EffectKind {
        match self {
            Self::LogIn { .. } => EffectKind::LogIn,
            Self::LoadDashboard { .. } => EffectKind::LoadDashboard,
            Self::LogOut { .. } => EffectKind::LogOut,
            Self::RunCode { .. } => EffectKind::RunCode,
            Self::SubmitCode { .. } => EffectKind::SubmitCode,
            Self::FetchFeedback { .. } => EffectKind::FetchFeedback,
        }
    }
}

/// Effect discriminant, kept by the driver to report lost tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    LogIn,
    LoadDashboard,
    LogOut,
    RunCode,
    SubmitCode,
    FetchFeedback,
}

impl EffectKind {
    /// Completion event reporting `error` for an effect of this kind
    pub fn failed(self, ticket: Ticket, error: ClientError) -> Event {
        match self {
            Self::LogIn => Event::LogInCompleted {
                ticket,
                result: Err(error),
            },
            Self::LoadDashboard => Event::DashboardLoaded {
                ticket,
                result: Err(error),
            },
            Self::LogOut => Event::LogOutCompleted {
                ticket,
                result: Err(error),
            },
            Self::RunCode => Event::RunCompleted {
                ticket,
                result: Err(error),
            },
            Self::SubmitCode => Event::SubmitCompleted {
                ticket,
                result: Err(error),
            },
            Self::FetchFeedback => Event::FeedbackPolled {
                ticket,
                result: Err(error),
            },
        }
    }
}

/// Event refused because its precondition does not hold
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejected {
    #[error("{0:?} requires a logged-in session")]
    NotLoggedIn(View),

    #[error("{0:?} is not available while logged in")]
    AlreadyLoggedIn(View),

    #[error("event only accepted on the {expected:?} screen, current screen is {actual:?}")]
    WrongView { expected: View, actual: View },

    #[error("no problem selected")]
    NoProblem,

    #[error("nothing to retry")]
    NothingToRetry,
}

/// Complete client state
#[derive(Debug, Clone)]
pub struct Model {
    view: View,
    session: Session,
    problem: Option<Problem>,
    submission: Option<Submission>,
    code: String,
    /// Code captured when the pending submit was issued
    submitted_code: Option<String>,
    credentials: Option<Credentials>,
    notice: Option<String>,
    signup_error: Option<ClientError>,
    login: Remote<User>,
    dashboard: Remote<Dashboard>,
    run: Remote<RunReport>,
    submit: Remote<SubmissionReceipt>,
    feedback: Remote<Feedback>,
    polls: u32,
    policy: PollPolicy,
    epoch: u64,
    seq: u64,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    /// Fresh model on the sign-up screen
    pub fn new() -> Self {
        Self {
            view: View::SignUp,
            session: Session::default(),
            problem: None,
            submission: None,
            code: String::new(),
            submitted_code: None,
            credentials: None,
            notice: None,
            signup_error: None,
            login: Remote::Idle,
            dashboard: Remote::Idle,
            run: Remote::Idle,
            submit: Remote::Idle,
            feedback: Remote::Idle,
            polls: 0,
            policy: PollPolicy::default(),
            epoch: 0,
            seq: 0,
        }
    }

    /// Fresh model on a chosen entry screen
    ///
    /// Views that need a session cannot be entered before login, so they fall
    /// back to sign-up.
    pub fn starting_at(view: View) -> Self {
        let mut model = Self::new();
        if !view.requires_session() {
            model.view = view;
        }
        model
    }

    pub fn with_poll_policy(mut self, policy: PollPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn problem(&self) -> Option<&Problem> {
        self.problem.as_ref()
    }

    pub fn submission(&self) -> Option<&Submission> {
        self.submission.as_ref()
    }

    /// Editor contents
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn signup_error(&self) -> Option<&ClientError> {
        self.signup_error.as_ref()
    }

    pub fn login(&self) -> &Remote<User> {
        &self.login
    }

    pub fn dashboard(&self) -> &Remote<Dashboard> {
        &self.dashboard
    }

    pub fn run(&self) -> &Remote<RunReport> {
        &self.run
    }

    pub fn submit(&self) -> &Remote<SubmissionReceipt> {
        &self.submit
    }

    pub fn feedback(&self) -> &Remote<Feedback> {
        &self.feedback
    }

    /// Feedback fetches answered with "pending" so far
    pub fn feedback_polls(&self) -> u32 {
        self.polls
    }

    pub fn poll_policy(&self) -> PollPolicy {
        self.policy
    }

    /// Apply an event
    ///
    /// A rejected event leaves the model untouched.
    pub fn update(&mut self, event: Event) -> Result<Option<Effect>, Rejected> {
        match event {
            Event::SignUpSubmitted(form) => self.sign_up(form),
            Event::LogInSubmitted(credentials) => self.log_in(credentials),
            Event::LogInCompleted { ticket, result } => Ok(self.log_in_completed(ticket, result)),
            Event::LoggedOut => Ok(self.log_out()),
            Event::LogOutCompleted { ticket, result } => {
                match result {
                    Ok(()) => debug!(seq = ticket.seq, "Session closed on the server"),
                    Err(err) => warn!(seq = ticket.seq, error = %err, "Server logout failed"),
                }
                Ok(None)
            }
            Event::NavigateTo(view) => self.navigate(view),
            Event::DashboardLoaded { ticket, result } => {
                if self.dashboard.accepts(ticket) {
                    self.dashboard.settle(result);
                } else {
                    discard("dashboard", ticket);
                }
                Ok(None)
            }
            Event::ProblemSelected(problem) => {
                self.expect_view(View::Dashboard)?;
                self.problem = Some(problem);
                self.code = STARTER_CODE.to_string();
                self.run = Remote::Idle;
                self.submit = Remote::Idle;
                Ok(self.enter(View::Exercise))
            }
            Event::CodeEdited(code) => {
                self.expect_exercise()?;
                self.code = code;
                Ok(None)
            }
            Event::RunRequested => self.start_run(),
            Event::RunCompleted { ticket, result } => {
                if self.run.accepts(ticket) {
                    self.run.settle(result);
                } else {
                    discard("run", ticket);
                }
                Ok(None)
            }
            Event::SubmitRequested => self.start_submit(),
            Event::SubmitCompleted { ticket, result } => Ok(self.submit_completed(ticket, result)),
            Event::FeedbackPolled { ticket, result } => Ok(self.feedback_polled(ticket, result)),
            Event::Retry => self.retry(),
        }
    }

    fn sign_up(&mut self, form: SignUpForm) -> Result<Option<Effect>, Rejected> {
        self.expect_view(View::SignUp)?;

        if let Err(message) = validate_sign_up(&form) {
            self.signup_error = Some(ClientError::Validation(message.to_string()));
            return Ok(None);
        }

        self.signup_error = None;
        self.notice = Some(SIGNED_UP_NOTICE.to_string());
        Ok(self.enter(View::LogIn))
    }

    fn log_in(&mut self, credentials: Credentials) -> Result<Option<Effect>, Rejected> {
        self.expect_view(View::LogIn)?;
        if self.login.is_loading() {
            debug!(slot = "login", "Request already in flight");
            return Ok(None);
        }

        if let Err(message) = validate_email(&credentials.email) {
            self.login = Remote::Failed(ClientError::Validation(message.to_string()));
            self.credentials = None;
            return Ok(None);
        }

        let ticket = self.next_ticket();
        self.login = Remote::Loading(ticket);
        self.credentials = Some(credentials.clone());
        Ok(Some(Effect::LogIn {
            ticket,
            credentials,
        }))
    }

    fn log_in_completed(&mut self, ticket: Ticket, result: Result<User, ClientError>) -> Option<Effect> {
        if !self.login.accepts(ticket) {
            discard("login", ticket);
            return None;
        }

        match result {
            Ok(user) => {
                self.login = Remote::Idle;
                self.credentials = None;
                self.notice = None;
                self.session.user = Some(user);
                self.enter(View::Dashboard)
            }
            Err(err) => {
                self.login = Remote::Failed(err);
                None
            }
        }
    }

    fn log_out(&mut self) -> Option<Effect> {
        let token = self.session.user.take().map(|user| user.token);
        self.problem = None;
        self.submission = None;
        self.code.clear();
        self.submitted_code = None;
        self.credentials = None;
        self.notice = None;
        self.signup_error = None;
        self.login = Remote::Idle;
        self.dashboard = Remote::Idle;
        self.run = Remote::Idle;
        self.submit = Remote::Idle;
        self.feedback = Remote::Idle;
        self.polls = 0;
        // Entering login never loads anything
        let _ = self.enter(View::LogIn);

        let token = token?;
        Some(Effect::LogOut {
            ticket: self.next_ticket(),
            token,
        })
    }

    fn navigate(&mut self, view: View) -> Result<Option<Effect>, Rejected> {
        let logged_in = self.session.is_logged_in();
        if view.requires_session() && !logged_in {
            return Err(Rejected::NotLoggedIn(view));
        }
        if !view.requires_session() && logged_in {
            return Err(Rejected::AlreadyLoggedIn(view));
        }

        if !view.requires_session() {
            self.login = Remote::Idle;
            self.signup_error = None;
        }
        Ok(self.enter(view))
    }

    fn start_run(&mut self) -> Result<Option<Effect>, Rejected> {
        let problem_id = self.expect_exercise()?.id.clone();
        if self.run.is_loading() {
            debug!(slot = "run", "Request already in flight");
            return Ok(None);
        }

        if let Err(message) = validate_source_code(&self.code) {
            self.run = Remote::Failed(ClientError::Validation(message.to_string()));
            return Ok(None);
        }

        let ticket = self.next_ticket();
        self.run = Remote::Loading(ticket);
        Ok(Some(Effect::RunCode {
            ticket,
            code: self.code.clone(),
            problem_id,
        }))
    }

    fn start_submit(&mut self) -> Result<Option<Effect>, Rejected> {
        let problem_id = self.expect_exercise()?.id.clone();
        if self.submit.is_loading() {
            debug!(slot = "submit", "Request already in flight");
            return Ok(None);
        }

        if let Err(message) = validate_source_code(&self.code) {
            self.submit = Remote::Failed(ClientError::Validation(message.to_string()));
            return Ok(None);
        }

        let ticket = self.next_ticket();
        self.submit = Remote::Loading(ticket);
        self.submitted_code = Some(self.code.clone());
        Ok(Some(Effect::SubmitCode {
            ticket,
            code: self.code.clone(),
            problem_id,
            token: self.session.token().map(str::to_string),
        }))
    }

    fn submit_completed(
        &mut self,
        ticket: Ticket,
        result: Result<SubmissionReceipt, ClientError>,
    ) -> Option<Effect> {
        if !self.submit.accepts(ticket) {
            discard("submit", ticket);
            return None;
        }

        let receipt = match result {
            Ok(receipt) => receipt,
            Err(err) => {
                self.submit = Remote::Failed(err);
                self.submitted_code = None;
                return None;
            }
        };

        let problem_id = self.problem.as_ref().map(|p| p.id.clone()).unwrap_or_default();
        let code = self.submitted_code.take().unwrap_or_else(|| self.code.clone());
        self.submission = Some(Submission {
            code,
            problem_id,
            submission_id: receipt.submission_id,
        });
        self.submit = Remote::Idle;
        self.enter(View::Feedback)
    }

    fn feedback_polled(
        &mut self,
        ticket: Ticket,
        result: Result<FeedbackStatus, ClientError>,
    ) -> Option<Effect> {
        if !self.feedback.accepts(ticket) {
            discard("feedback", ticket);
            return None;
        }

        match result {
            Ok(FeedbackStatus::Ready(feedback)) => {
                self.feedback = Remote::Ready(feedback);
                None
            }
            Ok(FeedbackStatus::Pending) => {
                self.polls += 1;
                if self.polls >= self.policy.max_attempts {
                    self.feedback = Remote::Failed(ClientError::Network(format!(
                        "Feedback not ready after {} attempts",
                        self.polls
                    )));
                    None
                } else {
                    self.fetch_feedback(self.policy.interval)
                }
            }
            Err(err) => {
                self.feedback = Remote::Failed(err);
                None
            }
        }
    }

    fn retry(&mut self) -> Result<Option<Effect>, Rejected> {
        match self.view {
            View::LogIn if self.login.is_failed() => match self.credentials.clone() {
                Some(credentials) => {
                    self.login = Remote::Idle;
                    self.log_in(credentials)
                }
                None => Err(Rejected::NothingToRetry),
            },
            View::Dashboard if self.dashboard.is_failed() => Ok(self.load_dashboard()),
            View::Exercise if self.submit.is_failed() => self.start_submit(),
            View::Exercise if self.run.is_failed() => self.start_run(),
            View::Feedback if self.feedback.is_failed() && self.submission.is_some() => {
                self.polls = 0;
                Ok(self.fetch_feedback(Duration::ZERO))
            }
            _ => Err(Rejected::NothingToRetry),
        }
    }

    /// Switch views and start whatever the new view loads on entry
    fn enter(&mut self, view: View) -> Option<Effect> {
        self.epoch += 1;
        self.login.abandon();
        self.dashboard.abandon();
        self.run.abandon();
        self.submit.abandon();
        self.feedback.abandon();
        self.submitted_code = None;
        self.view = view;

        match view {
            View::Dashboard => {
                self.problem = None;
                self.submission = None;
                self.feedback = Remote::Idle;
                self.load_dashboard()
            }
            View::Feedback => {
                self.polls = 0;
                self.fetch_feedback(Duration::ZERO)
            }
            View::SignUp | View::LogIn | View::Exercise => None,
        }
    }

    fn load_dashboard(&mut self) -> Option<Effect> {
        let token = self.session.token()?.to_string();
        let ticket = self.next_ticket();
        self.dashboard = Remote::Loading(ticket);
        Some(Effect::LoadDashboard { ticket, token })
    }

    fn fetch_feedback(&mut self, delay: Duration) -> Option<Effect> {
        let Some(submission_id) = self.submission.as_ref().map(|s| s.submission_id.clone()) else {
            self.feedback = Remote::Failed(ClientError::NoSelection("No submission found".to_string()));
            return None;
        };

        let ticket = self.next_ticket();
        self.feedback = Remote::Loading(ticket);
        Some(Effect::FetchFeedback {
            ticket,
            submission_id,
            delay,
        })
    }

    fn next_ticket(&mut self) -> Ticket {
        self.seq += 1;
        Ticket {
            epoch: self.epoch,
            seq: self.seq,
        }
    }

    fn expect_view(&self, expected: View) -> Result<(), Rejected> {
        if self.view == expected {
            Ok(())
        } else {
            Err(Rejected::WrongView {
                expected,
                actual: self.view,
            })
        }
    }

    fn expect_exercise(&self) -> Result<&Problem, Rejected> {
        self.expect_view(View::Exercise)?;
        self.problem.as_ref().ok_or(Rejected::NoProblem)
    }
}

fn validate_sign_up(form: &SignUpForm) -> Result<(), &'static str> {
    if form.name.trim().is_empty() {
        return Err("Name is required");
    }
    validate_email(&form.email)?;
    if form.password.is_empty() {
        return Err("Password is required");
    }
    Ok(())
}

fn discard(slot: &str, ticket: Ticket) {
    debug!(slot, epoch = ticket.epoch, seq = ticket.seq, "Discarding stale response");
}
