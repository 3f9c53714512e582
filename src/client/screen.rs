//! Screen rendering
//!
//! [`render`] turns a `&Model` into a [`Frame`]: plain data describing what is
//! on screen and which actions are offered. Nothing here mutates the model;
//! an [`Action`] is turned back into an [`Event`] with [`Action::event`].

use crate::models::{Difficulty, Feedback, Problem, Recommendation, RunReport};

use super::{
    controller::{Event, Model, Remote, View},
    error::ClientError,
};

/// Everything visible for one model state
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Present whenever the session is logged in
    pub navbar: Option<Navbar>,
    pub screen: Screen,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Navbar {
    pub user_name: String,
    pub controls: Vec<Control>,
}

/// Something the user can trigger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Submit the sign-up form
    SignUp,
    /// Submit the login form
    LogIn,
    NavigateTo(View),
    SelectProblem(String),
    Run,
    Submit,
    Retry,
    LogOut,
}

impl Action {
    /// Event for this action, when it needs no form input
    pub fn event(&self, model: &Model) -> Option<Event> {
        match self {
            Self::SignUp | Self::LogIn => None,
            Self::NavigateTo(view) => Some(Event::NavigateTo(*view)),
            Self::SelectProblem(id) => model
                .dashboard()
                .ready()
                .and_then(|d| d.problems.iter().find(|p| &p.id == id))
                .cloned()
                .map(Event::ProblemSelected),
            Self::Run => Some(Event::RunRequested),
            Self::Submit => Some(Event::SubmitRequested),
            Self::Retry => Some(Event::Retry),
            Self::LogOut => Some(Event::LoggedOut),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub label: String,
    pub action: Action,
    pub enabled: bool,
}

impl Control {
    fn new(label: &str, action: Action) -> Self {
        Self {
            label: label.to_string(),
            action,
            enabled: true,
        }
    }

    fn enabled_if(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Request state as shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Idle,
    Loading { caption: String },
    /// Error message with its single recovery action
    Failed { message: String, action: Action },
}

impl Status {
    fn of<T>(remote: &Remote<T>, caption: &str, recovery: Action) -> Self {
        match remote {
            Remote::Loading(_) => Self::Loading {
                caption: caption.to_string(),
            },
            Remote::Failed(err) => Self::Failed {
                message: message_for(err),
                action: recovery,
            },
            Remote::Idle | Remote::Ready(_) => Self::Idle,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemCard {
    pub title: String,
    pub difficulty: Difficulty,
    pub category: Option<String>,
    pub open: Control,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub percent: u8,
    pub solved: u32,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    SignUp {
        error: Option<String>,
        controls: Vec<Control>,
    },
    LogIn {
        notice: Option<String>,
        status: Status,
        controls: Vec<Control>,
    },
    Dashboard {
        status: Status,
        problems: Vec<ProblemCard>,
        recommendations: Vec<Recommendation>,
        progress: Option<Progress>,
    },
    Exercise {
        problem: Problem,
        code: String,
        run: Status,
        report: Option<RunReport>,
        submit: Status,
        controls: Vec<Control>,
    },
    /// Screen entered without what it needs
    Guard { message: String, action: Action },
    Feedback {
        status: Status,
        feedback: Option<Feedback>,
        controls: Vec<Control>,
    },
}

impl Screen {
    /// Every action reachable from this screen
    pub fn actions(&self) -> Vec<Action> {
        fn from_controls(controls: &[Control]) -> Vec<Action> {
            controls.iter().map(|c| c.action.clone()).collect()
        }

        fn from_status(status: &Status) -> Option<Action> {
            match status {
                Status::Failed { action, .. } => Some(action.clone()),
                _ => None,
            }
        }

        match self {
            Self::SignUp { controls, .. } => from_controls(controls),
            Self::LogIn { status, controls, .. } => {
                let mut actions = from_controls(controls);
                actions.extend(from_status(status));
                actions
            }
            Self::Dashboard { status, problems, .. } => {
                let mut actions: Vec<Action> = problems.iter().map(|p| p.open.action.clone()).collect();
                actions.extend(from_status(status));
                actions
            }
            Self::Exercise {
                run,
                submit,
                controls,
                ..
            } => {
                let mut actions = from_controls(controls);
                actions.extend(from_status(run));
                actions.extend(from_status(submit));
                actions
            }
            Self::Guard { action, .. } => vec![action.clone()],
            Self::Feedback { status, controls, .. } => {
                let mut actions = from_controls(controls);
                actions.extend(from_status(status));
                actions
            }
        }
    }
}

/// Render the model
pub fn render(model: &Model) -> Frame {
    let navbar = model.session().user().map(|user| Navbar {
        user_name: user.name.clone(),
        controls: vec![
            Control::new("Dashboard", Action::NavigateTo(View::Dashboard)),
            Control::new("Log out", Action::LogOut),
        ],
    });

    let screen = match model.view() {
        View::SignUp => Screen::SignUp {
            error: model.signup_error().map(message_for),
            controls: vec![
                Control::new("Sign up", Action::SignUp),
                Control::new("Already have an account? Log in", Action::NavigateTo(View::LogIn)),
            ],
        },
        View::LogIn => {
            let status = Status::of(
                model.login(),
                "Logging in...",
                recovery(model.login(), Action::LogIn),
            );
            let busy = status.is_loading();
            Screen::LogIn {
                notice: model.notice().map(str::to_string),
                status,
                controls: vec![
                    Control::new("Log in", Action::LogIn).enabled_if(!busy),
                    Control::new("Need an account? Sign up", Action::NavigateTo(View::SignUp)),
                ],
            }
        }
        View::Dashboard => render_dashboard(model),
        View::Exercise => match model.problem() {
            Some(problem) => render_exercise(model, problem),
            None => Screen::Guard {
                message: "No problem selected".to_string(),
                action: Action::NavigateTo(View::Dashboard),
            },
        },
        View::Feedback => render_feedback(model),
    };

    Frame { navbar, screen }
}

fn render_dashboard(model: &Model) -> Screen {
    let status = Status::of(model.dashboard(), "Loading dashboard...", Action::Retry);

    match model.dashboard().ready() {
        Some(dashboard) => Screen::Dashboard {
            status,
            problems: dashboard
                .problems
                .iter()
                .map(|p| ProblemCard {
                    title: p.title.clone(),
                    difficulty: p.difficulty,
                    category: p.category.clone(),
                    open: Control::new("Solve", Action::SelectProblem(p.id.clone())),
                })
                .collect(),
            recommendations: dashboard.recommendations.clone(),
            progress: Some(Progress {
                percent: dashboard.progress,
                solved: dashboard.problems_solved,
                total: dashboard.total_problems,
            }),
        },
        None => Screen::Dashboard {
            status,
            problems: Vec::new(),
            recommendations: Vec::new(),
            progress: None,
        },
    }
}

fn render_exercise(model: &Model, problem: &Problem) -> Screen {
    let run = Status::of(model.run(), "Running code...", recovery(model.run(), Action::Run));
    let submit = Status::of(
        model.submit(),
        "Submitting...",
        recovery(model.submit(), Action::Submit),
    );
    let controls = vec![
        Control::new("Run", Action::Run).enabled_if(!run.is_loading()),
        Control::new("Submit", Action::Submit).enabled_if(!submit.is_loading()),
        Control::new("Back to dashboard", Action::NavigateTo(View::Dashboard)),
    ];

    Screen::Exercise {
        problem: problem.clone(),
        code: model.code().to_string(),
        run,
        report: model.run().ready().cloned(),
        submit,
        controls,
    }
}

fn render_feedback(model: &Model) -> Screen {
    // Without a submission there is nothing to retry
    let recovery = if model.submission().is_some() {
        Action::Retry
    } else {
        Action::NavigateTo(View::Dashboard)
    };
    let status = Status::of(model.feedback(), "Analyzing your code...", recovery);

    let controls = match model.feedback() {
        Remote::Ready(_) => vec![Control::new("Back to dashboard", Action::NavigateTo(View::Dashboard))],
        _ => Vec::new(),
    };

    Screen::Feedback {
        status,
        feedback: model.feedback().ready().cloned(),
        controls,
    }
}

/// Recovery for a failed slot
///
/// Invalid input has to be corrected and sent again through `resubmit`;
/// anything else is retried as it was.
fn recovery<T>(remote: &Remote<T>, resubmit: Action) -> Action {
    match remote.error() {
        Some(ClientError::Validation(_)) => resubmit,
        _ => Action::Retry,
    }
}

fn message_for(err: &ClientError) -> String {
    match err {
        ClientError::Network(_) => format!("Could not reach the server. {}", err),
        _ => err.to_string(),
    }
}
