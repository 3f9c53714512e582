//! Client gateways and the async driver against a live stub server

mod common;

use std::time::Duration;

use codementor::{
    client::{
        App, ClientError, Credentials, Event, FallbackGateway, Gateway, HttpGateway, MockGateway,
        Model, PollPolicy, Screen, View,
    },
    config::{ClientConfig, Config},
    fixtures,
    models::{FeedbackStatus, Severity},
};

use common::spawn_server;

fn gateway(base_url: &str) -> HttpGateway {
    HttpGateway::new(base_url, Duration::from_secs(5)).unwrap()
}

fn credentials(email: &str) -> Credentials {
    Credentials {
        email: email.to_string(),
        password: "pw".to_string(),
    }
}

#[tokio::test]
async fn http_gateway_sample_feedback() {
    let base_url = spawn_server(Config::default()).await;
    let gateway = gateway(&base_url);

    let FeedbackStatus::Ready(feedback) = gateway.get_feedback("abc123").await.unwrap() else {
        panic!("sample feedback should be ready");
    };
    assert_eq!(feedback.score, 85);
    assert_eq!(feedback.issues.len(), 1);
    assert_eq!(feedback.issues[0].severity, Severity::Medium);
}

#[tokio::test]
async fn http_gateway_error_mapping() {
    let base_url = spawn_server(Config::default()).await;
    let gateway = gateway(&base_url);

    assert!(matches!(
        gateway.get_feedback("never-issued").await,
        Err(ClientError::NotFound(_))
    ));
    assert!(matches!(
        gateway.run_code("x", "no-such-problem").await,
        Err(ClientError::NotFound(_))
    ));
    assert!(matches!(
        gateway.submit_code("  ", "two-sum", None).await,
        Err(ClientError::Validation(_))
    ));
    // 401 is not part of the client taxonomy and surfaces as a transport failure
    assert!(matches!(
        gateway.load_dashboard("made-up").await,
        Err(ClientError::Network(_))
    ));
}

#[tokio::test]
async fn http_gateway_submit_then_feedback() {
    let base_url = spawn_server(Config::default()).await;
    let gateway = gateway(&base_url);

    let user = gateway.log_in(&credentials("a@b.com")).await.unwrap();
    assert_eq!(user.name, "a");

    let receipt = gateway
        .submit_code("if not nums: return []", "two-sum", Some(&user.token))
        .await
        .unwrap();
    let FeedbackStatus::Ready(feedback) = gateway.get_feedback(&receipt.submission_id).await.unwrap()
    else {
        panic!("feedback should be ready without a configured delay");
    };
    assert_eq!(feedback.submission_id, receipt.submission_id);

    assert_eq!(feedback.score, 100);

    let dashboard = gateway.load_dashboard(&user.token).await.unwrap();
    assert_eq!(dashboard.problems_solved, 1);

    gateway.log_out(&user.token).await.unwrap();
    assert!(matches!(
        gateway.load_dashboard(&user.token).await,
        Err(ClientError::Network(_))
    ));
}

#[tokio::test]
async fn http_gateway_reports_pending() {
    let mut config = Config::default();
    config.feedback.delay_ms = 60_000;
    let base_url = spawn_server(config).await;
    let gateway = gateway(&base_url);

    let receipt = gateway.submit_code("x", "two-sum", None).await.unwrap();
    assert_eq!(
        gateway.get_feedback(&receipt.submission_id).await.unwrap(),
        FeedbackStatus::Pending
    );
}

#[tokio::test]
async fn app_end_to_end_over_http() {
    let base_url = spawn_server(Config::default()).await;
    let config = ClientConfig {
        request_timeout: Duration::from_secs(5),
        poll_interval: Duration::from_millis(10),
        max_poll_attempts: 3,
    };
    let mut app = App::new(gateway(&base_url), &config);

    app.dispatch(Event::NavigateTo(View::LogIn)).unwrap();
    app.dispatch(Event::LogInSubmitted(credentials("a@b.com"))).unwrap();
    app.settle().await;

    assert_eq!(app.model().view(), View::Dashboard);
    assert_eq!(app.frame().navbar.map(|n| n.user_name), Some("a".to_string()));
    let problem = app.model().dashboard().ready().unwrap().problems[0].clone();

    app.dispatch(Event::ProblemSelected(problem)).unwrap();
    app.dispatch(Event::CodeEdited("if (!nums.length) return [];".into())).unwrap();
    app.dispatch(Event::RunRequested).unwrap();
    app.settle().await;
    assert!(app.model().run().ready().unwrap().all_passed());

    app.dispatch(Event::SubmitRequested).unwrap();
    app.settle().await;

    assert_eq!(app.model().view(), View::Feedback);
    let submission_id = app.model().submission().unwrap().submission_id.clone();
    let Screen::Feedback { feedback, .. } = app.frame().screen else {
        panic!("expected feedback screen");
    };
    assert_eq!(feedback.map(|f| f.submission_id), Some(submission_id));

    let token = app.model().session().user().map(|u| u.token.clone()).unwrap();
    app.dispatch(Event::LoggedOut).unwrap();
    assert_eq!(app.model().view(), View::LogIn);
    assert!(app.model().submission().is_none());
    assert!(app.frame().navbar.is_none());

    // The server forgets the token once the logout call lands
    app.settle().await;
    assert_eq!(app.model().view(), View::LogIn);
    assert!(matches!(
        gateway(&base_url).load_dashboard(&token).await,
        Err(ClientError::Network(_))
    ));
}

#[tokio::test]
async fn app_polls_pending_feedback_until_limit() {
    let mut config = Config::default();
    config.feedback.delay_ms = 60_000;
    let base_url = spawn_server(config).await;

    let model = Model::starting_at(View::LogIn)
        .with_poll_policy(PollPolicy::new(Duration::from_millis(5), 2));
    let mut app = App::with_model(gateway(&base_url), model, Duration::from_secs(5));

    app.dispatch(Event::LogInSubmitted(credentials("a@b.com"))).unwrap();
    app.settle().await;
    app.dispatch(Event::ProblemSelected(fixtures::problem("two-sum").unwrap()))
        .unwrap();
    app.dispatch(Event::CodeEdited("x".into())).unwrap();
    app.dispatch(Event::SubmitRequested).unwrap();
    app.settle().await;

    assert_eq!(app.model().view(), View::Feedback);
    assert!(app.model().feedback().is_failed());
    assert_eq!(app.model().feedback_polls(), 2);
}

#[tokio::test]
async fn fallback_login_without_backend() {
    // Nothing listens on the discard port
    let primary = HttpGateway::new("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();
    let gateway = FallbackGateway::new(primary, MockGateway::new());

    let mut app = App::with_model(gateway, Model::starting_at(View::LogIn), Duration::from_secs(2));
    app.dispatch(Event::LogInSubmitted(credentials("a@b.com"))).unwrap();
    app.settle().await;

    assert_eq!(app.model().view(), View::Dashboard);
    assert_eq!(
        app.model().session().user().map(|u| u.name.as_str()),
        Some("a")
    );
    assert!(app.model().dashboard().ready().is_some());
    assert_eq!(app.gateway().fallback().calls().load_dashboard, 1);
}
