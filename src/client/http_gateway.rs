//! HTTP gateway backed by the stub API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    config::ClientConfig,
    constants::API_BASE_PATH,
    error::ErrorResponse,
    handlers::{
        auth::{LoginRequest, LoginResponse},
        submissions::{CodeRequest, CreateSubmissionResponse},
    },
    models::{Dashboard, Feedback, FeedbackStatus, RunReport, SubmissionReceipt, User},
    utils::validate_submission_id,
};

use super::{
    api_base::BaseUrlSources,
    error::ClientError,
    gateway::{Credentials, Gateway},
};

/// Gateway speaking JSON over HTTP
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    /// Create a gateway for an explicit base URL
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Create a gateway whose base URL is resolved from the environment
    pub fn from_env(config: &ClientConfig, page_origin: Option<&str>) -> Result<Self, ClientError> {
        let base_url = BaseUrlSources::from_env(page_origin).resolve();
        debug!(base_url = %base_url, "Resolved API base URL");
        Self::new(base_url, config.request_timeout)
    }

    /// The resolved base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_BASE_PATH, path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send().await?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(error_from_response(response).await)
        }
    }

    async fn json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        Ok(self.send(request).await?.json::<T>().await?)
    }
}

/// Map a non-2xx response onto the client taxonomy
async fn error_from_response(response: Response) -> ClientError {
    let status = response.status();
    let message = match response.json::<ErrorResponse>().await {
        Ok(body) => body.error.message,
        Err(_) => format!("request failed with status {}", status.as_u16()),
    };

    match status {
        StatusCode::BAD_REQUEST => ClientError::Validation(message),
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        _ => ClientError::Network(format!("{} ({})", message, status.as_u16())),
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn log_in(&self, credentials: &Credentials) -> Result<User, ClientError> {
        let body = LoginRequest {
            email: credentials.email.clone(),
            password: credentials.password.clone(),
        };

        let response: LoginResponse = self
            .json(self.client.post(self.url("/login")).json(&body))
            .await?;
        Ok(response.user)
    }

    async fn log_out(&self, token: &str) -> Result<(), ClientError> {
        self.send(self.client.post(self.url("/logout")).bearer_auth(token))
            .await?;
        Ok(())
    }

    async fn load_dashboard(&self, token: &str) -> Result<Dashboard, ClientError> {
        self.json(self.client.get(self.url("/dashboard")).bearer_auth(token))
            .await
    }

    async fn run_code(&self, code: &str, problem_id: &str) -> Result<RunReport, ClientError> {
        let body = CodeRequest {
            code: code.to_string(),
            problem_id: problem_id.to_string(),
        };
        self.json(self.client.post(self.url("/run")).json(&body)).await
    }

    async fn submit_code(
        &self,
        code: &str,
        problem_id: &str,
        token: Option<&str>,
    ) -> Result<SubmissionReceipt, ClientError> {
        let body = CodeRequest {
            code: code.to_string(),
            problem_id: problem_id.to_string(),
        };

        let mut request = self.client.post(self.url("/submit")).json(&body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response: CreateSubmissionResponse = self.json(request).await?;
        Ok(SubmissionReceipt {
            submission_id: response.submission_id,
        })
    }

    async fn get_feedback(&self, submission_id: &str) -> Result<FeedbackStatus, ClientError> {
        validate_submission_id(submission_id)?;

        let request = self
            .client
            .get(self.url(&format!("/feedback/{}", submission_id)));
        let response = self.send(request).await?;

        if response.status() == StatusCode::ACCEPTED {
            return Ok(FeedbackStatus::Pending);
        }

        Ok(FeedbackStatus::Ready(response.json::<Feedback>().await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building() {
        let gateway = HttpGateway::new("http://localhost:3000", Duration::from_secs(1)).unwrap();
        assert_eq!(gateway.url("/feedback/abc123"), "http://localhost:3000/api/feedback/abc123");
        assert_eq!(gateway.base_url(), "http://localhost:3000");
    }

    #[tokio::test]
    async fn test_bad_ids_rejected_without_request() {
        // Port 9 (discard) is never contacted: validation fails first
        let gateway = HttpGateway::new("http://127.0.0.1:9", Duration::from_millis(50)).unwrap();
        assert!(matches!(
            gateway.get_feedback("not/valid").await,
            Err(ClientError::NotFound(_))
        ));
        assert!(matches!(
            gateway.get_feedback("").await,
            Err(ClientError::Validation(_))
        ));
    }
}
