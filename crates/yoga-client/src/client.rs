use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use yoga_model::{
    LoginRequest, MessageResponse, Session, SessionInformation, SessionRequest, SignupRequest,
    Teacher, User,
};

use crate::error::{ClientError, ClientResult};

/// Thin wrapper over the REST endpoints. Holds the bearer token once logged in.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{path}", self.base_url));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn check(response: Response) -> ClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = match response.json::<MessageResponse>().await {
            Ok(body) => body.message,
            Err(_) => status.canonical_reason().unwrap_or_default().to_string(),
        };
        tracing::debug!(status = status.as_u16(), %message, "Request rejected");
        Err(ClientError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> ClientResult<T> {
        let response = Self::check(builder.send().await?).await?;
        Ok(response.json().await?)
    }

    async fn send_empty(builder: RequestBuilder) -> ClientResult<()> {
        Self::check(builder.send().await?).await?;
        Ok(())
    }

    // Auth

    pub async fn login(&self, body: &LoginRequest) -> ClientResult<SessionInformation> {
        Self::send_json(self.request(Method::POST, "/api/auth/login").json(body)).await
    }

    pub async fn register(&self, body: &SignupRequest) -> ClientResult<MessageResponse> {
        Self::send_json(self.request(Method::POST, "/api/auth/register").json(body)).await
    }

    // Sessions

    pub async fn sessions(&self) -> ClientResult<Vec<Session>> {
        Self::send_json(self.request(Method::GET, "/api/session")).await
    }

    pub async fn session(&self, id: i64) -> ClientResult<Session> {
        Self::send_json(self.request(Method::GET, &format!("/api/session/{id}"))).await
    }

    pub async fn create_session(&self, body: &SessionRequest) -> ClientResult<Session> {
        Self::send_json(self.request(Method::POST, "/api/session").json(body)).await
    }

    pub async fn update_session(&self, id: i64, body: &SessionRequest) -> ClientResult<Session> {
        Self::send_json(
            self.request(Method::PUT, &format!("/api/session/{id}"))
                .json(body),
        )
        .await
    }

    pub async fn delete_session(&self, id: i64) -> ClientResult<()> {
        Self::send_empty(self.request(Method::DELETE, &format!("/api/session/{id}"))).await
    }

    pub async fn participate(&self, id: i64, user_id: i64) -> ClientResult<()> {
        Self::send_empty(self.request(
            Method::POST,
            &format!("/api/session/{id}/participate/{user_id}"),
        ))
        .await
    }

    pub async fn unparticipate(&self, id: i64, user_id: i64) -> ClientResult<()> {
        Self::send_empty(self.request(
            Method::DELETE,
            &format!("/api/session/{id}/participate/{user_id}"),
        ))
        .await
    }

    // Teachers

    pub async fn teachers(&self) -> ClientResult<Vec<Teacher>> {
        Self::send_json(self.request(Method::GET, "/api/teacher")).await
    }

    pub async fn teacher(&self, id: i64) -> ClientResult<Teacher> {
        Self::send_json(self.request(Method::GET, &format!("/api/teacher/{id}"))).await
    }

    // Users

    pub async fn users(&self) -> ClientResult<Vec<User>> {
        Self::send_json(self.request(Method::GET, "/api/user")).await
    }

    pub async fn user(&self, id: i64) -> ClientResult<User> {
        Self::send_json(self.request(Method::GET, &format!("/api/user/{id}"))).await
    }

    pub async fn delete_user(&self, id: i64) -> ClientResult<()> {
        Self::send_empty(self.request(Method::DELETE, &format!("/api/user/{id}"))).await
    }
}
