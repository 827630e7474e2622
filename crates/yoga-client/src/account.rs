use std::path::PathBuf;

use yoga_model::{LoginRequest, SignupRequest, User};

use crate::client::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::store::SessionStore;

/// Where the UI should go after a flow completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Root,
    Login,
    Sessions,
}

/// Client handle plus the persisted login state.
#[derive(Debug)]
pub struct YogaApp {
    client: ApiClient,
    store: SessionStore,
}

impl YogaApp {
    /// Open the store at `storage` and, when a record was persisted, resume
    /// with its bearer token.
    pub fn open(base_url: impl Into<String>, storage: impl Into<PathBuf>) -> ClientResult<Self> {
        let store = SessionStore::open(storage)?;
        let mut client = ApiClient::new(base_url);
        client.set_token(store.information().map(|info| info.token.clone()));
        Ok(Self { client, store })
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn is_logged(&self) -> bool {
        self.store.is_logged()
    }

    pub fn is_admin(&self) -> bool {
        self.store.information().is_some_and(|info| info.admin)
    }

    pub(crate) fn current_user_id(&self) -> ClientResult<i64> {
        self.store
            .information()
            .map(|info| info.id)
            .ok_or(ClientError::NotLoggedIn)
    }

    pub async fn login(&mut self, email: &str, password: &str) -> ClientResult<Route> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        body.validate()?;

        let information = self.client.login(&body).await?;
        let token = information.token.clone();
        self.store.log_in(information)?;
        self.client.set_token(Some(token));
        Ok(Route::Sessions)
    }

    /// Registration does not log in.
    pub async fn register(&self, body: &SignupRequest) -> ClientResult<Route> {
        body.validate()?;
        self.client.register(body).await?;
        Ok(Route::Login)
    }

    pub fn logout(&mut self) -> ClientResult<Route> {
        self.store.log_out()?;
        self.client.set_token(None);
        Ok(Route::Root)
    }

    pub async fn me(&self) -> ClientResult<User> {
        self.client.user(self.current_user_id()?).await
    }

    pub async fn delete_account(&mut self) -> ClientResult<Route> {
        let id = self.current_user_id()?;
        self.client.delete_user(id).await?;
        tracing::info!(user_id = id, "Account deleted");
        self.logout()
    }
}
