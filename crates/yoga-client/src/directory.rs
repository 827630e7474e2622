use yoga_model::{Session, SessionRequest};

use crate::client::ApiClient;
use crate::error::ClientResult;

/// Last fetched session list. Replaced wholesale on every refresh.
#[derive(Debug, Default)]
pub struct SessionDirectory {
    sessions: Vec<Session>,
}

impl SessionDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub async fn list_all(&mut self, client: &ApiClient) -> ClientResult<&[Session]> {
        self.sessions = client.sessions().await?;
        Ok(&self.sessions)
    }

    pub async fn get_by_id(&self, client: &ApiClient, id: i64) -> ClientResult<Session> {
        client.session(id).await
    }

    pub async fn create(&mut self, client: &ApiClient, body: &SessionRequest) -> ClientResult<Session> {
        let created = client.create_session(body).await?;
        self.list_all(client).await?;
        Ok(created)
    }

    pub async fn update(
        &mut self,
        client: &ApiClient,
        id: i64,
        body: &SessionRequest,
    ) -> ClientResult<Session> {
        let updated = client.update_session(id, body).await?;
        self.list_all(client).await?;
        Ok(updated)
    }

    pub async fn delete(&mut self, client: &ApiClient, id: i64) -> ClientResult<()> {
        client.delete_session(id).await?;
        self.list_all(client).await?;
        Ok(())
    }
}
