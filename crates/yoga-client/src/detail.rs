use yoga_model::{Session, Teacher};

use crate::account::{Route, YogaApp};
use crate::error::ClientResult;

/// A session as seen by the logged-in user.
#[derive(Debug, Clone)]
pub struct SessionDetail {
    pub session: Session,
    pub teacher: Teacher,
    /// Whether the current user is in the participant list. Drives the
    /// participate / unparticipate affordance.
    pub is_participate: bool,
    pub is_admin: bool,
    user_id: i64,
}

impl SessionDetail {
    pub async fn load(app: &YogaApp, id: i64) -> ClientResult<Self> {
        let user_id = app.current_user_id()?;
        let session = app.client().session(id).await?;
        let teacher = app.client().teacher(session.teacher_id).await?;
        Ok(Self {
            is_participate: session.is_participant(user_id),
            is_admin: app.is_admin(),
            session,
            teacher,
            user_id,
        })
    }

    /// Create, edit and delete affordances are admin-only.
    pub fn can_manage(&self) -> bool {
        self.is_admin
    }

    pub fn attendees(&self) -> usize {
        self.session.users.len()
    }

    /// Refetch the session and recompute membership.
    pub async fn refresh(&mut self, app: &YogaApp) -> ClientResult<()> {
        let session = app.client().session(self.session.id).await?;
        if session.teacher_id != self.teacher.id {
            self.teacher = app.client().teacher(session.teacher_id).await?;
        }
        self.is_participate = session.is_participant(self.user_id);
        self.session = session;
        Ok(())
    }

    pub async fn participate(&mut self, app: &YogaApp) -> ClientResult<()> {
        app.client().participate(self.session.id, self.user_id).await?;
        self.refresh(app).await
    }

    pub async fn un_participate(&mut self, app: &YogaApp) -> ClientResult<()> {
        app.client().unparticipate(self.session.id, self.user_id).await?;
        self.refresh(app).await
    }

    pub async fn delete(self, app: &YogaApp) -> ClientResult<Route> {
        app.client().delete_session(self.session.id).await?;
        Ok(Route::Sessions)
    }
}
