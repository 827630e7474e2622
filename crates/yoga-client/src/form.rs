use yoga_model::{Session, SessionRequest, Teacher, ValidationError};

use crate::account::{Route, YogaApp};
use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update(i64),
}

/// Field values of the session editor.
#[derive(Debug, Clone)]
pub struct SessionForm {
    pub mode: FormMode,
    pub name: String,
    /// `YYYY-MM-DD`, as a date input produces it.
    pub date: String,
    pub teacher_id: Option<i64>,
    pub description: String,
    pub teachers: Vec<Teacher>,
}

impl SessionForm {
    pub fn blank() -> Self {
        Self {
            mode: FormMode::Create,
            name: String::new(),
            date: String::new(),
            teacher_id: None,
            description: String::new(),
            teachers: Vec::new(),
        }
    }

    pub fn for_session(session: &Session) -> Self {
        Self {
            mode: FormMode::Update(session.id),
            name: session.name.clone(),
            date: session.date.chars().take(10).collect(),
            teacher_id: Some(session.teacher_id),
            description: session.description.clone(),
            teachers: Vec::new(),
        }
    }

    /// Prepare the editor: admin only. `id` selects update mode.
    pub async fn load(app: &YogaApp, id: Option<i64>) -> ClientResult<Self> {
        if !app.is_admin() {
            return Err(ClientError::Forbidden);
        }
        let mut form = match id {
            Some(id) => Self::for_session(&app.client().session(id).await?),
            None => Self::blank(),
        };
        form.teachers = app.client().teachers().await?;
        Ok(form)
    }

    pub fn to_request(&self) -> Result<SessionRequest, ValidationError> {
        let teacher_id = self
            .teacher_id
            .ok_or_else(|| ValidationError::new("teacher_id", "must be selected"))?;
        let request = SessionRequest {
            name: self.name.clone(),
            date: self.date.clone(),
            teacher_id,
            description: self.description.clone(),
            users: None,
        };
        request.validate()?;
        Ok(request)
    }

    pub fn is_valid(&self) -> bool {
        self.to_request().is_ok()
    }

    pub async fn submit(&self, app: &YogaApp) -> ClientResult<Route> {
        let request = self.to_request()?;
        match self.mode {
            FormMode::Create => {
                app.client().create_session(&request).await?;
            }
            FormMode::Update(id) => {
                app.client().update_session(id, &request).await?;
            }
        }
        Ok(Route::Sessions)
    }
}
