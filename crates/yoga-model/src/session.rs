use serde::{Deserialize, Serialize};

use crate::time;
use crate::validation::{self, ValidationError};

pub const NAME_MAX: usize = 50;
pub const DESCRIPTION_MAX: usize = 2500;

/// A scheduled yoga class. `users` holds the ids of participating users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: i64,
    pub name: String,
    pub date: String,
    #[serde(rename = "teacher_id")]
    pub teacher_id: i64,
    pub description: String,
    #[serde(default)]
    pub users: Vec<i64>,
    pub created_at: String,
    pub updated_at: String,
}

impl Session {
    pub fn is_participant(&self, user_id: i64) -> bool {
        self.users.contains(&user_id)
    }
}

/// Body of session create and update calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRequest {
    pub name: String,
    pub date: String,
    pub teacher_id: i64,
    pub description: String,
    /// Initial participants. Only honoured on create; participation is changed
    /// through the participate endpoints afterwards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<i64>>,
}

impl SessionRequest {
    /// Checks field constraints and returns the date normalized to
    /// [`time::TIMESTAMP_FORMAT`].
    pub fn validate(&self) -> Result<String, ValidationError> {
        validation::not_blank("name", &self.name)?;
        validation::length("name", &self.name, 1, NAME_MAX)?;
        validation::not_blank("description", &self.description)?;
        validation::length("description", &self.description, 1, DESCRIPTION_MAX)?;
        time::parse_session_date(&self.date)
    }

    /// Requested participants with duplicates removed, first occurrence kept.
    pub fn participant_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = Vec::new();
        for id in self.users.iter().flatten() {
            if !ids.contains(id) {
                ids.push(*id);
            }
        }
        ids
    }
}
