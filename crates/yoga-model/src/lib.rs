//! Wire types shared by the yoga booking server and client.
//!
//! Field names follow the JSON the booking front end already speaks:
//! camelCase for people and timestamps, `teacher_id` for the session's
//! teacher reference.

pub mod auth;
pub mod session;
pub mod teacher;
pub mod time;
pub mod user;
pub mod validation;

pub use auth::{LoginRequest, MessageResponse, SessionInformation, SignupRequest};
pub use session::{Session, SessionRequest};
pub use teacher::Teacher;
pub use user::User;
pub use validation::ValidationError;
