//! Typed client for the yoga studio API.
//!
//! [`YogaApp`] owns the HTTP client and the persisted [`SessionStore`]; the
//! view-models ([`SessionDirectory`], [`SessionDetail`], [`SessionForm`]) borrow
//! it for each call and always refetch after a mutation instead of patching
//! local state.

mod account;
mod client;
mod detail;
mod directory;
mod error;
mod form;
mod store;

pub use account::{Route, YogaApp};
pub use client::ApiClient;
pub use detail::SessionDetail;
pub use directory::SessionDirectory;
pub use error::{ClientError, ClientResult};
pub use form::{FormMode, SessionForm};
pub use store::{SessionStore, STORAGE_KEY};
