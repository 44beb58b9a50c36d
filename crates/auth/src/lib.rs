//! `wareflow-auth` — who is signed in, and whether their session still holds.
//!
//! Pure types only; the login call itself lives in the client crate.

pub mod credentials;
pub mod session;
pub mod user;

pub use credentials::Credentials;
pub use session::{Session, SessionError, validate_session};
pub use user::{Role, UserProfile};
