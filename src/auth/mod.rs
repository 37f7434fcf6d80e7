//! # Auth
//!
//! User registration, login, and bearer-token sessions. The session gate
//! is the only way a request acquires a caller identity; everything the
//! catalog needs from here is a `Uuid`.

pub mod crypto;
mod errors;
pub mod session;
pub mod user;

pub use errors::{AuthError, AuthResult};
pub use session::{Session, SessionConfig, SessionManager};
pub use user::{User, UserService};
