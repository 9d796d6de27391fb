//! Customer authentication for the Lumen storefront.
//!
//! Provides the user model, the login/registration client and the
//! persisted signed-in session.

mod client;
mod error;
mod session;
mod user;

pub use client::{AuthClient, Authenticator};
pub use error::AuthError;
pub use session::UserSession;
pub use user::{AuthState, Credentials, Registration, User};
