//! Request middleware: sessions and authentication guards.

pub mod auth;
pub mod session;

pub use auth::{RedirectIfAuthenticated, RequireUser, clear_current_user, set_current_user};
pub use session::create_session_layer;
