//! Authentication: the session manager and the backends it logs in against.

mod client;
mod manager;

pub use client::{AuthClient, HttpAuthClient, MockAuthClient};
pub use manager::{AuthSnapshot, SessionManager};
