//! REST API for deployment reporting and system version lookup

pub mod auth;
pub mod handlers;
pub mod router;
pub mod state;
pub mod validation;
