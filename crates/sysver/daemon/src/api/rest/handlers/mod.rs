//! API request handlers

mod deployments;
mod health;
mod services;

pub use deployments::*;
pub use health::*;
pub use services::*;
