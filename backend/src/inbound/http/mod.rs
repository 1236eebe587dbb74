//! HTTP inbound adapter exposing the study API.

pub mod cards;
pub mod error;
pub mod health;
pub mod session;
pub mod session_config;
pub mod state;
pub mod stats;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;
