//! HTTP inbound adapter exposing the JSON API.

pub mod auth;
pub mod engagement;
pub mod error;
pub mod feed;
pub mod follows;
pub mod ideas;
pub mod notifications;
pub mod posts;
pub mod profile;
pub mod schemas;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;
