//! Outbound adapter for the external text-generation endpoint.

mod dto;
mod http_generator;

pub use http_generator::{HttpTextGenerator, TextGenTimeouts};
