//! Shared GraphQL-style transport for Pixlock backends.
//!
//! The relation store and both directory services speak the same wire
//! dialect: POST a `{ query, variables }` document, get back a
//! `{ data, errors }` envelope. This crate owns that one piece of transport
//! knowledge (bearer authentication, envelope decode, failure
//! classification) so the domain crates never touch raw JSON.

pub mod client;
pub mod error;

pub use client::GraphQlClient;
pub use error::{ClientError, ClientResult};
