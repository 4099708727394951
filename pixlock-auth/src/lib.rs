//! Session token plumbing for Pixlock service clients.
//!
//! Authentication itself (login, refresh, signature checks) lives in the
//! external identity provider. This crate only carries the resulting bearer
//! token to the clients that need it, and decodes claims out of it without
//! verification.

pub mod claims;
pub mod token;

pub use claims::{SessionClaims, decode_session_claims};
pub use token::{SessionTokenStore, TokenProvider};
