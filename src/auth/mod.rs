//! Authentication module
//!
//! Basic-auth login that yields a per-operation bearer token.
//!
//! Tokens are values, not client state: every top-level fetch logs in,
//! carries its own [`Token`] through the page loop, and drops it at the end.
//! Concurrent operations never share or overwrite each other's token.

mod session;
mod types;

pub use session::{bearer_token, token_from_body, AuthSession, LOGIN_PATH};
pub use types::{Credentials, Token};
