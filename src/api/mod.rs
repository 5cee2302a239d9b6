//! # API Module
//!
//! HTTP endpoints of the local server that runs while `plsort auth` waits for
//! Spotify to redirect back after the user granted access.
//!
//! ## Endpoints
//!
//! - [`callback`] - Completes the OAuth 2.0 PKCE flow by exchanging the
//!   authorization code for an access token.
//! - [`health`] - Returns status and version, handy to check that the callback
//!   server is reachable on `SERVER_ADDRESS`.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use plsort::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
