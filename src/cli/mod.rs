//! # CLI Module
//!
//! The user-facing commands of plsort. Each command wires configuration, the
//! Spotify client and the interactive menus together, and turns a failure into
//! one terminal error message.
//!
//! ## Commands
//!
//! - [`auth`] - Spotify OAuth authentication with PKCE
//! - [`playlists`] - Lists the user's playlists
//! - [`sort`] - Interactive batch reorder of selected playlists
//!
//! ## Data Flow
//!
//! ```text
//! sort
//!   ├── fetch playlists (paginated)
//!   ├── prompt: playlists, criteria, direction
//!   └── pipeline::reorder_all
//!         └── per playlist: list tracks → sort → write order
//! ```
//!
//! ## Usage Patterns
//!
//! ```bash
//! plsort auth          # Authenticate with Spotify
//! plsort playlists     # Show playlists with their track counts
//! plsort sort          # Pick playlists and criteria, then reorder
//! ```

mod auth;
mod playlists;
pub mod prompt;
mod sort;

pub use auth::auth;
pub use playlists::playlists;
pub use sort::sort;
