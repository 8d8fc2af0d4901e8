//! # API Module
//!
//! HTTP endpoints of the local login server started by `plcurate login`.
//!
//! - [`login`] - redirects to the Spotify authorize page
//! - [`callback`] - receives the authorization code and exchanges it for a
//!   user token through the delegated grant
//! - [`health`] - status and version
//!
//! The handlers share the pending login through an
//! `Extension<Arc<Mutex<Option<PendingLogin>>>>` and read the configuration
//! from an `Extension<Arc<Config>>`.

mod callback;
mod health;

pub use callback::callback;
pub use callback::login;
pub use health::health;
