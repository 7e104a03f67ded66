//! Login session for the backoffice dashboard.
//!
//! A [`Session`] checks credentials against a fixed set of accounts and keeps
//! an `authToken` plus the serialized user (`userData`) in a
//! [`KeyValueStore`]. The store is read once, at [`Session::restore`].

mod error;
mod session;
mod store;
mod user;

pub use error::{SessionError, SessionResult};
pub use session::{Session, SessionConfig, AUTH_TOKEN_KEY, USER_DATA_KEY};
pub use store::{FileStore, KeyValueStore, MemoryStore, STORE_FILE};
pub use user::{static_accounts, Account, User};
