//! Terminal front end for the backoffice dashboard.
//!
//! Reads one [`Command`] per line, feeds it to the [`App`] and prints the
//! redrawn screen plus any notifications.

pub mod app;
pub mod command;
pub mod dashboard;
pub mod pages;
pub mod render;

pub use app::{App, Flow, Screen};
pub use command::{Command, FilterCommand, HELP};
pub use dashboard::{thousands, tiles, Metrics, Tile};
pub use pages::{catalogue, load_page, PageEntry};
