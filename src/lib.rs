//! memoir - Personal markdown memoir
//!
//! A local-first store of markdown entries organized by categories and
//! tags, with a command-line front end. All state lives in one JSON document
//! under `.memoir/` and is rewritten after every change.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use application::EntryStore;
pub use error::MemoirError;
