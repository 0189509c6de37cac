// src/app/mod.rs
//! Application module - contains application state and logic.

pub mod editor;
pub mod prompt;
pub mod state;

// Re-export the App struct
pub use state::{Action, App, Notice, NoticeLevel};
