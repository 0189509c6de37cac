// src/lib.rs
//! Folio - A terminal file manager.
//!
//! This library provides browsing, filtering, previewing and file operations
//! over a storage host, plus the terminal interface that drives them.

pub mod app;
pub mod config;
pub mod error;
pub mod fs;
pub mod logging;
pub mod preview;
pub mod ui;
pub mod view;
