//! Sprintboard - Sprint overview report for an issue tracker
//!
//! This library crate exposes internal modules for integration testing.

pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod integrations;
pub mod tui;
