//! Morning Interview library - scripted check-in, task detection and plan export

pub mod cli;
pub mod config;
pub mod interview;
pub mod storage;
pub mod tui;
