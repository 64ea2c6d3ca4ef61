//! CLI module for convergeviz
//!
//! Handles command-line argument parsing and configuration management.

pub mod args;
pub mod config;

pub use args::{Args, Commands, FrameFormat, SeriesArg, Verbosity};
pub use config::Config;
