//! Shared command-line plumbing for the arbgen binaries.

pub mod args;
pub mod config;
pub mod logging;

pub use args::{CommonArgs, finish, run_tool};
pub use config::{FileConfig, Overrides, resolve};
