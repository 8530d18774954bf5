//! File system helpers shared across the pipeline
//!
//! This module provides the small set of file operations jinjagen performs:
//! reading template and value files, and writing rendered output atomically so
//! a target file is never left in a partial state.
//!
//! # Modules
//!
//! - [`fs`] - File system operations with atomic full-replace writes

pub mod fs;

pub use fs::{atomic_write, ensure_dir, read_text_file, safe_write};
