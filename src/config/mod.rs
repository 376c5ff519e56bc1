//! Configuration discovery and loading.
//!
//! This module handles:
//! - Candidate path construction in priority order
//! - TOML decoding on top of already-populated values
//! - Default config file generation

pub mod generate;
pub mod manager;
pub mod overlay;
pub mod paths;

pub use generate::{DEFAULT_FILE_MODE, write_default_file};
pub use manager::{CandidateReport, CandidateStatus, Manager};
pub use overlay::{decode_bytes_into, decode_into, overlay_table, parse_document};
pub use paths::{SYSTEM_CONFIG_DIRS, SearchPaths, SearchRoots};
