//! Confseek - find, load and overlay TOML configuration files.
//!
//! This library provides:
//! - A fixed, prioritized search for a named config file
//! - Default values decoded from an embedded TOML document
//! - Overlay of the first readable, decodable file onto those defaults
//! - Default config generation when nothing is found (autoload)
//!
//! # Example
//!
//! ```no_run
//! use confseek::config::Manager;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Default, Serialize, Deserialize)]
//! struct AppConfig {
//!     listen: String,
//!     workers: u32,
//! }
//!
//! const DEFAULTS: &str = "listen = \"127.0.0.1:8080\"\nworkers = 4\n";
//!
//! let mut manager = Manager::new(DEFAULTS, None, "app.toml", AppConfig::default(), false).unwrap();
//! match manager.load_config() {
//!     Ok(path) => println!("Loaded {}", path.display()),
//!     Err(confseek::ConfigError::NoConfigFound) => println!("Using defaults"),
//!     Err(e) => panic!("{e}"),
//! }
//! println!("workers = {}", manager.config().workers);
//! ```

pub mod config;
pub mod error;
pub mod logging;

pub use config::Manager;
pub use error::{ConfigError, Result};
