use std::path::PathBuf;

/// Library-level structured errors for confseek.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("Failed to decode default config")]
	DefaultDecode {
		#[source]
		source: toml::de::Error,
	},

	#[error("no config files found at the configured locations")]
	NoConfigFound,

	#[error("Failed to decode TOML document")]
	Decode {
		#[source]
		source: toml::de::Error,
	},

	#[error("TOML document is not valid UTF-8")]
	InvalidUtf8 {
		#[source]
		source: std::str::Utf8Error,
	},

	#[error("Failed to encode current configuration as TOML")]
	Encode {
		#[source]
		source: toml::ser::Error,
	},

	#[error("Configuration type does not serialize to a TOML table")]
	NotATable,

	#[error("Failed to read config file: {path}")]
	Read {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Generated default config file: {path}")]
	DefaultWritten { path: PathBuf },

	#[error("Failed to write default config file: {path}")]
	DefaultWriteFailed {
		path: PathBuf,
		candidates: Vec<PathBuf>,
		#[source]
		source: std::io::Error,
	},
}

impl ConfigError {
	/// Process exit status this error asks the outermost caller to terminate with.
	///
	/// Only the autoload outcomes carry one: `Some(0)` once a default file was
	/// generated, `Some(1)` when it could not be written.
	pub fn exit_code(&self) -> Option<u8> {
		match self {
			ConfigError::DefaultWritten { .. } => Some(0),
			ConfigError::DefaultWriteFailed { .. } => Some(1),
			_ => None,
		}
	}

	/// Instructions for creating a config file by hand, listing every candidate path.
	pub fn remediation(&self) -> Option<String> {
		let ConfigError::DefaultWriteFailed { candidates, .. } = self else {
			return None;
		};

		let mut text = String::from(
			"Please manually create a configuration file in one of the following places:\n",
		);
		for candidate in candidates {
			text.push_str(&candidate.display().to_string());
			text.push('\n');
		}
		Some(text)
	}
}

/// Result type alias using ConfigError.
pub type Result<T> = std::result::Result<T, ConfigError>;
