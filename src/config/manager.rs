use crate::config::generate::write_default_file;
use crate::config::overlay::{decode_bytes_into, decode_into};
use crate::config::paths::{SearchPaths, SearchRoots};
use crate::error::{ConfigError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Finds, reads and overlays a TOML config file onto a caller-supplied value.
///
/// The value always holds at least the decoded defaults. Loading a file only
/// changes the keys present in that file.
///
/// Fields serde skips (`#[serde(skip)]`) are not part of the decoded document
/// and are reset to their `Default` on every load; see
/// [`decode_into`].
#[derive(Debug)]
pub struct Manager<T> {
	search_paths: SearchPaths,
	default_config: String,
	conf: T,
	source_path: Option<PathBuf>,
}

/// Outcome of checking one candidate path.
#[derive(Debug)]
pub enum CandidateStatus {
	/// The file could not be read.
	Missing(ConfigError),

	/// The file was read but does not decode onto the configuration.
	Invalid(ConfigError),

	/// The file decodes cleanly.
	Valid,
}

/// A candidate path together with its status.
#[derive(Debug)]
pub struct CandidateReport {
	pub path: PathBuf,
	pub status: CandidateStatus,
}

impl<T> Manager<T>
where
	T: Serialize + DeserializeOwned,
{
	/// Prepare a manager for `file_name`, searching `config_dir` first and then
	/// the working directory, `~/.config`, `/usr/local/etc` and `/etc`.
	///
	/// `default_config` is decoded onto `conf` before anything else; keys a
	/// config file leaves out keep these values.
	///
	/// With `autoload` the config file is loaded right away. When none is found
	/// the default document is written to `file_name` in the working directory
	/// and [`ConfigError::DefaultWritten`] is returned; if that write fails,
	/// [`ConfigError::DefaultWriteFailed`]. Both carry an
	/// [`exit_code`](ConfigError::exit_code) the application should terminate
	/// with.
	pub fn new(
		default_config: impl Into<String>,
		config_dir: Option<&Path>,
		file_name: &str,
		conf: T,
		autoload: bool,
	) -> Result<Self> {
		let search_paths = SearchPaths::new(&SearchRoots::from_env(config_dir), file_name);
		Self::with_search_paths(default_config, search_paths, conf, autoload)
	}

	/// Like [`Manager::new`], with an explicit candidate list.
	pub fn with_search_paths(
		default_config: impl Into<String>,
		search_paths: SearchPaths,
		mut conf: T,
		autoload: bool,
	) -> Result<Self> {
		let default_config = default_config.into();

		// Values from the config file overwrite these
		decode_into(&mut conf, &default_config).map_err(|err| match err {
			ConfigError::Decode { source } => ConfigError::DefaultDecode { source },
			other => other,
		})?;

		let mut manager = Self {
			search_paths,
			default_config,
			conf,
			source_path: None,
		};

		if !autoload {
			return Ok(manager);
		}

		match manager.load_config() {
			Ok(path) => {
				info!(path = %path.display(), "Successfully loaded configuration file");
				Ok(manager)
			}
			Err(ConfigError::NoConfigFound) => Err(manager.generate_default()),
			Err(err) => Err(err),
		}
	}

	/// Try every candidate in priority order until one reads and decodes.
	///
	/// Returns the path that was loaded, or [`ConfigError::NoConfigFound`].
	/// Unreadable or malformed candidates are logged and skipped.
	///
	/// May be called again to reload from disk. A reload overlays onto the
	/// current values, it does not reset to the defaults first, so a key
	/// removed from the file keeps whatever value it last had.
	pub fn load_config(&mut self) -> Result<PathBuf> {
		for path in self.search_paths.candidates() {
			debug!(path = %path.display(), "Trying configuration file");

			let content = match std::fs::read(path) {
				Ok(content) => content,
				Err(e) => {
					debug!(path = %path.display(), error = %e, "No config found");
					continue;
				}
			};

			if let Err(e) = decode_bytes_into(&mut self.conf, &content) {
				warn!(path = %path.display(), error = %e, "Unable to decode config file");
				continue;
			}

			let path = path.to_path_buf();
			self.source_path = Some(path.clone());
			return Ok(path);
		}

		Err(ConfigError::NoConfigFound)
	}

	/// Write the default document to [`SearchPaths::default_target`].
	pub fn write_default(&self, overwrite: bool) -> std::io::Result<PathBuf> {
		let path = self.search_paths.default_target().to_path_buf();
		write_default_file(&path, &self.default_config, overwrite)?;
		Ok(path)
	}

	fn generate_default(&self) -> ConfigError {
		info!(
			"No configuration files were found, a new one will be generated in the present working directory"
		);

		match self.write_default(true) {
			Ok(path) => ConfigError::DefaultWritten { path },
			Err(source) => {
				warn!(
					error = %source,
					"A default config file could not be created in this directory"
				);
				ConfigError::DefaultWriteFailed {
					path: self.search_paths.default_target().to_path_buf(),
					candidates: self.search_paths.candidates().map(Path::to_path_buf).collect(),
					source,
				}
			}
		}
	}
}

impl<T> Manager<T>
where
	T: Serialize + DeserializeOwned + Clone,
{
	/// Check every candidate against a scratch copy of the configuration.
	///
	/// Nothing in the manager changes.
	pub fn inspect(&self) -> Vec<CandidateReport> {
		self.search_paths
			.candidates()
			.map(|path| {
				let status = match std::fs::read(path) {
					Err(source) => CandidateStatus::Missing(ConfigError::Read {
						path: path.to_path_buf(),
						source,
					}),
					Ok(content) => {
						let mut scratch = self.conf.clone();
						match decode_bytes_into(&mut scratch, &content) {
							Ok(()) => CandidateStatus::Valid,
							Err(err) => CandidateStatus::Invalid(err),
						}
					}
				};
				CandidateReport {
					path: path.to_path_buf(),
					status,
				}
			})
			.collect()
	}
}

impl<T> Manager<T> {
	/// The current configuration.
	pub fn config(&self) -> &T {
		&self.conf
	}

	pub fn config_mut(&mut self) -> &mut T {
		&mut self.conf
	}

	pub fn into_inner(self) -> T {
		self.conf
	}

	/// The raw default document.
	pub fn default_config(&self) -> &str {
		&self.default_config
	}

	pub fn search_paths(&self) -> &SearchPaths {
		&self.search_paths
	}

	pub fn file_name(&self) -> &str {
		self.search_paths.file_name()
	}

	/// Path of the file last loaded successfully, if any.
	pub fn source_path(&self) -> Option<&Path> {
		self.source_path.as_deref()
	}
}
