use std::path::{Path, PathBuf};

/// System-wide configuration directories, searched last.
pub const SYSTEM_CONFIG_DIRS: [&str; 2] = ["/usr/local/etc", "/etc"];

/// Environment inputs the candidate list is built from.
///
/// Reading the environment happens once, in [`SearchRoots::from_env`]; building
/// [`SearchPaths`] from a `SearchRoots` is pure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRoots {
	/// Caller-specified directory, searched first. Empty or absent means skipped.
	pub config_dir: Option<PathBuf>,

	/// Working directory. Absent means the file name is used as a relative path.
	pub working_dir: Option<PathBuf>,

	/// Home directory; its `.config` subdirectory is searched.
	pub home_dir: Option<PathBuf>,

	/// System directories, in priority order.
	pub system_dirs: Vec<PathBuf>,
}

impl SearchRoots {
	/// Roots for the running process: the given custom directory, the process
	/// working directory, the user's home and [`SYSTEM_CONFIG_DIRS`].
	pub fn from_env(config_dir: Option<&Path>) -> Self {
		Self {
			config_dir: config_dir.map(Path::to_path_buf),
			working_dir: None,
			home_dir: dirs::home_dir(),
			system_dirs: SYSTEM_CONFIG_DIRS.into_iter().map(PathBuf::from).collect(),
		}
	}
}

/// Ordered list of places a config file named `file_name` may live.
///
/// Earlier entries win. Slots whose root is unknown are kept as empty paths so
/// positions stay stable; the search skips them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPaths {
	file_name: String,
	entries: Vec<PathBuf>,
	default_target: PathBuf,
}

impl SearchPaths {
	/// Build the candidate list in priority order:
	/// 1. `<config_dir>/<file_name>`
	/// 2. `<file_name>` in the working directory
	/// 3. `<home>/.config/<file_name>`
	/// 4. each system directory joined with `<file_name>`
	pub fn new(roots: &SearchRoots, file_name: &str) -> Self {
		let mut entries = Vec::with_capacity(3 + roots.system_dirs.len());

		entries.push(match &roots.config_dir {
			Some(dir) if !dir.as_os_str().is_empty() => dir.join(file_name),
			_ => PathBuf::new(),
		});

		let default_target = match &roots.working_dir {
			Some(dir) => dir.join(file_name),
			None => PathBuf::from(file_name),
		};
		entries.push(default_target.clone());

		entries.push(match &roots.home_dir {
			Some(home) => home.join(".config").join(file_name),
			None => PathBuf::new(),
		});

		for dir in &roots.system_dirs {
			entries.push(dir.join(file_name));
		}

		Self {
			file_name: file_name.to_string(),
			entries,
			default_target,
		}
	}

	/// The configured file name.
	pub fn file_name(&self) -> &str {
		&self.file_name
	}

	/// All slots, including skipped (empty) ones.
	pub fn entries(&self) -> &[PathBuf] {
		&self.entries
	}

	/// Non-empty candidates in priority order.
	pub fn candidates(&self) -> impl Iterator<Item = &Path> {
		self.entries
			.iter()
			.filter(|path| !path.as_os_str().is_empty())
			.map(PathBuf::as_path)
	}

	/// Where a generated default config is written: `<file_name>` in the working directory.
	pub fn default_target(&self) -> &Path {
		&self.default_target
	}
}
