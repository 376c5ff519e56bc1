use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Permission bits of a generated config file (before umask).
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// Write `contents` verbatim to `path`.
///
/// Without `overwrite` an existing file is left alone and the write fails with
/// [`std::io::ErrorKind::AlreadyExists`].
pub fn write_default_file(path: &Path, contents: &str, overwrite: bool) -> std::io::Result<()> {
	let mut options = OpenOptions::new();
	options.write(true);
	if overwrite {
		options.create(true).truncate(true);
	} else {
		options.create_new(true);
	}

	#[cfg(unix)]
	{
		use std::os::unix::fs::OpenOptionsExt;
		options.mode(DEFAULT_FILE_MODE);
	}

	let mut file = options.open(path)?;
	file.write_all(contents.as_bytes())?;
	file.flush()
}
