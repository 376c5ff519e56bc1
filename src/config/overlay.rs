use crate::error::{ConfigError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use toml::{Table, Value};

/// Parse a TOML document into a table.
pub fn parse_document(content: &str) -> Result<Table> {
	toml::from_str(content).map_err(|source| ConfigError::Decode { source })
}

/// Decode raw file contents on top of `target`.
///
/// Bytes that are not UTF-8 fail like any other malformed document.
pub fn decode_bytes_into<T>(target: &mut T, bytes: &[u8]) -> Result<()>
where
	T: Serialize + DeserializeOwned,
{
	let content =
		std::str::from_utf8(bytes).map_err(|source| ConfigError::InvalidUtf8 { source })?;
	decode_into(target, content)
}

/// Decode `content` on top of `target`.
///
/// Only keys present in the document change; everything else keeps its current
/// value. `target` is replaced only when the whole decode succeeds, so on error
/// it is left exactly as it was.
///
/// The overlay goes through the serialized form of `target`, so fields that
/// serde skips (`#[serde(skip)]`) do not survive it: they come back as their
/// `Default` value after every decode.
pub fn decode_into<T>(target: &mut T, content: &str) -> Result<()>
where
	T: Serialize + DeserializeOwned,
{
	let document = parse_document(content)?;
	let mut current = to_table(target)?;
	overlay_table(&mut current, document);

	*target = Value::Table(current)
		.try_into()
		.map_err(|source| ConfigError::Decode { source })?;

	Ok(())
}

/// Merge `document` into `base`.
///
/// Nested tables merge key by key. Any other value, arrays included, replaces
/// what was there.
pub fn overlay_table(base: &mut Table, document: Table) {
	for (key, incoming) in document {
		if let Value::Table(incoming) = incoming {
			if let Some(Value::Table(existing)) = base.get_mut(&key) {
				overlay_table(existing, incoming);
				continue;
			}
			base.insert(key, Value::Table(incoming));
		} else {
			base.insert(key, incoming);
		}
	}
}

fn to_table<T: Serialize>(value: &T) -> Result<Table> {
	match Value::try_from(value).map_err(|source| ConfigError::Encode { source })? {
		Value::Table(table) => Ok(table),
		_ => Err(ConfigError::NotATable),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde::Deserialize;

	#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
	struct Server {
		host: String,
		port: u16,
	}

	#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
	struct Settings {
		name: String,
		tags: Vec<String>,
		debug: Option<bool>,
		server: Server,
	}

	const DEFAULTS: &str = r#"
name = "demo"
tags = ["a", "b"]

[server]
host = "localhost"
port = 8080
"#;

	fn defaults() -> Settings {
		let mut settings = Settings::default();
		decode_into(&mut settings, DEFAULTS).unwrap();
		settings
	}

	#[test]
	fn test_decode_into_default_value() {
		let settings = defaults();

		assert_eq!(settings.name, "demo");
		assert_eq!(settings.tags, vec!["a", "b"]);
		assert_eq!(settings.debug, None);
		assert_eq!(settings.server.host, "localhost");
		assert_eq!(settings.server.port, 8080);
	}

	#[test]
	fn test_nested_tables_merge() {
		let mut settings = defaults();
		decode_into(&mut settings, "[server]\nport = 9090\n").unwrap();

		assert_eq!(settings.server.host, "localhost");
		assert_eq!(settings.server.port, 9090);
		assert_eq!(settings.name, "demo");
	}

	#[test]
	fn test_arrays_replace() {
		let mut settings = defaults();
		decode_into(&mut settings, "tags = [\"c\"]\n").unwrap();

		assert_eq!(settings.tags, vec!["c"]);
	}

	#[test]
	fn test_optional_field_set_and_kept() {
		let mut settings = defaults();
		decode_into(&mut settings, "debug = true\n").unwrap();
		assert_eq!(settings.debug, Some(true));

		// A later overlay without the key keeps the value
		decode_into(&mut settings, "name = \"other\"\n").unwrap();
		assert_eq!(settings.debug, Some(true));
		assert_eq!(settings.name, "other");
	}

	#[test]
	fn test_syntax_error_leaves_target_untouched() {
		let mut settings = defaults();
		let result = decode_into(&mut settings, "name = \"broken\"\ninvalid toml [[[");

		assert!(matches!(result, Err(ConfigError::Decode { .. })));
		assert_eq!(settings, defaults());
	}

	#[test]
	fn test_type_error_leaves_target_untouched() {
		let mut settings = defaults();
		let result = decode_into(&mut settings, "name = \"changed\"\n[server]\nport = \"high\"\n");

		assert!(matches!(result, Err(ConfigError::Decode { .. })));
		assert_eq!(settings, defaults());
	}

	#[test]
	fn test_unknown_keys_are_ignored() {
		let mut settings = defaults();
		decode_into(&mut settings, "unrelated = 1\nname = \"x\"\n").unwrap();

		assert_eq!(settings.name, "x");
	}

	#[test]
	fn test_generic_table_target() {
		let mut table = Table::new();
		decode_into(&mut table, DEFAULTS).unwrap();
		decode_into(&mut table, "[server]\nport = 1\n").unwrap();

		let server = table["server"].as_table().unwrap();
		assert_eq!(server["host"].as_str(), Some("localhost"));
		assert_eq!(server["port"].as_integer(), Some(1));
	}

	#[test]
	fn test_invalid_utf8_rejected() {
		let mut settings = defaults();
		let result = decode_bytes_into(&mut settings, b"name = \"\xff\xfe\"\n");

		assert!(matches!(result, Err(ConfigError::InvalidUtf8 { .. })));
		assert_eq!(settings, defaults());
	}

	#[test]
	fn test_bytes_decode() {
		let mut settings = defaults();
		decode_bytes_into(&mut settings, b"name = \"bytes\"\n").unwrap();

		assert_eq!(settings.name, "bytes");
	}

	#[test]
	fn test_skipped_fields_reset_to_default() {
		#[derive(Debug, Default, Serialize, Deserialize)]
		struct WithRuntime {
			name: String,
			#[serde(skip)]
			runtime: u32,
		}

		let mut value = WithRuntime {
			name: "demo".to_string(),
			runtime: 7,
		};
		decode_into(&mut value, "name = \"other\"\n").unwrap();

		assert_eq!(value.name, "other");
		// Not part of the serialized form, so the overlay cannot carry it over
		assert_eq!(value.runtime, 0);
	}

	#[test]
	fn test_non_table_target() {
		let mut value = 5_i64;
		let result = decode_into(&mut value, "a = 1");

		assert!(matches!(result, Err(ConfigError::NotATable)));
	}

	#[test]
	fn test_overlay_table_replaces_scalar_with_table() {
		let mut base = parse_document("server = \"inline\"\n").unwrap();
		let document = parse_document("[server]\nhost = \"h\"\n").unwrap();
		overlay_table(&mut base, document);

		assert!(base["server"].is_table());
	}
}
