//! StreamField settings
//!
//! Settings are plain serde structs with defaults for every key, so a TOML
//! file only needs to list what it overrides:
//!
//! ```toml
//! default_icon = "placeholder"
//! field_prefix = "body"
//! cache_scope = "request"
//! ```

use crate::block::DEFAULT_ICON;
use crate::error::{BlockError, BlockResult};
use crate::template::{BLOCKS_CONTAINER_TEMPLATE, STATIC_BLOCK_TEMPLATE};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Lifetime of cached definitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheScope {
	/// One cache shared for the life of the process
	#[default]
	Process,
	/// A fresh cache for every definition request
	Request,
}

/// Settings for StreamField definitions and transcoding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StreamFieldSettings {
	/// Icon inherited by blocks that do not declare one; never emitted in definitions
	pub default_icon: String,

	/// Placeholder field name the client substitutes per block instance
	pub field_name_template: String,

	/// Prefix passed to decoders for submitted form data
	pub field_prefix: String,

	/// Template rendering help text and non-block errors of streams
	pub blocks_container_template: String,

	/// Template rendering the fixed content of static blocks
	pub static_block_template: String,

	/// Lifetime of cached definitions
	pub cache_scope: CacheScope,
}

impl Default for StreamFieldSettings {
	fn default() -> Self {
		Self {
			default_icon: DEFAULT_ICON.to_string(),
			field_name_template: "field-__ID__".to_string(),
			field_prefix: String::new(),
			blocks_container_template: BLOCKS_CONTAINER_TEMPLATE.to_string(),
			static_block_template: STATIC_BLOCK_TEMPLATE.to_string(),
			cache_scope: CacheScope::default(),
		}
	}
}

impl StreamFieldSettings {
	/// Parse settings from a TOML document
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_blocks::settings::{CacheScope, StreamFieldSettings};
	///
	/// let settings = StreamFieldSettings::from_toml_str(r#"cache_scope = "request""#).unwrap();
	/// assert_eq!(settings.cache_scope, CacheScope::Request);
	/// assert_eq!(settings.default_icon, "placeholder");
	/// ```
	pub fn from_toml_str(source: &str) -> BlockResult<Self> {
		toml::from_str(source).map_err(|e| BlockError::Settings(e.to_string()))
	}

	/// Load settings from a TOML file
	pub fn from_file(path: impl AsRef<Path>) -> BlockResult<Self> {
		let path = path.as_ref();
		let source = std::fs::read_to_string(path).map_err(|e| {
			BlockError::Settings(format!("failed to read {}: {}", path.display(), e))
		})?;
		Self::from_toml_str(&source)
	}
}
