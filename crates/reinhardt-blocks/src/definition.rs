//! Block definitions
//!
//! A [`Definition`] is the JSON schema the client-side editor renders for a
//! block. Definitions are pure functions of a block's static metadata (plus
//! its prepared default value), so they are computed once per
//! [`CacheSignature`] and shared.
//!
//! ```rust
//! use reinhardt_blocks::prelude::*;
//! use serde_json::json;
//!
//! let renderer = TeraTemplateRenderer::new().unwrap();
//! let settings = StreamFieldSettings::default();
//! let cache = DefinitionCache::new();
//! let ctx = DefinitionContext::new(&cache, &renderer, &settings);
//!
//! let heading = Block::leaf("heading")
//!     .with_required(true)
//!     .with_default(json!("Untitled"));
//! let definition = heading.definition(None, &ctx).unwrap();
//!
//! assert_eq!(
//!     serde_json::to_value(&*definition).unwrap(),
//!     json!({
//!         "key": "heading",
//!         "label": "Heading",
//!         "required": true,
//!         "layout": "SIMPLE",
//!         "dangerouslyRunInnerScripts": true,
//!         "default": "Untitled",
//!     })
//! );
//! ```

use crate::block::{Block, BlockKind, Layout};
use crate::cache::DefinitionCache;
use crate::error::BlockResult;
use crate::settings::StreamFieldSettings;
use crate::signature::CacheSignature;
use crate::template::{RenderContext, TemplateRenderer};
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::sync::Arc;

/// Serializable description of a block for the client-side editor
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Definition {
	/// Block name
	pub key: String,

	/// Display label
	pub label: String,

	/// Whether a value is required
	pub required: bool,

	/// Layout mode
	pub layout: Layout,

	/// Lets the client execute scripts inside rendered fragments
	pub dangerously_run_inner_scripts: bool,

	/// Icon markup, present only when the block overrides the default icon
	#[serde(skip_serializing_if = "Option::is_none")]
	pub icon: Option<String>,

	/// CSS class name
	#[serde(skip_serializing_if = "Option::is_none")]
	pub class_name: Option<String>,

	/// Group label
	#[serde(skip_serializing_if = "Option::is_none")]
	pub group: Option<String>,

	/// Prepared default value
	#[serde(skip_serializing_if = "Option::is_none")]
	pub default: Option<JsonValue>,

	/// Children and cardinality of stream blocks
	#[serde(flatten)]
	pub stream: Option<StreamDefinition>,

	/// Auxiliary HTML fragment
	#[serde(skip_serializing_if = "Option::is_none")]
	pub html: Option<String>,

	/// Marks blocks without an editable value
	#[serde(skip_serializing_if = "std::ops::Not::not")]
	pub is_static: bool,
}

/// Stream-only part of a definition
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamDefinition {
	/// Child definitions in declared order
	pub children: Vec<Arc<Definition>>,

	/// Minimum number of children; `null` when unconstrained
	pub min_num: Option<usize>,

	/// Maximum number of children; `null` when unconstrained
	pub max_num: Option<usize>,
}

impl Definition {
	/// Create a definition holding only the always-present fields
	pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			label: label.into(),
			required: false,
			layout: Layout::default(),
			dangerously_run_inner_scripts: true,
			icon: None,
			class_name: None,
			group: None,
			default: None,
			stream: None,
			html: None,
			is_static: false,
		}
	}

	/// Child definitions; empty for non-stream blocks
	pub fn children(&self) -> &[Arc<Definition>] {
		self.stream
			.as_ref()
			.map(|stream| stream.children.as_slice())
			.unwrap_or(&[])
	}

	/// Serialize to a JSON value
	pub fn to_json(&self) -> BlockResult<JsonValue> {
		Ok(serde_json::to_value(self)?)
	}
}

/// Collaborators used while resolving definitions
#[derive(Clone, Copy)]
pub struct DefinitionContext<'a> {
	cache: &'a DefinitionCache,
	render: RenderContext<'a>,
}

impl<'a> DefinitionContext<'a> {
	/// Create a resolution context
	pub fn new(
		cache: &'a DefinitionCache,
		renderer: &'a dyn TemplateRenderer,
		settings: &'a StreamFieldSettings,
	) -> Self {
		Self {
			cache,
			render: RenderContext::new(renderer, settings),
		}
	}

	/// The definition cache
	pub fn cache(&self) -> &'a DefinitionCache {
		self.cache
	}

	/// Renderer and settings
	pub fn render(&self) -> &RenderContext<'a> {
		&self.render
	}

	/// The settings
	pub fn settings(&self) -> &'a StreamFieldSettings {
		self.render.settings()
	}
}

impl std::fmt::Debug for DefinitionContext<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("DefinitionContext")
			.field("cache", self.cache)
			.field("render", &self.render)
			.finish()
	}
}

impl Block {
	/// Resolve the definition of this block placed under `parent`
	///
	/// This is the entry point for definition resolution: the result is
	/// looked up in the cache by signature and computed only on a miss.
	pub fn definition(
		&self,
		parent: Option<&Block>,
		ctx: &DefinitionContext<'_>,
	) -> BlockResult<Arc<Definition>> {
		let signature = CacheSignature::for_block(self, parent);
		ctx.cache.get_or_compute(signature, || {
			tracing::debug!(
				"Prepare definition of stream field block {} ({})",
				self.name(),
				self.identity()
			);
			self.build_definition(ctx)
		})
	}

	/// Compute the definition of this block, bypassing the cache for itself
	///
	/// Stream children are still resolved through the cache.
	pub fn build_definition(&self, ctx: &DefinitionContext<'_>) -> BlockResult<Definition> {
		match self.kind() {
			BlockKind::Stream(stream) => stream.compose_definition(self, ctx),
			BlockKind::Static(block) => block.static_definition(self, ctx),
			_ => self.base_definition(ctx),
		}
	}

	/// Definition fields shared by every block variant
	pub fn base_definition(&self, ctx: &DefinitionContext<'_>) -> BlockResult<Definition> {
		let meta = self.meta();
		let mut definition = Definition::new(self.name(), self.label());
		definition.required = meta.required;
		definition.layout = meta.layout;

		if meta.icon != ctx.settings().default_icon {
			definition.icon = Some(format!(r#"<i class="icon icon-{}"></i>"#, meta.icon));
		}
		definition.class_name = meta.classname.clone();
		definition.group = meta.group.clone().filter(|group| !group.is_empty());

		if let Some(default) = meta.default.as_ref().filter(|d| d.is_truthy()) {
			definition.default = Some(self.prepare_value(default, None, ctx.render())?);
		}

		Ok(definition)
	}
}
