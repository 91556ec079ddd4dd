//! StreamField widget
//!
//! [`StreamFieldWidget`] is what a form field talks to: it owns the root block
//! of a content model together with its renderer, settings and definition
//! cache, and exposes the three operations the editor needs: the definition,
//! encoding of the current value and decoding of submitted data.

use crate::block::Block;
use crate::cache::DefinitionCache;
use crate::definition::{Definition, DefinitionContext};
use crate::error::BlockResult;
use crate::settings::{CacheScope, StreamFieldSettings};
use crate::template::{RenderContext, TemplateRenderer};
use crate::transcode::UploadedFiles;
use crate::value::{BlockValue, ErrorTree};
use serde_json::Value as JsonValue;
use std::fmt;
use std::sync::Arc;

/// Field-level entry point for the React StreamField editor
pub struct StreamFieldWidget {
	root: Arc<Block>,
	renderer: Arc<dyn TemplateRenderer>,
	settings: StreamFieldSettings,
	cache: Arc<DefinitionCache>,
}

impl StreamFieldWidget {
	/// Create a widget for the content model rooted at `root`
	///
	/// The content model is checked first; a malformed model is a
	/// configuration error.
	pub fn new(
		root: Arc<Block>,
		renderer: Arc<dyn TemplateRenderer>,
		settings: StreamFieldSettings,
	) -> BlockResult<Self> {
		root.check()?;
		Ok(Self {
			root,
			renderer,
			settings,
			cache: Arc::new(DefinitionCache::new()),
		})
	}

	/// Share a host-owned definition cache
	///
	/// Widgets sharing a cache reuse each other's definitions. An injected
	/// cache is always used, so this switches the widget to
	/// [`CacheScope::Process`] even when the settings ask for
	/// [`CacheScope::Request`].
	pub fn with_cache(mut self, cache: Arc<DefinitionCache>) -> Self {
		self.cache = cache;
		self.settings.cache_scope = CacheScope::Process;
		self
	}

	/// Root block
	pub fn root(&self) -> &Arc<Block> {
		&self.root
	}

	/// Settings
	pub fn settings(&self) -> &StreamFieldSettings {
		&self.settings
	}

	/// Definition cache used by [`StreamFieldWidget::definition`]
	///
	/// Stays empty under [`CacheScope::Request`], where each call resolves
	/// against a cache of its own.
	pub fn cache(&self) -> &Arc<DefinitionCache> {
		&self.cache
	}

	fn render_context(&self) -> RenderContext<'_> {
		RenderContext::new(self.renderer.as_ref(), &self.settings)
	}

	/// Definition of the root block
	///
	/// With [`CacheScope::Request`] every call resolves against a fresh cache.
	pub fn definition(&self) -> BlockResult<Arc<Definition>> {
		match self.settings.cache_scope {
			CacheScope::Process => self.resolve(&self.cache),
			CacheScope::Request => self.resolve(&DefinitionCache::new()),
		}
	}

	fn resolve(&self, cache: &DefinitionCache) -> BlockResult<Arc<Definition>> {
		let ctx = DefinitionContext::new(cache, self.renderer.as_ref(), &self.settings);
		self.root.definition(None, &ctx)
	}

	/// Definition of the root block as a JSON string
	pub fn definition_json(&self) -> BlockResult<String> {
		Ok(serde_json::to_string(&*self.definition()?)?)
	}

	/// Encode the field value for the editor
	pub fn encode(&self, value: &BlockValue, errors: Option<&ErrorTree>) -> BlockResult<JsonValue> {
		self.root
			.prepare_for_react(None, value, None, errors, &self.render_context())?
			.into_json()
	}

	/// Decode a submitted payload into the field value
	pub fn decode(&self, payload: &JsonValue, files: &UploadedFiles) -> BlockResult<BlockValue> {
		self.root
			.value_from_data(payload, files, &self.settings.field_prefix)
	}

	/// Whether a submitted payload leaves the field out
	pub fn value_omitted(&self, payload: &JsonValue, files: &UploadedFiles) -> bool {
		self.root
			.value_omitted_from_data(payload, files, &self.settings.field_prefix)
	}
}

impl fmt::Debug for StreamFieldWidget {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("StreamFieldWidget")
			.field("root", &self.root.name())
			.field("settings", &self.settings)
			.field("cache", &self.cache)
			.finish_non_exhaustive()
	}
}
