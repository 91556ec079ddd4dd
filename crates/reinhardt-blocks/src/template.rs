//! Template rendering for auxiliary HTML fragments
//!
//! Definitions and wire values carry two server-rendered fragments: the
//! blocks container (stream help text and non-block errors) and the fixed
//! content of static blocks. Rendering goes through the [`TemplateRenderer`]
//! trait; [`TeraTemplateRenderer`] is the default implementation and ships
//! both templates.

use crate::error::{BlockError, BlockResult};
use crate::settings::StreamFieldSettings;
use serde_json::{Value as JsonValue, json};
use std::fmt;
use tera::{Context, Tera};

/// Template rendering stream help text and non-block errors
pub const BLOCKS_CONTAINER_TEMPLATE: &str = "wagtailadmin/block_forms/blocks_container.html";

/// Template rendering the content of a static block
pub const STATIC_BLOCK_TEMPLATE: &str = "wagtailadmin/block_forms/static_block.html";

/// Renders a named template with a JSON context
pub trait TemplateRenderer: Send + Sync {
	/// Render `template_id` with `context`
	fn render(&self, template_id: &str, context: &JsonValue) -> BlockResult<String>;
}

/// Tera-based template renderer
///
/// Templates whose names end in `.html` are autoescaped.
///
/// # Examples
///
/// ```
/// use reinhardt_blocks::template::{TemplateRenderer, TeraTemplateRenderer};
/// use serde_json::json;
///
/// let renderer = TeraTemplateRenderer::new()
///     .unwrap()
///     .with_raw_template("greeting.html", "Hello {{ name }}")
///     .unwrap();
///
/// let html = renderer.render("greeting.html", &json!({"name": "<b>"})).unwrap();
/// assert_eq!(html, "Hello &lt;b&gt;");
/// ```
pub struct TeraTemplateRenderer {
	tera: Tera,
}

impl TeraTemplateRenderer {
	/// Create a renderer with the built-in block templates registered
	pub fn new() -> BlockResult<Self> {
		let mut tera = Tera::default();
		tera.add_raw_templates(vec![
			(
				BLOCKS_CONTAINER_TEMPLATE,
				include_str!("../templates/wagtailadmin/block_forms/blocks_container.html"),
			),
			(
				STATIC_BLOCK_TEMPLATE,
				include_str!("../templates/wagtailadmin/block_forms/static_block.html"),
			),
		])
		.map_err(|e| BlockError::Template(e.to_string()))?;
		Ok(Self { tera })
	}

	/// Register or replace a template from source
	pub fn with_raw_template(mut self, name: &str, source: &str) -> BlockResult<Self> {
		self.tera
			.add_raw_template(name, source)
			.map_err(|e| BlockError::Template(e.to_string()))?;
		Ok(self)
	}

	/// Register or replace a template from a file
	pub fn with_template_file(
		mut self,
		name: &str,
		path: impl AsRef<std::path::Path>,
	) -> BlockResult<Self> {
		self.tera
			.add_template_file(path, Some(name))
			.map_err(|e| BlockError::Template(e.to_string()))?;
		Ok(self)
	}
}

impl TemplateRenderer for TeraTemplateRenderer {
	fn render(&self, template_id: &str, context: &JsonValue) -> BlockResult<String> {
		let ctx = Context::from_serialize(context)
			.map_err(|e| BlockError::Template(format!("Failed to create context: {}", e)))?;

		self.tera
			.render(template_id, &ctx)
			.map_err(|e| BlockError::Template(format!("Failed to render {}: {}", template_id, e)))
	}
}

impl fmt::Debug for TeraTemplateRenderer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut names: Vec<&str> = self.tera.get_template_names().collect();
		names.sort_unstable();
		f.debug_struct("TeraTemplateRenderer")
			.field("templates", &names)
			.finish()
	}
}

/// Renderer and settings used while preparing definitions and wire values
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
	renderer: &'a dyn TemplateRenderer,
	settings: &'a StreamFieldSettings,
}

impl<'a> RenderContext<'a> {
	/// Create a render context
	pub fn new(renderer: &'a dyn TemplateRenderer, settings: &'a StreamFieldSettings) -> Self {
		Self { renderer, settings }
	}

	/// The template renderer
	pub fn renderer(&self) -> &'a dyn TemplateRenderer {
		self.renderer
	}

	/// The settings
	pub fn settings(&self) -> &'a StreamFieldSettings {
		self.settings
	}

	/// Render the blocks container fragment
	///
	/// Returns `None` when there is neither help text nor a non-block error.
	pub fn render_blocks_container(
		&self,
		help_text: Option<&str>,
		non_block_errors: &[String],
	) -> BlockResult<Option<String>> {
		let help_text = help_text.filter(|text| !text.is_empty());
		if help_text.is_none() && non_block_errors.is_empty() {
			return Ok(None);
		}

		let context = json!({
			"help_text": help_text,
			"non_block_errors": non_block_errors,
		});
		self.renderer
			.render(&self.settings.blocks_container_template, &context)
			.map(Some)
	}

	/// Render the fixed content of a static block
	pub fn render_static_block(
		&self,
		label: &str,
		admin_text: Option<&str>,
		prefix: &str,
	) -> BlockResult<String> {
		let context = json!({
			"label": label,
			"admin_text": admin_text,
			"prefix": prefix,
		});
		self.renderer
			.render(&self.settings.static_block_template, &context)
	}
}

impl fmt::Debug for RenderContext<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RenderContext")
			.field("settings", self.settings)
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};

	#[fixture]
	fn renderer() -> TeraTemplateRenderer {
		TeraTemplateRenderer::new().unwrap()
	}

	#[rstest]
	fn test_blocks_container_skipped_when_empty(renderer: TeraTemplateRenderer) {
		// Arrange
		let settings = StreamFieldSettings::default();
		let ctx = RenderContext::new(&renderer, &settings);

		// Act & Assert
		assert_eq!(ctx.render_blocks_container(None, &[]).unwrap(), None);
		assert_eq!(ctx.render_blocks_container(Some(""), &[]).unwrap(), None);
	}

	#[rstest]
	fn test_blocks_container_help_text(renderer: TeraTemplateRenderer) {
		// Arrange
		let settings = StreamFieldSettings::default();
		let ctx = RenderContext::new(&renderer, &settings);

		// Act
		let html = ctx
			.render_blocks_container(Some("Add <b>blocks</b>"), &[])
			.unwrap()
			.unwrap();

		// Assert
		assert!(html.contains(r#"<div class="help">"#));
		assert!(html.contains("Add &lt;b&gt;blocks&lt;&#x2F;b&gt;"));
		assert!(!html.contains("help-critical"));
	}

	#[rstest]
	fn test_blocks_container_errors(renderer: TeraTemplateRenderer) {
		// Arrange
		let settings = StreamFieldSettings::default();
		let ctx = RenderContext::new(&renderer, &settings);
		let errors = vec!["Too many blocks".to_string(), "Second".to_string()];

		// Act
		let html = ctx.render_blocks_container(None, &errors).unwrap().unwrap();

		// Assert
		assert!(!html.contains(r#"class="help""#));
		assert_eq!(html.matches("help-critical").count(), 2);
		assert!(html.contains("Too many blocks"));
	}

	#[rstest]
	fn test_static_block_without_admin_text(renderer: TeraTemplateRenderer) {
		let settings = StreamFieldSettings::default();
		let ctx = RenderContext::new(&renderer, &settings);

		let html = ctx.render_static_block("Divider", None, "field-__ID__").unwrap();

		assert!(html.contains("Divider: this block has no options."));
		assert!(html.contains("field-__ID__"));
	}

	#[rstest]
	fn test_static_block_with_admin_text(renderer: TeraTemplateRenderer) {
		let settings = StreamFieldSettings::default();
		let ctx = RenderContext::new(&renderer, &settings);

		let html = ctx
			.render_static_block("Divider", Some("A horizontal rule"), "field-__ID__")
			.unwrap();

		assert!(html.contains("<p>A horizontal rule</p>"));
		assert!(!html.contains("no options"));
	}

	#[rstest]
	fn test_custom_template_override(renderer: TeraTemplateRenderer) {
		// Arrange
		let renderer = renderer
			.with_raw_template(BLOCKS_CONTAINER_TEMPLATE, "[{{ help_text }}]")
			.unwrap();
		let settings = StreamFieldSettings::default();
		let ctx = RenderContext::new(&renderer, &settings);

		// Act
		let html = ctx.render_blocks_container(Some("Help"), &[]).unwrap();

		// Assert
		assert_eq!(html.as_deref(), Some("[Help]"));
	}

	#[rstest]
	fn test_missing_template_is_an_error(renderer: TeraTemplateRenderer) {
		let result = renderer.render("missing.html", &json!({}));

		assert!(matches!(result, Err(BlockError::Template(_))));
	}
}
