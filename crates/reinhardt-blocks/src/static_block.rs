//! Static blocks
//!
//! A static block has no editable value; the editor shows fixed content
//! rendered on the server.

use crate::block::Block;
use crate::definition::{Definition, DefinitionContext};
use crate::error::BlockResult;
use crate::signature::ExtendSignature;
use crate::template::RenderContext;

/// Block with no user-editable value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticBlock {
	admin_text: Option<String>,
}

impl StaticBlock {
	/// Create a static block
	pub fn new() -> Self {
		Self::default()
	}

	/// Text shown in the editor in place of a form
	pub fn with_admin_text(mut self, admin_text: impl Into<String>) -> Self {
		self.admin_text = Some(admin_text.into());
		self
	}

	/// Text shown in the editor, if declared
	pub fn admin_text(&self) -> Option<&str> {
		self.admin_text.as_deref()
	}

	pub(crate) fn static_definition(
		&self,
		block: &Block,
		ctx: &DefinitionContext<'_>,
	) -> BlockResult<Definition> {
		let mut definition = block.base_definition(ctx)?;
		definition.is_static = true;
		definition.html = Some(self.render_form(block, ctx.render())?);
		Ok(definition)
	}

	/// Render the fixed content under the placeholder field name
	pub fn render_form(&self, block: &Block, ctx: &RenderContext<'_>) -> BlockResult<String> {
		ctx.render_static_block(
			&block.label(),
			self.admin_text(),
			&ctx.settings().field_name_template,
		)
	}
}

impl ExtendSignature for StaticBlock {}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::cache::DefinitionCache;
	use crate::settings::StreamFieldSettings;
	use crate::template::TeraTemplateRenderer;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_static_definition() {
		// Arrange
		let renderer = TeraTemplateRenderer::new().unwrap();
		let settings = StreamFieldSettings::default();
		let cache = DefinitionCache::new();
		let ctx = DefinitionContext::new(&cache, &renderer, &settings);
		let divider = Block::new("divider", StaticBlock::new().with_admin_text("Horizontal rule"));

		// Act
		let definition = divider.definition(None, &ctx).unwrap();
		let value = definition.to_json().unwrap();

		// Assert
		assert_eq!(value["isStatic"], json!(true));
		assert_eq!(value["key"], json!("divider"));
		let html = value["html"].as_str().unwrap();
		assert!(html.contains("Horizontal rule"));
		assert!(html.contains("field-__ID__"));
	}

	#[rstest]
	fn test_static_definition_without_admin_text_uses_label() {
		let renderer = TeraTemplateRenderer::new().unwrap();
		let settings = StreamFieldSettings::default();
		let cache = DefinitionCache::new();
		let ctx = DefinitionContext::new(&cache, &renderer, &settings);
		let divider = Block::new("page_break", StaticBlock::new());

		let definition = divider.definition(None, &ctx).unwrap();

		assert!(
			definition
				.html
				.as_deref()
				.unwrap()
				.contains("Page break: this block has no options.")
		);
	}
}
