//! Stream blocks
//!
//! A stream block holds an ordered, typed sequence of child values. Its
//! definition is composed from the definitions of its declared children, each
//! resolved through the cache with the stream as parent.
//!
//! The server-side rendering paths of the classic editor (sorted child
//! rendering, list members, script initializers and form rendering) are gone:
//! the React editor renders streams from their definition, and every call to
//! one of those methods fails with [`BlockError::Removed`].

use crate::block::{Block, BlockIdentity};
use crate::definition::{Definition, DefinitionContext, StreamDefinition};
use crate::error::{BlockError, BlockResult};
use crate::signature::{CacheSignature, ExtendSignature, SignatureBase, SignatureExtension};
use crate::template::RenderContext;
use crate::transcode::{UploadedFiles, ValueSource};
use crate::value::{BlockValue, ErrorTree, StreamChild, StreamValue, new_block_id};
use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Composite block holding a typed sequence of children
#[derive(Debug, Clone, Default)]
pub struct StreamBlock {
	children: IndexMap<String, Arc<Block>>,
	min_num: Option<usize>,
	max_num: Option<usize>,
}

impl StreamBlock {
	/// Create a stream block without children
	pub fn new() -> Self {
		Self::default()
	}

	/// Declare a child block under its own name
	///
	/// Declaring a name twice replaces the earlier block and keeps its position.
	pub fn with_child(mut self, block: impl Into<Arc<Block>>) -> Self {
		let block = block.into();
		self.children.insert(block.name().to_string(), block);
		self
	}

	/// Minimum number of children
	pub fn with_min_num(mut self, min_num: usize) -> Self {
		self.min_num = Some(min_num);
		self
	}

	/// Maximum number of children
	pub fn with_max_num(mut self, max_num: usize) -> Self {
		self.max_num = Some(max_num);
		self
	}

	/// Declared children in order
	pub fn children(&self) -> &IndexMap<String, Arc<Block>> {
		&self.children
	}

	/// Declared child by name
	pub fn child(&self, name: &str) -> Option<&Arc<Block>> {
		self.children.get(name)
	}

	/// Number of declared children
	pub fn child_count(&self) -> usize {
		self.children.len()
	}

	/// Minimum number of children, if constrained
	pub fn min_num(&self) -> Option<usize> {
		self.min_num
	}

	/// Maximum number of children, if constrained
	pub fn max_num(&self) -> Option<usize> {
		self.max_num
	}

	/// Identity of a stream that does not declare its own
	///
	/// The variant name followed by a digest of the cardinality bounds and of
	/// every declared child's name and signature, in order. Streams declared
	/// with the same children share it; streams whose children differ
	/// anywhere below do not.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_blocks::prelude::*;
	///
	/// let a = StreamBlock::new().with_child(Block::leaf("quote"));
	/// let b = StreamBlock::new().with_child(Block::leaf("image"));
	/// assert_ne!(a.structural_identity(), b.structural_identity());
	/// ```
	pub fn structural_identity(&self) -> BlockIdentity {
		let mut hasher = DefaultHasher::new();
		self.min_num.hash(&mut hasher);
		self.max_num.hash(&mut hasher);
		for (name, child) in &self.children {
			name.hash(&mut hasher);
			CacheSignature::for_block(child, None).hash(&mut hasher);
		}
		BlockIdentity::new(format!("StreamBlock#{:016x}", hasher.finish()))
	}

	pub(crate) fn check(&self, block: &Block) -> BlockResult<()> {
		if let (Some(min), Some(max)) = (self.min_num, self.max_num) {
			if min > max {
				return Err(BlockError::Configuration(format!(
					"stream block '{}' declares min_num {} greater than max_num {}",
					block.name(),
					min,
					max
				)));
			}
		}

		for child in self.children.values() {
			child.check()?;
		}
		Ok(())
	}

	pub(crate) fn compose_definition(
		&self,
		block: &Block,
		ctx: &DefinitionContext<'_>,
	) -> BlockResult<Definition> {
		let mut definition = block.base_definition(ctx)?;

		let children = self
			.children
			.values()
			.map(|child| child.definition(Some(block), ctx))
			.collect::<BlockResult<Vec<_>>>()?;

		definition.stream = Some(StreamDefinition {
			children,
			min_num: self.min_num,
			max_num: self.max_num,
		});
		definition.html = self.blocks_container_html(block, None, ctx.render())?;
		Ok(definition)
	}

	/// Render the help text and non-block errors of this stream
	///
	/// Returns `None` when there is nothing to render.
	pub fn blocks_container_html(
		&self,
		block: &Block,
		errors: Option<&ErrorTree>,
		ctx: &RenderContext<'_>,
	) -> BlockResult<Option<String>> {
		let non_block_errors = errors.map(ErrorTree::non_block_errors).unwrap_or(&[]);
		ctx.render_blocks_container(block.meta().help_text.as_deref(), non_block_errors)
	}

	/// Encode every child with its own declared block
	pub(crate) fn prepare_stream_value(
		&self,
		block: &Block,
		value: &BlockValue,
		errors: Option<&ErrorTree>,
		ctx: &RenderContext<'_>,
	) -> BlockResult<JsonValue> {
		let stream = match value {
			BlockValue::Stream(stream) => stream,
			BlockValue::Leaf(JsonValue::Null) => return Ok(JsonValue::Array(Vec::new())),
			BlockValue::Leaf(other) => {
				return Err(BlockError::Configuration(format!(
					"stream block '{}' cannot prepare leaf value {}",
					block.name(),
					other
				)));
			}
		};

		let mut prepared = Vec::with_capacity(stream.len());
		for (index, child) in stream.iter().enumerate() {
			let child_block =
				self.child(&child.block_type)
					.ok_or_else(|| BlockError::UnknownChildBlock {
						parent: block.name().to_string(),
						child: child.block_type.clone(),
					})?;
			let child_errors = errors.and_then(|e| e.child(index));
			let wire = child_block.prepare_for_react(
				Some(block),
				ValueSource::Child(child),
				None,
				child_errors,
				ctx,
			)?;
			prepared.push(serde_json::to_value(wire)?);
		}
		Ok(JsonValue::Array(prepared))
	}

	/// Decode submitted child records into a stream value
	pub(crate) fn stream_value_from_data(
		&self,
		data: &JsonValue,
		files: &UploadedFiles,
		prefix: &str,
	) -> BlockResult<BlockValue> {
		let records = match data.get("value") {
			None | Some(JsonValue::Null) => return Ok(StreamValue::new().into()),
			Some(JsonValue::Array(records)) => records,
			Some(other) => {
				return Err(BlockError::InvalidData(format!(
					"expected a list of blocks, got {}",
					other
				)));
			}
		};

		let mut stream = StreamValue::new();
		for record in records {
			if !record.is_object() {
				return Err(BlockError::InvalidData(format!(
					"expected a block object, got {}",
					record
				)));
			}
			let Some(block_type) = record.get("type").and_then(JsonValue::as_str) else {
				tracing::debug!("Dropping submitted block without a type");
				continue;
			};
			let Some(child_block) = self.child(block_type) else {
				tracing::debug!("Dropping submitted block of unknown type '{}'", block_type);
				continue;
			};

			let value = child_block.value_from_data(record, files, prefix)?;
			let id = record
				.get("id")
				.and_then(JsonValue::as_str)
				.map(str::to_string)
				.unwrap_or_else(new_block_id);
			stream.push(StreamChild::with_id(block_type, value, id));
		}
		Ok(stream.into())
	}

	/// Children sorted for server-side rendering; removed
	pub fn sorted_child_blocks(&self) -> BlockResult<Vec<Arc<Block>>> {
		Err(BlockError::Removed("sorted_child_blocks"))
	}

	/// Server-side rendering of one list member; removed
	pub fn render_list_member(
		&self,
		_block_type_name: &str,
		_value: &BlockValue,
		_prefix: &str,
		_index: usize,
	) -> BlockResult<String> {
		Err(BlockError::Removed("render_list_member"))
	}

	/// Script initializer of the classic editor; removed
	pub fn js_initializer(&self) -> BlockResult<String> {
		Err(BlockError::Removed("js_initializer"))
	}

	/// Server-side form rendering of the stream; removed
	pub fn render_form(&self, _value: &BlockValue, _prefix: &str) -> BlockResult<String> {
		Err(BlockError::Removed("render_form"))
	}
}

impl ExtendSignature for StreamBlock {
	fn extend_signature(&self, base: SignatureBase) -> CacheSignature {
		base.extend(SignatureExtension::ChildCount(self.child_count()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::cache::DefinitionCache;
	use crate::settings::StreamFieldSettings;
	use crate::template::TeraTemplateRenderer;
	use rstest::rstest;
	use serde_json::json;
	use std::collections::HashMap;

	fn body() -> Block {
		Block::new(
			"body",
			StreamBlock::new()
				.with_child(Block::leaf("heading"))
				.with_child(Block::leaf("paragraph"))
				.with_child(Block::leaf("quote")),
		)
	}

	#[rstest]
	fn test_children_keep_declared_order() {
		let body = body();

		let names: Vec<&str> = body
			.as_stream()
			.unwrap()
			.children()
			.keys()
			.map(String::as_str)
			.collect();

		assert_eq!(names, vec!["heading", "paragraph", "quote"]);
	}

	#[rstest]
	fn test_redeclared_child_keeps_position() {
		// Arrange
		let stream = StreamBlock::new()
			.with_child(Block::leaf("a"))
			.with_child(Block::leaf("b"))
			.with_child(Block::leaf("a").with_icon("doc"));

		// Assert
		assert_eq!(stream.child_count(), 2);
		assert_eq!(stream.children().get_index(0).unwrap().0, "a");
		assert_eq!(stream.child("a").unwrap().meta().icon, "doc");
	}

	#[rstest]
	fn test_composed_definition_children_follow_declared_order() {
		// Arrange
		let renderer = TeraTemplateRenderer::new().unwrap();
		let settings = StreamFieldSettings::default();
		let cache = DefinitionCache::new();
		let ctx = DefinitionContext::new(&cache, &renderer, &settings);

		// Act
		let definition = body().definition(None, &ctx).unwrap();

		// Assert
		let keys: Vec<&str> = definition.children().iter().map(|c| c.key.as_str()).collect();
		assert_eq!(keys, vec!["heading", "paragraph", "quote"]);
		assert_eq!(cache.len(), 4);
	}

	#[rstest]
	fn test_decode_missing_value_is_empty_stream() {
		let stream = body();

		let value = stream
			.value_from_data(&json!({}), &HashMap::new(), "")
			.unwrap();

		assert_eq!(value, BlockValue::Stream(StreamValue::new()));
	}

	#[rstest]
	#[case(json!({"value": "text"}))]
	#[case(json!({"value": [1, 2]}))]
	fn test_decode_rejects_malformed_payload(#[case] payload: JsonValue) {
		let result = body().value_from_data(&payload, &HashMap::new(), "");

		assert!(matches!(result, Err(BlockError::InvalidData(_))));
	}

	#[rstest]
	fn test_decode_skips_records_without_type() {
		let payload = json!({"value": [{"value": "x"}, {"type": "heading", "value": "y", "id": "1"}]});

		let value = body().value_from_data(&payload, &HashMap::new(), "").unwrap();

		let stream = value.as_stream().unwrap();
		assert_eq!(stream.len(), 1);
		assert_eq!(stream.children()[0].id, "1");
	}
}
