//! Value transcoding between content values and the editor's wire format
//!
//! On the wire, every block instance below the root travels in a
//! [`BlockData`] envelope:
//!
//! ```json
//! {"id": "5f2c…", "type": "heading", "hasError": false, "value": "Hello"}
//! ```
//!
//! The root value is sent bare. Stream values become arrays of envelopes.
//! Submitted data comes back in the same shape and is decoded with
//! [`Block::value_from_data`]; records naming a block type the stream no longer
//! declares are dropped so content survives model changes.

use crate::block::{Block, BlockKind};
use crate::error::{BlockError, BlockResult};
use crate::template::RenderContext;
use crate::value::{BlockValue, ErrorTree, StreamChild, new_block_id};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// Uploaded files accompanying submitted form data, keyed by field name
pub type UploadedFiles = HashMap<String, Vec<u8>>;

/// Wire envelope of a block instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockData {
	/// Stable instance identifier
	pub id: String,

	/// Block type name within the parent stream
	#[serde(rename = "type")]
	pub block_type: String,

	/// Whether errors were reported for this instance
	pub has_error: bool,

	/// Prepared value
	pub value: JsonValue,

	/// Help text and non-block errors of a stream with errors
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub html: Option<String>,
}

/// Encoded value of a block instance
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WireValue {
	/// Root values are sent without an envelope
	Bare(JsonValue),
	/// Values below the root
	Envelope(BlockData),
}

impl WireValue {
	/// The envelope, if this value has one
	pub fn as_envelope(&self) -> Option<&BlockData> {
		match self {
			WireValue::Envelope(data) => Some(data),
			WireValue::Bare(_) => None,
		}
	}

	/// Convert into a JSON value
	pub fn into_json(self) -> BlockResult<JsonValue> {
		match self {
			WireValue::Bare(value) => Ok(value),
			WireValue::Envelope(data) => Ok(serde_json::to_value(data)?),
		}
	}
}

/// A value handed to the encoder
///
/// Children of a stream already carry an identifier, which is reused; plain
/// values get a fresh one.
#[derive(Debug, Clone, Copy)]
pub enum ValueSource<'a> {
	/// An identified child of a stream
	Child(&'a StreamChild),
	/// A value without an identifier
	Value(&'a BlockValue),
}

impl<'a> ValueSource<'a> {
	/// Previously assigned identifier, if any
	pub fn id(&self) -> Option<&'a str> {
		match self {
			ValueSource::Child(child) => Some(&child.id),
			ValueSource::Value(_) => None,
		}
	}

	/// The inner value
	pub fn value(&self) -> &'a BlockValue {
		match self {
			ValueSource::Child(child) => &child.value,
			ValueSource::Value(value) => value,
		}
	}
}

impl<'a> From<&'a StreamChild> for ValueSource<'a> {
	fn from(child: &'a StreamChild) -> Self {
		ValueSource::Child(child)
	}
}

impl<'a> From<&'a BlockValue> for ValueSource<'a> {
	fn from(value: &'a BlockValue) -> Self {
		ValueSource::Value(value)
	}
}

impl Block {
	/// Encode a value for the client-side editor
	///
	/// Without a parent (the root of a tree) the prepared value is returned
	/// bare. Otherwise it is wrapped in a [`BlockData`] envelope typed with
	/// `type_name`, or this block's own name when absent. Streams below the
	/// root that received errors also carry their blocks container HTML.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_blocks::prelude::*;
	/// use reinhardt_blocks::template::RenderContext;
	/// use serde_json::json;
	///
	/// let renderer = TeraTemplateRenderer::new().unwrap();
	/// let settings = StreamFieldSettings::default();
	/// let ctx = RenderContext::new(&renderer, &settings);
	///
	/// let body = Block::new("body", StreamBlock::new().with_child(Block::leaf("heading")));
	/// let heading = body.as_stream().unwrap().child("heading").unwrap();
	/// let child = StreamChild::with_id("heading", json!("Hello"), "abc-123");
	///
	/// let wire = heading
	///     .prepare_for_react(Some(&body), &child, None, None, &ctx)
	///     .unwrap();
	///
	/// assert_eq!(
	///     wire.into_json().unwrap(),
	///     json!({"id": "abc-123", "type": "heading", "hasError": false, "value": "Hello"})
	/// );
	/// ```
	pub fn prepare_for_react<'v>(
		&self,
		parent: Option<&Block>,
		value: impl Into<ValueSource<'v>>,
		type_name: Option<&str>,
		errors: Option<&ErrorTree>,
		ctx: &RenderContext<'_>,
	) -> BlockResult<WireValue> {
		let source = value.into();
		let id = source.id().map_or_else(new_block_id, str::to_string);
		let prepared = self.prepare_value(source.value(), errors, ctx)?;

		if parent.is_none() {
			return Ok(WireValue::Bare(prepared));
		}

		let mut data = BlockData {
			id,
			block_type: type_name.unwrap_or(self.name()).to_string(),
			has_error: errors.is_some(),
			value: prepared,
			html: None,
		};
		if let (BlockKind::Stream(stream), Some(_)) = (self.kind(), errors) {
			data.html = stream.blocks_container_html(self, errors, ctx)?;
		}
		Ok(WireValue::Envelope(data))
	}

	/// Apply this block's value-preparation transform
	///
	/// Leaf values pass through unchanged; stream values become arrays of
	/// child envelopes.
	pub fn prepare_value(
		&self,
		value: &BlockValue,
		errors: Option<&ErrorTree>,
		ctx: &RenderContext<'_>,
	) -> BlockResult<JsonValue> {
		match (self.kind(), value) {
			(BlockKind::Stream(stream), _) => stream.prepare_stream_value(self, value, errors, ctx),
			(_, BlockValue::Leaf(value)) => Ok(value.clone()),
			(_, BlockValue::Stream(_)) => Err(BlockError::Configuration(format!(
				"block '{}' cannot prepare a stream value",
				self.name()
			))),
		}
	}

	/// Decode submitted data into a value
	///
	/// `data` is the submitted record for this block: `{"value": ...}` plus,
	/// below the root, `type` and `id`.
	pub fn value_from_data(
		&self,
		data: &JsonValue,
		files: &UploadedFiles,
		prefix: &str,
	) -> BlockResult<BlockValue> {
		match self.kind() {
			BlockKind::Stream(stream) => stream.stream_value_from_data(data, files, prefix),
			BlockKind::Static(_) => Ok(BlockValue::Leaf(JsonValue::Null)),
			_ => Ok(BlockValue::Leaf(
				data.get("value").cloned().unwrap_or(JsonValue::Null),
			)),
		}
	}

	/// Whether submitted data leaves this field out entirely
	///
	/// A missing or `null` value means omitted; an empty list is a present,
	/// empty value.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_blocks::prelude::*;
	/// use std::collections::HashMap;
	/// use serde_json::json;
	///
	/// let body = Block::new("body", StreamBlock::new());
	/// let files = HashMap::new();
	/// assert!(body.value_omitted_from_data(&json!({"value": null}), &files, ""));
	/// assert!(!body.value_omitted_from_data(&json!({"value": []}), &files, ""));
	/// ```
	pub fn value_omitted_from_data(
		&self,
		data: &JsonValue,
		_files: &UploadedFiles,
		_prefix: &str,
	) -> bool {
		data.get("value").is_none_or(JsonValue::is_null)
	}
}
