//! In-memory block values
//!
//! Leaf blocks hold an opaque JSON value. Stream blocks hold an ordered
//! sequence of typed children, each carrying a stable identifier that is
//! assigned once and preserved across edits.

use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Generate a fresh block instance identifier
pub fn new_block_id() -> String {
	Uuid::new_v4().to_string()
}

/// Value of a block instance
#[derive(Debug, Clone, PartialEq)]
pub enum BlockValue {
	/// Opaque value of a leaf block
	Leaf(JsonValue),

	/// Ordered children of a stream block
	Stream(StreamValue),
}

impl BlockValue {
	/// Truthiness of the value, used to decide whether a default is emitted
	///
	/// `null`, `false`, zero, empty strings, empty arrays, empty objects and
	/// empty streams are falsy.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_blocks::value::BlockValue;
	/// use serde_json::json;
	///
	/// assert!(BlockValue::from(json!("Untitled")).is_truthy());
	/// assert!(!BlockValue::from(json!("")).is_truthy());
	/// assert!(!BlockValue::from(json!(0)).is_truthy());
	/// ```
	pub fn is_truthy(&self) -> bool {
		match self {
			BlockValue::Leaf(value) => match value {
				JsonValue::Null => false,
				JsonValue::Bool(b) => *b,
				JsonValue::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
				JsonValue::String(s) => !s.is_empty(),
				JsonValue::Array(items) => !items.is_empty(),
				JsonValue::Object(map) => !map.is_empty(),
			},
			BlockValue::Stream(stream) => !stream.is_empty(),
		}
	}

	/// Get the stream children if this is a stream value
	pub fn as_stream(&self) -> Option<&StreamValue> {
		match self {
			BlockValue::Stream(stream) => Some(stream),
			BlockValue::Leaf(_) => None,
		}
	}

	/// Get the raw JSON if this is a leaf value
	pub fn as_leaf(&self) -> Option<&JsonValue> {
		match self {
			BlockValue::Leaf(value) => Some(value),
			BlockValue::Stream(_) => None,
		}
	}
}

impl From<JsonValue> for BlockValue {
	fn from(value: JsonValue) -> Self {
		BlockValue::Leaf(value)
	}
}

impl From<StreamValue> for BlockValue {
	fn from(value: StreamValue) -> Self {
		BlockValue::Stream(value)
	}
}

/// Ordered children of a stream block
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamValue {
	children: Vec<StreamChild>,
}

impl StreamValue {
	/// Create an empty stream value
	pub fn new() -> Self {
		Self::default()
	}

	/// Append a child
	pub fn push(&mut self, child: StreamChild) -> &mut Self {
		self.children.push(child);
		self
	}

	/// Append a child, builder style
	pub fn with_child(mut self, child: StreamChild) -> Self {
		self.children.push(child);
		self
	}

	/// All children in order
	pub fn children(&self) -> &[StreamChild] {
		&self.children
	}

	/// Iterate over the children in order
	pub fn iter(&self) -> std::slice::Iter<'_, StreamChild> {
		self.children.iter()
	}

	/// Number of children
	pub fn len(&self) -> usize {
		self.children.len()
	}

	/// Whether the stream has no children
	pub fn is_empty(&self) -> bool {
		self.children.is_empty()
	}
}

impl FromIterator<StreamChild> for StreamValue {
	fn from_iter<I: IntoIterator<Item = StreamChild>>(iter: I) -> Self {
		Self {
			children: iter.into_iter().collect(),
		}
	}
}

impl<'a> IntoIterator for &'a StreamValue {
	type Item = &'a StreamChild;
	type IntoIter = std::slice::Iter<'a, StreamChild>;

	fn into_iter(self) -> Self::IntoIter {
		self.children.iter()
	}
}

/// A block instance inside a stream
#[derive(Debug, Clone, PartialEq)]
pub struct StreamChild {
	/// Name of the child block type within its stream
	pub block_type: String,

	/// Child value
	pub value: BlockValue,

	/// Stable instance identifier
	pub id: String,
}

impl StreamChild {
	/// Create a child with a freshly generated identifier
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_blocks::value::StreamChild;
	/// use serde_json::json;
	///
	/// let child = StreamChild::new("heading", json!("Hello"));
	/// assert_eq!(child.block_type, "heading");
	/// assert!(!child.id.is_empty());
	/// ```
	pub fn new(block_type: impl Into<String>, value: impl Into<BlockValue>) -> Self {
		Self {
			block_type: block_type.into(),
			value: value.into(),
			id: new_block_id(),
		}
	}

	/// Create a child that keeps a previously assigned identifier
	pub fn with_id(
		block_type: impl Into<String>,
		value: impl Into<BlockValue>,
		id: impl Into<String>,
	) -> Self {
		Self {
			block_type: block_type.into(),
			value: value.into(),
			id: id.into(),
		}
	}
}

/// Structured validation errors attached to a value being encoded
///
/// For a stream block, `messages` are the errors that do not belong to any
/// child (shown in the blocks container) and `children` holds per-child errors
/// keyed by position. For a leaf block, `messages` are its own errors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorTree {
	/// Messages for this block itself
	pub messages: Vec<String>,

	/// Errors of child blocks keyed by position
	pub children: BTreeMap<usize, ErrorTree>,
}

impl ErrorTree {
	/// Create an empty error tree
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a message for this block
	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.messages.push(message.into());
		self
	}

	/// Attach errors for the child at `index`
	pub fn with_child(mut self, index: usize, errors: ErrorTree) -> Self {
		self.children.insert(index, errors);
		self
	}

	/// Errors of the child at `index`
	pub fn child(&self, index: usize) -> Option<&ErrorTree> {
		self.children.get(&index)
	}

	/// Messages that are not attached to a particular child
	pub fn non_block_errors(&self) -> &[String] {
		&self.messages
	}

	/// Whether neither this block nor any child has an error
	pub fn is_empty(&self) -> bool {
		self.messages.is_empty() && self.children.values().all(ErrorTree::is_empty)
	}
}
