//! Block types
//!
//! A [`Block`] describes a kind of content unit in a StreamField content
//! model: its name within the parent, display metadata, default value and its
//! variant ([`BlockKind`]). Blocks are immutable once built and are shared
//! behind [`Arc`] by every document that uses them.
//!
//! ```rust
//! use reinhardt_blocks::prelude::*;
//! use serde_json::json;
//!
//! let body = Block::new(
//!     "body",
//!     StreamBlock::new()
//!         .with_child(Block::leaf("heading").with_icon("title"))
//!         .with_child(Block::new("paragraph", RichTextBlock::new().with_features(["bold"])))
//!         .with_max_num(10),
//! );
//!
//! assert!(body.check().is_ok());
//! assert_eq!(body.label(), "Body");
//! ```

use crate::error::{BlockError, BlockResult};
use crate::field_block::{ChooserBlock, LeafBlock, RichTextBlock};
use crate::static_block::StaticBlock;
use crate::stream_block::StreamBlock;
use crate::text::{capfirst, label_from_name};
use crate::value::BlockValue;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use std::sync::Arc;

/// Icon every block inherits unless it declares its own
pub const DEFAULT_ICON: &str = "placeholder";

/// Identity of a block class
///
/// Blocks built from the same declaration share an identity; it is the
/// "type" half of a cache signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockIdentity(Arc<str>);

impl BlockIdentity {
	/// Create an identity
	pub fn new(identity: impl AsRef<str>) -> Self {
		Self(Arc::from(identity.as_ref()))
	}

	/// The identity as a string
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for BlockIdentity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for BlockIdentity {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}

impl From<String> for BlockIdentity {
	fn from(value: String) -> Self {
		Self::new(value)
	}
}

/// How the client lays a block out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Layout {
	/// Rendered inline
	#[default]
	Simple,
	/// Rendered in a panel that can be collapsed
	Collapsible,
}

/// Display and behavior metadata of a block
#[derive(Debug, Clone, PartialEq)]
pub struct BlockMeta {
	/// Declared label; derived from the name when absent
	pub label: Option<String>,
	/// Whether a value is required
	pub required: bool,
	/// Default value for new instances
	pub default: Option<BlockValue>,
	/// Icon name
	pub icon: String,
	/// CSS class name
	pub classname: Option<String>,
	/// Group label used by the block picker
	pub group: Option<String>,
	/// Help text
	pub help_text: Option<String>,
	/// Layout mode
	pub layout: Layout,
}

impl BlockMeta {
	fn for_kind(kind: &BlockKind) -> Self {
		Self {
			label: None,
			// Streams are required unless declared otherwise
			required: matches!(kind, BlockKind::Stream(_)),
			default: None,
			icon: DEFAULT_ICON.to_string(),
			classname: None,
			group: None,
			help_text: None,
			layout: Layout::default(),
		}
	}
}

/// The closed set of block variants
#[derive(Debug, Clone)]
pub enum BlockKind {
	/// Plain field block
	Leaf(LeafBlock),
	/// Rich text editor with a feature list
	RichText(RichTextBlock),
	/// Chooser restricted to target models
	Chooser(ChooserBlock),
	/// Composite block holding a typed sequence of children
	Stream(StreamBlock),
	/// Block with no editable value
	Static(StaticBlock),
}

impl BlockKind {
	/// Variant name, used as the identity of a non-stream block that does not
	/// declare its own
	///
	/// Streams extend it with a digest of their declared children, see
	/// [`StreamBlock::structural_identity`].
	pub fn default_identity(&self) -> &'static str {
		match self {
			BlockKind::Leaf(_) => "LeafBlock",
			BlockKind::RichText(_) => "RichTextBlock",
			BlockKind::Chooser(_) => "ChooserBlock",
			BlockKind::Stream(_) => "StreamBlock",
			BlockKind::Static(_) => "StaticBlock",
		}
	}
}

impl From<LeafBlock> for BlockKind {
	fn from(block: LeafBlock) -> Self {
		BlockKind::Leaf(block)
	}
}

impl From<RichTextBlock> for BlockKind {
	fn from(block: RichTextBlock) -> Self {
		BlockKind::RichText(block)
	}
}

impl From<ChooserBlock> for BlockKind {
	fn from(block: ChooserBlock) -> Self {
		BlockKind::Chooser(block)
	}
}

impl From<StreamBlock> for BlockKind {
	fn from(block: StreamBlock) -> Self {
		BlockKind::Stream(block)
	}
}

impl From<StaticBlock> for BlockKind {
	fn from(block: StaticBlock) -> Self {
		BlockKind::Static(block)
	}
}

/// A block type in a content model
#[derive(Debug, Clone)]
pub struct Block {
	identity: BlockIdentity,
	name: String,
	meta: BlockMeta,
	kind: BlockKind,
}

impl Block {
	/// Create a block of the given variant
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_blocks::prelude::*;
	///
	/// let block = Block::new("subtitle", LeafBlock::new());
	/// assert_eq!(block.name(), "subtitle");
	/// assert_eq!(block.identity().as_str(), "LeafBlock");
	/// assert!(!block.meta().required);
	/// ```
	pub fn new(name: impl Into<String>, kind: impl Into<BlockKind>) -> Self {
		let kind = kind.into();
		let identity = match &kind {
			BlockKind::Stream(stream) => stream.structural_identity(),
			other => BlockIdentity::new(other.default_identity()),
		};
		Self {
			identity,
			name: name.into(),
			meta: BlockMeta::for_kind(&kind),
			kind,
		}
	}

	/// Create a plain leaf block
	pub fn leaf(name: impl Into<String>) -> Self {
		Self::new(name, LeafBlock::new())
	}

	/// Set the block class identity
	pub fn with_identity(mut self, identity: impl Into<BlockIdentity>) -> Self {
		self.identity = identity.into();
		self
	}

	/// Set the label
	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.meta.label = Some(label.into());
		self
	}

	/// Set whether a value is required
	pub fn with_required(mut self, required: bool) -> Self {
		self.meta.required = required;
		self
	}

	/// Set the default value
	pub fn with_default(mut self, default: impl Into<BlockValue>) -> Self {
		self.meta.default = Some(default.into());
		self
	}

	/// Set the icon
	pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
		self.meta.icon = icon.into();
		self
	}

	/// Set the CSS class name
	pub fn with_classname(mut self, classname: impl Into<String>) -> Self {
		self.meta.classname = Some(classname.into());
		self
	}

	/// Set the group label
	pub fn with_group(mut self, group: impl Into<String>) -> Self {
		self.meta.group = Some(group.into());
		self
	}

	/// Set the help text
	pub fn with_help_text(mut self, help_text: impl Into<String>) -> Self {
		self.meta.help_text = Some(help_text.into());
		self
	}

	/// Set the layout mode
	pub fn with_layout(mut self, layout: Layout) -> Self {
		self.meta.layout = layout;
		self
	}

	/// Block class identity
	pub fn identity(&self) -> &BlockIdentity {
		&self.identity
	}

	/// Name within the parent's children
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Metadata
	pub fn meta(&self) -> &BlockMeta {
		&self.meta
	}

	/// Variant
	pub fn kind(&self) -> &BlockKind {
		&self.kind
	}

	/// Display label with its first letter capitalized
	pub fn label(&self) -> String {
		match &self.meta.label {
			Some(label) => capfirst(label),
			None => label_from_name(&self.name),
		}
	}

	/// The stream variant, if this is a stream block
	pub fn as_stream(&self) -> Option<&StreamBlock> {
		match &self.kind {
			BlockKind::Stream(stream) => Some(stream),
			_ => None,
		}
	}

	/// Validate the content model rooted at this block
	///
	/// Checks that declared defaults fit their blocks and that stream
	/// cardinality bounds are consistent, recursing into children.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_blocks::prelude::*;
	///
	/// let body = Block::new("body", StreamBlock::new().with_min_num(3).with_max_num(1));
	/// assert!(matches!(body.check(), Err(BlockError::Configuration(_))));
	/// ```
	pub fn check(&self) -> BlockResult<()> {
		if let Some(default) = &self.meta.default {
			self.check_value(default).map_err(|e| {
				BlockError::Configuration(format!(
					"default value of block '{}' is invalid: {}",
					self.name, e
				))
			})?;
		}

		if let BlockKind::Stream(stream) = &self.kind {
			stream.check(self)?;
		}

		Ok(())
	}

	/// Check that a value has the shape this block expects
	pub fn check_value(&self, value: &BlockValue) -> BlockResult<()> {
		match (&self.kind, value) {
			(BlockKind::Stream(stream), BlockValue::Stream(children)) => {
				for child in children {
					let child_block = stream.child(&child.block_type).ok_or_else(|| {
						BlockError::UnknownChildBlock {
							parent: self.name.clone(),
							child: child.block_type.clone(),
						}
					})?;
					child_block.check_value(&child.value)?;
				}
				Ok(())
			}
			(BlockKind::Stream(_), BlockValue::Leaf(JsonValue::Null)) => Ok(()),
			(BlockKind::Stream(_), BlockValue::Leaf(other)) => Err(BlockError::Configuration(
				format!("stream block '{}' cannot hold leaf value {}", self.name, other),
			)),
			(_, BlockValue::Stream(_)) => Err(BlockError::Configuration(format!(
				"block '{}' cannot hold a stream value",
				self.name
			))),
			(_, BlockValue::Leaf(_)) => Ok(()),
		}
	}

	/// Legacy media declarations of a block
	///
	/// Always fails: block media is bundled with the client-side editor.
	pub fn html_declarations(&self) -> BlockResult<String> {
		Err(BlockError::Removed("html_declarations"))
	}

	/// Legacy media declarations of a block and all of its descendants
	///
	/// Always fails: block media is bundled with the client-side editor.
	pub fn all_html_declarations(&self) -> BlockResult<String> {
		Err(BlockError::Removed("all_html_declarations"))
	}
}
