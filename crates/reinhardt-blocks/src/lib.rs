//! # Reinhardt Blocks
//!
//! StreamField block definitions for React-based admin editors, inspired by
//! Wagtail's StreamField and wagtail-react-streamfield.
//!
//! A content model is a tree of [`Block`](block::Block) types. This crate turns
//! that tree into a JSON [`Definition`](definition::Definition) the client-side
//! editor renders, and converts content values to and from the editor's wire
//! format.
//!
//! ## Features
//!
//! - **Cached Definitions**: Definitions are computed once per cache signature and shared
//! - **Signature Discrimination**: Icon, help text, group, rich text features, chooser
//!   targets and child count all take part in the cache key
//! - **Value Transcoding**: Content values are encoded into `{id, type, hasError, value}`
//!   envelopes and decoded back from submitted form data
//! - **Stable Identifiers**: Block instance ids survive an encode/decode round trip
//!
//! ## Architecture
//!
//! ```text
//! reinhardt-blocks
//! ├── block         - Block types, metadata and content model checks
//! ├── field_block   - Leaf, rich text and chooser blocks
//! ├── static_block  - Blocks without an editable value
//! ├── stream_block  - Composite blocks and definition composition
//! ├── signature     - Cache signatures
//! ├── cache         - Definition cache
//! ├── definition    - Definition generation
//! ├── transcode     - Wire envelopes, encoding and decoding
//! ├── template      - Template rendering collaborator
//! ├── settings      - Configuration
//! └── widget        - Field-level entry point
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use reinhardt_blocks::prelude::*;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let body = Block::new(
//!     "body",
//!     StreamBlock::new()
//!         .with_child(Block::leaf("heading").with_default(json!("Untitled")))
//!         .with_child(Block::new("paragraph", RichTextBlock::new().with_features(["bold", "italic"]))),
//! );
//!
//! let widget = StreamFieldWidget::new(
//!     Arc::new(body),
//!     Arc::new(TeraTemplateRenderer::new().unwrap()),
//!     StreamFieldSettings::default(),
//! )
//! .unwrap();
//!
//! let definition = widget.definition().unwrap();
//! assert_eq!(definition.children().len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

// Re-export for callers building values
pub use serde_json;

// Module declarations
pub mod block;
pub mod cache;
pub mod definition;
pub mod field_block;
pub mod settings;
pub mod signature;
pub mod static_block;
pub mod stream_block;
pub mod template;
pub mod text;
pub mod transcode;
pub mod value;
pub mod widget;

// Prelude for convenient imports
pub mod prelude {
	//! Convenient re-exports of commonly used items

	// Content model
	pub use crate::block::{Block, BlockIdentity, BlockKind, BlockMeta, Layout};
	pub use crate::field_block::{ChooserBlock, LeafBlock, RichTextBlock};
	pub use crate::static_block::StaticBlock;
	pub use crate::stream_block::StreamBlock;

	// Definitions
	pub use crate::cache::DefinitionCache;
	pub use crate::definition::{Definition, DefinitionContext};
	pub use crate::signature::CacheSignature;

	// Values
	pub use crate::transcode::{BlockData, ValueSource, WireValue};
	pub use crate::value::{BlockValue, ErrorTree, StreamChild, StreamValue};

	// Collaborators and configuration
	pub use crate::settings::{CacheScope, StreamFieldSettings};
	pub use crate::template::{TemplateRenderer, TeraTemplateRenderer};
	pub use crate::widget::StreamFieldWidget;

	// Errors
	pub use crate::error::{BlockError, BlockResult};
}

/// Block error types
pub mod error {
	use thiserror::Error;

	/// Block-related errors
	#[derive(Error, Debug)]
	pub enum BlockError {
		/// A server-side rendering path that the React editor replaced
		#[error("{0} has been removed; blocks are rendered client-side")]
		Removed(&'static str),

		/// Malformed content model or a value incompatible with its block
		#[error("Block configuration error: {0}")]
		Configuration(String),

		/// A stream value names a child type its stream does not declare
		#[error("Block type '{child}' is not a child of '{parent}'")]
		UnknownChildBlock {
			/// Name of the stream block
			parent: String,
			/// Undeclared child type name
			child: String,
		},

		/// Submitted form data does not have the expected shape
		#[error("Invalid submitted data: {0}")]
		InvalidData(String),

		/// Template rendering failed
		#[error("Template error: {0}")]
		Template(String),

		/// Settings could not be loaded
		#[error("Settings error: {0}")]
		Settings(String),

		/// JSON serialization error
		#[error("Serialization error: {0}")]
		Serialization(#[from] serde_json::Error),
	}

	/// Result type for block operations
	pub type BlockResult<T> = Result<T, BlockError>;
}
