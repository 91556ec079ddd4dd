//! # Reinhardt React StreamField
//!
//! StreamField block definitions for React-based admin editors, inspired by
//! Wagtail's StreamField and wagtail-react-streamfield.
//!
//! A content model is declared as a tree of blocks. The client-side editor
//! receives a JSON definition of that tree plus the current value encoded in
//! its wire format, and submits edited values back in the same format.
//!
//! ## Quick Example
//!
//! ```rust
//! use reinhardt_react_streamfield::prelude::*;
//! use reinhardt_react_streamfield::serde_json::json;
//! use std::sync::Arc;
//!
//! let body = Block::new(
//!     "body",
//!     StreamBlock::new()
//!         .with_child(Block::leaf("heading").with_icon("title"))
//!         .with_child(Block::new("page", ChooserBlock::new().with_target_model("blog.BlogPage"))),
//! );
//! let widget = StreamFieldWidget::new(
//!     Arc::new(body),
//!     Arc::new(TeraTemplateRenderer::new().unwrap()),
//!     StreamFieldSettings::default(),
//! )
//! .unwrap();
//!
//! let value = BlockValue::from(
//!     StreamValue::new().with_child(StreamChild::with_id("heading", json!("Hello"), "a1")),
//! );
//! let encoded = widget.encode(&value, None).unwrap();
//! assert_eq!(encoded[0]["id"], json!("a1"));
//! ```

pub mod blocks;

pub use reinhardt_blocks::serde_json;

/// Convenient re-exports of commonly used items
pub mod prelude {
	pub use reinhardt_blocks::prelude::*;
}
