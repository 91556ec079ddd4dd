//! StreamField blocks
//!
//! This module provides access to the block system through unified imports
//! from the `reinhardt_react_streamfield::blocks` namespace.
//!
//! ## Architecture
//!
//! - **Content model**: block types, stream composition and static blocks
//! - **Definitions**: cache signatures, the definition cache and definition generation
//! - **Transcoding**: wire envelopes, encoding and decoding of values
//! - **Collaborators**: template rendering and settings
//!
//! ## Example
//!
//! ```rust
//! use reinhardt_react_streamfield::blocks::*;
//!
//! let renderer = TeraTemplateRenderer::new().unwrap();
//! let settings = StreamFieldSettings::default();
//! let cache = DefinitionCache::new();
//! let ctx = DefinitionContext::new(&cache, &renderer, &settings);
//!
//! let divider = Block::new("divider", StaticBlock::new().with_admin_text("Section break"));
//! let definition = divider.definition(None, &ctx).unwrap();
//! assert!(definition.is_static);
//! ```

pub use reinhardt_blocks::prelude::*;

// Re-export submodules for structured access
pub mod cache {
	pub use reinhardt_blocks::cache::*;
}

pub mod signature {
	pub use reinhardt_blocks::signature::*;
}

pub mod settings {
	pub use reinhardt_blocks::settings::*;
}

pub mod template {
	pub use reinhardt_blocks::template::*;
}

pub mod transcode {
	pub use reinhardt_blocks::transcode::*;
}

pub mod value {
	pub use reinhardt_blocks::value::*;
}
