//! Cache signatures
//!
//! A [`CacheSignature`] identifies everything about a block in a given tree
//! position that can change its definition. Two positions producing identical
//! definitions share a signature; a difference in any definition-affecting
//! attribute yields a different one.
//!
//! The base of every signature is the block identity, the parent identity (or
//! [`ParentIdentity::Root`]), the name, icon, help text and group. Each block
//! variant may then extend it through [`ExtendSignature`]:
//!
//! | Variant | Extension |
//! |---------|-----------|
//! | rich text with features | ordered feature names |
//! | chooser with targets | normalized target models |
//! | stream | number of direct children |
//! | anything else | none |

use crate::block::{Block, BlockIdentity, BlockKind};

/// Parent position of a block in a tree
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParentIdentity {
	/// The block is the root of its tree
	Root,
	/// The block is a child of a block with this identity
	Block(BlockIdentity),
}

/// Variant-specific part of a signature
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SignatureExtension {
	/// The variant adds nothing
	None,
	/// Rich text feature names in declared order
	Features(Vec<String>),
	/// Normalized chooser target models
	Targets(Vec<String>),
	/// Number of direct children of a stream
	ChildCount(usize),
}

/// Attributes every signature starts from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SignatureBase {
	identity: BlockIdentity,
	parent: ParentIdentity,
	name: String,
	icon: String,
	help_text: Option<String>,
	group: Option<String>,
}

impl SignatureBase {
	/// Collect the base attributes of `block` placed under `parent`
	pub fn new(block: &Block, parent: Option<&Block>) -> Self {
		let meta = block.meta();
		Self {
			identity: block.identity().clone(),
			parent: parent.map_or(ParentIdentity::Root, |p| {
				ParentIdentity::Block(p.identity().clone())
			}),
			name: block.name().to_string(),
			icon: meta.icon.clone(),
			help_text: meta.help_text.clone(),
			group: meta.group.clone(),
		}
	}

	/// Finish the signature with a variant extension
	pub fn extend(self, extension: SignatureExtension) -> CacheSignature {
		CacheSignature {
			base: self,
			extension,
		}
	}

	/// Finish the signature without an extension
	pub fn finish(self) -> CacheSignature {
		self.extend(SignatureExtension::None)
	}
}

/// Structural identity of a block in a tree position
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheSignature {
	base: SignatureBase,
	extension: SignatureExtension,
}

impl CacheSignature {
	/// Compute the signature of `block` placed under `parent`
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_blocks::prelude::*;
	///
	/// let heading = Block::leaf("heading");
	/// let body = Block::new("body", StreamBlock::new());
	///
	/// let at_root = CacheSignature::for_block(&heading, None);
	/// let in_body = CacheSignature::for_block(&heading, Some(&body));
	/// assert_ne!(at_root, in_body);
	/// assert_eq!(in_body, CacheSignature::for_block(&heading.clone(), Some(&body)));
	/// ```
	pub fn for_block(block: &Block, parent: Option<&Block>) -> Self {
		block.kind().extend_signature(SignatureBase::new(block, parent))
	}

	/// Block class identity
	pub fn identity(&self) -> &BlockIdentity {
		&self.base.identity
	}

	/// Parent position
	pub fn parent(&self) -> &ParentIdentity {
		&self.base.parent
	}

	/// Block name
	pub fn name(&self) -> &str {
		&self.base.name
	}

	/// Variant-specific extension
	pub fn extension(&self) -> &SignatureExtension {
		&self.extension
	}
}

/// Per-variant signature extension
pub trait ExtendSignature {
	/// Extend the base signature with variant-specific attributes
	fn extend_signature(&self, base: SignatureBase) -> CacheSignature {
		base.finish()
	}
}

impl ExtendSignature for BlockKind {
	fn extend_signature(&self, base: SignatureBase) -> CacheSignature {
		match self {
			BlockKind::Leaf(block) => block.extend_signature(base),
			BlockKind::RichText(block) => block.extend_signature(base),
			BlockKind::Chooser(block) => block.extend_signature(base),
			BlockKind::Stream(block) => block.extend_signature(base),
			BlockKind::Static(block) => block.extend_signature(base),
		}
	}
}
