//! Leaf block variants
//!
//! Leaf blocks hold a single opaque value. Rich text and chooser blocks carry
//! the extra configuration that takes part in their cache signature.

use crate::signature::{CacheSignature, ExtendSignature, SignatureBase, SignatureExtension};

/// Plain field block (text, number, URL, ...)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeafBlock;

impl LeafBlock {
	/// Create a leaf block
	pub fn new() -> Self {
		Self
	}
}

impl ExtendSignature for LeafBlock {}

/// Rich text block with an editor feature list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RichTextBlock {
	features: Option<Vec<String>>,
}

impl RichTextBlock {
	/// Create a rich text block using the editor's default features
	pub fn new() -> Self {
		Self::default()
	}

	/// Restrict the editor to the given features, in order
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_blocks::field_block::RichTextBlock;
	///
	/// let block = RichTextBlock::new().with_features(["bold", "italic"]);
	/// assert_eq!(block.features(), Some(&["bold".to_string(), "italic".to_string()][..]));
	/// ```
	pub fn with_features<I, S>(mut self, features: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.features = Some(features.into_iter().map(Into::into).collect());
		self
	}

	/// Declared features, if any
	pub fn features(&self) -> Option<&[String]> {
		self.features.as_deref()
	}
}

impl ExtendSignature for RichTextBlock {
	fn extend_signature(&self, base: SignatureBase) -> CacheSignature {
		match &self.features {
			Some(features) if !features.is_empty() => {
				base.extend(SignatureExtension::Features(features.clone()))
			}
			_ => base.finish(),
		}
	}
}

/// Chooser block restricted to one or more target models
///
/// Target models are Django-style `app_label.ModelName` labels, normalized to
/// lower case since model labels are case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChooserBlock {
	target_models: Vec<String>,
}

impl ChooserBlock {
	/// Create a chooser accepting any target
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a target model
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_blocks::field_block::ChooserBlock;
	///
	/// let block = ChooserBlock::new().with_target_model(" blog.BlogPage ");
	/// assert_eq!(block.target_models(), &["blog.blogpage".to_string()]);
	/// ```
	pub fn with_target_model(mut self, target: impl AsRef<str>) -> Self {
		self.target_models.push(normalize_target(target.as_ref()));
		self
	}

	/// Add several target models, keeping their order
	pub fn with_target_models<I, S>(mut self, targets: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		self.target_models
			.extend(targets.into_iter().map(|t| normalize_target(t.as_ref())));
		self
	}

	/// Normalized target models
	pub fn target_models(&self) -> &[String] {
		&self.target_models
	}
}

fn normalize_target(target: &str) -> String {
	target.trim().to_lowercase()
}

impl ExtendSignature for ChooserBlock {
	fn extend_signature(&self, base: SignatureBase) -> CacheSignature {
		if self.target_models.is_empty() {
			base.finish()
		} else {
			base.extend(SignatureExtension::Targets(self.target_models.clone()))
		}
	}
}
