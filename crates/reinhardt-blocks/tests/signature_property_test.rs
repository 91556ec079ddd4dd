//! Property-based tests for cache signatures

use proptest::prelude::*;
use reinhardt_blocks::prelude::*;
use std::sync::Arc;

fn name_strategy() -> impl Strategy<Value = String> {
	"[a-z][a-z_]{0,11}"
}

fn features_strategy() -> impl Strategy<Value = Vec<String>> {
	prop::collection::vec("[a-z]{1,8}", 1..4)
}

proptest! {
	#[test]
	fn signature_is_deterministic(
		name in name_strategy(),
		icon in "[a-z]{1,8}",
		help in proptest::option::of("[a-zA-Z ]{0,20}"),
	) {
		let build = || {
			let block = Block::leaf(name.clone()).with_icon(icon.clone());
			match &help {
				Some(help) => block.with_help_text(help.clone()),
				None => block,
			}
		};

		prop_assert_eq!(
			CacheSignature::for_block(&build(), None),
			CacheSignature::for_block(&build(), None)
		);
	}

	#[test]
	fn different_icons_never_share_a_signature(
		name in name_strategy(),
		left in "[a-z]{1,8}",
		right in "[a-z]{1,8}",
	) {
		prop_assume!(left != right);

		let left = Block::leaf(name.clone()).with_icon(left);
		let right = Block::leaf(name).with_icon(right);

		prop_assert_ne!(
			CacheSignature::for_block(&left, None),
			CacheSignature::for_block(&right, None)
		);
	}

	#[test]
	fn different_feature_lists_never_share_a_signature(
		left in features_strategy(),
		right in features_strategy(),
	) {
		prop_assume!(left != right);

		let left = Block::new("text", RichTextBlock::new().with_features(left));
		let right = Block::new("text", RichTextBlock::new().with_features(right));

		prop_assert_ne!(
			CacheSignature::for_block(&left, None),
			CacheSignature::for_block(&right, None)
		);
	}

	#[test]
	fn child_count_separates_streams(count in 0usize..6, extra in 1usize..4) {
		let stream = |n: usize| {
			let children = (0..n).fold(StreamBlock::new(), |stream, i| {
				stream.with_child(Block::leaf(format!("child_{}", i)))
			});
			Block::new("body", children)
		};

		prop_assert_ne!(
			CacheSignature::for_block(&stream(count), None),
			CacheSignature::for_block(&stream(count + extra), None)
		);
	}

	#[test]
	fn resolution_is_idempotent(names in prop::collection::btree_set(name_strategy(), 1..6)) {
		let body = names.iter().fold(StreamBlock::new(), |stream, name| {
			stream.with_child(Block::leaf(name.clone()))
		});
		let body = Block::new("body", body);
		let renderer = TeraTemplateRenderer::new().unwrap();
		let settings = StreamFieldSettings::default();
		let cache = DefinitionCache::new();
		let ctx = DefinitionContext::new(&cache, &renderer, &settings);

		let first = body.definition(None, &ctx).unwrap();
		let second = body.definition(None, &ctx).unwrap();

		prop_assert!(Arc::ptr_eq(&first, &second));
		prop_assert_eq!(first.children().len(), names.len());
		prop_assert_eq!(cache.len(), names.len() + 1);
	}
}
