//! Definition generation and stream composition tests

use assert_json_diff::assert_json_eq;
use reinhardt_blocks::prelude::*;
use reinhardt_blocks::value::StreamChild;
use rstest::{fixture, rstest};
use serde_json::json;
use std::sync::Arc;

struct Env {
	renderer: TeraTemplateRenderer,
	settings: StreamFieldSettings,
	cache: DefinitionCache,
}

impl Env {
	fn ctx(&self) -> DefinitionContext<'_> {
		DefinitionContext::new(&self.cache, &self.renderer, &self.settings)
	}
}

#[fixture]
fn env() -> Env {
	Env {
		renderer: TeraTemplateRenderer::new().unwrap(),
		settings: StreamFieldSettings::default(),
		cache: DefinitionCache::new(),
	}
}

#[rstest]
fn test_leaf_definition_shape(env: Env) {
	// Arrange
	let heading = Block::leaf("heading")
		.with_label("Heading")
		.with_required(true)
		.with_default(json!("Untitled"));

	// Act
	let definition = heading.definition(None, &env.ctx()).unwrap();

	// Assert
	assert_json_eq!(
		definition.to_json().unwrap(),
		json!({
			"key": "heading",
			"label": "Heading",
			"required": true,
			"layout": "SIMPLE",
			"dangerouslyRunInnerScripts": true,
			"default": "Untitled",
		})
	);
}

#[rstest]
fn test_optional_metadata(env: Env) {
	// Arrange
	let quote = Block::leaf("quote")
		.with_label("pull quote")
		.with_icon("openquote")
		.with_classname("wide")
		.with_group("Text")
		.with_layout(Layout::Collapsible);

	// Act
	let definition = quote.definition(None, &env.ctx()).unwrap();

	// Assert
	assert_json_eq!(
		definition.to_json().unwrap(),
		json!({
			"key": "quote",
			"label": "Pull quote",
			"required": false,
			"layout": "COLLAPSIBLE",
			"dangerouslyRunInnerScripts": true,
			"icon": "<i class=\"icon icon-openquote\"></i>",
			"className": "wide",
			"group": "Text",
		})
	);
}

#[rstest]
fn test_empty_classname_is_kept(env: Env) {
	let block = Block::leaf("plain").with_classname("");

	let value = block.definition(None, &env.ctx()).unwrap().to_json().unwrap();

	assert_eq!(value["className"], json!(""));
}

#[rstest]
#[case(json!(""))]
#[case(json!(0))]
#[case(json!(false))]
#[case(json!(null))]
#[case(json!([]))]
fn test_falsy_default_is_omitted(env: Env, #[case] default: serde_json::Value) {
	let block = Block::leaf("count").with_default(default);

	let value = block.definition(None, &env.ctx()).unwrap().to_json().unwrap();

	assert!(value.get("default").is_none());
}

#[rstest]
fn test_stream_definition_composes_children(env: Env) {
	// Arrange
	let body = Block::new(
		"body",
		StreamBlock::new()
			.with_child(Block::leaf("heading").with_icon("title"))
			.with_child(Block::new(
				"paragraph",
				RichTextBlock::new().with_features(["bold", "italic"]),
			))
			.with_min_num(1),
	);

	// Act
	let definition = body.definition(None, &env.ctx()).unwrap();

	// Assert
	assert_json_eq!(
		definition.to_json().unwrap(),
		json!({
			"key": "body",
			"label": "Body",
			"required": true,
			"layout": "SIMPLE",
			"dangerouslyRunInnerScripts": true,
			"children": [
				{
					"key": "heading",
					"label": "Heading",
					"required": false,
					"layout": "SIMPLE",
					"dangerouslyRunInnerScripts": true,
					"icon": "<i class=\"icon icon-title\"></i>",
				},
				{
					"key": "paragraph",
					"label": "Paragraph",
					"required": false,
					"layout": "SIMPLE",
					"dangerouslyRunInnerScripts": true,
				},
			],
			"minNum": 1,
			"maxNum": null,
		})
	);
}

#[rstest]
fn test_stream_help_text_renders_container_html(env: Env) {
	// Arrange
	let body = Block::new("body", StreamBlock::new().with_child(Block::leaf("heading")))
		.with_help_text("Write something");

	// Act
	let definition = body.definition(None, &env.ctx()).unwrap();

	// Assert
	let html = definition.html.as_deref().unwrap();
	assert!(html.contains("Write something"));
	assert!(!html.contains("help-critical"));
}

#[rstest]
fn test_stream_without_help_text_has_no_html(env: Env) {
	let body = Block::new("body", StreamBlock::new().with_child(Block::leaf("heading")));

	let value = body.definition(None, &env.ctx()).unwrap().to_json().unwrap();

	assert!(value.get("html").is_none());
}

#[rstest]
fn test_nested_streams(env: Env) {
	// Arrange
	let section = Block::new(
		"section",
		StreamBlock::new()
			.with_child(Block::leaf("heading"))
			.with_max_num(4),
	);
	let body = Block::new("body", StreamBlock::new().with_child(section));

	// Act
	let definition = body.definition(None, &env.ctx()).unwrap();

	// Assert
	let section = &definition.children()[0];
	assert_eq!(section.key, "section");
	assert_eq!(section.children()[0].key, "heading");
	assert_eq!(section.to_json().unwrap()["maxNum"], json!(4));
}

#[rstest]
fn test_stream_default_is_prepared_as_envelopes(env: Env) {
	// Arrange
	let default = StreamValue::new()
		.with_child(StreamChild::with_id("heading", json!("Welcome"), "first"))
		.with_child(StreamChild::new("heading", json!("Second")));
	let body = Block::new("body", StreamBlock::new().with_child(Block::leaf("heading")))
		.with_default(default);

	// Act
	let definition = body.definition(None, &env.ctx()).unwrap();

	// Assert
	let default = definition.default.as_ref().unwrap().as_array().unwrap();
	assert_eq!(default.len(), 2);
	assert_json_eq!(
		default[0],
		json!({"id": "first", "type": "heading", "hasError": false, "value": "Welcome"})
	);
	assert_eq!(default[1]["value"], json!("Second"));
}

#[rstest]
fn test_static_block_in_stream(env: Env) {
	// Arrange
	let body = Block::new(
		"body",
		StreamBlock::new().with_child(Block::new(
			"divider",
			StaticBlock::new().with_admin_text("Section break"),
		)),
	);

	// Act
	let definition = body.definition(None, &env.ctx()).unwrap();

	// Assert
	let divider = definition.children()[0].to_json().unwrap();
	assert_eq!(divider["isStatic"], json!(true));
	assert!(divider["html"].as_str().unwrap().contains("Section break"));
}

#[rstest]
fn test_definition_json_round_trips_through_serde(env: Env) {
	let body = Arc::new(Block::new(
		"body",
		StreamBlock::new().with_child(Block::leaf("heading")),
	));

	let json = serde_json::to_string(&*body.definition(None, &env.ctx()).unwrap()).unwrap();
	let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

	assert_eq!(parsed["children"][0]["key"], json!("heading"));
}

#[rstest]
fn test_template_failure_propagates() {
	// Arrange
	let renderer = TeraTemplateRenderer::new().unwrap();
	let settings = StreamFieldSettings {
		blocks_container_template: "missing.html".to_string(),
		..StreamFieldSettings::default()
	};
	let cache = DefinitionCache::new();
	let ctx = DefinitionContext::new(&cache, &renderer, &settings);
	let body = Block::new("body", StreamBlock::new()).with_help_text("Help");

	// Act
	let result = body.definition(None, &ctx);

	// Assert
	assert!(matches!(result, Err(BlockError::Template(_))));
	assert!(cache.is_empty());
}
