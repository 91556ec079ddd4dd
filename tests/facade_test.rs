//! Facade re-export tests

use reinhardt_react_streamfield::blocks::settings::CacheScope;
use reinhardt_react_streamfield::blocks::transcode::UploadedFiles;
use reinhardt_react_streamfield::prelude::*;
use rstest::rstest;
use serde_json::json;
use std::sync::Arc;

#[rstest]
fn test_widget_through_facade() {
	// Arrange
	let settings = StreamFieldSettings::from_toml_str(r#"cache_scope = "request""#).unwrap();
	let widget = StreamFieldWidget::new(
		Arc::new(Block::new("body", StreamBlock::new().with_child(Block::leaf("heading")))),
		Arc::new(TeraTemplateRenderer::new().unwrap()),
		settings,
	)
	.unwrap();

	// Act
	let decoded = widget
		.decode(
			&json!({"value": [{"id": "x", "type": "heading", "value": "Hi"}]}),
			&UploadedFiles::new(),
		)
		.unwrap();

	// Assert
	assert_eq!(widget.settings().cache_scope, CacheScope::Request);
	assert_eq!(decoded.as_stream().unwrap().children()[0].id, "x");
	assert_eq!(widget.definition().unwrap().children()[0].key, "heading");
}
