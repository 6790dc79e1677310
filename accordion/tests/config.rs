use std::time::Duration;

use accordion::config::{RESIZE_INTERVAL, SLIDE_DURATION};
use accordion::prelude::*;
use serde_json::json;

#[test]
fn test_parse_host_parameters() {
    let config = AccordionConfig::from_json(
        r#"{
            "hTag": "h3",
            "expandCollapseOption": "expandedFirstOnly",
            "multipleAccordionsOpen": "openMany",
            "panels": [
                {
                    "title": "Intro",
                    "content": {
                        "library": "H5P.AdvancedText 1.1",
                        "params": { "text": "<p>Hello</p>" },
                        "subContentId": "abc"
                    }
                },
                { "title": "Empty" }
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(config.heading_level, HeadingLevel::H3);
    assert_eq!(config.initial_mode, InitialMode::ExpandedFirstOnly);
    assert_eq!(config.open_mode, OpenMode::OpenMany);
    assert_eq!(config.panels.len(), 2);
    assert_eq!(config.panels[0].title, "Intro");
    assert_eq!(config.panels[0].content.machine_name(), "H5P.AdvancedText");
    assert_eq!(config.panels[0].content.version(), Some("1.1"));
    assert_eq!(config.panels[0].content.sub_content_id.as_deref(), Some("abc"));
    assert_eq!(config.panels[1].content, ContentDescriptor::default());
}

#[test]
fn test_parse_alternative_field_names() {
    let config = AccordionConfig::from_json(
        r#"{ "headingLevel": "h4", "expandCollapseMode": "expandedAll", "openMode": "openMany" }"#,
    )
    .unwrap();

    assert_eq!(config.heading_level, HeadingLevel::H4);
    assert_eq!(config.initial_mode, InitialMode::ExpandedAll);
    assert_eq!(config.open_mode, OpenMode::OpenMany);
    assert!(config.panels.is_empty());
}

#[test]
fn test_both_field_names_present() {
    let config = AccordionConfig::from_value(json!({
        "hTag": "h3",
        "headingLevel": "h5",
        "expandCollapseOption": null,
        "expandCollapseMode": "expandedAll",
        "multipleAccordionsOpen": "openMany",
        "openMode": "openOne",
        "panels": [ { "title": "Kept" } ]
    }));

    assert_eq!(config.heading_level, HeadingLevel::H3);
    assert_eq!(config.initial_mode, InitialMode::ExpandedAll);
    assert_eq!(config.open_mode, OpenMode::OpenMany);
    assert_eq!(config.panels.len(), 1);
    assert_eq!(config.panels[0].title, "Kept");
}

#[test]
fn test_missing_fields_use_defaults() {
    let config = AccordionConfig::from_json("{}").unwrap();
    assert_eq!(config, AccordionConfig::default());
    assert_eq!(config.heading_level, HeadingLevel::H2);
    assert_eq!(config.initial_mode, InitialMode::CollapsedAll);
    assert_eq!(config.open_mode, OpenMode::OpenOne);
}

#[test]
fn test_malformed_fields_fall_back_per_field() {
    let config = AccordionConfig::from_value(json!({
        "hTag": "h9",
        "expandCollapseOption": 3,
        "multipleAccordionsOpen": "openMany",
        "panels": [ { "title": "Kept" }, "not a panel", { "title": 12 } ]
    }));

    assert_eq!(config.heading_level, HeadingLevel::H2);
    assert_eq!(config.initial_mode, InitialMode::CollapsedAll);
    assert_eq!(config.open_mode, OpenMode::OpenMany);
    assert_eq!(config.panels.len(), 1);
    assert_eq!(config.panels[0].title, "Kept");
}

#[test]
fn test_non_object_parameters_use_defaults() {
    assert_eq!(AccordionConfig::from_value(json!(null)), AccordionConfig::default());
    assert_eq!(AccordionConfig::from_value(json!([1, 2])), AccordionConfig::default());
    assert!(
        AccordionConfig::from_value(json!({ "panels": "none" }))
            .panels
            .is_empty()
    );
}

#[test]
fn test_invalid_json_fails() {
    let err = AccordionConfig::from_json("{ not json").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_missing_file_fails() {
    let err = AccordionConfig::from_path("/nonexistent/accordion.json").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/accordion.json"));
}

#[test]
fn test_serializes_with_host_names() {
    let config = AccordionConfig::new()
        .heading_level(HeadingLevel::H5)
        .initial_mode(InitialMode::ExpandedAll)
        .open_mode(OpenMode::OpenMany);
    let value = serde_json::to_value(&config).unwrap();

    assert_eq!(value["hTag"], "h5");
    assert_eq!(value["expandCollapseOption"], "expandedAll");
    assert_eq!(value["multipleAccordionsOpen"], "openMany");
    assert_eq!(AccordionConfig::from_value(value), config);
}

#[test]
fn test_heading_level() {
    assert_eq!(HeadingLevel::H2.as_str(), "h2");
    assert_eq!(HeadingLevel::H6.level(), 6);
    assert_eq!(HeadingLevel::H4.to_string(), "h4");
}

#[test]
fn test_timing_defaults() {
    let timing = Timing::default();
    assert_eq!(timing.slide_duration, SLIDE_DURATION);
    assert_eq!(timing.resize_interval, RESIZE_INTERVAL);
    assert_eq!(timing.resize_interval, Duration::from_millis(40));
    assert!(!timing.reduce_motion);
    assert_eq!(timing.easing, Easing::EaseInOut);
    assert_eq!(timing.effective_slide_duration(), Duration::from_millis(200));
    assert_eq!(
        timing.reduce_motion(true).effective_slide_duration(),
        Duration::ZERO
    );
}
