//! Content types the terminal host can show inside panels.

use accordion::prelude::*;
use scraper::{ElementRef, Html};
use serde_json::Value;

/// Library whose `params.text` holds HTML text.
const ADVANCED_TEXT: &str = "H5P.AdvancedText";

/// Library grouping several content items, as produced by parameter upgrades.
const COLUMN: &str = "H5P.Column";

/// Instantiates text content; anything else becomes a placeholder line.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextContentFactory;

impl ContentFactory for TextContentFactory {
    fn instantiate(
        &self,
        descriptor: &ContentDescriptor,
        _context_id: &str,
    ) -> Result<Box<dyn ContentInstance>, ContentError> {
        if descriptor.library.is_empty() {
            return Err(ContentError::MissingLibrary);
        }
        Ok(Box::new(TextContent::from_descriptor(descriptor)))
    }
}

/// Lines of plain text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextContent {
    lines: Vec<String>,
}

impl TextContent {
    fn from_descriptor(descriptor: &ContentDescriptor) -> Self {
        let mut lines = Vec::new();
        collect_lines(descriptor, &mut lines);
        Self { lines }
    }
}

impl ContentInstance for TextContent {
    fn attach(&mut self, region: &mut Region) {
        region.clear();
        for line in &self.lines {
            region.push_line(line.clone());
        }
    }
}

fn collect_lines(descriptor: &ContentDescriptor, lines: &mut Vec<String>) {
    match descriptor.machine_name() {
        ADVANCED_TEXT => {
            let text = descriptor.params["text"].as_str().unwrap_or_default();
            lines.extend(html_to_lines(text));
        }
        COLUMN => {
            let items = descriptor.params["content"].as_array().cloned().unwrap_or_default();
            for item in items {
                if let Some(child) = item.get("content").and_then(descriptor_from) {
                    collect_lines(&child, lines);
                }
            }
        }
        other => lines.push(format!("[{}]", other)),
    }
}

fn descriptor_from(value: &Value) -> Option<ContentDescriptor> {
    serde_json::from_value(value.clone()).ok()
}

/// Elements that start and end a line of text.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "blockquote", "dd", "div", "dl", "dt", "figcaption", "figure",
    "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "ol", "p", "pre",
    "section", "table", "td", "th", "tr", "ul",
];

/// Elements whose text is never shown.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "template"];

/// Text of an HTML fragment, one line per block element.
pub fn html_to_lines(html: &str) -> Vec<String> {
    let fragment = Html::parse_fragment(html);
    let mut lines = Vec::new();
    let mut current = String::new();
    collect_text(fragment.root_element(), &mut current, &mut lines);
    flush_line(&mut current, &mut lines);
    lines
}

fn collect_text(element: ElementRef<'_>, current: &mut String, lines: &mut Vec<String>) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            current.push_str(text);
            continue;
        }
        let Some(child) = ElementRef::wrap(child) else {
            continue;
        };
        let name = child.value().name();
        if name == "br" {
            flush_line(current, lines);
        } else if HIDDEN_ELEMENTS.contains(&name) {
            continue;
        } else if BLOCK_ELEMENTS.contains(&name) {
            flush_line(current, lines);
            collect_text(child, current, lines);
            flush_line(current, lines);
        } else {
            collect_text(child, current, lines);
        }
    }
}

fn flush_line(current: &mut String, lines: &mut Vec<String>) {
    let line = current.split_whitespace().collect::<Vec<_>>().join(" ");
    if !line.is_empty() {
        lines.push(line);
    }
    current.clear();
}
