//! Bracket-tag markup parser
//!
//! Recognized single-line tags: `[title]`, `[h1]`, `[h2]`, `[p]` (with inline
//! `[strong]` spans), `[img]`, `[link url="..."]`, and `[list]`/`[item]`/`[/list]`
//! blocks. Tags do not nest across lines. Lines without a recognized tag are
//! dropped; callers render the raw text instead when `has_custom_tags` is false.

use super::metadata::{split_metadata_block, Metadata, MetadataValue};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static CUSTOM_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[(title|h1|h2|p|strong|img|link|list|item)\]").expect("custom tag pattern")
});
static TITLE_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[title\](.+?)\[/title\]").expect("title pattern"));
static H1_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[h1\](.+?)\[/h1\]").expect("h1 pattern"));
static H2_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[h2\](.+?)\[/h2\]").expect("h2 pattern"));
static P_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[p\](.+?)\[/p\]").expect("p pattern"));
static STRONG_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[strong\](.+?)\[/strong\]").expect("strong pattern"));
static IMG_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[img\](.+?)\[/img\]").expect("img pattern"));
static ITEM_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[item\](.+?)\[/item\]").expect("item pattern"));
static LINK_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"url="([^"]+)""#).expect("link url pattern"));
static LINK_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\](.+?)\[/link\]").expect("link text pattern"));

/// Heading level of a heading element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    /// Page title (`[title]`), rendered at the top heading level
    Title,
    H1,
    H2,
}

/// Run of paragraph text, either plain or emphasized
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "text", rename_all = "lowercase")]
pub enum InlineSpan {
    Text(String),
    Strong(String),
}

/// Render-ready element payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementBody {
    Heading { level: HeadingLevel, text: String },
    Paragraph { spans: Vec<InlineSpan> },
    Link { url: String, text: String },
    List { items: Vec<String> },
}

/// One parsed element.
///
/// `index` is a per-file identity key for renderers; source order is the
/// element's position in [`ParsedContent::elements`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentElement {
    pub index: usize,
    #[serde(flatten)]
    pub body: ElementBody,
}

/// Output of [`parse_file_content`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedContent {
    pub elements: Vec<ContentElement>,
    pub metadata: Metadata,
    pub has_custom_tags: bool,
}

/// Whether raw text uses the bracket-tag format.
pub fn has_custom_tags(raw: &str) -> bool {
    CUSTOM_TAG.is_match(raw)
}

/// Parse a content file's raw text into elements and metadata.
pub fn parse_file_content(raw: &str) -> ParsedContent {
    let lines: Vec<&str> = raw.lines().collect();
    let (metadata, body_start) = split_metadata_block(&lines);
    let has_custom_tags = has_custom_tags(raw);

    let mut scanner = TagScanner::new(metadata);
    if has_custom_tags {
        for line in &lines[body_start..] {
            scanner.scan_line(line);
        }
    }
    let (elements, metadata) = scanner.finish();

    ParsedContent {
        elements,
        metadata,
        has_custom_tags,
    }
}

/// Line-by-line tag state machine
struct TagScanner {
    elements: Vec<ContentElement>,
    metadata: Metadata,
    index: usize,
    in_list: bool,
    list_items: Vec<String>,
}

impl TagScanner {
    fn new(metadata: Metadata) -> Self {
        Self {
            elements: Vec::new(),
            metadata,
            index: 0,
            in_list: false,
            list_items: Vec::new(),
        }
    }

    fn push(&mut self, body: ElementBody) {
        self.elements.push(ContentElement {
            index: self.index,
            body,
        });
        self.index += 1;
    }

    fn flush_list(&mut self) {
        if !self.list_items.is_empty() {
            let items = std::mem::take(&mut self.list_items);
            self.push(ElementBody::List { items });
        }
        self.in_list = false;
    }

    fn scan_line(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }

        if line.contains("[title]") {
            self.flush_list();
            let text = strip_tag(line, &TITLE_TAG);
            if !self.metadata.contains_key("title") {
                self.metadata
                    .insert("title", MetadataValue::Text(text.clone()));
            }
            self.push(ElementBody::Heading {
                level: HeadingLevel::Title,
                text,
            });
            return;
        }

        if line.contains("[h1]") {
            self.flush_list();
            let text = strip_tag(line, &H1_TAG);
            self.push(ElementBody::Heading {
                level: HeadingLevel::H1,
                text,
            });
            return;
        }

        if line.contains("[h2]") {
            self.flush_list();
            let text = strip_tag(line, &H2_TAG);
            self.push(ElementBody::Heading {
                level: HeadingLevel::H2,
                text,
            });
            return;
        }

        if line.contains("[p]") {
            self.flush_list();
            let text = strip_tag(line, &P_TAG);
            let spans = inline_spans(&text);
            self.push(ElementBody::Paragraph { spans });
            return;
        }

        if line.contains("[img]") {
            self.flush_list();
            let path = strip_tag(line, &IMG_TAG);
            self.metadata.insert("image", MetadataValue::Text(path));
            self.index += 1;
            return;
        }

        if line.contains("[link") {
            self.flush_list();
            let url = LINK_URL.captures(line).and_then(|c| c.get(1));
            let text = LINK_TEXT.captures(line).and_then(|c| c.get(1));
            if let (Some(url), Some(text)) = (url, text) {
                self.push(ElementBody::Link {
                    url: url.as_str().to_string(),
                    text: text.as_str().to_string(),
                });
            }
            return;
        }

        if line.contains("[list]") {
            self.flush_list();
            self.in_list = true;
            return;
        }

        if line.contains("[/list]") {
            self.flush_list();
            return;
        }

        if self.in_list && line.contains("[item]") {
            let text = strip_tag(line, &ITEM_TAG);
            self.list_items.push(text);
            self.index += 1;
        }
    }

    fn finish(mut self) -> (Vec<ContentElement>, Metadata) {
        self.flush_list();
        (self.elements, self.metadata)
    }
}

/// Replace every `[tag]text[/tag]` pair with its inner text and trim the line.
fn strip_tag(line: &str, pattern: &Regex) -> String {
    pattern.replace_all(line, "${1}").trim().to_string()
}

/// Split paragraph text into plain and `[strong]` runs, in source order.
fn inline_spans(text: &str) -> Vec<InlineSpan> {
    if !text.contains("[strong]") {
        return vec![InlineSpan::Text(text.to_string())];
    }

    let mut spans = Vec::new();
    let mut last = 0;
    for caps in STRONG_TAG.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            spans.push(InlineSpan::Text(text[last..whole.start()].to_string()));
        }
        spans.push(InlineSpan::Strong(inner.as_str().to_string()));
        last = whole.end();
    }
    if last < text.len() {
        spans.push(InlineSpan::Text(text[last..].to_string()));
    }
    spans
}
