//! JSON block arrays as exchanged with the content repository.
//!
//! A block is `{"type": "<kind>", "<kind>": {"rich_text": [...], ...}}` and a
//! text run is `{"type": "text", "text": {"content": "..."}}`. Decoding is
//! lenient: missing bodies mean empty text, and kinds this crate does not
//! model become [`Block::Unsupported`].

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::block::{Block, Document, HeadingLevel, TextRun};
use crate::error::{Error, Result};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Body {
    #[serde(default, deserialize_with = "null_as_empty")]
    rich_text: Vec<RichText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    checked: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RichText {
    #[serde(rename = "type", default = "text_kind")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<TextContent>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TextContent {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct RawBlock {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

/// Kinds decoded into a modeled block; anything else is `Unsupported`
const MODELED_KINDS: &[&str] = &[
    "heading_1",
    "heading_2",
    "heading_3",
    "bulleted_list_item",
    "numbered_list_item",
    "paragraph",
    "quote",
    "code",
    "to_do",
];

fn text_kind() -> String {
    "text".to_string()
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<RichText>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<RichText>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Decode a JSON block array, or a `{"results": [...]}` listing.
pub fn decode_blocks(json: &str) -> Result<Vec<Block>> {
    let value: Value = serde_json::from_str(json)?;
    decode_value(value)
}

pub fn decode_value(value: Value) -> Result<Vec<Block>> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("results") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(Error::InvalidPayload(
                    "expected an array of blocks or an object with a 'results' array".to_string(),
                ));
            }
        },
        other => {
            return Err(Error::InvalidPayload(format!(
                "expected an array of blocks, found {}",
                json_type_name(&other)
            )));
        }
    };

    let blocks = items
        .into_iter()
        .map(decode_block)
        .collect::<Result<Vec<_>>>()?;
    tracing::debug!(blocks = blocks.len(), "decoded block payload");
    Ok(blocks)
}

fn decode_block(value: Value) -> Result<Block> {
    let RawBlock { kind, mut fields } = serde_json::from_value(value)?;

    // The body of an unmodeled kind can have any shape
    if !MODELED_KINDS.contains(&kind.as_str()) {
        return Ok(Block::Unsupported { kind });
    }

    let body = match fields.remove(&kind) {
        Some(Value::Null) | None => Body::default(),
        Some(body) => serde_json::from_value(body)?,
    };
    let text = runs_from(body.rich_text);

    let block = match kind.as_str() {
        "heading_1" => Block::Heading {
            level: HeadingLevel::H1,
            text,
        },
        "heading_2" => Block::Heading {
            level: HeadingLevel::H2,
            text,
        },
        "heading_3" => Block::Heading {
            level: HeadingLevel::H3,
            text,
        },
        "bulleted_list_item" => Block::BulletedListItem { text },
        "numbered_list_item" => Block::NumberedListItem { text },
        "paragraph" => Block::Paragraph { text },
        "quote" => Block::Quote { text },
        "code" => Block::CodeBlock {
            language: body.language.unwrap_or_default(),
            text,
        },
        "to_do" => Block::ToDo {
            checked: body.checked.unwrap_or(false),
            text,
        },
        _ => Block::Unsupported { kind },
    };
    Ok(block)
}

/// Runs without a `text` object (mentions, equations) carry no plain
/// content and are dropped.
fn runs_from(rich_text: Vec<RichText>) -> Vec<TextRun> {
    rich_text
        .into_iter()
        .filter_map(|run| run.text)
        .map(|text| TextRun::new(text.content))
        .collect()
}

/// Encode blocks as a JSON array ready to append to a page.
pub fn encode_blocks(blocks: &[Block]) -> Result<Value> {
    let encoded = blocks
        .iter()
        .enumerate()
        .map(|(index, block)| encode_block(index, block))
        .collect::<Result<Vec<_>>>()?;
    Ok(Value::Array(encoded))
}

/// Encode a document as `{"title": ..., "children": [...]}`.
pub fn encode_document(document: &Document) -> Result<Value> {
    let mut map = Map::new();
    map.insert("title".to_string(), Value::String(document.title.clone()));
    map.insert("children".to_string(), encode_blocks(&document.blocks)?);
    Ok(Value::Object(map))
}

fn encode_block(index: usize, block: &Block) -> Result<Value> {
    let (kind, body) = match block {
        Block::Heading { level, text } => {
            let kind = match level {
                HeadingLevel::H1 => "heading_1",
                HeadingLevel::H2 => "heading_2",
                HeadingLevel::H3 => "heading_3",
            };
            (kind, text_body(text))
        }
        Block::BulletedListItem { text } => ("bulleted_list_item", text_body(text)),
        Block::NumberedListItem { text } => ("numbered_list_item", text_body(text)),
        Block::Paragraph { text } => ("paragraph", text_body(text)),
        Block::Quote { text } => ("quote", text_body(text)),
        Block::CodeBlock { language, text } => (
            "code",
            Body {
                language: Some(language.clone()),
                ..text_body(text)
            },
        ),
        Block::ToDo { checked, text } => (
            "to_do",
            Body {
                checked: Some(*checked),
                ..text_body(text)
            },
        ),
        Block::Unsupported { kind } => {
            return Err(Error::UnsupportedBlock {
                index,
                kind: kind.clone(),
            });
        }
    };

    let mut map = Map::new();
    map.insert("type".to_string(), Value::String(kind.to_string()));
    map.insert(kind.to_string(), serde_json::to_value(body)?);
    Ok(Value::Object(map))
}

fn text_body(text: &[TextRun]) -> Body {
    Body {
        rich_text: text
            .iter()
            .map(|run| RichText {
                kind: text_kind(),
                text: Some(TextContent {
                    content: run.content.clone(),
                }),
            })
            .collect(),
        ..Body::default()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
