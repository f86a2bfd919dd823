//! Slack Block Kit document model.
//!
//! Only the block kinds this bot ever emits are modeled. Slack echoes the
//! message blocks back on every interaction with extra fields (`block_id`,
//! etc.); serde's internally tagged enums ignore those, so an echoed document
//! deserializes straight back into [`Block`] values.

use serde::{Deserialize, Serialize};

/// The ordered block sequence constituting one message's content.
pub type MessageDocument = Vec<Block>;

/// A text object, either `plain_text` or `mrkdwn`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Text {
    PlainText {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        emoji: Option<bool>,
    },
    Mrkdwn {
        text: String,
    },
}

impl Text {
    pub fn plain(text: impl Into<String>) -> Self {
        Text::PlainText {
            text: text.into(),
            emoji: Some(true),
        }
    }

    pub fn mrkdwn(text: impl Into<String>) -> Self {
        Text::Mrkdwn { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Text::PlainText { text, .. } => text,
            Text::Mrkdwn { text } => text,
        }
    }
}

/// An interactive or visual element: a section accessory or an actions entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    Button {
        text: Text,
        action_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        style: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
    },
    Image {
        image_url: String,
        alt_text: String,
    },
}

impl Element {
    pub fn image(url: impl Into<String>, alt: impl Into<String>) -> Self {
        Element::Image {
            image_url: url.into(),
            alt_text: alt.into(),
        }
    }

    pub fn link_button(label: &str, action_id: &str, url: impl Into<String>) -> Self {
        Element::Button {
            text: Text::plain(label),
            action_id: action_id.to_string(),
            style: None,
            value: Some("view".to_string()),
            url: Some(url.into()),
        }
    }

    pub fn vote_button(label: &str, action_id: &str, style: &str, value: &str) -> Self {
        Element::Button {
            text: Text::plain(label),
            action_id: action_id.to_string(),
            style: Some(style.to_string()),
            value: Some(value.to_string()),
            url: None,
        }
    }
}

/// One visual/interactive unit within a message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Header {
        text: Text,
    },
    Divider,
    Section {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<Text>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        fields: Vec<Text>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        accessory: Option<Element>,
    },
    Actions {
        elements: Vec<Element>,
    },
    Context {
        elements: Vec<Text>,
    },
}

impl Block {
    pub fn header(text: impl Into<String>) -> Self {
        Block::Header {
            text: Text::plain(text),
        }
    }

    pub fn section(text: Text) -> Self {
        Block::Section {
            text: Some(text),
            fields: Vec::new(),
            accessory: None,
        }
    }

    pub fn section_with_accessory(text: Text, accessory: Element) -> Self {
        Block::Section {
            text: Some(text),
            fields: Vec::new(),
            accessory: Some(accessory),
        }
    }

    pub fn field_section(fields: Vec<Text>) -> Self {
        Block::Section {
            text: None,
            fields,
            accessory: None,
        }
    }

    pub fn context(line: impl Into<String>) -> Self {
        Block::Context {
            elements: vec![Text::mrkdwn(line)],
        }
    }

    pub fn is_actions(&self) -> bool {
        matches!(self, Block::Actions { .. })
    }

    pub fn is_context(&self) -> bool {
        matches!(self, Block::Context { .. })
    }

    /// Text of the first context element, if this is a context block.
    pub fn context_text(&self) -> Option<&str> {
        match self {
            Block::Context { elements } => elements.first().map(Text::as_str),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn header_serializes_to_block_kit_shape() {
        let block = Block::header("Garlic Soup");
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "header",
                "text": { "type": "plain_text", "text": "Garlic Soup", "emoji": true }
            })
        );
    }

    #[test]
    fn divider_is_bare_type_tag() {
        let value = serde_json::to_value(Block::Divider).unwrap();
        assert_eq!(value, json!({ "type": "divider" }));
    }

    #[test]
    fn section_omits_absent_accessory_and_fields() {
        let value = serde_json::to_value(Block::section(Text::mrkdwn("hello"))).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "section",
                "text": { "type": "mrkdwn", "text": "hello" }
            })
        );
    }

    #[test]
    fn echoed_blocks_with_extra_fields_deserialize() {
        // Slack adds block_id (and more) when echoing the message back.
        let echoed = json!([
            { "type": "header", "block_id": "abc", "text": { "type": "plain_text", "text": "T", "emoji": true } },
            { "type": "divider", "block_id": "def" },
            { "type": "actions", "block_id": "ghi", "elements": [
                { "type": "button", "action_id": "yes", "style": "primary", "value": "true",
                  "text": { "type": "plain_text", "text": "Yes", "emoji": true } }
            ] },
            { "type": "context", "block_id": "jkl", "elements": [
                { "type": "mrkdwn", "text": "alice voted yes (U1)", "verbatim": false }
            ] }
        ]);

        let blocks: MessageDocument = serde_json::from_value(echoed).unwrap();
        assert_eq!(blocks.len(), 4);
        assert!(blocks[2].is_actions());
        assert_eq!(blocks[3].context_text(), Some("alice voted yes (U1)"));
    }
}
