//! Outbound messages produced by a turn.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutboundMessage {
    Text {
        text: String,
    },
    /// A prompt offering a fixed list of choices.
    Choices {
        text: String,
        choices: Vec<String>,
    },
    /// A rich animation card.
    Animation {
        title: String,
        media_url: String,
    },
}

impl OutboundMessage {
    pub fn text(text: impl Into<String>) -> Self {
        OutboundMessage::Text { text: text.into() }
    }

    pub fn choices<S: Into<String>>(text: impl Into<String>, choices: impl IntoIterator<Item = S>) -> Self {
        OutboundMessage::Choices {
            text: text.into(),
            choices: choices.into_iter().map(Into::into).collect(),
        }
    }

    pub fn animation(title: impl Into<String>, media_url: impl Into<String>) -> Self {
        OutboundMessage::Animation {
            title: title.into(),
            media_url: media_url.into(),
        }
    }

    /// The text a user reads, if the message has any.
    pub fn text_content(&self) -> Option<&str> {
        match self {
            OutboundMessage::Text { text } | OutboundMessage::Choices { text, .. } => Some(text),
            OutboundMessage::Animation { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_value(OutboundMessage::choices("Pick", ["yes", "no"])).unwrap();
        assert_eq!(json["kind"], "choices");
        assert_eq!(json["choices"][1], "no");
    }

    #[test]
    fn animation_has_no_text_content() {
        assert_eq!(OutboundMessage::animation("Bon Appetit!", "http://x").text_content(), None);
        assert_eq!(OutboundMessage::text("hi").text_content(), Some("hi"));
    }
}
