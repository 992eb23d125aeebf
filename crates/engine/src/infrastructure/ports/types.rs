//! Types exchanged across the chat and catalog ports.

use pokebot_domain::{ChannelId, UserId};

/// Accent color used on every embed.
pub const EMBED_COLOR: u32 = 0xF44336;

/// A text message received from the chat platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub user: UserId,
    pub channel: ChannelId,
    pub content: String,
}

/// Reference to a message we sent, used for edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageHandle {
    pub channel: ChannelId,
    pub id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// Rich message body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embed {
    pub title: String,
    pub description: Option<String>,
    pub fields: Vec<EmbedField>,
    pub footer: Option<String>,
    pub image_url: Option<String>,
    pub color: u32,
    /// Whether page navigation controls are attached
    pub navigation: bool,
}

impl Embed {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            fields: Vec::new(),
            footer: None,
            image_url: None,
            color: EMBED_COLOR,
            navigation: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn with_image(mut self, url: Option<String>) -> Self {
        self.image_url = url;
        self
    }

    pub fn with_navigation(mut self, navigation: bool) -> Self {
        self.navigation = navigation;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutgoingMessage {
    Text(String),
    Embed(Embed),
}

impl OutgoingMessage {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    /// Plain text content, if this is a text message.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Embed(_) => None,
        }
    }

    pub fn as_embed(&self) -> Option<&Embed> {
        match self {
            Self::Embed(embed) => Some(embed),
            Self::Text(_) => None,
        }
    }
}

impl From<Embed> for OutgoingMessage {
    fn from(embed: Embed) -> Self {
        Self::Embed(embed)
    }
}

/// Starter species offered for one generation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct StarterGeneration {
    pub generation: String,
    pub species: Vec<String>,
}
