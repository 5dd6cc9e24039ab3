//! crates/component_generator_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any HTTP, filesystem, or LLM client types.

use std::fmt;
use std::path::PathBuf;

/// Longest user id accepted as a path segment.
pub const MAX_USER_ID_LEN: usize = 128;

/// Returned when a raw user id cannot be used as a path segment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid user_id '{0}': expected 1-128 characters of [A-Za-z0-9_-]")]
pub struct InvalidUserId(pub String);

/// A user identifier that is safe to embed in a file name.
///
/// Only ASCII letters, digits, `_` and `-` are allowed, so a value can never
/// name a parent directory or escape the components/backups folders.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    pub fn parse(raw: &str) -> Result<Self, InvalidUserId> {
        let valid = !raw.is_empty()
            && raw.len() <= MAX_USER_ID_LEN
            && raw
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');

        if valid {
            Ok(Self(raw.to_string()))
        } else {
            Err(InvalidUserId(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single component generation request, already authenticated.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    /// Image reference (URL or data URL) sent alongside the prompt.
    pub image: Option<String>,
    /// Whether the user's current component is sent as context.
    pub modify_existing: bool,
    pub model: String,
    pub user_id: UserId,
}

/// The content of a user chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserContent {
    Text(String),
    /// Two-part multimodal content: a text part followed by an image part.
    TextWithImage { text: String, image_url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatMessage {
    System(String),
    User(UserContent),
}

/// The ordered message list sent to the completion endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatPrompt {
    pub messages: Vec<ChatMessage>,
}

/// The files written by a successful component update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedComponent {
    pub current_path: PathBuf,
    pub backup_path: PathBuf,
}
