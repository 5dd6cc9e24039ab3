//! crates/component_generator_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of the concrete LLM client and storage backend.

use async_trait::async_trait;

use crate::domain::{ChatPrompt, SavedComponent, UserId};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., network, filesystem).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Sends the prompt to the chat completion endpoint once and returns the
    /// text content of the first choice.
    async fn complete(&self, model: &str, prompt: &ChatPrompt) -> PortResult<String>;
}

#[async_trait]
pub trait ComponentStore: Send + Sync {
    /// Reads the user's current component, or `None` if none has been saved yet.
    async fn read_current(&self, user_id: &UserId) -> PortResult<Option<String>>;

    /// Overwrites the user's current component and writes a timestamped backup.
    async fn save(&self, user_id: &UserId, code: &str) -> PortResult<SavedComponent>;
}
