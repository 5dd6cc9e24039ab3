pub mod domain;
pub mod extract;
pub mod ports;
pub mod prompt;
pub mod service;

pub use domain::{
    ChatMessage, ChatPrompt, GenerationRequest, InvalidUserId, SavedComponent, UserContent, UserId,
};
pub use extract::extract_code_block;
pub use ports::{CompletionService, ComponentStore, PortError, PortResult};
pub use service::{ComponentGenerator, GenerationError};
