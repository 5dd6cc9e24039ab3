//! crates/component_generator_core/src/service.rs
//!
//! The generation workflow: build the prompt, call the completion service once,
//! extract the component, and persist it.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::{GenerationRequest, InvalidUserId, SavedComponent};
use crate::extract::extract_code_block;
use crate::ports::{CompletionService, ComponentStore, PortError};
use crate::prompt::build_prompt;

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error(transparent)]
    InvalidUserId(#[from] InvalidUserId),

    /// The model replied without a usable fenced code block.
    #[error("No JSX code block found in the response")]
    NoCodeBlock,

    #[error(transparent)]
    Port(#[from] PortError),
}

/// Orchestrates one generation request against the configured ports.
#[derive(Clone)]
pub struct ComponentGenerator {
    completion: Arc<dyn CompletionService>,
    store: Arc<dyn ComponentStore>,
}

impl ComponentGenerator {
    pub fn new(completion: Arc<dyn CompletionService>, store: Arc<dyn ComponentStore>) -> Self {
        Self { completion, store }
    }

    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<SavedComponent, GenerationError> {
        info!(
            user_id = %request.user_id,
            model = %request.model,
            modify_existing = request.modify_existing,
            has_image = request.image.is_some(),
            "User request: {}",
            request.prompt
        );

        let existing_code = if request.modify_existing {
            self.store.read_current(&request.user_id).await?
        } else {
            None
        };

        let prompt = build_prompt(request, existing_code.as_deref());
        let reply = self.completion.complete(&request.model, &prompt).await?;
        debug!(user_id = %request.user_id, "Model reply: {}", reply);

        let Some(code) = extract_code_block(&reply) else {
            warn!(user_id = %request.user_id, "Model reply contained no component code block");
            return Err(GenerationError::NoCodeBlock);
        };

        let saved = self.store.save(&request.user_id, &code).await?;
        info!(
            user_id = %request.user_id,
            backup = %saved.backup_path.display(),
            "Component updated"
        );
        Ok(saved)
    }
}
