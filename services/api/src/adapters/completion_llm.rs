//! services/api/src/adapters/completion_llm.rs
//!
//! This module contains the adapter for the component-generating LLM.
//! It implements the `CompletionService` port from the `core` crate.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestMessageContentPartImageArgs,
        ChatCompletionRequestMessageContentPartTextArgs, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, ChatCompletionRequestUserMessageContent,
        ChatCompletionRequestUserMessageContentPart,
        CreateChatCompletionRequestArgs, ImageUrlArgs,
    },
    Client,
};
use async_trait::async_trait;
use component_generator_core::{
    ChatMessage, ChatPrompt, CompletionService, PortError, PortResult, UserContent,
};

fn build_error(e: OpenAIError) -> PortError {
    PortError::Unexpected(e.to_string())
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `CompletionService` using an OpenAI-compatible chat API.
#[derive(Clone)]
pub struct OpenAiCompletionAdapter {
    client: Client<OpenAIConfig>,
    temperature: f32,
}

impl OpenAiCompletionAdapter {
    /// Creates a new `OpenAiCompletionAdapter`.
    pub fn new(client: Client<OpenAIConfig>, temperature: f32) -> Self {
        Self {
            client,
            temperature,
        }
    }

    /// Translates the core prompt into the wire message types.
    fn to_request_messages(prompt: &ChatPrompt) -> PortResult<Vec<ChatCompletionRequestMessage>> {
        prompt.messages.iter().map(Self::to_request_message).collect()
    }

    fn to_request_message(message: &ChatMessage) -> PortResult<ChatCompletionRequestMessage> {
        let message = match message {
            ChatMessage::System(text) => ChatCompletionRequestSystemMessageArgs::default()
                .content(text.as_str())
                .build()
                .map_err(build_error)?
                .into(),
            ChatMessage::User(UserContent::Text(text)) => {
                ChatCompletionRequestUserMessageArgs::default()
                    .content(text.as_str())
                    .build()
                    .map_err(build_error)?
                    .into()
            }
            ChatMessage::User(UserContent::TextWithImage { text, image_url }) => {
                let image = ImageUrlArgs::default()
                    .url(image_url.as_str())
                    .build()
                    .map_err(build_error)?;
                let parts: Vec<ChatCompletionRequestUserMessageContentPart> = vec![
                    ChatCompletionRequestMessageContentPartTextArgs::default()
                        .text(text.as_str())
                        .build()
                        .map_err(build_error)?
                        .into(),
                    ChatCompletionRequestMessageContentPartImageArgs::default()
                        .image_url(image)
                        .build()
                        .map_err(build_error)?
                        .into(),
                ];
                ChatCompletionRequestUserMessageArgs::default()
                    .content(ChatCompletionRequestUserMessageContent::Array(parts))
                    .build()
                    .map_err(build_error)?
                    .into()
            }
        };
        Ok(message)
    }
}

//=========================================================================================
// `CompletionService` Trait Implementation
//=========================================================================================

#[async_trait]
impl CompletionService for OpenAiCompletionAdapter {
    /// Sends one non-streaming chat completion request and returns the first choice's text.
    async fn complete(&self, model: &str, prompt: &ChatPrompt) -> PortResult<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages(Self::to_request_messages(prompt)?)
            .temperature(self.temperature)
            .build()
            .map_err(build_error)?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(build_error)?;

        // Extract the text content from the first choice in the response.
        if let Some(choice) = response.choices.into_iter().next() {
            choice.message.content.ok_or_else(|| {
                PortError::Unexpected(
                    "Completion response contained no text content.".to_string(),
                )
            })
        } else {
            Err(PortError::Unexpected(
                "Completion endpoint returned no choices in its response.".to_string(),
            ))
        }
    }
}
