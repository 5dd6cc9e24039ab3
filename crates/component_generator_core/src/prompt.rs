//! crates/component_generator_core/src/prompt.rs
//!
//! Assembles the chat message list sent to the completion endpoint.

use crate::domain::{ChatMessage, ChatPrompt, GenerationRequest, UserContent};

pub const SYSTEM_PROMPT: &str = r#"You are an expert React and TypeScript engineer who writes self-contained UI components.

Rules for every component you write:
- Output a single React function component written in TSX, exported with `export default`.
- Style it with Tailwind CSS utility classes.
- You may use the shadcn/ui primitives imported from "@/components/ui/<name>" (button, card, input, label, textarea, badge, tabs, dialog) and icons from "lucide-react". Do not import any other third-party package.
- Keep all state local with React hooks. Do not fetch remote data unless the user asks for it.
- The component must render without required props.

Reply format:
- Put the complete file in ONE fenced code block tagged `tsx`.
- Never split the component across several blocks and never elide code with comments such as "rest unchanged"."#;

/// Sent as the existing code when a user asks to modify a component they have not generated yet.
pub const PLACEHOLDER_COMPONENT: &str = r#"
import React from 'react';

export default function GeneratedComponent() {
  return (
    <div>
      <h1>Welcome to your new component!</h1>
    </div>
  );
}
"#;

/// Builds the user-facing instruction text for a request.
///
/// `existing_code` is only consulted when the request modifies an existing component.
pub fn instruction_text(request: &GenerationRequest, existing_code: Option<&str>) -> String {
    if request.modify_existing {
        let existing = existing_code.unwrap_or(PLACEHOLDER_COMPONENT);
        format!(
            "Based on the following existing code:\n\n```tsx\n{}\n```\n\n{}, please generate the complete TSX code block directly.",
            existing, request.prompt
        )
    } else {
        format!(
            "Design a TSX component that satisfies the user's query below. Reply with the code only and no extra commentary. User query: {}",
            request.prompt
        )
    }
}

/// Builds the `[system, user]` message list for a request.
pub fn build_prompt(request: &GenerationRequest, existing_code: Option<&str>) -> ChatPrompt {
    let text = instruction_text(request, existing_code);

    let user_content = match &request.image {
        Some(image_url) => UserContent::TextWithImage {
            text,
            image_url: image_url.clone(),
        },
        None => UserContent::Text(text),
    };

    ChatPrompt {
        messages: vec![
            ChatMessage::System(SYSTEM_PROMPT.to_string()),
            ChatMessage::User(user_content),
        ],
    }
}
