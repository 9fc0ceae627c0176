use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    #[must_use]
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

pub trait LlmProvider: Send + Sync {
    /// Send messages to the LLM and return the assistant response.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails to communicate or the response is invalid.
    fn chat(
        &self,
        messages: &[Message],
    ) -> impl Future<Output = Result<String, crate::LlmError>> + Send;

    /// Embed text into a fixed-dimension vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider has no embedding model configured
    /// or the embedding call fails.
    fn embed(&self, text: &str) -> impl Future<Output = Result<Vec<f32>, crate::LlmError>> + Send;

    fn supports_embeddings(&self) -> bool;

    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            "\"assistant\""
        );
    }

    #[test]
    fn message_new_converts_content() {
        let msg = Message::new(Role::System, "hello");
        assert_eq!(msg.role, Role::System);
        assert_eq!(msg.content, "hello");
    }
}
