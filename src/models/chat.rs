use serde::{ Serialize, Deserialize };
use std::fmt;

pub const USER_LABEL: &str = "You";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self { role, content: content.into() }
    }
}

/// The conversation so far, one entry per speaker per turn.
///
/// Entries are only ever appended. The user label is right-aligned to the
/// width of the model name so rendered lines keep their colons in one column.
#[derive(Clone, Debug)]
pub struct Transcript {
    model: String,
    user_label: String,
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new(model: impl Into<String>) -> Self {
        let model = model.into();
        let width = model.chars().count().max(USER_LABEL.chars().count());
        let user_label = format!("{:>width$}", USER_LABEL, width = width);
        Self {
            model,
            user_label,
            messages: Vec::new(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn user_label(&self) -> &str {
        &self.user_label
    }

    pub fn label_for(&self, role: Role) -> &str {
        match role {
            Role::User => &self.user_label,
            Role::Assistant => &self.model,
            Role::System => "system",
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Commits a finished turn. Both sides are appended together so a failed
    /// request never leaves a dangling user line behind.
    pub fn push_turn(&mut self, input: impl Into<String>, reply: impl Into<String>) {
        self.messages.push(ChatMessage::new(Role::User, input));
        self.messages.push(ChatMessage::new(Role::Assistant, reply));
    }

    pub fn format_line(&self, message: &ChatMessage) -> String {
        format!("{}: {}\n", self.label_for(message.role), message.content)
    }

    pub fn render(&self) -> String {
        self.messages
            .iter()
            .map(|m| self.format_line(m))
            .collect()
    }

    /// Renders the transcript as if `pending` had already been said by the user.
    pub fn render_with_pending(&self, pending: &str) -> String {
        let mut text = self.render();
        text.push_str(&self.format_line(&ChatMessage::new(Role::User, pending)));
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_label_aligns_with_model_name() {
        let transcript = Transcript::new("gpt-3.5-turbo");
        assert_eq!(transcript.user_label(), "          You");
        assert_eq!(transcript.user_label().len(), "gpt-3.5-turbo".len());
    }

    #[test]
    fn short_model_names_leave_user_label_unpadded() {
        let transcript = Transcript::new("m");
        assert_eq!(transcript.user_label(), "You");
    }

    #[test]
    fn render_keeps_input_order() {
        let mut transcript = Transcript::new("bot");
        transcript.push_turn("hello", "hi there");
        transcript.push_turn("how are you?", "fine");

        assert_eq!(transcript.len(), 4);
        assert_eq!(
            transcript.render(),
            "You: hello\nbot: hi there\nYou: how are you?\nbot: fine\n"
        );
    }

    #[test]
    fn pending_line_is_rendered_but_not_committed() {
        let mut transcript = Transcript::new("bot");
        transcript.push_turn("one", "two");

        assert_eq!(transcript.render_with_pending("three"), "You: one\nbot: two\nYou: three\n");
        assert_eq!(transcript.len(), 2);
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&ChatMessage::new(Role::Assistant, "x")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"x"}"#);
    }
}
