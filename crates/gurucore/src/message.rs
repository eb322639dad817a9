//! Chat message types shared by the scripts and the adapters that feed them.

/// A message heard in a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    /// Display name of the sender, as the chat network reports it
    pub sender: String,
    pub text: String,
}

impl IncomingMessage {
    pub fn new(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
        }
    }

    /// Chat identity used as the store key: the case-folded sender name.
    pub fn identity(&self) -> String {
        self.sender.to_lowercase()
    }
}

/// What a script wants posted back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outgoing {
    /// Post to the room as-is
    Send(String),
    /// Post addressed to the sender of the triggering message
    Reply(String),
}

impl Outgoing {
    /// Plain-text rendering; replies are prefixed with `@sender`.
    pub fn render(&self, sender: &str) -> String {
        match self {
            Outgoing::Send(text) => text.clone(),
            Outgoing::Reply(text) => format!("@{} {}", sender, text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_case_folded() {
        assert_eq!(IncomingMessage::new("Thor", "!np").identity(), "thor");
    }

    #[test]
    fn test_render() {
        assert_eq!(Outgoing::Send("hi".to_string()).render("thor"), "hi");
        assert_eq!(Outgoing::Reply("hi".to_string()).render("thor"), "@thor hi");
    }
}
