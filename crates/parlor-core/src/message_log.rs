//! Append-only chat log.
//!
//! Every message carries the author's display name and a wall-clock
//! timestamp rendered at append time. The log never reorders entries;
//! the only mutation besides append is purging every entry a departed
//! author wrote.

use chrono::Local;

/// Author recorded on lobby-generated announcements. Reserved: no user
/// may claim it, so purging a departed user never touches these entries.
pub const SYSTEM_AUTHOR: &str = "System";

/// One chat entry, user-authored or system-authored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Display name of the author, or [`SYSTEM_AUTHOR`].
    pub author: String,
    /// Message body, stored verbatim.
    pub text: String,
    /// Local wall-clock time of appending, e.g. `03:41:07 PM`.
    pub time: String,
}

impl ChatMessage {
    /// Build a message with an explicit timestamp.
    pub fn new(
        author: impl Into<String>,
        text: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        ChatMessage {
            author: author.into(),
            text: text.into(),
            time: time.into(),
        }
    }

    /// Build a user message stamped with the current local time.
    pub fn now(author: impl Into<String>, text: impl Into<String>) -> Self {
        ChatMessage::new(author, text, local_time_string())
    }

    /// Build a system announcement stamped with the current local time.
    pub fn system(text: impl Into<String>) -> Self {
        ChatMessage::now(SYSTEM_AUTHOR, text)
    }

    pub fn is_system(&self) -> bool {
        self.author == SYSTEM_AUTHOR
    }
}

fn local_time_string() -> String {
    Local::now().format("%I:%M:%S %p").to_string()
}

/// Ordered, append-only message history.
#[derive(Debug, Default)]
pub struct MessageLog {
    entries: Vec<ChatMessage>,
}

impl MessageLog {
    pub fn new() -> Self {
        MessageLog::default()
    }

    /// Append one message at the tail.
    pub fn append(&mut self, message: ChatMessage) {
        self.entries.push(message);
    }

    /// Remove every entry authored by `author`, keeping the relative
    /// order of the rest. Returns how many entries were dropped.
    pub fn purge_author(&mut self, author: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.author != author);
        before - self.entries.len()
    }

    /// Owned copy of the full history, oldest first.
    pub fn snapshot(&self) -> Vec<ChatMessage> {
        self.entries.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_preserves_order() {
        let mut log = MessageLog::new();
        log.append(ChatMessage::new("alice", "first", "t1"));
        log.append(ChatMessage::new("bob", "second", "t2"));
        log.append(ChatMessage::new("alice", "third", "t3"));

        let texts: Vec<&str> = log.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn purge_removes_only_the_named_author() {
        let mut log = MessageLog::new();
        log.append(ChatMessage::new("alice", "a1", "t1"));
        log.append(ChatMessage::new(SYSTEM_AUTHOR, "alice joined the chat", "t2"));
        log.append(ChatMessage::new("bob", "b1", "t3"));
        log.append(ChatMessage::new("alice", "a2", "t4"));

        let removed = log.purge_author("alice");

        assert_eq!(removed, 2);
        assert_eq!(log.len(), 2);
        assert!(log.iter().all(|m| m.author != "alice"));
        // System entries that merely mention the author stay put.
        assert!(log.iter().any(|m| m.is_system()));
    }

    #[test]
    fn purge_of_unknown_author_is_a_no_op() {
        let mut log = MessageLog::new();
        log.append(ChatMessage::new("alice", "a1", "t1"));

        assert_eq!(log.purge_author("nobody"), 0);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn snapshot_is_detached_from_later_appends() {
        let mut log = MessageLog::new();
        log.append(ChatMessage::new("alice", "a1", "t1"));

        let snap = log.snapshot();
        log.append(ChatMessage::new("alice", "a2", "t2"));

        assert_eq!(snap.len(), 1);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn system_messages_use_the_reserved_author() {
        let msg = ChatMessage::system("server restarting");
        assert_eq!(msg.author, SYSTEM_AUTHOR);
        assert!(msg.is_system());
        assert!(!msg.time.is_empty());
    }
}
