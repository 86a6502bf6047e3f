//! Plain-text export of a conversation.

use crate::{Conversation, Role};

/// File name offered to the browser for the download.
pub const EXPORT_FILE_NAME: &str = "chat_history.txt";

/// MIME type of the exported document.
pub const EXPORT_MIME_TYPE: &str = "text/plain";

/// Render the conversation as `You: ...` / `AI: ...` lines joined by `\n`.
///
/// System messages never appear in a stored conversation, but are skipped
/// if they do.
pub fn export_text(conversation: &Conversation) -> String {
    conversation
        .all()
        .iter()
        .filter_map(|msg| match msg.role {
            Role::User => Some(format!("You: {}", msg.content)),
            Role::Assistant => Some(format!("AI: {}", msg.content)),
            Role::System => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The export document as UTF-8 bytes, ready to be sent as a download.
pub fn export_bytes(conversation: &Conversation) -> Vec<u8> {
    export_text(conversation).into_bytes()
}
