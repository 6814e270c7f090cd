//! Conversation context flattening

use super::message::ConversationHistory;

const CONTEXT_HEADER: &str = "Previous conversation:";

/// Collapse a multi-turn history into a single prompt.
///
/// The output is the header line followed by one `ROLE: content` line per
/// message, in order, every line newline-terminated.
pub fn flatten_conversation(history: &ConversationHistory) -> String {
    let mut context = String::with_capacity(
        CONTEXT_HEADER.len()
            + 1
            + history
                .iter()
                .map(|m| m.content().len() + 12)
                .sum::<usize>(),
    );

    context.push_str(CONTEXT_HEADER);
    context.push('\n');

    for message in history {
        context.push_str(&message.role().as_str().to_uppercase());
        context.push_str(": ");
        context.push_str(message.content());
        context.push('\n');
    }

    context
}
