use crate::models::chat::ConversationTurn;

pub const HISTORY_HEADER: &str = "\nИСТОРИЯ ДИАЛОГА:";

/// Renders every turn except the last as `Label: text` lines under the
/// history header. Returns nothing for histories of one turn or fewer.
pub fn format_history_for_prompt(history: &[ConversationTurn]) -> Vec<String> {
    if history.len() <= 1 {
        return Vec::new();
    }
    let mut result = Vec::with_capacity(history.len());
    result.push(HISTORY_HEADER.to_string());
    for turn in &history[..history.len() - 1] {
        result.push(format!("{}: {}", turn.role.label(), turn.text));
    }

    result
}
