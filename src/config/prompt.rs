use crate::history::format_history_for_prompt;
use crate::models::chat::ChatRequest;

pub const SYSTEM_INSTRUCTION_TEMPLATE: &str = "СИСТЕМНАЯ ИНСТРУКЦИЯ:\n{system_instruction}\n";
pub const CURRENT_QUESTION_TEMPLATE: &str = "\nТЕКУЩИЙ ВОПРОС ПОЛЬЗОВАТЕЛЯ:\n{message}";

/// Stands in for the current question when the caller sends no history.
pub const DEFAULT_GREETING: &str = "Привет!";

/// Linearizes a chat request into the single prompt string sent upstream.
///
/// Parts are joined with newlines in this order: the system instruction (when
/// non-empty), the transcript of every turn but the last (when there is more
/// than one turn), and the final turn under the current-question header.
pub fn build_prompt(request: &ChatRequest) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(instruction) = request.system_instruction.as_deref().filter(|s| !s.is_empty()) {
        parts.push(SYSTEM_INSTRUCTION_TEMPLATE.replace("{system_instruction}", instruction));
    }

    parts.extend(format_history_for_prompt(&request.history));

    let message = request.history
        .last()
        .map(|turn| turn.text.as_str())
        .unwrap_or(DEFAULT_GREETING);
    parts.push(CURRENT_QUESTION_TEMPLATE.replace("{message}", message));

    parts.join("\n")
}
