use crate::llm::LabelStrip;
use crate::models::chat::USER_LABEL;

const ROLE_LABELS: [&str; 4] = [USER_LABEL, "user", "assistant", "system"];

/// Trims a raw reply and applies the label-strip policy.
///
/// `model` is the assistant's own label; with [`LabelStrip::Speaker`] a
/// leading `label:` is removed only when the label is the model name or one
/// of the role names, so replies like `3:00 PM` come through intact.
pub fn clean_reply(raw: &str, policy: LabelStrip, model: &str) -> String {
    let text = raw.trim();
    match policy {
        LabelStrip::Off => text.to_string(),
        LabelStrip::FirstColon =>
            match text.split_once(':') {
                Some((_, rest)) => rest.trim().to_string(),
                None => text.to_string(),
            }
        LabelStrip::Speaker => {
            if let Some(rest) = strip_model_label(text, model) {
                return rest.trim().to_string();
            }
            match text.split_once(':') {
                Some((label, rest)) if is_role_label(label) => rest.trim().to_string(),
                _ => text.to_string(),
            }
        }
    }
}

/// Model names may contain colons themselves (`llama3:8b`), so they are
/// matched as a prefix rather than by splitting.
fn strip_model_label<'a>(text: &'a str, model: &str) -> Option<&'a str> {
    let model = model.trim();
    if model.is_empty() {
        return None;
    }
    let head = text.get(..model.len())?;
    if !head.eq_ignore_ascii_case(model) {
        return None;
    }
    text[model.len()..].trim_start().strip_prefix(':')
}

fn is_role_label(label: &str) -> bool {
    let label = label.trim();
    !label.is_empty() && ROLE_LABELS.iter().any(|known| label.eq_ignore_ascii_case(known))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODEL: &str = "gpt-3.5-turbo";

    #[test]
    fn off_only_trims() {
        assert_eq!(clean_reply("  gpt-3.5-turbo: hi \n", LabelStrip::Off, MODEL), "gpt-3.5-turbo: hi");
    }

    #[test]
    fn first_colon_keeps_text_after_first_colon() {
        assert_eq!(clean_reply("Assistant: hello", LabelStrip::FirstColon, MODEL), "hello");
        assert_eq!(clean_reply("a: b: c", LabelStrip::FirstColon, MODEL), "b: c");
        assert_eq!(clean_reply("It is 3:00 PM", LabelStrip::FirstColon, MODEL), "00 PM");
        assert_eq!(clean_reply("no colon here", LabelStrip::FirstColon, MODEL), "no colon here");
    }

    #[test]
    fn speaker_strips_known_labels_only() {
        assert_eq!(clean_reply("gpt-3.5-turbo: Sure.", LabelStrip::Speaker, MODEL), "Sure.");
        assert_eq!(clean_reply("  assistant : Sure.", LabelStrip::Speaker, MODEL), "Sure.");
        assert_eq!(clean_reply("You: echo", LabelStrip::Speaker, MODEL), "echo");
        assert_eq!(clean_reply("3:00 PM", LabelStrip::Speaker, MODEL), "3:00 PM");
        assert_eq!(
            clean_reply("Note: the meeting moved", LabelStrip::Speaker, MODEL),
            "Note: the meeting moved"
        );
    }

    #[test]
    fn speaker_handles_model_names_with_colons() {
        assert_eq!(clean_reply("llama3:8b: Hello there", LabelStrip::Speaker, "llama3:8b"), "Hello there");
        assert_eq!(
            clean_reply("ft:gpt-3.5-turbo:acme:x1 : Done", LabelStrip::Speaker, "ft:gpt-3.5-turbo:acme:x1"),
            "Done"
        );
        assert_eq!(clean_reply("assistant: hi", LabelStrip::Speaker, "llama3:8b"), "hi");
        assert_eq!(clean_reply("llama3: not the model", LabelStrip::Speaker, "llama3:8b"), "llama3: not the model");
        assert_eq!(clean_reply("llama3:8bit wide", LabelStrip::Speaker, "llama3:8b"), "llama3:8bit wide");
    }

    #[test]
    fn leading_colon_is_not_a_label() {
        assert_eq!(clean_reply(": odd", LabelStrip::Speaker, MODEL), ": odd");
    }
}
