use leptos::web_sys::HtmlTextAreaElement;
use wasm_bindgen::JsCast;

pub fn textarea_value(ev: &leptos::ev::Event) -> String {
    ev.target()
        .and_then(|t| t.dyn_into::<HtmlTextAreaElement>().ok())
        .map(|area| area.value())
        .unwrap_or_default()
}

/// Enter submits; Shift+Enter is reserved for inserting a newline.
pub fn submits_on_key(key: &str, shift: bool) -> bool {
    key == "Enter" && !shift
}

/// Submission is a no-op while a request is in flight or the trimmed input
/// is empty.
pub fn can_submit(text: &str, in_flight: bool) -> bool {
    !in_flight && !text.trim().is_empty()
}

pub fn alert(message: &str) {
    if let Some(window) = leptos::web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_without_shift_submits() {
        assert!(submits_on_key("Enter", false));
    }

    #[test]
    fn shift_enter_inserts_newline_instead() {
        assert!(!submits_on_key("Enter", true));
    }

    #[test]
    fn other_keys_never_submit() {
        assert!(!submits_on_key("a", false));
        assert!(!submits_on_key(" ", false));
    }

    #[test]
    fn whitespace_only_input_is_not_submittable() {
        assert!(!can_submit("", false));
        assert!(!can_submit("   \n\t", false));
    }

    #[test]
    fn in_flight_submission_blocks_reentry() {
        assert!(!can_submit("Assign a 10km run to Sarah", true));
        assert!(can_submit("Assign a 10km run to Sarah", false));
    }
}
