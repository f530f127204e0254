//! Markdown Editor Component
//!
//! Side-by-side textarea and live preview with a formatting toolbar,
//! linear undo/redo, and Ctrl/Cmd keyboard shortcuts. The preview pane is a
//! `MarkdownViewer`, so math and code highlighting come for free.

use leptos::html;
use leptos::prelude::*;

use crate::components::MarkdownViewer;
use crate::history::EditHistory;

/// Wrap the selected range of `text` in `prefix`/`suffix`.
///
/// Indices are UTF-16 code units, as reported by the DOM selection API.
/// With an empty selection the caret lands right after the prefix;
/// otherwise the original selection stays selected.
fn format_selection(
    text: &str,
    start: usize,
    end: usize,
    prefix: &str,
    suffix: &str,
) -> (String, usize, usize) {
    let units: Vec<u16> = text.encode_utf16().collect();
    let start = start.min(units.len());
    let end = end.clamp(start, units.len());

    let pre: Vec<u16> = prefix.encode_utf16().collect();
    let suf: Vec<u16> = suffix.encode_utf16().collect();

    let mut out = Vec::with_capacity(units.len() + pre.len() + suf.len());
    out.extend_from_slice(&units[..start]);
    out.extend_from_slice(&pre);
    out.extend_from_slice(&units[start..end]);
    out.extend_from_slice(&suf);
    out.extend_from_slice(&units[end..]);
    let new_text = String::from_utf16_lossy(&out);

    if start == end {
        let caret = start + pre.len();
        (new_text, caret, caret)
    } else {
        (new_text, start + pre.len(), end + pre.len())
    }
}

/// Markdown editor with live preview.
#[component]
pub fn MarkdownEditor(#[prop(into, optional)] initial: String) -> impl IntoView {
    let content = RwSignal::new(initial.clone());
    let history = StoredValue::new(EditHistory::new(&initial));
    let can_undo = RwSignal::new(false);
    let can_redo = RwSignal::new(false);

    let textarea_ref = NodeRef::<html::Textarea>::new();

    let sync_buttons = move || {
        let states = history
            .try_with_value(|h| (h.can_undo(), h.can_redo()))
            .unwrap_or((false, false));
        can_undo.set(states.0);
        can_redo.set(states.1);
    };

    let record = move |text: &str| {
        history.try_update_value(|h| h.record(text));
        sync_buttons();
    };

    let restore = move |text: String| {
        content.set(text.clone());
        if let Some(textarea) = textarea_ref.get() {
            textarea.set_value(&text);
        }
        sync_buttons();
    };

    let undo = move || {
        if let Some(Some(text)) = history.try_update_value(|h| h.undo().map(str::to_string)) {
            restore(text);
        }
    };

    let redo = move || {
        if let Some(Some(text)) = history.try_update_value(|h| h.redo().map(str::to_string)) {
            restore(text);
        }
    };

    let on_input = move |ev: web_sys::Event| {
        let text = event_target_value(&ev);
        record(&text);
        content.set(text);
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        let modifier = ev.ctrl_key() || ev.meta_key();
        if !modifier {
            return;
        }
        match ev.key().as_str() {
            "z" if !ev.shift_key() => {
                ev.prevent_default();
                undo();
            }
            "y" => {
                ev.prevent_default();
                redo();
            }
            "z" | "Z" => {
                ev.prevent_default();
                redo();
            }
            _ => {}
        }
    };

    // Wrap the current selection and keep focus in the textarea.
    let apply_format = move |prefix: &str, suffix: &str| {
        let Some(textarea) = textarea_ref.get() else {
            return;
        };
        let start = textarea
            .selection_start()
            .ok()
            .flatten()
            .unwrap_or(0) as usize;
        let end = textarea.selection_end().ok().flatten().unwrap_or(0) as usize;

        let (new_text, new_start, new_end) =
            format_selection(&textarea.value(), start, end, prefix, suffix);

        record(&new_text);
        textarea.set_value(&new_text);
        content.set(new_text);
        let _ = textarea.set_selection_range(new_start as u32, new_end as u32);
        let _ = textarea.focus();
    };

    let format_button = move |label: &'static str,
                              hint: &'static str,
                              prefix: &'static str,
                              suffix: &'static str| {
        view! {
            <button type="button" title=hint on:click=move |_| apply_format(prefix, suffix)>
                {label}
            </button>
        }
    };

    view! {
        <div class="markdown-editor">
            <div class="editor-toolbar">
                <button
                    type="button"
                    title="Undo (Ctrl+Z)"
                    disabled=move || !can_undo.get()
                    on:click=move |_| undo()
                >
                    "↶"
                </button>
                <button
                    type="button"
                    title="Redo (Ctrl+Y)"
                    disabled=move || !can_redo.get()
                    on:click=move |_| redo()
                >
                    "↷"
                </button>
                <span class="separator"></span>
                {format_button("B", "Bold", "**", "**")}
                {format_button("I", "Italic", "*", "*")}
                {format_button("`", "Code", "`", "`")}
                {format_button("🔗", "Link", "[", "](url)")}
                {format_button("❝", "Quote", "> ", "")}
                <span class="separator"></span>
                {format_button("∑", "Inline math", "$", "$")}
                {format_button("∬", "Block math", "$$\n", "\n$$")}
                <span class="separator"></span>
                {format_button("H", "Heading", "## ", "")}
                {format_button("•", "Bullet list", "- ", "")}
                {format_button("1.", "Numbered list", "1. ", "")}
            </div>
            <div class="editor-body">
                <div class="edit-pane">
                    <textarea
                        class="markdown-textarea"
                        node_ref=textarea_ref
                        prop:value=move || content.get()
                        on:input=on_input
                        on:keydown=on_keydown
                        placeholder="Write markdown..."
                    ></textarea>
                </div>
                <div class="preview-pane">
                    <MarkdownViewer content=content />
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::format_selection;

    #[test]
    fn test_wraps_selection() {
        let (text, start, end) = format_selection("hello world", 0, 5, "**", "**");
        assert_eq!(text, "**hello** world");
        assert_eq!((start, end), (2, 7));
    }

    #[test]
    fn test_empty_selection_puts_caret_after_prefix() {
        let (text, start, end) = format_selection("ab", 1, 1, "*", "*");
        assert_eq!(text, "a**b");
        assert_eq!((start, end), (2, 2));
    }

    #[test]
    fn test_prefix_only_format() {
        let (text, start, end) = format_selection("line", 0, 4, "> ", "");
        assert_eq!(text, "> line");
        assert_eq!((start, end), (2, 6));
    }

    #[test]
    fn test_out_of_range_indices_are_clamped() {
        let (text, _, _) = format_selection("ab", 5, 9, "*", "*");
        assert_eq!(text, "ab**");
    }

    #[test]
    fn test_non_ascii_selection_uses_utf16_units() {
        // "é" is one UTF-16 unit, "𝄞" is two.
        let (text, start, end) = format_selection("é𝄞x", 1, 3, "*", "*");
        assert_eq!(text, "é*𝄞*x");
        assert_eq!((start, end), (2, 4));
    }
}
