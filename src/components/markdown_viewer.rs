//! Markdown Viewer Component
//!
//! Rendered-markdown pane with zoom controls. Math spans are typeset by the
//! external KaTeX auto-renderer after every content change.

use leptos::prelude::*;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::markdown::{render_markdown, trigger_math_render};

static NEXT_VIEW: AtomicU32 = AtomicU32::new(0);

const ZOOM_MIN: f64 = 0.5;
const ZOOM_MAX: f64 = 2.0;
const ZOOM_STEP: f64 = 0.1;

/// Read-only markdown view with zoom toolbar.
#[component]
pub fn MarkdownViewer(#[prop(into)] content: Signal<String>) -> impl IntoView {
    let view_id = format!("markdown-view-{}", NEXT_VIEW.fetch_add(1, Ordering::Relaxed));
    let selector = format!("#{view_id}");

    let zoom = RwSignal::new(1.0_f64);
    let zoom_by = move |delta: f64| {
        zoom.update(|z| *z = (*z + delta).clamp(ZOOM_MIN, ZOOM_MAX));
    };

    let rendered = move || render_markdown(&content.get());

    // Re-typeset math whenever the content re-renders.
    Effect::new(move |_| {
        let _ = content.get();
        trigger_math_render(&selector);
    });

    let content_style = move || {
        format!(
            "transform: scale({}); transform-origin: top left;",
            zoom.get()
        )
    };

    view! {
        <div class="markdown-viewer">
            <div class="viewer-toolbar">
                <span class="spacer"></span>
                <button type="button" title="Zoom out" on:click=move |_| zoom_by(-ZOOM_STEP)>"−"</button>
                <button type="button" title="Reset zoom" on:click=move |_| zoom.set(1.0)>
                    {move || format!("{:.0}%", zoom.get() * 100.0)}
                </button>
                <button type="button" title="Zoom in" on:click=move |_| zoom_by(ZOOM_STEP)>"+"</button>
            </div>
            <div class="markdown-content" id=view_id style=content_style inner_html=rendered></div>
        </div>
    }
}
