//! Accordion Item Component
//!
//! One disclosure unit. Registers with the nearest `<Accordion>` on
//! creation and deregisters on cleanup; all expansion decisions go through
//! the container's coordinator so the group policy always holds.

use leptos::html;
use leptos::prelude::*;

use accordion_core::Nav;

use crate::components::accordion::AccordionContext;

/// A single collapsible item. Must live inside an `<Accordion>`; rendered
/// inert (header visible, panel closed) when no container is found.
#[component]
pub fn AccordionItem(
    #[prop(into)] title: String,
    /// Expand once attached, through the normal policy path.
    #[prop(optional)]
    expanded: bool,
    children: Children,
) -> impl IntoView {
    let is_expanded = RwSignal::new(false);

    let registration = use_context::<AccordionContext>()
        .and_then(|ctx| ctx.register(is_expanded).map(|id| (ctx, id)));
    let Some((ctx, id)) = registration else {
        return view! {
            <section class="accordion-item">
                <div class="accordion-header">{title}</div>
                <div class="accordion-panel" style="height: 0;">{children()}</div>
            </section>
        }
        .into_any();
    };

    on_cleanup(move || ctx.deregister(id));

    if expanded {
        ctx.expand(id);
    }

    let header_id = ctx.header_dom_id(id);
    let panel_id = ctx.panel_dom_id(id);
    let panel_id_attr = panel_id.clone();

    let inner_ref = NodeRef::<html::Div>::new();

    // The panel animates between 0 and the content's natural height. The
    // height is measured on demand from the inner wrapper, the same way the
    // browser reports it for transitions.
    let panel_style = move || {
        if is_expanded.get() {
            match inner_ref.get().map(|inner| inner.scroll_height()) {
                Some(height) if height > 0 => format!("height: {height}px;"),
                _ => "height: auto;".to_string(),
            }
        } else {
            "height: 0;".to_string()
        }
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        let nav = match ev.key().as_str() {
            "Enter" | " " => {
                ev.prevent_default();
                ctx.toggle(id);
                return;
            }
            "ArrowDown" => Nav::Next,
            "ArrowUp" => Nav::Prev,
            "Home" => Nav::First,
            "End" => Nav::Last,
            _ => return,
        };
        ev.prevent_default();
        ctx.focus_neighbor(id, nav);
    };

    view! {
        <section class="accordion-item" class:expanded=move || is_expanded.get()>
            <button
                type="button"
                class="accordion-header"
                id=header_id
                aria-expanded=move || if is_expanded.get() { "true" } else { "false" }
                aria-controls=panel_id_attr
                on:click=move |_| ctx.toggle(id)
                on:keydown=on_keydown
            >
                <span class="accordion-chevron">
                    {move || if is_expanded.get() { "▾" } else { "▸" }}
                </span>
                <span class="accordion-title">{title}</span>
            </button>
            <div class="accordion-panel" id=panel_id role="region" style=panel_style>
                <div class="accordion-panel-inner" node_ref=inner_ref>
                    {children()}
                </div>
            </div>
        </section>
    }
    .into_any()
}
