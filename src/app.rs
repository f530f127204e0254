//! XWidgets Demo App
//!
//! Demo page composing the accordion, markdown and chart widgets.

use leptos::prelude::*;

use accordion_core::Mode;

use crate::components::{
    Accordion, AccordionContext, AccordionItem, ChartControl, MarkdownEditor,
};

const SAMPLE_MARKDOWN: &str = "\
# Notes

Some **bold** text, a formula $E=mc^2$ and a block:

$$x^2 + y^2 = z^2$$

```rust
fn main() {
    println!(\"hello\");
}
```
";

/// Status line listing the expanded items of the enclosing accordion.
#[component]
fn ExpandedSummary() -> impl IntoView {
    let ctx = use_context::<AccordionContext>();
    let label = move || {
        let ids = ctx.map(|ctx| ctx.expanded_ids()).unwrap_or_default();
        if ids.is_empty() {
            "Expanded: none".to_string()
        } else {
            let list: Vec<String> = ids.iter().map(|id| format!("#{id}")).collect();
            format!("Expanded: {}", list.join(", "))
        }
    };
    view! { <div class="expanded-summary">{label}</div> }
}

#[component]
pub fn App() -> impl IntoView {
    let (mode, set_mode) = signal(Mode::Single);
    let (extras, set_extras) = signal(Vec::<u32>::new());
    let (next_extra, set_next_extra) = signal(1u32);

    let add_extra = move |_| {
        let n = next_extra.get();
        set_next_extra.set(n + 1);
        set_extras.update(|list| list.push(n));
    };
    let remove_extra = move |_| {
        set_extras.update(|list| {
            list.pop();
        });
    };

    let mode_button = move |label: &'static str, value: Mode| {
        view! {
            <button
                type="button"
                class:active=move || mode.get() == value
                on:click=move |_| set_mode.set(value)
            >
                {label}
            </button>
        }
    };

    view! {
        <div class="app-layout">
            <h1>"XWidgets"</h1>

            <section class="demo-section">
                <h2>"Accordion"</h2>
                <div class="demo-controls">
                    {mode_button("Single", Mode::Single)}
                    {mode_button("Multiple", Mode::Multiple)}
                    <span class="spacer"></span>
                    <button type="button" on:click=add_extra>"Add item"</button>
                    <button type="button" on:click=remove_extra>"Remove item"</button>
                </div>
                <Accordion mode=mode>
                    <AccordionItem title="Getting started" expanded=true>
                        <p>"Click a header or press Enter/Space to toggle."</p>
                        <p>"Arrow keys, Home and End move focus between headers."</p>
                    </AccordionItem>
                    <AccordionItem title="Shipping">
                        <p>"Orders ship within two business days."</p>
                    </AccordionItem>
                    <AccordionItem title="Nested">
                        // Inner accordion keeps its own policy and never
                        // disturbs the outer one.
                        <Accordion>
                            <AccordionItem title="Inner A">
                                <p>"First nested panel."</p>
                            </AccordionItem>
                            <AccordionItem title="Inner B">
                                <p>"Second nested panel."</p>
                            </AccordionItem>
                        </Accordion>
                    </AccordionItem>
                    <For
                        each=move || extras.get()
                        key=|n| *n
                        children=move |n| {
                            view! {
                                <AccordionItem title=format!("Extra {n}")>
                                    <p>{format!("Dynamically added item {n}.")}</p>
                                </AccordionItem>
                            }
                        }
                    />
                    <ExpandedSummary />
                </Accordion>
            </section>

            <section class="demo-section">
                <h2>"Markdown editor"</h2>
                <MarkdownEditor initial=SAMPLE_MARKDOWN.to_string() />
            </section>

            <section class="demo-section">
                <h2>"Chart data entry"</h2>
                <ChartControl />
            </section>
        </div>
    }
}
