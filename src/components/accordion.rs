//! Accordion Container Component
//!
//! Owns one `accordion_core::Coordinator` and hands an `AccordionContext`
//! to its items via Leptos context. Items register at construction time and
//! deregister on cleanup, so the coordinator only ever sees direct
//! children: a nested `<Accordion>` provides its own context, which shadows
//! this one for its whole subtree.

use leptos::prelude::*;
use std::sync::atomic::{AtomicU32, Ordering};
use wasm_bindgen::JsCast;

use accordion_core::{Change, Coordinator, ItemId, Mode, Nav};

/// Document-unique group counter for deterministic ARIA ids.
static NEXT_GROUP: AtomicU32 = AtomicU32::new(0);

/// Handle shared between a container and its direct-child items.
#[derive(Clone, Copy)]
pub struct AccordionContext {
    group: u32,
    coordinator: RwSignal<Coordinator>,
    entries: StoredValue<Vec<(ItemId, RwSignal<bool>)>>,
}

impl AccordionContext {
    fn new(mode: Mode) -> Self {
        Self {
            group: NEXT_GROUP.fetch_add(1, Ordering::Relaxed),
            coordinator: RwSignal::new(Coordinator::new(mode)),
            entries: StoredValue::new(Vec::new()),
        }
    }

    /// Register an item and the signal mirroring its expanded flag.
    /// Returns `None` once the container is gone; the item stays inert.
    pub fn register(&self, expanded: RwSignal<bool>) -> Option<ItemId> {
        let id = self.coordinator.try_update(|c| c.add_item())?;
        self.entries.try_update_value(|entries| entries.push((id, expanded)));
        Some(id)
    }

    /// Structural removal: drop the item without collapse notifications.
    pub fn deregister(&self, id: ItemId) {
        self.coordinator.try_update(|c| c.remove_item(id));
        self.entries
            .try_update_value(|entries| entries.retain(|(item, _)| *item != id));
    }

    pub fn expand(&self, id: ItemId) {
        let changes = self.coordinator.try_update(|c| c.expand(id));
        self.apply(changes.unwrap_or_default());
    }

    pub fn collapse(&self, id: ItemId) {
        let changes = self.coordinator.try_update(|c| c.collapse(id));
        self.apply(changes.unwrap_or_default());
    }

    pub fn toggle(&self, id: ItemId) {
        let changes = self.coordinator.try_update(|c| c.toggle(id));
        self.apply(changes.unwrap_or_default());
    }

    pub fn set_mode(&self, mode: Mode) {
        let changes = self.coordinator.try_update(|c| c.set_mode(mode));
        self.apply(changes.unwrap_or_default());
    }

    /// Expanded items in insertion order. Reactive.
    pub fn expanded_ids(&self) -> Vec<u32> {
        self.coordinator
            .try_with(|c| c.expanded().iter().map(|id| id.index()).collect())
            .unwrap_or_default()
    }

    /// Move keyboard focus to a sibling header. Never touches expansion.
    pub fn focus_neighbor(&self, id: ItemId, nav: Nav) {
        let target = self
            .coordinator
            .try_with_untracked(|c| c.neighbor(id, nav))
            .flatten();
        let Some(target) = target else { return };
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(header) = document.get_element_by_id(&self.header_dom_id(target)) {
            if let Some(header) = header.dyn_ref::<web_sys::HtmlElement>() {
                let _ = header.focus();
            }
        }
    }

    pub fn header_dom_id(&self, id: ItemId) -> String {
        format!("acc-{}-header-{}", self.group, id.index())
    }

    pub fn panel_dom_id(&self, id: ItemId) -> String {
        format!("acc-{}-panel-{}", self.group, id.index())
    }

    /// Mirror a settled change batch into the item signals.
    fn apply(&self, changes: Vec<Change>) {
        let targets: Vec<(RwSignal<bool>, bool)> = self
            .entries
            .try_with_value(|entries| {
                changes
                    .iter()
                    .filter_map(|change| {
                        let on = matches!(change, Change::Expanded(_));
                        entries
                            .iter()
                            .find(|(item, _)| *item == change.item())
                            .map(|(_, signal)| (*signal, on))
                    })
                    .collect()
            })
            .unwrap_or_default();

        for (signal, on) in targets {
            signal.set(on);
        }
    }
}

/// Collapsible accordion container.
///
/// `mode` is reactive: switching `Multiple -> Single` at runtime collapses
/// every expanded item but the first-expanded one.
#[component]
pub fn Accordion(
    #[prop(into, default = Signal::stored(Mode::Single))] mode: Signal<Mode>,
    children: Children,
) -> impl IntoView {
    let ctx = AccordionContext::new(mode.get_untracked());
    provide_context(ctx);

    Effect::new(move |_| {
        ctx.set_mode(mode.get());
    });

    view! {
        <div class="accordion">
            {children()}
        </div>
    }
}
