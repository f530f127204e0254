//! Chart Control Component
//!
//! Data-entry panel for a pie chart: category/value inputs, a removable
//! entry list, and a render button. Rendering itself is delegated to the
//! ECharts instance loaded in `index.html`.

use leptos::prelude::*;
use reactive_stores::Store;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::chart::{render_pie, DataPoint, EntryList};

static NEXT_CHART: AtomicU32 = AtomicU32::new(0);

#[derive(Clone, Debug, Default, Store)]
pub struct ChartState {
    pub list: EntryList,
}

/// Pie-chart data entry control.
#[component]
pub fn ChartControl() -> impl IntoView {
    let chart_id = format!("chart-canvas-{}", NEXT_CHART.fetch_add(1, Ordering::Relaxed));
    let canvas_id = chart_id.clone();
    let canvas = StoredValue::new(chart_id);

    let store = Store::new(ChartState::default());
    let (category, set_category) = signal(String::new());
    let (value, set_value) = signal(String::new());

    let render = move || {
        canvas.try_with_value(|id| {
            store.list().with_untracked(|list| {
                render_pie(id, &list.points());
            });
        });
    };

    let add_point = move |_| {
        let name = category.get().trim().to_string();
        // Empty category or unparseable value: guarded no-op.
        if name.is_empty() {
            return;
        }
        let Ok(parsed) = value.get().trim().parse::<f64>() else {
            return;
        };
        let list = store.list();
        list.write().push(DataPoint {
            category: name,
            value: parsed,
        });
        set_category.set(String::new());
        set_value.set(String::new());
    };

    let delete_point = move |id: u32| {
        let list = store.list();
        let removed = list.write().remove(id);
        // Keep the chart in sync with the list, as long as data remains.
        if removed && !list.with_untracked(EntryList::is_empty) {
            render();
        }
    };

    let entries = move || store.list().with(|list| list.entries().to_vec());
    let no_data = move || store.list().with(EntryList::is_empty);

    view! {
        <div class="chart-control">
            <div class="control-panel">
                <div class="input-group">
                    <input
                        type="text"
                        placeholder="Category"
                        prop:value=move || category.get()
                        on:input=move |ev| set_category.set(event_target_value(&ev))
                    />
                    <input
                        type="number"
                        placeholder="Value"
                        prop:value=move || value.get()
                        on:input=move |ev| set_value.set(event_target_value(&ev))
                    />
                    <button type="button" on:click=add_point>"Add"</button>
                </div>
                <div class="data-list">
                    <For
                        each=entries
                        key=|entry| entry.id
                        children=move |entry| {
                            let id = entry.id;
                            let label = format!("{}: {}", entry.point.category, entry.point.value);
                            view! {
                                <div class="data-item">
                                    <span>{label}</span>
                                    <button
                                        type="button"
                                        class="delete-btn"
                                        on:click=move |_| delete_point(id)
                                    >
                                        "×"
                                    </button>
                                </div>
                            }
                        }
                    />
                    <Show when=no_data>
                        <div class="empty-list">"No data yet"</div>
                    </Show>
                </div>
                <div class="button-group">
                    <button type="button" on:click=move |_| render()>"Render chart"</button>
                </div>
            </div>
            <div class="chart-container">
                <div class="chart" id=canvas_id></div>
            </div>
        </div>
    }
}
