//! Chart data model and ECharts delegation.
//!
//! The control only owns the data entry list; rendering is delegated to the
//! ECharts instance loaded in `index.html`. `pie_option` builds the option
//! object, `render_pie` hands it over.

use serde::{Deserialize, Serialize};

/// One entry of the chart data list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub category: String,
    pub value: f64,
}

/// One row of the entry list. The id never changes after insertion, so
/// view rows keyed on it stay bound to the right data across removals.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartEntry {
    pub id: u32,
    pub point: DataPoint,
}

/// Entry list backing the chart control. Ids are handed out monotonically
/// per list and are never reused.
#[derive(Clone, Debug, Default)]
pub struct EntryList {
    next_id: u32,
    entries: Vec<ChartEntry>,
}

impl EntryList {
    pub fn push(&mut self, point: DataPoint) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(ChartEntry { id, point });
        id
    }

    /// Remove the entry with the given id. Unknown ids are a no-op.
    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    pub fn entries(&self) -> &[ChartEntry] {
        &self.entries
    }

    pub fn points(&self) -> Vec<DataPoint> {
        self.entries.iter().map(|entry| entry.point.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Pastel slice colors, cycled by entry index.
pub const PALETTE: [&str; 10] = [
    "#FFB3BA", "#BAFFC9", "#BAE1FF", "#FFD8B1", "#E6C9FF", "#B4F8C8", "#FBE7C6", "#D8E2DC",
    "#A0E7E5", "#FFC7C7",
];

/// Build the ECharts pie option for the given data points.
pub fn pie_option(points: &[DataPoint]) -> serde_json::Value {
    let data: Vec<serde_json::Value> = points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            serde_json::json!({
                "value": point.value,
                "name": point.category,
                "itemStyle": { "color": PALETTE[i % PALETTE.len()] }
            })
        })
        .collect();

    serde_json::json!({
        "tooltip": { "trigger": "item" },
        "series": [{
            "type": "pie",
            "data": data
        }]
    })
}

/// Render a pie chart into the container element. Quietly does nothing when
/// ECharts or the container is missing.
pub fn render_pie(container_id: &str, points: &[DataPoint]) {
    let option = pie_option(points);
    let js = format!(
        r#"(function() {{
            if (typeof echarts === 'undefined') return;
            var el = document.getElementById('{container_id}');
            if (!el) return;
            var chart = echarts.getInstanceByDom(el) || echarts.init(el);
            chart.setOption({option});
        }})();"#
    );
    let _ = js_sys::eval(&js);
}
