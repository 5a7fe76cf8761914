//! Serializes a [`ChartSpec`] into the `data`/`layout` pair plotly.js expects.
//!
//! Panels become vertically stacked subplots. Each panel gets its own x axis
//! and a primary y axis; a secondary y axis overlays the primary one on the
//! right-hand side.

use common::{AxisSlot, BarMode, ChartSpec, Orientation, SeriesKind};
use serde_json::{Map, Value, json};

/// Vertical gap between subplot rows as a fraction of the plot height.
const ROW_SPACING: f64 = 0.1;

fn axis_id(prefix: &str, index: usize) -> String {
    if index == 1 {
        prefix.to_string()
    } else {
        format!("{}{}", prefix, index)
    }
}

fn layout_key(prefix: &str, index: usize) -> String {
    axis_id(&format!("{}axis", prefix), index)
}

fn finite_or_null(value: f64) -> Value {
    if value.is_finite() { json!(value) } else { Value::Null }
}

pub fn to_plotly(chart: &ChartSpec) -> Value {
    let rows = chart.panels.len().max(1);
    let spacing = if rows > 1 { ROW_SPACING } else { 0.0 };
    let row_height = (1.0 - spacing * (rows - 1) as f64) / rows as f64;

    let mut data = Vec::new();
    let mut annotations = Vec::new();
    let mut layout = Map::new();
    let mut next_y = 1;

    for (row, panel) in chart.panels.iter().enumerate() {
        let top = 1.0 - row as f64 * (row_height + spacing);
        let bottom = (top - row_height).max(0.0);
        let x_index = row + 1;

        let primary = next_y;
        next_y += 1;
        let secondary = panel.secondary_axis.as_ref().map(|_| {
            next_y += 1;
            next_y - 1
        });

        layout.insert(
            layout_key("x", x_index),
            json!({ "anchor": axis_id("y", primary), "domain": [0.0, 1.0] }),
        );
        layout.insert(
            layout_key("y", primary),
            json!({
                "anchor": axis_id("x", x_index),
                "domain": [bottom, top],
                "title": { "text": panel.primary_axis.title },
            }),
        );
        if let (Some(index), Some(axis)) = (secondary, &panel.secondary_axis) {
            layout.insert(
                layout_key("y", index),
                json!({
                    "anchor": axis_id("x", x_index),
                    "overlaying": axis_id("y", primary),
                    "side": "right",
                    "title": { "text": axis.title },
                }),
            );
        }

        annotations.push(json!({
            "text": panel.title,
            "showarrow": false,
            "xref": "paper",
            "yref": "paper",
            "x": 0.5,
            "y": top,
            "xanchor": "center",
            "yanchor": "bottom",
            "font": { "size": 16 },
        }));

        for series in &panel.series {
            let y_index = match series.axis {
                AxisSlot::Primary => primary,
                AxisSlot::Secondary => secondary.unwrap_or(primary),
            };
            let x: Vec<String> = series
                .x
                .iter()
                .map(|date| date.format("%Y-%m-%d").to_string())
                .collect();
            let y: Vec<Value> = series.y.iter().map(|value| finite_or_null(*value)).collect();

            let mut trace = json!({
                "name": series.name,
                "x": x,
                "y": y,
                "xaxis": axis_id("x", x_index),
                "yaxis": axis_id("y", y_index),
            });
            match series.kind {
                SeriesKind::Bar => {
                    trace["type"] = json!("bar");
                    trace["marker"] = json!({ "color": series.color });
                }
                SeriesKind::Line => {
                    trace["type"] = json!("scatter");
                    trace["mode"] = json!("lines+markers");
                    trace["line"] = json!({ "color": series.color });
                }
            }
            data.push(trace);
        }
    }

    let bar_mode = match chart.bar_mode {
        BarMode::Stack => "stack",
        BarMode::Group => "group",
    };
    let orientation = match chart.legend.orientation {
        Orientation::Horizontal => "h",
        Orientation::Vertical => "v",
    };

    layout.insert("title".to_string(), json!({ "text": chart.title }));
    layout.insert("barmode".to_string(), json!(bar_mode));
    layout.insert("height".to_string(), json!(chart.height));
    layout.insert(
        "legend".to_string(),
        json!({
            "orientation": orientation,
            "x": chart.legend.x,
            "y": chart.legend.y,
            "xanchor": chart.legend.x_anchor,
            "yanchor": chart.legend.y_anchor,
        }),
    );
    layout.insert("annotations".to_string(), Value::Array(annotations));

    json!({ "data": data, "layout": layout })
}
