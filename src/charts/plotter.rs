//! Chart Plotter Module
//! Interactive bar charts and metric tiles using egui_plot.

use crate::stats::{GroupCount, GroupDimension, SummaryMetrics};
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, Plot};

/// Bar colour on the overview and patient pages.
pub const OVERVIEW_COLOR: Color32 = Color32::from_rgb(76, 120, 168);
/// Bar colour of the cross-hospital comparison chart.
pub const COMPARISON_COLOR: Color32 = Color32::from_rgb(245, 133, 24);

pub const PALETTE: [Color32; 6] = [
    Color32::from_rgb(52, 152, 219),  // Blue
    Color32::from_rgb(231, 76, 60),   // Red
    Color32::from_rgb(46, 204, 113),  // Green
    Color32::from_rgb(155, 89, 182),  // Purple
    Color32::from_rgb(243, 156, 18),  // Orange
    Color32::from_rgb(26, 188, 156),  // Teal
];

/// Distinct-patient counts for one dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub dimension: GroupDimension,
    pub counts: Vec<GroupCount>,
}

impl ChartData {
    pub fn title(&self) -> String {
        format!("Patients by {}", self.dimension.title())
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Draws charts and metric tiles.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Colour for a metric tile.
    pub fn tile_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Bar chart, one bar per group, x-axis labelled with the group names.
    pub fn draw_bar_chart(ui: &mut egui::Ui, chart_data: &ChartData, color: Color32, height: f32) {
        let labels: Vec<String> = chart_data.counts.iter().map(|c| c.label.clone()).collect();
        let title = chart_data.dimension.title();

        let bars: Vec<Bar> = chart_data
            .counts
            .iter()
            .enumerate()
            .map(|(i, count)| {
                Bar::new(i as f64, count.patients as f64)
                    .name(&count.label)
                    .width(0.6)
                    .fill(color)
            })
            .collect();

        Plot::new(ui.make_persistent_id(("bars", title)))
            .height(height)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label(title)
            .y_axis_label("Patients")
            .include_y(0.0)
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                    return String::new();
                }
                labels.get(idx as usize).cloned().unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .color(color)
                        .name(title)
                        .element_formatter(Box::new(|bar: &Bar, _chart: &BarChart| {
                            format!("{}\n{} patients", bar.name, bar.value)
                        })),
                );
            });
    }

    /// A titled card holding one bar chart; shows a note when it has no bars.
    pub fn draw_chart_card(ui: &mut egui::Ui, chart_data: &ChartData, color: Color32, height: f32) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(RichText::new(chart_data.title()).size(16.0).strong());
                ui.add_space(6.0);
                if chart_data.is_empty() {
                    ui.label(RichText::new("No data").color(Color32::GRAY));
                } else {
                    Self::draw_bar_chart(ui, chart_data, color, height);
                }
            });
    }

    /// Six metric tiles in two rows of three.
    pub fn draw_metrics(ui: &mut egui::Ui, metrics: &SummaryMetrics) {
        let tiles = metric_tiles(metrics);
        for (row_idx, row) in tiles.chunks(3).enumerate() {
            ui.columns(3, |columns| {
                for (col_idx, (label, value)) in row.iter().enumerate() {
                    let color = Self::tile_color(row_idx * 3 + col_idx);
                    let ui = &mut columns[col_idx];
                    ui.label(RichText::new(*label).size(12.0).color(Color32::GRAY));
                    ui.label(RichText::new(value).size(22.0).strong().color(color));
                }
            });
            ui.add_space(8.0);
        }
    }
}

fn format_mean(value: Option<f64>, decimals: usize, unit: &str) -> String {
    match value {
        Some(v) => format!("{:.*}{}", decimals, v, unit),
        None => "–".to_string(),
    }
}

/// Label/value pairs for the headline metrics, in display order.
pub fn metric_tiles(metrics: &SummaryMetrics) -> [(&'static str, String); 6] {
    [
        ("Total Patients", metrics.patients.to_string()),
        ("Total Admissions", metrics.admissions.to_string()),
        (
            "Average Length of Stay",
            format_mean(metrics.mean_length_of_stay, 2, " days"),
        ),
        ("Average Age", format_mean(metrics.mean_age, 1, " years")),
        ("Average LACE Score", format_mean(metrics.mean_lace_score, 2, "")),
        ("Average CCI Score", format_mean(metrics.mean_cci_score, 2, "")),
    ]
}
