//! Chart Viewer Widget
//! Scrollable page body: metric tiles followed by a responsive grid of
//! bar chart cards.

use crate::charts::{ChartData, ChartPlotter, COMPARISON_COLOR, OVERVIEW_COLOR};
use crate::stats::PageReport;
use egui::{RichText, ScrollArea};

/// Chart card configuration
const CHART_SPACING: f32 = 15.0;
const CHART_HEIGHT: f32 = 260.0;
const CHART_WIDTH: f32 = 520.0;

/// Metrics and charts for the page being shown.
#[derive(Default)]
pub struct ChartViewer {
    pub report: Option<PageReport>,
    /// Extra chart drawn after the report's own, in the comparison colour.
    pub comparison: Option<ChartData>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.report = None;
        self.comparison = None;
    }

    pub fn set_report(&mut self, report: PageReport, comparison: Option<ChartData>) {
        self.report = Some(report);
        self.comparison = comparison;
    }

    /// Draw the metrics and the card grid; cards wrap to as many columns as
    /// the available width allows.
    pub fn show(&self, ui: &mut egui::Ui) {
        let Some(report) = &self.report else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        let cards: Vec<(&ChartData, egui::Color32)> = report
            .charts
            .iter()
            .map(|chart| (chart, OVERVIEW_COLOR))
            .chain(self.comparison.iter().map(|chart| (chart, COMPARISON_COLOR)))
            .collect();

        let avail_width = ui.available_width();
        let num_columns = ((avail_width / (CHART_WIDTH + CHART_SPACING)).floor() as usize).max(1);

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ChartPlotter::draw_metrics(ui, &report.metrics);
                ui.add_space(CHART_SPACING);

                for row in cards.chunks(num_columns) {
                    ui.horizontal(|ui| {
                        for (chart, color) in row {
                            ui.vertical(|ui| {
                                ui.set_width(CHART_WIDTH);
                                ChartPlotter::draw_chart_card(ui, chart, *color, CHART_HEIGHT);
                            });
                            ui.add_space(CHART_SPACING);
                        }
                    });
                    ui.add_space(CHART_SPACING);
                }
            });
    }
}
