//! Patient table and patient detail views.

use crate::charts::ChartPlotter;
use crate::data::{Admission, Dataset};
use crate::gui::Route;
use crate::stats::{format_number, gender_label, PatientColumn, PatientLookup, SummaryMetrics};
use egui::{Color32, RichText, ScrollArea};
use std::ops::Range;

const NO_RESULTS: &str = "No patients found matching the criteria.";

/// Table layout
const ROW_HEIGHT: f32 = 22.0;
const COLUMN_WIDTHS: [f32; 7] = [110.0, 60.0, 80.0, 110.0, 320.0, 90.0, 90.0];

pub struct PatientView;

impl PatientView {
    /// Metrics plus the patient table. `rows` are positions in `dataset`;
    /// only the rows inside the visible scroll range are laid out. Returns
    /// the detail route of a clicked patient ID.
    pub fn show_table(
        ui: &mut egui::Ui,
        metrics: &SummaryMetrics,
        dataset: &Dataset,
        rows: &[usize],
    ) -> Option<Route> {
        let mut clicked = None;

        ChartPlotter::draw_metrics(ui, metrics);
        ui.add_space(10.0);

        if rows.is_empty() {
            ui.label(RichText::new(NO_RESULTS).size(14.0).color(Color32::GRAY));
            return None;
        }

        ui.label(RichText::new(format!("{} rows", rows.len())).size(11.0).color(Color32::GRAY));
        ui.horizontal(|ui| {
            for (column, width) in PatientColumn::ALL.iter().zip(COLUMN_WIDTHS) {
                ui.add_sized(
                    [width, ROW_HEIGHT],
                    egui::Label::new(RichText::new(column.header()).strong()),
                );
            }
        });
        ui.separator();

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show_rows(ui, ROW_HEIGHT, rows.len(), |ui, range| {
                for &index in Self::visible_rows(rows, range) {
                    let Some(admission) = dataset.admissions().get(index) else {
                        continue;
                    };
                    if let Some(route) = Self::show_row(ui, admission) {
                        clicked = Some(route);
                    }
                }
            });

        clicked
    }

    /// The slice of `rows` a scroll range covers, clamped to the row count.
    pub fn visible_rows(rows: &[usize], range: Range<usize>) -> &[usize] {
        let end = range.end.min(rows.len());
        let start = range.start.min(end);
        &rows[start..end]
    }

    fn show_row(ui: &mut egui::Ui, admission: &Admission) -> Option<Route> {
        let mut clicked = None;
        ui.horizontal(|ui| {
            ui.set_height(ROW_HEIGHT);
            for (column, width) in PatientColumn::ALL.iter().zip(COLUMN_WIDTHS) {
                let text = column.cell(admission);
                if *column == PatientColumn::PatientId {
                    if ui.add_sized([width, ROW_HEIGHT], egui::Link::new(&text)).clicked() {
                        clicked = Some(Route::patient(text));
                    }
                } else {
                    ui.add_sized([width, ROW_HEIGHT], egui::Label::new(text).truncate());
                }
            }
        });
        clicked
    }

    /// Detail page for a resolved lookup. Returns true when the back control
    /// was clicked.
    pub fn show_details(ui: &mut egui::Ui, lookup: &PatientLookup, dataset: &Dataset) -> bool {
        let mut back = false;
        if ui.button("⬅ Back to Patients").clicked() {
            back = true;
        }
        ui.add_space(10.0);

        match (lookup, lookup.admission(dataset)) {
            (_, Some(admission)) => Self::show_admission(ui, admission),
            (PatientLookup::NotFound(id), None) => {
                ui.label(
                    RichText::new(format!("Patient not found: {id}"))
                        .size(16.0)
                        .color(Color32::from_rgb(220, 53, 69)),
                );
            }
            (PatientLookup::NoSelection | PatientLookup::Found(_), None) => {
                ui.label(RichText::new("No patient selected.").size(16.0));
            }
        }

        back
    }

    fn show_admission(ui: &mut egui::Ui, admission: &Admission) {
        ui.label(
            RichText::new(format!("Patient ID: {}", admission.patient_id()))
                .size(18.0)
                .strong(),
        );
        ui.add_space(10.0);

        let text = |value: &Option<String>| value.clone().unwrap_or_default();

        ui.columns(3, |columns| {
            Self::section(
                &mut columns[0],
                "Personal Information",
                &[
                    ("Age", format_number(admission.age)),
                    ("Gender", gender_label(admission.gender.as_deref()).to_string()),
                    ("Race", text(&admission.race)),
                ],
            );
            Self::section(
                &mut columns[1],
                "Health Scores",
                &[
                    ("LACE Score", format_number(admission.lace_score)),
                    ("CCI Score", format_number(admission.cci_score)),
                ],
            );
            Self::section(
                &mut columns[2],
                "Admission Details",
                &[
                    ("Admission Type", text(&admission.admission_type)),
                    ("Admission Location", text(&admission.admission_location)),
                    ("Discharge Location", text(&admission.discharge_location)),
                ],
            );
        });
    }

    fn section(ui: &mut egui::Ui, title: &str, fields: &[(&str, String)]) {
        egui::Frame::none()
            .rounding(8.0)
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(RichText::new(title).size(15.0).strong());
                ui.add_space(6.0);
                for (label, value) in fields {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(format!("{label}:")).color(Color32::GRAY));
                        ui.label(value);
                    });
                }
            });
    }
}
