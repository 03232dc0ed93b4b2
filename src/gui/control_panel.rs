//! Control Panel Widget
//! Left side panel with navigation, data source and page controls.

use crate::data::DataSource;
use crate::gui::Route;
use crate::stats::PatientFilter;
use egui::{Color32, ComboBox, RichText};

/// Left side control panel with navigation and the current page's controls.
pub struct ControlPanel {
    pub source: DataSource,
    pub hospitals: Vec<String>,
    pub selected_hospital: Option<String>,
    pub filter: PatientFilter,
    pub status: String,
    pub is_loading: bool,
}

impl ControlPanel {
    pub fn new(source: DataSource) -> Self {
        Self {
            source,
            hospitals: Vec::new(),
            selected_hospital: None,
            filter: PatientFilter::default(),
            status: "Ready".to_string(),
            is_loading: false,
        }
    }

    /// Replace the hospital list, keeping the selection when it still exists
    /// and otherwise falling back to the first hospital.
    pub fn update_hospitals(&mut self, hospitals: Vec<String>) {
        let keep = self
            .selected_hospital
            .as_ref()
            .is_some_and(|h| hospitals.contains(h));
        if !keep {
            self.selected_hospital = hospitals.first().cloned();
        }
        self.hospitals = hospitals;
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// End a load that produced no dataset.
    pub fn load_failed(&mut self, reason: &str) {
        self.is_loading = false;
        self.status = format!("Error: {reason}");
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui, route: &Route) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🏥 Careboard")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Hospital Admissions")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Navigation =====
        ui.label(RichText::new("🧭 Pages").size(14.0).strong());
        ui.add_space(5.0);
        for page in Route::NAVIGATION {
            let selected = route.same_page(&page);
            if ui
                .selectable_label(selected, RichText::new(page.nav_label()).size(14.0))
                .clicked()
                && !selected
            {
                action = ControlPanelAction::Navigate(page);
            }
        }

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Data Source =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.label(RichText::new(self.source.to_string()).size(12.0));
                ui.add_space(5.0);
                ui.horizontal(|ui| {
                    ui.add_enabled_ui(!self.is_loading, |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = ControlPanelAction::BrowseCsv;
                        }
                        if ui.button("🔄 Reload").clicked() {
                            action = ControlPanelAction::Reload;
                        }
                    });
                });
            });

        // ===== Page controls =====
        match route {
            Route::Hospitals => {
                ui.add_space(10.0);
                ui.separator();
                ui.add_space(10.0);
                if self.show_hospital_selector(ui) {
                    action = ControlPanelAction::HospitalChanged;
                }
            }
            Route::Patients => {
                ui.add_space(10.0);
                ui.separator();
                ui.add_space(10.0);
                if self.show_patient_filters(ui) {
                    action = ControlPanelAction::FilterChanged;
                }
            }
            Route::Home | Route::PatientDetails { .. } => {}
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status =====
        if self.is_loading {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(RichText::new("Loading...").size(11.0));
            });
        }
        let status_color = if self.status.starts_with("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.starts_with("Loaded") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    fn show_hospital_selector(&mut self, ui: &mut egui::Ui) -> bool {
        let mut changed = false;
        ui.label(RichText::new("🏨 Hospital").size(14.0).strong());
        ui.add_space(5.0);

        let selected_text = self.selected_hospital.clone().unwrap_or_default();
        ComboBox::from_id_salt("hospital")
            .width(220.0)
            .selected_text(selected_text)
            .show_ui(ui, |ui| {
                for hospital in &self.hospitals {
                    let is_selected = self.selected_hospital.as_ref() == Some(hospital);
                    if ui.selectable_label(is_selected, hospital).clicked() && !is_selected {
                        self.selected_hospital = Some(hospital.clone());
                        changed = true;
                    }
                }
            });
        changed
    }

    fn show_patient_filters(&mut self, ui: &mut egui::Ui) -> bool {
        let mut changed = false;
        ui.label(RichText::new("🔍 Filters").size(14.0).strong());
        ui.add_space(5.0);

        ui.label("Search Patient ID:");
        changed |= ui
            .text_edit_singleline(&mut self.filter.search)
            .changed();
        ui.add_space(5.0);

        changed |= ui
            .checkbox(&mut self.filter.high_lace, "High LACE Score")
            .changed();
        changed |= ui
            .checkbox(&mut self.filter.high_cci, "High CCI Score")
            .changed();
        changed |= ui
            .checkbox(&mut self.filter.high_length_of_stay, "Long Length of Stay")
            .changed();

        ui.add_space(5.0);
        if ui.small_button("Clear Filters").clicked() {
            self.filter = PatientFilter::unfiltered();
            changed = true;
        }
        changed
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    Navigate(Route),
    BrowseCsv,
    Reload,
    HospitalChanged,
    FilterChanged,
}
