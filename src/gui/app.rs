//! Careboard Main Application
//! Main window with control panel and the current page.

use crate::data::{DataSource, Dataset, DatasetCache};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction, PatientView, Route};
use crate::stats::{
    FilterThresholds, HospitalReport, PageReport, PatientLookup, StatsCalculator, SummaryMetrics,
};
use egui::{RichText, SidePanel};
use log::{error, info};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::sync::{Arc, Mutex};
use std::thread;

/// Dataset loading result from background thread
enum LoadResult {
    Complete(Arc<Dataset>),
    Error(String),
}

/// Filtered patient rows, as indices into the dataset.
#[derive(Default)]
struct PatientsPage {
    rows: Vec<usize>,
    metrics: SummaryMetrics,
}

/// Main application window.
pub struct CareboardApp {
    cache: Arc<Mutex<DatasetCache>>,
    dataset: Option<Arc<Dataset>>,
    route: Route,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    thresholds: FilterThresholds,
    patients: PatientsPage,
    detail: PatientLookup,

    load_rx: Option<Receiver<LoadResult>>,
}

impl CareboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, source: DataSource, route: Route) -> Self {
        let mut app = Self {
            cache: Arc::new(Mutex::new(DatasetCache::new())),
            dataset: None,
            route,
            control_panel: ControlPanel::new(source),
            chart_viewer: ChartViewer::new(),
            thresholds: FilterThresholds::default(),
            patients: PatientsPage::default(),
            detail: PatientLookup::default(),
            load_rx: None,
        };
        app.start_load();
        app
    }

    /// Load the current source through the shared cache on a background
    /// thread.
    fn start_load(&mut self) {
        if self.control_panel.is_loading {
            return;
        }

        let source = self.control_panel.source.clone();
        let cache = Arc::clone(&self.cache);
        let (tx, rx) = channel();
        self.load_rx = Some(rx);
        self.control_panel.is_loading = true;
        self.control_panel.set_status(format!("Loading {source}"));

        thread::spawn(move || {
            let result = match cache.lock() {
                Ok(mut cache) => cache
                    .get_or_load(&source)
                    .map_err(|e| e.to_string()),
                Err(_) => Err("dataset cache is unavailable".to_string()),
            };
            let _ = tx.send(match result {
                Ok(dataset) => LoadResult::Complete(dataset),
                Err(e) => LoadResult::Error(e),
            });
        });
    }

    /// Check for dataset loading results
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(LoadResult::Complete(dataset)) => {
                info!(
                    "Dataset ready: {} admissions, {} hospitals",
                    dataset.len(),
                    dataset.hospitals().len()
                );
                self.control_panel.is_loading = false;
                self.control_panel.set_status(format!(
                    "Loaded {} admissions from {}",
                    dataset.len(),
                    self.control_panel.source
                ));
                self.control_panel
                    .update_hospitals(dataset.hospitals().to_vec());
                self.thresholds = FilterThresholds::from_dataset(&dataset);
                self.dataset = Some(dataset);
                self.refresh_page();
            }
            Ok(LoadResult::Error(e)) => {
                error!("Failed to load {}: {}", self.control_panel.source, e);
                self.control_panel.load_failed(&e);
                self.dataset = None;
                self.chart_viewer.clear();
            }
            Err(std::sync::mpsc::TryRecvError::Empty) => self.load_rx = Some(rx),
            Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                error!("Loader for {} stopped without a result", self.control_panel.source);
                self.control_panel.load_failed("loading stopped unexpectedly");
                self.dataset = None;
                self.chart_viewer.clear();
            }
        }
    }

    /// Recompute whatever the current page displays.
    fn refresh_page(&mut self) {
        let Some(dataset) = self.dataset.clone() else {
            self.chart_viewer.clear();
            return;
        };

        match self.route {
            Route::Home => {
                self.chart_viewer.set_report(PageReport::overview(&dataset), None);
            }
            Route::Hospitals => match self.control_panel.selected_hospital.clone() {
                Some(hospital) => {
                    let report = HospitalReport::compute(&dataset, &hospital);
                    self.chart_viewer
                        .set_report(report.scoped, Some(report.comparison));
                }
                None => self.chart_viewer.clear(),
            },
            Route::Patients => self.refresh_patients(&dataset),
            Route::PatientDetails { ref patient_id } => {
                self.detail = PatientLookup::find(&dataset, patient_id.as_deref());
            }
        }
    }

    fn refresh_patients(&mut self, dataset: &Dataset) {
        let rows = self
            .control_panel
            .filter
            .apply(dataset.admissions(), &self.thresholds);
        let selected: Vec<_> = rows.iter().map(|&i| &dataset.admissions()[i]).collect();

        self.patients = PatientsPage {
            metrics: StatsCalculator::summarize(&selected),
            rows,
        };
    }

    fn navigate(&mut self, route: Route) {
        info!("Navigating to {route}");
        self.route = route;
        self.refresh_page();
    }

    fn handle_browse_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.switch_source(path);
        }
    }

    fn switch_source(&mut self, csv: PathBuf) {
        self.control_panel.source = DataSource::Flat { csv };
        self.start_load();
    }

    fn handle_reload(&mut self) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.invalidate(&self.control_panel.source);
        }
        self.start_load();
    }

    fn show_page(&mut self, ui: &mut egui::Ui) {
        ui.heading(RichText::new(self.route.title()).size(24.0));
        ui.add_space(10.0);

        let Some(dataset) = self.dataset.clone() else {
            ui.centered_and_justified(|ui| {
                let text = if self.control_panel.is_loading {
                    "Loading..."
                } else {
                    "No Data"
                };
                ui.label(RichText::new(text).size(20.0));
            });
            return;
        };

        let mut next = None;
        match &self.route {
            Route::Home => self.chart_viewer.show(ui),
            Route::Hospitals => {
                if let Some(hospital) = &self.control_panel.selected_hospital {
                    ui.label(RichText::new(format!("Hospital: {hospital}")).size(16.0).strong());
                    ui.add_space(6.0);
                }
                self.chart_viewer.show(ui);
            }
            Route::Patients => {
                next = PatientView::show_table(
                    ui,
                    &self.patients.metrics,
                    &dataset,
                    &self.patients.rows,
                );
            }
            Route::PatientDetails { .. } => {
                if PatientView::show_details(ui, &self.detail, &dataset) {
                    next = Some(Route::Patients);
                }
            }
        }

        if let Some(route) = next {
            self.navigate(route);
        }
    }
}

impl eframe::App for CareboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        if self.control_panel.is_loading {
            ctx.request_repaint();
        }

        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui, &self.route) {
                        ControlPanelAction::Navigate(route) => self.navigate(route),
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::Reload => self.handle_reload(),
                        ControlPanelAction::HospitalChanged | ControlPanelAction::FilterChanged => {
                            self.refresh_page()
                        }
                        ControlPanelAction::None => {}
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_page(ui);
        });
    }
}
