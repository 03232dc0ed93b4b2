//! GUI module - User interface components

mod app;
mod chart_viewer;
mod control_panel;
mod patient_view;
mod route;

pub use app::CareboardApp;
pub use chart_viewer::ChartViewer;
pub use control_panel::{ControlPanel, ControlPanelAction};
pub use patient_view::PatientView;
pub use route::{Route, RouteError};
