//! Dashboard pages and their textual addresses.
//!
//! Addresses look like `home`, `hospitals`, `patients` or
//! `patient?patient_id=10023`.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RouteError {
    #[error("Unknown page: {0:?}")]
    UnknownPage(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Hospitals,
    Patients,
    PatientDetails { patient_id: Option<String> },
}

impl Route {
    /// Pages listed in the navigation panel.
    pub const NAVIGATION: [Route; 3] = [Route::Home, Route::Hospitals, Route::Patients];

    pub fn patient(patient_id: impl Into<String>) -> Self {
        Route::PatientDetails {
            patient_id: Some(patient_id.into()),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "🏥 Patient Overview",
            Route::Hospitals => "🏥 Hospitals Overview",
            Route::Patients => "🧑‍⚕️ Patients Overview",
            Route::PatientDetails { .. } => "Patient Details",
        }
    }

    pub fn nav_label(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Hospitals => "Hospitals",
            Route::Patients => "Patients",
            Route::PatientDetails { .. } => "Patient Details",
        }
    }

    /// Whether `other` is the same page, ignoring parameters.
    pub fn same_page(&self, other: &Route) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

fn query_param<'a>(query: &'a str, name: &str) -> Option<&'a str> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().trim_start_matches('/');
        let (page, query) = s.split_once('?').unwrap_or((s, ""));

        match page.to_ascii_lowercase().as_str() {
            "" | "home" => Ok(Route::Home),
            "hospitals" => Ok(Route::Hospitals),
            "patients" => Ok(Route::Patients),
            "patient" | "patientdetails" => Ok(Route::PatientDetails {
                patient_id: query_param(query, "patient_id")
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(str::to_string),
            }),
            _ => Err(RouteError::UnknownPage(page.to_string())),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => f.write_str("home"),
            Route::Hospitals => f.write_str("hospitals"),
            Route::Patients => f.write_str("patients"),
            Route::PatientDetails {
                patient_id: Some(id),
            } => write!(f, "patient?patient_id={id}"),
            Route::PatientDetails { patient_id: None } => f.write_str("patient"),
        }
    }
}
