//! Loaded admissions plus the lookups every page needs.

use crate::data::Admission;
use std::collections::BTreeSet;

/// The working dataset behind the dashboard.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    admissions: Vec<Admission>,
    hospitals: Vec<String>,
}

impl Dataset {
    pub fn new(admissions: Vec<Admission>) -> Self {
        let hospitals: BTreeSet<&str> = admissions
            .iter()
            .filter_map(|a| a.hospital.as_deref())
            .collect();
        let hospitals = hospitals.into_iter().map(str::to_string).collect();

        Self {
            admissions,
            hospitals,
        }
    }

    pub fn admissions(&self) -> &[Admission] {
        &self.admissions
    }

    /// Every admission, as a borrowed view.
    pub fn all(&self) -> Vec<&Admission> {
        self.admissions.iter().collect()
    }

    /// Admissions recorded at `hospital`.
    pub fn for_hospital(&self, hospital: &str) -> Vec<&Admission> {
        self.admissions
            .iter()
            .filter(|a| a.hospital.as_deref() == Some(hospital))
            .collect()
    }

    /// Distinct hospital names, sorted.
    pub fn hospitals(&self) -> &[String] {
        &self.hospitals
    }

    pub fn len(&self) -> usize {
        self.admissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.admissions.is_empty()
    }
}
