//! Patient search, high-risk filters and the patient table/detail views.

use crate::data::{Admission, Dataset};
use crate::stats::calculator::StatsCalculator;
use crate::stats::categories::gender_label;

/// Dataset-wide means the "high" toggles compare against.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FilterThresholds {
    pub lace_score: Option<f64>,
    pub cci_score: Option<f64>,
    pub length_of_stay: Option<f64>,
}

impl FilterThresholds {
    pub fn from_rows(rows: &[&Admission]) -> Self {
        Self {
            lace_score: StatsCalculator::mean(rows.iter().map(|a| a.lace_score)),
            cci_score: StatsCalculator::mean(rows.iter().map(|a| a.cci_score)),
            length_of_stay: StatsCalculator::mean(rows.iter().map(|a| a.length_of_stay)),
        }
    }

    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self::from_rows(&dataset.all())
    }
}

/// Patients page controls.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientFilter {
    /// Substring matched against the patient ID; blank matches everything.
    pub search: String,
    pub high_lace: bool,
    pub high_cci: bool,
    pub high_length_of_stay: bool,
}

impl Default for PatientFilter {
    fn default() -> Self {
        Self {
            search: String::new(),
            high_lace: true,
            high_cci: true,
            high_length_of_stay: true,
        }
    }
}

fn exceeds(value: Option<f64>, threshold: Option<f64>) -> bool {
    matches!((value, threshold), (Some(v), Some(t)) if v > t)
}

impl PatientFilter {
    /// Filter with every toggle off.
    pub fn unfiltered() -> Self {
        Self {
            high_lace: false,
            high_cci: false,
            high_length_of_stay: false,
            ..Self::default()
        }
    }

    pub fn matches(&self, admission: &Admission, thresholds: &FilterThresholds) -> bool {
        let query = self.search.trim();
        if !query.is_empty() && !admission.patient_id().contains(query) {
            return false;
        }
        // A row with a missing score never counts as "high".
        if self.high_lace && !exceeds(admission.lace_score, thresholds.lace_score) {
            return false;
        }
        if self.high_cci && !exceeds(admission.cci_score, thresholds.cci_score) {
            return false;
        }
        if self.high_length_of_stay
            && !exceeds(admission.length_of_stay, thresholds.length_of_stay)
        {
            return false;
        }
        true
    }

    /// Positions of the admissions that pass the filter, in input order.
    pub fn apply(&self, admissions: &[Admission], thresholds: &FilterThresholds) -> Vec<usize> {
        admissions
            .iter()
            .enumerate()
            .filter(|(_, a)| self.matches(a, thresholds))
            .map(|(i, _)| i)
            .collect()
    }
}

/// Columns of the patient table, each with its display header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatientColumn {
    PatientId,
    Age,
    Gender,
    LengthOfStay,
    Diagnosis,
    CciScore,
    LaceScore,
}

impl PatientColumn {
    pub const ALL: [PatientColumn; 7] = [
        PatientColumn::PatientId,
        PatientColumn::Age,
        PatientColumn::Gender,
        PatientColumn::LengthOfStay,
        PatientColumn::Diagnosis,
        PatientColumn::CciScore,
        PatientColumn::LaceScore,
    ];

    pub fn header(self) -> &'static str {
        match self {
            PatientColumn::PatientId => "Patient ID",
            PatientColumn::Age => "Age",
            PatientColumn::Gender => "Gender",
            PatientColumn::LengthOfStay => "Length of Stay",
            PatientColumn::Diagnosis => "Diagnosis",
            PatientColumn::CciScore => "CCI Score",
            PatientColumn::LaceScore => "LACE Score",
        }
    }

    pub fn cell(self, admission: &Admission) -> String {
        match self {
            PatientColumn::PatientId => admission.patient_id().to_string(),
            PatientColumn::Age => format_number(admission.age),
            PatientColumn::Gender => gender_label(admission.gender.as_deref()).to_string(),
            PatientColumn::LengthOfStay => format_number(admission.length_of_stay),
            PatientColumn::Diagnosis => admission
                .diagnosis_description
                .clone()
                .unwrap_or_default(),
            PatientColumn::CciScore => format_number(admission.cci_score),
            PatientColumn::LaceScore => format_number(admission.lace_score),
        }
    }
}

/// Whole numbers without a fraction, others with up to two decimals, blank
/// when missing.
pub fn format_number(value: Option<f64>) -> String {
    match value {
        None => String::new(),
        Some(v) if v.fract() == 0.0 => format!("{}", v as i64),
        Some(v) => {
            let text = format!("{:.2}", v);
            text.trim_end_matches('0').trim_end_matches('.').to_string()
        }
    }
}

/// Outcome of opening the patient detail page.
///
/// Resolved once per navigation; `Found` holds the admission's position in
/// the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PatientLookup {
    #[default]
    NoSelection,
    NotFound(String),
    Found(usize),
}

impl PatientLookup {
    /// First admission in dataset order whose patient ID equals `patient_id`.
    pub fn find(dataset: &Dataset, patient_id: Option<&str>) -> Self {
        let Some(id) = patient_id.map(str::trim).filter(|id| !id.is_empty()) else {
            return PatientLookup::NoSelection;
        };
        dataset
            .admissions()
            .iter()
            .position(|a| a.patient_id() == id)
            .map(PatientLookup::Found)
            .unwrap_or_else(|| PatientLookup::NotFound(id.to_string()))
    }

    pub fn admission<'a>(&self, dataset: &'a Dataset) -> Option<&'a Admission> {
        match self {
            PatientLookup::Found(index) => dataset.admissions().get(*index),
            PatientLookup::NoSelection | PatientLookup::NotFound(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient(id: &str, lace: f64, cci: f64, los: f64) -> Admission {
        Admission {
            patient_id: Some(id.to_string()),
            lace_score: Some(lace),
            cci_score: Some(cci),
            length_of_stay: Some(los),
            ..Default::default()
        }
    }

    #[test]
    fn high_lace_keeps_rows_above_mean() {
        let rows = vec![
            patient("1", 1.0, 0.0, 0.0),
            patient("2", 5.0, 0.0, 0.0),
            patient("3", 9.0, 0.0, 0.0),
        ];
        let refs: Vec<&Admission> = rows.iter().collect();
        let thresholds = FilterThresholds::from_rows(&refs);
        assert_eq!(thresholds.lace_score, Some(5.0));

        let filter = PatientFilter {
            high_lace: true,
            ..PatientFilter::unfiltered()
        };
        assert_eq!(filter.apply(&rows, &thresholds), vec![2]);
    }

    #[test]
    fn toggles_default_on_and_combine() {
        let rows = vec![
            patient("10", 9.0, 9.0, 9.0),
            patient("11", 9.0, 0.0, 9.0),
            patient("12", 0.0, 0.0, 0.0),
        ];
        let refs: Vec<&Admission> = rows.iter().collect();
        let thresholds = FilterThresholds::from_rows(&refs);

        let hits = PatientFilter::default().apply(&rows, &thresholds);
        let ids: Vec<&str> = hits.iter().map(|&i| rows[i].patient_id()).collect();
        assert_eq!(ids, vec!["10"]);
    }

    #[test]
    fn search_is_a_substring_match_on_patient_id() {
        let rows = vec![
            patient("10023", 0.0, 0.0, 0.0),
            patient("20231", 0.0, 0.0, 0.0),
            patient("30000", 0.0, 0.0, 0.0),
        ];
        let refs: Vec<&Admission> = rows.iter().collect();
        let thresholds = FilterThresholds::from_rows(&refs);

        let filter = PatientFilter {
            search: " 023 ".into(),
            ..PatientFilter::unfiltered()
        };
        let ids: Vec<&str> = filter
            .apply(&rows, &thresholds)
            .iter()
            .map(|&i| rows[i].patient_id())
            .collect();
        assert_eq!(ids, vec!["10023", "20231"]);

        let none = PatientFilter {
            search: "999".into(),
            ..PatientFilter::unfiltered()
        };
        assert!(none.apply(&rows, &thresholds).is_empty());
    }

    #[test]
    fn missing_score_is_never_high() {
        let mut a = patient("1", 0.0, 0.0, 0.0);
        a.lace_score = None;
        let thresholds = FilterThresholds {
            lace_score: Some(-1.0),
            ..Default::default()
        };
        let filter = PatientFilter {
            high_lace: true,
            ..PatientFilter::unfiltered()
        };
        assert!(!filter.matches(&a, &thresholds));
    }

    #[test]
    fn table_cells_use_display_labels() {
        let mut a = patient("7", 12.0, 2.5, 3.0);
        a.gender = Some("M".into());
        a.diagnosis_description = Some("Sepsis".into());
        let cells: Vec<String> = PatientColumn::ALL.iter().map(|c| c.cell(&a)).collect();
        assert_eq!(cells, vec!["7", "", "Male", "3", "Sepsis", "2.5", "12"]);

        let headers: Vec<&str> = PatientColumn::ALL.iter().map(|c| c.header()).collect();
        assert_eq!(
            headers,
            vec!["Patient ID", "Age", "Gender", "Length of Stay", "Diagnosis", "CCI Score", "LACE Score"]
        );
    }

    #[test]
    fn lookup_reports_missing_and_unknown_patients() {
        let dataset = Dataset::new(vec![patient("5", 1.0, 1.0, 1.0), patient("5", 2.0, 2.0, 2.0)]);

        assert_eq!(PatientLookup::find(&dataset, None), PatientLookup::NoSelection);
        assert_eq!(PatientLookup::find(&dataset, Some("  ")), PatientLookup::NoSelection);
        assert_eq!(
            PatientLookup::find(&dataset, Some("6")),
            PatientLookup::NotFound("6".into())
        );

        let found = PatientLookup::find(&dataset, Some("5"));
        assert_eq!(found, PatientLookup::Found(0));
        assert_eq!(found.admission(&dataset).and_then(|a| a.lace_score), Some(1.0));
        assert_eq!(PatientLookup::NotFound("6".into()).admission(&dataset), None);
    }
}
