//! Statistics Calculator Module
//! Summary metrics and distinct-patient counts over admission rows.

use crate::data::Admission;
use crate::stats::grouping::{GroupDimension, Grouping};
use statrs::statistics::Statistics;
use std::collections::{BTreeMap, HashSet};

/// Headline numbers shown at the top of a page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryMetrics {
    pub patients: usize,
    pub admissions: usize,
    pub mean_length_of_stay: Option<f64>,
    pub mean_age: Option<f64>,
    pub mean_lace_score: Option<f64>,
    pub mean_cci_score: Option<f64>,
}

/// Distinct patients in one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCount {
    pub label: String,
    pub patients: usize,
}

/// Handles statistical calculations over borrowed admission rows.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Mean of the present values; `None` when there are none.
    pub fn mean<I>(values: I) -> Option<f64>
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let present: Vec<f64> = values.into_iter().flatten().collect();
        if present.is_empty() {
            None
        } else {
            Some(present.iter().mean())
        }
    }

    pub fn distinct_patients(rows: &[&Admission]) -> usize {
        rows.iter()
            .filter_map(|a| a.patient_id.as_deref())
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn distinct_admissions(rows: &[&Admission]) -> usize {
        rows.iter()
            .filter_map(|a| a.admission_id.as_deref())
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn summarize(rows: &[&Admission]) -> SummaryMetrics {
        SummaryMetrics {
            patients: Self::distinct_patients(rows),
            admissions: Self::distinct_admissions(rows),
            mean_length_of_stay: Self::mean(rows.iter().map(|a| a.length_of_stay)),
            mean_age: Self::mean(rows.iter().map(|a| a.age)),
            mean_lace_score: Self::mean(rows.iter().map(|a| a.lace_score)),
            mean_cci_score: Self::mean(rows.iter().map(|a| a.cci_score)),
        }
    }

    /// Distinct-patient counts per group of `dimension`.
    ///
    /// Rows without a patient ID or without a group value are skipped and
    /// empty groups are omitted. Categories come back by count descending
    /// (ties by label); buckets come back in bucket order.
    pub fn patients_by(rows: &[&Admission], dimension: GroupDimension) -> Vec<GroupCount> {
        match dimension.grouping() {
            Grouping::Category(label_of) => {
                let mut groups: BTreeMap<String, HashSet<&str>> = BTreeMap::new();
                for row in rows {
                    if let (Some(patient), Some(label)) = (row.patient_id.as_deref(), label_of(row))
                    {
                        groups.entry(label).or_default().insert(patient);
                    }
                }

                let mut counts: Vec<GroupCount> = groups
                    .into_iter()
                    .map(|(label, patients)| GroupCount {
                        label,
                        patients: patients.len(),
                    })
                    .collect();
                // stable sort keeps the BTreeMap's label order within ties
                counts.sort_by(|a, b| b.patients.cmp(&a.patients));
                counts
            }
            Grouping::Binned(value_of, bins) => {
                let mut buckets: Vec<HashSet<&str>> = vec![HashSet::new(); bins.count];
                for row in rows {
                    let patient = row.patient_id.as_deref();
                    let idx = value_of(row).and_then(|v| bins.index_of(v));
                    if let (Some(patient), Some(idx)) = (patient, idx) {
                        buckets[idx].insert(patient);
                    }
                }

                buckets
                    .into_iter()
                    .enumerate()
                    .filter(|(_, patients)| !patients.is_empty())
                    .map(|(idx, patients)| GroupCount {
                        label: bins.label(idx),
                        patients: patients.len(),
                    })
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admission(patient: &str, admission: &str) -> Admission {
        Admission {
            patient_id: Some(patient.to_string()),
            admission_id: Some(admission.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn mean_skips_missing_values() {
        assert_eq!(StatsCalculator::mean([Some(20.0), None, Some(40.0)]), Some(30.0));
        assert_eq!(StatsCalculator::mean([None, None]), None);
        assert_eq!(StatsCalculator::mean(Vec::<Option<f64>>::new()), None);
    }

    #[test]
    fn unparseable_age_is_not_zero() {
        let mut a = admission("1", "A1");
        a.age = Some(60.0);
        let b = admission("2", "A2"); // age was "N/A"
        let rows = vec![&a, &b];
        assert_eq!(StatsCalculator::summarize(&rows).mean_age, Some(60.0));
    }

    #[test]
    fn summary_counts_distinct_ids() {
        let mut a = admission("1", "A1");
        a.length_of_stay = Some(2.0);
        a.lace_score = Some(4.0);
        let mut b = admission("1", "A2");
        b.length_of_stay = Some(6.0);
        b.cci_score = Some(3.0);
        let c = admission("2", "A3");
        let rows = vec![&a, &b, &c];

        let metrics = StatsCalculator::summarize(&rows);
        assert_eq!(metrics.patients, 2);
        assert_eq!(metrics.admissions, 3);
        assert_eq!(metrics.mean_length_of_stay, Some(4.0));
        assert_eq!(metrics.mean_lace_score, Some(4.0));
        assert_eq!(metrics.mean_cci_score, Some(3.0));
        assert_eq!(metrics.mean_age, None);
    }

    #[test]
    fn categories_sorted_by_patient_count() {
        let mut rows = Vec::new();
        for (patient, kind) in [
            ("1", "URGENT"),
            ("2", "EMERGENCY"),
            ("3", "EMERGENCY"),
            ("3", "EMERGENCY"),
            ("4", "ELECTIVE"),
        ] {
            let mut a = admission(patient, "x");
            a.admission_type = Some(kind.to_string());
            rows.push(a);
        }
        let mut missing = admission("5", "x");
        missing.admission_type = None;
        rows.push(missing);

        let refs: Vec<&Admission> = rows.iter().collect();
        let counts = StatsCalculator::patients_by(&refs, GroupDimension::AdmissionType);
        let pairs: Vec<(&str, usize)> = counts.iter().map(|c| (c.label.as_str(), c.patients)).collect();
        assert_eq!(pairs, vec![("EMERGENCY", 2), ("ELECTIVE", 1), ("URGENT", 1)]);
    }

    #[test]
    fn buckets_in_order_and_out_of_range_dropped() {
        let ages = [("1", 17.0), ("2", 12.0), ("3", 100.0), ("4", 5.0), ("1", 18.0)];
        let rows: Vec<Admission> = ages
            .iter()
            .map(|(patient, age)| {
                let mut a = admission(patient, "x");
                a.age = Some(*age);
                a
            })
            .collect();
        let refs: Vec<&Admission> = rows.iter().collect();

        let counts = StatsCalculator::patients_by(&refs, GroupDimension::Age);
        assert_eq!(
            counts,
            vec![
                GroupCount { label: "0–9".into(), patients: 1 },
                GroupCount { label: "10–19".into(), patients: 2 },
            ]
        );
    }
}
