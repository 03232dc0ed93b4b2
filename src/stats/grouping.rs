//! Categories the dashboard counts distinct patients by.

use crate::data::Admission;
use crate::stats::binning::{BinSpec, AGE_BINS, CCI_BINS, LACE_BINS, LENGTH_OF_STAY_BINS};
use crate::stats::categories::{Gender, RaceCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupDimension {
    Age,
    Gender,
    Race,
    RaceCategory,
    AdmissionType,
    AdmissionLocation,
    DischargeLocation,
    LengthOfStay,
    CciScore,
    LaceScore,
    Hospital,
}

/// How a dimension turns an admission into a group label.
#[derive(Debug, Clone, Copy)]
pub enum Grouping {
    Category(fn(&Admission) -> Option<String>),
    Binned(fn(&Admission) -> Option<f64>, BinSpec),
}

impl GroupDimension {
    /// Charts on the overview page, in display order.
    pub const OVERVIEW: [GroupDimension; 11] = [
        GroupDimension::Age,
        GroupDimension::Gender,
        GroupDimension::RaceCategory,
        GroupDimension::Race,
        GroupDimension::AdmissionType,
        GroupDimension::AdmissionLocation,
        GroupDimension::DischargeLocation,
        GroupDimension::LengthOfStay,
        GroupDimension::CciScore,
        GroupDimension::LaceScore,
        GroupDimension::Hospital,
    ];

    /// Charts restricted to one hospital; hospital itself is meaningless there.
    pub const HOSPITAL_SCOPED: [GroupDimension; 9] = [
        GroupDimension::Age,
        GroupDimension::Gender,
        GroupDimension::RaceCategory,
        GroupDimension::AdmissionType,
        GroupDimension::AdmissionLocation,
        GroupDimension::DischargeLocation,
        GroupDimension::LengthOfStay,
        GroupDimension::CciScore,
        GroupDimension::LaceScore,
    ];

    pub fn title(self) -> &'static str {
        match self {
            GroupDimension::Age => "Age",
            GroupDimension::Gender => "Gender",
            GroupDimension::Race => "Race",
            GroupDimension::RaceCategory => "Race Category",
            GroupDimension::AdmissionType => "Admission Type",
            GroupDimension::AdmissionLocation => "Admission Location",
            GroupDimension::DischargeLocation => "Discharge Location",
            GroupDimension::LengthOfStay => "Length of Stay",
            GroupDimension::CciScore => "CCI Score",
            GroupDimension::LaceScore => "LACE Score",
            GroupDimension::Hospital => "Hospital",
        }
    }

    pub fn grouping(self) -> Grouping {
        match self {
            GroupDimension::Age => Grouping::Binned(|a| a.age, AGE_BINS),
            GroupDimension::Gender => Grouping::Category(|a| {
                a.gender
                    .as_deref()
                    .and_then(Gender::from_code)
                    .map(|g| g.label().to_string())
            }),
            GroupDimension::Race => Grouping::Category(|a| a.race.clone()),
            GroupDimension::RaceCategory => Grouping::Category(|a| {
                Some(RaceCategory::from_raw(a.race.as_deref().unwrap_or_default()).to_string())
            }),
            GroupDimension::AdmissionType => Grouping::Category(|a| a.admission_type.clone()),
            GroupDimension::AdmissionLocation => {
                Grouping::Category(|a| a.admission_location.clone())
            }
            GroupDimension::DischargeLocation => {
                Grouping::Category(|a| a.discharge_location.clone())
            }
            GroupDimension::LengthOfStay => {
                Grouping::Binned(|a| a.length_of_stay, LENGTH_OF_STAY_BINS)
            }
            GroupDimension::CciScore => Grouping::Binned(|a| a.cci_score, CCI_BINS),
            GroupDimension::LaceScore => Grouping::Binned(|a| a.lace_score, LACE_BINS),
            GroupDimension::Hospital => Grouping::Category(|a| a.hospital.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn race_category_groups_missing_race_as_unknown() {
        let Grouping::Category(label) = GroupDimension::RaceCategory.grouping() else {
            panic!("race category is categorical");
        };
        let admission = Admission::default();
        assert_eq!(label(&admission).as_deref(), Some("Other/Unknown"));
    }

    #[test]
    fn gender_groups_skip_unmapped_codes() {
        let Grouping::Category(label) = GroupDimension::Gender.grouping() else {
            panic!("gender is categorical");
        };
        let mut admission = Admission {
            gender: Some("F".into()),
            ..Default::default()
        };
        assert_eq!(label(&admission).as_deref(), Some("Female"));
        admission.gender = Some("U".into());
        assert_eq!(label(&admission), None);
    }

    #[test]
    fn race_groups_by_the_raw_value() {
        let Grouping::Category(label) = GroupDimension::Race.grouping() else {
            panic!("race is categorical");
        };
        let mut admission = Admission {
            race: Some("WHITE - RUSSIAN".into()),
            ..Default::default()
        };
        assert_eq!(label(&admission).as_deref(), Some("WHITE - RUSSIAN"));
        admission.race = None;
        assert_eq!(label(&admission), None);
    }

    #[test]
    fn overview_charts_race_category_then_raw_race() {
        let at = |d| GroupDimension::OVERVIEW.iter().position(|&o| o == d);
        assert_eq!(at(GroupDimension::RaceCategory).map(|i| i + 1), at(GroupDimension::Race));
    }
}
