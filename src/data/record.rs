//! Typed admission records built from the flat admissions table.

use crate::data::processor::{DataProcessor, ProcessorError};
use crate::data::schema::*;
use polars::prelude::*;

/// One hospital admission, with numeric fields already coerced.
///
/// Text fields are `None` when the cell was empty or null. Numeric fields are
/// `None` when the cell did not hold a finite number.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Admission {
    pub patient_id: Option<String>,
    pub admission_id: Option<String>,
    pub hospital: Option<String>,
    pub gender: Option<String>,
    pub age: Option<f64>,
    pub race: Option<String>,
    pub icd_code: Option<String>,
    pub icd_version: Option<String>,
    pub diagnosis_description: Option<String>,
    pub admission_type: Option<String>,
    pub admission_location: Option<String>,
    pub discharge_location: Option<String>,
    pub admittime: Option<String>,
    pub dischtime: Option<String>,
    pub length_of_stay: Option<f64>,
    pub cci_score: Option<f64>,
    pub ed_visit_count: Option<String>,
    pub lace_l_score: Option<String>,
    pub lace_a_score: Option<String>,
    pub lace_e_score: Option<String>,
    pub lace_score: Option<f64>,
}

impl Admission {
    /// Convert every row of a flat admissions frame.
    pub fn from_frame(df: &DataFrame) -> Result<Vec<Admission>, ProcessorError> {
        DataProcessor::require_columns(df, &SOURCE_COLUMNS)?;

        let text = |name: &str| -> Result<Vec<Option<String>>, ProcessorError> {
            Ok(DataProcessor::text_values(df, name)?
                .into_iter()
                .map(DataProcessor::non_empty)
                .collect())
        };
        let numeric = |name: &str| DataProcessor::numeric_values(df, name);

        let mut patient_id = text(PATIENT_ID)?.into_iter();
        let mut admission_id = text(ADMISSION_ID)?.into_iter();
        let mut hospital = text(HOSPITAL)?.into_iter();
        let mut gender = text(GENDER)?.into_iter();
        let mut age = numeric(AGE)?.into_iter();
        let mut race = text(RACE)?.into_iter();
        let mut icd_code = text(ICD_CODE)?.into_iter();
        let mut icd_version = text(ICD_VERSION)?.into_iter();
        let mut diagnosis_description = text(DIAGNOSIS_DESCRIPTION)?.into_iter();
        let mut admission_type = text(ADMISSION_TYPE)?.into_iter();
        let mut admission_location = text(ADMISSION_LOCATION)?.into_iter();
        let mut discharge_location = text(DISCHARGE_LOCATION)?.into_iter();
        let mut admittime = text(ADMITTIME)?.into_iter();
        let mut dischtime = text(DISCHTIME)?.into_iter();
        let mut length_of_stay = numeric(LENGTH_OF_STAY)?.into_iter();
        let mut cci_score = numeric(CCI_SCORE)?.into_iter();
        let mut ed_visit_count = text(ED_VISIT_COUNT)?.into_iter();
        let mut lace_l_score = text(LACE_L_SCORE)?.into_iter();
        let mut lace_a_score = text(LACE_A_SCORE)?.into_iter();
        let mut lace_e_score = text(LACE_E_SCORE)?.into_iter();
        let mut lace_score = numeric(LACE_SCORE)?.into_iter();

        // Every column iterator has exactly df.height() items.
        let records = (0..df.height())
            .map(|_| Admission {
                patient_id: patient_id.next().flatten(),
                admission_id: admission_id.next().flatten(),
                hospital: hospital.next().flatten(),
                gender: gender.next().flatten(),
                age: age.next().flatten(),
                race: race.next().flatten(),
                icd_code: icd_code.next().flatten(),
                icd_version: icd_version.next().flatten(),
                diagnosis_description: diagnosis_description.next().flatten(),
                admission_type: admission_type.next().flatten(),
                admission_location: admission_location.next().flatten(),
                discharge_location: discharge_location.next().flatten(),
                admittime: admittime.next().flatten(),
                dischtime: dischtime.next().flatten(),
                length_of_stay: length_of_stay.next().flatten(),
                cci_score: cci_score.next().flatten(),
                ed_visit_count: ed_visit_count.next().flatten(),
                lace_l_score: lace_l_score.next().flatten(),
                lace_a_score: lace_a_score.next().flatten(),
                lace_e_score: lace_e_score.next().flatten(),
                lace_score: lace_score.next().flatten(),
            })
            .collect();

        Ok(records)
    }

    pub fn patient_id(&self) -> &str {
        self.patient_id.as_deref().unwrap_or_default()
    }

    pub fn hospital(&self) -> &str {
        self.hospital.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_frame(age: &str, los: &str) -> DataFrame {
        let columns: Vec<Column> = SOURCE_COLUMNS
            .iter()
            .map(|name| {
                let value = match *name {
                    AGE => age,
                    LENGTH_OF_STAY => los,
                    PATIENT_ID => "1001",
                    HOSPITAL => "General",
                    GENDER => "F",
                    CCI_SCORE => "3",
                    LACE_SCORE => "",
                    _ => "x",
                };
                Column::new((*name).into(), [value])
            })
            .collect();
        DataFrame::new(columns).unwrap()
    }

    #[test]
    fn from_frame_coerces_numeric_fields() {
        let records = Admission::from_frame(&flat_frame("N/A", "4.5")).unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.age, None);
        assert_eq!(record.length_of_stay, Some(4.5));
        assert_eq!(record.cci_score, Some(3.0));
        assert_eq!(record.lace_score, None);
        assert_eq!(record.patient_id(), "1001");
        assert_eq!(record.hospital(), "General");
        assert_eq!(record.gender.as_deref(), Some("F"));
    }

    #[test]
    fn from_frame_requires_every_source_column() {
        let df = flat_frame("40", "2").drop(RACE).unwrap();
        let err = Admission::from_frame(&df).unwrap_err();
        assert!(matches!(err, ProcessorError::MissingColumn(ref c) if c == RACE));
    }
}
