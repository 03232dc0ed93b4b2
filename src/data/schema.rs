//! Column names shared by the source file, the star schema and the dashboard.

pub const PATIENT_ID: &str = "patient_id";
pub const ADMISSION_ID: &str = "admission_id";
pub const HOSPITAL: &str = "Hospital";
pub const GENDER: &str = "gender";
pub const AGE: &str = "age";
pub const RACE: &str = "race";
pub const ICD_CODE: &str = "icd_code";
pub const ICD_VERSION: &str = "icd_version";
pub const DIAGNOSIS_DESCRIPTION: &str = "diagnosis_description";
pub const ADMISSION_TYPE: &str = "admission_type";
pub const ADMISSION_LOCATION: &str = "admission_location";
pub const DISCHARGE_LOCATION: &str = "discharge_location";
pub const ADMITTIME: &str = "admittime";
pub const DISCHTIME: &str = "dischtime";
pub const LENGTH_OF_STAY: &str = "length_of_stay";
pub const CCI_SCORE: &str = "cci_score";
pub const ED_VISIT_COUNT: &str = "ed_visit_count";
pub const LACE_L_SCORE: &str = "lace_l_score";
pub const LACE_A_SCORE: &str = "lace_a_score";
pub const LACE_E_SCORE: &str = "lace_e_score";
pub const LACE_SCORE: &str = "lace_score";

pub const PATIENT_KEY: &str = "patient_key";
pub const HOSPITAL_KEY: &str = "hospital_key";
pub const DIAGNOSIS_KEY: &str = "diagnosis_key";

/// Every column of the flat admissions file, in file order.
pub const SOURCE_COLUMNS: [&str; 21] = [
    PATIENT_ID,
    ADMISSION_ID,
    HOSPITAL,
    GENDER,
    AGE,
    RACE,
    ICD_CODE,
    ICD_VERSION,
    DIAGNOSIS_DESCRIPTION,
    ADMISSION_TYPE,
    ADMISSION_LOCATION,
    DISCHARGE_LOCATION,
    ADMITTIME,
    DISCHTIME,
    LENGTH_OF_STAY,
    CCI_SCORE,
    ED_VISIT_COUNT,
    LACE_L_SCORE,
    LACE_A_SCORE,
    LACE_E_SCORE,
    LACE_SCORE,
];

pub const PATIENT_NATURAL_KEY: [&str; 4] = [PATIENT_ID, GENDER, AGE, RACE];
pub const HOSPITAL_NATURAL_KEY: [&str; 1] = [HOSPITAL];
pub const DIAGNOSIS_NATURAL_KEY: [&str; 3] = [ICD_CODE, ICD_VERSION, DIAGNOSIS_DESCRIPTION];

/// Measure and attribute columns carried into the fact table after the keys.
pub const FACT_MEASURES: [&str; 12] = [
    ADMISSION_TYPE,
    ADMISSION_LOCATION,
    DISCHARGE_LOCATION,
    ADMITTIME,
    DISCHTIME,
    LENGTH_OF_STAY,
    CCI_SCORE,
    ED_VISIT_COUNT,
    LACE_L_SCORE,
    LACE_A_SCORE,
    LACE_E_SCORE,
    LACE_SCORE,
];

/// Fact table column order as written to `fact_admissions.csv`.
pub const FACT_COLUMNS: [&str; 16] = [
    ADMISSION_ID,
    PATIENT_KEY,
    HOSPITAL_KEY,
    DIAGNOSIS_KEY,
    ADMISSION_TYPE,
    ADMISSION_LOCATION,
    DISCHARGE_LOCATION,
    ADMITTIME,
    DISCHTIME,
    LENGTH_OF_STAY,
    CCI_SCORE,
    ED_VISIT_COUNT,
    LACE_L_SCORE,
    LACE_A_SCORE,
    LACE_E_SCORE,
    LACE_SCORE,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fact_columns_are_keys_then_measures() {
        assert_eq!(FACT_COLUMNS[0], ADMISSION_ID);
        assert_eq!(&FACT_COLUMNS[1..4], &[PATIENT_KEY, HOSPITAL_KEY, DIAGNOSIS_KEY]);
        assert_eq!(&FACT_COLUMNS[4..], &FACT_MEASURES);
    }

    #[test]
    fn natural_keys_are_source_columns() {
        for column in PATIENT_NATURAL_KEY
            .iter()
            .chain(HOSPITAL_NATURAL_KEY.iter())
            .chain(DIAGNOSIS_NATURAL_KEY.iter())
            .chain(FACT_MEASURES.iter())
        {
            assert!(SOURCE_COLUMNS.contains(column), "{column} not in source");
        }
    }
}
