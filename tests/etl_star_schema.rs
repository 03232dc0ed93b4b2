use careboard::data::schema::*;
use careboard::data::{DataLoader, DataSource, DatasetCache};
use careboard::etl::{self, StarSchema, FACT_FILE};
use careboard::stats::{GroupDimension, HospitalReport, PageReport};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

const SOURCE: &str = "\
patient_id,admission_id,Hospital,gender,age,race,icd_code,icd_version,diagnosis_description,admission_type,admission_location,discharge_location,admittime,dischtime,length_of_stay,cci_score,ed_visit_count,lace_l_score,lace_a_score,lace_e_score,lace_score
1001,A1,General,M,67,WHITE,I10,10,Hypertension,EMERGENCY,EMERGENCY ROOM,HOME,2180-01-01 10:00:00,2180-01-04 10:00:00,3,2,1,3,3,1,9
1001,A2,General,M,67,WHITE,E11,10,Type 2 diabetes,URGENT,TRANSFER FROM HOSPITAL,HOME,2180-03-01 10:00:00,2180-03-09 10:00:00,8,2,0,4,3,0,11
1002,A3,North,F,45,BLACK/AFRICAN AMERICAN,I10,10,Hypertension,ELECTIVE,PHYSICIAN REFERRAL,SKILLED NURSING FACILITY,2180-02-01 10:00:00,2180-02-02 10:00:00,1,0,0,1,0,0,1
1003,A4,North,F,N/A,,J18,10,Pneumonia,EMERGENCY,EMERGENCY ROOM,,2180-05-01 10:00:00,2180-05-15 10:00:00,14,5,3,5,3,3,16
1004,A5,,M,82,ASIAN - CHINESE,I10,9,Hypertension,EMERGENCY,WALK-IN/SELF REFERRAL,HOME,2180-06-01 10:00:00,2180-06-06 10:00:00,5,3,2,4,3,2,12
";

fn write_source(dir: &Path) -> PathBuf {
    let path = dir.join("data.csv");
    fs::write(&path, SOURCE).unwrap();
    path
}

#[test]
fn creates_output_directory_and_four_tables() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path());
    let output = dir.path().join("nested").join("etl_output");

    etl::run(&input, &output).unwrap();

    for path in StarSchema::files(&output) {
        assert!(path.is_file(), "missing {}", path.display());
    }
    assert!(output.join(FACT_FILE).is_file());
}

#[test]
fn dimensions_are_unique_with_dense_keys() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path());
    let schema = etl::run(&input, &dir.path().join("out")).unwrap();

    assert_eq!(schema.patients.len(), 4);
    assert_eq!(schema.hospitals.len(), 3);
    assert_eq!(schema.diagnoses.len(), 4);

    for dimension in [&schema.patients, &schema.hospitals, &schema.diagnoses] {
        let keys: Vec<u32> = dimension.rows().iter().map(|r| r.key).collect();
        let expected: Vec<u32> = (1..=dimension.len() as u32).collect();
        assert_eq!(keys, expected);

        let distinct: HashSet<_> = dimension.rows().iter().map(|r| r.natural.clone()).collect();
        assert_eq!(distinct.len(), dimension.len());
    }

    // First-occurrence order, with the blank hospital kept as its own member.
    let hospitals: Vec<Option<String>> = schema
        .hospitals
        .rows()
        .iter()
        .map(|r| r.natural[0].clone())
        .collect();
    assert_eq!(
        hospitals,
        vec![Some("General".to_string()), Some("North".to_string()), None]
    );
}

#[test]
fn fact_table_has_one_row_per_admission_with_matching_keys() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path());
    let schema = etl::run(&input, &dir.path().join("out")).unwrap();
    let source = DataLoader::read_source(&input).unwrap();

    assert_eq!(schema.facts.height(), source.height());
    let names: Vec<String> = schema
        .facts
        .get_column_names()
        .iter()
        .map(|n| n.to_string())
        .collect();
    assert_eq!(names, FACT_COLUMNS.map(String::from).to_vec());

    // Both admissions of patient 1001 point at the same patient row.
    let patient_keys = schema
        .facts
        .column(PATIENT_KEY)
        .unwrap()
        .as_materialized_series()
        .u32()
        .unwrap()
        .clone();
    assert_eq!(patient_keys.get(0), Some(1));
    assert_eq!(patient_keys.get(1), Some(1));
    assert_eq!(patient_keys.get(2), Some(2));

    // I10 version 9 is a different diagnosis from I10 version 10.
    let diagnosis_keys = schema
        .facts
        .column(DIAGNOSIS_KEY)
        .unwrap()
        .as_materialized_series()
        .u32()
        .unwrap()
        .clone();
    assert_eq!(diagnosis_keys.get(0), diagnosis_keys.get(2));
    assert_ne!(diagnosis_keys.get(0), diagnosis_keys.get(4));
}

#[test]
fn repeated_runs_write_identical_files() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path());
    let first = dir.path().join("first");
    let second = dir.path().join("second");

    etl::run(&input, &first).unwrap();
    etl::run(&input, &second).unwrap();

    for (a, b) in StarSchema::files(&first).iter().zip(StarSchema::files(&second).iter()) {
        assert_eq!(fs::read(a).unwrap(), fs::read(b).unwrap());
    }
}

#[test]
fn star_source_loads_the_same_dataset_as_the_flat_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path());
    let output = dir.path().join("out");
    etl::run(&input, &output).unwrap();

    let flat = DataLoader::load(&DataSource::Flat { csv: input }).unwrap();
    let star = DataLoader::load(&DataSource::Star { dir: output }).unwrap();

    assert_eq!(flat.admissions(), star.admissions());
    assert_eq!(flat.hospitals(), star.hospitals());
}

#[test]
fn dashboard_reports_over_the_star_schema() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path());
    let output = dir.path().join("out");
    etl::run(&input, &output).unwrap();

    let mut cache = DatasetCache::new();
    let source = DataSource::Star { dir: output };
    let dataset = cache.get_or_load(&source).unwrap();

    let overview = PageReport::overview(&dataset);
    assert_eq!(overview.metrics.patients, 4);
    assert_eq!(overview.metrics.admissions, 5);
    let mean = overview.metrics.mean_length_of_stay.unwrap();
    assert!((mean - 6.2).abs() < 1e-9);

    let north = HospitalReport::compute(&dataset, "North");
    assert_eq!(north.scoped.metrics.patients, 2);
    let gender = north.scoped.chart(GroupDimension::Gender).unwrap();
    assert_eq!(gender.counts.len(), 1);
    assert_eq!(gender.counts[0].label, "Female");
    assert_eq!(gender.counts[0].patients, 2);
}
