//! Display categories derived from raw codes.

use std::collections::HashMap;
use std::fmt;
use lazy_static::lazy_static;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RaceCategory {
    White,
    Black,
    HispanicOrLatino,
    Asian,
    Other,
    OtherUnknown,
}

impl RaceCategory {
    pub fn label(self) -> &'static str {
        match self {
            RaceCategory::White => "White",
            RaceCategory::Black => "Black",
            RaceCategory::HispanicOrLatino => "Hispanic or Latino",
            RaceCategory::Asian => "Asian",
            RaceCategory::Other => "Other",
            RaceCategory::OtherUnknown => "Other/Unknown",
        }
    }

    /// Map a raw race value. Matching ignores case and surrounding
    /// whitespace; anything not listed is `OtherUnknown`.
    pub fn from_raw(raw: &str) -> Self {
        RACE_LOOKUP
            .get(raw.trim().to_uppercase().as_str())
            .copied()
            .unwrap_or(RaceCategory::OtherUnknown)
    }
}

impl fmt::Display for RaceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepted raw values per category.
const RACE_TABLE: &[(RaceCategory, &[&str])] = &[
    (
        RaceCategory::White,
        &[
            "WHITE",
            "WHITE - OTHER EUROPEAN",
            "WHITE - RUSSIAN",
            "WHITE - EASTERN EUROPEAN",
            "WHITE - BRAZILIAN",
            "PORTUGUESE",
        ],
    ),
    (
        RaceCategory::Black,
        &[
            "BLACK/AFRICAN AMERICAN",
            "BLACK/CAPE VERDEAN",
            "BLACK/CARIBBEAN ISLAND",
            "BLACK/AFRICAN",
        ],
    ),
    (
        RaceCategory::HispanicOrLatino,
        &[
            "HISPANIC OR LATINO",
            "HISPANIC/LATINO - PUERTO RICAN",
            "HISPANIC/LATINO - DOMINICAN",
            "HISPANIC/LATINO - GUATEMALAN",
            "HISPANIC/LATINO - SALVADORAN",
            "HISPANIC/LATINO - MEXICAN",
            "HISPANIC/LATINO - COLUMBIAN",
            "HISPANIC/LATINO - HONDURAN",
            "HISPANIC/LATINO - CUBAN",
            "HISPANIC/LATINO - CENTRAL AMERICAN",
            "SOUTH AMERICAN",
        ],
    ),
    (
        RaceCategory::Asian,
        &[
            "ASIAN",
            "ASIAN - CHINESE",
            "ASIAN - SOUTH EAST ASIAN",
            "ASIAN - ASIAN INDIAN",
            "ASIAN - KOREAN",
        ],
    ),
    (
        RaceCategory::Other,
        &[
            "OTHER",
            "AMERICAN INDIAN/ALASKA NATIVE",
            "NATIVE HAWAIIAN OR OTHER PACIFIC ISLANDER",
            "MULTIPLE RACE/ETHNICITY",
        ],
    ),
    (
        RaceCategory::OtherUnknown,
        &["UNKNOWN", "UNABLE TO OBTAIN", "PATIENT DECLINED TO ANSWER"],
    ),
];

lazy_static! {
    static ref RACE_LOOKUP: HashMap<&'static str, RaceCategory> = RACE_TABLE
        .iter()
        .flat_map(|(category, raws)| raws.iter().map(move |raw| (*raw, *category)))
        .collect();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// `M`/`F` only; other codes have no display label.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "M" => Some(Gender::Male),
            "F" => Some(Gender::Female),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

/// Display label for a raw gender code; blank when unmapped.
pub fn gender_label(code: Option<&str>) -> &'static str {
    code.and_then(Gender::from_code)
        .map(Gender::label)
        .unwrap_or_default()
}
