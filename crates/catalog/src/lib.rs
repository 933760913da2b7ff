use std::collections::BTreeMap;

use foundation::timeline::{Year, YearSpan};
use serde::{Deserialize, Serialize};

pub mod temporal;

/// Immutable reference data: a named point on the globe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

/// A named coalition of countries within a single conflict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictSide {
    pub name: String,
    /// Hex color string, e.g. "#d64545".
    pub color: String,
    pub country_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub start_year: i32,
    pub end_year: i32,
    pub casualties_label: String,
    pub description: String,
    /// At least two sides for a confrontation; a single side is valid data
    /// (internal unrest).
    pub sides: Vec<ConflictSide>,
}

impl Conflict {
    pub fn span(&self) -> YearSpan {
        YearSpan::new(Year(self.start_year), Year(self.end_year))
    }

    /// An unresolved conflict carries the dataset's maximum year as a
    /// sentinel end year.
    pub fn is_ongoing(&self, max_year: Year) -> bool {
        Year(self.end_year) >= max_year
    }
}

/// A standalone point of interest, independent of the year timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiberationStruggle {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub color: String,
    pub description: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("conflict `{id}` has start year {start} after end year {end}")]
    InvalidSpan { id: String, start: i32, end: i32 },
    #[error("catalog contains no conflicts")]
    Empty,
    #[error("catalog JSON malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Wire format the host hands us. The engine never mutates it afterwards.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDoc {
    #[serde(default)]
    pub countries: Vec<Country>,
    #[serde(default)]
    pub conflicts: Vec<Conflict>,
    #[serde(default)]
    pub liberation_struggles: Vec<LiberationStruggle>,
}

/// The immutable domain catalog, loaded once at engine start.
///
/// Countries are keyed in a `BTreeMap` so every lookup and iteration order is
/// deterministic. `min_year`/`max_year` are dataset-derived; `max_year` doubles
/// as the "ongoing" sentinel.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    countries: BTreeMap<String, Country>,
    conflicts: Vec<Conflict>,
    struggles: Vec<LiberationStruggle>,
    min_year: Year,
    max_year: Year,
}

impl Catalog {
    pub fn new(
        countries: Vec<Country>,
        conflicts: Vec<Conflict>,
        struggles: Vec<LiberationStruggle>,
    ) -> Result<Self, CatalogError> {
        if conflicts.is_empty() {
            return Err(CatalogError::Empty);
        }
        for conflict in &conflicts {
            if conflict.start_year > conflict.end_year {
                return Err(CatalogError::InvalidSpan {
                    id: conflict.id.clone(),
                    start: conflict.start_year,
                    end: conflict.end_year,
                });
            }
        }

        let min_year = conflicts
            .iter()
            .map(|c| c.start_year)
            .min()
            .map(Year)
            .unwrap_or(Year(0));
        let max_year = conflicts
            .iter()
            .map(|c| c.end_year)
            .max()
            .map(Year)
            .unwrap_or(Year(0));

        let countries = countries
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect::<BTreeMap<_, _>>();

        Ok(Self {
            countries,
            conflicts,
            struggles,
            min_year,
            max_year,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDoc = serde_json::from_str(json)?;
        Self::new(doc.countries, doc.conflicts, doc.liberation_struggles)
    }

    /// An unknown id yields `None`; the catalog can be regionally partial.
    pub fn country(&self, id: &str) -> Option<&Country> {
        self.countries.get(id)
    }

    pub fn countries(&self) -> impl Iterator<Item = &Country> {
        self.countries.values()
    }

    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    pub fn liberation_struggles(&self) -> &[LiberationStruggle] {
        &self.struggles
    }

    pub fn min_year(&self) -> Year {
        self.min_year
    }

    pub fn max_year(&self) -> Year {
        self.max_year
    }
}

#[cfg(test)]
pub mod testdata {
    use super::{Catalog, Conflict, ConflictSide, Country, LiberationStruggle};

    pub fn country(id: &str, lat: f64, lng: f64) -> Country {
        Country {
            id: id.to_string(),
            name: id.to_uppercase(),
            lat,
            lng,
        }
    }

    pub fn side(name: &str, color: &str, country_ids: &[&str]) -> ConflictSide {
        ConflictSide {
            name: name.to_string(),
            color: color.to_string(),
            country_ids: country_ids.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn conflict(id: &str, start: i32, end: i32, sides: Vec<ConflictSide>) -> Conflict {
        Conflict {
            id: id.to_string(),
            name: id.to_uppercase(),
            kind: "interstate".to_string(),
            start_year: start,
            end_year: end,
            casualties_label: "unknown".to_string(),
            description: String::new(),
            sides,
        }
    }

    pub fn struggle(id: &str, lat: f64, lng: f64) -> LiberationStruggle {
        LiberationStruggle {
            id: id.to_string(),
            name: id.to_uppercase(),
            lat,
            lng,
            color: "#ffaa00".to_string(),
            description: String::new(),
        }
    }

    /// Two non-overlapping conflicts plus one standalone struggle.
    pub fn small_catalog() -> Catalog {
        let countries = vec![
            country("deu", 51.0, 10.0),
            country("fra", 46.0, 2.0),
            country("gbr", 54.0, -2.0),
            country("kor", 36.5, 127.8),
            country("usa", 39.8, -98.5),
        ];
        let conflicts = vec![
            conflict(
                "wwii",
                1939,
                1945,
                vec![
                    side("Allies", "#4577d6", &["gbr", "fra", "usa"]),
                    side("Axis", "#d64545", &["deu"]),
                ],
            ),
            conflict(
                "korea",
                1950,
                1953,
                vec![
                    side("North", "#d64545", &["kor"]),
                    side("South", "#4577d6", &["usa"]),
                ],
            ),
        ];
        let struggles = vec![struggle("algeria", 28.0, 2.6)];
        Catalog::new(countries, conflicts, struggles).expect("valid test catalog")
    }
}
