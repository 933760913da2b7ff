use std::collections::BTreeMap;

use foundation::timeline::Year;

use crate::{Catalog, Conflict};

/// Conflicts whose span contains `year`, boundary-inclusive on both ends.
///
/// Pure and total: any year yields a (possibly empty) set. Catalog order is
/// preserved, so repeated calls are deterministic.
pub fn active_conflicts(catalog: &Catalog, year: Year) -> Vec<&Conflict> {
    catalog
        .conflicts()
        .iter()
        .filter(|c| c.span().contains(year))
        .collect()
}

/// One (conflict, side) participation entry for a country.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Participation<'a> {
    pub conflict: &'a Conflict,
    pub side_index: usize,
}

/// Reverse index from country id to every participation in the active set.
///
/// A country may legitimately accumulate several entries when it sits in
/// multiple simultaneously active conflicts, or on multiple sides of one
/// (data anomaly; indexed, never rejected). Rebuilt whenever the selected
/// year changes; independent of camera and visibility state.
#[derive(Debug, Default)]
pub struct CountryConflictIndex<'a> {
    entries: BTreeMap<&'a str, Vec<Participation<'a>>>,
}

impl<'a> CountryConflictIndex<'a> {
    pub fn build(active: &[&'a Conflict]) -> Self {
        let mut entries: BTreeMap<&'a str, Vec<Participation<'a>>> = BTreeMap::new();
        for conflict in active {
            for (side_index, side) in conflict.sides.iter().enumerate() {
                for country_id in &side.country_ids {
                    entries.entry(country_id.as_str()).or_default().push(
                        Participation {
                            conflict,
                            side_index,
                        },
                    );
                }
            }
        }
        Self { entries }
    }

    pub fn participations(&self, country_id: &str) -> &[Participation<'a>] {
        self.entries
            .get(country_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn country_count(&self) -> usize {
        self.entries.len()
    }
}
