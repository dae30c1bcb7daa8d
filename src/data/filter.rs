use std::collections::{BTreeSet, HashSet};

use super::model::{Observation, ObservationTable};

// ---------------------------------------------------------------------------
// Selection: which regions and plastic types the user has ticked
// ---------------------------------------------------------------------------

/// The two independent filter dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Region,
    PlasticType,
}

impl Dimension {
    pub fn label(self) -> &'static str {
        match self {
            Dimension::Region => "Region(s)",
            Dimension::PlasticType => "Plastic Type(s)",
        }
    }

    /// Every value of this dimension observed in the table.
    pub fn options(self, table: &ObservationTable) -> &BTreeSet<String> {
        match self {
            Dimension::Region => table.regions(),
            Dimension::PlasticType => table.plastic_types(),
        }
    }
}

/// Current selection sets. An empty set selects nothing on that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub regions: BTreeSet<String>,
    pub plastic_types: BTreeSet<String>,
}

impl Selection {
    /// Everything selected, the initial state after a load.
    pub fn all(table: &ObservationTable) -> Self {
        Self {
            regions: table.regions().clone(),
            plastic_types: table.plastic_types().clone(),
        }
    }

    pub fn get(&self, dim: Dimension) -> &BTreeSet<String> {
        match dim {
            Dimension::Region => &self.regions,
            Dimension::PlasticType => &self.plastic_types,
        }
    }

    pub fn get_mut(&mut self, dim: Dimension) -> &mut BTreeSet<String> {
        match dim {
            Dimension::Region => &mut self.regions,
            Dimension::PlasticType => &mut self.plastic_types,
        }
    }

    pub fn matches(&self, obs: &Observation) -> bool {
        self.regions.contains(&obs.region) && self.plastic_types.contains(&obs.plastic_type)
    }
}

// ---------------------------------------------------------------------------
// FilteredView
// ---------------------------------------------------------------------------

/// Rows of a table that pass a [`Selection`], in source order.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    table: &'a ObservationTable,
    indices: Vec<usize>,
}

/// Apply `selection` to `table`. A row passes iff both its region and its
/// plastic type are selected.
pub fn filter<'a>(table: &'a ObservationTable, selection: &Selection) -> FilteredView<'a> {
    let indices = table
        .observations()
        .iter()
        .enumerate()
        .filter(|(_, obs)| selection.matches(obs))
        .map(|(i, _)| i)
        .collect();
    FilteredView { table, indices }
}

impl<'a> FilteredView<'a> {
    pub fn table(&self) -> &'a ObservationTable {
        self.table
    }

    /// Indices into [`ObservationTable::observations`].
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Observation> + '_ {
        let rows = self.table.observations();
        self.indices.iter().map(move |&i| &rows[i])
    }

    pub fn total_weight(&self) -> f64 {
        self.iter().map(|o| o.weight_kg).sum()
    }

    /// Distinct plastic types in order of first appearance.
    pub fn distinct_types(&self) -> Vec<&'a str> {
        let mut seen = HashSet::new();
        self.iter()
            .map(|o| o.plastic_type.as_str())
            .filter(|t| seen.insert(*t))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::{obs, scenario_table, table};

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn all_selected_keeps_every_row() {
        let t = scenario_table();
        let view = filter(&t, &Selection::all(&t));
        assert_eq!(view.indices(), &[0, 1, 2]);
    }

    #[test]
    fn region_and_type_are_conjunctive() {
        let t = scenario_table();
        let sel = Selection {
            regions: set(&["A"]),
            plastic_types: set(&["bottle", "net"]),
        };
        let view = filter(&t, &sel);
        assert_eq!(view.indices(), &[0, 1]);
        assert_eq!(view.total_weight(), 15.0);

        let sel = Selection {
            regions: set(&["A", "B"]),
            plastic_types: set(&["bottle"]),
        };
        assert_eq!(filter(&t, &sel).indices(), &[0, 2]);
    }

    #[test]
    fn empty_dimension_selects_nothing() {
        let t = scenario_table();
        let sel = Selection {
            regions: t.regions().clone(),
            plastic_types: BTreeSet::new(),
        };
        let view = filter(&t, &sel);
        assert!(view.is_empty());
        assert_eq!(view.total_weight(), 0.0);
        assert!(view.distinct_types().is_empty());
    }

    #[test]
    fn unknown_values_match_nothing() {
        let t = scenario_table();
        let sel = Selection {
            regions: set(&["Z"]),
            plastic_types: t.plastic_types().clone(),
        };
        assert!(filter(&t, &sel).is_empty());
    }

    #[test]
    fn filtered_rows_are_exactly_the_matching_rows() {
        let t = table(vec![
            obs("A", "bag", 1.0, "2024-01-01"),
            obs("B", "net", 2.0, "2024-01-01"),
            obs("C", "bag", 3.0, "2024-01-01"),
            obs("A", "net", 4.0, "2024-01-01"),
            obs("B", "bag", 5.0, "2024-01-01"),
        ]);
        let sel = Selection {
            regions: set(&["A", "B"]),
            plastic_types: set(&["bag"]),
        };
        let view = filter(&t, &sel);
        assert!(view.len() <= t.len());
        for (i, o) in t.observations().iter().enumerate() {
            assert_eq!(view.indices().contains(&i), sel.matches(o));
        }
        // Source order preserved.
        assert_eq!(view.indices(), &[0, 4]);
    }

    #[test]
    fn distinct_types_follow_first_appearance() {
        let t = table(vec![
            obs("A", "rope", 1.0, "2024-01-01"),
            obs("A", "bag", 1.0, "2024-01-01"),
            obs("A", "rope", 1.0, "2024-01-01"),
        ]);
        let view = filter(&t, &Selection::all(&t));
        assert_eq!(view.distinct_types(), vec!["rope", "bag"]);
    }

    #[test]
    fn selection_accessors_by_dimension() {
        let t = scenario_table();
        let mut sel = Selection::all(&t);
        sel.get_mut(Dimension::Region).remove("A");
        assert_eq!(sel.get(Dimension::Region), &set(&["B"]));
        assert_eq!(Dimension::PlasticType.options(&t), &set(&["bottle", "net"]));
    }
}
