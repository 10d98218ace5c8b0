//! Macro-nutrient aggregation, independent of HTTP and storage.
//!
//! Everything here is a pure function over `MacroLine`s; handlers fetch
//! scoped rows and delegate the arithmetic to this module.

use std::collections::BTreeMap;

use serde::Serialize;

/// One food entry reduced to the fields aggregation cares about. Macro
/// values are per unit; `quantity` is the multiplier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroLine {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub quantity: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MacroTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl MacroTotals {
    pub const ZERO: MacroTotals = MacroTotals {
        calories: 0.0,
        protein: 0.0,
        carbs: 0.0,
        fat: 0.0,
    };

    fn add(&mut self, line: &MacroLine) {
        let q = f64::from(line.quantity);
        self.calories += line.calories * q;
        self.protein += line.protein * q;
        self.carbs += line.carbs * q;
        self.fat += line.fat * q;
    }
}

/// Sums `field * quantity` element-wise. Empty input yields all-zero totals.
pub fn aggregate(lines: impl IntoIterator<Item = MacroLine>) -> MacroTotals {
    let mut totals = MacroTotals::ZERO;
    for line in lines {
        totals.add(&line);
    }
    totals
}

/// Groups lines by key (meal id, calendar day, ...) and aggregates each
/// group. Seeded keys with no lines keep zero totals, so a meal with no
/// entries still gets a summary row; unseeded keys never appear, which keeps
/// per-day listings sparse.
pub fn totals_by_key<K: Ord>(
    seed: impl IntoIterator<Item = K>,
    lines: impl IntoIterator<Item = (K, MacroLine)>,
) -> BTreeMap<K, MacroTotals> {
    let mut groups: BTreeMap<K, MacroTotals> = seed
        .into_iter()
        .map(|k| (k, MacroTotals::ZERO))
        .collect();
    for (key, line) in lines {
        groups.entry(key).or_insert(MacroTotals::ZERO).add(&line);
    }
    groups
}
