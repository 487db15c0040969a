//! Result matrix store.
//!
//! One entry per resolved scenario, keyed by `ScenarioKey`. Built once at
//! pipeline start, read-only while comparisons are computed, dropped at
//! pipeline end. A `BTreeMap` keeps iteration deterministic, which makes
//! repeated runs over the same inputs byte-identical.

use std::collections::{BTreeMap, BTreeSet};

use crate::analysis::types::{
    AttackType, MitigationStage, ScenarioData, ScenarioKey, SummaryMetrics,
};

#[derive(Debug, Default)]
pub struct ResultMatrix {
    entries: BTreeMap<ScenarioKey, ScenarioData>,
}

impl ResultMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scenario result. Duplicate keys overwrite last-write-wins
    /// with a warning; the store tolerates sloppy sweeps rather than
    /// aborting them.
    ///
    /// The baseline is unique by construction: every baseline-flavored key
    /// normalizes to `ScenarioKey::baseline()`, so a second baseline
    /// registration is a duplicate-key overwrite, never a second entry.
    pub fn register(&mut self, key: ScenarioKey, data: ScenarioData) {
        let key = if key.is_baseline() { ScenarioKey::baseline() } else { key };

        if self.entries.insert(key, data).is_some() {
            if key.is_baseline() {
                log::warn!("Duplicate baseline registration; keeping the latest entry");
            } else {
                log::warn!("Duplicate registration for {key}; keeping the latest entry");
            }
        }
    }

    pub fn get(&self, key: &ScenarioKey) -> Option<&ScenarioData> {
        self.entries.get(key)
    }

    /// Summary metrics for a key, if that scenario actually loaded.
    pub fn summary(&self, key: &ScenarioKey) -> Option<&SummaryMetrics> {
        self.get(key).and_then(ScenarioData::metrics)
    }

    /// The no-attack reference summary, if it loaded.
    pub fn baseline(&self) -> Option<&SummaryMetrics> {
        self.summary(&ScenarioKey::baseline())
    }

    /// All entries for one attack family, ordered by ascending intensity and
    /// then by stage order.
    pub fn iter_attack(
        &self,
        attack: AttackType,
    ) -> impl Iterator<Item = (u32, MitigationStage, &ScenarioData)> {
        self.entries
            .iter()
            .filter(move |(key, _)| key.attack == attack)
            .map(|(key, data)| (key.intensity, key.stage, data))
    }

    /// All attack families present, excluding the baseline pseudo-attack.
    pub fn attacks(&self) -> BTreeSet<AttackType> {
        self.entries
            .keys()
            .filter(|k| k.attack != AttackType::None)
            .map(|k| k.attack)
            .collect()
    }

    /// Intensities recorded for one attack family, ascending.
    pub fn intensities(&self, attack: AttackType) -> BTreeSet<u32> {
        self.entries
            .keys()
            .filter(|k| k.attack == attack)
            .map(|k| k.intensity)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ScenarioKey, &ScenarioData)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
