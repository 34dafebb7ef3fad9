//! Monte-Carlo distribution auditing.
//!
//! Samples large batches of template rolls to verify that kind weights and
//! value ranges land where the tuning intends, before a template change
//! ships. Uses rayon for parallel execution across CPU cores; sample seeds
//! derive from sha3 so runs are reproducible.

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};

use crate::catalog::AbilityDef;
use crate::modifier::ModifierKind;
use crate::player::ArmorSlot;
use crate::template::AwakenTemplate;

/// Configuration for a sampling run
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub samples: u64,
    pub base_seed: u64,
    /// Quality applied to every roll, 0.0 samples the raw ranges
    pub quality: f64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            samples: 10_000,
            base_seed: 42,
            quality: 0.0,
        }
    }
}

/// Aggregated roll statistics for one modifier kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KindStats {
    pub kind: ModifierKind,
    pub count: u64,
    /// Fraction of all samples that rolled this kind
    pub share: f64,
    pub min_value: f64,
    pub max_value: f64,
    pub mean_value: f64,
}

/// Results of a distribution sampling run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributionReport {
    pub total_samples: u64,
    /// Per-kind stats, most common first
    pub entries: Vec<KindStats>,
    /// Share of the most common kind over the least common one
    pub share_ratio: f64,
}

impl DistributionReport {
    pub fn share(&self, kind: ModifierKind) -> f64 {
        self.stats_for(kind).map(|s| s.share).unwrap_or(0.0)
    }

    pub fn stats_for(&self, kind: ModifierKind) -> Option<&KindStats> {
        self.entries.iter().find(|s| s.kind == kind)
    }

    pub fn dominant_kind(&self) -> Option<ModifierKind> {
        self.entries.first().map(|s| s.kind)
    }
}

/// Deterministic seed for one sample index
fn sample_seed(base_seed: u64, index: u64) -> u64 {
    let mut hasher = Sha3_256::new();
    hasher.update(base_seed.to_le_bytes());
    hasher.update(index.to_le_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}

/// Sample weapon rolls for one ability against a template
pub fn sample_template_distribution(
    template: &AwakenTemplate,
    ability: &AbilityDef,
    config: &SampleConfig,
) -> DistributionReport {
    let rolls: Vec<(ModifierKind, f64)> = (0..config.samples)
        .into_par_iter()
        .map(|i| {
            let mut rng = Xoshiro256PlusPlus::seed_from_u64(sample_seed(config.base_seed, i));
            let awakening = template.generate(ability, config.quality, &mut rng);
            (awakening.kind, awakening.value)
        })
        .collect();
    aggregate(&rolls)
}

/// Sample armor rolls for one slot against a template
pub fn sample_armor_distribution(
    template: &AwakenTemplate,
    slot: ArmorSlot,
    config: &SampleConfig,
) -> DistributionReport {
    let rolls: Vec<(ModifierKind, f64)> = (0..config.samples)
        .into_par_iter()
        .map(|i| {
            let mut rng = Xoshiro256PlusPlus::seed_from_u64(sample_seed(config.base_seed, i));
            let awakening = template.generate_for_armor(slot, config.quality, &mut rng);
            (awakening.kind, awakening.value)
        })
        .collect();
    aggregate(&rolls)
}

fn aggregate(rolls: &[(ModifierKind, f64)]) -> DistributionReport {
    let total = rolls.len() as u64;
    if total == 0 {
        return DistributionReport {
            total_samples: 0,
            entries: vec![],
            share_ratio: 1.0,
        };
    }

    let mut entries: Vec<KindStats> = Vec::new();
    for &(kind, value) in rolls {
        match entries.iter_mut().find(|s| s.kind == kind) {
            Some(stats) => {
                stats.count += 1;
                stats.min_value = stats.min_value.min(value);
                stats.max_value = stats.max_value.max(value);
                // mean_value accumulates the sum until the final pass
                stats.mean_value += value;
            }
            None => entries.push(KindStats {
                kind,
                count: 1,
                share: 0.0,
                min_value: value,
                max_value: value,
                mean_value: value,
            }),
        }
    }

    for stats in entries.iter_mut() {
        stats.share = stats.count as f64 / total as f64;
        stats.mean_value /= stats.count as f64;
    }
    entries.sort_by(|a, b| b.count.cmp(&a.count));

    let max_share = entries.first().map(|s| s.share).unwrap_or(0.0);
    let min_share = entries.last().map(|s| s.share).unwrap_or(0.0);
    let share_ratio = if min_share > 0.0 {
        max_share / min_share
    } else {
        f64::INFINITY
    };

    DistributionReport {
        total_samples: total,
        entries,
        share_ratio,
    }
}
