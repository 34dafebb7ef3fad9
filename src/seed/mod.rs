//! Deterministic roll streams.
//!
//! The engine never owns RNG state; hosts that want reproducible item rolls
//! derive a per-item stream from the world seed and the item id. Sha3 keeps
//! the derivation stable across platforms and releases.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use sha3::{Digest, Sha3_256};

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldSeed {
    pub master: u64,
}

impl Default for WorldSeed {
    fn default() -> Self {
        Self { master: 42 }
    }
}

impl WorldSeed {
    pub fn new(master: u64) -> Self {
        Self { master }
    }

    /// Stable 64-bit seed for one item id
    pub fn item_seed(&self, item_id: &str) -> u64 {
        let mut hasher = Sha3_256::new();
        hasher.update(self.master.to_le_bytes());
        hasher.update(item_id.as_bytes());
        let digest = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest[..8]);
        u64::from_le_bytes(bytes)
    }

    /// Seeded generator for one item's roll stream
    pub fn item_rng(&self, item_id: &str) -> Xoshiro256PlusPlus {
        Xoshiro256PlusPlus::seed_from_u64(self.item_seed(item_id))
    }
}
