//! Seeding for randomized input campaigns.

use rand::distributions::{Distribution, Standard};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use siphasher::sip::SipHasher13;
use std::hash::Hasher;

/// Value source for one fuzz campaign.
///
/// Keeps the seed it started from and how many values it has handed out, so
/// a campaign can be replayed up to the draw that tripped it.
#[derive(Debug, Clone)]
pub struct FuzzRng {
    seed: u64,
    draws: u64,
    rng: StdRng,
}

impl FuzzRng {
    /// Source replaying the stream of `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            draws: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Source seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        Self::from_seed(rand::random())
    }

    /// Seed the stream started from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of values drawn so far.
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Draws one value spread over the whole domain of `A` (`[0, 1)` for
    /// floats).
    pub fn draw<A>(&mut self) -> A
    where
        Standard: Distribution<A>,
    {
        self.draws += 1;
        self.rng.sample(Standard)
    }
}

/// Seed for the test case `label` under `master_seed`.
///
/// SipHash-1-3 with zero keys over the seed then the label bytes; stable
/// across platforms and releases.
pub fn derive_case_seed(master_seed: u64, label: &str) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(0, 0);
    hasher.write_u64(master_seed);
    hasher.write(label.as_bytes());
    hasher.finish()
}
