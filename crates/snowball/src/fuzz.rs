use rand::distributions::{Distribution, Standard};
use snowball_core::{derive_case_seed, FuzzRng};
use tracing::debug;

use crate::session::Session;

/// Invokes `target` `count` times with values drawn across the range of
/// `A`, seeded from operating system entropy. Results are discarded; no
/// verdict is produced.
///
/// Returns the seed so a campaign that tripped something can be replayed
/// with [`fuzz_seeded`].
pub fn fuzz<F, A, R>(target: F, count: usize) -> u64
where
    F: FnMut(A) -> R,
    Standard: Distribution<A>,
{
    let mut rng = FuzzRng::from_entropy();
    run(target, count, &mut rng);
    rng.seed()
}

/// Same as [`fuzz`] with an explicit seed.
pub fn fuzz_seeded<F, A, R>(target: F, count: usize, seed: u64)
where
    F: FnMut(A) -> R,
    Standard: Distribution<A>,
{
    run(target, count, &mut FuzzRng::from_seed(seed));
}

fn run<F, A, R>(mut target: F, count: usize, rng: &mut FuzzRng)
where
    F: FnMut(A) -> R,
    Standard: Distribution<A>,
{
    debug!(seed = rng.seed(), count, "fuzz campaign");
    for _ in 0..count {
        let _ = target(rng.draw::<A>());
    }
}

impl Session {
    /// Fuzzes `target` with a stream derived from `master_seed` and the
    /// active test case label, so each test case replays independently.
    ///
    /// Returns the derived seed.
    pub fn fuzz_case<F, A, R>(&self, target: F, count: usize, master_seed: u64) -> u64
    where
        F: FnMut(A) -> R,
        Standard: Distribution<A>,
    {
        let seed = derive_case_seed(master_seed, self.current_test_case());
        fuzz_seeded(target, count, seed);
        seed
    }
}
