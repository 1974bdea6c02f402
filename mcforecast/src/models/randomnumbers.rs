use rand::{rngs::StdRng, SeedableRng};

const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

/// SplitMix64 finalizer.
pub fn splitmix64(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(GOLDEN_GAMMA);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// # RandomStreams
/// Hands out one independent generator per simulation, derived from a
/// single master seed. The generator of simulation `i` depends only on the
/// master seed and `i`, never on which worker thread runs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomStreams {
    master_seed: u64,
}

impl RandomStreams {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    /// Master seed drawn once from the thread local entropy source.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    pub fn stream(&self, index: usize) -> StdRng {
        let seed = splitmix64(self.master_seed ^ splitmix64(index as u64));
        StdRng::seed_from_u64(seed)
    }
}
