use rand::{rngs::OsRng, Rng, RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use std::sync::{Arc, Mutex, PoisonError};

/// One randomly generated update against an existing version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOp {
    /// Index into the list of versions created so far.
    pub base: usize,
    pub index: usize,
    pub value: i64,
}

/// Seeded source of random arrays and update histories.
///
/// Backed by xoshiro256**; two fuzzers built from the same seed produce the
/// same sequence, so a failing run replays from its seed alone.
///
/// # Examples
///
/// ```
/// use persistent_segtree_util::Fuzzer;
///
/// let fuzzer = Fuzzer::from_u64(7);
///
/// let n = fuzzer.random_int(1, 10);
/// assert!(n >= 1 && n <= 10);
///
/// let values = fuzzer.random_values(5, -3, 3);
/// assert_eq!(values.len(), 5);
/// assert!(values.iter().all(|v| (-3..=3).contains(v)));
/// ```
pub struct Fuzzer {
    /// Full 32-byte PRNG seed.
    pub seed: [u8; 32],
    rng: Arc<Mutex<Xoshiro256StarStar>>,
}

impl Fuzzer {
    /// `None` draws a fresh seed from `OsRng`.
    pub fn new(seed: Option<[u8; 32]>) -> Self {
        let seed = seed.unwrap_or_else(|| {
            let mut bytes = [0u8; 32];
            OsRng.fill_bytes(&mut bytes);
            bytes
        });

        let rng = Xoshiro256StarStar::from_seed(seed);

        Self {
            seed,
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    /// Fuzzer whose 32-byte seed repeats `seed` four times.
    pub fn from_u64(seed: u64) -> Self {
        let mut bytes = [0u8; 32];
        for chunk in bytes.chunks_mut(8) {
            chunk.copy_from_slice(&seed.to_le_bytes());
        }
        // xoshiro rejects the all-zero state
        bytes[31] ^= 0x5a;
        Self::new(Some(bytes))
    }

    fn with_rng<R>(&self, f: impl FnOnce(&mut Xoshiro256StarStar) -> R) -> R {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut rng)
    }

    /// Uniform integer in `[min, max]`.
    pub fn random_int(&self, min: i64, max: i64) -> i64 {
        self.with_rng(|rng| rng.gen_range(min..=max))
    }

    /// Uniform index in `[0, len)`. `len` must be positive.
    pub fn random_index(&self, len: usize) -> usize {
        self.with_rng(|rng| rng.gen_range(0..len))
    }

    pub fn pick<'a, T>(&self, elements: &'a [T]) -> &'a T {
        &elements[self.random_index(elements.len())]
    }

    /// Calls `callback` `times` times, collecting the results.
    pub fn repeat<T, F>(&self, times: usize, mut callback: F) -> Vec<T>
    where
        F: FnMut() -> T,
    {
        (0..times).map(|_| callback()).collect()
    }

    /// `true` with the given probability.
    pub fn random_bool(&self, probability: f64) -> bool {
        self.with_rng(|rng| rng.gen_bool(probability))
    }

    /// `len` integers, each in `[min, max]`.
    pub fn random_values(&self, len: usize, min: i64, max: i64) -> Vec<i64> {
        self.repeat(len, || self.random_int(min, max))
    }

    /// Generate an update against one of `versions` existing versions of an
    /// array of length `len`.
    ///
    /// With probability `branch_probability` the base is any existing
    /// version; otherwise it is the latest one.
    pub fn random_update(&self, versions: usize, len: usize, branch_probability: f64) -> UpdateOp {
        let base = if self.random_bool(branch_probability) {
            self.random_index(versions)
        } else {
            versions - 1
        };
        UpdateOp {
            base,
            index: self.random_index(len),
            value: self.random_int(-1_000, 1_000),
        }
    }
}
