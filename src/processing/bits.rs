//! # Padding Bit Sources
//!
//! After the payload is written, every remaining pixel receives a random LSB
//! so the used region does not stand out in the bit plane. The source of
//! those bits is injected through [`BitSource`]: production code uses
//! [`RandomBits`], tests can seed it or use [`ConstantBits`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Supplier of uniformly distributed padding bits (each call returns 0 or 1).
pub trait BitSource {
    fn next_bit(&mut self) -> u8;
}

impl<B: BitSource + ?Sized> BitSource for &mut B {
    fn next_bit(&mut self) -> u8 {
        (**self).next_bit()
    }
}

/// Non-cryptographic random bits drawn from any `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomBits<R> {
    rng: R,
}

impl<R: Rng> RandomBits<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomBits<StdRng> {
    /// Reproducible padding: the same seed always yields the same bits.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Padding seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Seeded when a seed is configured, entropy otherwise.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng> BitSource for RandomBits<R> {
    fn next_bit(&mut self) -> u8 {
        u8::from(self.rng.gen::<bool>())
    }
}

/// Always yields the same bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantBits(u8);

impl ConstantBits {
    pub fn new(bit: u8) -> Self {
        Self(bit & 1)
    }
}

impl BitSource for ConstantBits {
    fn next_bit(&mut self) -> u8 {
        self.0
    }
}
