//! Signal Generator
//!
//! Random binary burst sent by the mobile antenna each tick.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// One tick's transmitted burst
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransmittedSignal {
    /// Raw bits, each 0 or 1
    pub bits: Vec<u8>,
    /// Bipolar symbols, bit 0 -> -1.0 and bit 1 -> +1.0
    pub symbols: Vec<f64>,
}

impl TransmittedSignal {
    pub fn from_bits(bits: Vec<u8>) -> Self {
        let symbols = to_bipolar(&bits);
        Self { bits, symbols }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SignalGenerator {
    length: usize,
}

impl SignalGenerator {
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Draw `length` independent uniform bits
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> TransmittedSignal {
        let bits = (0..self.length).map(|_| rng.gen_range(0..=1u8)).collect();
        TransmittedSignal::from_bits(bits)
    }
}

pub fn to_bipolar(bits: &[u8]) -> Vec<f64> {
    bits.iter().map(|&b| f64::from(b) * 2.0 - 1.0).collect()
}
