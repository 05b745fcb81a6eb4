//! Built-in register write sequences for exercising the matrix without a
//! driver program.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::emu::MATRIX_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Each row goes green, yellow, red, then off.
    Sweep,
    /// Every plane of every row full on.
    Fill,
    Random,
}

impl Pattern {
    pub fn writes(self, count: usize, seed: Option<u64>) -> Vec<(u32, u32)> {
        match self {
            Pattern::Sweep => sweep(),
            Pattern::Fill => (0..(MATRIX_SIZE as u32 * 2)).map(|reg| (reg, 0xFF)).collect(),
            Pattern::Random => random(count, seed),
        }
    }
}

fn sweep() -> Vec<(u32, u32)> {
    let mut writes = Vec::new();
    for row in 0..MATRIX_SIZE as u32 {
        let green = row * 2;
        let red = green + 1;
        writes.push((green, 0xFF));
        writes.push((red, 0xFF));
        writes.push((green, 0x00));
        writes.push((red, 0x00));
    }
    writes
}

fn random(count: usize, seed: Option<u64>) -> Vec<(u32, u32)> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    (0..count)
        .map(|_| (rng.gen_range(0..16), rng.gen_range(0..=0xFF)))
        .collect()
}
