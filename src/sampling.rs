use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{Hormone, HormoneReading};

const RANDOM_LOW: u32 = 30;
const RANDOM_HIGH: u32 = 70;

/// Whole-number reading with every hormone in `[30, 70)`.
pub fn random_reading<R: Rng>(rng: &mut R) -> HormoneReading {
    Hormone::ALL
        .iter()
        .fold(HormoneReading::default(), |reading, hormone| {
            let level = rng.gen_range(RANDOM_LOW..RANDOM_HIGH);
            reading.with(*hormone, f64::from(level))
        })
}

pub fn seeded_reading(seed: u64) -> HormoneReading {
    let mut rng = StdRng::seed_from_u64(seed);
    random_reading(&mut rng)
}
