use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{MAX_ARRAY_SIZE, MAX_VALUE, MIN_ARRAY_SIZE, MIN_VALUE};
use crate::error::{Error, Result};
use crate::sorting_algorithms::Element;

/// Fills a fresh array of `size` elements with values in `MIN_VALUE..=MAX_VALUE`.
pub fn generate<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Vec<Element>> {
    if !(MIN_ARRAY_SIZE..=MAX_ARRAY_SIZE).contains(&size) {
        return Err(Error::InvalidArraySize(size));
    }
    Ok((0..size)
        .map(|id| Element::new(rng.gen_range(MIN_VALUE..=MAX_VALUE), id))
        .collect())
}

/// Same as [`generate`], reproducible when a seed is given.
pub fn generate_with_seed(size: usize, seed: Option<u64>) -> Result<Vec<Element>> {
    match seed {
        Some(seed) => generate(size, &mut StdRng::seed_from_u64(seed)),
        None => generate(size, &mut rand::thread_rng()),
    }
}
