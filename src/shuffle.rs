use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Randomize the packing order. A seed makes the permutation reproducible.
pub fn shuffle_images<T>(images: &mut [T], seed: Option<u64>) {
    match seed {
        Some(seed) => {
            debug!("Shuffling {} images with seed {}", images.len(), seed);
            images.shuffle(&mut StdRng::seed_from_u64(seed));
        }
        None => images.shuffle(&mut rand::rng()),
    }
}
