use rand::Rng;


// Source of randomness for the draw. Implemented for every `rand::Rng`; tests may plug in
// something predictable instead.
pub trait RandomSource {
    // Uniformly distributed value in `0..bound`. Never called with `bound == 0`.
    fn index_below(&mut self, bound: usize) -> usize;
}

impl<R: Rng> RandomSource for R {
    fn index_below(&mut self, bound: usize) -> usize { self.random_range(0..bound) }
}

// Fisher-Yates (Durstenfeld) shuffle.
pub fn shuffle<T>(items: &mut [T], random: &mut (impl RandomSource + ?Sized)) {
    for i in (1..items.len()).rev() {
        let j = random.index_below(i + 1);
        items.swap(i, j);
    }
}

// Uniformly random permutation of `0..len`.
pub fn shuffled_indices(len: usize, random: &mut (impl RandomSource + ?Sized)) -> Vec<usize> {
    let mut indices = (0..len).collect::<Vec<_>>();
    shuffle(&mut indices, random);
    indices
}
