use rand::Rng;

/// Length of random identifiers: keep succeeding with probability 0.7.
pub const WORD_CONTINUE: f64 = 0.7;

/// Field and vector-element counts: keep succeeding with probability 0.9.
pub const COUNT_CONTINUE: f64 = 0.9;

/// Draw from a geometric-style counter: repeatedly succeed with probability
/// `p` and stop on the first failure.
///
/// The result is small with high probability but unbounded in principle;
/// callers must tolerate occasional larger values.
pub fn sample_geometric(rng: &mut impl Rng, p: f64) -> usize {
    let mut count = 0;
    while rng.random_bool(p) {
        count += 1;
    }
    count
}

/// A lowercase alphabetic word of geometric length. May be empty.
pub fn sample_word(rng: &mut impl Rng) -> String {
    let len = sample_geometric(rng, WORD_CONTINUE);
    (0..len)
        .map(|_| char::from(b'a' + rng.random_range(0..26u8)))
        .collect()
}

/// A human-legible but arbitrary field name.
pub fn field_name(rng: &mut impl Rng) -> String {
    format!("m_{}", sample_word(rng))
}
