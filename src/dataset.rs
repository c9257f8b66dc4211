use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Default element count for a generated dataset.
pub const DEFAULT_SIZE: usize = 300_000;

/// Default exclusive upper bound on the random byte length of one element.
pub const DEFAULT_MAX_LEN: usize = 5;

pub fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

/// Generate `size` short strings. Each element draws a length in
/// [0, max_len), fills that many random bytes, and decodes them leniently
/// as UTF-8. Invalid sequences become replacement characters, so the
/// decoded length may differ from the byte length drawn - that is accepted,
/// not an error.
pub fn generate(size: usize, max_len: usize, rng: &mut StdRng) -> Vec<String> {
    let mut items = Vec::with_capacity(size);
    let mut bytes = vec![0u8; max_len.saturating_sub(1)];
    for _ in 0..size {
        let len = rng.gen_range(0..max_len);
        rng.fill_bytes(&mut bytes[0..len]);
        items.push(String::from_utf8_lossy(&bytes[0..len]).into_owned());
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_exactly_the_requested_size() {
        for size in [0usize, 1, 1000] {
            let mut rng = rng_for(Some(42));
            assert_eq!(generate(size, DEFAULT_MAX_LEN, &mut rng).len(), size);
        }
    }

    #[test]
    fn same_seed_same_dataset() {
        let mut a = rng_for(Some(7));
        let mut b = rng_for(Some(7));
        assert_eq!(
            generate(500, DEFAULT_MAX_LEN, &mut a),
            generate(500, DEFAULT_MAX_LEN, &mut b)
        );
    }

    #[test]
    fn decoded_char_count_stays_under_bound() {
        // lossy decoding never yields more chars than input bytes
        let mut rng = rng_for(Some(99));
        for s in generate(2000, DEFAULT_MAX_LEN, &mut rng) {
            assert!(s.chars().count() < DEFAULT_MAX_LEN);
        }
    }

    #[test]
    fn max_len_one_forces_every_element_empty() {
        let mut rng = rng_for(Some(3));
        assert!(generate(1000, 1, &mut rng).iter().all(|s| s.is_empty()));
    }
}
