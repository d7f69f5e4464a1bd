//! Deterministic salted hashing for probe-sequence derivation.

/// FNV-1a 64-bit offset basis.
const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
/// FNV-1a 64-bit prime.
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

const LEVEL_SALT_A: u64 = 0x9e37_79b9_7f4a_7c15;
const LEVEL_SALT_B: u64 = 0x517c_c1b7_2722_0a95;

/// FNV-1a over the raw key bytes, seeded with `salt`.
fn fnv1a_salted(key: &[u8], salt: u64) -> u64 {
    let mut hash = FNV_OFFSET ^ salt;
    for &byte in key {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Derives the (base, stride) pair for `key` at `level`.
///
/// The salts differ per level, so two keys colliding at one level need not
/// collide at the next. The stride is forced odd so the probe sequence
/// `(base + attempt * stride) mod capacity` visits every slot of an
/// even-capacity sub-array.
pub(crate) fn dual_hash(key: &[u8], level: usize) -> (u64, u64) {
    let level = level as u64;
    let salt1 = level.wrapping_mul(LEVEL_SALT_A).wrapping_add(0xa1);
    let salt2 = level.wrapping_mul(LEVEL_SALT_B).wrapping_add(0xb2);
    (fnv1a_salted(key, salt1), fnv1a_salted(key, salt2) | 1)
}

/// Slot index of probe attempt `attempt` in a double-hashing sequence.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn probe_index(h1: u64, h2: u64, attempt: usize, capacity: usize) -> usize {
    (h1.wrapping_add((attempt as u64).wrapping_mul(h2)) % capacity as u64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        assert_eq!(dual_hash(b"hello", 0), dual_hash(b"hello", 0));
        assert_eq!(dual_hash(b"hello", 3), dual_hash(b"hello", 3));
    }

    #[test]
    fn test_level_changes_hashes() {
        let (a1, a2) = dual_hash(b"hello", 0);
        let (b1, b2) = dual_hash(b"hello", 1);
        assert_ne!((a1, a2), (b1, b2));
    }

    #[test]
    fn test_distinct_keys_differ() {
        assert_ne!(dual_hash(b"a", 0).0, dual_hash(b"b", 0).0);
    }

    #[test]
    fn test_stride_is_odd() {
        for level in 0..8 {
            for key in [&b"x"[..], b"longer-key", b""] {
                let (_, h2) = dual_hash(key, level);
                assert_eq!(h2 % 2, 1);
            }
        }
    }

    #[test]
    fn test_full_period_on_even_capacity() {
        let capacity = 64;
        let (h1, h2) = dual_hash(b"period-check", 0);
        let mut seen = vec![false; capacity];
        for attempt in 0..capacity {
            seen[probe_index(h1, h2, attempt, capacity)] = true;
        }
        assert!(seen.iter().all(|&visited| visited));
    }
}
