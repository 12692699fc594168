// crates/gauss-core/src/cipher/mod.rs
//
// Cost function for the entropy-minimizing cryptanalysis search.
//
// A candidate sample is a real vector of 8*L scalars. Byte r is read
// MSB-first from sample[r*8 .. r*8+8], one bit per scalar (bit = scalar > 0).
// That byte is the keystream guess; guess ^ ciphertext[r] is the plaintext
// guess.
//
// Cost: one-hot both byte streams into (L, 256) matrices, take the
// self-entropy of each against itself, and sum the per-row ratio
// plaintext_entropy / key_entropy. The search minimizes it.
//
// Everything here is pure: no interior mutability, safe to call from any
// number of optimizer workers at once.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::entropy::{one_hot_rows, self_entropy_of};
use crate::error::{GaussError, Result};

pub const BITS_PER_BYTE: usize = 8;

/// Known plaintext used by the demo modes.
pub const DEMO_PLAINTEXT: &str = "You will rejoice to hear that no disaster has accompanied the\n\tcommencement of an enterprise which you have regarded with such evil\n\tforebodings. I arrived here yesterday, and my first task is to assure\n\tmy dear sister of my welfare and increasing confidence in the success\n\tof my undertaking.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decoded {
    pub plaintext: Vec<u8>,
    pub key: Vec<u8>,
}

/// Threshold `sample` into `len` bytes, MSB-first.
pub fn guess_bytes(sample: &[f64], len: usize) -> Result<Vec<u8>> {
    let need = len
        .checked_mul(BITS_PER_BYTE)
        .ok_or_else(|| GaussError::Validation("guess_bytes overflow".into()))?;
    if sample.len() != need {
        return Err(GaussError::Validation(format!(
            "sample has {} scalars, expected {} ({} bytes x {} bits)",
            sample.len(),
            need,
            len,
            BITS_PER_BYTE
        )));
    }

    Ok(sample
        .chunks_exact(BITS_PER_BYTE)
        .map(|bits| {
            bits.iter()
                .fold(0u8, |acc, &x| (acc << 1) | u8::from(x > 0.0))
        })
        .collect())
}

pub fn decode(sample: &[f64], ciphertext: &[u8]) -> Result<Decoded> {
    let key = guess_bytes(sample, ciphertext.len())?;
    let plaintext = xor_bytes(&key, ciphertext);
    Ok(Decoded { plaintext, key })
}

/// Sum over rows of `entropy(plaintext one-hot) / entropy(key one-hot)`.
pub fn cost_of(plaintext: &[u8], key: &[u8]) -> Result<f64> {
    if plaintext.len() != key.len() {
        return Err(GaussError::Validation(format!(
            "plaintext has {} bytes, key has {}",
            plaintext.len(),
            key.len()
        )));
    }

    let e1 = self_entropy_of(&one_hot_rows(plaintext))?;
    let e2 = self_entropy_of(&one_hot_rows(key))?;

    Ok(e1.iter().zip(e2.iter()).map(|(a, b)| a / b).sum())
}

/// Decode then score: the objective handed to the optimizer.
pub fn sample_cost(sample: &[f64], ciphertext: &[u8]) -> Result<f64> {
    let d = decode(sample, ciphertext)?;
    cost_of(&d.plaintext, &d.key)
}

/// Seeded keystream, one byte per position (low byte of each `next_u32`).
pub fn keystream(seed: u64, len: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len).map(|_| rng.next_u32() as u8).collect()
}

/// Bytewise XOR over the common prefix.
pub fn xor_bytes(a: &[u8], b: &[u8]) -> Vec<u8> {
    a.iter().zip(b.iter()).map(|(x, y)| x ^ y).collect()
}

/// `(ciphertext, key)` for `plain` under the keystream seeded by `seed`.
pub fn encrypt(plain: &[u8], seed: u64) -> (Vec<u8>, Vec<u8>) {
    let key = keystream(seed, plain.len());
    (xor_bytes(plain, &key), key)
}

/// One char per byte (Latin-1 style), so partial guesses stay printable
/// length-for-length.
pub fn render_text(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_are_msb_first() {
        let mut sample = vec![-1.0; 8];
        sample[0] = 0.5; // MSB
        sample[7] = 2.0; // LSB
        assert_eq!(guess_bytes(&sample, 1).unwrap(), vec![0x81]);
    }

    #[test]
    fn zero_is_not_a_set_bit() {
        let sample = vec![0.0; 16];
        assert_eq!(guess_bytes(&sample, 2).unwrap(), vec![0, 0]);
    }

    #[test]
    fn wrong_sample_length_is_rejected() {
        let err = decode(&[1.0; 9], &[0x42]).unwrap_err();
        assert!(matches!(err, GaussError::Validation(_)));
    }

    #[test]
    fn keystream_is_deterministic_per_seed() {
        assert_eq!(keystream(1, 32), keystream(1, 32));
        assert_ne!(keystream(1, 32), keystream(2, 32));
    }

    #[test]
    fn render_keeps_one_char_per_byte() {
        let s = render_text(&[b'h', b'i', 0xE9]);
        assert_eq!(s.chars().count(), 3);
        assert!(s.starts_with("hi"));
    }
}
