// crates/gauss-core/src/fingerprint.rs
//
// Stable identifiers printed in run banners so two runs over the same
// ciphertext / dataset can be matched up by eye.

pub fn crc32(bytes: &[u8]) -> u32 {
    let mut h = crc32fast::Hasher::new();
    h.update(bytes);
    h.finalize()
}

pub fn blake3_16(bytes: &[u8]) -> [u8; 16] {
    let hash = blake3::hash(bytes);
    let mut out = [0u8; 16];
    out.copy_from_slice(&hash.as_bytes()[0..16]);
    out
}

pub fn blake3_16_hex(bytes: &[u8]) -> String {
    blake3_16(bytes).iter().map(|b| format!("{:02x}", b)).collect()
}

/// Fingerprint of a feature table: little-endian f64 bits, row-major.
pub fn features_id_hex<R: AsRef<[f64]>>(rows: &[R]) -> String {
    let mut buf = Vec::new();
    for row in rows {
        for v in row.as_ref() {
            buf.extend_from_slice(&v.to_le_bytes());
        }
    }
    blake3_16_hex(&buf)
}
