//! Core BLAKE2b compression and the keyless, single-shot hash entry points.
//!
//! This implements keyless BLAKE2b (RFC 7693) exactly as Argon2id needs it:
//! a parameter block carrying only the requested digest length, no key, a
//! single 128-byte block size, and a 64-bit byte counter (Argon2id never
//! hashes enough data for the counter's high word to matter).

use super::constants::{BLOCK_BYTES, IV, MAX_OUTBYTES, SIGMA};

/// One mixing round of the BLAKE2b compression function (RFC 7693 §3.1).
#[inline(always)]
fn mix(v: &mut [u64; 16], a: usize, b: usize, c: usize, d: usize, x: u64, y: u64) {
    v[a] = v[a].wrapping_add(v[b]).wrapping_add(x);
    v[d] = (v[d] ^ v[a]).rotate_right(32);
    v[c] = v[c].wrapping_add(v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(24);

    v[a] = v[a].wrapping_add(v[b]).wrapping_add(y);
    v[d] = (v[d] ^ v[a]).rotate_right(16);
    v[c] = v[c].wrapping_add(v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(63);
}

/// Compresses one 128-byte message block into the running chaining state.
///
/// `t` is the total number of message bytes processed up to and including
/// this block (the low 64 bits of BLAKE2b's byte counter); `is_final`
/// marks the last block of the message.
fn compress(h: &mut [u64; 8], block: &[u8; BLOCK_BYTES], t: u64, is_final: bool) {
    let mut m = [0u64; 16];
    for (word, chunk) in m.iter_mut().zip(block.chunks_exact(8)) {
        *word = u64::from_le_bytes(chunk.try_into().unwrap());
    }

    let mut v = [0u64; 16];
    v[..8].copy_from_slice(h);
    v[8..].copy_from_slice(&IV);

    v[12] ^= t;
    // High word of the counter stays zero: Argon2id never feeds BLAKE2b
    // more than a few kilobytes at a time.
    if is_final {
        v[14] = !v[14];
    }

    for round in 0..12 {
        let s = &SIGMA[round];
        mix(&mut v, 0, 4, 8, 12, m[s[0]], m[s[1]]);
        mix(&mut v, 1, 5, 9, 13, m[s[2]], m[s[3]]);
        mix(&mut v, 2, 6, 10, 14, m[s[4]], m[s[5]]);
        mix(&mut v, 3, 7, 11, 15, m[s[6]], m[s[7]]);
        mix(&mut v, 0, 5, 10, 15, m[s[8]], m[s[9]]);
        mix(&mut v, 1, 6, 11, 12, m[s[10]], m[s[11]]);
        mix(&mut v, 2, 7, 8, 13, m[s[12]], m[s[13]]);
        mix(&mut v, 3, 4, 9, 14, m[s[14]], m[s[15]]);
    }

    for i in 0..8 {
        h[i] ^= v[i] ^ v[i + 8];
    }
}

/// Keyless BLAKE2b over `message`, producing `out_len` bytes (1..=64).
///
/// `out_len` is folded into the parameter block, so distinct lengths yield
/// independent digests rather than truncations of one another — this is
/// what lets `hash_var` be used safely for differently-sized outputs.
fn blake2b_oneshot(out_len: usize, message: &[u8]) -> [u8; MAX_OUTBYTES] {
    debug_assert!(out_len >= 1 && out_len <= MAX_OUTBYTES);

    let mut h = IV;
    h[0] ^= 0x0101_0000 ^ out_len as u64;

    let mut processed: u64 = 0;
    let mut chunks = message.chunks_exact(BLOCK_BYTES);

    // Every full block except a trailing exact-128-byte block is
    // compressed as non-final; the loop below always holds one block back
    // so the final compression (possibly of an empty/partial tail) can be
    // marked `is_final`.
    let mut pending: Option<[u8; BLOCK_BYTES]> = None;
    for chunk in &mut chunks {
        if let Some(prev) = pending.take() {
            processed += BLOCK_BYTES as u64;
            compress(&mut h, &prev, processed, false);
        }
        pending = Some(chunk.try_into().unwrap());
    }

    let remainder = chunks.remainder();
    let mut last = [0u8; BLOCK_BYTES];
    let last_len;

    if let Some(prev) = pending {
        if remainder.is_empty() {
            last = prev;
            last_len = BLOCK_BYTES;
        } else {
            processed += BLOCK_BYTES as u64;
            compress(&mut h, &prev, processed, false);
            last[..remainder.len()].copy_from_slice(remainder);
            last_len = remainder.len();
        }
    } else {
        last[..remainder.len()].copy_from_slice(remainder);
        last_len = remainder.len();
    }

    processed += last_len as u64;
    compress(&mut h, &last, processed, true);

    let mut out = [0u8; MAX_OUTBYTES];
    for (i, word) in h.iter().enumerate() {
        out[i * 8..i * 8 + 8].copy_from_slice(&word.to_le_bytes());
    }
    out
}

/// Full-width keyless BLAKE2b, always producing a 64-byte digest.
pub fn hash_64(message: &[u8]) -> [u8; 64] {
    blake2b_oneshot(64, message)
}

/// Keyless BLAKE2b truncated (via the parameter block, not post-hoc) to
/// `out_len` bytes, `out_len` in `1..=64`.
pub fn hash_var(message: &[u8], out_len: usize) -> [u8; 64] {
    blake2b_oneshot(out_len, message)
}
