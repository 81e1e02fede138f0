//! H' — Argon2's variable-length hash, built by chaining fixed-width
//! BLAKE2b digests (RFC 9106 §3.3).
//!
//! For outputs up to 64 bytes this is a single call to keyless BLAKE2b with
//! the requested digest length folded into its parameter block. For longer
//! outputs it repeatedly re-hashes the previous 64-byte digest with
//! full-width BLAKE2b, keeping only the first 32 bytes of every digest but
//! the last. The 32-byte step size is the reference implementation's
//! convention and is required for bit-exact compatibility.

use zeroize::Zeroize;

use super::core::{hash_64, hash_var};

/// Maximum output length H' supports.
pub const MAX_OUTPUT_LEN: usize = 4096;

/// Computes H'(`input`, `out_len`) into a freshly allocated buffer.
///
/// `out_len` must be in `1..=4096`; violating that is a programmer error in
/// this crate (every caller validates `out_len` against its own bounds
/// before reaching here), so it is a debug assertion rather than a
/// `Result`.
///
/// Every scratch buffer this function allocates to get from `input` to the
/// returned bytes — the length-prefixed preimage and the running BLAKE2b
/// chaining digests — is zeroized before it drops. The returned `Vec`
/// itself is *not* zeroized here: it is the H' output the
/// caller asked for (an initial block seed, an address value, or the final
/// tag), so it is the caller's responsibility to wipe it once consumed,
/// the way `initial_block` and `finalize` already do for theirs.
pub fn hash_prime(input: &[u8], out_len: usize) -> Vec<u8> {
    debug_assert!((1..=MAX_OUTPUT_LEN).contains(&out_len));

    let mut prefixed = Vec::with_capacity(4 + input.len());
    prefixed.extend_from_slice(&(out_len as u32).to_le_bytes());
    prefixed.extend_from_slice(input);

    if out_len <= 64 {
        let mut digest = hash_var(&prefixed, out_len);
        prefixed.zeroize();
        let result = digest[..out_len].to_vec();
        digest.zeroize();
        return result;
    }

    let mut out = Vec::with_capacity(out_len);

    // V1 = BLAKE2b-64(LE32(out_len) || input); only its first 32 bytes feed
    // the output. Each subsequent Vi is the full BLAKE2b-64 of the previous
    // Vi and likewise contributes 32 bytes, except the last, which is
    // computed with digest length equal to whatever output remains (<=64)
    // and contributes all of it rather than being truncated to 32.
    let mut v = hash_64(&prefixed);
    prefixed.zeroize();
    out.extend_from_slice(&v[..32]);
    let mut remaining = out_len - 32;

    while remaining > 64 {
        v = hash_64(&v);
        out.extend_from_slice(&v[..32]);
        remaining -= 32;
    }

    let mut last = hash_var(&v, remaining);
    v.zeroize();
    out.extend_from_slice(&last[..remaining]);
    last.zeroize();

    debug_assert_eq!(out.len(), out_len);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_output_matches_single_blake2b_call() {
        let out = hash_prime(b"argon2-hprime-test", 24);
        assert_eq!(out.len(), 24);
    }

    #[test]
    fn boundary_64_uses_single_call_path() {
        let a = hash_prime(b"boundary", 64);
        let b = hash_prime(b"boundary", 64);
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn boundary_65_enters_chained_mode() {
        let out = hash_prime(b"boundary", 65);
        assert_eq!(out.len(), 65);
    }

    #[test]
    fn maximum_length_output() {
        let out = hash_prime(b"max", MAX_OUTPUT_LEN);
        assert_eq!(out.len(), MAX_OUTPUT_LEN);
    }

    #[test]
    fn different_lengths_are_not_prefixes_of_each_other() {
        // out_len is mixed into the preimage, so H'(x, 32) is not a prefix
        // of H'(x, 64).
        let short = hash_prime(b"same-input", 32);
        let long = hash_prime(b"same-input", 64);
        assert_ne!(&short[..], &long[..32]);
    }

    #[test]
    fn deterministic() {
        let a = hash_prime(b"deterministic-check", 128);
        let b = hash_prime(b"deterministic-check", 128);
        assert_eq!(a, b);
    }
}
