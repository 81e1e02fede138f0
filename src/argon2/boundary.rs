//! H0 initialization and tag finalization (RFC 9106 §3.2, §3.4).

use zeroize::Zeroize;

use super::block::Block;
use super::params::Argon2Params;
use crate::blake2b::{hash_64, hash_prime};

/// Argon2 version byte encoded in H0, fixed at 0x13 (RFC 9106).
const ARGON2_VERSION: u32 = 0x13;
/// Argon2 type byte encoded in H0: 2 selects Argon2id.
const ARGON2ID_TYPE: u32 = 2;

/// Computes H0, the 64-byte seed all per-lane initial blocks are derived
/// from:
///
/// ```text
/// H0 = BLAKE2b-64(p || T || m || t || v || y
///                 || |P| || P || |S| || S || |K| || K || |X| || X)
/// ```
///
/// `m` here is the caller's original `mem_kib`, *not* the `m'` the Fill
/// phase actually lays memory out with: RFC 9106 §3.2 folds the
/// uncorrected memory cost into H0 and only derives `m' = 4p*floor(m/4p)`
/// afterward for the matrix dimensions. Feeding `m'` into H0 instead would
/// diverge from the reference implementation whenever `m` isn't already a
/// multiple of `4p`.
///
/// The preimage buffer holds the password and secret in full, so it is
/// zeroized before returning.
pub(crate) fn compute_h0(password: &[u8], salt: &[u8], params: &Argon2Params) -> [u8; 64] {
    let mut buf = Vec::with_capacity(
        6 * 4
            + 4
            + password.len()
            + 4
            + salt.len()
            + 4
            + params.secret.as_ref().map_or(0, Vec::len)
            + 4
            + params.associated_data.as_ref().map_or(0, Vec::len),
    );

    buf.extend_from_slice(&params.parallelism.to_le_bytes());
    buf.extend_from_slice(&(params.tag_len as u32).to_le_bytes());
    buf.extend_from_slice(&params.mem_kib.to_le_bytes());
    buf.extend_from_slice(&params.time_cost.to_le_bytes());
    buf.extend_from_slice(&ARGON2_VERSION.to_le_bytes());
    buf.extend_from_slice(&ARGON2ID_TYPE.to_le_bytes());

    buf.extend_from_slice(&(password.len() as u32).to_le_bytes());
    buf.extend_from_slice(password);

    buf.extend_from_slice(&(salt.len() as u32).to_le_bytes());
    buf.extend_from_slice(salt);

    match &params.secret {
        Some(secret) => {
            buf.extend_from_slice(&(secret.len() as u32).to_le_bytes());
            buf.extend_from_slice(secret);
        }
        None => buf.extend_from_slice(&0u32.to_le_bytes()),
    }

    match &params.associated_data {
        Some(ad) => {
            buf.extend_from_slice(&(ad.len() as u32).to_le_bytes());
            buf.extend_from_slice(ad);
        }
        None => buf.extend_from_slice(&0u32.to_le_bytes()),
    }

    let h0 = hash_64(&buf);
    buf.zeroize();
    h0
}

/// Builds the seed for lane `lane`'s initial block `column` (0 or 1):
/// `H'(H0 || LE32(column) || LE32(lane), 1024)`, reshaped into a [`Block`].
pub(crate) fn initial_block(h0: &[u8; 64], lane: u32, column: u32) -> Block {
    let mut seed = Vec::with_capacity(64 + 8);
    seed.extend_from_slice(h0);
    seed.extend_from_slice(&column.to_le_bytes());
    seed.extend_from_slice(&lane.to_le_bytes());

    let mut bytes = hash_prime(&seed, 1024);
    seed.zeroize();
    let block = Block::from_bytes(&bytes);
    bytes.zeroize();
    block
}

/// Finalizes the computation: XORs the last block of every lane into one
/// block, then expands it to `tag_len` bytes via H'.
pub(crate) fn finalize(get_last_block: impl Fn(u32) -> Block, lanes: u32, tag_len: usize) -> Vec<u8> {
    let mut acc = Block::ZERO;
    for lane in 0..lanes {
        acc.xor_assign(&get_last_block(lane));
    }

    let mut bytes = acc.to_bytes();
    let tag = hash_prime(&bytes, tag_len);
    bytes.zeroize();
    tag
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> Argon2Params {
        Argon2Params {
            mem_kib: 64,
            time_cost: 2,
            parallelism: 1,
            tag_len: 32,
            secret: None,
            associated_data: None,
        }
    }

    #[test]
    fn h0_is_deterministic() {
        let params = params();
        let a = compute_h0(b"password", b"saltsaltsalt1234", &params);
        let b = compute_h0(b"password", b"saltsaltsalt1234", &params);
        assert_eq!(a, b);
    }

    #[test]
    fn h0_changes_with_salt() {
        let params = params();
        let a = compute_h0(b"password", b"saltsaltsalt1234", &params);
        let b = compute_h0(b"password", b"different-salt12", &params);
        assert_ne!(a, b);
    }

    #[test]
    fn h0_changes_with_secret() {
        let mut params = params();
        let a = compute_h0(b"password", b"saltsaltsalt1234", &params);
        params.secret = Some(b"pepper".to_vec());
        let b = compute_h0(b"password", b"saltsaltsalt1234", &params);
        assert_ne!(a, b);
    }

    /// `m` fed into H0 must be the caller's original `mem_kib`, not the
    /// `m'` rounded down to a multiple of `4p` — these two params differ
    /// in `mem_kib` but round to the same `m'` (33 and 32 both floor to 32
    /// at `p=1`), so unless H0 reads `mem_kib` directly the digests would
    /// collide.
    #[test]
    fn h0_encodes_unrounded_mem_cost() {
        let mut a = params();
        a.mem_kib = 33;
        let mut b = params();
        b.mem_kib = 32;
        assert_ne!(
            compute_h0(b"password", b"saltsaltsalt1234", &a),
            compute_h0(b"password", b"saltsaltsalt1234", &b)
        );
    }

    #[test]
    fn initial_blocks_differ_by_lane_and_column() {
        let h0 = [7u8; 64];
        let b00 = initial_block(&h0, 0, 0);
        let b01 = initial_block(&h0, 0, 1);
        let b10 = initial_block(&h0, 1, 0);
        assert_ne!(b00.0, b01.0);
        assert_ne!(b00.0, b10.0);
    }

    #[test]
    fn finalize_xors_all_lanes() {
        let lanes = 3;
        let tag = finalize(
            |lane| {
                let mut b = Block::ZERO;
                b.0[0] = (lane + 1) as u64;
                b
            },
            lanes,
            32,
        );
        assert_eq!(tag.len(), 32);
    }

    #[test]
    fn finalize_respects_requested_tag_len() {
        for &len in &[4usize, 32, 64, 65, 128, 4096] {
            let tag = finalize(|_| Block::ZERO, 1, len);
            assert_eq!(tag.len(), len);
        }
    }
}
