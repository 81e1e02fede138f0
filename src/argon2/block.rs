//! The 1024-byte Argon2 block and the compression function G
//! (RFC 9106 §3.5).

use zeroize::Zeroize;

/// Number of 64-bit words in one Argon2 block.
pub(crate) const WORDS_PER_BLOCK: usize = 128;
/// Size in bytes of one Argon2 block.
pub(crate) const BLOCK_BYTES: usize = WORDS_PER_BLOCK * 8;

/// A 1024-byte Argon2 memory block: 128 little-endian 64-bit words.
///
/// `Block` zeroizes its contents on drop — every block that ever holds
/// password-derived material (the whole memory matrix, plus the scratch
/// blocks used while filling it) is wiped the moment it goes out of scope,
/// rather than relying on call sites to remember.
#[derive(Clone)]
pub(crate) struct Block(pub(crate) [u64; WORDS_PER_BLOCK]);

impl Block {
    pub(crate) const ZERO: Self = Self([0u64; WORDS_PER_BLOCK]);

    /// Interprets a 1024-byte buffer as 128 little-endian u64 words.
    pub(crate) fn from_bytes(bytes: &[u8]) -> Self {
        debug_assert_eq!(bytes.len(), BLOCK_BYTES);
        let mut words = [0u64; WORDS_PER_BLOCK];
        for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(8)) {
            *word = u64::from_le_bytes(chunk.try_into().unwrap());
        }
        Self(words)
    }

    /// Serializes the block as 1024 little-endian bytes.
    pub(crate) fn to_bytes(&self) -> [u8; BLOCK_BYTES] {
        let mut out = [0u8; BLOCK_BYTES];
        for (word, chunk) in self.0.iter().zip(out.chunks_exact_mut(8)) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        out
    }

    /// In-place word-wise XOR: `self ^= other`.
    pub(crate) fn xor_assign(&mut self, other: &Block) {
        for (a, b) in self.0.iter_mut().zip(other.0.iter()) {
            *a ^= b;
        }
    }

    /// Builds one Argon2i address block for data-independent indexing.
    ///
    /// The input block packs the current position (`pass`, `lane`,
    /// `slice`, total block count, iteration count, a fixed `2` marking
    /// Argon2id's type, and a running `counter`) into its first seven
    /// words; the address block itself is `G(0, G(0, input))`, per RFC
    /// 9106 §3.3.
    pub(crate) fn generate_address_block(
        pass: u32,
        lane: u32,
        slice: u32,
        total_blocks: u32,
        time_cost: u32,
        counter: u32,
    ) -> Self {
        let mut input = Block::ZERO;
        input.0[0] = pass as u64;
        input.0[1] = lane as u64;
        input.0[2] = slice as u64;
        input.0[3] = total_blocks as u64;
        input.0[4] = time_cost as u64;
        input.0[5] = 2; // Argon2id
        input.0[6] = counter as u64;

        let zero_xored = Block::compress(&Block::ZERO, &input);
        Block::compress(&Block::ZERO, &zero_xored)
    }

    /// The compression function G.
    ///
    /// `G(X, Y) = P(X ⊕ Y) ⊕ X ⊕ Y`, where `P` applies the BLAKE2b-derived
    /// permutation to the 8 rows of the XORed block, then to its 8
    /// "columns" (the transposed view below).
    pub(crate) fn compress(x: &Block, y: &Block) -> Block {
        let mut r = Block::ZERO;
        for i in 0..WORDS_PER_BLOCK {
            r.0[i] = x.0[i] ^ y.0[i];
        }

        let mut z = r.clone();

        for row in 0..8 {
            let base = row * 16;
            let mut v: [u64; 16] = z.0[base..base + 16].try_into().unwrap();
            permute(&mut v);
            z.0[base..base + 16].copy_from_slice(&v);
        }

        for col in 0..8 {
            let idx = column_indices(col);
            let mut v = idx.map(|i| z.0[i]);
            permute(&mut v);
            for (slot, value) in idx.iter().zip(v.iter()) {
                z.0[*slot] = *value;
            }
        }

        for i in 0..WORDS_PER_BLOCK {
            z.0[i] ^= r.0[i];
        }

        z
    }
}

impl Zeroize for Block {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Drop for Block {
    fn drop(&mut self) {
        self.zeroize();
    }
}

/// The eight word indices making up "column" `col` of the 8x16 matrix, as
/// used by G's second permutation pass: two adjacent words from each of
/// the eight rows.
#[inline(always)]
fn column_indices(col: usize) -> [usize; 16] {
    let mut idx = [0usize; 16];
    for row in 0..8 {
        idx[2 * row] = 16 * row + 2 * col;
        idx[2 * row + 1] = 16 * row + 2 * col + 1;
    }
    idx
}

/// BLAKE2b-derived permutation `P` over sixteen 64-bit words: four
/// column quarter-rounds, then four diagonal quarter-rounds, each
/// applying `GB`.
#[inline(always)]
fn permute(v: &mut [u64; 16]) {
    gb_round(v, 0, 4, 8, 12);
    gb_round(v, 1, 5, 9, 13);
    gb_round(v, 2, 6, 10, 14);
    gb_round(v, 3, 7, 11, 15);

    gb_round(v, 0, 5, 10, 15);
    gb_round(v, 1, 6, 11, 12);
    gb_round(v, 2, 7, 8, 13);
    gb_round(v, 3, 4, 9, 14);
}

#[inline(always)]
fn gb_round(v: &mut [u64; 16], a: usize, b: usize, c: usize, d: usize) {
    let (va, vb, vc, vd) = gb(v[a], v[b], v[c], v[d]);
    v[a] = va;
    v[b] = vb;
    v[c] = vc;
    v[d] = vd;
}

/// `GB`, Argon2's variant of BLAKE2b's mixing function G.
///
/// Differs from BLAKE2b's G by adding `2 * lo32(a) * lo32(b)` (resp.
/// `c`/`d`) alongside the plain addition, giving a nonlinear term that
/// BLAKE2b itself does not have. All arithmetic wraps modulo 2^64; the
/// product of two 32-bit truncations always fits in 64 bits, so doubling
/// it never overflows.
#[inline(always)]
fn gb(a: u64, b: u64, c: u64, d: u64) -> (u64, u64, u64, u64) {
    let a = a
        .wrapping_add(b)
        .wrapping_add(2u64.wrapping_mul(lo32(a)).wrapping_mul(lo32(b)));
    let d = (d ^ a).rotate_right(32);

    let c = c
        .wrapping_add(d)
        .wrapping_add(2u64.wrapping_mul(lo32(c)).wrapping_mul(lo32(d)));
    let b = (b ^ c).rotate_right(24);

    let a = a
        .wrapping_add(b)
        .wrapping_add(2u64.wrapping_mul(lo32(a)).wrapping_mul(lo32(b)));
    let d = (d ^ a).rotate_right(16);

    let c = c
        .wrapping_add(d)
        .wrapping_add(2u64.wrapping_mul(lo32(c)).wrapping_mul(lo32(d)));
    let b = (b ^ c).rotate_right(63);

    (a, b, c, d)
}

#[inline(always)]
fn lo32(x: u64) -> u64 {
    x & 0xFFFF_FFFF
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compress_of_zero_blocks_is_zero() {
        let result = Block::compress(&Block::ZERO, &Block::ZERO);
        assert!(result.0.iter().all(|&w| w == 0));
    }

    #[test]
    fn compress_is_deterministic() {
        let mut x = Block::ZERO;
        x.0[0] = 0x0123_4567_89AB_CDEF;
        let mut y = Block::ZERO;
        y.0[1] = 0xFEDC_BA98_7654_3210;

        let a = Block::compress(&x, &y);
        let b = Block::compress(&x, &y);
        assert_eq!(a.0, b.0);
    }

    #[test]
    fn compress_is_sensitive_to_each_input() {
        let mut x = Block::ZERO;
        x.0[5] = 7;
        let y = Block::ZERO;

        let mut x2 = Block::ZERO;
        x2.0[5] = 8;

        let a = Block::compress(&x, &y);
        let b = Block::compress(&x2, &y);
        assert_ne!(a.0, b.0);
    }

    #[test]
    fn round_trip_bytes() {
        let mut block = Block::ZERO;
        for (i, word) in block.0.iter_mut().enumerate() {
            *word = i as u64;
        }
        let bytes = block.to_bytes();
        let back = Block::from_bytes(&bytes);
        assert_eq!(block.0, back.0);
    }

    #[test]
    fn xor_assign_is_involutive_with_itself() {
        let mut a = Block::ZERO;
        a.0[3] = 42;
        let b = a.clone();
        a.xor_assign(&b);
        assert!(a.0.iter().all(|&w| w == 0));
    }

    #[test]
    fn address_block_changes_with_counter() {
        let a = Block::generate_address_block(0, 0, 0, 4096, 3, 1);
        let b = Block::generate_address_block(0, 0, 0, 4096, 3, 2);
        assert_ne!(a.0, b.0);
    }

    #[test]
    fn address_block_changes_with_lane() {
        let a = Block::generate_address_block(0, 0, 0, 4096, 3, 1);
        let b = Block::generate_address_block(0, 1, 0, 4096, 3, 1);
        assert_ne!(a.0, b.0);
    }

    #[test]
    fn column_indices_cover_every_word_once() {
        let mut seen = [false; WORDS_PER_BLOCK];
        for col in 0..8 {
            for idx in column_indices(col) {
                assert!(!seen[idx], "index {idx} visited twice");
                seen[idx] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }
}
