//! Memory layout and the Fill phase (RFC 9106 §3.4).
//!
//! Memory is an `m' / p * p` matrix of blocks: `p` lanes, each `lane_len`
//! blocks long, each lane split into 4 equal-length slices. A pass fills
//! all four slices in order; within a slice, lanes may be filled in any
//! order (or concurrently — see the `parallel` feature below) because a
//! lane only ever reads blocks that finished in a strictly earlier slice
//! of another lane, or earlier columns of its own — never a block another
//! lane is concurrently writing in the same slice.

use super::block::Block;
use super::error::Argon2Error;
use super::params::{Argon2Params, SYNC_POINTS};
use super::reference::compute_reference_position;

/// Derived dimensions of the memory matrix for one invocation.
#[derive(Clone, Copy, Debug)]
pub(crate) struct MemoryLayout {
    pub(crate) lanes: u32,
    pub(crate) lane_len: u32,
    pub(crate) segment_len: u32,
    pub(crate) total_blocks: u32,
}

impl MemoryLayout {
    /// Builds the layout from the already-rounded memory cost `m_prime`
    /// (see [`Argon2Params::validate`]).
    pub(crate) fn new(params: &Argon2Params, m_prime: u32) -> Self {
        let lanes = params.parallelism;
        let lane_len = m_prime / lanes;
        let segment_len = lane_len / SYNC_POINTS;

        Self {
            lanes,
            lane_len,
            segment_len,
            total_blocks: m_prime,
        }
    }

    #[inline]
    pub(crate) fn index(&self, lane: u32, index_in_lane: u32) -> usize {
        (lane * self.lane_len + index_in_lane) as usize
    }
}

/// The memory matrix: `total_blocks` blocks, owned and zeroized as a unit.
///
/// Allocation goes through `try_reserve_exact` rather than a plain `Vec`
/// push/resize, so a memory cost too large for the host surfaces as
/// [`Argon2Error::AllocationFailure`] instead of aborting the process.
pub(crate) struct Memory {
    blocks: Vec<Block>,
    pub(crate) layout: MemoryLayout,
}

impl Memory {
    pub(crate) fn allocate(layout: MemoryLayout) -> Result<Self, Argon2Error> {
        let mut blocks = Vec::new();
        blocks
            .try_reserve_exact(layout.total_blocks as usize)
            .map_err(|_| Argon2Error::AllocationFailure)?;
        blocks.resize(layout.total_blocks as usize, Block::ZERO);

        Ok(Self { blocks, layout })
    }

    #[inline]
    pub(crate) fn get(&self, lane: u32, index_in_lane: u32) -> &Block {
        &self.blocks[self.layout.index(lane, index_in_lane)]
    }

    /// Writes one of the two seed blocks of a lane.
    pub(crate) fn set_initial(&mut self, lane: u32, column: u32, block: Block) {
        let idx = self.layout.index(lane, column);
        self.blocks[idx] = block;
    }

    /// Runs `time_cost` passes of the Fill phase over the whole matrix.
    pub(crate) fn fill(&mut self, time_cost: u32) {
        for pass in 0..time_cost {
            for slice in 0..SYNC_POINTS {
                self.fill_slice(pass, slice, time_cost);
            }
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn fill_slice(&mut self, pass: u32, slice: u32, time_cost: u32) {
        let layout = self.layout;
        for lane in 0..layout.lanes {
            fill_segment(&mut self.blocks, &layout, pass, slice, lane, time_cost);
        }
    }

    /// Every lane's segment in this slice only ever reads blocks outside
    /// its own segment from slices that completed strictly earlier in the
    /// current pass (or, on `pass > 0`, from the previous pass entirely) —
    /// never from another lane's *current* segment. So dispatching the
    /// `lanes` segments of a slice across a rayon thread pool is sound:
    /// each task writes only the `segment_len` blocks of its own lane and
    /// reads only blocks no concurrently running task can be writing.
    ///
    /// Soundness rests on a raw pointer to the matrix being shared across
    /// threads while each thread is handed disjoint write ranges by
    /// construction (one lane per task, `lanes` tasks per slice).
    #[cfg(feature = "parallel")]
    fn fill_slice(&mut self, pass: u32, slice: u32, time_cost: u32) {
        use rayon::prelude::*;

        let layout = self.layout;
        let ptr = SendPtr(self.blocks.as_mut_ptr());
        let len = self.blocks.len();

        (0..layout.lanes).into_par_iter().for_each(|lane| {
            // SAFETY: `ptr` points into a live allocation of `len` blocks
            // that outlives this closure (borrowed via `self.blocks`
            // above). Each `lane` value in `0..layout.lanes` is produced
            // exactly once across this `for_each`, and `fill_segment`
            // only ever writes within `[lane * lane_len, (lane + 1) *
            // lane_len)`, a range disjoint between distinct lanes — so no
            // two concurrent closure invocations write the same block.
            let blocks = unsafe { core::slice::from_raw_parts_mut(ptr.0, len) };
            fill_segment(blocks, &layout, pass, slice, lane, time_cost);
        });
    }
}

#[cfg(feature = "parallel")]
struct SendPtr(*mut Block);
#[cfg(feature = "parallel")]
unsafe impl Send for SendPtr {}
#[cfg(feature = "parallel")]
unsafe impl Sync for SendPtr {}

/// Fills one segment: the `segment_len`-block portion of `lane` that
/// belongs to slice `slice` of pass `pass`.
///
/// `blocks` is the whole memory matrix (all lanes). Only indices in
/// `[lane * layout.lane_len, (lane + 1) * layout.lane_len)` are ever
/// written; every other lane's blocks are read-only from here.
fn fill_segment(
    blocks: &mut [Block],
    layout: &MemoryLayout,
    pass: u32,
    slice: u32,
    lane: u32,
    time_cost: u32,
) {
    // Argon2id: data-independent addressing (Argon2i) for the first two
    // slices of the first pass, data-dependent (Argon2d) everywhere else.
    let data_independent = pass == 0 && slice < 2;

    let mut addr_block = Block::ZERO;
    let mut address_counter = 0u32;

    if data_independent {
        address_counter += 1;
        addr_block = Block::generate_address_block(
            pass,
            lane,
            slice,
            layout.total_blocks,
            time_cost,
            address_counter,
        );
    }

    let start_i = if pass == 0 && slice == 0 { 2 } else { 0 };

    for i in start_i..layout.segment_len {
        let index_in_lane = slice * layout.segment_len + i;

        let prev_idx = if index_in_lane == 0 {
            layout.lane_len - 1
        } else {
            index_in_lane - 1
        };

        let (j1, j2) = if data_independent {
            if i != 0 && i % 128 == 0 {
                address_counter += 1;
                addr_block = Block::generate_address_block(
                    pass,
                    lane,
                    slice,
                    layout.total_blocks,
                    time_cost,
                    address_counter,
                );
            }
            let word = addr_block.0[(i % 128) as usize];
            (word as u32, (word >> 32) as u32)
        } else {
            let word = blocks[layout.index(lane, prev_idx)].0[0];
            (word as u32, (word >> 32) as u32)
        };

        let (ref_lane, ref_index) =
            compute_reference_position(pass, slice, lane, i, layout, j1, j2);

        let cur = layout.index(lane, index_in_lane);
        let prev = layout.index(lane, prev_idx);
        let reference = layout.index(ref_lane, ref_index);

        let compressed = Block::compress(&blocks[prev], &blocks[reference]);

        if pass == 0 {
            blocks[cur] = compressed;
        } else {
            blocks[cur].xor_assign(&compressed);
        }
    }
}
