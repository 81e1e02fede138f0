//! Failure kinds for Argon2id.
//!
//! None of these variants, nor their `Display` output, ever carries
//! password, salt, secret, or derived-block bytes — only the shape of the
//! violated constraint.

use core::fmt;

/// Why an Argon2id invocation failed.
///
/// On any of these, the caller's output buffer is left all-zero and no
/// partially computed state is observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Argon2Error {
    /// Salt shorter than the 8-byte minimum.
    SaltTooShort { len: usize },
    /// Salt longer than this crate accepts.
    SaltTooLong { len: usize },
    /// Password longer than this crate accepts.
    PasswordTooLong { len: usize },
    /// Secret key longer than this crate accepts.
    SecretTooLong { len: usize },
    /// Associated data longer than this crate accepts.
    AssociatedDataTooLong { len: usize },
    /// Requested tag length outside `4..=4096`.
    InvalidTagLength { requested: usize },
    /// Caller-provided output buffer shorter than the configured tag
    /// length.
    OutputBufferTooShort { have: usize, need: usize },
    /// Memory cost below the `8 * lanes` floor.
    MemoryCostTooSmall { mem_kib: u32, floor: u32 },
    /// Iteration count below the required minimum of 1.
    TooFewIterations,
    /// Parallelism outside `1..=255`.
    InvalidParallelism { lanes: u32 },
    /// The memory matrix (`m' * 1024` bytes) could not be allocated.
    AllocationFailure,
}

impl fmt::Display for Argon2Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SaltTooShort { len } => {
                write!(f, "salt is {len} bytes, minimum is {}", super::params::MIN_SALT_LEN)
            }
            Self::SaltTooLong { len } => {
                write!(f, "salt is {len} bytes, maximum is {}", super::params::MAX_SALT_LEN)
            }
            Self::PasswordTooLong { len } => {
                write!(f, "password is {len} bytes, maximum is {}", super::params::MAX_PASSWORD_LEN)
            }
            Self::SecretTooLong { len } => {
                write!(f, "secret key is {len} bytes, maximum is {}", super::params::MAX_SECRET_LEN)
            }
            Self::AssociatedDataTooLong { len } => {
                write!(
                    f,
                    "associated data is {len} bytes, maximum is {}",
                    super::params::MAX_ASSOCIATED_DATA_LEN
                )
            }
            Self::InvalidTagLength { requested } => write!(
                f,
                "tag length {requested} is outside the supported range 4..=4096"
            ),
            Self::OutputBufferTooShort { have, need } => {
                write!(f, "output buffer has {have} bytes, need {need}")
            }
            Self::MemoryCostTooSmall { mem_kib, floor } => write!(
                f,
                "memory cost {mem_kib} KiB is below the required floor of {floor} KiB"
            ),
            Self::TooFewIterations => write!(f, "iteration count must be at least 1"),
            Self::InvalidParallelism { lanes } => {
                write!(f, "parallelism {lanes} is outside the supported range 1..=255")
            }
            Self::AllocationFailure => {
                write!(f, "failed to allocate the Argon2id memory matrix")
            }
        }
    }
}

impl core::error::Error for Argon2Error {}
