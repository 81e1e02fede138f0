//! Parameter record and validation for Argon2id.

use zeroize::Zeroize;

use super::error::Argon2Error;

/// Minimum accepted salt length in bytes.
pub const MIN_SALT_LEN: usize = 8;
/// Maximum accepted salt length in bytes. RFC 9106 only requires the
/// length to be representable in a `u32` length prefix; this crate
/// additionally caps it at a sane 64 bytes as most callers do.
pub const MAX_SALT_LEN: usize = 64;

/// Maximum accepted password length in bytes.
pub const MAX_PASSWORD_LEN: usize = u32::MAX as usize;
/// Maximum accepted secret ("pepper") length in bytes.
pub const MAX_SECRET_LEN: usize = 64;
/// Maximum accepted associated-data length in bytes.
pub const MAX_ASSOCIATED_DATA_LEN: usize = u32::MAX as usize;

/// Minimum output tag length in bytes.
pub const MIN_TAG_LEN: usize = 4;
/// Maximum output tag length in bytes, inherited from H'.
pub const MAX_TAG_LEN: usize = crate::blake2b::MAX_OUTPUT_LEN;

/// Number of slices per pass, fixed by the algorithm.
pub(crate) const SYNC_POINTS: u32 = 4;

/// Configuration parameters for Argon2id.
///
/// Memory cost, iterations, parallelism, an optional secret key, and
/// optional associated data. Salt and password are passed separately to
/// [`crate::argon2id`] / [`crate::argon2id_into`] rather than stored here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Argon2Params {
    /// Memory cost in KiB, before the `m'` rounding RFC 9106 requires.
    pub mem_kib: u32,
    /// Number of passes over memory (`t`, minimum 1).
    pub time_cost: u32,
    /// Degree of parallelism, i.e. number of lanes (`p`, `1..=255`).
    pub parallelism: u32,
    /// Requested output tag length in bytes (`4..=4096`).
    pub tag_len: usize,
    /// Optional secret key ("pepper") mixed into H₀.
    pub secret: Option<Vec<u8>>,
    /// Optional associated data mixed into H₀.
    pub associated_data: Option<Vec<u8>>,
}

impl Default for Argon2Params {
    /// OWASP-recommended baseline: 19 MiB, 2 passes, 1 lane, 32-byte tag.
    fn default() -> Self {
        Self {
            mem_kib: 19 * 1024,
            time_cost: 2,
            parallelism: 1,
            tag_len: 32,
            secret: None,
            associated_data: None,
        }
    }
}

impl Drop for Argon2Params {
    fn drop(&mut self) {
        if let Some(secret) = self.secret.as_mut() {
            secret.zeroize();
        }
    }
}

impl Argon2Params {
    /// Validates every field against RFC 9106's bounds, independent of
    /// salt (validated separately, since it is not stored here).
    ///
    /// Returns the rounded memory cost `m'` on success, as computing it is
    /// a side effect of validating `mem_kib` against the `8 * p` floor.
    pub(crate) fn validate(&self) -> Result<u32, Argon2Error> {
        if self.parallelism == 0 || self.parallelism > 255 {
            return Err(Argon2Error::InvalidParallelism {
                lanes: self.parallelism,
            });
        }

        if self.time_cost < 1 {
            return Err(Argon2Error::TooFewIterations);
        }

        if !(MIN_TAG_LEN..=MAX_TAG_LEN).contains(&self.tag_len) {
            return Err(Argon2Error::InvalidTagLength {
                requested: self.tag_len,
            });
        }

        if let Some(secret) = &self.secret {
            if secret.len() > MAX_SECRET_LEN {
                return Err(Argon2Error::SecretTooLong { len: secret.len() });
            }
        }

        if let Some(ad) = &self.associated_data {
            if ad.len() > MAX_ASSOCIATED_DATA_LEN {
                return Err(Argon2Error::AssociatedDataTooLong { len: ad.len() });
            }
        }

        let floor = 8 * self.parallelism;
        if self.mem_kib < floor {
            return Err(Argon2Error::MemoryCostTooSmall {
                mem_kib: self.mem_kib,
                floor,
            });
        }

        // m' = largest multiple of 4p not exceeding mem_kib, floored at 8p.
        let granularity = SYNC_POINTS * self.parallelism;
        let m_prime = (self.mem_kib / granularity) * granularity;

        Ok(m_prime)
    }
}

/// Builder for [`Argon2Params`], for constructing parameters field by
/// field instead of naming every field of the struct literal at once.
#[derive(Clone, Debug, Default)]
pub struct ParamsBuilder {
    params: Argon2Params,
}

impl ParamsBuilder {
    /// Starts from [`Argon2Params::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the memory cost in KiB.
    pub fn mem_kib(mut self, mem_kib: u32) -> Self {
        self.params.mem_kib = mem_kib;
        self
    }

    /// Sets the number of passes over memory.
    pub fn time_cost(mut self, time_cost: u32) -> Self {
        self.params.time_cost = time_cost;
        self
    }

    /// Sets the degree of parallelism (number of lanes).
    pub fn parallelism(mut self, parallelism: u32) -> Self {
        self.params.parallelism = parallelism;
        self
    }

    /// Sets the requested output tag length in bytes.
    pub fn tag_len(mut self, tag_len: usize) -> Self {
        self.params.tag_len = tag_len;
        self
    }

    /// Sets the optional secret key ("pepper").
    pub fn secret(mut self, secret: impl Into<Vec<u8>>) -> Self {
        self.params.secret = Some(secret.into());
        self
    }

    /// Sets the optional associated data.
    pub fn associated_data(mut self, associated_data: impl Into<Vec<u8>>) -> Self {
        self.params.associated_data = Some(associated_data.into());
        self
    }

    /// Finishes the builder, yielding the constructed parameters.
    ///
    /// Validation happens when the parameters are actually used (in
    /// [`crate::argon2id`]/[`crate::argon2id_into`]), not here, so a
    /// builder can be freely constructed and mutated before it is ever
    /// checked against a salt.
    pub fn build(self) -> Argon2Params {
        self.params
    }
}
