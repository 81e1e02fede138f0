//! Top-level orchestration and the public entry points.

use zeroize::Zeroize;

use super::boundary::{compute_h0, finalize, initial_block};
use super::error::Argon2Error;
use super::memory::{Memory, MemoryLayout};
use super::params::{Argon2Params, MAX_SALT_LEN, MIN_SALT_LEN};

/// Derives an Argon2id tag, returning it as a freshly allocated `Vec<u8>`.
///
/// `params.tag_len` bytes are produced. On any validation failure, no
/// memory is allocated and no password-derived state is ever computed.
pub fn argon2id(
    password: &[u8],
    salt: &[u8],
    params: &Argon2Params,
) -> Result<Vec<u8>, Argon2Error> {
    let mut out = vec![0u8; params.tag_len.clamp(1, super::params::MAX_TAG_LEN)];
    derive_into(password, salt, params, &mut out)?;
    Ok(out)
}

/// Derives an Argon2id tag directly into `out`, which must be at least
/// `params.tag_len` bytes long. Only the first `params.tag_len` bytes of
/// `out` are written.
///
/// On failure, `out` is left all-zero and unmodified data from before the
/// call is never exposed in its place.
pub fn argon2id_into(
    password: &[u8],
    salt: &[u8],
    params: &Argon2Params,
    out: &mut [u8],
) -> Result<(), Argon2Error> {
    if out.len() < params.tag_len {
        out.fill(0);
        return Err(Argon2Error::OutputBufferTooShort {
            have: out.len(),
            need: params.tag_len,
        });
    }

    if let Err(err) = derive_into(password, salt, params, &mut out[..params.tag_len]) {
        out.fill(0);
        return Err(err);
    }

    Ok(())
}

fn derive_into(
    password: &[u8],
    salt: &[u8],
    params: &Argon2Params,
    out: &mut [u8],
) -> Result<(), Argon2Error> {
    if password.len() > super::params::MAX_PASSWORD_LEN {
        return Err(Argon2Error::PasswordTooLong { len: password.len() });
    }
    if salt.len() < MIN_SALT_LEN {
        return Err(Argon2Error::SaltTooShort { len: salt.len() });
    }
    if salt.len() > MAX_SALT_LEN {
        return Err(Argon2Error::SaltTooLong { len: salt.len() });
    }

    let m_prime = params.validate()?;
    let layout = MemoryLayout::new(params, m_prime);

    // Allocate before touching the password/secret so an allocation
    // failure is reported with exactly as little secret processing done
    // as a parameter-validation failure.
    let mut memory = Memory::allocate(layout)?;

    let mut h0 = compute_h0(password, salt, params);
    for lane in 0..layout.lanes {
        memory.set_initial(lane, 0, initial_block(&h0, lane, 0));
        memory.set_initial(lane, 1, initial_block(&h0, lane, 1));
    }
    h0.zeroize();

    memory.fill(params.time_cost);

    let tag = finalize(
        |lane| memory.get(lane, layout.lane_len - 1).clone(),
        layout.lanes,
        out.len(),
    );
    out.copy_from_slice(&tag);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::argon2::ParamsBuilder;

    fn small_params() -> Argon2Params {
        ParamsBuilder::new()
            .mem_kib(64)
            .time_cost(2)
            .parallelism(2)
            .tag_len(32)
            .build()
    }

    #[test]
    fn deterministic_output() {
        let params = small_params();
        let a = argon2id(b"hunter2", b"saltsaltsalt1234", &params).unwrap();
        let b = argon2id(b"hunter2", b"saltsaltsalt1234", &params).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_salt_changes_output() {
        let params = small_params();
        let a = argon2id(b"hunter2", b"saltsaltsalt1234", &params).unwrap();
        let b = argon2id(b"hunter2", b"different-salt-1", &params).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn different_password_changes_output() {
        let params = small_params();
        let a = argon2id(b"hunter2", b"saltsaltsalt1234", &params).unwrap();
        let b = argon2id(b"hunter3", b"saltsaltsalt1234", &params).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn output_length_matches_tag_len() {
        for &len in &[4usize, 16, 32, 64, 65, 128] {
            let params = ParamsBuilder::new()
                .mem_kib(64)
                .time_cost(1)
                .parallelism(1)
                .tag_len(len)
                .build();
            let tag = argon2id(b"pw", b"saltsaltsalt1234", &params).unwrap();
            assert_eq!(tag.len(), len);
        }
    }

    #[test]
    fn rejects_short_salt() {
        let params = small_params();
        let err = argon2id(b"pw", b"short", &params).unwrap_err();
        assert_eq!(err, Argon2Error::SaltTooShort { len: 5 });
    }

    #[test]
    fn single_lane_single_pass_minimum_memory() {
        let params = ParamsBuilder::new()
            .mem_kib(8)
            .time_cost(1)
            .parallelism(1)
            .tag_len(32)
            .build();
        let tag = argon2id(b"pw", b"saltsaltsalt1234", &params).unwrap();
        assert_eq!(tag.len(), 32);
    }

    #[test]
    fn into_variant_matches_allocating_variant() {
        let params = small_params();
        let allocated = argon2id(b"hunter2", b"saltsaltsalt1234", &params).unwrap();

        let mut buf = vec![0u8; params.tag_len];
        argon2id_into(b"hunter2", b"saltsaltsalt1234", &params, &mut buf).unwrap();

        assert_eq!(allocated, buf);
    }

    #[test]
    fn into_variant_rejects_undersized_buffer() {
        let params = small_params();
        let mut buf = vec![0xFFu8; 10];
        let err = argon2id_into(b"pw", b"saltsaltsalt1234", &params, &mut buf).unwrap_err();
        assert_eq!(
            err,
            Argon2Error::OutputBufferTooShort { have: 10, need: 32 }
        );
        assert!(buf.iter().all(|&b| b == 0));
    }

    #[test]
    fn secret_and_associated_data_change_output() {
        let base = small_params();
        let with_secret = ParamsBuilder::new()
            .mem_kib(64)
            .time_cost(2)
            .parallelism(2)
            .tag_len(32)
            .secret(b"pepper".to_vec())
            .build();

        let a = argon2id(b"pw", b"saltsaltsalt1234", &base).unwrap();
        let b = argon2id(b"pw", b"saltsaltsalt1234", &with_secret).unwrap();
        assert_ne!(a, b);
    }
}
