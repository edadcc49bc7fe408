//! Generating new keys.
//!
//! Keys are generated by [`generate`] which picks the kind of key material
//! from the requested algorithm:
//!
//! - RSA algorithms get an RSA key pair with a modulus of the requested
//!   size and the public exponent F4,
//! - DSA algorithms get a DSA key pair for freshly generated domain
//!   parameters with a prime of the requested size, and
//! - HMAC algorithms get a secret of the requested size read from the
//!   operating system's random number generator.
//!
//! A key is only ever returned complete. If any step fails, everything
//! generated so far is released and an error is returned instead.

use std::vec::Vec;

use openssl::bn::BigNum;
use openssl::dsa::Dsa;
use openssl::pkey::Private;
use openssl::rsa::Rsa;
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::debug;

use crate::base::iana::{KeyFamily, SigningAlgorithm};

use super::config::GenerateConfig;
use super::error::Error;
use super::key::{HmacSecret, Key, KeyMaterial};

//------------ generate ------------------------------------------------------

/// Generates a new key for the given algorithm.
///
/// The `size` is given in bits. It is the size of the modulus for RSA, the
/// size of the prime for DSA, and the size of the secret for HMAC where it
/// is rounded up to full octets.
///
/// The returned key has its algorithm set to `algorithm` and holds matching
/// key material. If the algorithm can be published in DNSKEY records, the
/// key also has the Zone Key flag set. All other metadata is zero.
///
/// # Errors
///
/// Returns [`Error::UnsupportedAlgorithm`] if no kind of key material is
/// defined for `algorithm` and [`Error::GenerationFailure`] if the
/// cryptographic backend failed or `size` is zero. If storage for an HMAC
/// secret cannot be allocated, [`Error::Allocation`] is returned.
pub fn generate<'a>(
    algorithm: SigningAlgorithm,
    size: u32,
) -> Result<Key<'a>, Error> {
    generate_with_config(algorithm, size, &GenerateConfig::default())
}

/// Generates a new key using the given configuration.
///
/// This is the same as [`generate`] but allows tuning the generation via
/// `config`.
pub fn generate_with_config<'a>(
    algorithm: SigningAlgorithm,
    size: u32,
    config: &GenerateConfig,
) -> Result<Key<'a>, Error> {
    debug!(%algorithm, size, "generating key");

    let Some(family) = algorithm.family() else {
        debug!(%algorithm, "no key material defined for algorithm");
        return Err(Error::UnsupportedAlgorithm);
    };

    let material = match generate_material(family, size, config) {
        Ok(material) => material,
        Err(err) => {
            debug!(%algorithm, %family, size, %err, "key generation failed");
            return Err(err);
        }
    };

    let mut key = Key::from_material(algorithm, material)?;
    if algorithm.is_public_key() {
        key.set_flags(Key::ZONE_KEY);
    }
    debug!(%algorithm, %family, size, "generated key");
    Ok(key)
}

/// Generates key material of the given family.
///
/// See [`generate`] for the meaning of `size`.
pub fn generate_material(
    family: KeyFamily,
    size: u32,
    config: &GenerateConfig,
) -> Result<KeyMaterial, Error> {
    if size == 0 {
        return Err(Error::GenerationFailure);
    }
    match family {
        KeyFamily::Rsa => generate_rsa(size, config).map(KeyMaterial::Rsa),
        KeyFamily::Dsa => generate_dsa(size).map(KeyMaterial::Dsa),
        KeyFamily::Hmac => generate_hmac(size).map(KeyMaterial::Hmac),
    }
}

fn generate_rsa(
    bits: u32,
    config: &GenerateConfig,
) -> Result<Rsa<Private>, Error> {
    if !config.is_valid_rsa_exponent() {
        return Err(Error::GenerationFailure);
    }
    let exponent = BigNum::from_u32(config.rsa_exponent)?;
    Ok(Rsa::generate_with_e(bits, &exponent)?)
}

fn generate_dsa(bits: u32) -> Result<Dsa<Private>, Error> {
    let params = Dsa::generate_params(bits)?;
    Ok(params.generate_key()?)
}

fn generate_hmac(bits: u32) -> Result<HmacSecret, Error> {
    let len = usize::try_from((u64::from(bits) + 7) / 8)
        .map_err(|_| Error::Allocation)?;
    let mut octets = Vec::new();
    octets.try_reserve_exact(len)?;
    octets.resize(len, 0);

    // Wrap right away so a partially filled buffer is zeroed on failure.
    let mut secret = HmacSecret::new(octets);
    OsRng.try_fill_bytes(secret.as_mut_slice())?;
    Ok(secret)
}

//============ Testing =======================================================
