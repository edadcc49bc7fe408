//! Turning keys into public key records.
//!
//! A key with an RSA or DSA key pair can be published in the DNS as a
//! DNSKEY record. Composing the record itself is the business of a record
//! encoder; this module only collects what such an encoder needs from a
//! key into a [`PublicKeyRecord`] and hands it to a [`RecordEncoder`].
//!
//! The public key is encoded as defined for the respective algorithm in
//! [RFC 3110] for RSA and [RFC 2536] for DSA.
//!
//! [RFC 3110]: https://www.rfc-editor.org/rfc/rfc3110
//! [RFC 2536]: https://www.rfc-editor.org/rfc/rfc2536

use std::vec::Vec;

use openssl::dsa::DsaRef;
use openssl::pkey::{HasParams, HasPublic};
use openssl::rsa::RsaRef;

use crate::base::iana::SigningAlgorithm;
use crate::base::name::Name;

use super::error::{ProjectError, ToRecordError};
use super::key::{Key, KeyMaterial};

//------------ PublicKeyRecord -----------------------------------------------

/// The inputs for composing a public key record.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PublicKeyRecord<'a> {
    /// The owner name of the record.
    pub owner: &'a Name<[u8]>,

    /// The TTL of the record.
    pub ttl: u32,

    /// The flags of the key.
    pub flags: u16,

    /// The protocol octet.
    ///
    /// This is always [`PublicKeyRecord::PROTOCOL`].
    pub protocol: u8,

    /// The algorithm of the key.
    pub algorithm: SigningAlgorithm,

    /// The key tag of the key.
    pub keytag: u16,

    /// The encoded public key.
    pub public_key: Vec<u8>,
}

impl PublicKeyRecord<'_> {
    /// The value of the protocol field of a DNSKEY record.
    ///
    /// See [RFC 4034, section 2.1.2].
    ///
    /// [RFC 4034, section 2.1.2]: https://datatracker.ietf.org/doc/html/rfc4034#section-2.1.2
    pub const PROTOCOL: u8 = 3;
}

//------------ RecordEncoder -------------------------------------------------

/// A type that composes public key records.
pub trait RecordEncoder {
    /// The record produced by the encoder.
    type Record;

    /// The error returned if encoding fails.
    type Error;

    /// Composes a record from the given inputs.
    fn encode(
        &self,
        inputs: &PublicKeyRecord<'_>,
    ) -> Result<Self::Record, Self::Error>;
}

impl<T: RecordEncoder + ?Sized> RecordEncoder for &T {
    type Record = T::Record;
    type Error = T::Error;

    fn encode(
        &self,
        inputs: &PublicKeyRecord<'_>,
    ) -> Result<Self::Record, Self::Error> {
        (**self).encode(inputs)
    }
}

//------------ Key -----------------------------------------------------------

impl<'a> Key<'a> {
    /// Returns the encoded public key.
    ///
    /// # Errors
    ///
    /// Fails with [`ProjectError::NotPublishable`] for HMAC keys,
    /// [`ProjectError::NoMaterial`] if the key has no material, and
    /// [`ProjectError::Encoding`] if the key cannot be encoded.
    pub fn public_key_bytes(&self) -> Result<Vec<u8>, ProjectError> {
        match self.material() {
            Some(KeyMaterial::Rsa(key)) => rsa_public_key(key),
            Some(KeyMaterial::Dsa(key)) => dsa_public_key(key),
            Some(KeyMaterial::Hmac(_)) => Err(ProjectError::NotPublishable),
            None => Err(ProjectError::NoMaterial),
        }
    }

    /// Collects the inputs for a public key record.
    ///
    /// Besides the errors of [`public_key_bytes`][Self::public_key_bytes],
    /// this fails with [`ProjectError::MissingOwner`] if the key has no
    /// owner and [`ProjectError::VariantMismatch`] if the algorithm is unset
    /// or doesn't match the key material.
    pub fn record_inputs(&self) -> Result<PublicKeyRecord<'a>, ProjectError> {
        let public_key = self.public_key_bytes()?;
        let algorithm = match self.algorithm() {
            Some(algorithm) if self.is_consistent() => algorithm,
            _ => return Err(ProjectError::VariantMismatch),
        };
        let owner = self.owner().ok_or(ProjectError::MissingOwner)?;
        Ok(PublicKeyRecord {
            owner,
            ttl: self.ttl(),
            flags: self.flags(),
            protocol: PublicKeyRecord::PROTOCOL,
            algorithm,
            keytag: self.keytag(),
            public_key,
        })
    }

    /// Converts the key into a public key record using `encoder`.
    pub fn to_record<E: RecordEncoder>(
        &self,
        encoder: E,
    ) -> Result<E::Record, ToRecordError<E::Error>> {
        let inputs = self.record_inputs()?;
        encoder.encode(&inputs).map_err(ToRecordError::Encoder)
    }
}

//------------ Public key encoding -------------------------------------------

/// Encodes an RSA public key as described in RFC 3110, section 2.
///
/// The exponent length is a single octet if it fits, otherwise a zero octet
/// followed by the length in two octets.
fn rsa_public_key<T: HasPublic>(
    key: &RsaRef<T>,
) -> Result<Vec<u8>, ProjectError> {
    let e = key.e().to_vec();
    let n = key.n().to_vec();
    let mut res = Vec::with_capacity(e.len() + n.len() + 3);
    match u8::try_from(e.len()) {
        Ok(len) if len > 0 => res.push(len),
        _ => {
            let len = u16::try_from(e.len())
                .map_err(|_| ProjectError::Encoding)?;
            res.push(0);
            res.extend_from_slice(&len.to_be_bytes());
        }
    }
    res.extend_from_slice(&e);
    res.extend_from_slice(&n);
    Ok(res)
}

/// Encodes a DSA public key as described in RFC 2536, section 2.
///
/// The key consists of the octet T followed by Q in 20 octets and P, G, and
/// Y in 64 + T * 8 octets each. T must not be greater than 8.
fn dsa_public_key<T: HasParams + HasPublic>(
    key: &DsaRef<T>,
) -> Result<Vec<u8>, ProjectError> {
    let p_len = usize::try_from(key.p().num_bytes())
        .map_err(|_| ProjectError::Encoding)?;
    let t = (p_len.saturating_sub(64) + 7) / 8;
    if t > 8 || key.q().num_bytes() > 20 {
        return Err(ProjectError::Encoding);
    }
    let width =
        i32::try_from(64 + t * 8).map_err(|_| ProjectError::Encoding)?;

    let padded = |num: &openssl::bn::BigNumRef, width: i32| {
        num.to_vec_padded(width).map_err(|_| ProjectError::Encoding)
    };
    let mut res = Vec::with_capacity(21 + 3 * (64 + t * 8));
    res.push(t as u8);
    res.extend_from_slice(&padded(key.q(), 20)?);
    res.extend_from_slice(&padded(key.p(), width)?);
    res.extend_from_slice(&padded(key.g(), width)?);
    res.extend_from_slice(&padded(key.pub_key(), width)?);
    Ok(res)
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::sign::generate::generate;
    use openssl::bn::BigNum;
    use openssl::rsa::Rsa;

    /// An encoder that just keeps the inputs around.
    struct Inputs;

    impl RecordEncoder for Inputs {
        type Record = (u16, u8, u8, usize);
        type Error = ();

        fn encode(
            &self,
            inputs: &PublicKeyRecord<'_>,
        ) -> Result<Self::Record, Self::Error> {
            Ok((
                inputs.flags,
                inputs.protocol,
                inputs.algorithm.to_int(),
                inputs.public_key.len(),
            ))
        }
    }

    /// An encoder that always fails.
    struct Broken;

    impl RecordEncoder for Broken {
        type Record = ();
        type Error = &'static str;

        fn encode(
            &self,
            _inputs: &PublicKeyRecord<'_>,
        ) -> Result<Self::Record, Self::Error> {
            Err("broken")
        }
    }

    #[test]
    fn rsa_encoding() {
        let key = generate(SigningAlgorithm::RSASHA1, 1024).unwrap();
        let bytes = key.public_key_bytes().unwrap();
        assert_eq!(&bytes[..4], &[3, 0x01, 0x00, 0x01]);
        assert_eq!(bytes.len(), 4 + 128);
        assert_eq!(&bytes[4..], key.rsa().unwrap().n().to_vec().as_slice());
    }

    #[test]
    fn rsa_long_exponent() {
        let n = BigNum::from_u32(0xFFFF_FFFF).unwrap();
        let mut e = BigNum::new().unwrap();
        e.lshift(&BigNum::from_u32(1).unwrap(), 2048).unwrap();
        let key = Rsa::from_public_components(n, e).unwrap();
        let bytes = rsa_public_key(&key).unwrap();
        assert_eq!(&bytes[..3], &[0, 1, 1]);
        assert_eq!(bytes[3], 1);
        assert_eq!(bytes.len(), 3 + 257 + 4);
    }

    #[test]
    fn dsa_encoding() {
        let key = generate(SigningAlgorithm::DSA, 1024).unwrap();
        let bytes = key.public_key_bytes().unwrap();
        assert_eq!(bytes[0], 8);
        assert_eq!(bytes.len(), 1 + 20 + 3 * 128);
        let dsa = key.dsa().unwrap();
        assert_eq!(&bytes[21..149], dsa.p().to_vec().as_slice());
    }

    #[test]
    fn record_inputs() {
        let owner = Name::vec_from_str("example.com").unwrap();
        let mut key = generate(SigningAlgorithm::RSASHA1, 1024).unwrap();
        assert_eq!(key.record_inputs(), Err(ProjectError::MissingOwner));

        key.set_owner(&owner);
        key.set_ttl(3600);
        key.set_keytag(4711);
        let inputs = key.record_inputs().unwrap();
        assert_eq!(inputs.owner, owner.for_slice());
        assert_eq!(inputs.ttl, 3600);
        assert_eq!(inputs.flags, 256);
        assert_eq!(inputs.protocol, 3);
        assert_eq!(inputs.algorithm, SigningAlgorithm::RSASHA1);
        assert_eq!(inputs.keytag, 4711);
        assert_eq!(inputs.public_key, key.public_key_bytes().unwrap());

        assert_eq!(key.to_record(Inputs), Ok((256, 3, 5, 132)));
        assert_eq!(
            key.to_record(&Broken),
            Err(ToRecordError::Encoder("broken"))
        );
    }

    #[test]
    fn not_publishable() {
        let owner = Name::vec_from_str("example.com").unwrap();
        let mut key = generate(SigningAlgorithm::HMACMD5, 128).unwrap();
        key.set_owner(&owner);
        assert_eq!(key.public_key_bytes(), Err(ProjectError::NotPublishable));
        assert_eq!(
            key.to_record(Inputs),
            Err(ToRecordError::Project(ProjectError::NotPublishable))
        );

        let key = Key::new();
        assert_eq!(key.record_inputs(), Err(ProjectError::NoMaterial));
    }

    #[test]
    fn mismatched_algorithm() {
        let owner = Name::vec_from_str("example.com").unwrap();
        let mut key = generate(SigningAlgorithm::RSASHA1, 1024).unwrap();
        key.set_owner(&owner);
        key.set_algorithm(SigningAlgorithm::DSA);
        assert_eq!(key.record_inputs(), Err(ProjectError::VariantMismatch));
    }
}
