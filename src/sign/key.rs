//! Signing keys and their key material.

use core::fmt;

use std::vec::Vec;

use openssl::dsa::Dsa;
use openssl::pkey::Private;
use openssl::rsa::Rsa;
use zeroize::Zeroize;

use crate::base::iana::{KeyFamily, SigningAlgorithm};
use crate::base::name::Name;

use super::error::Error;

//----------- Key ------------------------------------------------------------

/// A signing key.
///
/// This associates DNSSEC metadata with exactly one kind of key material:
/// an RSA key pair, a DSA key pair, or a shared HMAC secret.
///
/// A key starts out empty, i.e., with neither an algorithm nor key material,
/// and with all metadata set to zero. Keys created by [`generate`] always
/// have both the algorithm and matching key material.
///
/// The algorithm and the material are set independently. It is up to the
/// owner of the key to keep them consistent. The setters never infer one
/// from the other, but [`is_consistent`] can be used to check.
///
/// Asking a key for a kind of material it doesn't hold never reinterprets
/// anything; the material accessors simply return `None` in this case.
///
/// The owner name is borrowed. The key never copies or drops it.
///
/// [`generate`]: super::generate::generate
/// [`is_consistent`]: Key::is_consistent
#[derive(Default)]
pub struct Key<'a> {
    /// The signing algorithm or `None` if not yet specialized.
    algorithm: Option<SigningAlgorithm>,

    /// The key material.
    material: Option<KeyMaterial>,

    /// The domain name this key belongs to.
    owner: Option<&'a Name<[u8]>>,

    /// The flags stored in the DNSKEY record.
    flags: u16,

    /// The original TTL.
    ttl: u32,

    /// The start of the validity period.
    inception: u32,

    /// The end of the validity period.
    expiration: u32,

    /// The key tag.
    keytag: u16,
}

impl Key<'_> {
    /// The Zone Key flag.
    ///
    /// See [RFC 4034, section 2.1.1].
    ///
    /// [RFC 4034, section 2.1.1]: https://datatracker.ietf.org/doc/html/rfc4034#section-2.1.1
    pub const ZONE_KEY: u16 = 1 << 8;

    /// The REVOKE flag defined in RFC 5011.
    pub const REVOKED: u16 = 1 << 7;

    /// The Secure Entry Point flag.
    pub const SECURE_ENTRY_POINT: u16 = 1;
}

//--- Construction

impl<'a> Key<'a> {
    /// Creates a new, empty key.
    ///
    /// The key has neither an algorithm nor key material. All metadata is
    /// zero and there is no owner.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a key from an algorithm and matching key material.
    ///
    /// Returns [`Error::VariantMismatch`] if the material isn't of the kind
    /// the algorithm uses and [`Error::UnsupportedAlgorithm`] if the
    /// algorithm has no kind of material at all.
    pub fn from_material(
        algorithm: SigningAlgorithm,
        material: KeyMaterial,
    ) -> Result<Self, Error> {
        match algorithm.family() {
            Some(family) if family == material.family() => Ok(Self {
                algorithm: Some(algorithm),
                material: Some(material),
                ..Default::default()
            }),
            Some(_) => Err(Error::VariantMismatch),
            None => Err(Error::UnsupportedAlgorithm),
        }
    }
}

//--- Algorithm and key material

impl<'a> Key<'a> {
    /// The signing algorithm of the key.
    ///
    /// Returns `None` if the algorithm has not been set yet.
    pub fn algorithm(&self) -> Option<SigningAlgorithm> {
        self.algorithm
    }

    /// Sets the algorithm the key is to be used with.
    ///
    /// This does not touch the key material.
    pub fn set_algorithm(&mut self, algorithm: SigningAlgorithm) {
        self.algorithm = Some(algorithm)
    }

    /// Returns the key material if there is any.
    pub fn material(&self) -> Option<&KeyMaterial> {
        self.material.as_ref()
    }

    /// Returns whether the key has key material installed.
    pub fn has_material(&self) -> bool {
        self.material.is_some()
    }

    /// Installs key material, returning the material it replaces.
    pub fn set_material(
        &mut self,
        material: KeyMaterial,
    ) -> Option<KeyMaterial> {
        self.material.replace(material)
    }

    /// Removes the key material from the key and returns it.
    pub fn take_material(&mut self) -> Option<KeyMaterial> {
        self.material.take()
    }

    /// Installs an RSA key pair, releasing any previous key material.
    pub fn set_rsa_material(&mut self, key: Rsa<Private>) {
        self.material = Some(KeyMaterial::Rsa(key));
    }

    /// Installs a DSA key pair, releasing any previous key material.
    pub fn set_dsa_material(&mut self, key: Dsa<Private>) {
        self.material = Some(KeyMaterial::Dsa(key));
    }

    /// Installs an HMAC secret, releasing any previous key material.
    pub fn set_hmac_material(&mut self, secret: impl Into<HmacSecret>) {
        self.material = Some(KeyMaterial::Hmac(secret.into()));
    }

    /// Returns the RSA key pair if the key holds one.
    pub fn rsa(&self) -> Option<&Rsa<Private>> {
        match self.material {
            Some(KeyMaterial::Rsa(ref key)) => Some(key),
            _ => None,
        }
    }

    /// Returns the DSA key pair if the key holds one.
    pub fn dsa(&self) -> Option<&Dsa<Private>> {
        match self.material {
            Some(KeyMaterial::Dsa(ref key)) => Some(key),
            _ => None,
        }
    }

    /// Returns the HMAC secret if the key holds one.
    pub fn hmac(&self) -> Option<&[u8]> {
        match self.material {
            Some(KeyMaterial::Hmac(ref secret)) => Some(secret.as_slice()),
            _ => None,
        }
    }

    /// Returns the RSA key pair or [`Error::VariantMismatch`].
    pub fn require_rsa(&self) -> Result<&Rsa<Private>, Error> {
        self.rsa().ok_or(Error::VariantMismatch)
    }

    /// Returns the DSA key pair or [`Error::VariantMismatch`].
    pub fn require_dsa(&self) -> Result<&Dsa<Private>, Error> {
        self.dsa().ok_or(Error::VariantMismatch)
    }

    /// Returns the HMAC secret or [`Error::VariantMismatch`].
    pub fn require_hmac(&self) -> Result<&[u8], Error> {
        self.hmac().ok_or(Error::VariantMismatch)
    }

    /// The size of the HMAC secret in octets.
    ///
    /// This is zero if the key doesn't hold an HMAC secret.
    pub fn hmac_size(&self) -> usize {
        self.hmac().map(<[u8]>::len).unwrap_or(0)
    }

    /// Returns whether the algorithm and the key material agree.
    ///
    /// This is the case if both are unset or if the material is of the
    /// kind the algorithm uses.
    pub fn is_consistent(&self) -> bool {
        match (self.algorithm, &self.material) {
            (None, None) => true,
            (Some(algorithm), Some(material)) => {
                algorithm.family() == Some(material.family())
            }
            _ => false,
        }
    }
}

//--- Metadata

impl<'a> Key<'a> {
    /// The domain name the key belongs to.
    pub fn owner(&self) -> Option<&'a Name<[u8]>> {
        self.owner
    }

    /// Sets the domain name the key belongs to.
    pub fn set_owner<Octs>(&mut self, owner: &'a Name<Octs>)
    where
        Octs: AsRef<[u8]> + ?Sized,
    {
        self.owner = Some(owner.for_slice())
    }

    /// The flags of the key.
    pub fn flags(&self) -> u16 {
        self.flags
    }

    /// Sets the flags of the key.
    pub fn set_flags(&mut self, flags: u16) {
        self.flags = flags
    }

    /// Whether this is a zone key.
    pub fn is_zone_key(&self) -> bool {
        self.flags & Self::ZONE_KEY != 0
    }

    /// Whether this key has been revoked.
    pub fn is_revoked(&self) -> bool {
        self.flags & Self::REVOKED != 0
    }

    /// Whether this is a secure entry point.
    pub fn is_secure_entry_point(&self) -> bool {
        self.flags & Self::SECURE_ENTRY_POINT != 0
    }

    /// The original TTL of records signed with this key.
    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    /// Sets the original TTL.
    pub fn set_ttl(&mut self, ttl: u32) {
        self.ttl = ttl
    }

    /// The start of the validity period of signatures.
    pub fn inception(&self) -> u32 {
        self.inception
    }

    /// Sets the start of the validity period.
    ///
    /// The value is not checked against the expiration.
    pub fn set_inception(&mut self, inception: u32) {
        self.inception = inception
    }

    /// The end of the validity period of signatures.
    pub fn expiration(&self) -> u32 {
        self.expiration
    }

    /// Sets the end of the validity period.
    ///
    /// The value is not checked against the inception.
    pub fn set_expiration(&mut self, expiration: u32) {
        self.expiration = expiration
    }

    /// The key tag.
    pub fn keytag(&self) -> u16 {
        self.keytag
    }

    /// Sets the key tag.
    pub fn set_keytag(&mut self, keytag: u16) {
        self.keytag = keytag
    }
}

//--- Debug

impl fmt::Debug for Key<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("algorithm", &self.algorithm)
            .field("material", &self.material)
            .field("owner", &self.owner)
            .field("flags", &self.flags)
            .field("ttl", &self.ttl)
            .field("inception", &self.inception)
            .field("expiration", &self.expiration)
            .field("keytag", &self.keytag)
            .finish()
    }
}

//----------- KeyMaterial ----------------------------------------------------

/// The cryptographic material of a key.
///
/// The key pairs release their secret parts when dropped; [`HmacSecret`]
/// zeroes its octets.
pub enum KeyMaterial {
    /// An RSA key pair.
    Rsa(Rsa<Private>),

    /// A DSA key pair.
    Dsa(Dsa<Private>),

    /// A shared HMAC secret.
    Hmac(HmacSecret),
}

impl KeyMaterial {
    /// The family of the key material.
    pub fn family(&self) -> KeyFamily {
        match self {
            Self::Rsa(_) => KeyFamily::Rsa,
            Self::Dsa(_) => KeyFamily::Dsa,
            Self::Hmac(_) => KeyFamily::Hmac,
        }
    }

    /// The size of the key in bits.
    ///
    /// For RSA, this is the size of the modulus, for DSA the size of the
    /// prime, and for HMAC the size of the secret.
    pub fn bits(&self) -> u32 {
        match self {
            Self::Rsa(key) => bits(key.n().num_bits()),
            Self::Dsa(key) => bits(key.p().num_bits()),
            Self::Hmac(secret) => {
                u32::try_from(secret.len().saturating_mul(8))
                    .unwrap_or(u32::MAX)
            }
        }
    }
}

fn bits(num_bits: i32) -> u32 {
    u32::try_from(num_bits).unwrap_or(0)
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyMaterial::{}({} bits)", self.family(), self.bits())
    }
}

//----------- HmacSecret -----------------------------------------------------

/// A shared HMAC secret.
///
/// The octets are zeroed when the secret is dropped.
pub struct HmacSecret(Vec<u8>);

impl HmacSecret {
    /// Creates a secret from its octets.
    pub fn new(secret: Vec<u8>) -> Self {
        Self(secret)
    }

    /// Returns the octets of the secret.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Returns the octets of the secret for filling them in.
    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.0
    }

    /// The length of the secret in octets.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the secret is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for HmacSecret {
    fn from(secret: Vec<u8>) -> Self {
        Self::new(secret)
    }
}

impl From<&[u8]> for HmacSecret {
    fn from(secret: &[u8]) -> Self {
        Self::new(secret.to_vec())
    }
}

impl PartialEq for HmacSecret {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && openssl::memcmp::eq(self.as_slice(), other.as_slice())
    }
}

impl Eq for HmacSecret {}

impl fmt::Debug for HmacSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HmacSecret({} octets)", self.len())
    }
}

impl Drop for HmacSecret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

//============ Testing =======================================================
