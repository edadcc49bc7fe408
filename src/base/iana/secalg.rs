//! DNSSEC Signing Algorithm Numbers

//------------ SigningAlgorithm ----------------------------------------------

int_enum! {
    /// Signing Algorithm Numbers.
    ///
    /// These numbers identify the algorithm a signing key is used with.
    /// The values below 128 are taken from the IANA registry of DNS
    /// security algorithm numbers, the HMAC values are the private
    /// numbers used for transaction signatures. For the currently
    /// registered values see the [IANA registration].
    ///
    /// The mnemonics are the canonical display names of the algorithms.
    /// They are what [`to_mnemonic_str`] returns and what [`FromStr`] and
    /// [`from_mnemonic`] accept.
    ///
    /// [IANA registration]: http://www.iana.org/assignments/dns-sec-alg-numbers/dns-sec-alg-numbers.xhtml#dns-sec-alg-numbers-1
    /// [`to_mnemonic_str`]: SigningAlgorithm::to_mnemonic_str
    /// [`from_mnemonic`]: SigningAlgorithm::from_mnemonic
    /// [`FromStr`]: core::str::FromStr
    =>
    SigningAlgorithm, u8;

    /// RSA/MD5
    ///
    /// This algorithm was described in RFC 2537 and since has been
    /// deprecated due to weaknesses of the MD5 hash algorithm by RFC 3110
    /// which suggests to use RSA/SHA1 instead.
    (RSAMD5 => 1, "RSAMD5")

    /// DSA
    ///
    /// This algorithm is described in RFC 2536. The registry lists it
    /// under its legacy name.
    (DSA => 3, "DSAMD5")

    /// RSA/SHA-1
    ///
    /// This algorithm is described in RFC 3110. It may be used both for
    /// zone signing and transaction security.
    (RSASHA1 => 5, "RSASHA1")

    /// DSA-NSEC3-SHA1
    ///
    /// This value is an alias for `DSA` for use within NSEC3 signed zones.
    (DSA_NSEC3_SHA1 => 6, "DSA-NSEC3-SHA1")

    /// RSASHA1-NSEC3-SHA1
    ///
    /// This value is an alias for `RSASHA1` for use within NSEC3 signed
    /// zones.
    (RSASHA1_NSEC3_SHA1 => 7, "RSASHA1-NSEC3-SHA1")

    /// RSA/SHA-256
    ///
    /// This algorithm is described in RFC 5702.
    (RSASHA256 => 8, "RSASHA256")

    /// RSA/SHA-512
    ///
    /// This algorithm is described in RFC 5702.
    (RSASHA512 => 10, "RSASHA512")

    /// HMAC-MD5
    ///
    /// A symmetric algorithm used for transaction signatures as
    /// described in RFC 2845.
    (HMACMD5 => 157, "hmac-md5.sig-alg.reg.int")

    /// HMAC-SHA1
    (HMACSHA1 => 158, "hmac-sha1")

    /// HMAC-SHA256
    (HMACSHA256 => 159, "hmac-sha256")
}

int_enum_str_with_decimal!(SigningAlgorithm, u8, "unknown signing algorithm");

impl SigningAlgorithm {
    /// Returns the family of key material used by this algorithm.
    ///
    /// Returns `None` if the algorithm has no key material kind defined,
    /// i.e., if keys for it can neither be held nor generated.
    #[must_use]
    pub const fn family(self) -> Option<KeyFamily> {
        match self {
            SigningAlgorithm::RSAMD5
            | SigningAlgorithm::RSASHA1
            | SigningAlgorithm::RSASHA1_NSEC3_SHA1
            | SigningAlgorithm::RSASHA256
            | SigningAlgorithm::RSASHA512 => Some(KeyFamily::Rsa),
            SigningAlgorithm::DSA | SigningAlgorithm::DSA_NSEC3_SHA1 => {
                Some(KeyFamily::Dsa)
            }
            SigningAlgorithm::HMACMD5
            | SigningAlgorithm::HMACSHA1
            | SigningAlgorithm::HMACSHA256 => Some(KeyFamily::Hmac),
            _ => None,
        }
    }

    /// Returns whether keys of this algorithm can be published in DNSKEY
    /// records.
    #[must_use]
    pub const fn is_public_key(self) -> bool {
        matches!(self.family(), Some(KeyFamily::Rsa | KeyFamily::Dsa))
    }
}

//------------ KeyFamily -----------------------------------------------------

/// The kind of key material an algorithm uses.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum KeyFamily {
    /// An RSA key pair.
    Rsa,

    /// A DSA key pair.
    Dsa,

    /// A shared HMAC secret.
    Hmac,
}

impl KeyFamily {
    /// Returns a short name for the family.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            KeyFamily::Rsa => "RSA",
            KeyFamily::Dsa => "DSA",
            KeyFamily::Hmac => "HMAC",
        }
    }
}

impl core::fmt::Display for KeyFamily {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

//============ Testing =======================================================
