//! Types for tuning configurable aspects of key generation.

//------------ GenerateConfig ------------------------------------------------

/// Configuration for generating new keys.
///
/// The default configuration is what [`generate`] uses.
///
/// [`generate`]: super::generate::generate
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GenerateConfig {
    /// The public exponent of generated RSA keys.
    ///
    /// This must be an odd number of at least 3.
    pub rsa_exponent: u32,
}

impl GenerateConfig {
    /// The public exponent 65537, also known as F4.
    pub const RSA_F4: u32 = 65537;

    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the public exponent of generated RSA keys.
    #[must_use]
    pub fn with_rsa_exponent(mut self, exponent: u32) -> Self {
        self.rsa_exponent = exponent;
        self
    }

    /// Returns whether the configured RSA exponent can be used.
    pub fn is_valid_rsa_exponent(&self) -> bool {
        self.rsa_exponent >= 3 && self.rsa_exponent % 2 == 1
    }
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            rsa_exponent: Self::RSA_F4,
        }
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rsa_exponent() {
        assert_eq!(GenerateConfig::new().rsa_exponent, 65537);
        assert!(GenerateConfig::new().is_valid_rsa_exponent());
        assert!(GenerateConfig::new()
            .with_rsa_exponent(3)
            .is_valid_rsa_exponent());
        assert!(!GenerateConfig::new()
            .with_rsa_exponent(1)
            .is_valid_rsa_exponent());
        assert!(!GenerateConfig::new()
            .with_rsa_exponent(65536)
            .is_valid_rsa_exponent());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn ser_de() {
        use serde_test::{assert_de_tokens, assert_tokens, Token};

        assert_tokens(
            &GenerateConfig::default(),
            &[
                Token::Struct {
                    name: "GenerateConfig",
                    len: 1,
                },
                Token::Str("rsa_exponent"),
                Token::U32(65537),
                Token::StructEnd,
            ],
        );
        assert_de_tokens(
            &GenerateConfig::default(),
            &[
                Token::Struct {
                    name: "GenerateConfig",
                    len: 0,
                },
                Token::StructEnd,
            ],
        );
    }
}
