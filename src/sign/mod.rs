//! Signing keys.
//!
//! A [`Key`] combines the cryptographic material of a key with the metadata
//! DNS keeps about it. The material is one of an RSA key pair, a DSA key
//! pair, or an HMAC secret, as selected by the key's signing algorithm.
//! Keys are owned by exactly one place at a time: a key is moved into a
//! [`KeyList`] when pushed and moved out again when popped.
//!
//! New keys are created by [`generate`]:
//!
//! ```no_run
//! use domain_keys::base::iana::SigningAlgorithm;
//! use domain_keys::sign::{generate, KeyList};
//!
//! let key = generate(SigningAlgorithm::RSASHA256, 2048).unwrap();
//! assert!(key.rsa().is_some());
//!
//! let mut keys = KeyList::new();
//! keys.push(key).unwrap();
//! assert_eq!(keys.count(), 1);
//! ```
//!
//! Keys for public key algorithms can be turned into the inputs of a DNSKEY
//! record via [`Key::record_inputs`] and handed to a [`RecordEncoder`] via
//! [`Key::to_record`].

pub use self::config::GenerateConfig;
pub use self::error::{Error, ProjectError, ToRecordError};
pub use self::generate::{
    generate, generate_material, generate_with_config,
};
pub use self::key::{HmacSecret, Key, KeyMaterial};
pub use self::keylist::{KeyList, PushError};
pub use self::record::{PublicKeyRecord, RecordEncoder};

pub mod config;
pub mod error;
pub mod generate;
pub mod key;
pub mod keylist;
pub mod record;
