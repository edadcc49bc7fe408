//! Key generation and key lists for DNSSEC and TSIG.
//!
//! This crate provides the building blocks for creating and keeping the keys
//! used to sign DNS data. A key pairs cryptographic material with the
//! metadata that DNS records about it, such as its owner name, flags, TTL,
//! validity window, and key tag.
//!
//! # Modules
//!
//! * [base] contains the fundamental types the keys are built from: the
//!   IANA registry of signing algorithms and domain names, and
//! * [sign] contains the keys themselves, their generation, ordered lists
//!   of keys, and the conversion of keys into public key records.
//!
//! Key material is created through [OpenSSL](https://www.openssl.org/) for
//! RSA and DSA and by reading the operating system's random number
//! generator for HMAC secrets.
//!
//! # Reference of Feature Flags
//!
//! * `serde`: Enables serde serialization for a number of basic types,
//!   namely the signing algorithms and the generation configuration.

#![allow(renamed_and_removed_lints)]
#![allow(clippy::unknown_clippy_lints)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod base;
pub mod sign;
