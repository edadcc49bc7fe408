//! Basics.
//!
//! This module provides the fundamental DNS types the signing keys of this
//! crate build upon:
//!
//! * [iana] for the registry of signing algorithm numbers, and
//! * [name] for the domain names keys are associated with.

pub use self::iana::{KeyFamily, SigningAlgorithm};
pub use self::name::Name;

pub mod iana;
pub mod name;
