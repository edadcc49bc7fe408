//! IANA Definitions for DNS.
//!
//! This module contains types for parameters defined in IANA registries
//! that are relevant for this crate.
//!
//! The types follow the same basic structure. They are newtypes around a
//! raw integer with associated constants for all well-defined values. Since
//! we cannot restrict the integer to only the defined values, we generally
//! allow the full set of possible values.
//!
//! There are two methods `from_int()` and `to_int()` to convert from and
//! to raw integer values as well as implementations of the `From` trait
//! for these. `FromStr` and `Display` are implemented to convert from
//! the mnemonics to the values and back.

pub use self::secalg::{KeyFamily, SigningAlgorithm};

#[macro_use]
mod macros;

pub mod secalg;
