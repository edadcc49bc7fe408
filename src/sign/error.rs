//! Signing key related errors.

use core::fmt;

use std::collections::TryReserveError;

//------------ Error ---------------------------------------------------------

/// An error in creating, generating, or accessing a signing key.
///
/// None of these errors is fatal. Generation failures in particular are not
/// transient, so they are never retried internally.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// Backing storage could not be grown.
    Allocation,

    /// No kind of key material is defined for the requested algorithm.
    UnsupportedAlgorithm,

    /// The cryptographic backend failed to produce parameters, keys, or
    /// random data.
    GenerationFailure,

    /// The key does not hold the requested kind of key material.
    VariantMismatch,
}

//--- Conversion

impl From<openssl::error::ErrorStack> for Error {
    fn from(_: openssl::error::ErrorStack) -> Self {
        Self::GenerationFailure
    }
}

impl From<rand::Error> for Error {
    fn from(_: rand::Error) -> Self {
        Self::GenerationFailure
    }
}

impl From<TryReserveError> for Error {
    fn from(_: TryReserveError) -> Self {
        Self::Allocation
    }
}

//--- Display and Error

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Allocation => "failed to allocate storage",
            Self::UnsupportedAlgorithm => "algorithm not supported",
            Self::GenerationFailure => "failed to generate key material",
            Self::VariantMismatch => "key holds a different kind of material",
        })
    }
}

impl std::error::Error for Error {}

//------------ ProjectError --------------------------------------------------

/// A key could not be turned into the inputs of a public key record.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProjectError {
    /// The key holds a shared secret which must never be published.
    NotPublishable,

    /// The key has no key material at all.
    NoMaterial,

    /// The key's algorithm does not match its key material.
    VariantMismatch,

    /// The key has no owner name.
    MissingOwner,

    /// The public key cannot be expressed in the record format.
    ///
    /// This happens for DSA keys with a prime longer than 1024 bits or a
    /// subprime longer than 160 bits.
    Encoding,
}

//--- Display and Error

impl fmt::Display for ProjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotPublishable => "key material cannot be published",
            Self::NoMaterial => "key has no key material",
            Self::VariantMismatch => "algorithm does not match key material",
            Self::MissingOwner => "key has no owner name",
            Self::Encoding => "public key cannot be encoded",
        })
    }
}

impl std::error::Error for ProjectError {}

//------------ ToRecordError -------------------------------------------------

/// Converting a key into a record failed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ToRecordError<E> {
    /// The key does not provide the record's inputs.
    Project(ProjectError),

    /// The record encoder failed.
    Encoder(E),
}

impl<E> From<ProjectError> for ToRecordError<E> {
    fn from(err: ProjectError) -> Self {
        Self::Project(err)
    }
}

impl<E: fmt::Display> fmt::Display for ToRecordError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Project(err) => fmt::Display::fmt(err, f),
            Self::Encoder(err) => write!(f, "record encoder failed: {err}"),
        }
    }
}

impl<E: fmt::Debug + fmt::Display> std::error::Error for ToRecordError<E> {}

//============ Testing =======================================================
