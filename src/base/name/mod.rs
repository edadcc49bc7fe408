//! Domain names.
//!
//! This module provides the domain name type a key is associated with. A
//! key never owns its name, it only refers to a name kept elsewhere, so the
//! type can be used atop any octets sequence and be borrowed as
//! [`Name<[u8]>`].

pub use self::absolute::{FromStrError, Name, NameError};

mod absolute;
