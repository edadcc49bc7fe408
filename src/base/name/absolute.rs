//! Uncompressed, absolute domain names.
//!
//! This is a private module. Its public types are re-exported by the parent.

use core::str::FromStr;
use core::{fmt, mem};

//------------ Name ----------------------------------------------------------

/// An uncompressed, absolute domain name.
///
/// The type wraps an octets sequence that contains an absolute domain name in
/// wire-format encoding. Keys only ever hold a reference to a name, so the
/// type is small: it can be created from wire-format octets or
/// a plain dotted string via [`FromStr`], it can be displayed, compared,
/// and turned into a [`Name<[u8]>`] reference via [`for_slice`].
///
/// Comparison ignores ASCII case, as required for domain names.
///
/// [`for_slice`]: Name::for_slice
#[derive(Clone)]
#[repr(transparent)]
pub struct Name<Octs: ?Sized>(Octs);

impl Name<()> {
    /// Domain names have a maximum length of 255 octets.
    pub const MAX_LEN: usize = 255;

    /// Labels have a maximum length of 63 octets.
    pub const MAX_LABEL_LEN: usize = 63;
}

/// # Creating Values
///
impl<Octs> Name<Octs> {
    /// Creates a domain name from an octet sequence.
    ///
    /// This will only succeed if `octets` contains a properly encoded
    /// absolute domain name in wire format.
    pub fn from_octets(octets: Octs) -> Result<Self, NameError>
    where
        Octs: AsRef<[u8]>,
    {
        Name::check_slice(octets.as_ref())?;
        Ok(Self(octets))
    }
}

impl Name<[u8]> {
    /// Creates a domain name from an octet slice without checking.
    ///
    /// # Safety
    ///
    /// The slice must contain a correctly encoded absolute domain name of
    /// at most 255 octets, ending in the root label.
    unsafe fn from_slice_unchecked(slice: &[u8]) -> &Self {
        // SAFETY: Name has repr(transparent)
        mem::transmute(slice)
    }

    /// Creates a domain name from an octets slice.
    ///
    /// Note that the input must be in wire format.
    pub fn from_slice(slice: &[u8]) -> Result<&Self, NameError> {
        Self::check_slice(slice)?;
        Ok(unsafe { Self::from_slice_unchecked(slice) })
    }

    /// Creates a domain name for the root label only atop an octets slice.
    #[must_use]
    pub fn root_slice() -> &'static Self {
        unsafe { Self::from_slice_unchecked(b"\0") }
    }

    /// Checks whether an octet slice contains a correctly encoded name.
    fn check_slice(mut slice: &[u8]) -> Result<(), NameError> {
        if slice.len() > Name::MAX_LEN {
            return Err(NameError::LongName);
        }
        loop {
            let (&len, tail) =
                slice.split_first().ok_or(NameError::ShortInput)?;
            let len = usize::from(len);
            if len == 0 {
                if tail.is_empty() {
                    break;
                } else {
                    return Err(NameError::TrailingData);
                }
            }
            if len & 0xC0 == 0xC0 {
                return Err(NameError::CompressedName);
            }
            if len > Name::MAX_LABEL_LEN {
                return Err(NameError::BadLabel);
            }
            if tail.len() < len {
                return Err(NameError::ShortInput);
            }
            slice = &tail[len..];
            if slice.is_empty() {
                return Err(NameError::RelativeName);
            }
        }
        Ok(())
    }
}

impl Name<std::vec::Vec<u8>> {
    /// Creates a domain name atop a `Vec<u8>` from its string representation.
    pub fn vec_from_str(s: &str) -> Result<Self, FromStrError> {
        FromStr::from_str(s)
    }
}

/// # Conversions
///
impl<Octs: ?Sized> Name<Octs> {
    /// Returns a domain name using a reference to the octets.
    pub fn for_slice(&self) -> &Name<[u8]>
    where
        Octs: AsRef<[u8]>,
    {
        unsafe { Name::from_slice_unchecked(self.0.as_ref()) }
    }

    /// Returns a reference to the underlying octets slice.
    pub fn as_slice(&self) -> &[u8]
    where
        Octs: AsRef<[u8]>,
    {
        self.0.as_ref()
    }
}

/// # Properties
///
impl<Octs: AsRef<[u8]> + ?Sized> Name<Octs> {
    /// Returns whether the name is the root label only.
    pub fn is_root(&self) -> bool {
        self.0.as_ref().len() == 1
    }

    /// Returns the length of the name's wire format.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.0.as_ref().len()
    }
}

//--- FromStr

impl FromStr for Name<std::vec::Vec<u8>> {
    type Err = FromStrError;

    /// Parses a string into an absolute domain name.
    ///
    /// The name is a sequence of labels separated by dots with an optional
    /// trailing dot. Labels may contain printable ASCII characters other
    /// than space, dot, and backslash. Escape sequences are not supported.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "." {
            return Ok(Self(std::vec![0]));
        }
        let s = s.strip_suffix('.').unwrap_or(s);
        let mut target = std::vec::Vec::with_capacity(s.len() + 2);
        for label in s.split('.') {
            if label.is_empty() {
                return Err(FromStrError::EmptyLabel);
            }
            if label.len() > Name::MAX_LABEL_LEN {
                return Err(FromStrError::LongLabel);
            }
            if !label.bytes().all(|ch| ch.is_ascii_graphic() && ch != b'\\') {
                return Err(FromStrError::BadSymbol);
            }
            target.push(label.len() as u8);
            target.extend_from_slice(label.as_bytes());
        }
        target.push(0);
        if target.len() > Name::MAX_LEN {
            return Err(FromStrError::LongName);
        }
        Ok(Self(target))
    }
}

//--- PartialEq and Eq

impl<Octs, Other> PartialEq<Name<Other>> for Name<Octs>
where
    Octs: AsRef<[u8]> + ?Sized,
    Other: AsRef<[u8]> + ?Sized,
{
    fn eq(&self, other: &Name<Other>) -> bool {
        // Label length octets are at most 63 and never change under ASCII
        // case folding, so comparing the whole wire format is fine.
        self.as_slice().eq_ignore_ascii_case(other.as_slice())
    }
}

impl<Octs: AsRef<[u8]> + ?Sized> Eq for Name<Octs> {}

//--- Display and Debug

impl<Octs: AsRef<[u8]> + ?Sized> fmt::Display for Name<Octs> {
    /// Formats the domain name.
    ///
    /// This will produce the domain name in ‘common display format’ without
    /// the trailing dot with the exception of a root name which will be just
    /// a dot.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_root() {
            return f.write_str(".");
        }

        let mut slice = self.as_slice();
        while let Some((&len, tail)) = slice.split_first() {
            if len == 0 {
                break;
            }
            if slice.len() != self.len() {
                f.write_str(".")?;
            }
            let (label, tail) = tail.split_at(usize::from(len));
            for &ch in label {
                if ch == b'.' || ch == b'\\' {
                    write!(f, "\\{}", ch as char)?;
                } else if ch.is_ascii_graphic() {
                    write!(f, "{}", ch as char)?;
                } else {
                    write!(f, "\\{:03}", ch)?;
                }
            }
            slice = tail;
        }
        Ok(())
    }
}

impl<Octs: AsRef<[u8]> + ?Sized> fmt::Debug for Name<Octs> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_root() {
            f.write_str("Name(.)")
        } else {
            write!(f, "Name({}.)", self)
        }
    }
}

//--- AsRef

impl<Octs: AsRef<[u8]> + ?Sized> AsRef<[u8]> for Name<Octs> {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

//============ Error Types ===================================================

//------------ NameError -----------------------------------------------------

/// A domain name in wire format was invalid.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NameError {
    /// A label was longer than 63 octets or of an unknown type.
    BadLabel,

    /// The name contained a compression pointer.
    CompressedName,

    /// The name was longer than 255 octets.
    LongName,

    /// The name did not end in the root label.
    RelativeName,

    /// There was data after the root label.
    TrailingData,

    /// The octets ended in the middle of a label.
    ShortInput,
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            NameError::BadLabel => "invalid label",
            NameError::CompressedName => "compressed domain name",
            NameError::LongName => "long domain name",
            NameError::RelativeName => "relative name",
            NameError::TrailingData => "trailing data",
            NameError::ShortInput => "unexpected end of input",
        })
    }
}

impl std::error::Error for NameError {}

//------------ FromStrError --------------------------------------------------

/// An error happened while creating a domain name from a string.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FromStrError {
    /// An empty label was encountered.
    EmptyLabel,

    /// A label had more than 63 octets.
    LongLabel,

    /// The name had more than 255 octets.
    LongName,

    /// A label contained a character that is not allowed.
    BadSymbol,
}

impl fmt::Display for FromStrError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            FromStrError::EmptyLabel => "empty label",
            FromStrError::LongLabel => "label too long",
            FromStrError::LongName => "long domain name",
            FromStrError::BadSymbol => "illegal character",
        })
    }
}

impl std::error::Error for FromStrError {}

//============ Testing =======================================================
