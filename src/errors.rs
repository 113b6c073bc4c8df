use core::fmt;
use std::fmt::{Display, Formatter};
use std::os::raw::c_int;

use crate::ffi;

/// Error from the marshaling shim or the native library itself.
///
/// Native codes are carried unchanged: `Status` holds the exact positive
/// `SG_LIB_CAT_*` value the library returned and `Os` wraps the negated
/// errno. `BufferOverrun` is the only error raised by this layer, before
/// any native call is attempted.
#[derive(Debug)]
pub enum SgError {
    BufferOverrun { requested: usize, provided: usize },
    Os(std::io::Error),
    Status(c_int),
}

impl SgError {
    /// The raw native status code, if this came back from the library.
    pub fn status(&self) -> Option<c_int> {
        match self {
            SgError::Status(status) => Some(*status),
            _ => None,
        }
    }
}

/// sg_lib.h names for the sense categories the library reports.
pub fn status_name(status: c_int) -> &'static str {
    match status {
        ffi::SG_LIB_CAT_CLEAN => "clean",
        ffi::SG_LIB_SYNTAX_ERROR => "syntax error",
        ffi::SG_LIB_CAT_NOT_READY => "not ready",
        ffi::SG_LIB_CAT_MEDIUM_HARD => "medium or hardware error",
        ffi::SG_LIB_CAT_ILLEGAL_REQ => "illegal request",
        ffi::SG_LIB_CAT_UNIT_ATTENTION => "unit attention",
        ffi::SG_LIB_CAT_INVALID_OP => "invalid opcode",
        ffi::SG_LIB_CAT_ABORTED_COMMAND => "aborted command",
        ffi::SG_LIB_CAT_MISCOMPARE => "miscompare",
        ffi::SG_LIB_FILE_ERROR => "file error",
        ffi::SG_LIB_CAT_MALFORMED => "malformed response",
        ffi::SG_LIB_CAT_SENSE => "sense data available",
        ffi::SG_LIB_CAT_OTHER => "other error",
        _ => "unknown status",
    }
}

impl Display for SgError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        match self {
            SgError::BufferOverrun {
                requested,
                provided,
            } => write!(
                f,
                "declared length {} exceeds buffer of {} bytes",
                requested, provided
            ),
            SgError::Os(e) => e.fmt(f),
            SgError::Status(status) => {
                write!(f, "{} (status {})", status_name(*status), status)
            }
        }
    }
}

impl std::error::Error for SgError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SgError::Os(e) => Some(e),
            _ => None,
        }
    }
}

/// The peripheral device type byte was not a code this crate knows.
#[derive(Debug, Clone)]
pub struct PeripheralTypeUnknownError(pub u8);

impl Display for PeripheralTypeUnknownError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        write!(f, "unknown peripheral device type {:#04x}", self.0)
    }
}

impl std::error::Error for PeripheralTypeUnknownError {}

/// The sense key nibble was a reserved value.
#[derive(Debug, Clone)]
pub struct SenseKeyUnknownError(pub u8);

impl Display for SenseKeyUnknownError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        write!(f, "unknown sense key {:#04x}", self.0)
    }
}

impl std::error::Error for SenseKeyUnknownError {}

/// Error when reading standard inquiry data from a device.
#[derive(Debug)]
pub enum InquiryError {
    Sg(SgError),
    Truncated(usize),
    PeripheralType(PeripheralTypeUnknownError),
}

impl Display for InquiryError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        match self {
            InquiryError::Sg(e) => e.fmt(f),
            InquiryError::Truncated(len) => {
                write!(f, "inquiry response truncated at {} bytes", len)
            }
            InquiryError::PeripheralType(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for InquiryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InquiryError::Sg(e) => Some(e),
            InquiryError::PeripheralType(e) => Some(e),
            InquiryError::Truncated(_) => None,
        }
    }
}

impl From<SgError> for InquiryError {
    fn from(error: SgError) -> Self {
        InquiryError::Sg(error)
    }
}

impl From<PeripheralTypeUnknownError> for InquiryError {
    fn from(error: PeripheralTypeUnknownError) -> Self {
        InquiryError::PeripheralType(error)
    }
}

/// Error when fetching or decoding sense data.
#[derive(Debug)]
pub enum SenseError {
    Sg(SgError),
    Truncated(usize),
    Format(u8),
    Key(SenseKeyUnknownError),
}

impl Display for SenseError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        match self {
            SenseError::Sg(e) => e.fmt(f),
            SenseError::Truncated(len) => {
                write!(f, "sense response truncated at {} bytes", len)
            }
            SenseError::Format(code) => {
                write!(f, "unexpected sense response code {:#04x}", code)
            }
            SenseError::Key(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for SenseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SenseError::Sg(e) => Some(e),
            SenseError::Key(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SgError> for SenseError {
    fn from(error: SgError) -> Self {
        SenseError::Sg(error)
    }
}

impl From<SenseKeyUnknownError> for SenseError {
    fn from(error: SenseKeyUnknownError) -> Self {
        SenseError::Key(error)
    }
}
