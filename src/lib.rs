//! Rust binding for sg3_utils' libsgutils2.
//!
//! A thin shim over the `sg_ll_*` entry points of the externally built
//! `sgutils2` shared library. The [`ffi`] module forwards one native call
//! per invocation, checking only what is needed to keep marshaling safe;
//! [`SgDevice`] adds an owned device handle and typed decoding of the
//! response buffers. SCSI semantics, sense handling, and transport all stay
//! in the native library.
//!
//! Nothing is retried, cached, or logged here: every native status code
//! reaches the caller unchanged.

mod device;
pub mod errors;
pub mod ffi;

pub use crate::device::Capacity;
pub use crate::device::Capacity16;
pub use crate::device::InquiryData;
pub use crate::device::PeripheralDeviceType;
pub use crate::device::SenseData;
pub use crate::device::SenseKey;
pub use crate::device::SgDevice;
pub use crate::errors::InquiryError;
pub use crate::errors::SenseError;
pub use crate::errors::SgError;
