//! Marshaling shim over libsgutils2.
//!
//! One safe function per wrapped native entry point. Each call validates the
//! declared buffer length against the slice actually provided, performs
//! exactly one native call, and converts the return code. Nothing is cached,
//! retried, or logged; `noisy` and `verbose` are always forwarded as 0 so
//! the library stays quiet and every error reaches the caller instead.

#[cfg(all(not(test), feature = "buildtime_bindgen"))]
#[allow(non_camel_case_types, dead_code)]
mod bindings {
    include!(concat!(env!("OUT_DIR"), "/bindings.rs"));
}

#[cfg(all(not(test), not(feature = "buildtime_bindgen")))]
mod bindings;

#[cfg(test)]
pub(crate) mod stub;

#[cfg(test)]
use self::stub as bindings;

use std::io;
use std::os::raw::{c_int, c_void};
use std::ptr;

use crate::errors::SgError;

/// Return-code categories from sg_lib.h. 0 is success, positive values are
/// sense categories, negative values are negated errno.
pub const SG_LIB_CAT_CLEAN: c_int = 0;
pub const SG_LIB_SYNTAX_ERROR: c_int = 1;
pub const SG_LIB_CAT_NOT_READY: c_int = 2;
pub const SG_LIB_CAT_MEDIUM_HARD: c_int = 3;
pub const SG_LIB_CAT_ILLEGAL_REQ: c_int = 5;
pub const SG_LIB_CAT_UNIT_ATTENTION: c_int = 6;
pub const SG_LIB_CAT_INVALID_OP: c_int = 9;
pub const SG_LIB_CAT_ABORTED_COMMAND: c_int = 11;
pub const SG_LIB_CAT_MISCOMPARE: c_int = 14;
pub const SG_LIB_FILE_ERROR: c_int = 15;
pub const SG_LIB_CAT_MALFORMED: c_int = 97;
pub const SG_LIB_CAT_SENSE: c_int = 98;
pub const SG_LIB_CAT_OTHER: c_int = 99;

/// The declared length must fit inside the provided slice and inside a
/// `c_int`, otherwise the native call would be handed a length it could use
/// to write past the buffer. Checked before any native call is attempted.
fn checked_len(buf: &[u8], declared_len: usize) -> Result<c_int, SgError> {
    if declared_len > buf.len() || declared_len > c_int::MAX as usize {
        return Err(SgError::BufferOverrun {
            requested: declared_len,
            provided: buf.len(),
        });
    }
    Ok(declared_len as c_int)
}

fn checked_status(ret: c_int) -> Result<(), SgError> {
    if ret == 0 {
        Ok(())
    } else if ret < 0 {
        Err(SgError::Os(io::Error::from_raw_os_error(-ret)))
    } else {
        Err(SgError::Status(ret))
    }
}

/// TEST UNIT READY. No data transfer; success means the unit is ready.
pub fn test_unit_ready(fd: c_int) -> Result<(), SgError> {
    let ret = unsafe { bindings::sg_ll_test_unit_ready(fd, 0, 0, 0) };
    checked_status(ret)
}

/// REQUEST SENSE into `resp[..mx_resp_len]`. `desc` selects descriptor
/// format; fixed format otherwise.
pub fn request_sense(
    fd: c_int,
    desc: bool,
    resp: &mut [u8],
    mx_resp_len: usize,
) -> Result<(), SgError> {
    let len = checked_len(resp, mx_resp_len)?;
    let ret = unsafe {
        bindings::sg_ll_request_sense(
            fd,
            desc as c_int,
            resp.as_mut_ptr() as *mut c_void,
            len,
            0,
            0,
        )
    };
    checked_status(ret)
}

/// INQUIRY into `resp[..mx_resp_len]`. `pg_op` is the VPD page when `evpd`
/// is set, or the operation code when `cmddt` is.
pub fn inquiry(
    fd: c_int,
    cmddt: bool,
    evpd: bool,
    pg_op: u8,
    resp: &mut [u8],
    mx_resp_len: usize,
) -> Result<(), SgError> {
    let len = checked_len(resp, mx_resp_len)?;
    let ret = unsafe {
        bindings::sg_ll_inquiry(
            fd,
            cmddt as c_int,
            evpd as c_int,
            pg_op as c_int,
            resp.as_mut_ptr() as *mut c_void,
            len,
            0,
            0,
        )
    };
    checked_status(ret)
}

/// READ CAPACITY(10) into `resp[..mx_resp_len]` (8 bytes of response data).
pub fn readcap_10(
    fd: c_int,
    pmi: bool,
    lba: u32,
    resp: &mut [u8],
    mx_resp_len: usize,
) -> Result<(), SgError> {
    let len = checked_len(resp, mx_resp_len)?;
    let ret = unsafe {
        bindings::sg_ll_readcap_10(
            fd,
            pmi as c_int,
            lba,
            resp.as_mut_ptr() as *mut c_void,
            len,
            0,
            0,
        )
    };
    checked_status(ret)
}

/// READ CAPACITY(16) into `resp[..mx_resp_len]` (32 bytes of response data).
pub fn readcap_16(
    fd: c_int,
    pmi: bool,
    llba: u64,
    resp: &mut [u8],
    mx_resp_len: usize,
) -> Result<(), SgError> {
    let len = checked_len(resp, mx_resp_len)?;
    let ret = unsafe {
        bindings::sg_ll_readcap_16(
            fd,
            pmi as c_int,
            llba,
            resp.as_mut_ptr() as *mut c_void,
            len,
            0,
            0,
        )
    };
    checked_status(ret)
}

/// SEND DIAGNOSTIC with `param[..param_len]` as the parameter list. The
/// bytes are handed to the library unmodified; an empty parameter list is
/// forwarded as a null pointer the way the sg3_utils tools do it.
pub fn send_diag(
    fd: c_int,
    sf_code: i32,
    pf_bit: bool,
    sf_bit: bool,
    devofl_bit: bool,
    unitofl_bit: bool,
    long_duration: bool,
    param: &[u8],
    param_len: usize,
) -> Result<(), SgError> {
    let len = checked_len(param, param_len)?;
    let paramp = if len == 0 {
        ptr::null_mut()
    } else {
        param.as_ptr() as *mut c_void
    };
    let ret = unsafe {
        bindings::sg_ll_send_diag(
            fd,
            sf_code as c_int,
            pf_bit as c_int,
            sf_bit as c_int,
            devofl_bit as c_int,
            unitofl_bit as c_int,
            long_duration as c_int,
            paramp,
            len,
            0,
            0,
        )
    };
    checked_status(ret)
}
