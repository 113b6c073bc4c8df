//! Test stand-in for the native library.
//!
//! Compiled instead of the extern declarations under `cfg(test)`, with the
//! same names and signatures, so the shim's unit tests run without
//! libsgutils2 installed and without touching a real device. State is thread
//! local: every test thread scripts and observes only its own calls.

use std::cell::RefCell;
use std::os::raw::{c_int, c_uint, c_void};
use std::slice;

/// One recorded native call: scalar arguments in declaration order between
/// the fd and the buffer pointer, plus any parameter bytes handed in.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub name: &'static str,
    pub fd: c_int,
    pub args: Vec<i64>,
    pub param: Vec<u8>,
    pub mx_resp_len: c_int,
}

thread_local! {
    static CALLS: RefCell<Vec<Call>> = RefCell::new(Vec::new());
    static RETURN: RefCell<c_int> = RefCell::new(0);
    static RESPONSE: RefCell<Vec<u8>> = RefCell::new(Vec::new());
}

pub fn reset() {
    CALLS.with(|c| c.borrow_mut().clear());
    RETURN.with(|r| *r.borrow_mut() = 0);
    RESPONSE.with(|r| r.borrow_mut().clear());
}

/// Script the return code of every following call on this thread.
pub fn set_return(ret: c_int) {
    RETURN.with(|r| *r.borrow_mut() = ret);
}

/// Script the bytes copied into the response buffer of every following call
/// on this thread, truncated to the declared response length.
pub fn set_response(bytes: &[u8]) {
    RESPONSE.with(|r| *r.borrow_mut() = bytes.to_vec());
}

pub fn calls() -> Vec<Call> {
    CALLS.with(|c| c.borrow().clone())
}

pub fn call_count() -> usize {
    CALLS.with(|c| c.borrow().len())
}

fn record(call: Call) -> c_int {
    CALLS.with(|c| c.borrow_mut().push(call));
    RETURN.with(|r| *r.borrow())
}

unsafe fn fill_response(resp: *mut c_void, mx_resp_len: c_int) {
    if resp.is_null() || mx_resp_len <= 0 {
        return;
    }
    let buf = slice::from_raw_parts_mut(resp as *mut u8, mx_resp_len as usize);
    RESPONSE.with(|r| {
        let scripted = r.borrow();
        let n = scripted.len().min(buf.len());
        buf[..n].copy_from_slice(&scripted[..n]);
    });
}

pub unsafe fn sg_ll_test_unit_ready(
    sg_fd: c_int,
    pack_id: c_int,
    _noisy: c_int,
    _verbose: c_int,
) -> c_int {
    record(Call {
        name: "sg_ll_test_unit_ready",
        fd: sg_fd,
        args: vec![pack_id as i64],
        param: Vec::new(),
        mx_resp_len: 0,
    })
}

pub unsafe fn sg_ll_request_sense(
    sg_fd: c_int,
    desc: c_int,
    resp: *mut c_void,
    mx_resp_len: c_int,
    _noisy: c_int,
    _verbose: c_int,
) -> c_int {
    fill_response(resp, mx_resp_len);
    record(Call {
        name: "sg_ll_request_sense",
        fd: sg_fd,
        args: vec![desc as i64],
        param: Vec::new(),
        mx_resp_len,
    })
}

pub unsafe fn sg_ll_inquiry(
    sg_fd: c_int,
    cmddt: c_int,
    evpd: c_int,
    pg_op: c_int,
    resp: *mut c_void,
    mx_resp_len: c_int,
    _noisy: c_int,
    _verbose: c_int,
) -> c_int {
    fill_response(resp, mx_resp_len);
    record(Call {
        name: "sg_ll_inquiry",
        fd: sg_fd,
        args: vec![cmddt as i64, evpd as i64, pg_op as i64],
        param: Vec::new(),
        mx_resp_len,
    })
}

pub unsafe fn sg_ll_readcap_10(
    sg_fd: c_int,
    pmi: c_int,
    lba: c_uint,
    resp: *mut c_void,
    mx_resp_len: c_int,
    _noisy: c_int,
    _verbose: c_int,
) -> c_int {
    fill_response(resp, mx_resp_len);
    record(Call {
        name: "sg_ll_readcap_10",
        fd: sg_fd,
        args: vec![pmi as i64, lba as i64],
        param: Vec::new(),
        mx_resp_len,
    })
}

pub unsafe fn sg_ll_readcap_16(
    sg_fd: c_int,
    pmi: c_int,
    llba: u64,
    resp: *mut c_void,
    mx_resp_len: c_int,
    _noisy: c_int,
    _verbose: c_int,
) -> c_int {
    fill_response(resp, mx_resp_len);
    record(Call {
        name: "sg_ll_readcap_16",
        fd: sg_fd,
        args: vec![pmi as i64, llba as i64],
        param: Vec::new(),
        mx_resp_len,
    })
}

pub unsafe fn sg_ll_send_diag(
    sg_fd: c_int,
    sf_code: c_int,
    pf_bit: c_int,
    sf_bit: c_int,
    devofl_bit: c_int,
    unitofl_bit: c_int,
    long_duration: c_int,
    paramp: *mut c_void,
    param_len: c_int,
    _noisy: c_int,
    _verbose: c_int,
) -> c_int {
    let param = if paramp.is_null() || param_len <= 0 {
        Vec::new()
    } else {
        slice::from_raw_parts(paramp as *const u8, param_len as usize).to_vec()
    };
    record(Call {
        name: "sg_ll_send_diag",
        fd: sg_fd,
        args: vec![
            sf_code as i64,
            pf_bit as i64,
            sf_bit as i64,
            devofl_bit as i64,
            unitofl_bit as i64,
            long_duration as i64,
            param_len as i64,
        ],
        param,
        mx_resp_len: 0,
    })
}
