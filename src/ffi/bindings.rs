//! Extern declarations for the wrapped libsgutils2 entry points.
//!
//! Checked in so the crate builds without the sg3_utils headers installed;
//! enable the `buildtime_bindgen` feature to regenerate them from
//! `<scsi/sg_cmds.h>` instead.

use std::os::raw::{c_int, c_uint, c_void};

#[link(name = "sgutils2")]
extern "C" {
    pub fn sg_ll_test_unit_ready(
        sg_fd: c_int,
        pack_id: c_int,
        noisy: c_int,
        verbose: c_int,
    ) -> c_int;

    pub fn sg_ll_request_sense(
        sg_fd: c_int,
        desc: c_int,
        resp: *mut c_void,
        mx_resp_len: c_int,
        noisy: c_int,
        verbose: c_int,
    ) -> c_int;

    pub fn sg_ll_inquiry(
        sg_fd: c_int,
        cmddt: c_int,
        evpd: c_int,
        pg_op: c_int,
        resp: *mut c_void,
        mx_resp_len: c_int,
        noisy: c_int,
        verbose: c_int,
    ) -> c_int;

    pub fn sg_ll_readcap_10(
        sg_fd: c_int,
        pmi: c_int,
        lba: c_uint,
        resp: *mut c_void,
        mx_resp_len: c_int,
        noisy: c_int,
        verbose: c_int,
    ) -> c_int;

    pub fn sg_ll_readcap_16(
        sg_fd: c_int,
        pmi: c_int,
        llba: u64,
        resp: *mut c_void,
        mx_resp_len: c_int,
        noisy: c_int,
        verbose: c_int,
    ) -> c_int;

    pub fn sg_ll_send_diag(
        sg_fd: c_int,
        sf_code: c_int,
        pf_bit: c_int,
        sf_bit: c_int,
        devofl_bit: c_int,
        unitofl_bit: c_int,
        long_duration: c_int,
        paramp: *mut c_void,
        param_len: c_int,
        noisy: c_int,
        verbose: c_int,
    ) -> c_int;
}
