use std::env;

fn main() {
    println!("cargo:rerun-if-env-changed=SGUTILS2_LIB_DIR");
    if let Ok(dir) = env::var("SGUTILS2_LIB_DIR") {
        println!("cargo:rustc-link-search=native={}", dir);
    }

    #[cfg(feature = "buildtime_bindgen")]
    generate_bindings();
}

/// Regenerate the extern declarations from the installed sg3_utils headers.
/// The default build uses the checked-in declarations in src/ffi/bindings.rs,
/// which carry the link attribute themselves, so the link directive is only
/// emitted here.
#[cfg(feature = "buildtime_bindgen")]
fn generate_bindings() {
    use std::path::PathBuf;

    println!("cargo:rustc-link-lib=dylib=sgutils2");

    let bindings = bindgen::Builder::default()
        .header_contents(
            "wrapper.h",
            "#include <scsi/sg_lib.h>\n#include <scsi/sg_cmds.h>\n",
        )
        .whitelist_function("sg_ll_.*")
        .generate()
        .expect("running bindgen against the sg3_utils headers failed");

    let out = PathBuf::from(env::var("OUT_DIR").unwrap()).join("bindings.rs");
    bindings
        .write_to_file(&out)
        .expect("could not write generated sgutils2 bindings");
}
