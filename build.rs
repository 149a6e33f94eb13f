//! Generates `consts.rs`, which pins the arena's inline slot count.
//!
//! `SCORES_MAX_STACK_ELEMS` picks the count at build time; unset builds
//! fall back to 256 slots. Values past 2048 are refused so a typo cannot
//! blow up the stack frames holding the arena inline.

use std::env;
use std::fs;
use std::path::PathBuf;

const DEFAULT_STACK_ELEMS: usize = 256;
const STACK_ELEMS_CEILING: usize = 2048;

fn main() {
    println!("cargo:rerun-if-env-changed=SCORES_MAX_STACK_ELEMS");

    let stack_elems = match env::var("SCORES_MAX_STACK_ELEMS") {
        Ok(raw) => raw
            .parse::<usize>()
            .expect("SCORES_MAX_STACK_ELEMS must be an unsigned integer"),
        Err(_) => {
            println!(
                "cargo:warning=SCORES_MAX_STACK_ELEMS not set, defaulting to {}",
                DEFAULT_STACK_ELEMS
            );
            DEFAULT_STACK_ELEMS
        }
    };
    assert!(
        stack_elems <= STACK_ELEMS_CEILING,
        "SCORES_MAX_STACK_ELEMS is capped at {}",
        STACK_ELEMS_CEILING
    );

    let mut out_path = PathBuf::from(env::var("OUT_DIR").expect("cargo always sets OUT_DIR"));
    out_path.push("consts.rs");
    fs::write(
        out_path,
        format!("const STACK_ELEMS: usize = {};\n", stack_elems),
    )
    .expect("cannot write consts.rs");
}
