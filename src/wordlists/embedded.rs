//! Lists generated by `build.rs` from `data/`
//!
//! `ANSWERS` is the target pool; `ALLOWED` holds the extra words accepted as
//! guesses but never drawn as targets.

include!(concat!(env!("OUT_DIR"), "/answers.rs"));
include!(concat!(env!("OUT_DIR"), "/allowed.rs"));
