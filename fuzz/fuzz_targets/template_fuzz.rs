//! Template parser fuzz target: feed arbitrary bytes to the document parser.
//! The parser must not panic; it returns Ok(Template) or Err(TemplateError).
//! Build with: cargo fuzz run template_fuzz (requires nightly and cargo fuzz).

#![cfg_attr(fuzzing, no_main)]

#[cfg(fuzzing)]
use libfuzzer_sys::fuzz_target;

#[cfg(fuzzing)]
fuzz_target!(|data: &[u8]| {
    let s = match std::str::from_utf8(data) {
        Ok(x) => x,
        Err(_) => return,
    };
    let _ = bitscope::template::parse(s);
});

#[cfg(not(fuzzing))]
fn main() {
    eprintln!("Build with: cargo fuzz run template_fuzz");
}
