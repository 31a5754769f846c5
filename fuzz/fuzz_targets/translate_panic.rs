#![no_main]
use libfuzzer_sys::fuzz_target;
use std::convert::Infallible;
use texmd_translate::{DocumentTranslator, TocMode};

fuzz_target!(|data: &[u8]| {
    // Depth errors are fine, panics are not.
    let s = String::from_utf8_lossy(data);
    for mode in [TocMode::None, TocMode::Linear, TocMode::Tabulated] {
        let _ = DocumentTranslator::new(mode)
            .translate(&s, |_: &str| Ok::<_, Infallible>(String::from("assets/formula-1.svg")));
    }
});
