#![no_main]

use libfuzzer_sys::fuzz_target;
use segment_io::{Asset, ContainerIO};

fuzz_target!(|data: &[u8]| {
    // Parsing arbitrary input should NEVER panic, only return errors
    if let Ok(asset) = Asset::parse(data) {
        let _ = asset.container();

        // Whatever parsed must serialize back to the bytes it came from
        let output = asset.to_bytes().expect("unedited asset must serialize");
        assert_eq!(output.as_slice(), data);
    }
});
