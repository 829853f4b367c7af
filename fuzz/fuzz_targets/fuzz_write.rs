#![no_main]

use libfuzzer_sys::fuzz_target;
use segment_io::{Asset, ContainerIO};

fuzz_target!(|data: &[u8]| {
    // Split input into an image and a profile
    let split = data.first().copied().unwrap_or(0) as usize;
    let rest = data.get(1..).unwrap_or(&[]);
    let (profile, image) = rest.split_at(split.min(rest.len()));

    if let Ok(mut asset) = Asset::parse(image) {
        if asset.embed_icc_profile(profile).is_ok() {
            let output = asset.to_bytes().expect("edited asset must serialize");

            // The edited output must parse again and carry the profile
            let reparsed = Asset::parse(&output).expect("edited output must parse");
            if let Some(jpeg) = reparsed.as_jpeg() {
                assert_eq!(jpeg.icc_profile().as_deref(), Some(profile));
            }
        }
    }
});
