//! Batch processing of independent inputs
//!
//! Each input goes through its own parse → edit → serialize pipeline. Inputs
//! are shared read-only; every job builds its own container and output
//! buffer. A failing input is logged and reported in its slot without
//! stopping the rest of the batch. With the `parallel` feature the jobs run
//! on the rayon thread pool.

use crate::{asset::Asset, error::Result, formats::ContainerIO};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Run `edit` on every input and serialize the results
///
/// Results are returned in input order.
pub fn process_all<F>(inputs: &[&[u8]], edit: F) -> Vec<Result<Vec<u8>>>
where
    F: Fn(&mut Asset) -> Result<()> + Send + Sync,
{
    let job = |(index, input): (usize, &&[u8])| {
        let result = process_one(input, &edit);
        if let Err(e) = &result {
            log::warn!("input {} failed: {}", index, e);
        }
        result
    };

    #[cfg(feature = "parallel")]
    {
        inputs.par_iter().enumerate().map(job).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        inputs.iter().enumerate().map(job).collect()
    }
}

/// Embed the same ICC profile into every input
pub fn embed_icc_profile_all(inputs: &[&[u8]], profile: &[u8]) -> Vec<Result<Vec<u8>>> {
    process_all(inputs, |asset| asset.embed_icc_profile(profile))
}

/// Embed a built-in ICC profile into every input
#[cfg(feature = "icc-presets")]
pub fn embed_icc_preset_all(inputs: &[&[u8]], name: &str) -> Vec<Result<Vec<u8>>> {
    process_all(inputs, |asset| asset.embed_icc_preset(name))
}

fn process_one<F>(input: &[u8], edit: &F) -> Result<Vec<u8>>
where
    F: Fn(&mut Asset) -> Result<()>,
{
    let mut asset = Asset::parse(input)?;
    edit(&mut asset)?;
    asset.to_bytes()
}
