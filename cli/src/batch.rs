//! Filesystem batch mode: one image in, a directory of cut-outs out

use shapes::{Pipeline, ShapeDescriptor, ShapeError};
use std::path::Path;
use tracing::info;

use crate::ShapeCliError;

/// Segment the image at `input` and write the results into `output_dir`.
///
/// The image is fully processed before the output directory is touched, so a
/// failed run leaves previous output in place.
pub fn run_batch(
    pipeline: &Pipeline,
    input: &Path,
    output_dir: &Path,
) -> Result<Vec<ShapeDescriptor>, ShapeCliError> {
    info!(input = %input.display(), "{}", pipeline.info());

    let image = image::open(input).map_err(|e| {
        ShapeError::InvalidInput(format!("could not load {}: {e}", input.display()))
    })?;

    let result = pipeline.process(&image)?;
    let descriptors = result.write_to_dir(output_dir)?;

    info!(
        shapes = descriptors.len(),
        output_dir = %output_dir.display(),
        "batch extraction finished"
    );
    Ok(descriptors)
}
