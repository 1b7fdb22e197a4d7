//! Decompress command implementation.

use crate::utils::default_decompressed_path;
use hashflate::{Lz77Config, Method};
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::info;

pub fn cmd_decompress(
    input: &Path,
    output: Option<&Path>,
    method: Method,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let artifact = fs::read(input)?;

    // Artifacts carry their own block layout; the configuration only
    // matters when compressing.
    let codec = method.codec(Lz77Config::DEFAULT)?;
    let output = output.map_or_else(|| default_decompressed_path(input), Path::to_path_buf);

    info!(input = %input.display(), method = %method, "decompressing");
    let start = Instant::now();
    let data = codec.decompress(&artifact)?;
    let elapsed = start.elapsed();

    fs::write(&output, &data)?;

    println!(
        "Decompressed {} -> {} ({})",
        input.display(),
        output.display(),
        method
    );
    if verbose {
        println!("  Compressed:   {} bytes", artifact.len());
        println!("  Decompressed: {} bytes", data.len());
        println!("  Time:         {:.3}s", elapsed.as_secs_f64());
    }

    Ok(())
}
