//! Compress command implementation.

use crate::utils::default_compressed_path;
use hashflate::{HashflateError, Lz77Config, Method};
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::info;

pub fn cmd_compress(
    input: &Path,
    output: Option<&Path>,
    method: Method,
    config: Lz77Config,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    if data.is_empty() {
        return Err(HashflateError::EmptyInput.into());
    }

    let codec = method.codec(config)?;
    let output = output.map_or_else(|| default_compressed_path(input), Path::to_path_buf);

    info!(input = %input.display(), method = %method, "compressing");
    let start = Instant::now();
    let artifact = codec.compress(&data)?;
    let elapsed = start.elapsed();

    fs::write(&output, &artifact)?;

    println!(
        "Compressed {} -> {} ({})",
        input.display(),
        output.display(),
        method
    );
    if verbose {
        println!("  Original:   {} bytes", data.len());
        println!("  Compressed: {} bytes", artifact.len());
        println!(
            "  Ratio:      {:.2}",
            data.len() as f64 / artifact.len() as f64
        );
        if method.uses_lz77() {
            println!(
                "  Window:     {} bytes, lookahead {}, {} blocks",
                config.search_buffer_size, config.lookahead_buffer_size, config.block_count
            );
        }
        println!("  Time:       {:.3}s", elapsed.as_secs_f64());
    }

    Ok(())
}
