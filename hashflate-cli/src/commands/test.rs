//! Test command implementation.
//!
//! Round-trips a file through each method in memory and reports sizes and
//! timings; nothing is written to disk.

use crate::utils::{StatsReport, create_progress_bar, format_report};
use hashflate::{HashflateError, Lz77Config, Method, measure};
use std::fs;
use std::path::Path;

pub fn cmd_test(
    input: &Path,
    methods: &[Method],
    config: Lz77Config,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    if data.is_empty() {
        return Err(HashflateError::EmptyInput.into());
    }

    let methods = if methods.is_empty() {
        Method::ALL.to_vec()
    } else {
        methods.to_vec()
    };

    let pb = create_progress_bar(methods.len() as u64, !json);
    let mut results = Vec::with_capacity(methods.len());

    for &method in &methods {
        pb.set_message(method.to_string());
        let codec = method.codec(config)?;
        let stats = match measure(&codec, &data) {
            Ok(stats) => stats,
            Err(e) => {
                pb.abandon_with_message(format!("{method} failed"));
                return Err(e.into());
            }
        };
        results.push(stats);
        pb.inc(1);
    }
    pb.finish_and_clear();

    if json {
        let reports: Vec<StatsReport> = results.iter().map(StatsReport::from).collect();
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    println!("Testing {} ({} bytes)", input.display(), data.len());
    for stats in &results {
        println!();
        println!("{}", format_report(stats));
    }
    println!();
    println!("All {} methods round-tripped OK", results.len());

    Ok(())
}
