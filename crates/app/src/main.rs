//! huffc: command-line front end for the static Huffman codec.
//!
//! Thin I/O glue around `huffc-core`: selects compress or decompress,
//! reads the whole input into memory, runs the codec, writes the result,
//! and prints stats and optional table dumps. All codec errors surface on
//! stderr with a nonzero exit.

mod config;
mod input_gen;

use config::{Config, Mode};
use huffc_core::code::CodeTable;
use huffc_core::container;
use huffc_core::freq::FrequencyTable;
use huffc_core::stats::{format_code_table, format_frequency_table, CodecStats};
use huffc_core::tree::build_tree;
use huffc_core::{compress, decompress, Result};
use std::fs;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("huffc: {message}");
            eprintln!("try 'huffc --help'");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(&config) {
        eprintln!("huffc: {err}");
        std::process::exit(1);
    }
}

fn run(config: &Config) -> Result<()> {
    config.print();

    match config.mode {
        Mode::Compress => run_compress(config),
        Mode::Decompress => run_decompress(config),
    }
}

fn run_compress(config: &Config) -> Result<()> {
    let input = match &config.input_file {
        Some(path) => fs::read(path)?,
        None => {
            println!(
                "generating {} sample bytes (seed {})",
                config.sample_bytes, config.seed
            );
            input_gen::generate_sample_data(config.seed, config.sample_bytes)
        }
    };

    let mut stats = CodecStats::new();

    let container = compress(&input)?;
    // The pipeline already ran once inside compress; the header carries
    // everything the stats need.
    let info = container::inspect(&container)?;
    stats.input_bytes = input.len() as u64;
    stats.container_bytes = container.len() as u64;
    stats.distinct_symbols = info.symbol_count as usize;
    stats.payload_bits = info.payload_bit_count;

    if config.print_tables {
        let freqs = FrequencyTable::from_bytes(&input);
        if let Some(root) = build_tree(&freqs)? {
            let codes = CodeTable::from_tree(&root)?;
            println!("=== Frequency Table ===");
            print!("{}", format_frequency_table(&freqs));
            println!("=== Code Table ===");
            print!("{}", format_code_table(&codes));
            println!();
        }
    }
    stats.complete();

    fs::write(&config.output_file, &container)?;
    println!("wrote {} ({} bytes)", config.output_file.display(), container.len());

    if config.print_stats {
        stats.print_summary();
    }
    Ok(())
}

fn run_decompress(config: &Config) -> Result<()> {
    let container = match &config.input_file {
        Some(path) => fs::read(path)?,
        // Config::from_args rejects decompress without --in.
        None => unreachable!("decompress mode always has an input file"),
    };

    let mut stats = CodecStats::new();
    let output = decompress(&container)?;
    stats.input_bytes = output.len() as u64;
    stats.container_bytes = container.len() as u64;

    let freqs = FrequencyTable::from_bytes(&output);
    stats.distinct_symbols = freqs.distinct_symbols();
    if config.print_tables && !freqs.is_empty() {
        println!("=== Frequency Table ===");
        print!("{}", format_frequency_table(&freqs));
        println!();
    }
    stats.complete();

    fs::write(&config.output_file, &output)?;
    println!("wrote {} ({} bytes)", config.output_file.display(), output.len());

    if config.print_stats {
        stats.print_summary();
    }
    Ok(())
}
