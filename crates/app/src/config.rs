//! Configuration for the huffc command-line tool.
//!
//! Hand-rolled argument parsing with printable, reproducible defaults:
//! when compressing without an input file, a sample input is generated
//! from a seed (explicit via --seed, or time-based) so runs can be
//! replayed exactly.

use std::path::PathBuf;

/// Operating mode: which direction the codec runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Compress,
    Decompress,
}

/// Complete configuration for one codec run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Compress or decompress
    pub mode: Mode,

    /// Input file path (None = generate a sample, compress mode only)
    pub input_file: Option<PathBuf>,

    /// Output file path
    pub output_file: PathBuf,

    /// Seed for sample-input generation
    pub seed: u64,

    /// Size of the generated sample input
    pub sample_bytes: usize,

    /// Whether to print the frequency and code tables
    pub print_tables: bool,

    /// Whether to print the stats summary
    pub print_stats: bool,
}

impl Config {
    /// Parse configuration from command-line arguments.
    ///
    /// The first positional argument selects the mode (`compress` or
    /// `decompress`); everything else is flags.
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let mut mode: Option<Mode> = None;
        let mut input_file: Option<PathBuf> = None;
        let mut output_file: Option<PathBuf> = None;
        let mut seed: Option<u64> = None;
        let mut sample_bytes: Option<usize> = None;
        let mut print_tables = false;
        let mut print_stats = true;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "compress" | "c" => {
                    mode = Some(Mode::Compress);
                }
                "decompress" | "d" => {
                    mode = Some(Mode::Decompress);
                }
                "--in" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--in requires a path".to_string());
                    }
                    input_file = Some(PathBuf::from(&args[i]));
                }
                "--out" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--out requires a path".to_string());
                    }
                    output_file = Some(PathBuf::from(&args[i]));
                }
                "--seed" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--seed requires a number".to_string());
                    }
                    seed = Some(args[i].parse().map_err(|_| "invalid seed")?);
                }
                "--sample-bytes" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--sample-bytes requires a number".to_string());
                    }
                    sample_bytes = Some(args[i].parse().map_err(|_| "invalid sample-bytes")?);
                }
                "--print-tables" => {
                    print_tables = true;
                }
                "--no-stats" => {
                    print_stats = false;
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                _ => {
                    return Err(format!("unknown argument: {}", args[i]));
                }
            }
            i += 1;
        }

        let mode = mode.ok_or("missing mode: expected 'compress' or 'decompress'")?;

        if mode == Mode::Decompress && input_file.is_none() {
            return Err("decompress requires --in <PATH>".to_string());
        }

        // Explicit seed, or time-based for a fresh sample each run.
        let seed = seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|t| t.as_millis() as u64)
                .unwrap_or(0)
        });

        Ok(Config {
            mode,
            input_file,
            output_file: output_file.unwrap_or_else(|| {
                PathBuf::from(match mode {
                    Mode::Compress => "./out.huf",
                    Mode::Decompress => "./out.bin",
                })
            }),
            seed,
            sample_bytes: sample_bytes.unwrap_or(65536),
            print_tables,
            print_stats,
        })
    }

    /// Print the resolved configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        println!("Mode: {:?}", self.mode);
        println!(
            "Input file:  {}",
            self.input_file
                .as_ref()
                .and_then(|p| p.to_str())
                .unwrap_or("(generate sample)")
        );
        println!(
            "Output file: {}",
            self.output_file.to_str().unwrap_or("(non-utf8 path)")
        );
        if self.input_file.is_none() {
            println!("Seed: {}", self.seed);
            println!("Sample size: {} bytes", self.sample_bytes);
        }
        println!();
    }
}

fn print_help() {
    println!("huffc: static Huffman file compressor");
    println!();
    println!("USAGE:");
    println!("    huffc <compress|decompress> [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --in <PATH>            Input file (compress default: generate sample)");
    println!("    --out <PATH>           Output file (default: ./out.huf / ./out.bin)");
    println!("    --seed <N>             Seed for sample generation");
    println!("    --sample-bytes <N>     Generated sample size (default: 65536)");
    println!();
    println!("    --print-tables         Print the frequency and code tables");
    println!("    --no-stats             Don't print the stats summary");
    println!("    --help, -h             Print this help");
    println!();
    println!("EXAMPLES:");
    println!("    huffc compress --in file.txt --out file.huf");
    println!("    huffc decompress --in file.huf --out file.txt");
    println!("    huffc compress --seed 42 --print-tables   # reproducible sample");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_compress_defaults() {
        let config = Config::from_args(&args(&["compress", "--seed", "7"])).unwrap();
        assert_eq!(config.mode, Mode::Compress);
        assert!(config.input_file.is_none());
        assert_eq!(config.output_file, PathBuf::from("./out.huf"));
        assert_eq!(config.seed, 7);
        assert!(config.print_stats);
        assert!(!config.print_tables);
    }

    #[test]
    fn test_decompress_requires_input() {
        assert!(Config::from_args(&args(&["decompress"])).is_err());
        let config =
            Config::from_args(&args(&["decompress", "--in", "x.huf", "--out", "x.txt"])).unwrap();
        assert_eq!(config.input_file, Some(PathBuf::from("x.huf")));
        assert_eq!(config.output_file, PathBuf::from("x.txt"));
    }

    #[test]
    fn test_missing_mode_rejected() {
        assert!(Config::from_args(&args(&["--in", "x"])).is_err());
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Config::from_args(&args(&["compress", "--wat"])).is_err());
    }

    #[test]
    fn test_flag_missing_value_rejected() {
        assert!(Config::from_args(&args(&["compress", "--in"])).is_err());
        assert!(Config::from_args(&args(&["compress", "--seed"])).is_err());
    }
}
