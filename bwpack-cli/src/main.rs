//! bwpack CLI - block compression from the command line.
//!
//! Compresses or expands a single file with either the plain Huffman codec
//! or the full Burrows-Wheeler pipeline:
//!
//! ```text
//! bwpack huffman compress notes.txt notes.bwp
//! bwpack b x notes.bwp restored/
//! ```
//!
//! When the output path is a directory, the input file name is appended to
//! it.

use bwpack_codec::{BlockCodec, BurrowsWheelerCompressor, HuffmanCompressor};
use bwpack_core::Result;
use clap::{Parser, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "bwpack")]
#[command(
    author,
    version,
    about = "Block compressor built on Burrows-Wheeler, Move-to-Front, and Huffman coding"
)]
struct Cli {
    /// Compression algorithm
    #[arg(value_enum)]
    algo: Algo,

    /// Operation to perform
    #[arg(value_enum)]
    mode: Mode,

    /// Input file
    input: PathBuf,

    /// Output file, or a directory to place it in
    output: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Algo {
    /// Huffman coding only
    #[value(alias = "h")]
    Huffman,
    /// Burrows-Wheeler, Move-to-Front, then Huffman
    #[value(alias = "b")]
    BurrowsWheeler,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    /// Compress the input block
    #[value(alias = "c")]
    Compress,
    /// Expand a previously compressed block
    #[value(alias = "x")]
    Expand,
}

/// A directory output resolves to `DIR/<input file name>`.
fn resolve_output(output: &Path, input: &Path) -> PathBuf {
    match input.file_name() {
        Some(name) if output.is_dir() => output.join(name),
        _ => output.to_path_buf(),
    }
}

fn run(cli: &Cli) -> Result<()> {
    let input = fs::read(&cli.input)?;

    let codec: &dyn BlockCodec = match cli.algo {
        Algo::Huffman => &HuffmanCompressor,
        Algo::BurrowsWheeler => &BurrowsWheelerCompressor,
    };

    let output = match cli.mode {
        Mode::Compress => codec.compress(&input)?,
        Mode::Expand => codec.expand(&input)?,
    };

    let out_path = resolve_output(&cli.output, &cli.input);
    fs::write(&out_path, &output)?;

    println!(
        "{} -> {} ({} bytes in, {} bytes out)",
        cli.input.display(),
        out_path.display(),
        input.len(),
        output.len()
    );
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("bwpack: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_output_plain_file() {
        let out = resolve_output(Path::new("out.bwp"), Path::new("in.txt"));
        assert_eq!(out, PathBuf::from("out.bwp"));
    }

    #[test]
    fn test_resolve_output_directory() {
        let dir = std::env::temp_dir();
        let out = resolve_output(&dir, Path::new("in.txt"));
        assert_eq!(out, dir.join("in.txt"));
    }

    #[test]
    fn test_cli_parses_aliases() {
        let cli = Cli::try_parse_from(["bwpack", "b", "c", "in.txt", "out.bwp"]).unwrap();
        assert!(matches!(cli.algo, Algo::BurrowsWheeler));
        assert!(matches!(cli.mode, Mode::Compress));
    }
}
