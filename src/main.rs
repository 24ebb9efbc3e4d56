//! gdsave CLI - Command-line tool for Geometry Dash save files.
//!
//! This is the main entry point for the gdsave command-line application.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use gdsave::convert;
use gdsave::prelude::*;

/// gdsave - Geometry Dash save file decoder and encoder
#[derive(Parser)]
#[command(name = "gdsave")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode save files to markup or JSON
    Decrypt {
        /// Save files to decode
        #[arg(required = true, env = "GDSAVE_INPUT", value_delimiter = ',')]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, env = "GDSAVE_OUTPUT", default_value = ".")]
        output: PathBuf,

        /// Output format: xml, pxml, json or rjson
        #[arg(short, long, default_value = "xml")]
        format: OutputFormat,

        /// Reject files whose first key is not a known save key
        #[arg(long)]
        strict: bool,
    },

    /// Encode markup back into a save file
    Encrypt {
        /// Markup file to encode
        #[arg(env = "GDSAVE_INPUT")]
        input: PathBuf,

        /// Output save file
        #[arg(short, long, env = "GDSAVE_OUTPUT")]
        output: PathBuf,

        /// Target client: classic or block-cipher (macOS)
        #[arg(short, long, env = "GDSAVE_VARIANT", default_value = "classic")]
        variant: Variant,
    },

    /// Show what a save file holds
    Info {
        /// Save file to inspect
        #[arg(env = "GDSAVE_INPUT")]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Decrypt {
            inputs,
            output,
            format,
            strict,
        } => {
            let strictness = if strict {
                Strictness::Fingerprint
            } else {
                Strictness::Lenient
            };
            cmd_decrypt(&inputs, &output, format, strictness)?;
        }
        Commands::Encrypt {
            input,
            output,
            variant,
        } => {
            cmd_encrypt(&input, &output, variant)?;
        }
        Commands::Info { input } => {
            cmd_info(&input)?;
        }
    }

    Ok(())
}

fn cmd_decrypt(
    inputs: &[PathBuf],
    output: &Path,
    format: OutputFormat,
    strictness: Strictness,
) -> Result<()> {
    println!("Decoding {} save files as {}...", inputs.len(), format);

    let output_paths = output_paths(inputs, output, format)?;
    fs::create_dir_all(output).context("Failed to create output directory")?;

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let results: Vec<(&PathBuf, Result<&PathBuf>)> = inputs
        .par_iter()
        .zip(output_paths.par_iter())
        .map(|(input, output_path)| {
            let result = decrypt_file(input, output_path, format, strictness)
                .map(|()| output_path);
            pb.inc(1);
            (input, result)
        })
        .collect();

    pb.finish_with_message("Done");

    let mut errors = 0;
    for (input, result) in &results {
        match result {
            Ok(path) => log::info!("{} -> {}", input.display(), path.display()),
            Err(e) => {
                eprintln!("Error decoding {}: {:#}", input.display(), e);
                errors += 1;
            }
        }
    }

    println!(
        "Decoded {} files in {:?} ({} errors)",
        results.len() - errors,
        start.elapsed(),
        errors
    );

    if errors > 0 {
        anyhow::bail!("{} of {} files could not be decoded", errors, results.len());
    }

    Ok(())
}

/// Output file for each input: the input's file name with the format's
/// extension, inside `output`. Two inputs may not map to the same file.
fn output_paths(inputs: &[PathBuf], output: &Path, format: OutputFormat) -> Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();

    inputs
        .iter()
        .map(|input| {
            let name = input
                .file_name()
                .with_context(|| format!("{} has no file name", input.display()))?;

            let mut path = output.join(name);
            path.set_extension(format.extension());

            if !seen.insert(path.clone()) {
                anyhow::bail!(
                    "{} would overwrite the output of another input ({})",
                    input.display(),
                    path.display()
                );
            }
            Ok(path)
        })
        .collect()
}

fn decrypt_file(
    input: &Path,
    output_path: &Path,
    format: OutputFormat,
    strictness: Strictness,
) -> Result<()> {
    let raw = fs::read(input).context("Failed to read input file")?;
    let text = convert::decode(&raw, format, strictness).context("Failed to decode save")?;
    fs::write(output_path, text).context("Failed to write output file")?;

    Ok(())
}

fn cmd_encrypt(input: &Path, output: &Path, variant: Variant) -> Result<()> {
    println!("Encoding ({}): {} -> {}", variant, input.display(), output.display());

    let markup = fs::read_to_string(input).context("Failed to read input file")?;
    let encoded = convert::encode_markup(&markup, variant).context("Failed to encode save")?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, &encoded).context("Failed to write output file")?;

    println!("Wrote {} bytes", encoded.len());

    Ok(())
}

fn cmd_info(input: &Path) -> Result<()> {
    let raw = fs::read(input).context("Failed to read input file")?;
    let info = convert::inspect(&raw).context("Failed to decode save")?;

    match info.variant {
        Some(variant) => println!("Variant:     {}", variant),
        None => println!("Variant:     already decoded"),
    }
    println!("Encoded:     {} bytes", info.encoded_len);
    println!("Decoded:     {} bytes", info.plaintext_len);
    println!("Fingerprint: {}", if info.fingerprint { "yes" } else { "no" });
    println!("Top-level keys ({}):", info.top_level_keys.len());

    for key in &info.top_level_keys {
        println!("  {}", key);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_paths_keep_file_name() {
        let inputs = vec![
            PathBuf::from("saves/CCGameManager.dat"),
            PathBuf::from("saves/CCGameManager.backup.dat"),
            PathBuf::from("CCLocalLevels"),
        ];

        let paths = output_paths(&inputs, Path::new("out"), OutputFormat::Json).unwrap();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("out/CCGameManager.json"),
                PathBuf::from("out/CCGameManager.backup.json"),
                PathBuf::from("out/CCLocalLevels.json"),
            ]
        );
    }

    #[test]
    fn test_output_paths_collision() {
        let inputs = vec![
            PathBuf::from("pc/CCGameManager.dat"),
            PathBuf::from("mac/CCGameManager.dat"),
        ];
        assert!(output_paths(&inputs, Path::new("out"), OutputFormat::Xml).is_err());

        let inputs = vec![
            PathBuf::from("CCGameManager.dat"),
            PathBuf::from("CCGameManager.dat2"),
        ];
        assert!(output_paths(&inputs, Path::new("out"), OutputFormat::Xml).is_err());
    }

    #[test]
    fn test_output_paths_need_file_name() {
        let inputs = vec![PathBuf::from("..")];
        assert!(output_paths(&inputs, Path::new("out"), OutputFormat::Xml).is_err());
    }
}
