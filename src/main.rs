// gbs2gb - Converts GBS music rips into playable Game Boy cartridge images
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! gbs2gb CLI
//!
//! Converts GBS music rips into Game Boy cartridge images.

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use gbs2gb::cartridge::{verify_header_checksum, RomInfo};
use gbs2gb::error::format_error;
use gbs2gb::output::{is_gbs_path, read_rom};
use gbs2gb::player::{FilePlayer, PlayerSource, DEFAULT_PLAYER_FILE};
use gbs2gb::ConvertedFile;

/// gbs2gb - Turn GBS music rips into playable Game Boy cartridges
#[derive(Parser, Debug)]
#[command(name = "gbs2gb")]
#[command(version)]
#[command(about = "Converts GBS music rips into Game Boy cartridge images")]
#[command(long_about = r#"
gbs2gb embeds a GBS music rip together with a small player program into a
Game Boy cartridge image that runs on real hardware and in emulators.

Each input file is converted on its own. The output keeps the input's file
name with a .gb extension.

Example usage:
  gbs2gb "Pokemon Red.gbs"
  gbs2gb *.gbs -o roms/
  gbs2gb song.gbs --player GBSPlay103_Mod.gb -v
"#)]
struct Cli {
    /// GBS files to convert (.gbs)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output directory (created if missing)
    #[arg(short, long, default_value = "./")]
    outdir: PathBuf,

    /// Player ROM embedded at the start of every image
    #[arg(short, long, env = "GBS2GB_PLAYER", default_value = DEFAULT_PLAYER_FILE)]
    player: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Log level (overrides --verbose; RUST_LOG takes precedence)
    #[arg(long)]
    log_level: Option<Level>,

    /// Read every written image back and print its cartridge header
    #[arg(short, long)]
    check: bool,
}

fn init_tracing(cli: &Cli) {
    let level = cli.log_level.unwrap_or(if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    });

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();

    // A subscriber can only be installed once per process.
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    if cli.verbose {
        println!("gbs2gb v{}", gbs2gb::VERSION);
        println!("Player: {}", cli.player.display());
        println!("Output directory: {}", cli.outdir.display());
        println!("Input files:");
        for file in &cli.inputs {
            println!("  - {}", file.display());
        }
        println!();
    }

    if let Err(e) = std::fs::create_dir_all(&cli.outdir) {
        eprintln!(
            "Error: Cannot create output directory {}: {}",
            cli.outdir.display(),
            e
        );
        return ExitCode::from(2);
    }

    let player = match FilePlayer::new(&cli.player).load() {
        Ok(player) => player,
        Err(e) => {
            eprint!("{}", format_error(&e, Some(&cli.player.display().to_string())));
            return ExitCode::from(3);
        }
    };

    let mut failed = 0usize;

    for input in &cli.inputs {
        let filename = input.display().to_string();

        if !is_gbs_path(input) {
            tracing::warn!("{} does not have a .gbs extension", filename);
        }

        if cli.verbose {
            println!("Converting {}...", filename);
        }

        match gbs2gb::convert_file(input, &cli.outdir, &player) {
            Ok(converted) => {
                if cli.verbose {
                    print_report(&converted);
                }
                println!(
                    "Converted {} -> {}",
                    file_name(&converted.input),
                    converted.output.display()
                );
                if cli.check && !check_output(&converted.output) {
                    failed += 1;
                }
            }
            Err(e) => {
                eprint!("{}", format_error(&e, Some(&filename)));
                failed += 1;
            }
        }
    }

    if failed > 0 {
        eprintln!(
            "{} of {} file(s) failed to convert",
            failed,
            cli.inputs.len()
        );
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned()
}

fn print_report(converted: &ConvertedFile) {
    let report = &converted.report;
    println!("  Title:        {}", report.header.title());
    println!("  Author:       {}", report.header.author());
    println!("  Copyright:    {}", report.header.copyright());
    println!("  Songs:        {}", report.header.song_count);
    println!("  Load Address: 0x{:04X}", report.header.load_address);
    println!(
        "  Cartridge:    type {} / size code {} ({} bytes)",
        report.rom_size.cartridge_type(),
        report.rom_size.code,
        report.rom_size.bytes
    );
}

/// Print the cartridge header of a written image. Returns false if the image
/// cannot be read or its header checksum is wrong.
fn check_output(path: &Path) -> bool {
    let image = match read_rom(path) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("Error: Cannot read {}: {}", path.display(), e);
            return false;
        }
    };

    let (Some(info), Some(header_ok)) = (RomInfo::read(&image), verify_header_checksum(&image))
    else {
        eprintln!("Error: {} is too short for a cartridge header", path.display());
        return false;
    };

    println!("  Title:           {}", info.title);
    println!("  Cartridge Type:  0x{:02X}", info.cartridge_type);
    println!("  ROM Size:        0x{:02X}", info.rom_size_code);
    println!(
        "  Header Checksum: 0x{:02X} ({})",
        info.header_checksum,
        if header_ok { "ok" } else { "MISMATCH" }
    );
    println!("  Global Checksum: 0x{:04X}", info.global_checksum);

    header_ok
}
