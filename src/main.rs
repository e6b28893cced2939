//! nesscope CLI - render captured video memory and disassemble raw PRG data

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use nesscope::raster::RasterImage;
use nesscope::trace::{self, TraceSink, WriterSink};
use nesscope::video::palette::{PaletteTable, Rgb, SystemPalette};
use nesscope::video::{ObjectMemory, VramSnapshot, nametable, pattern, sprite};
use tracing_subscriber::filter::LevelFilter;

/// NES trace and video memory inspection tool
#[derive(Parser, Debug)]
#[command(name = "nesscope")]
#[command(about = "Inspect NES video memory snapshots and 6502 code", long_about = None)]
struct Args {
    /// Log more detail to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a 16 KiB VRAM dump (and optionally a 256-byte OAM dump) to images
    Render {
        /// Path to the raw VRAM snapshot ($0000-$3FFF)
        #[arg(long)]
        vram: PathBuf,

        /// Path to the raw object attribute memory snapshot
        #[arg(long)]
        oam: Option<PathBuf>,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        out: PathBuf,

        /// Also write PNG files (requires the `screenshot` feature)
        #[arg(long)]
        png: bool,

        /// Pattern table used by the background (0 => $0000, 1 => $1000)
        #[arg(long, default_value = "0", value_parser = clap::value_parser!(u8).range(0..=1))]
        bg_pattern: u8,

        /// Pattern table used by sprites (0 => $0000, 1 => $1000)
        #[arg(long, default_value = "0", value_parser = clap::value_parser!(u8).range(0..=1))]
        sprite_pattern: u8,
    },

    /// Linear-sweep disassembly of a raw binary
    Disasm {
        /// Path to the binary to disassemble
        file: PathBuf,

        /// Load address of the first byte (hex, `$`/`0x` prefix optional)
        #[arg(short, long, default_value = "8000", value_parser = parse_address)]
        base: u16,
    },
}

fn parse_address(s: &str) -> Result<u16, String> {
    let digits = s
        .strip_prefix('$')
        .or_else(|| s.strip_prefix("0x"))
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    u16::from_str_radix(digits, 16).map_err(|e| format!("invalid address `{s}`: {e}"))
}

fn pattern_base(table: u8) -> u16 {
    if table == 0 { 0x0000 } else { 0x1000 }
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Route `log` records from the library to stderr.
fn init_logging(verbose: u8) {
    let result = tracing_subscriber::fmt()
        .with_max_level(log_level(verbose))
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
    if let Err(e) = result {
        eprintln!("nesscope: logging disabled: {e}");
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let result = match args.command {
        Command::Render {
            vram,
            oam,
            out,
            png,
            bg_pattern,
            sprite_pattern,
        } => render(
            &vram,
            oam.as_deref(),
            &out,
            png,
            pattern_base(bg_pattern),
            pattern_base(sprite_pattern),
        ),
        Command::Disasm { file, base } => disasm(&file, base),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("nesscope: {e}");
            ExitCode::FAILURE
        }
    }
}

fn render(
    vram_path: &Path,
    oam_path: Option<&Path>,
    out: &Path,
    png: bool,
    bg_base: u16,
    sprite_base: u16,
) -> nesscope::Result<()> {
    let vram = VramSnapshot::load(vram_path)?;
    let palettes = PaletteTable::from_vram(&vram, &SystemPalette::default());
    fs::create_dir_all(out)?;

    write_image(&pattern::render_pattern_tables(&vram), out, "patterns", png)?;
    write_image(
        &nametable::render_nametables(&vram, &palettes, bg_base),
        out,
        "nametables",
        png,
    )?;

    if let Some(path) = oam_path {
        let oam = ObjectMemory::load(path)?;
        let sheet = sprite::render_sprites(&oam, &vram, &palettes, sprite_base, Rgb::MAGENTA);
        write_image(&sheet, out, "sprites", png)?;
    }
    Ok(())
}

fn write_image(img: &RasterImage, dir: &Path, stem: &str, png: bool) -> nesscope::Result<()> {
    img.save_ppm(dir.join(format!("{stem}.ppm")))?;
    if png {
        write_png(img, &dir.join(format!("{stem}.png")))?;
    }
    Ok(())
}

#[cfg(feature = "screenshot")]
fn write_png(img: &RasterImage, path: &Path) -> nesscope::Result<()> {
    img.save_png(path)
}

#[cfg(not(feature = "screenshot"))]
fn write_png(_img: &RasterImage, path: &Path) -> nesscope::Result<()> {
    eprintln!(
        "nesscope: skipping {} (built without the `screenshot` feature)",
        path.display()
    );
    Ok(())
}

fn disasm(path: &Path, base: u16) -> nesscope::Result<()> {
    let bytes = fs::read(path)?;
    let mut sink = WriterSink::stdout();
    for inst in trace::disassemble(base, &bytes) {
        sink.line(&inst.to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_prefixes() {
        assert_eq!(parse_address("8000"), Ok(0x8000));
        assert_eq!(parse_address("$c000"), Ok(0xC000));
        assert_eq!(parse_address("0xFFFA"), Ok(0xFFFA));
        assert!(parse_address("10000").is_err());
        assert!(parse_address("zz").is_err());
    }

    #[test]
    fn verbosity_selects_log_level() {
        let args = Args::try_parse_from(["nesscope", "disasm", "prg.bin", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
        assert_eq!(log_level(args.verbose), LevelFilter::DEBUG);
        assert_eq!(log_level(0), LevelFilter::WARN);
        assert_eq!(log_level(1), LevelFilter::INFO);
        assert_eq!(log_level(7), LevelFilter::TRACE);
    }

    #[test]
    fn cli_parses_render() {
        let args = Args::try_parse_from([
            "nesscope", "render", "--vram", "v.bin", "--oam", "o.bin", "--bg-pattern", "1",
        ])
        .unwrap();
        match args.command {
            Command::Render {
                oam, bg_pattern, sprite_pattern, ..
            } => {
                assert_eq!(oam.as_deref(), Some(Path::new("o.bin")));
                assert_eq!(pattern_base(bg_pattern), 0x1000);
                assert_eq!(pattern_base(sprite_pattern), 0x0000);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(Args::try_parse_from(["nesscope", "render", "--vram", "v", "--bg-pattern", "2"]).is_err());
    }
}
