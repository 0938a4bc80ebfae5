use std::path::PathBuf;

use pocketdmg::RunOptions;

const USAGE: &str = "Usage: pocketdmg <rom_path> [frames] [--boot <boot_rom>] [--dump <out_rgb24_path>]";

fn main() {
    env_logger::init();

    let mut rom_path: Option<PathBuf> = None;
    let mut frames: Option<u32> = None;
    let mut boot_rom: Option<PathBuf> = None;
    let mut dump_path: Option<PathBuf> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--boot" => boot_rom = Some(required_value(&mut args, "--boot")),
            "--dump" => dump_path = Some(required_value(&mut args, "--dump")),
            "-h" | "--help" => {
                println!("{USAGE}");
                return;
            }
            _ if rom_path.is_none() => rom_path = Some(PathBuf::from(arg)),
            _ if frames.is_none() => {
                frames = Some(arg.parse().unwrap_or_else(|_| {
                    eprintln!("Invalid frame count '{arg}'; expected an integer.");
                    std::process::exit(2);
                }))
            }
            _ => {
                eprintln!("Unexpected argument '{arg}'.\n{USAGE}");
                std::process::exit(2);
            }
        }
    }

    let Some(rom_path) = rom_path else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };

    let options = RunOptions::builder()
        .rom_path(rom_path)
        .frames(frames.unwrap_or(120))
        .build();
    let options = RunOptions {
        boot_rom,
        dump_path,
        ..options
    };

    if let Err(err) = pocketdmg::run(options) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn required_value(args: &mut impl Iterator<Item = String>, flag: &str) -> PathBuf {
    args.next().map(PathBuf::from).unwrap_or_else(|| {
        eprintln!("Missing value for {flag}.\n{USAGE}");
        std::process::exit(2);
    })
}
