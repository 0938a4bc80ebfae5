use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pocketdmg_core::machine::BOOT_ROM_SIZE;
use pocketdmg_core::{GameBoy, MachineConfig, SCREEN_HEIGHT, SCREEN_WIDTH};
use typed_builder::TypedBuilder;

#[derive(Clone, Debug, TypedBuilder)]
pub struct RunOptions {
    pub rom_path: PathBuf,
    #[builder(default = 120)]
    pub frames: u32,
    #[builder(default, setter(strip_option))]
    pub boot_rom: Option<PathBuf>,
    /// Where to write the last frame as raw RGB24.
    #[builder(default, setter(strip_option))]
    pub dump_path: Option<PathBuf>,
}

pub fn run(options: RunOptions) -> Result<()> {
    let rom = std::fs::read(&options.rom_path)
        .with_context(|| format!("failed to read ROM '{}'", options.rom_path.display()))?;

    let config = match &options.boot_rom {
        Some(path) => MachineConfig::builder().boot_rom(read_boot_rom(path)?).build(),
        None => MachineConfig::default(),
    };

    let mut gb = GameBoy::new(config);
    let header = gb
        .load_cartridge(&rom)
        .with_context(|| format!("failed to load '{}'", options.rom_path.display()))?;
    log::info!("Running '{}' for {} frames", header.title, options.frames);

    for _ in 0..options.frames {
        gb.step_frame()?;
    }

    let serial = gb.serial_output();
    if !serial.is_empty() {
        println!("{}", String::from_utf8_lossy(serial));
    }

    if let Some(path) = &options.dump_path {
        let mut buffer = vec![0u8; SCREEN_WIDTH * SCREEN_HEIGHT * 3];
        gb.video_frame(&mut buffer);
        std::fs::write(path, &buffer)
            .with_context(|| format!("failed to write '{}'", path.display()))?;
        println!(
            "Wrote {} bytes ({}x{} rgb24) after {} frames to '{}'",
            buffer.len(),
            SCREEN_WIDTH,
            SCREEN_HEIGHT,
            options.frames,
            path.display()
        );
    }

    Ok(())
}

fn read_boot_rom(path: &Path) -> Result<[u8; BOOT_ROM_SIZE]> {
    let data = std::fs::read(path)
        .with_context(|| format!("failed to read boot ROM '{}'", path.display()))?;
    let len = data.len();
    data.try_into().map_err(|_| {
        anyhow::anyhow!(
            "boot ROM '{}' is {len} bytes, expected {BOOT_ROM_SIZE}",
            path.display()
        )
    })
}
