use std::fs::File;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::{debug, info};

use termin8::display::MonoTermDisplay;
use termin8::input::CrosstermInput;
use termin8::machine::Machine;
use termin8::run::run;
use termin8::sound::{Mute, Sound, TermBeep};

#[derive(Parser, Debug)]
#[command(version, about = "CHIP-8 interpreter in your terminal")]
struct Args {
    #[arg(help = "Path to the ROM image to run")]
    rom: PathBuf,

    #[arg(short, long, default_value_t = 700, help = "Instructions per second")]
    ips: u32,

    #[arg(short, long, help = "Silence the buzzer")]
    mute: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut machine = Machine::new();
    let mut rom =
        File::open(&args.rom).with_context(|| format!("couldn't open {}", args.rom.display()))?;
    let loaded = machine.load_program(&mut rom)?;
    info!("loaded {} bytes from {}", loaded, args.rom.display());
    debug!(
        "program image:\n{}",
        machine.dump_memory(0x200, 0x200 + loaded as u16)
    );

    let mut display = MonoTermDisplay::new()?;
    let mut input = CrosstermInput::new()?;
    let mut sound: Box<dyn Sound> = if args.mute {
        Box::new(Mute)
    } else {
        Box::new(TermBeep::new())
    };

    run(
        &mut machine,
        &mut display,
        &mut input,
        sound.as_mut(),
        args.ips,
    )?;

    // shove some newlines on stdout so the prompt lands below the last frame
    for _ in 0..2 {
        println!();
    }
    Ok(())
}
