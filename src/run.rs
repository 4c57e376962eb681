use std::time::{Duration, Instant};

use log::debug;

use crate::display::Display;
use crate::input::Input;
use crate::machine::{Machine, Mode};
use crate::sound::Sound;

/// display/timer frames per second; also the timer decrement rate
const FRAME_RATE: u32 = 60;

/// Drive the machine until the user quits or a fault halts it.
///
/// Each frame: poll the keypad, run a batch of cycles at the requested
/// instruction rate, redraw if the frame buffer changed, feed elapsed
/// wall-clock time to the timers, and mirror the sound timer on the buzzer.
/// The timers never depend on how many cycles actually ran; a suspended
/// machine (FX0A) skips its batch but still ticks.
pub fn run(
    machine: &mut Machine,
    display: &mut dyn Display,
    input: &mut dyn Input,
    sound: &mut dyn Sound,
    ips: u32,
) -> anyhow::Result<()> {
    let cycles_per_frame = (ips / FRAME_RATE).max(1);
    let frame_duration = Duration::from_secs(1) / FRAME_RATE;
    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();

        let keys = input.poll_keys()?;
        if input.quit_requested() {
            debug!("quit requested after {} cycles", machine.cycles());
            return Ok(());
        }

        for _ in 0..cycles_per_frame {
            machine.step(&keys)?;
            if machine.mode() != Mode::Running {
                // suspended on FX0A; nothing to fetch until a key arrives
                break;
            }
        }

        if let Some(frame) = machine.take_frame() {
            display.draw(frame)?;
        }

        machine.timers.tick(last_tick.elapsed());
        last_tick = Instant::now();
        sound
            .set_buzzing(machine.timers.buzzing())
            .map_err(|e| anyhow::anyhow!("buzzer failed: {}", e))?;

        if let Some(remaining) = frame_duration.checked_sub(frame_start.elapsed()) {
            spin_sleep::sleep(remaining);
        }
    }
}
