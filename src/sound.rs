use beep::beep;
use std::error::Error;

/// Drives the buzzer from the sound timer's level. The interpreter exposes
/// only buzzing/not-buzzing; implementations should touch the speaker on
/// changes of that level, not every frame.
pub trait Sound {
    fn set_buzzing(&mut self, on: bool) -> Result<(), Box<dyn Error>>;
}

const BUZZ_PITCH: u16 = 2093; // C

/// terminal buzzer via the pc-speaker style `beep` crate
pub struct TermBeep {
    active: bool,
}

impl TermBeep {
    pub fn new() -> Self {
        TermBeep { active: false }
    }
}

impl Sound for TermBeep {
    fn set_buzzing(&mut self, on: bool) -> Result<(), Box<dyn Error>> {
        if on != self.active {
            beep(if on { BUZZ_PITCH } else { 0 })?;
            self.active = on;
        }
        Ok(())
    }
}

impl Drop for TermBeep {
    fn drop(&mut self) {
        // never leave the speaker wailing
        let _ = beep(0);
    }
}

impl Default for TermBeep {
    fn default() -> Self {
        Self::new()
    }
}

/// silent Sound implementation, for tests and --mute
pub struct Mute;

impl Sound for Mute {
    fn set_buzzing(&mut self, _on: bool) -> Result<(), Box<dyn Error>> {
        Ok(())
    }
}
