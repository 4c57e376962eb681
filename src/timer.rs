use std::time::Duration;

/// one decrement per this much wall-clock time (60 Hz)
pub const TICK: Duration = Duration::from_nanos(1_000_000_000 / 60);

/// The delay/sound timer pair.
///
/// Both are 8-bit counters that count down to zero at 60 Hz and stop there.
/// The rate is wall-clock time fed in by the driving loop, not instruction
/// throughput: instructions write and read the counters, `tick` decrements
/// them. Any non-zero sound timer means the buzzer is on; the 1 -> 0
/// transition is the only "stop buzzing" edge.
pub struct Timers {
    delay: u8,
    sound: u8,
    accumulated: Duration,
}

impl Timers {
    pub fn new() -> Self {
        Timers {
            delay: 0,
            sound: 0,
            accumulated: Duration::ZERO,
        }
    }

    pub fn delay(&self) -> u8 {
        self.delay
    }

    pub fn set_delay(&mut self, value: u8) {
        self.delay = value;
    }

    pub fn set_sound(&mut self, value: u8) {
        self.sound = value;
    }

    /// whether the buzzer should currently be sounding
    pub fn buzzing(&self) -> bool {
        self.sound > 0
    }

    /// Feed in elapsed wall-clock time; decrements once per accumulated
    /// 1/60 s. A long interval yields several decrements, bounded at zero.
    pub fn tick(&mut self, elapsed: Duration) {
        self.accumulated += elapsed;
        while self.accumulated >= TICK {
            self.accumulated -= TICK;
            self.delay = self.delay.saturating_sub(1);
            self.sound = self.sound.saturating_sub(1);
        }
    }
}

impl Default for Timers {
    fn default() -> Self {
        Self::new()
    }
}
