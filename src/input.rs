use crossterm::event::{poll, read, Event, KeyCode};
use crossterm::terminal;
use std::collections::{HashMap, VecDeque};
use std::io;
use std::time::{Duration, Instant};

use log::warn;

/// the hex keypad mapped onto the left-hand side of a qwerty keyboard
const CONVENTIONAL_KEYMAP: [(char, u8); 16] = [
    ('x', 0x00),
    ('1', 0x01),
    ('2', 0x02),
    ('3', 0x03),
    ('q', 0x04),
    ('w', 0x05),
    ('e', 0x06),
    ('a', 0x07),
    ('s', 0x08),
    ('d', 0x09),
    ('z', 0x0a),
    ('c', 0x0b),
    ('4', 0x0c),
    ('r', 0x0d),
    ('f', 0x0e),
    ('v', 0x0f),
];

/// Snapshot of the 16-key hex keypad for one executor cycle.
///
/// `held` is the level signal the skip instructions read; `just_pressed` is
/// the edge signal that resumes a suspended FX0A.
#[derive(Debug, Clone, Copy, Default)]
pub struct Keys {
    held: [bool; 16],
    just_pressed: Option<u8>,
}

impl Keys {
    /// nothing held, nothing pressed
    pub fn none() -> Self {
        Keys::default()
    }

    /// mark a key as held (level only)
    pub fn hold(mut self, key: u8) -> Self {
        self.held[(key & 0x0f) as usize] = true;
        self
    }

    /// mark a key as freshly pressed (edge and level)
    pub fn press(mut self, key: u8) -> Self {
        let key = key & 0x0f;
        self.held[key as usize] = true;
        self.just_pressed = Some(key);
        self
    }

    pub fn is_held(&self, key: u8) -> bool {
        self.held[(key & 0x0f) as usize]
    }

    pub fn just_pressed(&self) -> Option<u8> {
        self.just_pressed
    }
}

/// Turns raw keyboard events into keypad snapshots.
pub trait Input {
    /// fold any pending events into a snapshot for the next cycle batch
    fn poll_keys(&mut self) -> Result<Keys, io::Error>;

    /// the user asked to stop the emulator (not a chip-8 concept)
    fn quit_requested(&self) -> bool;
}

/// how long a keypress counts as held, since terminals don't report releases
const KEY_HOLD: Duration = Duration::from_millis(200);

/// keypad input from the terminal via crossterm, in raw mode
pub struct CrosstermInput {
    keymap: HashMap<char, u8>,
    held_until: [Option<Instant>; 16],
    quit: bool,
}

impl CrosstermInput {
    pub fn new() -> Result<Self, io::Error> {
        terminal::enable_raw_mode()?;
        Ok(CrosstermInput {
            keymap: HashMap::from(CONVENTIONAL_KEYMAP),
            held_until: [None; 16],
            quit: false,
        })
    }
}

impl Drop for CrosstermInput {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

impl Input for CrosstermInput {
    fn poll_keys(&mut self) -> Result<Keys, io::Error> {
        let now = Instant::now();
        let mut just_pressed = None;
        while poll(Duration::from_millis(0))? {
            match read()? {
                Event::Key(evt) => match evt.code {
                    KeyCode::Esc => self.quit = true,
                    KeyCode::Char(c) => match self.keymap.get(&c) {
                        Some(&key) => {
                            let slot = &mut self.held_until[key as usize];
                            let was_held = slot.map_or(false, |t| t > now);
                            if !was_held && just_pressed.is_none() {
                                just_pressed = Some(key);
                            }
                            *slot = Some(now + KEY_HOLD);
                        }
                        None => warn!("can't map {:?} to a keypad key", c),
                    },
                    _ => {}
                },
                _ => {}
            }
        }
        let mut keys = Keys::none();
        for (key, until) in self.held_until.iter().enumerate() {
            if until.map_or(false, |t| t > now) {
                keys.held[key] = true;
            }
        }
        keys.just_pressed = just_pressed;
        Ok(keys)
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }
}

/// scripted Input implementation for testing; quits when the script runs out
pub struct DummyInput {
    script: VecDeque<Keys>,
}

impl DummyInput {
    pub fn new(script: &[Keys]) -> Self {
        DummyInput {
            script: script.iter().copied().collect(),
        }
    }
}

impl Input for DummyInput {
    fn poll_keys(&mut self) -> Result<Keys, io::Error> {
        Ok(self.script.pop_front().unwrap_or_else(Keys::none))
    }

    fn quit_requested(&self) -> bool {
        self.script.is_empty()
    }
}
