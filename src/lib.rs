//! A CHIP-8 virtual machine with a terminal front-end.
//!
//! The core is [`machine::Machine`]: 4 KiB of memory with the font set baked
//! in at 0x050, sixteen 8-bit registers plus I/pc, a 16-level call stack, a
//! 64x32 monochrome frame buffer mutated only by the clear and draw
//! instructions, and a delay/sound timer pair decremented at 60 Hz of
//! wall-clock time regardless of instruction throughput.
//!
//! Everything around the core is glue behind small traits so alternative
//! frontends (and tests) can plug in:
//!
//! * [`display::Display`] renders a frame; the terminal implementation draws
//!   a TUI canvas, and the core only hands over frames that changed
//! * [`input::Input`] folds raw keyboard events into 16-key snapshots with a
//!   press edge for the FX0A wait
//! * [`sound::Sound`] mirrors the sound timer's buzzing level on a speaker
//! * [`run::run`] is the driving loop tying the above together
//!
//! Unknown opcodes are logged and skipped; stack overflow/underflow halt the
//! run; bad program images are rejected at load time.

pub mod display;
pub mod error;
pub mod framebuffer;
pub mod input;
pub mod machine;
pub mod memory;
pub mod opcode;
pub mod run;
pub mod sound;
pub mod timer;

pub use error::{Fault, LoadError};
pub use machine::{Machine, Mode};
