use std::error::Error;
use std::fmt;
use std::io;

/// The space between the program start (0x200) and the top of memory.
pub const MAX_PROGRAM_BYTES: usize = 0x1000 - 0x200;

/// Raised while loading a program image. All of these are fatal to startup;
/// the binary maps them to a non-zero exit.
#[derive(Debug)]
pub enum LoadError {
    /// the source yielded no bytes at all
    Empty,
    /// the image doesn't fit between 0x200 and the top of memory
    TooLarge(usize),
    /// the source couldn't be read
    Io(io::Error),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Empty => write!(f, "program image is empty"),
            LoadError::TooLarge(len) => write!(
                f,
                "program image is {} bytes; at most {} fit above 0x200",
                len, MAX_PROGRAM_BYTES
            ),
            LoadError::Io(e) => write!(f, "couldn't read program image: {}", e),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(e: io::Error) -> Self {
        LoadError::Io(e)
    }
}

/// Architectural faults raised mid-execution. Both stack faults signal a
/// malformed or unsupported program and halt the run rather than silently
/// corrupt state. Unknown opcodes are *not* faults of this kind; they're
/// logged and skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// 2NNN with 16 frames already on the stack
    StackOverflow { pc: u16 },
    /// 00EE with nothing on the stack
    StackUnderflow { pc: u16 },
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fault::StackOverflow { pc } => {
                write!(f, "call at {:#05x} would exceed 16 nested subroutines", pc)
            }
            Fault::StackUnderflow { pc } => {
                write!(f, "return at {:#05x} with an empty stack", pc)
            }
        }
    }
}

impl Error for Fault {}
