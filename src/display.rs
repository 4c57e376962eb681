use std::io;
use tui::backend::CrosstermBackend;
use tui::layout::Rect;
use tui::style::{Color, Style};
use tui::symbols::Marker;
use tui::widgets::canvas::{Canvas, Points};
use tui::widgets::{Block, Borders};
use tui::Terminal;

use crate::framebuffer::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// one rendered frame: 64x32 cells, one byte per pixel, 0 or 1
pub type Frame = [u8; DISPLAY_WIDTH * DISPLAY_HEIGHT];

/// Display is used by the driving loop to put the frame buffer on screen. It
/// abstracts the medium, so a variety of kinds of screen would work. The core
/// only hands over a frame when the buffer changed; the display never forces
/// a redraw cadence.
pub trait Display {
    fn draw(&mut self, frame: &Frame) -> Result<(), io::Error>;
}

/// cells holding `value`, as float coords suitable for a TUI canvas
fn plane(frame: &Frame, value: u8) -> Vec<(f64, f64)> {
    frame
        .iter()
        .enumerate()
        .filter(|(_, &cell)| cell == value)
        .map(|(idx, _)| {
            (
                (idx % DISPLAY_WIDTH) as f64,
                -1.0 * (idx / DISPLAY_WIDTH) as f64,
            )
        })
        .collect()
}

/// monochrome display in a terminal, rendered using TUI over crossterm
pub struct MonoTermDisplay {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl MonoTermDisplay {
    pub fn new() -> Result<MonoTermDisplay, io::Error> {
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;
        Ok(MonoTermDisplay { terminal })
    }
}

impl Display for MonoTermDisplay {
    fn draw(&mut self, frame: &Frame) -> Result<(), io::Error> {
        // 1:1 between chip-8 pixels and terminal cells, plus the border
        self.terminal.draw(|f| {
            let size = Rect::new(0, 0, 2 + DISPLAY_WIDTH as u16, 2 + DISPLAY_HEIGHT as u16);
            let canvas = Canvas::default()
                .block(
                    Block::default()
                        .title("CHIP-8")
                        .borders(Borders::ALL)
                        .style(Style::default().bg(Color::Black)),
                )
                .x_bounds([0.0, (DISPLAY_WIDTH - 1) as f64])
                .y_bounds([-1.0 * (DISPLAY_HEIGHT - 1) as f64, 0.0])
                .marker(Marker::Block)
                .paint(|ctx| {
                    ctx.draw(&Points {
                        coords: &plane(frame, 0),
                        color: Color::Black,
                    });
                    ctx.draw(&Points {
                        coords: &plane(frame, 1),
                        color: Color::White,
                    });
                });
            f.render_widget(canvas, size);
        })?;
        Ok(())
    }
}

/// records frames instead of rendering them; useful for testing the loop
pub struct DummyDisplay {
    pub frames_drawn: usize,
    pub last_frame: Option<Frame>,
}

impl DummyDisplay {
    pub fn new() -> Self {
        DummyDisplay {
            frames_drawn: 0,
            last_frame: None,
        }
    }
}

impl Display for DummyDisplay {
    fn draw(&mut self, frame: &Frame) -> Result<(), io::Error> {
        self.frames_drawn += 1;
        self.last_frame = Some(*frame);
        Ok(())
    }
}
