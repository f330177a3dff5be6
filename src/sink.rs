//! Consumers of the controller output.
//!
//! A sink receives every new position right after the controller updates it.
//! Logging, JSON output and the X11 pointer are sinks, and so is any closure
//! `FnMut(Position) -> Result<()>`.

use crate::{controller::Position, Result};
use log::info;
use std::io::Write;

/// Renders the tracked position
pub trait PositionSink {
    /// Consume one updated position
    ///
    /// # Errors
    ///
    /// Returns an error when the position cannot be rendered.
    fn render(&mut self, position: Position) -> Result<()>;
}

impl<F> PositionSink for F
where
    F: FnMut(Position) -> Result<()>,
{
    fn render(&mut self, position: Position) -> Result<()> {
        self(position)
    }
}

/// Logs each position at `info` level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl PositionSink for LogSink {
    fn render(&mut self, position: Position) -> Result<()> {
        info!("face position: ({:.2}, {:.2})", position.x, position.y);
        Ok(())
    }
}

/// Writes each position as one JSON object per line
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    /// Wrap a writer
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Borrow the writer
    pub const fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> PositionSink for JsonLinesSink<W> {
    fn render(&mut self, position: Position) -> Result<()> {
        serde_json::to_writer(&mut self.writer, &position)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
