//! Cursor sink for X11-based systems.
//!
//! Moves the mouse pointer to follow the tracked position, so the pointer
//! plays the role of the on-screen element that follows the face.

use crate::{
    controller::{Dimensions, Position},
    error::{Error, Result},
    sink::PositionSink,
    utils::safe_cast::f64_to_i16_clamp,
};
use log::{debug, info};
use x11rb::{
    connection::Connection,
    protocol::xproto::{ConnectionExt, Screen},
    rust_connection::RustConnection,
};

/// Pointer-warping sink for X11
pub struct CursorSink {
    connection: RustConnection,
    screen: Screen,
    screen_width: u16,
    screen_height: u16,
    anchor_offset: Position,
}

impl CursorSink {
    /// Connect to the default X11 display
    ///
    /// # Errors
    ///
    /// Returns an error when no X11 display is reachable.
    pub fn new() -> Result<Self> {
        info!("Initializing X11 cursor sink");

        let (connection, screen_num) =
            RustConnection::connect(None).map_err(|e| Error::X11(format!("Failed to connect to X11: {e}")))?;

        let screen = connection
            .setup()
            .roots
            .get(screen_num)
            .ok_or_else(|| Error::X11("Failed to get screen".to_string()))?
            .clone();

        let screen_width = screen.width_in_pixels;
        let screen_height = screen.height_in_pixels;

        info!("Connected to X11 display, screen: {}x{}", screen_width, screen_height);

        Ok(Self {
            connection,
            screen,
            screen_width,
            screen_height,
            anchor_offset: Position::ORIGIN,
        })
    }

    /// Point the cursor at `position + offset`, e.g. the center of the
    /// tracked element rather than its top-left corner
    #[must_use]
    pub fn with_anchor_offset(mut self, offset: Position) -> Self {
        self.anchor_offset = offset;
        self
    }

    /// Screen size, usable as the controller viewport
    #[must_use]
    pub fn screen_dimensions(&self) -> Dimensions {
        Dimensions::new(u32::from(self.screen_width), u32::from(self.screen_height))
    }

    /// Map a tracked position to an on-screen pixel
    #[must_use]
    pub fn to_screen(&self, position: Position) -> (i16, i16) {
        map_to_screen(position, self.anchor_offset, self.screen_width, self.screen_height)
    }

    /// Warp the pointer to an absolute pixel
    ///
    /// # Errors
    ///
    /// Returns an error when the warp request cannot be sent.
    pub fn set_position(&self, x: i16, y: i16) -> Result<()> {
        debug!("Setting cursor position to ({}, {})", x, y);

        self.connection
            .warp_pointer(x11rb::NONE, self.screen.root, 0, 0, 0, 0, x, y)
            .map_err(|e| Error::CursorControl(format!("Failed to warp pointer: {e}")))?;

        self.connection
            .flush()
            .map_err(|e| Error::CursorControl(format!("Failed to flush connection: {e}")))?;

        Ok(())
    }
}

fn map_to_screen(position: Position, offset: Position, screen_width: u16, screen_height: u16) -> (i16, i16) {
    let max_x = i16::try_from(screen_width.saturating_sub(1)).unwrap_or(i16::MAX);
    let max_y = i16::try_from(screen_height.saturating_sub(1)).unwrap_or(i16::MAX);
    (
        f64_to_i16_clamp(position.x + offset.x, 0, max_x),
        f64_to_i16_clamp(position.y + offset.y, 0, max_y),
    )
}

impl PositionSink for CursorSink {
    fn render(&mut self, position: Position) -> Result<()> {
        let (x, y) = self.to_screen(position);
        self.set_position(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_to_screen() {
        let offset = Position::new(10.0, 10.0);
        assert_eq!(map_to_screen(Position::new(90.0, 40.0), offset, 1920, 1080), (100, 50));
        assert_eq!(map_to_screen(Position::new(-500.0, 1e9), offset, 1920, 1080), (0, 1079));
        assert_eq!(map_to_screen(Position::new(f64::NAN, 3.4), Position::ORIGIN, 800, 600), (0, 3));
        assert_eq!(map_to_screen(Position::new(1e6, 0.0), Position::ORIGIN, u16::MAX, 10), (i16::MAX, 0));
    }

    #[test]
    #[ignore = "Requires X11 display"]
    fn test_cursor_sink_follows_position() {
        let mut sink = CursorSink::new().unwrap().with_anchor_offset(Position::new(10.0, 10.0));
        let dims = sink.screen_dimensions();
        assert!(dims.width > 0 && dims.height > 0);

        sink.render(Position::new(90.0, 40.0)).unwrap();
    }

    #[test]
    #[ignore = "Requires X11 display"]
    fn test_to_screen_clamps_to_display() {
        let sink = CursorSink::new().unwrap();
        let (x, y) = sink.to_screen(Position::new(-500.0, 1e9));
        assert_eq!(x, 0);
        assert_eq!(i32::from(y), i32::from(sink.screen_height) - 1);
    }
}
