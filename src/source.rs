//! Frame source capability.

use crate::Result;

/// Supplies one frame per tick of the host loop
pub trait FrameSource {
    /// Frame type produced by this source
    type Frame;

    /// Next frame, or `None` once the source is exhausted
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying device or stream fails.
    fn next_frame(&mut self) -> Result<Option<Self::Frame>>;
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    type Frame = S::Frame;

    fn next_frame(&mut self) -> Result<Option<Self::Frame>> {
        (**self).next_frame()
    }
}
