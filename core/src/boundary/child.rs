use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;

use super::RenderError;

/// A widget whose rendering can fail.
///
/// Consumes `self` like [`Widget`]; a boundary builds a fresh child every
/// frame.
pub trait TryWidget {
    fn try_render(self, area: Rect, buf: &mut Buffer) -> Result<(), RenderError>;
}

impl<F> TryWidget for F
where
    F: FnOnce(Rect, &mut Buffer) -> Result<(), RenderError>,
{
    fn try_render(self, area: Rect, buf: &mut Buffer) -> Result<(), RenderError> {
        self(area, buf)
    }
}

/// Adapts any ordinary widget. It can still panic.
#[derive(Debug, Clone)]
pub struct Infallible<W>(pub W);

impl<W: Widget> TryWidget for Infallible<W> {
    fn try_render(self, area: Rect, buf: &mut Buffer) -> Result<(), RenderError> {
        self.0.render(area, buf);
        Ok(())
    }
}
