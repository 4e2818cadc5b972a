//! The embedded editor widget as seen by the session.

use playground_core::WidgetOptions;

/// An editor/runtime widget that renders a full option set.
///
/// Edits made inside the widget are reported by the host calling
/// [`PlaygroundSession::on_widget_change`](crate::PlaygroundSession::on_widget_change)
/// with the widget's current state. Each call to `set` replaces everything
/// the widget shows.
pub trait Widget {
    fn set(&mut self, options: WidgetOptions);
}

impl<W: Widget + ?Sized> Widget for &mut W {
    fn set(&mut self, options: WidgetOptions) {
        (**self).set(options)
    }
}

impl<W: Widget + ?Sized> Widget for Box<W> {
    fn set(&mut self, options: WidgetOptions) {
        (**self).set(options)
    }
}
