//! Render service collaborator.
//!
//! Content headed for a preview pane is passed through a [`RenderService`]
//! first. This is the hook where template and merge placeholders inside the
//! content get resolved before anything is shown.

/// Resolves template placeholders inside content before display.
pub trait RenderService {
    fn render(&self, content: &str) -> String;
}

/// Renderer that returns content unchanged. Used when placeholder
/// resolution is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughRenderer;

impl RenderService for PassthroughRenderer {
    fn render(&self, content: &str) -> String {
        content.to_string()
    }
}
