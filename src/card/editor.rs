//! Seams between a card and its embedded rich-text editor.
//!
//! The editor toolkit itself is a collaborator, not something this crate
//! owns. A card sees the editor through three narrow surfaces: the
//! [`EditorSurface`] content API once the editor is ready, the
//! [`EditorEvent`]s the toolkit raises, and the [`EditorDirective`]s the
//! card hands back for the toolkit glue to carry out.

use serde_json::Value;

/// Lifecycle of the embedded editor attached to a card.
///
/// A card starts in `Initializing`; the toolkit's own readiness signal
/// drives the single transition to `Ready`. There is no way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorLifecycle {
    /// Editor initialization has been requested but not signaled complete.
    #[default]
    Initializing,
    /// The editor owns the authoritative value.
    Ready,
}

/// Content API of an initialized rich-text editor.
pub trait EditorSurface {
    /// Replace the editor's content.
    fn set_content(&mut self, html: &str);

    /// Read the editor's live content.
    fn content(&self) -> String;
}

/// Events raised by the embedded editor toolkit.
///
/// Delivered to the card in the order the toolkit raises them; the card
/// holds no event queue of its own.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// The editor entered or left fullscreen mode.
    FullscreenChanged { active: bool },
    /// Content is about to be shown in a preview pane.
    Previewing { content: String },
    /// The editor requested autocomplete suggestions. The payload is the
    /// toolkit's own event-state object, carried opaquely.
    SuggestionsRequested(Value),
    /// The editing surface received focus.
    Focused,
}

/// Follow-up work a card hands back to the toolkit glue after an event.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorDirective {
    /// Display this content in the preview pane. Placeholders have
    /// already been resolved.
    ShowPreview { content: String },
    /// Run an autocomplete search seeded with this query.
    SearchAutocomplete { query: String },
}

/// Handle to the header element that the fullscreen editor would obscure.
pub trait HeaderControl {
    fn hide(&mut self);
    fn show(&mut self);
}
