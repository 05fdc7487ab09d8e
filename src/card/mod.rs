//! Composable form-input cards.
//!
//! A card is a self-contained input widget: get/set value, label,
//! validation, plus the lifecycle plumbing for an embedded rich-text
//! editor. The card core is headless: concrete toolkits implement the
//! [`EditorSurface`] and [`HeaderControl`] seams and route toolkit events
//! through [`TextareaCard::handle_editor_event`].

pub mod autocomplete;
pub mod editor;
pub mod events;
pub mod textarea;

pub use autocomplete::{AutocompleteBinding, AutocompleteOptions, ValueGetter};
pub use editor::{EditorDirective, EditorEvent, EditorLifecycle, EditorSurface, HeaderControl};
pub use events::{ListenerId, Listeners};
pub use textarea::{CardOptions, TextElement, TextareaCard};
