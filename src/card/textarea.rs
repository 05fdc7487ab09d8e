//! Multi-line rich-text input card.
//!
//! A [`TextareaCard`] presents a multi-line input whose authoritative value
//! lives in an embedded rich-text editor once that editor is ready. Before
//! readiness the card proxies reads and writes through a plain-text
//! element, and queues the latest write so it lands in the editor when the
//! readiness signal arrives. Submission is gated by a pluggable validation
//! predicate.

use serde_json::Value;
use uuid::Uuid;

use crate::render::RenderService;

use super::autocomplete::{AutocompleteBinding, AutocompleteOptions};
use super::editor::{EditorDirective, EditorEvent, EditorLifecycle, EditorSurface, HeaderControl};
use super::events::{ListenerId, Listeners};

/// The raw input element backing a card.
///
/// Hosts compose this into their own layout; before the editor is ready it
/// also doubles as the card's value proxy.
#[derive(Debug, Clone, Default)]
pub struct TextElement {
    id: String,
    value: String,
    placeholder: String,
}

impl TextElement {
    fn new(id: String) -> Self {
        Self {
            id,
            value: String::new(),
            placeholder: String::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// The label shown when nothing has been typed.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.placeholder = placeholder.into();
    }
}

/// Construction options for a [`TextareaCard`]. Both fields are optional.
#[derive(Default)]
pub struct CardOptions {
    /// Label the input should show when it has no text.
    pub label: Option<String>,
    /// Autocomplete configuration, applied as if passed to
    /// [`TextareaCard::set_autocomplete`].
    pub autocomplete: Option<AutocompleteOptions>,
}

type Validator = Box<dyn Fn(&TextareaCard) -> bool>;

/// Multi-line rich-text input card.
///
/// Construction returns immediately with the card in
/// [`EditorLifecycle::Initializing`]; the hosting toolkit calls
/// [`editor_ready`] once the embedded editor reports readiness, and routes
/// editor events through [`handle_editor_event`].
///
/// [`editor_ready`]: TextareaCard::editor_ready
/// [`handle_editor_event`]: TextareaCard::handle_editor_event
pub struct TextareaCard {
    element_id: String,
    text_element: TextElement,
    renderer: Box<dyn RenderService>,
    lifecycle: EditorLifecycle,
    editor: Option<Box<dyn EditorSurface>>,
    pending_value: Option<String>,
    validator: Option<Validator>,
    autocomplete: Option<AutocompleteBinding>,
    trigger_on_focus: bool,
    header: Option<Box<dyn HeaderControl>>,
    suggestion_listeners: Listeners<Value>,
}

impl TextareaCard {
    /// Create a card wired to a render service.
    ///
    /// Editor initialization is requested by the hosting toolkit out of
    /// band; the card does not wait for it and is usable immediately
    /// through the plain-text proxy.
    pub fn new(renderer: Box<dyn RenderService>, options: CardOptions) -> Self {
        let element_id = format!("card-textarea-{}", Uuid::new_v4());

        let mut card = Self {
            text_element: TextElement::new(element_id.clone()),
            element_id,
            renderer,
            lifecycle: EditorLifecycle::Initializing,
            editor: None,
            pending_value: None,
            validator: None,
            autocomplete: None,
            trigger_on_focus: false,
            header: None,
            suggestion_listeners: Listeners::new(),
        };

        if let Some(label) = options.label {
            card.set_label(&label);
        }
        if let Some(autocomplete) = options.autocomplete {
            card.set_autocomplete(autocomplete);
        }

        card
    }

    /// Unique id of the card's editing surface.
    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    pub fn lifecycle(&self) -> EditorLifecycle {
        self.lifecycle
    }

    /// Attach the initialized editor and transition to `Ready`.
    ///
    /// Called by the hosting toolkit when the embedded editor signals
    /// readiness. The most recent value written while initializing is
    /// flushed into the editor; calling this twice replaces the surface
    /// and the card stays `Ready`.
    pub fn editor_ready(&mut self, mut editor: Box<dyn EditorSurface>) {
        if let Some(pending) = self.pending_value.take() {
            editor.set_content(&pending);
        }
        self.editor = Some(editor);
        self.lifecycle = EditorLifecycle::Ready;
        tracing::debug!(element_id = %self.element_id, "editor ready");
    }

    /// Get the card's current value.
    ///
    /// Reflects the live editor content once the editor is ready; before
    /// that it reads the plain-text proxy.
    pub fn value(&self) -> String {
        match &self.editor {
            Some(editor) => editor.content(),
            None => self.text_element.value().to_string(),
        }
    }

    /// Set the card's value. Never fails regardless of readiness state.
    ///
    /// Before the editor is ready the value is written to the plain-text
    /// proxy and queued; the queued value is flushed into the editor on
    /// the `Ready` transition.
    pub fn set_value(&mut self, value: &str) {
        match &mut self.editor {
            Some(editor) => editor.set_content(value),
            None => {
                self.text_element.set_value(value);
                self.pending_value = Some(value.to_string());
            }
        }
    }

    /// Set the label shown when nothing has been typed.
    pub fn set_label(&mut self, label: &str) {
        self.text_element.set_placeholder(label);
    }

    /// The underlying raw input element, for host-level composition.
    pub fn text_element(&self) -> &TextElement {
        &self.text_element
    }

    pub fn text_element_mut(&mut self) -> &mut TextElement {
        &mut self.text_element
    }

    /// Install the validation predicate consulted by [`is_valid`].
    ///
    /// [`is_valid`]: TextareaCard::is_valid
    pub fn set_validation<F>(&mut self, validate: F)
    where
        F: Fn(&TextareaCard) -> bool + 'static,
    {
        self.validator = Some(Box::new(validate));
    }

    /// Whether the card's current content is acceptable.
    ///
    /// Empty content is never valid, and short-circuits before any
    /// installed validator runs. With content present, an installed
    /// validator decides; no validator means valid.
    pub fn is_valid(&self) -> bool {
        let body = self.value();
        if body.is_empty() {
            return false;
        }
        if let Some(validate) = &self.validator
            && !validate(self)
        {
            return false;
        }
        true
    }

    /// Store autocomplete configuration.
    ///
    /// Only `trigger_on_focus` changes the card's own behavior (focus
    /// events produce a search directive); the rest of the binding is
    /// consumed by the dropdown collaborator via
    /// [`autocomplete_binding`].
    ///
    /// [`autocomplete_binding`]: TextareaCard::autocomplete_binding
    pub fn set_autocomplete(&mut self, options: AutocompleteOptions) {
        self.trigger_on_focus = options.trigger_on_focus;
        self.autocomplete = Some(AutocompleteBinding::from_options(options));
    }

    pub fn autocomplete_binding(&self) -> Option<&AutocompleteBinding> {
        self.autocomplete.as_ref()
    }

    /// Install the header element hidden while the editor is fullscreen.
    pub fn set_header(&mut self, header: Box<dyn HeaderControl>) {
        self.header = Some(header);
    }

    /// Register a listener for forwarded suggestion requests.
    pub fn on_suggestions(&mut self, listener: impl FnMut(&Value) + 'static) -> ListenerId {
        self.suggestion_listeners.subscribe(listener)
    }

    pub fn remove_suggestion_listener(&mut self, id: ListenerId) -> bool {
        self.suggestion_listeners.unsubscribe(id)
    }

    /// React to an event raised by the embedded editor.
    ///
    /// Returns a directive when the toolkit glue has follow-up work to do.
    /// Events arrive in the order the editor raises them.
    pub fn handle_editor_event(&mut self, event: EditorEvent) -> Option<EditorDirective> {
        match event {
            EditorEvent::FullscreenChanged { active } => {
                // The header overlaps a fullscreen editor even at a higher
                // z-index, so it is hidden outright while fullscreen.
                if let Some(header) = &mut self.header {
                    if active {
                        header.hide();
                    } else {
                        header.show();
                    }
                }
                None
            }
            EditorEvent::Previewing { content } => {
                let content = if content.is_empty() {
                    content
                } else {
                    self.renderer.render(&content)
                };
                Some(EditorDirective::ShowPreview { content })
            }
            EditorEvent::SuggestionsRequested(state) => {
                self.suggestion_listeners.emit(&state);
                None
            }
            EditorEvent::Focused => {
                if self.trigger_on_focus {
                    Some(EditorDirective::SearchAutocomplete {
                        query: self.value(),
                    })
                } else {
                    None
                }
            }
        }
    }
}
