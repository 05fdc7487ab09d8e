//! Autocomplete configuration for cards.
//!
//! Every option is independently optional; an absent option means that
//! piece of the behavior is disabled. Binding the resolved configuration
//! into a dropdown UI is the hosting toolkit's job; the card only stores
//! the configuration and, when `trigger_on_focus` is set, turns focus into
//! a search directive.

use std::fmt;

use futures::future::BoxFuture;

/// Zero-argument callable producing the values autocomplete filters over.
///
/// Called with no parameters; callers needing arguments should close over
/// them before handing the getter in.
pub type ValueGetter = Box<dyn Fn() -> BoxFuture<'static, Vec<String>> + Send + Sync>;

/// Options accepted by [`TextareaCard::set_autocomplete`].
///
/// [`TextareaCard::set_autocomplete`]: crate::card::TextareaCard::set_autocomplete
#[derive(Default)]
pub struct AutocompleteOptions {
    /// String that causes the autocomplete dropdown to open.
    pub trigger: Option<String>,
    /// String appended after a selection is made.
    pub append: Option<String>,
    /// String prepended to a selection.
    pub prepend: Option<String>,
    /// Maximum number of displayed results.
    pub max_results: Option<usize>,
    /// Trigger a search whenever the input receives focus, bringing the
    /// behavior in line with a drop-down list.
    pub trigger_on_focus: bool,
    /// Async source of values to filter.
    pub getter: Option<ValueGetter>,
}

impl fmt::Debug for AutocompleteOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutocompleteOptions")
            .field("trigger", &self.trigger)
            .field("append", &self.append)
            .field("prepend", &self.prepend)
            .field("max_results", &self.max_results)
            .field("trigger_on_focus", &self.trigger_on_focus)
            .field("getter", &self.getter.is_some())
            .finish()
    }
}

/// Resolved autocomplete configuration held by a card and consumed by the
/// dropdown collaborator. `append` and `prepend` default to empty strings
/// when not configured.
pub struct AutocompleteBinding {
    pub trigger: Option<String>,
    pub append: String,
    pub prepend: String,
    pub max_results: Option<usize>,
    pub getter: Option<ValueGetter>,
}

impl AutocompleteBinding {
    pub fn from_options(options: AutocompleteOptions) -> Self {
        Self {
            trigger: options.trigger,
            append: options.append.unwrap_or_default(),
            prepend: options.prepend.unwrap_or_default(),
            max_results: options.max_results,
            getter: options.getter,
        }
    }
}

impl fmt::Debug for AutocompleteBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutocompleteBinding")
            .field("trigger", &self.trigger)
            .field("append", &self.append)
            .field("prepend", &self.prepend)
            .field("max_results", &self.max_results)
            .field("getter", &self.getter.is_some())
            .finish()
    }
}
