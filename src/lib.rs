pub mod auth;
pub mod card;
pub mod config;
pub mod document;
pub mod error;
pub mod render;

pub use auth::{StaticTokenProvider, TokenProvider};
pub use card::{
    AutocompleteOptions, CardOptions, EditorDirective, EditorEvent, EditorLifecycle,
    EditorSurface, HeaderControl, ListenerId, TextElement, TextareaCard,
};
pub use config::Config;
pub use document::{
    DocumentCache, DocumentExporter, DocumentService, EvictionPolicy, ExportResponse,
    FileMetadata, HttpExporter,
};
pub use error::{CardstockError, Result};
pub use render::{PassthroughRenderer, RenderService};
