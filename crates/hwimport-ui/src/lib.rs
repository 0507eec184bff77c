//! Hwimport UI - Discoverer selection and import view dispatch
//!
//! The screen loads the discoverer catalog once, lets the operator pick a
//! discoverer, and hands the pick to the matching import view:
//! - `loader`: one-shot catalog fetch guarded against late delivery
//! - `selection`: the current pick and the pure view resolver
//! - `projection`: selector options derived from the catalog
//! - `view`: import view seam and id-keyed instantiation
//! - `screen`: reactive composition of the above
//! - `panel`: egui rendering of the screen
//! - `source`: catalog fetch API and its HTTP implementation

pub mod loader;
pub mod panel;
pub mod projection;
pub mod screen;
pub mod selection;
pub mod source;
pub mod view;

pub use loader::{CatalogLoader, FetchCompletion, LoadState};
pub use panel::ImportPanel;
pub use projection::{project_options, SelectOption, DEFAULT_PLACEHOLDER};
pub use screen::{ImportScreen, RenderModel};
pub use selection::{resolve, InputMode, ResolvedView, SelectionController, ViewKind};
pub use source::{CatalogSource, DaemonEndpoint, FetchError, HttpCatalogSource};
pub use view::{ImportView, ImportViewProps, ViewFactory, ViewSlot};
