//! Core library for the Peacock User Profile Editor (PUPE).
//! Provides the path-addressed JSON document model, the tree and raw-text
//! projections kept in lockstep by the editor session, and the bulk profile
//! cheats, plus the egui shell that wires them to the screen.

mod cheats;
mod edit;
mod gui;
mod path;
mod profile;
mod search;
mod session;
pub mod statics;
mod tree;
mod value;

pub use cheats::Cheat;
pub use edit::{NEW_ENTRY_KINDS, default_value_for_kind, translate};
pub use gui::run_gui;
pub use path::{NodePath, Segment};
pub use profile::{DocError, LoadedProfile};
pub use search::SearchHits;
pub use session::{BatchEditOutcome, EditorSession};
pub use tree::{DisplayNode, project};
pub use value::{PkNumber, PkValue, ValueKind};
