pub mod policy;

pub use policy::{select, AutoPreferences, Selection, SelectionReason, SelectionRequest};
