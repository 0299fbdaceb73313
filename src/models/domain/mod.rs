pub mod document;
pub mod persona;
pub mod turn;
pub use document::ExtractedDocument;
pub use persona::Persona;
pub use turn::{Turn, TurnRole};
