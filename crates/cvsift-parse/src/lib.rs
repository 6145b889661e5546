//! CVSift Parse — document text extraction and the field-extraction engine.
//!
//! The extraction engine is a set of pure per-field heuristics over
//! normalized plain text, composed by `Assembler` into one best-effort
//! `ParsedRecord` per document and cleaned by `validate`. `BatchRunner`
//! applies the assembler across many documents, accumulating statistics.

pub mod assemble;
pub mod batch;
pub mod extract;
pub mod file;
pub mod normalize;
pub mod validate;

pub use assemble::Assembler;
pub use batch::BatchRunner;
pub use file::{allowed_file, extract_text, FileType};
pub use validate::validate;
