mod cursor;
pub use cursor::*;

mod document;
pub use document::*;

mod engine;
pub use engine::*;

mod error;
pub use error::*;

mod geometry;
pub use geometry::*;

/// HTML preview serialization of [Document]s
pub mod html;

mod instruction;
pub use instruction::*;

mod measure;
pub use measure::*;

/// PDF serialization of [LayoutResult] draw programs
pub mod pdf;

pub(crate) mod refs;

mod render;
pub use render::*;

mod store;
pub use store::*;

mod units;
pub use units::*;

mod wrap;
pub use wrap::*;

/// Re-export PDF-writer functionality, mostly for consumers post-processing
/// serialized output
pub use pdf_writer;
