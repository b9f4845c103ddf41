// Resume text extraction: PDF page walking plus whitespace normalisation.
// The PDF parse is CPU-bound and runs inside tokio::task::spawn_blocking.

pub mod normalize;
pub mod pdf;

pub use pdf::{PdfExtractor, TextExtractor};
