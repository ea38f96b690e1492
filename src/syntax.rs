//! Text-level recognition of translation-function calls.

pub mod extractor;

pub use extractor::{
    ExtractedCall,
    ExtractorError,
    KeyExtractor,
};
