//! Inputs the server works on: locale data and open source documents.

pub mod source;
pub mod translation;
