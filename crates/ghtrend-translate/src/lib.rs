//! Best-effort description translation for trending reports.
//!
//! [`Translator`] talks to the public `translate_a/single` endpoint. It never
//! fails from the caller's point of view: any problem is logged and the
//! original text is returned.

pub mod error;
pub mod language;
pub mod translator;

pub use error::TranslateError;
pub use language::looks_like_target;
pub use translator::{Translator, TranslatorConfig};
