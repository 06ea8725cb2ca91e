pub mod assemble;
pub mod checker;
mod classify;
pub mod client;
pub mod error;
pub mod extract;
pub mod locator;

pub use checker::ProductChecker;
pub use client::PageClient;
pub use error::{ErrorKind, ScraperError};
pub use extract::{ExtractedFields, Extractor};
pub use locator::{FieldLocator, HtmlDocument};
