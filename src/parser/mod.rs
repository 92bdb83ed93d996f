//! Wiki page parsing module.

mod bullet;
mod html_parser;
pub mod markup;
mod options;
mod table_extractor;
pub mod text;

pub use bullet::BulletFormatter;
pub use html_parser::HtmlParser;
pub use markup::Markup;
pub use options::{ErrorMode, PairingMode, ParseOptions, DEFAULT_TITLE_ELEMENT_ID};
pub use table_extractor::TableExtractor;
