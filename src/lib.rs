pub mod address;
pub mod cli;
pub mod models;

pub use address::{AddressParser, Country, ParserConfig, Vocabulary};
pub use models::{AddressDto, AddressField, ParsedAddress};
