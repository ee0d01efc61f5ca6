//! Grammar-based postal address parsing.
//!
//! The pipeline is the same for every country:
//!
//! 1. [`patterns`] instantiates the component fragments (number, street,
//!    secondary unit, place, postal box, armed forces) from a [`Vocabulary`].
//! 2. [`compiler`] orders them into one anchored [`CompositeGrammar`] per
//!    [`GrammarMode`]: special forms first, the general form last.
//! 3. [`matcher`] runs a grammar and reports the participating captures.
//! 4. [`extractor`] keeps the captures that name an address field.
//! 5. [`normalizer`] strips and canonicalizes each value against the
//!    vocabulary's lookup tables.
//!
//! [`AddressParser`] wires these together for one vocabulary. Country
//! differences live entirely in the vocabulary data.

pub mod compiler;
mod config;
pub mod extractor;
pub mod lookup;
pub mod matcher;
pub mod normalizer;
mod parser;
pub mod patterns;
pub mod vocabulary;

#[cfg(test)]
mod parser_test;

pub use compiler::{CompositeGrammar, GrammarCompiler, GrammarMode};
pub use config::{DEFAULT_MAX_INPUT_LEN, ParserConfig, ParserConfigBuilder};
pub use extractor::MatchResult;
pub use normalizer::Normalizer;
pub use parser::AddressParser;
pub use patterns::{ComponentLibrary, ComponentPattern};
pub use vocabulary::{Country, Vocabulary};
