//! The per-country parser facade.

use anyhow::{Context, Result};
use log::{debug, warn};

use super::compiler::{CompositeGrammar, GrammarCompiler, GrammarMode};
use super::config::ParserConfig;
use super::extractor::extract;
use super::matcher;
use super::normalizer::Normalizer;
use super::patterns::ComponentLibrary;
use super::vocabulary::{Country, Vocabulary};
use crate::models::ParsedAddress;

/// Parses free-form addresses of one country variant.
///
/// Both grammars are compiled when the parser is built and never change
/// afterwards, so one instance can be shared across threads.
///
/// ```
/// use streetwise::address::{AddressParser, Country};
/// use streetwise::models::AddressField;
///
/// let parser = AddressParser::for_country(Country::Us).unwrap();
/// let parsed = parser.parse("1005 Gravier St, New Orleans, LA 70112").unwrap();
/// assert_eq!(parsed.get(AddressField::Suffix), Some("ST"));
/// assert_eq!(parsed.get(AddressField::City), Some("NEW ORLEANS"));
/// ```
#[derive(Debug, Clone)]
pub struct AddressParser {
    vocabulary: Vocabulary,
    config: ParserConfig,
    normalizer: Normalizer,
    full: CompositeGrammar,
    line: CompositeGrammar,
}

impl AddressParser {
    pub fn new(vocabulary: Vocabulary, config: ParserConfig) -> Result<Self> {
        vocabulary.validate()?;
        let compiler = GrammarCompiler::new(ComponentLibrary::new(&vocabulary), config.size_limit);
        let full = compiler.compile(GrammarMode::Full)?;
        let line = compiler.compile(GrammarMode::Line)?;
        let normalizer = Normalizer::new(&vocabulary)?;

        debug!("Address parser ready for vocabulary '{}'", vocabulary.name);
        Ok(Self {
            vocabulary,
            config,
            normalizer,
            full,
            line,
        })
    }

    /// A parser over the built-in vocabulary of `country` with default
    /// options.
    pub fn for_country(country: Country) -> Result<Self> {
        let vocabulary = Vocabulary::builtin(country)?;
        Self::new(vocabulary, ParserConfig::default())
            .with_context(|| format!("Failed to build address parser for '{country}'"))
    }

    /// Parse a complete address and normalize it.
    pub fn parse(&self, input: &str) -> Option<ParsedAddress> {
        self.parse_with(input, true)
    }

    /// Parse a complete address, normalizing only when asked.
    pub fn parse_with(&self, input: &str, normalize: bool) -> Option<ParsedAddress> {
        self.parse_with_grammar(input, &self.full, normalize)
    }

    /// Parse the street line of an address: number, street and secondary
    /// unit. Place fields are never produced.
    pub fn parse_address_line(&self, input: &str, normalize: bool) -> Option<ParsedAddress> {
        self.parse_with_grammar(input, &self.line, normalize)
    }

    /// Parse with a caller-supplied grammar, e.g. one compiled from a
    /// different vocabulary.
    pub fn parse_with_grammar(
        &self,
        input: &str,
        grammar: &CompositeGrammar,
        normalize: bool,
    ) -> Option<ParsedAddress> {
        let input = self.prepare(input)?;
        let raw = matcher::run(grammar, &input)?;
        let matched = extract(&raw);

        Some(if normalize {
            self.normalizer.normalize(&matched)
        } else {
            ParsedAddress::from(matched)
        })
    }

    fn prepare(&self, input: &str) -> Option<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        let length = trimmed.chars().count();
        if length > self.config.max_input_len {
            warn!(
                "Rejecting address input of {} characters (limit {})",
                length, self.config.max_input_len
            );
            return None;
        }
        Some(if self.config.uppercase_input {
            trimmed.to_uppercase()
        } else {
            trimmed.to_string()
        })
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn full_grammar(&self) -> &CompositeGrammar {
        &self.full
    }

    pub fn line_grammar(&self) -> &CompositeGrammar {
        &self.line
    }
}
