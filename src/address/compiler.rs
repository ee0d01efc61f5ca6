//! Assembly of component patterns into composite grammars.
//!
//! A [`CompositeGrammar`] is one anchored regex whose top-level alternation
//! lists the whole-address forms in precedence order: special forms first,
//! the general number + street form last. The regex engine reports the first
//! alternative that matches, so order decides between forms that could both
//! match the same input.

use std::fmt;
use std::ops::Range;
use std::sync::LazyLock;

use anyhow::{Context, Result, anyhow};
use log::debug;
use regex::{Captures, Regex, RegexBuilder};

use super::patterns::{ComponentLibrary, ComponentPattern};
use crate::models::AddressField;

/// Default cap on the compiled size of one grammar.
pub const DEFAULT_SIZE_LIMIT: usize = 64 * 1024 * 1024;

const GROUP_SEPARATOR: &str = "__";

static NAMED_GROUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(\?P<([A-Za-z_][A-Za-z0-9_]*)>").expect("valid named-group pattern")
});

/// Which shape of input a grammar accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrammarMode {
    /// A complete address. The whole input must be consumed.
    Full,
    /// The street line only. Anything after a comma is ignored.
    Line,
}

impl fmt::Display for GrammarMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => write!(f, "full"),
            Self::Line => write!(f, "line"),
        }
    }
}

/// A compiled, validated grammar.
///
/// Only [`CompositeGrammar::build`] and [`GrammarCompiler`] create one, and
/// both refuse grammars that do not compile or capture no address field.
#[derive(Debug, Clone)]
pub struct CompositeGrammar {
    mode: GrammarMode,
    variant: String,
    alternatives: Vec<ComponentPattern>,
    /// Capture-group numbers (the `N` of `field__N`) owned by each
    /// alternative, parallel to `alternatives`.
    group_ranges: Vec<Range<usize>>,
    source: String,
    regex: Regex,
}

impl CompositeGrammar {
    /// Order `alternatives` by precedence, wrap them for `mode` and compile.
    pub fn build(
        mode: GrammarMode,
        variant: impl Into<String>,
        mut alternatives: Vec<ComponentPattern>,
        size_limit: usize,
    ) -> Result<Self> {
        let variant = variant.into();
        if alternatives.is_empty() {
            return Err(anyhow!("Grammar '{variant}/{mode}' has no alternatives"));
        }
        alternatives.sort_by_key(|alternative| alternative.precedence);

        let mut counter = 0;
        let mut group_ranges = Vec::with_capacity(alternatives.len());
        let mut bodies = Vec::with_capacity(alternatives.len());
        for alternative in &alternatives {
            let start = counter;
            bodies.push(format!(
                "(?:{})",
                uniquify_group_names(&alternative.pattern, &mut counter)
            ));
            group_ranges.push(start..counter);
        }

        let choice = bodies.join("|");
        let source = match mode {
            GrammarMode::Full => format!("^(?:{choice})$"),
            GrammarMode::Line => format!("^(?:{choice})[^\\w,]*(?:,.*)?$"),
        };

        let regex = RegexBuilder::new(&source)
            .case_insensitive(true)
            .size_limit(size_limit)
            .build()
            .with_context(|| format!("Failed to compile grammar '{variant}/{mode}'"))?;

        let grammar = Self {
            mode,
            variant,
            alternatives,
            group_ranges,
            source,
            regex,
        };
        grammar.validate()?;

        debug!(
            "Compiled grammar '{}/{}': {} alternatives, {} capture groups, {} bytes of source",
            grammar.variant,
            grammar.mode,
            grammar.alternatives.len(),
            grammar.regex.captures_len() - 1,
            grammar.source.len()
        );
        Ok(grammar)
    }

    fn validate(&self) -> Result<()> {
        let captures_field = self
            .regex
            .capture_names()
            .flatten()
            .any(|name| field_for_group(name).is_some());
        if !captures_field {
            return Err(anyhow!(
                "Grammar '{}/{}' captures no address field",
                self.variant,
                self.mode
            ));
        }
        Ok(())
    }

    pub fn mode(&self) -> GrammarMode {
        self.mode
    }

    pub fn variant(&self) -> &str {
        &self.variant
    }

    /// Alternatives in the order they are tried.
    pub fn alternatives(&self) -> &[ComponentPattern] {
        &self.alternatives
    }

    /// The regex source after group renaming.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub(crate) fn regex(&self) -> &Regex {
        &self.regex
    }

    /// The alternative a uniquified capture group belongs to.
    pub(crate) fn alternative_for_group(&self, group: &str) -> Option<&ComponentPattern> {
        let (_, index) = group.rsplit_once(GROUP_SEPARATOR)?;
        let index: usize = index.parse().ok()?;
        self.group_ranges
            .iter()
            .position(|range| range.contains(&index))
            .map(|position| &self.alternatives[position])
    }
}

/// Rename every `(?P<name>` in `pattern` to `(?P<name__N>`, numbering from
/// `counter`. Logical names may repeat across alternatives; the engine
/// requires unique ones.
pub fn uniquify_group_names(pattern: &str, counter: &mut usize) -> String {
    NAMED_GROUP
        .replace_all(pattern, |caps: &Captures<'_>| {
            let renamed = format!("(?P<{}{}{}>", &caps[1], GROUP_SEPARATOR, *counter);
            *counter += 1;
            renamed
        })
        .into_owned()
}

/// Map a (possibly uniquified) group name to its address field. Bookkeeping
/// groups map to `None`.
pub fn field_for_group(group: &str) -> Option<AddressField> {
    let logical = group
        .split_once(GROUP_SEPARATOR)
        .map_or(group, |(logical, _)| logical);
    logical.parse().ok()
}

/// Builds the composite grammars of one country variant.
#[derive(Debug, Clone)]
pub struct GrammarCompiler {
    library: ComponentLibrary,
    size_limit: usize,
}

impl GrammarCompiler {
    pub fn new(library: ComponentLibrary, size_limit: usize) -> Self {
        Self {
            library,
            size_limit,
        }
    }

    pub fn library(&self) -> &ComponentLibrary {
        &self.library
    }

    /// The whole-input forms of `mode`, in precedence order.
    pub fn alternatives(&self, mode: GrammarMode) -> Vec<ComponentPattern> {
        let library = &self.library;
        let lead = r"[^\w#]*";
        let number = library.number.pattern();
        let street = library.street.pattern();
        let secondary = library.secondary.pattern();
        let place = library.place.pattern();
        let general_line = format!(r"{lead}{number}\W*{street}(?:\W+{secondary})?");

        let mut alternatives = Vec::with_capacity(3);
        match mode {
            GrammarMode::Full => {
                if let Some(armed_forces) = &library.armed_forces {
                    alternatives.push(ComponentPattern::new(
                        "armed_forces",
                        format!(r"{lead}{}\W*", armed_forces.pattern()),
                        0,
                    ));
                }
                if let Some(postal_box) = &library.postal_box {
                    alternatives.push(ComponentPattern::new(
                        "postal_box",
                        format!(r"{lead}{}(?:\W+{place})?\W*", postal_box.pattern()),
                        1,
                    ));
                }
                alternatives.push(ComponentPattern::new(
                    "general",
                    format!(r"{general_line}(?:\W+{place})?\W*"),
                    2,
                ));
            }
            GrammarMode::Line => {
                if let Some(postal_box) = &library.postal_box {
                    alternatives.push(ComponentPattern::new(
                        "postal_box",
                        format!("{lead}{}", postal_box.pattern()),
                        1,
                    ));
                }
                alternatives.push(ComponentPattern::new("general", general_line, 2));
            }
        }
        alternatives
    }

    pub fn compile(&self, mode: GrammarMode) -> Result<CompositeGrammar> {
        CompositeGrammar::build(
            mode,
            self.library.variant.clone(),
            self.alternatives(mode),
            self.size_limit,
        )
    }
}
