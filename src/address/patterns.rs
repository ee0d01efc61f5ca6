//! Component pattern library.
//!
//! Each semantic token class of an address (number, street, secondary unit,
//! place, ...) is a [`Component`]: an ordered list of [`ComponentPattern`]
//! forms tried by precedence, first match wins. Vocabulary-derived word
//! lists (directionals, suffixes, regions) are literal alternations sorted
//! longest-first so a short token never shadows a longer one that starts
//! the same way.
//!
//! Field captures use the snake_case [`AddressField`](crate::models::AddressField)
//! names. The same name may appear in several forms; the compiler makes the
//! group names unique before compiling.

use std::collections::BTreeSet;

use super::vocabulary::Vocabulary;

/// One named grammar fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentPattern {
    pub name: String,
    pub pattern: String,
    /// Lower values are tried first.
    pub precedence: usize,
}

impl ComponentPattern {
    pub fn new(name: impl Into<String>, pattern: impl Into<String>, precedence: usize) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            precedence,
        }
    }
}

/// A token class and its alternative forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub name: &'static str,
    pub forms: Vec<ComponentPattern>,
}

impl Component {
    fn new(name: &'static str, forms: Vec<ComponentPattern>) -> Self {
        Self { name, forms }
    }

    /// The forms as one non-capturing alternation in precedence order.
    pub fn pattern(&self) -> String {
        ordered_choice(&self.forms)
    }
}

/// Join `forms` into `(?:a|b|...)`, lowest precedence first. Ties keep
/// declaration order.
pub fn ordered_choice(forms: &[ComponentPattern]) -> String {
    let mut ordered: Vec<&ComponentPattern> = forms.iter().collect();
    ordered.sort_by_key(|form| form.precedence);

    let body = ordered
        .iter()
        .map(|form| format!("(?:{})", form.pattern))
        .collect::<Vec<_>>()
        .join("|");
    format!("(?:{body})")
}

/// Alternation of literal words, longest first, regex-escaped, with inner
/// spaces matching any run of whitespace.
pub fn literal_alternation<'a, I>(words: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let words: BTreeSet<String> = words
        .into_iter()
        .map(|word| word.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|word| !word.is_empty())
        .collect();

    let mut words: Vec<String> = words.into_iter().collect();
    words.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    let body = words
        .iter()
        .map(|word| regex::escape(word).replace(' ', r"\s+"))
        .collect::<Vec<_>>()
        .join("|");
    format!("(?:{body})")
}

/// Alternation of regex fragments in the given order.
pub fn pattern_alternation<'a, I>(patterns: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let body = patterns
        .into_iter()
        .map(|pattern| format!("(?:{pattern})"))
        .collect::<Vec<_>>()
        .join("|");
    format!("(?:{body})")
}

/// Every accepted spelling of the directionals: full word, abbreviation
/// with periods ("N.E.") and abbreviation without.
pub fn directional_forms(vocabulary: &Vocabulary) -> Vec<String> {
    let mut forms = Vec::with_capacity(vocabulary.directionals.len() * 3);
    for (name, abbreviation) in &vocabulary.directionals {
        forms.push(name.clone());
        let dotted: String = abbreviation
            .chars()
            .flat_map(|c| [c, '.'])
            .collect();
        forms.push(dotted);
        forms.push(abbreviation.clone());
    }
    forms
}

/// The per-variant instantiation of every component.
#[derive(Debug, Clone)]
pub struct ComponentLibrary {
    pub variant: String,
    pub number: Component,
    pub directional: String,
    pub suffix: String,
    pub street: Component,
    pub secondary: Component,
    pub place: Component,
    pub postal_box: Option<Component>,
    pub armed_forces: Option<Component>,
}

impl ComponentLibrary {
    pub fn new(vocabulary: &Vocabulary) -> Self {
        let directional =
            literal_alternation(directional_forms(vocabulary).iter().map(String::as_str));
        let suffix = literal_alternation(vocabulary.suffix_pairs().map(|(spelling, _)| spelling));
        let region = literal_alternation(
            vocabulary
                .regions
                .iter()
                .flat_map(|(name, code)| [name.as_str(), code.as_str()]),
        );
        let zip = format!("(?P<zip>{})", vocabulary.postal_code);

        Self {
            variant: vocabulary.name.clone(),
            number: number_component(),
            street: street_component(&directional, &suffix, &vocabulary.street_exceptions),
            secondary: secondary_component(vocabulary),
            place: place_component(&region, &zip),
            postal_box: postal_box_component(vocabulary),
            armed_forces: armed_forces_component(vocabulary, &zip),
            directional,
            suffix,
        }
    }
}

fn number_component() -> Component {
    let forms = vec![
        ComponentPattern::new("attached", r"\d+[A-Z]\b", 0),
        ComponentPattern::new("fraction", r"\d+\s+\d+/\d+", 1),
        ComponentPattern::new("plain", r"\d+(?:-\d+)?", 2),
        ComponentPattern::new("grid", r"[NSEW]\d{1,3}\s?[NSEW]\d{1,6}", 3),
    ];
    let choice = ordered_choice(&forms);
    Component::new(
        "number",
        vec![ComponentPattern::new(
            "number",
            format!("(?P<number>{choice})"),
            0,
        )],
    )
}

fn street_component(directional: &str, suffix: &str, exceptions: &[String]) -> Component {
    let d = directional;
    let s = suffix;
    let predirectional = format!(r"(?:(?P<predirectional>{d})\W+)?");
    let mut forms = Vec::with_capacity(5);

    if !exceptions.is_empty() {
        let named = pattern_alternation(exceptions.iter().map(String::as_str));
        forms.push(ComponentPattern::new(
            "exception",
            format!(r"{predirectional}(?P<street>{named})\b(?:\W+(?P<suffix>{s})\b)?"),
            0,
        ));
    }
    forms.push(ComponentPattern::new(
        "directional_name",
        format!(r"(?P<street>{d})\W+(?P<suffix>{s})\b"),
        1,
    ));
    forms.push(ComponentPattern::new(
        "numbered",
        format!(r"{predirectional}(?P<street>[^,]*\d)(?:[^\w,]+(?P<postdirectional>{d})\b)"),
        2,
    ));
    forms.push(ComponentPattern::new(
        "suffixed",
        format!(
            r"{predirectional}(?P<street>[^,]+)(?:[^\w,]+(?P<suffix>{s})\b)(?:[^\w,]+(?P<postdirectional>{d})\b)?"
        ),
        3,
    ));
    forms.push(ComponentPattern::new(
        "fallback",
        format!(
            r"{predirectional}(?P<street>[^,]+?)(?:[^\w,]+(?P<suffix>{s})\b)?(?:[^\w,]+(?P<postdirectional>{d})\b)?"
        ),
        4,
    ));

    Component::new("street", forms)
}

fn secondary_component(vocabulary: &Vocabulary) -> Component {
    let mut forms = Vec::with_capacity(5);
    let rangeless = (!vocabulary.rangeless_units.is_empty()).then(|| {
        pattern_alternation(
            vocabulary
                .rangeless_units
                .iter()
                .map(|unit| unit.pattern.as_str()),
        )
    });

    if !vocabulary.ranged_units.is_empty() {
        let ranged =
            pattern_alternation(vocabulary.ranged_units.iter().map(|unit| unit.pattern.as_str()));
        // "APT 4 REAR": the trailing unit qualifies the number.
        if let Some(rangeless) = &rangeless {
            forms.push(ComponentPattern::new(
                "ranged_qualified",
                format!(
                    r"(?P<secondary_unit>{ranged})\W+(?P<secondary_number>[\w-]+\W+(?:{rangeless}))\b"
                ),
                0,
            ));
        }
        forms.push(ComponentPattern::new(
            "ranged",
            format!(r"(?P<secondary_unit>{ranged})\W+(?P<secondary_number>[\w-]+)"),
            1,
        ));
        forms.push(ComponentPattern::new(
            "ranged_attached",
            format!(r"(?P<secondary_unit>{ranged})(?P<secondary_number>\d[\w-]*)"),
            2,
        ));
    }
    forms.push(ComponentPattern::new(
        "marker",
        r"(?P<unit_marker>#)\W*(?P<secondary_number>[\w-]+)",
        3,
    ));
    if let Some(rangeless) = &rangeless {
        forms.push(ComponentPattern::new(
            "rangeless",
            format!(r"(?P<secondary_unit>{rangeless})\b"),
            4,
        ));
    }

    Component::new("secondary", forms)
}

fn place_component(region: &str, zip: &str) -> Component {
    Component::new(
        "place",
        vec![ComponentPattern::new(
            "place",
            format!(r"(?:(?P<city>[^\d,]+?)\W+(?P<state>{region})\b\W*)?{zip}?"),
            0,
        )],
    )
}

fn postal_box_component(vocabulary: &Vocabulary) -> Option<Component> {
    if vocabulary.postal_box.is_empty() {
        return None;
    }
    let prefixes = pattern_alternation(vocabulary.postal_box.iter().map(String::as_str));
    Some(Component::new(
        "postal_box",
        vec![ComponentPattern::new(
            "postal_box",
            format!(r"(?P<street_line>{prefixes}\s*\d+)"),
            0,
        )],
    ))
}

fn armed_forces_component(vocabulary: &Vocabulary, zip: &str) -> Option<Component> {
    let forces = vocabulary.armed_forces()?;
    let cities = literal_alternation(forces.cities.iter().map(String::as_str));
    let regions = literal_alternation(forces.regions.iter().map(String::as_str));
    Some(Component::new(
        "armed_forces",
        vec![ComponentPattern::new(
            "armed_forces",
            format!(r"(?P<street_line>.+?)\W+(?P<city>{cities})\W+(?P<state>{regions})\W+{zip}"),
            0,
        )],
    ))
}
