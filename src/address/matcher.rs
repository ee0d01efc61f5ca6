//! Running a compiled grammar against one input.

use log::trace;

use super::compiler::CompositeGrammar;

/// One named group that took part in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawCapture<'a> {
    /// Uniquified group name, e.g. `street__7`.
    pub group: &'a str,
    pub value: &'a str,
}

/// Every participating named capture of a successful match, in group order.
/// Groups of alternatives that were not taken are absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch<'a> {
    pub captures: Vec<RawCapture<'a>>,
    /// Name of the top-level alternative that matched.
    pub alternative: Option<&'a str>,
}

/// Match `input` against `grammar`.
///
/// Blank input is rejected without running the regex. A failed match is
/// `None`; it is an expected outcome, not an error.
pub fn run<'a>(grammar: &'a CompositeGrammar, input: &'a str) -> Option<RawMatch<'a>> {
    if input.trim().is_empty() {
        return None;
    }

    let regex = grammar.regex();
    let Some(caps) = regex.captures(input) else {
        trace!("No {} match for {:?}", grammar.mode(), input);
        return None;
    };

    let captures: Vec<RawCapture<'a>> = regex
        .capture_names()
        .flatten()
        .filter_map(|group| {
            caps.name(group).map(|m| RawCapture {
                group,
                value: m.as_str(),
            })
        })
        .collect();

    let alternative = captures
        .first()
        .and_then(|capture| grammar.alternative_for_group(capture.group))
        .map(|alternative| alternative.name.as_str());

    trace!(
        "{} match for {:?} via {:?}: {} captures",
        grammar.mode(),
        input,
        alternative,
        captures.len()
    );
    Some(RawMatch {
        captures,
        alternative,
    })
}
