//! Operator handling shared by the Number, Date and NumberModifier types.

use std::sync::LazyLock;

use regex::Regex;

use crate::display::Suggestion;
use crate::operators::CompOperator;

static COMPARISON_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(<=|<|>=|>|!=|=)?(.*)$")
        .unwrap_or_else(|_| unreachable!("comparison regex is valid"))
});

/// Rewrites alternate comparison spellings to canonical tokens.
///
/// Only the first occurrence of each alternate is replaced.
pub(crate) fn normalize_comparison(value: &str) -> String {
    value
        .replacen('≥', ">=", 1)
        .replacen('≤', "<=", 1)
        .replacen("<>", "!=", 1)
        .replacen('≠', "!=", 1)
        .replacen("==", "=", 1)
}

/// Splits a leading comparison operator from the rest of the text.
pub(crate) fn split_comparison(value: &str) -> (Option<CompOperator>, &str) {
    match COMPARISON_PREFIX_RE.captures(value) {
        Some(caps) => {
            let operator = caps.get(1).and_then(|m| CompOperator::from_token(m.as_str()));
            let rest = caps.get(2).map_or("", |m| m.as_str());
            (operator, rest)
        }
        None => (None, value),
    }
}

/// An operator enumeration that can be offered as suggestions.
pub(crate) trait SuggestedOperator: Copy + PartialEq + 'static {
    /// Operators offered when nothing narrows the choice.
    const CANDIDATES: &'static [Self];
    /// Tokens and symbols matched against the typed prefix.
    const TOKENS_AND_SYMBOLS: &'static [&'static str];
    /// The operator assumed when the input has none.
    const DEFAULT: Self;

    fn resolve(token_or_symbol: &str) -> Option<Self>;
}

impl SuggestedOperator for CompOperator {
    const CANDIDATES: &'static [Self] = &CompOperator::ALL;
    const TOKENS_AND_SYMBOLS: &'static [&'static str] = &crate::operators::COMP_OPS_AND_SYMBOLS;
    const DEFAULT: Self = CompOperator::Eq;

    fn resolve(token_or_symbol: &str) -> Option<Self> {
        CompOperator::resolve(token_or_symbol)
    }
}

impl SuggestedOperator for crate::operators::MathOperator {
    const CANDIDATES: &'static [Self] = &crate::operators::MathOperator::ALL;
    const TOKENS_AND_SYMBOLS: &'static [&'static str] = &crate::operators::MATH_OPS_AND_SYMBOLS;
    const DEFAULT: Self = crate::operators::MathOperator::Assign;

    fn resolve(token_or_symbol: &str) -> Option<Self> {
        crate::operators::MathOperator::resolve(token_or_symbol)
    }
}

/// Builds operator suggestions for a partially typed operator value.
///
/// Suggestions are only produced while the user has not committed to an
/// explicit operator: the prefix is empty, does not parse, or parsed with
/// the implicit default operator. Each candidate operator is paired with the
/// parsed payload, or with `placeholder` when there is none.
pub(crate) fn operator_suggestions<Op, P>(
    prefix: &str,
    parsed: Option<(Op, P)>,
    placeholder: P,
    render: impl Fn(Op, &P) -> Suggestion,
) -> Vec<Suggestion>
where
    Op: SuggestedOperator,
{
    let committed = matches!(
        &parsed,
        Some((operator, _)) if *operator != Op::DEFAULT || prefix.starts_with('=')
    );
    if !prefix.is_empty() && committed {
        return Vec::new();
    }

    let (operators, payload) = if prefix.is_empty() {
        (Op::CANDIDATES.to_vec(), placeholder)
    } else {
        let mut matching: Vec<Op> = Vec::new();
        for op in Op::TOKENS_AND_SYMBOLS
            .iter()
            .filter(|token| token.starts_with(prefix))
            .filter_map(|token| Op::resolve(token))
        {
            if !matching.contains(&op) {
                matching.push(op);
            }
        }
        if matching.is_empty() {
            matching = Op::CANDIDATES.to_vec();
        }
        let payload = parsed.map_or(placeholder, |(_, payload)| payload);
        (matching, payload)
    };

    operators.into_iter().map(|op| render(op, &payload)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_comparison_symbols() {
        assert_eq!(normalize_comparison("≥5"), ">=5");
        assert_eq!(normalize_comparison("≤5"), "<=5");
        assert_eq!(normalize_comparison("≠5"), "!=5");
        assert_eq!(normalize_comparison("<>5"), "!=5");
        assert_eq!(normalize_comparison("==5"), "=5");
    }

    #[test]
    fn test_split_comparison_prefers_two_char_tokens() {
        assert_eq!(split_comparison("<=5"), (Some(CompOperator::Lte), "5"));
        assert_eq!(split_comparison(">=5"), (Some(CompOperator::Gte), "5"));
        assert_eq!(split_comparison("!=5"), (Some(CompOperator::Ne), "5"));
        assert_eq!(split_comparison("<5"), (Some(CompOperator::Lt), "5"));
        assert_eq!(split_comparison("5"), (None, "5"));
    }
}
