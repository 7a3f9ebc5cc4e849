//! Cleaning rules applied to every raw candidate before it reaches the
//! master dictionary.

/// Literal placeholder some sources use for a missing translation.
const NULL_LITERAL: &str = "null";

/// A candidate that passed every cleaning rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub en: String,
    pub bn: String,
}

/// Clean an English headword into a dictionary key.
///
/// Strips `"`, trims and lowercases. Returns `None` when the result is empty
/// or does not start with an ASCII lowercase letter or digit.
pub fn clean_en(raw: &str) -> Option<String> {
    let en = strip_quotes(raw).trim().to_lowercase();
    let first = en.chars().next()?;
    if first.is_ascii_lowercase() || first.is_ascii_digit() {
        Some(en)
    } else {
        None
    }
}

/// Clean a Bangla translation.
///
/// Strips `"`, trims, removes the parenthetical annotation and trims again.
/// Returns `None` for an empty result or the literal `null`.
pub fn clean_bn(raw: &str) -> Option<String> {
    let bn = strip_quotes(raw);
    let bn = strip_parenthetical(bn.trim()).trim().to_string();
    if bn.is_empty() || bn == NULL_LITERAL {
        None
    } else {
        Some(bn)
    }
}

/// Apply all rejection rules to a raw `(en, bn)` pair.
pub fn normalize(en: Option<&str>, bn: Option<&str>) -> Option<Normalized> {
    let en = clean_en(en?)?;
    let bn = clean_bn(bn?)?;
    Some(Normalized { en, bn })
}

/// Split a cleaned Bangla value into its comma-separated pieces.
pub fn split_synonyms(bn: &str) -> impl Iterator<Item = &str> {
    bn.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn strip_quotes(s: &str) -> String {
    s.replace('"', "")
}

/// Remove the span from the first `(` to the last `)` after it.
///
/// Text without a closing parenthesis is left untouched.
fn strip_parenthetical(s: &str) -> String {
    let Some(open) = s.find('(') else {
        return s.to_string();
    };
    match s[open..].rfind(')') {
        Some(close) => {
            let close = open + close;
            format!("{}{}", &s[..open], &s[close + 1..])
        }
        None => s.to_string(),
    }
}
