//! Text-level rewriting before tokenization.

/// Variable letters accepted in user formulas, in binding order.
pub(crate) const VARIABLES: [char; 4] = ['a', 'b', 'c', 'd'];

#[inline]
pub(crate) fn is_variable(ch: char) -> bool {
    VARIABLES.contains(&ch)
}

#[inline]
fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Remove whitespace and make implicit multiplication explicit.
///
/// A `*` is inserted between two adjacent variable letters (`ad` → `a*d`,
/// `abc` → `a*b*c`), between a digit and a following variable (`2a` → `2*a`)
/// and between a variable and a following digit (`a2` → `a*2`).
pub fn normalize(formula: &str) -> String {
    let mut out = String::with_capacity(formula.len() * 2);
    let mut prev: Option<char> = None;
    for ch in formula.chars().filter(|c| !c.is_whitespace()) {
        if let Some(p) = prev {
            let implicit = (is_variable(p) && is_variable(ch))
                || (p.is_ascii_digit() && is_variable(ch))
                || (is_variable(p) && ch.is_ascii_digit());
            if implicit {
                out.push('*');
            }
        }
        out.push(ch);
        prev = Some(ch);
    }
    out
}

/// Replace whole-word `a, b, c, d` with `u.x, u.y, v.x, v.y`.
///
/// A letter is a whole word only when neither neighbour is `[A-Za-z0-9_]`,
/// so identifiers such as `ab` or `bad` are left untouched (and later rejected
/// by the tokenizer).
pub fn substitute_symbols(normalized: &str) -> String {
    let chars: Vec<char> = normalized.chars().collect();
    let mut out = String::with_capacity(normalized.len() * 3);
    for (i, &ch) in chars.iter().enumerate() {
        let before = i.checked_sub(1).map(|j| chars[j]);
        let after = chars.get(i + 1).copied();
        let standalone = !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char);
        match ch {
            'a' if standalone => out.push_str("u.x"),
            'b' if standalone => out.push_str("u.y"),
            'c' if standalone => out.push_str("v.x"),
            'd' if standalone => out.push_str("v.y"),
            _ => out.push(ch),
        }
    }
    out
}
