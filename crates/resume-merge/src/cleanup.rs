//! Residual cleanup: the safety net that deletes any placeholder-shaped text
//! the scalar and block passes did not resolve.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// `{…}` or `{{…}}` with no braces inside.
static RESIDUAL_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{?[^{}]*\}\}?").expect("residual token pattern is always valid")
});

/// True if `text` still contains a placeholder-shaped token.
pub fn has_residual_tokens(text: &str) -> bool {
    RESIDUAL_TOKEN.is_match(text)
}

/// Deepest `{` nesting in `text`. A `}` with nothing open is ignored.
///
/// Both fixpoint passes peel at most one nesting level per round, so this
/// bounds their round count.
pub fn brace_depth(text: &str) -> usize {
    let mut depth = 0usize;
    let mut max = 0usize;
    for byte in text.bytes() {
        match byte {
            b'{' => {
                depth += 1;
                max = max.max(depth);
            }
            b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    max
}

/// Deletes every placeholder-shaped token from `text`.
///
/// Runs to a fixpoint: deleting `{b}` from `{a{b}c}` exposes `{ac}`, which is
/// deleted on the next round. The result never contains a token, so the pass
/// is idempotent. Rounds grow with [`brace_depth`]; [`crate::Merger`] caps it.
pub fn strip_residual_tokens(text: &str) -> String {
    let mut out = match RESIDUAL_TOKEN.replace_all(text, "") {
        Cow::Borrowed(unchanged) => return unchanged.to_string(),
        Cow::Owned(stripped) => stripped,
    };
    while let Cow::Owned(stripped) = RESIDUAL_TOKEN.replace_all(&out, "") {
        out = stripped;
    }
    out
}
