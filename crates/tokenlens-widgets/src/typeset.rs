#![forbid(unsafe_code)]

//! LaTeX generation for the external math renderer.
//!
//! The detail panel's typeset form is a two-column `array` environment:
//! token label on the left, its score on the right, one row per token in
//! original token order. Token text is escaped so user input can never be
//! interpreted as markup by the typesetting engine.

/// Characters that carry meaning in the typesetting syntax.
const SPECIAL: [char; 10] = ['#', '%', '&', '~', '_', '^', '\\', '{', '}', '$'];

/// Escape typesetting syntax characters by prefixing each with a backslash.
///
/// Every occurrence of `# % & ~ _ ^ \ { } $` is escaped; all other
/// characters pass through unchanged.
#[must_use]
pub fn escape_math(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if SPECIAL.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Build the two-column attention array for one token's score row.
///
/// Scores are formatted to exactly two decimal places. The caller
/// guarantees `tokens` and `scores` have equal length (the attention
/// matrix is square by construction).
#[must_use]
pub fn attention_array(tokens: &[String], scores: &[f64]) -> String {
    debug_assert_eq!(tokens.len(), scores.len());
    let mut latex = String::from("\\begin{array}{l l}\n");
    for (token, score) in tokens.iter().zip(scores) {
        latex.push_str(&format!("{} & {score:.2} \\\\\n", escape_math(token)));
    }
    latex.push_str("\\end{array}");
    latex
}

/// Wrap an expression in display-math delimiters.
#[must_use]
pub fn display_math(expr: &str) -> String {
    format!("\\[{expr}\\]")
}
