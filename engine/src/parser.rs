//! Parser for the formatter's replacements-XML output stream.
//!
//! The tool emits one `<replacement offset='O' length='L'>TEXT</replacement>`
//! element per line, in ascending offset order. Order is preserved; lines
//! that do not match the element pattern are skipped, not errors.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::Replacement;

static REPLACEMENT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<replacement\soffset='(\d+)'\slength='(\d+)'>(.*)</replacement>")
        .expect("replacement pattern is valid")
});

/// Parse the tool's full stdout into an ordered replacement list.
#[must_use]
pub fn parse_replacements(output: &str) -> Vec<Replacement> {
    output.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<Replacement> {
    if !line.starts_with("<replacement offset") {
        return None;
    }
    let captures = REPLACEMENT_LINE.captures(line)?;
    let offset = captures[1].parse().ok()?;
    let length = captures[2].parse().ok()?;
    Some(Replacement::new(offset, length, unescape(&captures[3])))
}

/// Decode the entities the tool escapes inside replacement text.
///
/// `&lt;` must be decoded last so a `<` produced by an earlier step can never
/// be re-interpreted.
fn unescape(raw: &str) -> String {
    raw.replace("&#13;", "\r")
        .replace("&#10;", "\n")
        .replace("&lt;", "<")
}
