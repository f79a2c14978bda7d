//! Line classification for install scripts.
//!
//! Directives are ordinary shell comments, so a script stays runnable as a
//! plain shell file:
//!
//! ```text
//! ## partition
//! # var DISK: Disk to install to
//! parted "$DISK" mklabel gpt
//!
//! ## format
//! # import DISK
//! mkfs.ext4 "${DISK}1"
//! ```

use std::sync::LazyLock;

use regex::Regex;

/// Marker that starts a new named section.
pub const HEADING_MARKER: &str = "##";

static VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*#\s*var\s+(\w+)\s*:(.+)").expect("valid var regex"));

static IMPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*#\s*import\s+(\w+)$").expect("valid import regex"));

/// What a single script line means to the grouper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `## name`: start of a new section.
    Heading(&'a str),
    /// `# var NAME: description`
    Declare {
        name: &'a str,
        description: &'a str,
    },
    /// `# import NAME`
    Import(&'a str),
    /// Anything else.
    Content,
}

/// Classify a line. Leading and trailing whitespace is ignored.
///
/// Headings take precedence, so `## var` is a section named `var`.
pub fn classify(line: &str) -> LineKind<'_> {
    let trimmed = line.trim();

    if let Some(rest) = trimmed.strip_prefix(HEADING_MARKER) {
        return LineKind::Heading(rest.trim());
    }

    if let Some(caps) = VAR_RE.captures(trimmed) {
        if let (Some(name), Some(description)) = (caps.get(1), caps.get(2)) {
            return LineKind::Declare {
                name: name.as_str(),
                description: description.as_str().trim(),
            };
        }
    }

    if let Some(name) = IMPORT_RE.captures(trimmed).and_then(|caps| caps.get(1)) {
        return LineKind::Import(name.as_str());
    }

    LineKind::Content
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_strips_marker_and_space() {
        assert_eq!(classify("## partition"), LineKind::Heading("partition"));
        assert_eq!(classify("##base"), LineKind::Heading("base"));
        assert_eq!(classify("  ##   spaced name  "), LineKind::Heading("spaced name"));
    }

    #[test]
    fn triple_hash_is_still_heading() {
        assert_eq!(classify("### deep"), LineKind::Heading("# deep"));
    }

    #[test]
    fn declare_with_description() {
        assert_eq!(
            classify("# var DISK: Disk to install to"),
            LineKind::Declare {
                name: "DISK",
                description: "Disk to install to",
            }
        );
    }

    #[test]
    fn declare_tolerates_spacing() {
        assert_eq!(
            classify("  #var   HOST_NAME   :   Hostname  "),
            LineKind::Declare {
                name: "HOST_NAME",
                description: "Hostname",
            }
        );
    }

    #[test]
    fn declare_without_description_is_content() {
        assert_eq!(classify("# var DISK:"), LineKind::Content);
        assert_eq!(classify("# var DISK"), LineKind::Content);
    }

    #[test]
    fn import_name() {
        assert_eq!(classify("# import DISK"), LineKind::Import("DISK"));
        assert_eq!(classify("#import DISK  "), LineKind::Import("DISK"));
    }

    #[test]
    fn import_with_trailing_words_is_content() {
        assert_eq!(classify("# import DISK now"), LineKind::Content);
    }

    #[test]
    fn heading_wins_over_directive() {
        assert_eq!(classify("## var X: y"), LineKind::Heading("var X: y"));
    }

    #[test]
    fn plain_lines_are_content() {
        assert_eq!(classify("echo hello"), LineKind::Content);
        assert_eq!(classify("# just a comment"), LineKind::Content);
        assert_eq!(classify(""), LineKind::Content);
    }
}
