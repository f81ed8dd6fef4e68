use crate::format::Format;

/// Separator placed between fragments of multi-fragment formats
pub const FRAGMENT_SEPARATOR: &str = "\n\n";

/// Which formats get whitespace/markup cleanup before output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Normalization {
    /// EPUB is cleaned, TXT, PDF and MOBI are written as extracted
    #[default]
    Default,
    /// Every format is cleaned; MOBI markup is converted to text first
    All,
    /// Nothing is cleaned beyond the markup stripping EPUB always needs
    Off,
}

impl Normalization {
    pub fn applies_to(self, format: Format) -> bool {
        match self {
            Normalization::Default => format == Format::Epub,
            Normalization::All => true,
            Normalization::Off => false,
        }
    }
}

/// Collapse a raw text blob into one phrase per line.
///
/// Each line is trimmed, then split on double spaces, which mark phrase
/// boundaries in text pulled out of markup. Empty chunks are dropped and the
/// rest joined with `\n`. Applying it to its own output changes nothing.
pub fn normalize(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .flat_map(|line| line.split("  "))
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Join fragments in order with a blank line between each pair
pub fn join_fragments<S: AsRef<str>>(fragments: &[S]) -> String {
    let mut joined = String::new();
    for (i, fragment) in fragments.iter().enumerate() {
        if i > 0 {
            joined.push_str(FRAGMENT_SEPARATOR);
        }
        joined.push_str(fragment.as_ref());
    }
    joined
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_space_splits_phrases() {
        assert_eq!(normalize("Hello  world"), "Hello\nworld");
        assert_eq!(normalize("a   b"), "a\nb");
        assert_eq!(normalize("one two"), "one two");
    }

    #[test]
    fn test_drops_blank_lines_and_trims() {
        let raw = "\n\n   Title  \n\t\n  First line \r\nSecond\n\n";
        assert_eq!(normalize(raw), "Title\nFirst line\nSecond");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "  Chapter 1  \n\n  It was    a dark  night.\t \n",
            "tabs\t\tstay\n   \n x  y  z ",
            "",
            "single",
        ];
        for raw in samples {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn test_join_uses_n_minus_one_separators() {
        let pages = ["p1", "p2", "p3", "p4"];
        let joined = join_fragments(&pages);
        assert_eq!(joined, "p1\n\np2\n\np3\n\np4");
        assert_eq!(joined.matches(FRAGMENT_SEPARATOR).count(), pages.len() - 1);
        assert_eq!(join_fragments::<&str>(&[]), "");
        assert_eq!(join_fragments(&["only"]), "only");
    }

    #[test]
    fn test_policy() {
        assert!(Normalization::Default.applies_to(Format::Epub));
        assert!(!Normalization::Default.applies_to(Format::Mobi));
        assert!(!Normalization::Default.applies_to(Format::Txt));
        assert!(Format::ALL.iter().all(|f| Normalization::All.applies_to(*f)));
        assert!(Format::ALL.iter().all(|f| !Normalization::Off.applies_to(*f)));
    }
}
