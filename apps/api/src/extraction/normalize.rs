/// Collapses every run of whitespace (spaces, tabs, newlines, form feeds) into a
/// single space and strips leading/trailing whitespace.
pub fn normalize(raw_text: &str) -> String {
    raw_text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_double_whitespace(s: &str) -> bool {
        let chars: Vec<char> = s.chars().collect();
        chars
            .windows(2)
            .any(|w| w[0].is_whitespace() && w[1].is_whitespace())
    }

    #[test]
    fn test_collapses_mixed_whitespace() {
        assert_eq!(normalize("Jane\n\n  Doe\t\tEngineer\r\n"), "Jane Doe Engineer");
    }

    #[test]
    fn test_trims_edges() {
        assert_eq!(normalize("   padded   "), "padded");
    }

    #[test]
    fn test_whitespace_only_becomes_empty() {
        assert_eq!(normalize(" \n\t\u{000C} "), "");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_unicode_whitespace_is_collapsed() {
        assert_eq!(normalize("a\u{00A0}\u{2003}b"), "a b");
    }

    #[test]
    fn test_output_has_no_double_or_edge_whitespace() {
        let samples = [
            "Hello\n\nWorld",
            "\t lead and trail \n",
            "one  two   three    four",
            "page1\u{000C}page2",
            "x",
            "  \n ",
        ];
        for sample in samples {
            let out = normalize(sample);
            assert!(!has_double_whitespace(&out), "double whitespace in {out:?}");
            assert_eq!(out, out.trim(), "edge whitespace in {out:?}");
        }
    }

    #[test]
    fn test_idempotent() {
        let samples = ["a  b\n c", "  ", "Résumé\t\tskills:\nRust, SQL"];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once);
        }
    }
}
