//! Integration tests for pattern hyphenation.

use pdfgen_core::hyphenation::{ByteVector, CharVector, Hyphenation, HyphenationTree};
use pdfgen_core::{Error, PdfConfig};

const SOURCE: &str = r"
% Sample pattern file
\patterns{
1ta a1b
}
\hyphenation{
ta-ble   % exception beats patterns
}
";

// =============================================================================
// PATTERN LOADING
// =============================================================================

mod loading_tests {
    use super::*;

    #[test]
    fn test_from_tex_counts() {
        let tree = HyphenationTree::from_tex(SOURCE).unwrap();
        assert_eq!(tree.pattern_count(), 2);
        assert_eq!(tree.exception_count(), 1);
        assert_eq!(tree.pattern_weights("ta"), Some(vec![1, 0, 0]));
        assert_eq!(tree.pattern_weights("ab"), Some(vec![0, 1, 0]));
    }

    #[test]
    fn test_token_outside_group_rejected() {
        let err = HyphenationTree::from_tex("stray \\patterns{ 1ta }").unwrap_err();
        assert!(matches!(err, Error::Hyphenation(_)));
    }

    #[test]
    fn test_pattern_without_letters_rejected() {
        let mut tree = HyphenationTree::new();
        assert!(tree.add_pattern("123").is_err());
        assert_eq!(tree.pattern_count(), 0);
    }

    #[test]
    fn test_bad_exception_rejected() {
        let mut tree = HyphenationTree::new();
        assert!(tree.add_exception("-ab").is_err());
        assert!(tree.add_exception("a--b").is_err());
        assert_eq!(tree.exception_count(), 0);
    }

    #[test]
    fn test_later_pattern_replaces_earlier() {
        let mut tree = HyphenationTree::new();
        tree.add_pattern("1ta").unwrap();
        tree.add_pattern("t3a").unwrap();
        assert_eq!(tree.pattern_count(), 1);
        assert_eq!(tree.pattern_weights("ta"), Some(vec![0, 3, 0]));
    }
}

// =============================================================================
// HYPHENATING WORDS
// =============================================================================

mod hyphenate_tests {
    use super::*;

    #[test]
    fn test_patterns_find_breaks() {
        let tree = HyphenationTree::from_tex(SOURCE).unwrap();
        let h = tree.hyphenate("notable", 2, 3).unwrap();
        assert_eq!(h.hyphenation_points(), &[2, 4]);
        assert_eq!(h.to_string(), "no-ta-ble");
    }

    #[test]
    fn test_minimums_trim_breaks() {
        let tree = HyphenationTree::from_tex(SOURCE).unwrap();
        let h = tree.hyphenate("notable", 3, 3).unwrap();
        assert_eq!(h.hyphenation_points(), &[4]);
        assert!(tree.hyphenate("notable", 5, 3).is_none());
    }

    #[test]
    fn test_config_minimums() {
        let tree = HyphenationTree::from_tex(SOURCE).unwrap();
        let config = PdfConfig::new().with_hyphenation_min(3, 3);
        let h = tree.hyphenate_with("notable", &config).unwrap();
        assert_eq!(h.to_string(), "nota-ble");
    }

    #[test]
    fn test_exception_wins() {
        let tree = HyphenationTree::from_tex(SOURCE).unwrap();
        let h = tree.hyphenate("table", 2, 3).unwrap();
        assert_eq!(h.hyphenation_points(), &[2]);
        assert_eq!(h.pre_hyphen_text(0), Some("ta"));
        assert_eq!(h.post_hyphen_text(0), Some("ble"));
    }

    #[test]
    fn test_case_preserved_in_result() {
        let tree = HyphenationTree::from_tex(SOURCE).unwrap();
        let h = tree.hyphenate("Notable", 2, 3).unwrap();
        assert_eq!(h.word(), "Notable");
        assert_eq!(h.to_string(), "No-ta-ble");
    }

    #[test]
    fn test_short_or_unmatched_words() {
        let tree = HyphenationTree::from_tex(SOURCE).unwrap();
        assert!(tree.hyphenate("ab", 2, 3).is_none());
        assert!(tree.hyphenate("rhythm", 2, 3).is_none());
        assert!(tree.hyphenate("", 2, 3).is_none());
    }
}

// =============================================================================
// SUPPORTING TYPES
// =============================================================================

mod support_tests {
    use super::*;

    #[test]
    fn test_hyphenation_validation() {
        assert!(Hyphenation::new("word", vec![2, 1]).is_err());
        assert!(Hyphenation::new("word", vec![4]).is_err());
        let h = Hyphenation::new("word", vec![]).unwrap();
        assert!(h.is_empty());
        assert_eq!(h.to_string(), "word");
    }

    #[test]
    fn test_multibyte_word_offsets() {
        let h = Hyphenation::new("\u{E9}t\u{E9}", vec![1]).unwrap();
        assert_eq!(h.pre_hyphen_text(0), Some("\u{E9}"));
        assert_eq!(h.post_hyphen_text(0), Some("t\u{E9}"));
    }

    #[test]
    fn test_vectors_share_block_growth() {
        let mut bytes = ByteVector::with_block_size(3);
        let start = bytes.extend_from_slice(&[1, 2, 3, 4]);
        assert_eq!(start, 0);
        assert_eq!(bytes.capacity(), 6);
        bytes[5] = 9;
        assert_eq!(bytes.get(5), Some(9));
        assert_eq!(bytes.len(), 4);

        let mut chars = CharVector::with_block_size(2);
        for c in "abc".chars() {
            chars.push(c);
        }
        assert_eq!(chars.as_slice().iter().collect::<String>(), "abc");
        chars.clear();
        assert!(chars.is_empty());
        assert_eq!(chars.capacity(), 4);
    }
}
