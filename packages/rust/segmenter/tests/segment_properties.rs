use dividendlens_segmenter::{SegmentOptions, segment, segment_with, strip_annotations};
use dividendlens_shared::DuplicatePolicy;
use proptest::prelude::*;
use proptest::test_runner::Config;

fn non_ws_chars(s: &str) -> usize {
    s.chars().filter(|c| !c.is_whitespace()).count()
}

fn annotated_fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("[source: 1]".to_string()),
        Just(" [source: 12, 14]".to_string()),
        Just("[sou".to_string()),
        Just("rce: 2]".to_string()),
        Just("\n".to_string()),
        "[a-z ]{0,6}",
    ]
}

fn doc_line() -> impl Strategy<Value = (bool, String)> {
    prop_oneof![
        "[a-z]{1,6}".prop_map(|t| (true, format!("# {t}"))),
        "[a-z ]{0,10}".prop_map(|b| (false, b)),
    ]
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn headingless_document_is_one_trimmed_section(doc in "[a-zA-Z0-9 .,\n]{0,200}") {
        let map = segment(&doc);
        prop_assert_eq!(map.len(), 1);
        prop_assert_eq!(map.get("Introduzione"), Some(doc.trim()));
    }

    #[test]
    fn stripping_annotations_is_idempotent(parts in prop::collection::vec(annotated_fragment(), 0..20)) {
        let doc = parts.concat();
        let once = strip_annotations(&doc);
        let twice = strip_annotations(&once);
        prop_assert!(!once.contains("[source: "));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn body_text_is_neither_lost_nor_duplicated(lines in prop::collection::vec(doc_line(), 0..30)) {
        let doc = lines.iter().map(|(_, l)| l.as_str()).collect::<Vec<_>>().join("\n");
        let body_chars: usize = lines
            .iter()
            .filter(|(heading, _)| !heading)
            .map(|(_, l)| non_ws_chars(l))
            .sum();

        let opts = SegmentOptions {
            duplicates: DuplicatePolicy::Append,
            ..SegmentOptions::default()
        };
        let map = segment_with(&doc, &opts);
        let segmented: usize = map.iter().map(|(_, body)| non_ws_chars(body)).sum();
        prop_assert_eq!(segmented, body_chars);

        let headings = lines.iter().filter(|(heading, _)| *heading).count();
        prop_assert!(map.len() <= headings + 1);
    }

    #[test]
    fn distinct_titles_roundtrip(
        intro in "[a-z][a-z ]{0,20}[a-z]",
        titles in prop::collection::btree_set("[A-Z][a-z]{1,8}", 0..8),
        body in "[a-z][a-z .]{0,30}[a-z]",
    ) {
        let mut doc = intro.clone();
        for (i, title) in titles.iter().enumerate() {
            doc.push_str(&format!("\n## {}. **{title}** [source: {i}]\n{body}\n", i + 1));
        }

        let map = segment(&doc);
        prop_assert_eq!(map.len(), titles.len() + 1);
        prop_assert_eq!(map.get("Introduzione"), Some(intro.as_str()));
        for (key, title) in map.titles().skip(1).zip(titles.iter()) {
            prop_assert_eq!(key, title.as_str());
            prop_assert_eq!(map.get(key), Some(body.as_str()));
        }
    }
}
