// model = "claude-opus-4-5"
// created = "2026-10-18"
// modified = "2026-10-18"
// driver = "Isaac Clayton"

//! Property-based tests for the generator and its oracle.

use proptest::prelude::*;
use proptest::test_runner::Config;

use deltafuzz::config::GeneratorConfig;
use deltafuzz::delta::AttrValue;
use deltafuzz::delta::Attributes;
use deltafuzz::delta::ContentUnit;
use deltafuzz::delta::DocumentType;
use deltafuzz::delta::Embed;
use deltafuzz::delta::InsertOp;
use deltafuzz::delta::Op;
use deltafuzz::delta::RichText;
use deltafuzz::delta::Snapshot;
use deltafuzz::delta::DETECTION_ID;
use deltafuzz::fuzz::consume::SpanQueue;
use deltafuzz::fuzz::detection;
use deltafuzz::fuzz::format::sample_format;
use deltafuzz::fuzz::OpGenerator;
use deltafuzz::random::SequentialIds;
use rand::rngs::StdRng;
use rand::SeedableRng;

// =============================================================================
// Strategies
// =============================================================================

/// Attributes drawn from a small pool so that neighbours often match and
/// detection ids are shared between ops.
fn arbitrary_attributes() -> impl Strategy<Value = Option<Attributes>> {
    let detection = prop_oneof![
        Just(None),
        Just(Some("d1")),
        Just(Some("d2")),
        Just(Some("d3")),
    ];
    let color = prop_oneof![Just(None), Just(Some("red")), Just(Some("blue"))];
    (detection, color, any::<bool>()).prop_map(|(detection, color, bold)| {
        let mut attributes = Attributes::new();
        if let Some(id) = detection {
            attributes.insert(DETECTION_ID, AttrValue::text(id));
        }
        if let Some(color) = color {
            attributes.insert("color", AttrValue::text(color));
        }
        if bold {
            attributes.insert("bold", AttrValue::Bool(true));
        }
        attributes.non_empty()
    })
}

fn arbitrary_content() -> impl Strategy<Value = ContentUnit> {
    prop_oneof![
        4 => "[a-zé日 ]{1,12}".prop_map(ContentUnit::Text),
        1 => (1u64..=2).prop_map(|n| ContentUnit::Embed(Embed::Number(n))),
        1 => Just(ContentUnit::Embed(Embed::Url { url: "http://quilljs.com".to_string() })),
    ]
}

fn arbitrary_snapshot() -> impl Strategy<Value = Snapshot> {
    prop::collection::vec((arbitrary_content(), arbitrary_attributes()), 0..12).prop_map(|ops| {
        ops.into_iter()
            .map(|(insert, attributes)| InsertOp::new(insert, attributes))
            .collect()
    })
}

/// A snapshot tagging one contiguous range `[start, start + len)` of a
/// plain text document with `d1`.
fn tagged_text(text: &str, start: usize, len: usize) -> Snapshot {
    let chars: Vec<char> = text.chars().collect();
    let before: String = chars[..start].iter().collect();
    let inside: String = chars[start..start + len].iter().collect();
    let after: String = chars[start + len..].iter().collect();
    let tag = Attributes::new().with(DETECTION_ID, AttrValue::text("d1"));
    return Snapshot::from_ops(vec![
        InsertOp::text(before),
        InsertOp::new(inside, Some(tag)),
        InsertOp::text(after),
    ])
    .normalized();
}

// =============================================================================
// Convergence
// =============================================================================

proptest! {
    #![proptest_config(Config {
        cases: 256,
        max_shrink_iters: 1000,
        fork: false,
        ..Config::default()
    })]

    /// Applying a generated edit through the rich-text type yields the
    /// predicted document.
    #[test]
    fn applied_edit_matches_prediction(snapshot in arbitrary_snapshot(), seed in any::<u64>()) {
        let mut generator = OpGenerator::seeded(seed, GeneratorConfig::default()).unwrap();
        let (edit, predicted) = generator.generate(&snapshot).unwrap();
        let actual = RichText.apply(&snapshot, &edit).unwrap();
        prop_assert!(
            actual.content_eq(&predicted),
            "edit {:?}\nexpected {:?}\nactual {:?}",
            edit,
            predicted.normalized(),
            actual.normalized()
        );
    }

    /// Generated edits never read past the end of the document, and the
    /// prediction has the length the edit implies.
    #[test]
    fn edits_stay_in_bounds(snapshot in arbitrary_snapshot(), seed in any::<u64>()) {
        let mut generator = OpGenerator::seeded(seed, GeneratorConfig::default()).unwrap();
        let (edit, predicted) = generator.generate(&snapshot).unwrap();

        let mut remaining = snapshot.len();
        for op in edit.ops() {
            match op {
                Op::Retain { retain, .. } => {
                    prop_assert!(*retain <= remaining);
                    remaining -= retain;
                }
                Op::Delete { delete } => {
                    prop_assert!(*delete <= remaining);
                    remaining -= delete;
                }
                Op::Insert { .. } => {}
            }
        }
        let expected_len = snapshot.len() as isize + edit.change_len();
        prop_assert_eq!(predicted.len() as isize, expected_len);
    }

    /// The input document is left untouched.
    #[test]
    fn generator_does_not_mutate_input(snapshot in arbitrary_snapshot(), seed in any::<u64>()) {
        let before = snapshot.clone();
        let mut generator = OpGenerator::seeded(seed, GeneratorConfig::default()).unwrap();
        generator.generate(&snapshot).unwrap();
        prop_assert_eq!(snapshot, before);
    }

    /// Long chains of edits keep converging, with documents growing and
    /// shrinking along the way.
    #[test]
    fn chained_edits_converge(seed in any::<u64>(), initial in "[a-z ]{0,150}") {
        let mut generator = OpGenerator::seeded(seed, GeneratorConfig::default()).unwrap();
        let mut doc = Snapshot::from_text(&initial);
        for _ in 0..40 {
            let (edit, predicted) = generator.generate(&doc).unwrap();
            let actual = RichText.apply(&doc, &edit).unwrap();
            prop_assert!(actual.content_eq(&predicted));
            doc = actual;
        }
    }
}

// =============================================================================
// Detection continuity
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Every pre-existing id left in the prediction covers exactly its old
    /// length in one unbroken extent.
    #[test]
    fn surviving_detections_are_intact(snapshot in arbitrary_snapshot(), seed in any::<u64>()) {
        let original = detection::covered_lengths(&snapshot);
        let mut generator = OpGenerator::seeded(seed, GeneratorConfig::default()).unwrap();
        let (_, predicted) = generator.generate(&snapshot).unwrap();

        for (id, span) in detection::scan(&predicted) {
            if let Some(&before) = original.get(&id) {
                prop_assert_eq!(span.covered, before, "id {} resized", id);
                prop_assert!(span.is_contiguous(), "id {} fragmented", id);
            }
        }
    }

    /// An id whose span is resized by the edit disappears completely.
    #[test]
    fn resized_detection_is_stripped(
        text in "[a-z]{4,30}",
        start_pct in 0.0..1.0f64,
        cut_pct in 0.0..1.0f64,
    ) {
        let total = text.chars().count();
        let start = ((start_pct * total as f64) as usize).min(total - 2);
        let len = total - start;
        let snapshot = tagged_text(&text, start, len);

        // Delete one unit inside the tagged range.
        let cut = start + ((cut_pct * len as f64) as usize).min(len - 1);
        let mut edit = deltafuzz::delta::Delta::new();
        edit.retain(cut, None).delete(1);

        let out = RichText.apply(&snapshot, &edit).unwrap();
        prop_assert!(out.ops().iter().all(|op| op.detection_id().is_none()));
        prop_assert_eq!(out.len(), total - 1);
    }

    /// An id whose span gets content inserted strictly inside it disappears
    /// completely, while inserting at either edge keeps it.
    #[test]
    fn inserts_inside_break_inserts_outside_do_not(
        text in "[a-z]{3,30}",
        at_pct in 0.0..=1.0f64,
    ) {
        let total = text.chars().count();
        let snapshot = tagged_text(&text, 0, total);
        let at = ((at_pct * total as f64) as usize).min(total);

        let mut edit = deltafuzz::delta::Delta::new();
        edit.retain(at, None).insert("X", None);
        let out = RichText.apply(&snapshot, &edit).unwrap();

        let spans = detection::scan(&out);
        if at == 0 || at == total {
            prop_assert_eq!(spans["d1"].covered, total);
        } else {
            prop_assert!(!spans.contains_key("d1"));
        }
    }
}

// =============================================================================
// Span consumer and format sampler
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Taking L units then the rest gives back the original content.
    #[test]
    fn consume_round_trip(snapshot in arbitrary_snapshot(), split_pct in 0.0..=1.0f64) {
        let total = snapshot.len();
        let split = ((split_pct * total as f64) as usize).min(total);

        let mut queue = SpanQueue::from(snapshot.clone());
        let mut ops = queue.take(split).unwrap();
        prop_assert_eq!(ops.iter().map(InsertOp::len).sum::<usize>(), split);
        ops.extend(queue.take(total - split).unwrap());
        prop_assert!(queue.is_empty());

        let rebuilt = Snapshot::from_ops(ops);
        prop_assert!(rebuilt.content_eq(&snapshot));
    }

    /// Without clearing allowed, a sampled format always carries at least one
    /// concrete value and no clearing markers.
    #[test]
    fn formats_without_null_are_concrete(seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut ids = SequentialIds::new("fresh");
        let config = GeneratorConfig::default();
        for _ in 0..32 {
            if let Some(patch) = sample_format(&mut rng, &mut ids, &config, false, &[]) {
                prop_assert!(patch.has_value());
                prop_assert!(patch.iter().all(|(_, value)| value.is_some()));
            }
        }
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn predicted_repair_matches_engine_on_fragmenting_insert() {
    let tag = Attributes::new().with(DETECTION_ID, AttrValue::text("d1"));
    let snapshot = Snapshot::from_ops(vec![InsertOp::new("hello world", Some(tag.clone()))]);

    let predicted = Snapshot::from_ops(vec![
        InsertOp::new("hello", Some(tag.clone())),
        InsertOp::text("X"),
        InsertOp::new(" world", Some(tag)),
    ]);
    let repaired = detection::validate(&predicted, &detection::covered_lengths(&snapshot)).snapshot;
    assert_eq!(repaired.ops(), &[
        InsertOp::text("hello"),
        InsertOp::text("X"),
        InsertOp::text(" world"),
    ]);

    let mut edit = deltafuzz::delta::Delta::new();
    edit.retain(5, None).insert("X", None);
    let actual = RichText.apply(&snapshot, &edit).unwrap();
    assert!(actual.content_eq(&repaired));
}

#[test]
fn long_documents_shrink() {
    let mut generator = OpGenerator::seeded(99, GeneratorConfig::default()).unwrap();
    let mut doc = Snapshot::from_text(&"lorem ipsum ".repeat(50));
    let start = doc.len();
    for _ in 0..400 {
        let (edit, predicted) = generator.generate(&doc).unwrap();
        let actual = RichText.apply(&doc, &edit).unwrap();
        assert!(actual.content_eq(&predicted));
        doc = actual;
    }
    assert!(doc.len() < start, "document grew from {} to {}", start, doc.len());
}
