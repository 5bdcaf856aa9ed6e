//! Sentence validation, continuation merging and the root invariant

mod common;

use common::{at, die_katze_schlaeft, sentence, ScriptedAdapter};
use parsenorm_core::{NormalizeRequest, Normalizer, Offset, OwnedSentence};

fn fragment() -> OwnedSentence {
    sentence(
        "und dann",
        10,
        &[("und", "CCONJ", 2, "cc"), ("dann", "ADV", 0, "root")],
    )
}

#[test]
fn test_failing_sentence_contributes_nothing() {
    // "Die Katze schläft. und dann Es regnet."
    let es_regnet = sentence(
        "Es regnet.",
        20,
        &[
            ("Es", "PRON", 2, "expl"),
            ("regnet", "VERB", 0, "root"),
            (".", "PUNCT", 2, "punct"),
        ],
    );
    let es_regnet = at(es_regnet, 28);
    let mut with_fragment = ScriptedAdapter::discover().then(vec![
        die_katze_schlaeft(),
        at(fragment(), 19),
        es_regnet.clone(),
    ]);
    let mut without_fragment =
        ScriptedAdapter::discover().then(vec![die_katze_schlaeft(), es_regnet]);
    let request = NormalizeRequest::new("Die Katze schläft. und dann Es regnet.", "de");
    let normalizer = Normalizer::new();

    let (response, stats) = normalizer
        .normalize_with_stats(&mut with_fragment, &request)
        .unwrap();
    let reference = normalizer
        .normalize(&mut without_fragment, &request)
        .unwrap();

    assert_eq!(stats.sentences_skipped, 1);
    assert_eq!(stats.sentences_emitted, 2);
    assert_eq!(response.tokens.len(), 7);
    assert_eq!(response.dependencies.len(), 7);
    assert_eq!(
        response.sentences,
        Some(vec![Offset::new(0, 18), Offset::new(28, 38)])
    );
    assert!(response.tokens.iter().all(|t| t.lemma.is_none()));
    assert_eq!(
        response.tokens.iter().map(|t| t.id).collect::<Vec<_>>(),
        (0..7).collect::<Vec<_>>()
    );
    assert_eq!(response.tokens.len(), reference.tokens.len());
    assert_eq!(response.dependencies, reference.dependencies);
}

#[test]
fn test_validation_can_be_disabled_per_request() {
    let mut adapter = ScriptedAdapter::discover().then(vec![fragment()]);
    let request = NormalizeRequest::new("und dann", "de").with_validation(false);

    let response = Normalizer::new().normalize(&mut adapter, &request).unwrap();
    assert_eq!(response.tokens.len(), 2);
    assert_eq!(response.sentences, Some(vec![Offset::new(0, 8)]));
}

fn items() -> Vec<OwnedSentence> {
    vec![
        sentence(
            "Items: a;",
            0,
            &[
                ("Items", "NOUN", 0, "root"),
                (":", "PUNCT", 1, "punct"),
                ("a", "NOUN", 1, "appos"),
                (";", "PUNCT", 1, "punct"),
            ],
        ),
        at(
            sentence("b;", 4, &[("b", "NOUN", 0, "root"), (";", "PUNCT", 1, "punct")]),
            10,
        ),
        at(
            sentence(
                "c is last.",
                6,
                &[
                    ("c", "NOUN", 3, "nsubj"),
                    ("is", "AUX", 3, "cop"),
                    ("last", "ADJ", 0, "root"),
                    (".", "PUNCT", 3, "punct"),
                ],
            ),
            13,
        ),
    ]
}

#[test]
fn test_semicolon_run_is_validated_as_one_sentence() {
    // Each part fails on its own: the first two do not end in `.?!`, the
    // last starts lowercase. Fused, "Items: a; b; c is last." passes.
    let mut adapter = ScriptedAdapter::discover().then(items());
    let request = NormalizeRequest::new("Items: a; b; c is last.", "en");

    let (response, stats) = Normalizer::new()
        .normalize_with_stats(&mut adapter, &request)
        .unwrap();

    assert_eq!(stats.sentences_emitted, 1);
    assert_eq!(stats.sentences_skipped, 0);
    assert_eq!(response.tokens.len(), 10);
    assert_eq!(response.sentences, Some(vec![Offset::new(0, 23)]));
}

#[test]
fn test_unvalidated_run_keeps_part_local_heads() {
    let mut adapter = ScriptedAdapter::discover().then(items());
    let request = NormalizeRequest::new("Items: a; b; c is last.", "en").with_validation(false);

    let response = Normalizer::new().normalize(&mut adapter, &request).unwrap();

    // one root per raw part; positions resolve within each part
    let roots: Vec<usize> = response
        .dependencies
        .iter()
        .filter(|d| d.is_root())
        .map(|d| d.dependent)
        .collect();
    assert_eq!(roots, vec![0, 4, 8]);
    let c = &response.dependencies[6];
    assert_eq!((c.governor, c.dependent), (8, 6));
}

#[test]
fn test_trailing_semicolon_run_is_still_considered() {
    let mut adapter = ScriptedAdapter::discover().then(vec![
        die_katze_schlaeft(),
        at(
            sentence(
                "Sie träumt;",
                10,
                &[
                    ("Sie", "PRON", 2, "nsubj"),
                    ("träumt", "VERB", 0, "root"),
                    (";", "PUNCT", 2, "punct"),
                ],
            ),
            19,
        ),
    ]);
    let request = NormalizeRequest::new("Die Katze schläft. Sie träumt;", "de");

    let (response, stats) = Normalizer::new()
        .normalize_with_stats(&mut adapter, &request)
        .unwrap();

    // the open run is emitted as a logical sentence and then fails check 2
    assert_eq!(stats.sentences_emitted, 1);
    assert_eq!(stats.sentences_skipped, 1);
    assert_eq!(response.tokens.len(), 4);
}

#[test]
fn test_root_iff_self_governed() {
    let mut adapter = ScriptedAdapter::discover().then(items());
    let request = NormalizeRequest::new("Items: a; b; c is last.", "en").with_validation(false);
    let response = Normalizer::new().normalize(&mut adapter, &request).unwrap();

    let emitted: Vec<usize> = response.tokens.iter().map(|t| t.id).collect();
    for dependency in &response.dependencies {
        assert_eq!(dependency.is_root(), dependency.governor == dependency.dependent);
        assert!(emitted.contains(&dependency.governor));
    }
}
