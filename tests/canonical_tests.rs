use screen_graph::canonical::id_map::{IdEntry, IdKind, IdMap, SavedMaps};
use screen_graph::canonical::screen_ids::build_screen_catalog;
use screen_graph::trace::diagnostics::{Diagnostics, ParseWarning};
use screen_graph::trace::document::TraceDocument;

use crate::common::fixtures::{hash, login_home_trace};

mod common;

// =========================================================================
// Screen id assignment
// =========================================================================

#[test]
fn declared_screens_come_first_then_transition_only_screens() {
    let text = format!(
        "Transitions (2):\n\
         {t1}: (s:{a}, t:{b}): act=(1) click, cp=null\n\
         {t2}: (s:{b}, t:{d}): act=(1) click, cp=null\n\
         States (2):\n\
         {a}, Login, x\n\
         {b}, Home, y\n",
        t1 = hash('1'),
        t2 = hash('2'),
        a = hash('a'),
        b = hash('b'),
        d = hash('d'),
    );
    let doc = TraceDocument::from_text(text);
    let catalog = build_screen_catalog(&doc, &mut Diagnostics::new());

    assert_eq!(catalog.ids.original_of("S1"), Some(hash('a').as_str()));
    assert_eq!(catalog.ids.original_of("S2"), Some(hash('b').as_str()));
    assert_eq!(catalog.ids.original_of("S3"), Some(hash('d').as_str()));
    assert_eq!(catalog.ids.len(), 3);

    assert_eq!(catalog.name_of(&hash('a')), Some("Login"));
    assert_eq!(catalog.name_of(&hash('b')), Some("Home"));
    assert_eq!(catalog.name_of(&hash('d')), None, "transition-only screen has no name");
    assert_eq!(catalog.display_name(&hash('d'), "Unknown Screen"), "Unknown Screen");
}

#[test]
fn declaration_order_beats_transition_order() {
    // Transitions mention b before a, States declares a first.
    let text = format!(
        "Transitions (1):\n\
         {t}: (s:{b}, t:{a}): act=(1) click, cp=null\n\
         States (2):\n\
         {a}, First, x\n\
         {b}, Second, y\n",
        t = hash('9'),
        a = hash('a'),
        b = hash('b'),
    );
    let catalog = build_screen_catalog(&TraceDocument::from_text(text), &mut Diagnostics::new());

    assert_eq!(catalog.ids.canonical_of(&hash('a')), Some("S1"));
    assert_eq!(catalog.ids.canonical_of(&hash('b')), Some("S2"));
}

#[test]
fn duplicate_declaration_keeps_first_name_and_id() {
    let text = format!(
        "States (3):\n\
         {a}, Login, x\n\
         {b}, Home, y\n\
         {a}, Renamed, z\n",
        a = hash('a'),
        b = hash('b'),
    );
    let mut diagnostics = Diagnostics::new();
    let catalog = build_screen_catalog(&TraceDocument::from_text(text), &mut diagnostics);

    assert_eq!(catalog.ids.len(), 2);
    assert_eq!(catalog.ids.canonical_of(&hash('a')), Some("S1"));
    assert_eq!(catalog.name_of(&hash('a')), Some("Login"));
    // Header says 3, only 2 distinct screens
    assert!(diagnostics.warnings().contains(&ParseWarning::CountMismatch {
        section: "States".into(),
        declared: 3,
        found: 2,
    }));
}

#[test]
fn missing_states_section_uses_transitions_only() {
    let text = format!(
        "Transitions (1):\n{t}: (s:{a}, t:{b}): act=(1) swipe, cp=null\n",
        t = hash('c'),
        a = hash('e'),
        b = hash('f'),
    );
    let mut diagnostics = Diagnostics::new();
    let catalog = build_screen_catalog(&TraceDocument::from_text(text), &mut diagnostics);

    assert_eq!(catalog.ids.canonical_of(&hash('e')), Some("S1"));
    assert_eq!(catalog.ids.canonical_of(&hash('f')), Some("S2"));
    assert!(diagnostics.warnings().is_empty());
}

#[test]
fn malformed_screen_header_is_skipped_with_warning() {
    // Second block has no comma after the name field.
    let text = format!(
        "States (2):\n\
         {a}, Login, x\n\
         {b}, NoTrailingComma\n",
        a = hash('a'),
        b = hash('b'),
    );
    let mut diagnostics = Diagnostics::new();
    let catalog = build_screen_catalog(&TraceDocument::from_text(text), &mut diagnostics);

    assert_eq!(catalog.ids.len(), 1);
    assert!(!catalog.ids.contains_original(&hash('b')));
    assert!(
        diagnostics
            .warnings()
            .iter()
            .any(|w| matches!(w, ParseWarning::MalformedScreenHeader { .. }))
    );
}

#[test]
fn multi_line_name_field_is_trimmed() {
    let text = format!("States (1):\n{a},   Settings  , more\n  detail line\n", a = hash('a'));
    let catalog = build_screen_catalog(&TraceDocument::from_text(text), &mut Diagnostics::new());
    assert_eq!(catalog.name_of(&hash('a')), Some("Settings"));
}

// =========================================================================
// Bijection and determinism
// =========================================================================

#[test]
fn screen_map_is_a_bijection() {
    let doc = TraceDocument::from_text(login_home_trace());
    let catalog = build_screen_catalog(&doc, &mut Diagnostics::new());

    for (canonical, original) in catalog.ids.iter() {
        assert_eq!(catalog.ids.canonical_of(original), Some(canonical));
        assert_eq!(catalog.ids.original_of(canonical), Some(original));
    }
    assert_eq!(
        catalog.ids.canonical_to_original().len(),
        catalog.ids.original_to_canonical().len()
    );
}

#[test]
fn reparsing_gives_identical_ids() {
    let doc = TraceDocument::from_text(login_home_trace());
    let first = build_screen_catalog(&doc, &mut Diagnostics::new());
    let second = build_screen_catalog(&doc, &mut Diagnostics::new());
    assert_eq!(first.ids, second.ids);
}

// =========================================================================
// IdMap
// =========================================================================

#[test]
fn numeric_suffix_parsing() {
    assert_eq!(IdKind::Screen.numeric_suffix("S12"), Some(12));
    assert_eq!(IdKind::Transition.numeric_suffix("T3"), Some(3));
    assert_eq!(IdKind::Screen.numeric_suffix("T3"), None);
    assert_eq!(IdKind::Screen.numeric_suffix("S"), None);
    assert_eq!(IdKind::Screen.numeric_suffix("S1a"), None);
}

#[test]
fn saved_maps_roundtrip_through_json() {
    let doc = TraceDocument::from_text(login_home_trace());
    let catalog = build_screen_catalog(&doc, &mut Diagnostics::new());
    let transitions = IdMap::from_entries(
        IdKind::Transition,
        vec![IdEntry {
            canonical: "T1".into(),
            original: hash('c'),
        }],
    )
    .unwrap();

    let json = serde_json::to_string(&SavedMaps::from_maps(&catalog.ids, &transitions)).unwrap();
    let saved: SavedMaps = serde_json::from_str(&json).unwrap();
    let (screens, restored) = saved.into_maps().unwrap();

    assert_eq!(screens, catalog.ids);
    assert_eq!(screens.kind(), IdKind::Screen);
    assert_eq!(restored.kind(), IdKind::Transition);
    assert_eq!(restored.original_of("T1"), Some(hash('c').as_str()));
}

#[test]
fn from_entries_rejects_non_bijections() {
    let entry = |canonical: &str, original: &str| IdEntry {
        canonical: canonical.into(),
        original: original.into(),
    };

    let duplicate_original = vec![entry("S1", "x"), entry("S2", "x")];
    assert!(IdMap::from_entries(IdKind::Screen, duplicate_original).is_err());

    let duplicate_canonical = vec![entry("S1", "x"), entry("S1", "y")];
    assert!(IdMap::from_entries(IdKind::Screen, duplicate_canonical).is_err());

    let wrong_prefix = vec![entry("T1", "x")];
    assert!(IdMap::from_entries(IdKind::Screen, wrong_prefix).is_err());

    let leading_zero = vec![entry("S01", "x")];
    assert!(IdMap::from_entries(IdKind::Screen, leading_zero).is_err());
}

#[test]
fn from_entries_restores_ascending_order() {
    let entries = vec![
        IdEntry {
            canonical: "S10".into(),
            original: "ten".into(),
        },
        IdEntry {
            canonical: "S2".into(),
            original: "two".into(),
        },
    ];
    let map = IdMap::from_entries(IdKind::Screen, entries).unwrap();
    let order: Vec<&str> = map.iter().map(|(c, _)| c).collect();
    assert_eq!(order, vec!["S2", "S10"]);
}
