use super::*;
use crate::theory::{ChordType, RomanNumeral};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;

fn partial(value: serde_json::Value) -> Settings {
    Settings::from_typed(&value).unwrap()
}

/// Records every playback request it receives.
#[derive(Default)]
struct RecordingPlayer {
    calls: Vec<Vec<PartToPlay>>,
}

impl Player for RecordingPlayer {
    fn play_multiple_parts(&mut self, parts: Vec<PartToPlay>) {
        self.calls.push(parts);
    }
}

#[test]
fn test_chord_type_scenario() {
    // Settings {included: [I, ii], segments: 3} must produce exactly 3
    // segments, each answer in {Major, Minor}, no two adjacent identical.
    let mut exercise = chord_type_in_key_exercise().unwrap();
    exercise
        .update_settings(&partial(serde_json::json!({
            "included_roman_numerals": ["I", "ii"],
            "number_of_segments": 3,
        })))
        .unwrap();

    for _ in 0..50 {
        let question = exercise.get_question().unwrap();
        assert_eq!(question.segments.len(), 3);
        for segment in &question.segments {
            assert!(matches!(
                segment.answer,
                ChordType::Major | ChordType::Minor
            ));
        }
        for pair in question.segments.windows(2) {
            assert_ne!(pair[0].answer, pair[1].answer);
        }
        assert!(question.cadence.is_none());
    }
}

#[test]
fn test_no_immediate_repeat_in_drawn_progressions() {
    let included = [RomanNumeral::I, RomanNumeral::IV, RomanNumeral::V];
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..100 {
        let progression = draw_progression(&included, 20, &mut rng);
        assert_eq!(progression.len(), 20);
        for pair in progression.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }
}

#[test]
fn test_single_candidate_permits_repeats() {
    let included = [RomanNumeral::V];
    let mut rng = StdRng::seed_from_u64(7);
    let progression = draw_progression(&included, 4, &mut rng);
    assert_eq!(progression, vec![RomanNumeral::V; 4]);
}

#[test]
fn test_every_answer_is_in_the_answer_list() {
    let mut exercise = chord_type_in_key_exercise().unwrap();
    exercise
        .update_settings(&partial(serde_json::json!({
            "included_roman_numerals": ["ii", "V", "viidim"],
            "number_of_segments": 5,
        })))
        .unwrap();

    let answer_list = exercise.get_answer_list().unwrap();
    for _ in 0..50 {
        let question = exercise.get_question().unwrap();
        for segment in &question.segments {
            assert!(answer_list.contains(&segment.answer));
        }
    }
}

#[test]
fn test_answer_list_follows_included_settings() {
    let mut exercise = chord_type_in_key_exercise().unwrap();
    // Default settings include I..vi: major and minor qualities
    let list = exercise.get_answer_list().unwrap();
    assert_eq!(list.answers(), &[ChordType::Major, ChordType::Minor]);

    // Narrowing to ii only must be visible immediately, no stale read
    exercise
        .update_settings(&partial(serde_json::json!({
            "included_roman_numerals": ["ii"],
        })))
        .unwrap();
    let list = exercise.get_answer_list().unwrap();
    assert_eq!(list.answers(), &[ChordType::Minor]);
}

#[test]
fn test_empty_included_set_is_rejected_at_commit() {
    let mut exercise = chord_type_in_key_exercise().unwrap();
    let before = exercise.get_current_settings().clone();

    let result = exercise.update_settings(&partial(serde_json::json!({
        "included_roman_numerals": [],
    })));
    assert!(matches!(result, Err(ExerciseError::EmptyAnswerSet)));

    // Rejected commits leave the settings untouched and the exercise usable
    assert_eq!(exercise.get_current_settings(), &before);
    assert!(exercise.get_question().is_ok());
}

#[test]
fn test_rejected_commit_does_not_notify() {
    let mut exercise = chord_type_in_key_exercise().unwrap();
    let count = Rc::new(RefCell::new(0u32));
    let sink = Rc::clone(&count);
    exercise.subscribe(move |_| *sink.borrow_mut() += 1);
    assert_eq!(*count.borrow(), 1); // replay of the defaults

    let _ = exercise.update_settings(&partial(serde_json::json!({
        "included_roman_numerals": [],
    })));
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn test_late_subscriber_receives_latest_settings() {
    let mut exercise = chord_type_in_key_exercise().unwrap();
    exercise
        .update_settings(&partial(serde_json::json!({"number_of_segments": 2})))
        .unwrap();
    exercise
        .update_settings(&partial(serde_json::json!({"number_of_segments": 5})))
        .unwrap();

    let received: Rc<RefCell<Vec<Settings>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&received);
    exercise.subscribe(move |settings| sink.borrow_mut().push(settings.clone()));

    // First delivery is the most recent value, not the default or an
    // intermediate one
    assert_eq!(received.borrow().len(), 1);
    let parsed: ChordTypeInKeySettings = received.borrow()[0].parse().unwrap();
    assert_eq!(parsed.number_of_segments, 5);
}

#[test]
fn test_unknown_settings_keys_are_ignored() {
    let mut exercise = chord_type_in_key_exercise().unwrap();
    exercise
        .update_settings(&partial(serde_json::json!({
            "no_such_option": 42,
            "number_of_segments": 2,
        })))
        .unwrap();
    let parsed: ChordTypeInKeySettings = exercise.get_current_settings().parse().unwrap();
    assert_eq!(parsed.number_of_segments, 2);
    assert!(exercise.get_current_settings().get("no_such_option").is_none());
}

#[test]
fn test_instances_do_not_share_settings() {
    let mut first = chord_type_in_key_exercise().unwrap();
    let second = chord_type_in_key_exercise().unwrap();

    first
        .update_settings(&partial(serde_json::json!({"number_of_segments": 7})))
        .unwrap();

    let second_settings: ChordTypeInKeySettings =
        second.get_current_settings().parse().unwrap();
    assert_eq!(second_settings.number_of_segments, 1);
}

#[test]
fn test_playback_with_and_without_cadence() {
    let mut exercise = chord_in_key_exercise().unwrap();
    exercise
        .update_settings(&partial(serde_json::json!({"number_of_segments": 2})))
        .unwrap();
    let question = exercise.get_question().unwrap();

    let mut player = RecordingPlayer::default();
    play_question(&mut player, &question, true);
    play_question(&mut player, &question, false);

    let with_cadence = &player.calls[0];
    let without_cadence = &player.calls[1];

    // Cadence parts (IV V I) + gap precede the segment parts
    let cadence = question.cadence.as_ref().unwrap();
    assert_eq!(with_cadence.len(), cadence.len() + 1 + question.segments.len());
    assert_eq!(&with_cadence[..cadence.len()], cadence.as_slice());
    assert_eq!(with_cadence[cadence.len()], PartToPlay::Rest(CADENCE_GAP_MS));

    // Without the cadence: only the segment parts, same order and content
    assert_eq!(without_cadence.len(), question.segments.len());
    assert_eq!(
        &with_cadence[cadence.len() + 1..],
        without_cadence.as_slice()
    );
    for (part, segment) in without_cadence.iter().zip(&question.segments) {
        assert_eq!(part, &PartToPlay::Notes(segment.part.clone()));
    }
}

#[test]
fn test_cadence_does_not_count_against_segments() {
    let mut exercise = chord_in_key_exercise().unwrap();
    exercise
        .update_settings(&partial(serde_json::json!({"number_of_segments": 3})))
        .unwrap();
    let question = exercise.get_question().unwrap();
    assert_eq!(question.segments.len(), 3);
    assert!(question.cadence.is_some());
}

#[test]
fn test_chord_in_key_transposition() {
    let mut exercise = chord_in_key_exercise().unwrap();
    exercise
        .update_settings(&partial(serde_json::json!({
            "included_roman_numerals": ["I"],
            "key": "D",
        })))
        .unwrap();
    let question = exercise.get_question().unwrap();

    // I in D major, voiced in root position
    assert_eq!(question.segments.len(), 1);
    assert_eq!(
        question.segments[0].part[0].notes,
        vec!["D4", "F#4", "A4"],
    );
    // The cadence is transposed with the progression: IV of D is G
    let cadence = question.cadence.as_ref().unwrap();
    assert_eq!(
        cadence[0],
        PartToPlay::Notes(vec![NoteEvent {
            notes: vec!["G4".to_string(), "B4".to_string(), "D5".to_string()],
            duration: DEFAULT_DURATION.to_string(),
        }]),
    );
}

#[test]
fn test_unsupported_key_fails_generation() {
    let mut exercise = chord_in_key_exercise().unwrap();
    exercise
        .update_settings(&partial(serde_json::json!({"key": "H"})))
        .unwrap();
    assert!(matches!(
        exercise.get_question(),
        Err(ExerciseError::UnsupportedSymbol(_)),
    ));
}

#[test]
fn test_initial_answer_states() {
    let mut exercise = chord_type_in_key_exercise().unwrap();
    exercise
        .update_settings(&partial(serde_json::json!({"number_of_segments": 2})))
        .unwrap();
    let question = exercise.get_question().unwrap();
    let states = question.initial_answer_states();
    assert_eq!(states.len(), 2);
    for state in &states {
        assert_eq!(state.answer, None);
        assert!(!state.was_wrong);
    }
}

#[test]
fn test_identity_fields() {
    let exercise = chord_type_in_key_exercise().unwrap();
    assert_eq!(exercise.id(), "chord_type_in_key");
    assert_eq!(exercise.name(), "Chord Types");
    assert!(exercise.explanation().is_some());
    assert_eq!(exercise.settings_descriptors().len(), 2);
}
