//! Integration tests for the exercise engine
//!
//! Exercises the full public surface the way a practice-session UI would:
//! build an exercise, adjust its settings, generate questions and hand them
//! to a playback capability.

use cadenza::exercise::{ChordInKeySettings, ChordTypeInKeySettings};
use cadenza::{
    chord_in_key_exercise, chord_type_in_key_exercise, play_question, ChordType, ExerciseError,
    PartToPlay, Player, RomanNumeral, Settings,
};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Default)]
struct RecordingPlayer {
    calls: Vec<Vec<PartToPlay>>,
}

impl Player for RecordingPlayer {
    fn play_multiple_parts(&mut self, parts: Vec<PartToPlay>) {
        self.calls.push(parts);
    }
}

fn partial(value: serde_json::Value) -> Settings {
    Settings::from_typed(&value).unwrap()
}

#[test]
fn test_practice_session_flow() {
    let mut exercise = chord_type_in_key_exercise().unwrap();

    // The settings surface reads descriptors and current settings
    assert!(!exercise.settings_descriptors().is_empty());
    for descriptor in exercise.settings_descriptors() {
        assert!(
            exercise.get_current_settings().get(&descriptor.key).is_some(),
            "declared key {} missing from current settings",
            descriptor.key,
        );
    }

    // The user narrows the exercise and asks for longer questions
    exercise
        .update_settings(&partial(serde_json::json!({
            "included_roman_numerals": ["I", "ii"],
            "number_of_segments": 3,
        })))
        .unwrap();

    // Question load plays with cadence; this variant has none, so the parts
    // are exactly the segment parts
    let question = exercise.get_question().unwrap();
    let mut player = RecordingPlayer::default();
    play_question(&mut player, &question, true);
    assert_eq!(player.calls[0].len(), question.segments.len());

    // Scoring: every answer is drawn from the exposed answer list
    let answers = exercise.get_answer_list().unwrap();
    assert_eq!(answers.answers(), &[ChordType::Major, ChordType::Minor]);
    for segment in &question.segments {
        assert!(answers.contains(&segment.answer));
        assert!(segment.check(&segment.answer));
    }
}

#[test]
fn test_cadence_precedes_question_on_load_and_repeat() {
    let mut exercise = chord_in_key_exercise().unwrap();
    exercise
        .update_settings(&partial(serde_json::json!({"number_of_segments": 2})))
        .unwrap();
    let question = exercise.get_question().unwrap();
    let cadence_len = question.cadence.as_ref().unwrap().len();

    let mut player = RecordingPlayer::default();
    play_question(&mut player, &question, true); // load
    play_question(&mut player, &question, true); // repeat
    play_question(&mut player, &question, false); // play without cadence

    assert_eq!(player.calls[0], player.calls[1]);
    assert_eq!(player.calls[0].len(), cadence_len + 1 + 2);
    assert_eq!(player.calls[2].len(), 2);
    assert_eq!(player.calls[0][cadence_len + 1..], player.calls[2][..]);
}

#[test]
fn test_settings_validation_gate() {
    let mut exercise = chord_in_key_exercise().unwrap();
    let result = exercise.update_settings(&partial(serde_json::json!({
        "included_roman_numerals": [],
    })));
    assert!(matches!(result, Err(ExerciseError::EmptyAnswerSet)));

    // The exercise still generates from the previous settings
    let question = exercise.get_question().unwrap();
    assert_eq!(question.segments.len(), 1);
}

#[test]
fn test_settings_subscription_lifecycle() {
    let mut exercise = chord_in_key_exercise().unwrap();
    let received: Rc<RefCell<Vec<ChordInKeySettings>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&received);
    let id = exercise.subscribe(move |settings| {
        sink.borrow_mut().push(settings.parse().unwrap());
    });

    // Replay of the defaults on subscribe
    assert_eq!(received.borrow().len(), 1);
    assert_eq!(received.borrow()[0].key, "C");

    exercise
        .update_settings(&partial(serde_json::json!({"key": "Eb"})))
        .unwrap();
    assert_eq!(received.borrow().len(), 2);
    assert_eq!(received.borrow()[1].key, "Eb");

    exercise.unsubscribe(id);
    exercise
        .update_settings(&partial(serde_json::json!({"key": "G"})))
        .unwrap();
    assert_eq!(received.borrow().len(), 2);
}

#[test]
fn test_roman_numeral_analysis_answers() {
    let mut exercise = chord_in_key_exercise().unwrap();
    exercise
        .update_settings(&partial(serde_json::json!({
            "included_roman_numerals": ["ii", "V", "I"],
            "number_of_segments": 4,
        })))
        .unwrap();

    // Answer list keeps scale-degree order, not inclusion order
    let answers = exercise.get_answer_list().unwrap();
    assert_eq!(
        answers.answers(),
        &[RomanNumeral::I, RomanNumeral::II, RomanNumeral::V],
    );

    for _ in 0..20 {
        let question = exercise.get_question().unwrap();
        assert_eq!(question.segments.len(), 4);
        for pair in question.segments.windows(2) {
            assert_ne!(pair[0].answer, pair[1].answer);
        }
    }
}

#[test]
fn test_defaults_parse_back_as_typed_settings() {
    let exercise = chord_type_in_key_exercise().unwrap();
    let settings: ChordTypeInKeySettings = exercise.get_current_settings().parse().unwrap();
    assert_eq!(settings.number_of_segments, 1);
    assert_eq!(settings.included_roman_numerals.len(), 6);
}
