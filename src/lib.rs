//! Cadenza: an ear-training exercise engine.
//!
//! Generates structured practice questions from roman numeral progressions,
//! tracks per-exercise settings, and exposes answer lists for scoring. The
//! engine is a single-process, client-local library; UI rendering, audio
//! transport and persistence live behind the boundaries in
//! [`exercise::Player`] and the settings descriptors.

pub mod answers;
pub mod error;
pub mod exercise;
pub mod settings;
pub mod theory;

pub use answers::{filter_included_answers, AnswerList};
pub use error::ExerciseError;
pub use exercise::{
    chord_in_key_exercise, chord_type_in_key_exercise, create_exercise, play_question,
    playback_parts, AnswerListProvider, Exercise, ExerciseParams, NoteEvent, PartToPlay, Player,
    Question, Segment,
};
pub use settings::{Settings, SettingsDescriptor, SubscriptionId};
pub use theory::{roman_numeral_to_chord_in_c, Chord, ChordType, PitchClass, RomanNumeral};
