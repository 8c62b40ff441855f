//! Question and playback data types
//!
//! A [`Question`] is one generated practice instance: an ordered sequence of
//! [`Segment`]s, each pairing playable musical material with its correct
//! answer, plus an optional cadence preamble and free-form info text.
//!
//! Playback is delegated to an external [`Player`] capability. The engine
//! only assembles the ordered list of [`PartToPlay`] values: cadence parts
//! first (when present and requested), then one part per segment.

use serde::Serialize;

/// Rhythmic value used for all generated chord events.
pub const DEFAULT_DURATION: &str = "4n";

/// Silent gap between the cadence and the first question segment.
pub const CADENCE_GAP_MS: u32 = 100;

/// A timed group of simultaneous notes.
///
/// `notes` are pitch names in scientific notation (`"C4"`); `duration` is a
/// rhythmic value string (`"4n"` = quarter note).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteEvent {
    pub notes: Vec<String>,
    pub duration: String,
}

/// One entry in the list handed to the playback capability: either a timed
/// rest in milliseconds or a sequence of note events.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PartToPlay {
    Rest(u32),
    Notes(Vec<NoteEvent>),
}

/// One scored unit of a question.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment<A> {
    /// The musical material sounded for this segment.
    pub part: Vec<NoteEvent>,
    /// The correct answer, always a member of the exercise's answer list.
    pub answer: A,
}

impl<A: PartialEq> Segment<A> {
    /// Whether `candidate` is the correct answer for this segment.
    pub fn check(&self, candidate: &A) -> bool {
        self.answer == *candidate
    }
}

/// Per-segment answering state, supplied to a results-display surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentAnswerState<A> {
    /// The correct answer once revealed, `None` while unanswered.
    pub answer: Option<A>,
    /// Whether a wrong answer was given for this segment at any point.
    pub was_wrong: bool,
}

/// One generated question.
#[derive(Debug, Clone, PartialEq)]
pub struct Question<A> {
    pub segments: Vec<Segment<A>>,
    /// Fixed harmonic preamble establishing tonal context. Never answerable
    /// and never counted against the segment-count setting.
    pub cadence: Option<Vec<PartToPlay>>,
    pub info: String,
}

impl<A> Question<A> {
    /// Initial answering state: one unanswered entry per segment.
    pub fn initial_answer_states(&self) -> Vec<SegmentAnswerState<A>> {
        self.segments
            .iter()
            .map(|_| SegmentAnswerState {
                answer: None,
                was_wrong: false,
            })
            .collect()
    }
}

/// External playback capability consumed by the engine.
///
/// Requesting playback returns without blocking generation; completion is the
/// collaborator's business, as is cancellation of in-flight audio.
pub trait Player {
    fn play_multiple_parts(&mut self, parts: Vec<PartToPlay>);
}

/// Assemble the ordered playback list for a question.
///
/// With `with_cadence`, the cadence parts (if the question has any) come
/// first, followed by a short rest, then one part per segment. Without it,
/// only the segment parts are returned, same order and content.
pub fn playback_parts<A>(question: &Question<A>, with_cadence: bool) -> Vec<PartToPlay> {
    let mut parts = Vec::new();
    if with_cadence {
        if let Some(cadence) = &question.cadence {
            parts.extend(cadence.iter().cloned());
            parts.push(PartToPlay::Rest(CADENCE_GAP_MS));
        }
    }
    for segment in &question.segments {
        parts.push(PartToPlay::Notes(segment.part.clone()));
    }
    parts
}

/// Hand a question to the player, with or without its cadence.
pub fn play_question<A>(player: &mut dyn Player, question: &Question<A>, with_cadence: bool) {
    player.play_multiple_parts(playback_parts(question, with_cadence));
}
