//! Shared tonal chord progression generation
//!
//! The base behavior every progression-based exercise variant delegates to:
//! drawing a random roman numeral progression from the included set and
//! resolving it to concrete, voiced chords in a practice key.

use rand::seq::SliceRandom;
use rand::Rng;

use super::question::{NoteEvent, PartToPlay, DEFAULT_DURATION};
use crate::error::ExerciseError;
use crate::theory::{
    key_to_semitones, roman_numeral_to_chord_in_c, transpose_progression, Chord, RomanNumeral,
};

/// Octave the generated chords are voiced in.
const VOICING_OCTAVE: u8 = 4;

/// Draw a random progression of exactly `length` symbols from `included`.
///
/// Each step redraws independently; the candidate set excludes the
/// immediately preceding symbol whenever more than one candidate remains, so
/// no two adjacent symbols repeat. Longer-range repeats are fine. With a
/// single included symbol repetition is unavoidable and permitted.
///
/// Precondition: `included` is non-empty. Settings validation rejects empty
/// included sets before generation can run, so this is not re-checked per
/// call beyond a debug assertion.
pub fn draw_progression<R: Rng>(
    included: &[RomanNumeral],
    length: usize,
    rng: &mut R,
) -> Vec<RomanNumeral> {
    debug_assert!(!included.is_empty(), "included answer set must be non-empty");
    let mut progression: Vec<RomanNumeral> = Vec::with_capacity(length);
    while progression.len() < length {
        let last = progression.last().copied();
        let candidates: Vec<RomanNumeral> = included
            .iter()
            .copied()
            .filter(|&symbol| Some(symbol) != last)
            .collect();
        // A shrunken pool means the only choice is the previous symbol;
        // permit the repeat rather than deadlocking.
        let pool: &[RomanNumeral] = if candidates.is_empty() {
            included
        } else {
            &candidates
        };
        if let Some(&symbol) = pool.choose(rng) {
            progression.push(symbol);
        }
    }
    progression
}

/// A practice key the progression is rendered in.
///
/// Resolution always goes through the reference key of C; transposition to
/// the practice key is applied uniformly to the whole progression so the
/// relative voicing is preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TonalContext {
    semitones_from_c: i16,
}

impl TonalContext {
    /// The reference key itself, C major.
    pub fn in_c() -> TonalContext {
        TonalContext { semitones_from_c: 0 }
    }

    /// A named major key, e.g. `"Eb"`.
    pub fn for_key(key: &str) -> Result<TonalContext, ExerciseError> {
        Ok(TonalContext {
            semitones_from_c: key_to_semitones(key)?,
        })
    }

    /// Resolve a roman numeral progression to concrete chords in this key.
    pub fn resolve(&self, progression: &[RomanNumeral]) -> Vec<Chord> {
        let in_c: Vec<Chord> = progression
            .iter()
            .map(|&symbol| roman_numeral_to_chord_in_c(symbol))
            .collect();
        transpose_progression(&in_c, self.semitones_from_c)
    }

    /// Playable material for a single chord: one block-chord event.
    pub fn chord_part(&self, chord: &Chord) -> Vec<NoteEvent> {
        vec![NoteEvent {
            notes: chord.voicing(VOICING_OCTAVE),
            duration: DEFAULT_DURATION.to_string(),
        }]
    }

    /// The IV-V-I cadence in this key, establishing tonal context before the
    /// scored segments.
    pub fn cadence(&self) -> Vec<PartToPlay> {
        self.resolve(&[RomanNumeral::IV, RomanNumeral::V, RomanNumeral::I])
            .iter()
            .map(|chord| PartToPlay::Notes(self.chord_part(chord)))
            .collect()
    }
}
