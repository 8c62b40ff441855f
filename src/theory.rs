//! Music theory primitives
//!
//! Pure, stateless value types shared read-only by every exercise:
//! pitch classes, chords, roman numeral symbols, and the mapping from a
//! roman numeral to a concrete chord in the reference key of C major.
//!
//! ## Reference key
//! All symbolic material resolves against C major first. Transposition to a
//! practice key is a separate, explicit step ([`transpose_progression`])
//! applied uniformly to a whole progression so relative voicing is preserved.
//!
//! ## Chord classification
//! [`Chord::chord_type`] is derived from the interval structure of the chord,
//! never hard-coded per symbol, so a newly supported roman numeral form can
//! never desynchronize its type from its structure.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ExerciseError;

/// Semitone offsets of the major scale degrees from the tonic.
const MAJOR_SCALE: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];

/// A pitch class: a note name with octave information discarded (0-11).
///
/// Arithmetic wraps at the octave with `rem_euclid`, so shifting by any
/// positive or negative interval stays in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PitchClass(u8);

impl PitchClass {
    pub const C: PitchClass = PitchClass(0);

    pub fn new(semitones: i16) -> Self {
        PitchClass(semitones.rem_euclid(12) as u8)
    }

    pub fn semitone(self) -> u8 {
        self.0
    }

    pub fn shifted(self, semitones: i16) -> Self {
        PitchClass::new(self.0 as i16 + semitones)
    }

    /// Spell the pitch class as a note name.
    ///
    /// 0=C, 1=C#/Db, 2=D, 3=D#/Eb, 4=E, 5=F, 6=F#/Gb, 7=G, 8=G#/Ab,
    /// 9=A, 10=A#/Bb, 11=B
    pub fn spelled(self, prefer_flat: bool) -> &'static str {
        match self.0 {
            0 => "C",
            1 => {
                if prefer_flat {
                    "Db"
                } else {
                    "C#"
                }
            }
            2 => "D",
            3 => {
                if prefer_flat {
                    "Eb"
                } else {
                    "D#"
                }
            }
            4 => "E",
            5 => "F",
            6 => {
                if prefer_flat {
                    "Gb"
                } else {
                    "F#"
                }
            }
            7 => "G",
            8 => {
                if prefer_flat {
                    "Ab"
                } else {
                    "G#"
                }
            }
            9 => "A",
            10 => {
                if prefer_flat {
                    "Bb"
                } else {
                    "A#"
                }
            }
            11 => "B",
            _ => unreachable!(),
        }
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spelled(false))
    }
}

/// Chord quality, derived from interval structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChordType {
    Major,
    Minor,
    Diminished,
    Augmented,
}

impl fmt::Display for ChordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChordType::Major => "Major",
            ChordType::Minor => "Minor",
            ChordType::Diminished => "Diminished",
            ChordType::Augmented => "Augmented",
        };
        f.write_str(name)
    }
}

impl ChordType {
    /// Triad intervals for this quality, relative to the root.
    fn intervals(self) -> [u8; 3] {
        match self {
            ChordType::Major => [0, 4, 7],
            ChordType::Minor => [0, 3, 7],
            ChordType::Diminished => [0, 3, 6],
            ChordType::Augmented => [0, 4, 8],
        }
    }
}

/// A concrete chord: a root pitch class plus interval structure.
///
/// Produced by resolving a [`RomanNumeral`] in the reference key
/// ([`roman_numeral_to_chord_in_c`]) or by direct construction
/// ([`Chord::triad`]). Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chord {
    root: PitchClass,
    intervals: Vec<u8>,
}

impl Chord {
    /// Build a triad of the given quality on the given root.
    pub fn triad(root: PitchClass, chord_type: ChordType) -> Chord {
        Chord {
            root,
            intervals: chord_type.intervals().to_vec(),
        }
    }

    pub fn root(&self) -> PitchClass {
        self.root
    }

    /// Classify the chord quality from its interval structure.
    ///
    /// The third and fifth intervals alone determine the quality; nothing is
    /// looked up per symbol.
    ///
    /// # Example
    /// ```
    /// use cadenza::theory::{roman_numeral_to_chord_in_c, ChordType, RomanNumeral};
    ///
    /// let chord = roman_numeral_to_chord_in_c(RomanNumeral::II);
    /// assert_eq!(chord.chord_type(), ChordType::Minor);
    /// ```
    pub fn chord_type(&self) -> ChordType {
        let third = self.intervals.get(1).copied();
        let fifth = self.intervals.get(2).copied();
        match (third, fifth) {
            (Some(3), Some(6)) => ChordType::Diminished,
            (Some(3), _) => ChordType::Minor,
            (Some(4), Some(8)) => ChordType::Augmented,
            _ => ChordType::Major,
        }
    }

    /// Pitch classes of all chord tones, root first.
    pub fn pitch_classes(&self) -> Vec<PitchClass> {
        self.intervals
            .iter()
            .map(|&interval| self.root.shifted(interval as i16))
            .collect()
    }

    /// Shift the whole chord by the given number of semitones.
    ///
    /// The interval structure is untouched, so the quality is preserved.
    pub fn transposed(&self, semitones: i16) -> Chord {
        Chord {
            root: self.root.shifted(semitones),
            intervals: self.intervals.clone(),
        }
    }

    /// Voice the chord in root position starting at the given octave.
    ///
    /// Returns pitch names in scientific notation (`"C4"`, `"E4"`, ...);
    /// tones that cross the octave boundary move up an octave.
    ///
    /// # Example
    /// ```
    /// use cadenza::theory::{Chord, ChordType, PitchClass};
    ///
    /// let g_major = Chord::triad(PitchClass::new(7), ChordType::Major);
    /// assert_eq!(g_major.voicing(4), vec!["G4", "B4", "D5"]);
    /// ```
    pub fn voicing(&self, octave: u8) -> Vec<String> {
        self.intervals
            .iter()
            .map(|&interval| {
                let semitones = self.root.semitone() as u16 + interval as u16;
                let name = PitchClass::new(semitones as i16).spelled(false);
                format!("{}{}", name, octave as u16 + semitones / 12)
            })
            .collect()
    }
}

/// A scale-degree-relative chord symbol, independent of key.
///
/// The supported set covers the diatonic triads of a major key: `I`, `ii`,
/// `iii`, `IV`, `V`, `vi` and the diminished form `viidim`. Parsing any other
/// symbol fails with [`ExerciseError::UnsupportedSymbol`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RomanNumeral {
    #[serde(rename = "I")]
    I,
    #[serde(rename = "ii")]
    II,
    #[serde(rename = "iii")]
    III,
    #[serde(rename = "IV")]
    IV,
    #[serde(rename = "V")]
    V,
    #[serde(rename = "vi")]
    VI,
    #[serde(rename = "viidim")]
    VIIDim,
}

impl RomanNumeral {
    /// All supported symbols, in scale-degree order.
    pub const ALL: [RomanNumeral; 7] = [
        RomanNumeral::I,
        RomanNumeral::II,
        RomanNumeral::III,
        RomanNumeral::IV,
        RomanNumeral::V,
        RomanNumeral::VI,
        RomanNumeral::VIIDim,
    ];

    /// Zero-based scale degree (I = 0, ii = 1, ...).
    pub fn degree(self) -> usize {
        match self {
            RomanNumeral::I => 0,
            RomanNumeral::II => 1,
            RomanNumeral::III => 2,
            RomanNumeral::IV => 3,
            RomanNumeral::V => 4,
            RomanNumeral::VI => 5,
            RomanNumeral::VIIDim => 6,
        }
    }

    /// The written symbol, with case conveying quality.
    pub fn symbol(self) -> &'static str {
        match self {
            RomanNumeral::I => "I",
            RomanNumeral::II => "ii",
            RomanNumeral::III => "iii",
            RomanNumeral::IV => "IV",
            RomanNumeral::V => "V",
            RomanNumeral::VI => "vi",
            RomanNumeral::VIIDim => "viidim",
        }
    }
}

impl fmt::Display for RomanNumeral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for RomanNumeral {
    type Err = ExerciseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RomanNumeral::ALL
            .iter()
            .copied()
            .find(|rn| rn.symbol() == s.trim())
            .ok_or_else(|| ExerciseError::UnsupportedSymbol(s.to_string()))
    }
}

/// Resolve a roman numeral to a concrete chord in the reference key of C.
///
/// The chord is built by stacking thirds on the scale degree within the
/// C major scale, so its quality falls out of the scale structure rather
/// than a per-symbol table. Pure and deterministic: the same symbol always
/// yields the same chord.
///
/// # Example
/// ```
/// use cadenza::theory::{roman_numeral_to_chord_in_c, ChordType, PitchClass, RomanNumeral};
///
/// let chord = roman_numeral_to_chord_in_c(RomanNumeral::V);
/// assert_eq!(chord.root(), PitchClass::new(7)); // G
/// assert_eq!(chord.chord_type(), ChordType::Major);
/// ```
pub fn roman_numeral_to_chord_in_c(symbol: RomanNumeral) -> Chord {
    let degree = symbol.degree();
    // Stack thirds diatonically: degree, degree+2, degree+4, carrying the
    // octave when the scale wraps.
    let tones: Vec<u16> = [0usize, 2, 4]
        .iter()
        .map(|&step| {
            let index = degree + step;
            MAJOR_SCALE[index % 7] as u16 + 12 * (index / 7) as u16
        })
        .collect();
    let root = tones[0];
    Chord {
        root: PitchClass::new(root as i16),
        intervals: tones.iter().map(|&tone| (tone - root) as u8).collect(),
    }
}

/// Transpose a whole progression by the given number of semitones.
///
/// Applied uniformly to every chord so the relative voicing of the
/// progression is preserved.
pub fn transpose_progression(chords: &[Chord], semitones: i16) -> Vec<Chord> {
    chords
        .iter()
        .map(|chord| chord.transposed(semitones))
        .collect()
}

/// Semitones from C up to the tonic of the named key.
///
/// Supports the twelve major keys by common spellings (`"C"`, `"Db"`/`"C#"`,
/// `"Eb"`, `"F#"`, `"Bb"`, ...).
pub fn key_to_semitones(key: &str) -> Result<i16, ExerciseError> {
    let semitones = match key.trim() {
        "C" => 0,
        "Db" | "C#" => 1,
        "D" => 2,
        "Eb" | "D#" => 3,
        "E" => 4,
        "F" => 5,
        "F#" | "Gb" => 6,
        "G" => 7,
        "Ab" | "G#" => 8,
        "A" => 9,
        "Bb" | "A#" => 10,
        "B" => 11,
        other => return Err(ExerciseError::UnsupportedSymbol(other.to_string())),
    };
    Ok(semitones)
}
