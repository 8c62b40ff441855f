//! "Chord Types" exercise: identify the chord quality (major / minor /
//! diminished) when all chords are diatonic to the same key.
//!
//! The classification is intra-key, so no cadence is played: the question
//! stands on its own without a tonal preamble.

use serde::{Deserialize, Serialize};

use super::progression::{draw_progression, TonalContext};
use super::question::{Question, Segment};
use super::{create_exercise, AnswerListProvider, Exercise, ExerciseParams};
use crate::answers::filter_included_answers;
use crate::error::ExerciseError;
use crate::settings::{
    number_of_segments_descriptor, ControlDescriptor, ControlType, Settings, SettingsDescriptor,
};
use crate::theory::{roman_numeral_to_chord_in_c, ChordType, RomanNumeral};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordTypeInKeySettings {
    pub included_roman_numerals: Vec<RomanNumeral>,
    pub number_of_segments: usize,
}

impl Default for ChordTypeInKeySettings {
    fn default() -> Self {
        ChordTypeInKeySettings {
            included_roman_numerals: vec![
                RomanNumeral::I,
                RomanNumeral::II,
                RomanNumeral::III,
                RomanNumeral::IV,
                RomanNumeral::V,
                RomanNumeral::VI,
            ],
            number_of_segments: 1,
        }
    }
}

/// The answer universe: chord qualities reachable from diatonic triads.
const ANSWER_UNIVERSE: [ChordType; 3] =
    [ChordType::Major, ChordType::Minor, ChordType::Diminished];

fn answer_list(settings: &Settings) -> Result<crate::answers::AnswerList<ChordType>, ExerciseError>
{
    let settings: ChordTypeInKeySettings = settings.parse()?;
    let included_types: Vec<ChordType> = settings
        .included_roman_numerals
        .iter()
        .map(|&symbol| roman_numeral_to_chord_in_c(symbol).chord_type())
        .collect();
    filter_included_answers(&ANSWER_UNIVERSE, &included_types)
}

fn get_question(
    settings: &Settings,
    rng: &mut rand::rngs::StdRng,
) -> Result<Question<ChordType>, ExerciseError> {
    let settings: ChordTypeInKeySettings = settings.parse()?;
    let context = TonalContext::in_c();
    let progression = draw_progression(
        &settings.included_roman_numerals,
        settings.number_of_segments,
        rng,
    );
    let segments = context
        .resolve(&progression)
        .iter()
        .map(|chord| Segment {
            part: context.chord_part(chord),
            answer: chord.chord_type(),
        })
        .collect();
    Ok(Question {
        segments,
        cadence: None,
        info: String::new(),
    })
}

/// Build the "Chord Types" exercise.
pub fn chord_type_in_key_exercise() -> Result<Exercise<ChordType>, ExerciseError> {
    let defaults = ChordTypeInKeySettings::default();
    Ok(create_exercise(ExerciseParams {
        id: "chord_type_in_key",
        name: "Chord Types",
        summary: "Identify chord type (major / minor) when all chords are diatonic to the same key",
        explanation: Some("chord-type-in-key-explanation"),
        default_settings: Settings::from_typed(&defaults)?,
        settings_descriptors: descriptors(),
        answer_list: AnswerListProvider::Getter(Box::new(answer_list)),
        get_question: Box::new(get_question),
    }))
}

fn descriptors() -> Vec<SettingsDescriptor> {
    vec![
        SettingsDescriptor {
            key: "included_roman_numerals".to_string(),
            default_value: serde_json::json!(["I", "ii", "iii", "IV", "V", "vi"]),
            control: ControlDescriptor {
                label: "Included Chords".to_string(),
                control_type: ControlType::IncludedAnswers {
                    answer_list: RomanNumeral::ALL
                        .iter()
                        .map(|symbol| symbol.to_string())
                        .collect(),
                },
            },
        },
        number_of_segments_descriptor("chords"),
    ]
}
