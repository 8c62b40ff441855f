//! "Chord Functions" exercise: identify the scale degree (roman numeral) of
//! chords heard after a cadence establishes the key.

use serde::{Deserialize, Serialize};

use super::progression::{draw_progression, TonalContext};
use super::question::{Question, Segment};
use super::{create_exercise, AnswerListProvider, Exercise, ExerciseParams};
use crate::answers::filter_included_answers;
use crate::error::ExerciseError;
use crate::settings::{
    number_of_segments_descriptor, ControlDescriptor, ControlType, Settings, SettingsDescriptor,
};
use crate::theory::RomanNumeral;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordInKeySettings {
    pub included_roman_numerals: Vec<RomanNumeral>,
    pub number_of_segments: usize,
    /// Practice key; the cadence and every chord are transposed to it
    /// uniformly.
    pub key: String,
}

impl Default for ChordInKeySettings {
    fn default() -> Self {
        ChordInKeySettings {
            included_roman_numerals: vec![RomanNumeral::I, RomanNumeral::IV, RomanNumeral::V],
            number_of_segments: 1,
            key: "C".to_string(),
        }
    }
}

fn answer_list(
    settings: &Settings,
) -> Result<crate::answers::AnswerList<RomanNumeral>, ExerciseError> {
    let settings: ChordInKeySettings = settings.parse()?;
    filter_included_answers(&RomanNumeral::ALL, &settings.included_roman_numerals)
}

fn get_question(
    settings: &Settings,
    rng: &mut rand::rngs::StdRng,
) -> Result<Question<RomanNumeral>, ExerciseError> {
    let settings: ChordInKeySettings = settings.parse()?;
    let context = TonalContext::for_key(&settings.key)?;
    let progression = draw_progression(
        &settings.included_roman_numerals,
        settings.number_of_segments,
        rng,
    );
    let segments = progression
        .iter()
        .zip(context.resolve(&progression))
        .map(|(&symbol, chord)| Segment {
            part: context.chord_part(&chord),
            answer: symbol,
        })
        .collect();
    Ok(Question {
        segments,
        cadence: Some(context.cadence()),
        info: format!("Key: {} major", settings.key),
    })
}

/// Build the "Chord Functions" exercise.
pub fn chord_in_key_exercise() -> Result<Exercise<RomanNumeral>, ExerciseError> {
    let defaults = ChordInKeySettings::default();
    Ok(create_exercise(ExerciseParams {
        id: "chord_in_key",
        name: "Chord Functions",
        summary: "Identify the scale degree of chords within a key",
        explanation: Some("chord-in-key-explanation"),
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
            default_value: serde_json::json!(["I", "IV", "V"]),
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
