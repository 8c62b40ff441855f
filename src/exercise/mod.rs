//! # Exercise Module
//!
//! Exercise instance composition: the contract every exercise variant
//! implements, built from declarative parameters instead of an inheritance
//! chain.
//!
//! ## Sub-modules
//! - `question` - Question/Segment/NoteEvent/PartToPlay types and playback assembly
//! - `progression` - Shared tonal progression generation (no-immediate-repeat draw)
//! - `chord_type_in_key` - "Chord Types" variant (answers are chord qualities)
//! - `chord_in_key` - "Chord Functions" variant (answers are roman numerals)
//!
//! ## Key Types
//! - [`Exercise`] - One live exercise instance: identity, settings, derived
//!   question and answer list
//! - [`ExerciseParams`] - Declarative construction parameters
//!
//! ## Entry Point
//! [`create_exercise()`] - Build an [`Exercise`] from parameters
//!
//! ## Lifecycle
//! An instance is constructed once per practice session and owns its settings
//! state exclusively: two instances built from the same parameters never
//! share state. `get_question()` and `get_answer_list()` re-derive from the
//! current settings on every call, so a settings change is visible
//! immediately with no stale-read window. Dropping the instance terminates
//! its settings notification stream.

mod chord_in_key;
mod chord_type_in_key;
mod progression;
mod question;

#[cfg(test)]
mod tests;

pub use chord_in_key::{chord_in_key_exercise, ChordInKeySettings};
pub use chord_type_in_key::{chord_type_in_key_exercise, ChordTypeInKeySettings};
pub use progression::{draw_progression, TonalContext};
pub use question::{
    play_question, playback_parts, NoteEvent, PartToPlay, Player, Question, Segment,
    SegmentAnswerState, CADENCE_GAP_MS, DEFAULT_DURATION,
};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::answers::AnswerList;
use crate::error::ExerciseError;
use crate::settings::{Settings, SettingsDescriptor, SettingsStore, SubscriptionId};

/// The answer list an exercise exposes: a fixed value or a getter over the
/// current settings.
pub enum AnswerListProvider<A> {
    Static(AnswerList<A>),
    Getter(Box<dyn Fn(&Settings) -> Result<AnswerList<A>, ExerciseError>>),
}

impl<A: Clone + PartialEq> AnswerListProvider<A> {
    fn get(&self, settings: &Settings) -> Result<AnswerList<A>, ExerciseError> {
        match self {
            AnswerListProvider::Static(list) => Ok(list.clone()),
            AnswerListProvider::Getter(getter) => getter(settings),
        }
    }
}

/// Pure question generation function of one exercise variant.
pub type QuestionFn<A> =
    Box<dyn Fn(&Settings, &mut StdRng) -> Result<Question<A>, ExerciseError>>;

/// Declarative construction parameters for an exercise.
pub struct ExerciseParams<A> {
    /// Stable string key, unique across the catalog.
    pub id: &'static str,
    pub name: &'static str,
    pub summary: &'static str,
    /// Opaque reference to explanation content, forwarded to the UI.
    pub explanation: Option<&'static str>,
    pub default_settings: Settings,
    pub settings_descriptors: Vec<SettingsDescriptor>,
    pub answer_list: AnswerListProvider<A>,
    pub get_question: QuestionFn<A>,
}

/// One live exercise instance.
pub struct Exercise<A> {
    id: &'static str,
    name: &'static str,
    summary: &'static str,
    explanation: Option<&'static str>,
    descriptors: Vec<SettingsDescriptor>,
    answer_list: AnswerListProvider<A>,
    get_question_fn: QuestionFn<A>,
    store: SettingsStore,
    rng: StdRng,
}

/// Build an [`Exercise`] from declarative parameters.
///
/// The instance captures its own copy of the default settings and a
/// freshly seeded RNG; nothing is shared with other instances.
pub fn create_exercise<A: Clone + PartialEq>(params: ExerciseParams<A>) -> Exercise<A> {
    Exercise::with_rng(params, StdRng::from_entropy())
}

impl<A: Clone + PartialEq> Exercise<A> {
    /// Like [`create_exercise`] but with a caller-supplied RNG, for
    /// deterministic generation in tests.
    pub fn with_rng(params: ExerciseParams<A>, rng: StdRng) -> Exercise<A> {
        Exercise {
            id: params.id,
            name: params.name,
            summary: params.summary,
            explanation: params.explanation,
            descriptors: params.settings_descriptors,
            answer_list: params.answer_list,
            get_question_fn: params.get_question,
            store: SettingsStore::new(params.default_settings),
            rng,
        }
    }

    pub fn id(&self) -> &str {
        self.id
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn summary(&self) -> &str {
        self.summary
    }

    pub fn explanation(&self) -> Option<&str> {
        self.explanation
    }

    /// Descriptors for the settings-editing surface. Every declared key is
    /// guaranteed to exist in [`get_current_settings`](Self::get_current_settings).
    pub fn settings_descriptors(&self) -> &[SettingsDescriptor] {
        &self.descriptors
    }

    pub fn get_current_settings(&self) -> &Settings {
        self.store.current()
    }

    /// Merge a partial settings update and commit it.
    ///
    /// The single mutation entry point. The partial is merged into a
    /// candidate (unknown keys ignored, nulls skipped), the candidate is
    /// validated against the answer-list provider, and only then committed
    /// and published to subscribers.
    ///
    /// # Errors
    /// [`ExerciseError::EmptyAnswerSet`] if the candidate would leave the
    /// exercise with no included answers; the current settings and observers
    /// are untouched in that case.
    pub fn update_settings(&mut self, partial: &Settings) -> Result<(), ExerciseError> {
        let mut candidate = self.store.current().clone();
        candidate.merge(partial);
        // Validation gate: a commit must never empty the answer list.
        self.answer_list.get(&candidate)?;
        debug!(exercise = self.id, "settings committed");
        self.store.commit(candidate);
        Ok(())
    }

    /// Subscribe to settings changes. The most recent settings are replayed
    /// immediately; later commits are delivered in registration order.
    pub fn subscribe(&mut self, observer: impl FnMut(&Settings) + 'static) -> SubscriptionId {
        self.store.subscribe(Box::new(observer))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.store.unsubscribe(id);
    }

    /// The current answer list, re-derived from the current settings.
    pub fn get_answer_list(&self) -> Result<AnswerList<A>, ExerciseError> {
        self.answer_list.get(self.store.current())
    }

    /// Generate a fresh question from the current settings.
    ///
    /// Every segment's answer is a member of the current answer list; a
    /// violation would be a contract bug in the variant, not a runtime
    /// condition.
    pub fn get_question(&mut self) -> Result<Question<A>, ExerciseError> {
        debug!(exercise = self.id, "generating question");
        (self.get_question_fn)(self.store.current(), &mut self.rng)
    }
}

impl<A> std::fmt::Debug for Exercise<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Exercise").field("id", &self.id).finish()
    }
}
