//! Answer lists and the included-answer filter
//!
//! An [`AnswerList`] is the ordered set of candidate answers an exercise
//! exposes for scoring. It is always a subset of the exercise's full answer
//! universe, filtered by what the user has included via settings, and it is
//! non-empty by construction: [`filter_included_answers`] is the validation
//! gate that rejects settings which would empty the list.

use serde::Serialize;

use crate::error::ExerciseError;

/// An ordered, non-empty list of candidate answers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AnswerList<A>(Vec<A>);

impl<A: PartialEq> AnswerList<A> {
    pub fn answers(&self) -> &[A] {
        &self.0
    }

    pub fn contains(&self, answer: &A) -> bool {
        self.0.contains(answer)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        // Empty lists are rejected at construction, so this is always false
        // for lists built through filter_included_answers.
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, A> {
        self.0.iter()
    }
}

/// Filter an answer universe down to the included subset.
///
/// The result preserves the order of `universe` (a stable filter, not the
/// order of `included`) and contains each answer at most once, even when
/// several included sources map to the same answer value (e.g. two different
/// scale degrees that are both diminished).
///
/// # Errors
/// Returns [`ExerciseError::EmptyAnswerSet`] if nothing survives the filter.
/// Callers use this to reject a settings commit before question generation
/// can observe an empty candidate pool.
///
/// # Example
/// ```
/// use cadenza::answers::filter_included_answers;
/// use cadenza::theory::ChordType;
///
/// let universe = [ChordType::Major, ChordType::Minor, ChordType::Diminished];
/// let included = [ChordType::Minor, ChordType::Minor, ChordType::Major];
///
/// let list = filter_included_answers(&universe, &included).unwrap();
/// // Universe order, deduplicated
/// assert_eq!(list.answers(), &[ChordType::Major, ChordType::Minor]);
/// ```
pub fn filter_included_answers<A: Clone + PartialEq>(
    universe: &[A],
    included: &[A],
) -> Result<AnswerList<A>, ExerciseError> {
    let mut filtered: Vec<A> = Vec::new();
    for answer in universe {
        if included.contains(answer) && !filtered.contains(answer) {
            filtered.push(answer.clone());
        }
    }
    if filtered.is_empty() {
        return Err(ExerciseError::EmptyAnswerSet);
    }
    Ok(AnswerList(filtered))
}
