//! # Error Types
//!
//! This module defines all error types for the exercise engine.
//!
//! ## Error Types
//! - `UnsupportedSymbol` - A roman numeral or key name outside the supported set
//! - `EmptyAnswerSet` - Settings that would leave the exercise with no included answers
//! - `InvalidSettings` - A settings value that cannot be read as the exercise's settings type
//!
//! ## Usage
//! ```rust
//! use cadenza::{ExerciseError, RomanNumeral};
//!
//! match "bII".parse::<RomanNumeral>() {
//!     Ok(rn) => println!("parsed {}", rn),
//!     Err(ExerciseError::UnsupportedSymbol(symbol)) => {
//!         eprintln!("not a supported symbol: {}", symbol);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExerciseError {
    /// An out-of-domain roman numeral or key symbol.
    ///
    /// This is a configuration/programmer error, not a user-facing retryable
    /// condition: the supported symbol set is fixed and documented on
    /// [`RomanNumeral`](crate::theory::RomanNumeral).
    ///
    /// # Example
    /// ```
    /// # use cadenza::ExerciseError;
    /// let err = ExerciseError::UnsupportedSymbol("bII".to_string());
    /// assert_eq!(err.to_string(), "Unsupported symbol: bII");
    /// ```
    #[error("Unsupported symbol: {0}")]
    UnsupportedSymbol(String),

    /// Settings would leave the exercise with zero included answers.
    ///
    /// Raised at settings-validation time, before any question is generated.
    /// An exercise must reject a settings commit that empties its answer list
    /// rather than discover the problem mid-question.
    ///
    /// # Example
    /// ```
    /// # use cadenza::ExerciseError;
    /// let err = ExerciseError::EmptyAnswerSet;
    /// assert_eq!(err.to_string(), "No answers are included by the current settings");
    /// ```
    #[error("No answers are included by the current settings")]
    EmptyAnswerSet,

    /// A settings value could not be read back as the exercise's typed
    /// settings (e.g. a partial update put a string where a number belongs).
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}
