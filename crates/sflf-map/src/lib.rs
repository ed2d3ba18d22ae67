//! Name matching against the Standard FOIA Log Format vocabulary.
//!
//! A [`Matcher`] runs a chain of [`NameMatchStrategy`] steps (synonym,
//! keyword, optionally a remote language model, then fuzzy similarity) and
//! returns the first hit with its confidence.

pub mod error;
pub mod fuzzy;
pub mod keyword;
pub mod matcher;
#[cfg(feature = "remote")]
pub mod remote;
pub mod strategy;
pub mod synonym;

pub use error::{MatchError, Result};
pub use fuzzy::{FUZZY_CONFIDENCE_SCALE, FUZZY_THRESHOLD, FuzzyStrategy};
pub use keyword::{KeywordStrategy, PARTIAL_KEYWORD_CONFIDENCE, WHOLE_KEYWORD_CONFIDENCE};
pub use matcher::{Matcher, status_column};
#[cfg(feature = "remote")]
pub use remote::{REMOTE_CONFIDENCE, RemoteConfig, RemoteStrategy};
pub use strategy::{MatchResult, NameMatchStrategy, Query};
pub use synonym::SynonymStrategy;
