//! Rule-based intent classification.
//!
//! Three pattern groups (math, write, translate) are matched against the
//! lower-cased query. A group fires when any of its patterns matches.
//! Fired intents are reported in priority order: math, write, translate.

use regex_lite::Regex;
use serde::Serialize;
use switchyard_config::RoutingConfig;
use switchyard_core::error::ClassifierError;
use switchyard_core::route::{Intent, Route};

/// Result of classifying one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub route: Route,
    /// Fired intents in priority order; only populated for [`Route::Multi`].
    pub sub_routes: Vec<Intent>,
}

/// Compiled pattern groups.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    groups: Vec<(Intent, Vec<Regex>)>,
}

impl IntentClassifier {
    pub fn new<S: AsRef<str>>(
        math: &[S],
        write: &[S],
        translate: &[S],
    ) -> Result<Self, ClassifierError> {
        let groups = vec![
            (Intent::Math, compile_group(Intent::Math.as_str(), math)?),
            (Intent::Write, compile_group(Intent::Write.as_str(), write)?),
            (Intent::Translate, compile_group(Intent::Translate.as_str(), translate)?),
        ];
        Ok(Self { groups })
    }

    pub fn from_config(config: &RoutingConfig) -> Result<Self, ClassifierError> {
        Self::new(
            config.math_patterns.as_slice(),
            config.write_patterns.as_slice(),
            config.translate_patterns.as_slice(),
        )
    }

    /// Classifier with the built-in pattern sets.
    pub fn with_defaults() -> Result<Self, ClassifierError> {
        Self::from_config(&RoutingConfig::default())
    }

    /// Intents whose group fires for `query`, in priority order.
    pub fn matched_intents(&self, query: &str) -> Vec<Intent> {
        let lowered = query.to_lowercase();
        self.groups
            .iter()
            .filter(|(_, patterns)| patterns.iter().any(|re| re.is_match(&lowered)))
            .map(|(intent, _)| *intent)
            .collect()
    }

    pub fn classify(&self, query: &str) -> Classification {
        let intents = self.matched_intents(query);
        match intents.as_slice() {
            [] => Classification {
                route: Route::Default,
                sub_routes: Vec::new(),
            },
            [single] => Classification {
                route: Route::from(*single),
                sub_routes: Vec::new(),
            },
            _ => Classification {
                route: Route::Multi,
                sub_routes: intents,
            },
        }
    }
}

/// Compile a named group of patterns, rejecting empty groups.
pub(crate) fn compile_group<S: AsRef<str>>(
    group: &str,
    patterns: &[S],
) -> Result<Vec<Regex>, ClassifierError> {
    if patterns.is_empty() {
        return Err(ClassifierError::EmptyGroup(group.to_string()));
    }
    patterns
        .iter()
        .map(|pattern| compile_pattern(group, pattern.as_ref()))
        .collect()
}

pub(crate) fn compile_pattern(group: &str, pattern: &str) -> Result<Regex, ClassifierError> {
    Regex::new(pattern).map_err(|e| ClassifierError::InvalidPattern {
        group: group.to_string(),
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}
