//! Routing vocabulary: elementary intents and the route assigned to a query.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An elementary intent that a rule group can detect.
///
/// The declaration order is the fixed priority order used everywhere a set
/// of intents is sequenced: math, then write, then translate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Math,
    Write,
    Translate,
}

impl Intent {
    /// All intents in priority order.
    pub const ALL: [Intent; 3] = [Intent::Math, Intent::Write, Intent::Translate];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Math => "math",
            Intent::Write => "write",
            Intent::Translate => "translate",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The classification outcome for a whole query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Math,
    Write,
    Translate,
    /// Two or more intents fired; see the query's sub-routes.
    Multi,
    /// No intent fired.
    #[default]
    Default,
}

impl Route {
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Math => "math",
            Route::Write => "write",
            Route::Translate => "translate",
            Route::Multi => "multi",
            Route::Default => "default",
        }
    }
}

impl From<Intent> for Route {
    fn from(intent: Intent) -> Self {
        match intent {
            Intent::Math => Route::Math,
            Intent::Write => Route::Write,
            Intent::Translate => Route::Translate,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "math" => Ok(Route::Math),
            "write" => Ok(Route::Write),
            "translate" => Ok(Route::Translate),
            "multi" => Ok(Route::Multi),
            "default" => Ok(Route::Default),
            other => Err(format!("Unknown route: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_order_is_math_write_translate() {
        let mut shuffled = vec![Intent::Translate, Intent::Math, Intent::Write];
        shuffled.sort();
        assert_eq!(shuffled, Intent::ALL.to_vec());
    }

    #[test]
    fn route_names_roundtrip() {
        for route in [Route::Math, Route::Write, Route::Translate, Route::Multi, Route::Default] {
            assert_eq!(route.as_str().parse::<Route>().unwrap(), route);
        }
        assert!("poetry".parse::<Route>().is_err());
    }

    #[test]
    fn intents_serialize_as_lowercase_names() {
        let json = serde_json::to_string(&[Intent::Math, Intent::Write]).unwrap();
        assert_eq!(json, r#"["math","write"]"#);
    }
}
