//! Arithmetic handler.
//!
//! Simple binary operations and square roots are computed locally from
//! the raw query. Anything else is handed to the backend with the
//! retrieved context.

use async_trait::async_trait;
use regex_lite::{Captures, Regex};
use switchyard_core::error::ClassifierError;
use switchyard_providers::TextGenerator;
use tracing::{error, info};

use super::Handler;
use crate::classifier::compile_pattern;
use crate::state::QueryState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    SquareRoot,
}

/// Tried in this order; the first structural match wins.
const RULES: [(Operation, &str); 5] = [
    (Operation::Add, r"(\d+)\s*\+\s*(\d+)"),
    (Operation::Subtract, r"(\d+)\s*\-\s*(\d+)"),
    (Operation::Multiply, r"(\d+)\s*\*\s*(\d+)"),
    (Operation::Divide, r"(\d+)\s*\/\s*(\d+)"),
    (Operation::SquareRoot, r"square root of (\d+)"),
];

pub struct ArithmeticHandler {
    rules: Vec<(Operation, Regex)>,
}

impl ArithmeticHandler {
    pub fn new() -> Result<Self, ClassifierError> {
        let rules = RULES
            .iter()
            .map(|(op, pattern)| compile_pattern("arithmetic", pattern).map(|re| (*op, re)))
            .collect::<Result<Vec<_>, ClassifierError>>()?;
        Ok(Self { rules })
    }

    /// Compute the result locally, or `None` when no rule matches.
    ///
    /// Patterns are matched against the query exactly as typed.
    pub fn evaluate(&self, query: &str) -> Option<String> {
        self.rules.iter().find_map(|(op, re)| {
            re.captures(query).map(|caps| {
                compute(*op, &caps).unwrap_or_else(|reason| {
                    error!(error = %reason, "Math calculation error");
                    format!("Error in calculation: {reason}")
                })
            })
        })
    }
}

fn compute(op: Operation, caps: &Captures<'_>) -> Result<String, String> {
    let a = caps.get(1).map_or("", |m| m.as_str());

    if op == Operation::SquareRoot {
        let value: f64 = a.parse().map_err(|e| format!("{e}"))?;
        return Ok(format!("Square root of {a} = {:?}", value.sqrt()));
    }

    let b = caps.get(2).map_or("", |m| m.as_str());

    if op == Operation::Divide {
        let numerator: f64 = a.parse().map_err(|e| format!("{e}"))?;
        let denominator: f64 = b.parse().map_err(|e| format!("{e}"))?;
        if denominator == 0.0 {
            return Ok("Cannot divide by zero".into());
        }
        return Ok(format!("{a} / {b} = {:?}", numerator / denominator));
    }

    let x: i128 = a.parse().map_err(|e| format!("invalid operand {a}: {e}"))?;
    let y: i128 = b.parse().map_err(|e| format!("invalid operand {b}: {e}"))?;
    let (symbol, value) = match op {
        Operation::Add => ("+", x.checked_add(y)),
        Operation::Subtract => ("-", x.checked_sub(y)),
        _ => ("*", x.checked_mul(y)),
    };
    let value = value.ok_or_else(|| format!("integer overflow in {a} {symbol} {b}"))?;
    Ok(format!("{a} {symbol} {b} = {value}"))
}

#[async_trait]
impl Handler for ArithmeticHandler {
    fn name(&self) -> &'static str {
        "arithmetic"
    }

    async fn handle(&self, state: &mut QueryState, generator: &TextGenerator) {
        info!(query = %state.input, "Math node processing");

        let result = match self.evaluate(&state.input) {
            Some(result) => result,
            None => {
                let prompt = format!(
                    "Previous context: {}\n\nPlease solve this math problem and provide a clear answer: {}",
                    state.memory_context, state.input
                );
                match generator.generate(&prompt).await {
                    Ok(text) => text,
                    Err(e) => {
                        error!(error = %e, "LLM math error");
                        format!("Error calculating: {e}")
                    }
                }
            }
        };

        info!(chars = result.chars().count(), "Math result generated");
        state.math_result = result;
    }
}
