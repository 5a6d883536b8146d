//! Quadratic equation dialogue: `ax^2 + bx + c = 0`
//!
//! Walks through coefficients, discriminant, root count and root values.
//! None of the computed answers is checked against `b^2 - 4ac`; any
//! well-formed input moves the dialogue forward.

use crate::state::{QuadraticScratch, SkillScratch, Step, TutorState, Validator};
use crate::utils::errors::Result;
use crate::utils::helpers::{format_number, parse_number, parse_plain_number, split_list};
use super::{accept, current_validator, finish, foreign_validator, reject, Plan, Skill, SkillId, Transition};

#[derive(Debug, Default, Clone, Copy)]
pub struct QuadraticEquation;

fn steps() -> Vec<Step> {
    vec![
        Step::new(
            "Identify the coefficients a, b, c in the equation ax^2 + bx + c = 0. Write: a, b, c",
            &[
                "Look at the factors in front of x^2 and x, and at the free term.",
                "Don't forget the signs.",
                "Format: a, b, c (for example, 1, -5, 6)",
            ],
            Validator::Coefficients,
        )
        .with_metadata("expects", "a, b, c"),
        Step::new(
            "Find the discriminant: D = b^2 - 4ac. Enter its value.",
            &[
                "Substitute your a, b, c.",
                "First compute b^2, then 4ac.",
                "Just the number.",
            ],
            Validator::Discriminant,
        )
        .with_metadata("expects", "number"),
        Step::new(
            "How many roots does the equation have? (enter 0, 1 or 2)",
            &[
                "If D > 0 there are two roots; D = 0 gives one; D < 0 gives no real roots.",
                "Compare D with zero.",
                "Only 0/1/2.",
            ],
            Validator::RootsCount,
        )
        .with_metadata("expects", "0 | 1 | 2"),
        Step::new(
            "Compute the root(s) with the formula x = (-b ± √D) / (2a). Separate them with a comma (if there are two), or write \"none\" if there are no real roots.",
            &[
                "Use exact values. No rounding needed.",
                "Any order, separated by a comma.",
                "For a single root enter just that one.",
            ],
            Validator::RootsValues,
        )
        .with_metadata("expects", "x1, x2")
        .with_metadata("terminal", true),
    ]
}

impl Skill for QuadraticEquation {
    fn id(&self) -> SkillId {
        SkillId::QuadraticEq
    }

    fn match_score(&self, problem_text: &str) -> f64 {
        if problem_text.contains("x^2") || problem_text.contains("x²") {
            0.9
        } else {
            0.0
        }
    }

    fn init(&self, problem_text: &str) -> TutorState {
        TutorState::new(self.id(), problem_text, steps(), SkillScratch::Quadratic(QuadraticScratch::default()))
    }

    fn advance(&self, state: &mut TutorState, answer: &str) -> Result<Transition> {
        match current_validator(state)? {
            Validator::Coefficients => {
                let parts = split_list(answer);
                if parts.len() != 3 {
                    return reject(state, "Format: a, b, c (for example, 1, -5, 6).");
                }
                let Some(values) = parts.iter().map(|p| parse_plain_number(p)).collect::<Option<Vec<f64>>>() else {
                    return reject(state, "The coefficients must be numbers.");
                };
                let (a, b, c) = (values[0], values[1], values[2]);
                let scratch = state.scratch.quadratic_mut()?;
                scratch.a = Some(a);
                scratch.b = Some(b);
                scratch.c = Some(c);
                Ok(accept(
                    state,
                    format!(
                        "Recorded: a={}, b={}, c={}.",
                        format_number(a),
                        format_number(b),
                        format_number(c)
                    ),
                ))
            }
            Validator::Discriminant => {
                let Some(discriminant) = parse_number(answer) else {
                    return reject(state, "Enter the numeric value of the discriminant.");
                };
                state.scratch.quadratic_mut()?.discriminant = Some(discriminant);
                Ok(accept(state, format!("D = {}.", format_number(discriminant))))
            }
            Validator::RootsCount => {
                let count = match answer.trim() {
                    "0" => 0,
                    "1" => 1,
                    "2" => 2,
                    _ => return reject(state, "Enter 0, 1 or 2."),
                };
                state.scratch.quadratic_mut()?.roots_count = Some(count);
                Ok(accept(state, format!("Accepted: {} root(s).", count)))
            }
            Validator::RootsValues => {
                let parts: Vec<String> = split_list(answer).into_iter().filter(|p| !p.is_empty()).collect();
                let no_real_roots = state.scratch.quadratic_mut()?.roots_count == Some(0);
                if no_real_roots && !parts.iter().any(|p| parse_plain_number(p).is_some()) {
                    return Ok(finish(state, "Right: with no real roots there is nothing to compute. Great work!"));
                }
                if parts.is_empty() || parts.iter().any(|p| parse_plain_number(p).is_none()) {
                    return reject(state, "The roots must be numbers separated by a comma.");
                }
                Ok(finish(state, "Great work! You derived the roots yourself."))
            }
            other => Err(foreign_validator(self.id(), other)),
        }
    }

    fn plan(&self) -> Plan {
        Plan {
            title: "Plan for solving a quadratic equation:",
            stages: &[
                "Identify a, b, c",
                "Compute D = b² - 4ac",
                "If D ≥ 0, x = (-b ± √D)/(2a)",
            ],
        }
    }

    fn topic(&self) -> &'static str {
        "Quadratic equations (ax² + bx + c = 0)"
    }
}
