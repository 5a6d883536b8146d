//! Proportion dialogue: `a:b = c:x`
//!
//! A symbolic walk-through (fractions, cross-multiplication, isolating x)
//! followed by a numeric answer. Nothing is stored in scratch.

use crate::state::{SkillScratch, Step, TutorState, Validator};
use crate::utils::errors::Result;
use crate::utils::helpers::{format_number, parse_number};
use super::{accept, current_validator, finish, foreign_validator, reject, Plan, Skill, SkillId, Transition};

#[derive(Debug, Default, Clone, Copy)]
pub struct Proportion;

fn steps() -> Vec<Step> {
    vec![
        Step::new(
            "Write the proportion as fractions: a/b = c/x. What goes in the numerator and denominator on the left? (a/b)",
            &[
                "Read the proportion as 'a is to b'.",
                "The left fraction is the first pair.",
                "Write it as a/b.",
            ],
            Validator::LeftFraction,
        )
        .with_metadata("expects", "a/b"),
        Step::new(
            "State the rule: the product of the extremes equals the product of the means. What does the equation look like?",
            &["a·x = b·c.", "Multiply diagonally.", "Write it without computing."],
            Validator::DiagonalRule,
        )
        .with_metadata("expects", "equation"),
        Step::new(
            "Express x from the equation. What do you get?",
            &["x = (b·c)/a.", "First express x symbolically.", "We'll plug the numbers in later."],
            Validator::SolveForX,
        )
        .with_metadata("expects", "x = ..."),
        Step::new(
            "Substitute the numbers from the problem and compute x. Write a number.",
            &["Substitute carefully and simplify if needed.", "Just the number.", "No rounding."],
            Validator::ProportionX,
        )
        .with_metadata("expects", "number")
        .with_metadata("terminal", true),
    ]
}

impl Skill for Proportion {
    fn id(&self) -> SkillId {
        SkillId::Proportion
    }

    fn match_score(&self, problem_text: &str) -> f64 {
        if problem_text.contains(':') && problem_text.contains('=') {
            0.7
        } else {
            0.0
        }
    }

    fn init(&self, problem_text: &str) -> TutorState {
        TutorState::new(self.id(), problem_text, steps(), SkillScratch::Proportion)
    }

    fn advance(&self, state: &mut TutorState, answer: &str) -> Result<Transition> {
        match current_validator(state)? {
            Validator::LeftFraction => {
                if !answer.contains('/') {
                    return reject(state, "Write it as a/b (example: 2/3).");
                }
                Ok(accept(state, "OK."))
            }
            Validator::DiagonalRule => Ok(accept(state, "Right: a·x = b·c.")),
            Validator::SolveForX => {
                if !answer.contains('x') {
                    return reject(state, "Express x itself (for example: x = (b·c)/a).");
                }
                Ok(accept(state, "Correct: x = (b·c)/a."))
            }
            Validator::ProportionX => {
                let Some(value) = parse_number(answer) else {
                    return reject(state, "A number is needed.");
                };
                Ok(finish(
                    state,
                    format!("Done! You found the value of x yourself: x = {}.", format_number(value)),
                ))
            }
            other => Err(foreign_validator(self.id(), other)),
        }
    }

    fn plan(&self) -> Plan {
        Plan {
            title: "Plan for solving the proportion a:b = c:x:",
            stages: &[
                "Switch to fractions: a/b = c/x",
                "Cross-multiply: a·x = b·c",
                "Express x: x = (b·c)/a",
            ],
        }
    }

    fn topic(&self) -> &'static str {
        "Proportions (a:b = c:x)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn answer(state: &mut TutorState, text: &str) -> Transition {
        Proportion.advance(state, text).expect("advance")
    }

    #[test]
    fn test_match_score() {
        assert_eq!(Proportion.match_score("2:3 = 4:y"), 0.7);
        assert_eq!(Proportion.match_score("2:3"), 0.0);
    }

    #[test]
    fn test_symbolic_steps() {
        let mut state = Proportion.init("2:3 = 4:y");
        assert!(!answer(&mut state, "2 to 3").is_accepted());
        assert!(answer(&mut state, "2/3").is_accepted());
        assert_eq!(answer(&mut state, "whatever").feedback(), "Right: a·x = b·c.");
        assert!(!answer(&mut state, "y = 6").is_accepted());
        assert!(!answer(&mut state, "X = 3*4/2").is_accepted());
        assert!(answer(&mut state, "x = 3*4/2").is_accepted());
        assert_eq!(state.step_index, 3);
        assert_eq!(state.scratch.values, SkillScratch::Proportion);
    }

    #[test]
    fn test_any_number_finishes() {
        let mut state = Proportion.init("2:3 = 4:y");
        for text in ["2/3", "2x = 12", "x = 12/2"] {
            answer(&mut state, text);
        }
        assert!(!answer(&mut state, "six").is_accepted());
        assert!(!state.finished);

        let transition = answer(&mut state, "7");
        assert_matches!(transition, Transition::Finished { .. });
        assert!(state.finished);
    }

    #[test]
    fn test_foreign_validator_is_an_error() {
        let mut state = crate::skills::LinearEquation.init("2x = 4");
        assert!(Proportion.advance(&mut state, "2").is_err());
    }
}
