//! Linear equation dialogue: `ax + b = c`
//!
//! The learner reads off the coefficients, subtracts `b`, then divides by
//! `a`. Both computed steps are checked against the values the learner
//! supplied earlier; the final answer is only accepted when it matches.

use crate::state::{LinearScratch, SkillScratch, Step, TutorState, Validator};
use crate::utils::errors::Result;
use crate::utils::helpers::{format_number, parse_number, within_tolerance};
use super::{accept, current_validator, finish, foreign_validator, reject, Plan, Skill, SkillId, Transition};

#[derive(Debug, Default, Clone, Copy)]
pub struct LinearEquation;

fn steps() -> Vec<Step> {
    vec![
        Step::new(
            "What is the coefficient of x (a) in the equation? Type a number.",
            &[
                "Look at the factor written right next to x.",
                "If x stands without a number, the coefficient is 1 or -1.",
                "In the form ax + b = c, a is the number in front of x.",
            ],
            Validator::CoefA,
        )
        .with_metadata("expects", "number"),
        Step::new(
            "Which constant term stands on the left (b) in the form ax + b = c?",
            &[
                "Look for the number standing apart from x on the left side.",
                "The sign matters: '- 5' means b = -5.",
                "In the form ax + b = c, b is the 'plus or minus number' on the left.",
            ],
            Validator::CoefB,
        )
        .with_metadata("expects", "number"),
        Step::new(
            "What is the right-hand side (c)? Type a number.",
            &[
                "Look at the number after the '=' sign.",
                "If the right side is an expression, work out its value.",
                "In the form ax + b = c, c is the right-hand side.",
            ],
            Validator::CoefC,
        )
        .with_metadata("expects", "number"),
        Step::new(
            "Do the step: subtract b from both sides. What does a·x equal after it?",
            &[
                "a·x = c - b.",
                "Plug the a, b, c you found into c - b.",
                "Write the result as a number.",
            ],
            Validator::AxAfter,
        )
        .with_metadata("expects", "number"),
        Step::new(
            "Now divide both sides by a. What is x? (a number)",
            &[
                "x = (c - b)/a.",
                "Substitute your values.",
                "Compute it numerically, no rounding needed.",
            ],
            Validator::LinearX,
        )
        .with_metadata("expects", "number")
        .with_metadata("terminal", true),
    ]
}

impl Skill for LinearEquation {
    fn id(&self) -> SkillId {
        SkillId::LinearEq
    }

    fn match_score(&self, problem_text: &str) -> f64 {
        if problem_text.contains('x') && !problem_text.contains("^2") {
            0.7
        } else {
            0.0
        }
    }

    fn init(&self, problem_text: &str) -> TutorState {
        TutorState::new(self.id(), problem_text, steps(), SkillScratch::Linear(LinearScratch::default()))
    }

    fn advance(&self, state: &mut TutorState, answer: &str) -> Result<Transition> {
        let validator = current_validator(state)?;
        let parsed = parse_number(answer);

        match validator {
            Validator::CoefA => {
                let Some(a) = parsed else {
                    return reject(state, "A number is needed. For example: 2 or -3.");
                };
                if a == 0.0 {
                    return reject(state, "With a = 0 there is no x left to solve for. Check the coefficient in front of x.");
                }
                state.scratch.linear_mut()?.a = Some(a);
                Ok(accept(state, format!("Accepted: a = {}", format_number(a))))
            }
            Validator::CoefB => {
                let Some(b) = parsed else {
                    return reject(state, "The answer must be a number, with a sign if needed.");
                };
                state.scratch.linear_mut()?.b = Some(b);
                Ok(accept(state, format!("OK: b = {}", format_number(b))))
            }
            Validator::CoefC => {
                let Some(c) = parsed else {
                    return reject(state, "Type a number.");
                };
                state.scratch.linear_mut()?.c = Some(c);
                Ok(accept(state, format!("Noted: c = {}", format_number(c))))
            }
            Validator::AxAfter => {
                let Some(value) = parsed else {
                    return reject(state, "Type the number that equals c - b.");
                };
                let scratch = state.scratch.linear_mut()?;
                let (Some(b), Some(c)) = (scratch.b, scratch.c) else {
                    return reject(state, "Let's determine a, b and c in the steps above first.");
                };
                if !within_tolerance(value, c - b) {
                    return reject(
                        state,
                        format!(
                            "Check the calculation: subtract b = {} from c = {}. Try again.",
                            format_number(b),
                            format_number(c)
                        ),
                    );
                }
                scratch.ax_val = Some(value);
                Ok(accept(state, format!("Correct: a·x = c - b = {}", format_number(value))))
            }
            Validator::LinearX => {
                let Some(value) = parsed else {
                    return reject(state, "A number is needed.");
                };
                let scratch = state.scratch.linear_mut()?;
                let (Some(a), Some(ax)) = (scratch.a, scratch.ax_val) else {
                    return reject(state, "Let's compute c - b in the previous step first.");
                };
                if !within_tolerance(value, ax / a) {
                    return reject(
                        state,
                        format!(
                            "That doesn't add up. Remember x = (c - b)/a, here {} divided by {}. Enter the exact value.",
                            format_number(ax),
                            format_number(a)
                        ),
                    );
                }
                Ok(finish(
                    state,
                    format!("Excellent! x = {}. You reached the answer yourself.", format_number(value)),
                ))
            }
            other => Err(foreign_validator(self.id(), other)),
        }
    }

    fn plan(&self) -> Plan {
        Plan {
            title: "Plan for solving the linear equation ax + b = c:",
            stages: &[
                "Subtract b from both sides: a·x = c - b",
                "Divide both sides by a: x = (c - b)/a",
            ],
        }
    }

    fn topic(&self) -> &'static str {
        "Linear equations (ax + b = c)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn answer(state: &mut TutorState, text: &str) -> Transition {
        LinearEquation.advance(state, text).expect("advance")
    }

    fn state_at_ax_step() -> TutorState {
        let mut state = LinearEquation.init("2x + 5 = 17");
        answer(&mut state, "2");
        answer(&mut state, "5");
        answer(&mut state, "17");
        state
    }

    #[test]
    fn test_match_score() {
        assert_eq!(LinearEquation.match_score("2x + 5 = 17"), 0.7);
        assert_eq!(LinearEquation.match_score("x^2 = 4"), 0.0);
        assert_eq!(LinearEquation.match_score("1/2 + 1/3"), 0.0);
    }

    #[test]
    fn test_coefficients_are_stored() {
        let state = state_at_ax_step();
        assert_eq!(state.step_index, 3);
        assert_eq!(
            state.scratch.values,
            SkillScratch::Linear(LinearScratch { a: Some(2.0), b: Some(5.0), c: Some(17.0), ax_val: None })
        );
    }

    #[test]
    fn test_non_number_is_rejected() {
        let mut state = LinearEquation.init("2x + 5 = 17");
        let transition = answer(&mut state, "two");
        assert_matches!(transition, Transition::Rejected { ref step, .. } if step.validator() == Validator::CoefA);
        assert_eq!(state.step_index, 0);
    }

    #[test]
    fn test_zero_coefficient_is_rejected() {
        let mut state = LinearEquation.init("0x + 5 = 17");
        assert!(!answer(&mut state, "0").is_accepted());
        assert_eq!(state.step_index, 0);
    }

    #[test]
    fn test_ax_after_checks_c_minus_b() {
        let mut state = state_at_ax_step();
        assert!(!answer(&mut state, "11").is_accepted());
        assert!(!answer(&mut state, "13").is_accepted());
        assert_eq!(state.step_index, 3);

        let transition = answer(&mut state, "12");
        assert_matches!(transition, Transition::Advanced { ref next, .. } if next.validator() == Validator::LinearX);
        assert_eq!(state.scratch.linear_mut().unwrap().ax_val, Some(12.0));
    }

    #[test]
    fn test_final_answer_reprompts_until_correct() {
        let mut state = state_at_ax_step();
        answer(&mut state, "12");

        assert!(!answer(&mut state, "7").is_accepted());
        assert!(!state.finished);
        assert_eq!(state.step_index, 4);

        let transition = answer(&mut state, "6");
        assert_matches!(transition, Transition::Finished { .. });
        assert!(state.finished);
        assert_eq!(transition.feedback(), "Excellent! x = 6. You reached the answer yourself.");
    }

    #[test]
    fn test_decimal_comma_accepted() {
        let mut state = LinearEquation.init("0.5x + 1 = 2");
        assert_eq!(answer(&mut state, "0,5").feedback(), "Accepted: a = 0.5");
    }

    #[test]
    fn test_finished_state_cannot_advance() {
        let mut state = state_at_ax_step();
        answer(&mut state, "12");
        answer(&mut state, "6");
        assert!(LinearEquation.advance(&mut state, "6").is_err());
    }
}
