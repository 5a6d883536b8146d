//! Fraction addition dialogue: `a/b + c/d`

use once_cell::sync::Lazy;
use regex::Regex;

use crate::state::{FractionScratch, SkillScratch, Step, TutorState, Validator};
use crate::utils::errors::Result;
use crate::utils::helpers::{gcd, parse_number, parse_signed_int, parse_unsigned_int, split_list};
use super::{accept, current_validator, finish, foreign_validator, reject, Plan, Skill, SkillId, Transition};

static FRACTION_SUM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+/\d+\s*\+\s*\d+/\d+").expect("valid regex"));

static FRACTION_ANSWER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(-?\d+)\s*/\s*(\d+)\s*$").expect("valid regex"));

#[derive(Debug, Default, Clone, Copy)]
pub struct FractionAddition;

fn steps() -> Vec<Step> {
    vec![
        Step::new(
            "What are the denominators of the fractions? Write them separated by a comma.",
            &[
                "Look at the numbers at the bottom of each fraction.",
                "Format: b, d.",
                "Example: 3, 4",
            ],
            Validator::Denominators,
        )
        .with_metadata("expects", "b, d"),
        Step::new(
            "Find the common denominator (the LCM of the denominators).",
            &[
                "Think of a number that is a multiple of both denominators.",
                "Find the least common multiple.",
                "Example: for 3 and 4 it is 12.",
            ],
            Validator::CommonDenominator,
        )
        .with_metadata("expects", "number"),
        Step::new(
            "Bring both fractions to the common denominator. What are the new numerators? (separated by a comma)",
            &[
                "Multiply the numerator and denominator of each fraction by the missing factor.",
                "Format: n1, n2",
                "Don't reduce yet.",
            ],
            Validator::NewNumerators,
        )
        .with_metadata("expects", "n1, n2"),
        Step::new(
            "Add the numerators. What is the numerator of the resulting fraction?",
            &["Add the two numerators you got.", "Just the number.", "Double-check carefully."],
            Validator::NumeratorSum,
        )
        .with_metadata("expects", "integer"),
        Step::new(
            "Reduce the fraction if possible. Write the final answer as an irreducible fraction n/m.",
            &[
                "Divide the numerator and denominator by their GCD.",
                "An improper fraction is fine.",
                "Make sure it cannot be reduced any further.",
            ],
            Validator::FinalFraction,
        )
        .with_metadata("expects", "n/m")
        .with_metadata("terminal", true),
    ]
}

fn parse_pair(answer: &str, parse: fn(&str) -> Option<i64>) -> Option<(i64, i64)> {
    match split_list(answer).as_slice() {
        [first, second] => Some((parse(first)?, parse(second)?)),
        _ => None,
    }
}

impl Skill for FractionAddition {
    fn id(&self) -> SkillId {
        SkillId::FracAdd
    }

    fn match_score(&self, problem_text: &str) -> f64 {
        if FRACTION_SUM.is_match(problem_text) {
            0.8
        } else {
            0.0
        }
    }

    fn init(&self, problem_text: &str) -> TutorState {
        TutorState::new(self.id(), problem_text, steps(), SkillScratch::Fraction(FractionScratch::default()))
    }

    fn advance(&self, state: &mut TutorState, answer: &str) -> Result<Transition> {
        match current_validator(state)? {
            Validator::Denominators => {
                let Some((b, d)) = parse_pair(answer, parse_unsigned_int) else {
                    return reject(state, "Format: b, d. Example: 3, 4");
                };
                let scratch = state.scratch.fraction_mut()?;
                scratch.b = Some(b);
                scratch.d = Some(d);
                Ok(accept(state, format!("OK, the denominators are {} and {}.", b, d)))
            }
            Validator::CommonDenominator => {
                let Some(value) = parse_number(answer) else {
                    return reject(state, "Type a number: the common denominator.");
                };
                let lcd = value.trunc() as i64;
                state.scratch.fraction_mut()?.lcd = Some(lcd);
                Ok(accept(state, format!("Accepted: common denominator {}.", lcd)))
            }
            Validator::NewNumerators => {
                let Some((n1, n2)) = parse_pair(answer, parse_signed_int) else {
                    return reject(state, "Format: n1, n2 (integers only).");
                };
                let scratch = state.scratch.fraction_mut()?;
                scratch.n1 = Some(n1);
                scratch.n2 = Some(n2);
                Ok(accept(state, format!("Got it: the new numerators are {} and {}.", n1, n2)))
            }
            Validator::NumeratorSum => {
                let Some(total) = parse_signed_int(answer) else {
                    return reject(state, "An integer is needed.");
                };
                state.scratch.fraction_mut()?.sum_num = Some(total);
                Ok(accept(state, format!("Sum of the numerators = {}.", total)))
            }
            Validator::FinalFraction => {
                let parsed = FRACTION_ANSWER.captures(answer).and_then(|caps| {
                    let numerator = caps[1].parse::<i64>().ok()?;
                    let denominator = caps[2].parse::<i64>().ok()?;
                    Some((numerator, denominator))
                });
                let Some((numerator, denominator)) = parsed else {
                    return reject(state, "Answer format: n/m (for example, 7/12).");
                };
                if denominator == 0 {
                    return reject(state, "The denominator cannot be 0. Answer format: n/m (for example, 7/12).");
                }

                let divisor = gcd(numerator, denominator);
                let (reduced_num, reduced_den) = (numerator / divisor, denominator / divisor);
                let feedback = if (reduced_num, reduced_den) != (numerator, denominator) {
                    format!("Good! The irreducible form is {}/{}.", reduced_num, reduced_den)
                } else {
                    "Excellent! The fraction is already irreducible.".to_string()
                };
                Ok(finish(state, feedback))
            }
            other => Err(foreign_validator(self.id(), other)),
        }
    }

    fn plan(&self) -> Plan {
        Plan {
            title: "Plan for adding fractions a/b + c/d:",
            stages: &[
                "Find the LCM of the denominators",
                "Bring both fractions to it",
                "Add the numerators and reduce",
            ],
        }
    }

    fn topic(&self) -> &'static str {
        "Adding fractions (a/b + c/d)"
    }
}
