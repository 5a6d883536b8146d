//! Tutoring session context
//!
//! This module holds the per-user tutoring state: the fixed sequence of steps
//! produced by a skill, the current position in it, and the scratch record
//! of intermediate values the learner has supplied so far.

use std::collections::HashMap;
use chrono::{DateTime, Utc};

use crate::skills::SkillId;
use crate::utils::errors::{CoachError, Result};

/// Identifies the check/transition logic bound to a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Validator {
    CoefA,
    CoefB,
    CoefC,
    AxAfter,
    LinearX,
    Denominators,
    CommonDenominator,
    NewNumerators,
    NumeratorSum,
    FinalFraction,
    Coefficients,
    Discriminant,
    RootsCount,
    RootsValues,
    LeftFraction,
    DiagonalRule,
    SolveForX,
    ProportionX,
}

impl Validator {
    /// Validator identifier as used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Validator::CoefA => "coef_a",
            Validator::CoefB => "coef_b",
            Validator::CoefC => "coef_c",
            Validator::AxAfter => "ax_after",
            Validator::LinearX | Validator::ProportionX => "x_value",
            Validator::Denominators => "denoms",
            Validator::CommonDenominator => "lcd",
            Validator::NewNumerators => "new_nums",
            Validator::NumeratorSum => "sum_num",
            Validator::FinalFraction => "final_frac",
            Validator::Coefficients => "abc",
            Validator::Discriminant => "disc",
            Validator::RootsCount => "roots_count",
            Validator::RootsValues => "roots_values",
            Validator::LeftFraction => "left_frac",
            Validator::DiagonalRule => "diag_rule",
            Validator::SolveForX => "solve_x",
        }
    }
}

impl std::fmt::Display for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One question in a skill's fixed sequence. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    prompt: String,
    hints: Vec<String>,
    validator: Validator,
    metadata: HashMap<String, serde_json::Value>,
}

impl Step {
    /// Create a step with its escalating hint ladder
    pub fn new(prompt: &str, hints: &[&str], validator: Validator) -> Self {
        Self {
            prompt: prompt.to_string(),
            hints: hints.iter().map(|h| h.to_string()).collect(),
            validator,
            metadata: HashMap::new(),
        }
    }

    /// Attach an opaque metadata entry
    pub fn with_metadata(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    pub fn validator(&self) -> Validator {
        self.validator
    }

    pub fn metadata(&self) -> &HashMap<String, serde_json::Value> {
        &self.metadata
    }
}

/// Values collected by the linear equation dialogue
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearScratch {
    pub a: Option<f64>,
    pub b: Option<f64>,
    pub c: Option<f64>,
    pub ax_val: Option<f64>,
}

/// Values collected by the fraction addition dialogue
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FractionScratch {
    pub b: Option<i64>,
    pub d: Option<i64>,
    pub lcd: Option<i64>,
    pub n1: Option<i64>,
    pub n2: Option<i64>,
    pub sum_num: Option<i64>,
}

/// Values collected by the quadratic equation dialogue
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuadraticScratch {
    pub a: Option<f64>,
    pub b: Option<f64>,
    pub c: Option<f64>,
    pub discriminant: Option<f64>,
    pub roots_count: Option<u8>,
}

/// Skill-specific part of the scratch record
#[derive(Debug, Clone, PartialEq)]
pub enum SkillScratch {
    Linear(LinearScratch),
    Fraction(FractionScratch),
    Quadratic(QuadraticScratch),
    Proportion,
}

impl SkillScratch {
    fn name(&self) -> &'static str {
        match self {
            SkillScratch::Linear(_) => "linear_eq",
            SkillScratch::Fraction(_) => "frac_add",
            SkillScratch::Quadratic(_) => "quadratic_eq",
            SkillScratch::Proportion => "proportion",
        }
    }
}

/// Per-session accumulator of intermediate values
#[derive(Debug, Clone, PartialEq)]
pub struct Scratch {
    /// Hints dispensed for the current step
    pub hints_used: usize,
    pub values: SkillScratch,
}

impl Scratch {
    pub fn new(values: SkillScratch) -> Self {
        Self { hints_used: 0, values }
    }

    pub fn linear_mut(&mut self) -> Result<&mut LinearScratch> {
        match &mut self.values {
            SkillScratch::Linear(values) => Ok(values),
            other => Err(CoachError::ScratchMismatch { skill: other.name().to_string() }),
        }
    }

    pub fn fraction_mut(&mut self) -> Result<&mut FractionScratch> {
        match &mut self.values {
            SkillScratch::Fraction(values) => Ok(values),
            other => Err(CoachError::ScratchMismatch { skill: other.name().to_string() }),
        }
    }

    pub fn quadratic_mut(&mut self) -> Result<&mut QuadraticScratch> {
        match &mut self.values {
            SkillScratch::Quadratic(values) => Ok(values),
            other => Err(CoachError::ScratchMismatch { skill: other.name().to_string() }),
        }
    }
}

/// Mutable tutoring state owned by a single user session
#[derive(Debug, Clone, PartialEq)]
pub struct TutorState {
    pub skill_id: SkillId,
    pub problem_text: String,
    /// Always within `0..=steps.len()`
    pub step_index: usize,
    steps: Vec<Step>,
    pub scratch: Scratch,
    pub finished: bool,
    pub started_at: DateTime<Utc>,
}

impl TutorState {
    /// Create a fresh state positioned at the first step
    pub fn new(skill_id: SkillId, problem_text: &str, steps: Vec<Step>, values: SkillScratch) -> Self {
        Self {
            skill_id,
            problem_text: problem_text.to_string(),
            step_index: 0,
            steps,
            scratch: Scratch::new(values),
            finished: false,
            started_at: Utc::now(),
        }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// The step awaiting an answer, if the session is still running
    pub fn current_step(&self) -> Option<&Step> {
        if self.finished {
            return None;
        }
        self.steps.get(self.step_index)
    }

    /// Current step formatted for the learner, e.g. "Step 2/5:\n..."
    pub fn step_text(&self) -> Option<String> {
        self.current_step().map(|step| {
            format!("Step {}/{}:\n{}", self.step_index + 1, self.steps.len(), step.prompt())
        })
    }

    /// Dispense the next hint of the current step; `None` once the ladder is exhausted
    pub fn next_hint(&mut self) -> Option<String> {
        let used = self.scratch.hints_used;
        let hint = self.current_step()?.hints().get(used)?.clone();
        self.scratch.hints_used = used + 1;
        Some(hint)
    }

    /// Move past the current step, resetting the hint counter.
    ///
    /// Returns the new current step, or `None` after marking the session
    /// finished when the sequence is exhausted.
    pub fn advance_step(&mut self) -> Option<&Step> {
        if self.step_index < self.steps.len() {
            self.step_index += 1;
        }
        self.scratch.hints_used = 0;
        if self.step_index >= self.steps.len() {
            self.finished = true;
        }
        self.current_step()
    }

    /// Finish the session from a terminal step
    pub fn finish(&mut self) {
        self.step_index = self.steps.len();
        self.scratch.hints_used = 0;
        self.finished = true;
    }

    /// Seconds since the session started
    pub fn elapsed_secs(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}
