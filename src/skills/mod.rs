//! Tutoring skills
//!
//! A skill is a scripted multi-step dialogue for one problem family. Every
//! skill builds a fixed sequence of steps and owns the validators that accept
//! or reject answers to them. Skills are stateless; all progress lives in
//! the [`TutorState`] they operate on.

pub mod fractions;
pub mod linear;
pub mod proportion;
pub mod quadratic;

use once_cell::sync::Lazy;

use crate::state::{Step, TutorState, Validator};
use crate::utils::errors::{CoachError, Result};

pub use fractions::FractionAddition;
pub use linear::LinearEquation;
pub use proportion::Proportion;
pub use quadratic::QuadraticEquation;

/// Identifier of a problem type / skill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkillId {
    LinearEq,
    FracAdd,
    QuadraticEq,
    Proportion,
}

impl SkillId {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillId::LinearEq => "linear_eq",
            SkillId::FracAdd => "frac_add",
            SkillId::QuadraticEq => "quadratic_eq",
            SkillId::Proportion => "proportion",
        }
    }
}

impl std::fmt::Display for SkillId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// High-level solution plan shown on give-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plan {
    pub title: &'static str,
    pub stages: &'static [&'static str],
}

/// Outcome of checking one answer
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Answer not accepted; `step` is the unchanged current step
    Rejected { feedback: String, step: Step },
    /// Answer accepted and the dialogue moved on to `next`
    Advanced { feedback: String, next: Step },
    /// Answer accepted and the dialogue is complete
    Finished { feedback: String },
}

impl Transition {
    pub fn feedback(&self) -> &str {
        match self {
            Transition::Rejected { feedback, .. }
            | Transition::Advanced { feedback, .. }
            | Transition::Finished { feedback } => feedback,
        }
    }

    /// Step to present next; `None` signals completion
    pub fn next_step(&self) -> Option<&Step> {
        match self {
            Transition::Rejected { step, .. } => Some(step),
            Transition::Advanced { next, .. } => Some(next),
            Transition::Finished { .. } => None,
        }
    }

    pub fn is_accepted(&self) -> bool {
        !matches!(self, Transition::Rejected { .. })
    }
}

/// A scripted dialogue for one problem family
pub trait Skill: Send + Sync + std::fmt::Debug {
    fn id(&self) -> SkillId;

    /// Confidence in `[0, 1]` that this skill fits the problem text
    fn match_score(&self, problem_text: &str) -> f64;

    /// Build a fresh state positioned at the first step
    fn init(&self, problem_text: &str) -> TutorState;

    /// Check an answer to the current step and apply the transition
    fn advance(&self, state: &mut TutorState, answer: &str) -> Result<Transition>;

    /// Static solution plan; never depends on the learner's values
    fn plan(&self) -> Plan;

    /// One-line description for the list of supported problem types
    fn topic(&self) -> &'static str;
}

/// Fixed, ordered registry of all skills
#[derive(Debug)]
pub struct SkillRegistry {
    skills: Vec<Box<dyn Skill>>,
}

static REGISTRY: Lazy<SkillRegistry> = Lazy::new(SkillRegistry::new);

/// The process-wide registry, built on first use and read-only afterwards
pub fn registry() -> &'static SkillRegistry {
    &REGISTRY
}

impl SkillRegistry {
    /// Create the registry with every supported skill in selection order
    pub fn new() -> Self {
        Self {
            skills: vec![
                Box::new(LinearEquation),
                Box::new(FractionAddition),
                Box::new(QuadraticEquation),
                Box::new(Proportion),
            ],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Skill> {
        self.skills.iter().map(|skill| skill.as_ref())
    }

    /// Get a skill by id
    pub fn get(&self, id: SkillId) -> &dyn Skill {
        match id {
            SkillId::LinearEq => &LinearEquation,
            SkillId::FracAdd => &FractionAddition,
            SkillId::QuadraticEq => &QuadraticEquation,
            SkillId::Proportion => &Proportion,
        }
    }

    /// Pick the skill with the strictly highest match score.
    ///
    /// Ties keep the earlier registry entry; all-zero scores fall back to
    /// the linear equation skill.
    pub fn best_skill(&self, problem_text: &str) -> &dyn Skill {
        let mut best: Option<(&dyn Skill, f64)> = None;
        for skill in self.iter() {
            let score = skill.match_score(problem_text);
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((skill, score));
            }
        }

        match best {
            Some((skill, score)) if score > 0.0 => skill,
            _ => self.get(SkillId::LinearEq),
        }
    }
}

impl Default for SkillRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator of the step awaiting an answer
pub(crate) fn current_validator(state: &TutorState) -> Result<Validator> {
    state
        .current_step()
        .map(Step::validator)
        .ok_or_else(|| CoachError::InvalidStateTransition {
            from: "finished".to_string(),
            to: "advance".to_string(),
        })
}

/// Error for a validator that belongs to a different skill
pub(crate) fn foreign_validator(skill: SkillId, validator: Validator) -> CoachError {
    CoachError::InvalidStateTransition {
        from: skill.to_string(),
        to: validator.to_string(),
    }
}

/// Keep the current step and explain what was wrong
pub(crate) fn reject(state: &TutorState, feedback: impl Into<String>) -> Result<Transition> {
    let step = state
        .current_step()
        .cloned()
        .ok_or_else(|| CoachError::InvalidStateTransition {
            from: "finished".to_string(),
            to: "reject".to_string(),
        })?;
    Ok(Transition::Rejected { feedback: feedback.into(), step })
}

/// Accept the answer and move to the following step
pub(crate) fn accept(state: &mut TutorState, feedback: impl Into<String>) -> Transition {
    let feedback = feedback.into();
    match state.advance_step().cloned() {
        Some(next) => Transition::Advanced { feedback, next },
        None => Transition::Finished { feedback },
    }
}

/// Accept a terminal answer and finish the dialogue
pub(crate) fn finish(state: &mut TutorState, feedback: impl Into<String>) -> Transition {
    state.finish();
    Transition::Finished { feedback: feedback.into() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_order() {
        let ids: Vec<SkillId> = registry().iter().map(|s| s.id()).collect();
        assert_eq!(
            ids,
            vec![SkillId::LinearEq, SkillId::FracAdd, SkillId::QuadraticEq, SkillId::Proportion]
        );
        for id in ids {
            assert_eq!(registry().get(id).id(), id);
        }
    }

    #[test]
    fn test_best_skill_selection() {
        let skills = registry();
        assert_eq!(skills.best_skill("2x + 5 = 17").id(), SkillId::LinearEq);
        assert_eq!(skills.best_skill("x^2 - 5x + 6 = 0").id(), SkillId::QuadraticEq);
        assert_eq!(skills.best_skill("x² + 1 = 0").id(), SkillId::QuadraticEq);
        assert_eq!(skills.best_skill("1/3 + 1/4").id(), SkillId::FracAdd);
        assert_eq!(skills.best_skill("3:4 = 6:y").id(), SkillId::Proportion);
    }

    #[test]
    fn test_ties_keep_first_registered() {
        // linear_eq and proportion both score 0.7
        assert_eq!(registry().best_skill("2:3 = x:6").id(), SkillId::LinearEq);
    }

    #[test]
    fn test_zero_scores_fall_back_to_linear() {
        assert_eq!(registry().best_skill("hello").id(), SkillId::LinearEq);
        assert_eq!(registry().best_skill("").id(), SkillId::LinearEq);
    }

    #[test]
    fn test_selection_is_deterministic() {
        for text in ["2x+5=17", "1/2 + 1/3", "a:b=c:d", "nonsense"] {
            assert_eq!(registry().best_skill(text).id(), registry().best_skill(text).id());
        }
    }

    #[test]
    fn test_every_skill_has_plan_and_topic() {
        for skill in registry().iter() {
            let plan = skill.plan();
            assert!(!plan.title.is_empty());
            assert!(plan.stages.len() >= 2);
            assert!(!skill.topic().is_empty());
        }
    }

    #[test]
    fn test_transition_next_step() {
        let skill = registry().get(SkillId::LinearEq);
        let mut state = skill.init("2x + 5 = 17");

        let rejected = skill.advance(&mut state, "two").unwrap();
        assert_eq!(rejected.next_step().map(Step::validator), Some(Validator::CoefA));
        let advanced = skill.advance(&mut state, "2").unwrap();
        assert_eq!(advanced.next_step().map(Step::validator), Some(Validator::CoefB));
    }

    #[test]
    fn test_every_step_has_hints() {
        for skill in registry().iter() {
            let state = skill.init("problem");
            assert!(!state.steps().is_empty());
            for step in state.steps() {
                assert_eq!(step.hints().len(), 3, "{} {}", skill.id(), step.validator());
            }
        }
    }
}
