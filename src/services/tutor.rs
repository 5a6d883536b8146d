//! Tutoring engine
//!
//! Routes each incoming message either to a new session (skill selection and
//! init) or to the active skill's step transition. Every operation returns
//! the replies to send, in order; each reply is a separate outbound message.

use tracing::{debug, info, warn};

use crate::skills::{registry, Plan, SkillRegistry, Transition};
use crate::state::{SessionStore, StorageStats, TutorState, UserId};
use crate::utils::errors::{CoachError, Result};
use crate::utils::logging;
use super::classifier::classify;

/// Reply to an accepted new problem
pub const PROBLEM_ACCEPTED: &str =
    "Got the problem. I won't give you the answer; I'll guide you to it with questions. ✍️";
/// Appended to the last feedback of a finished dialogue
pub const NEXT_PROBLEM_PROMPT: &str = "Ready for a new problem? Use /new or just send the text.";
/// Reply to `/new`
pub const SESSION_RESET: &str = "OK! Send the new problem as text.";
/// Hint requested without a running session
pub const NO_SESSION_FOR_HINT: &str = "Start a problem first. Send its statement or use /new.";
/// Plan or answer requested without a running session
pub const NO_ACTIVE_PROBLEM: &str = "No active problem. Send a problem statement to begin.";
/// The hint ladder of the current step is exhausted
pub const NO_MORE_HINTS: &str = "No more hints. Try to put the step into your own words.";
/// Appended to every give-up plan
pub const PLAN_FOOTER: &str = "To continue, answer the current step or use /hint.";
/// Generic reply for unexpected internal failures
pub const FAILURE_REPLY: &str = "Oops, something went wrong. Try again or start over with /new.";

/// The tutoring engine shared by all transport handlers
#[derive(Debug)]
pub struct TutorService {
    store: SessionStore,
    skills: &'static SkillRegistry,
}

impl TutorService {
    /// Create an engine with an empty session store
    pub fn new() -> Self {
        Self {
            store: SessionStore::new(),
            skills: registry(),
        }
    }

    /// Snapshot of a user's session
    pub fn session(&self, user_id: UserId) -> Option<TutorState> {
        self.store.get(user_id)
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn stats(&self) -> StorageStats {
        self.store.stats()
    }

    /// Routing entry point for free text
    pub fn handle_text(&self, user_id: UserId, text: &str) -> Result<Vec<String>> {
        let text = text.trim();
        self.store.transaction(user_id, |slot| {
            if is_active(slot) {
                self.advance(slot, user_id, text)
            } else {
                Ok(self.begin(slot, user_id, text))
            }
        })
    }

    /// Start a dialogue for the problem, replacing any existing session
    pub fn start_new_session(&self, user_id: UserId, problem_text: &str) -> Vec<String> {
        let problem_text = problem_text.trim();
        self.store.with_session(user_id, |slot| self.begin(slot, user_id, problem_text))
    }

    /// Check an answer against the current step of the user's session
    pub fn submit_answer(&self, user_id: UserId, text: &str) -> Result<Vec<String>> {
        let text = text.trim();
        self.store.transaction(user_id, |slot| {
            if is_active(slot) {
                self.advance(slot, user_id, text)
            } else {
                Ok(vec![NO_ACTIVE_PROBLEM.to_string()])
            }
        })
    }

    /// Drop the user's session
    pub fn reset_session(&self, user_id: UserId) -> String {
        if self.store.clear(user_id) {
            logging::log_user_action(user_id, "reset", None);
        }
        SESSION_RESET.to_string()
    }

    /// Next hint of the current step
    pub fn request_hint(&self, user_id: UserId) -> String {
        self.store
            .with_existing(user_id, |state| {
                if state.finished {
                    return None;
                }
                let reply = match state.next_hint() {
                    Some(hint) => {
                        debug!(user_id = user_id, step = state.step_index, used = state.scratch.hints_used, "Hint dispensed");
                        format!("Hint: {}", hint)
                    }
                    None => NO_MORE_HINTS.to_string(),
                };
                Some(reply)
            })
            .flatten()
            .unwrap_or_else(|| NO_SESSION_FOR_HINT.to_string())
    }

    /// Static solution plan of the active skill
    pub fn request_plan(&self, user_id: UserId) -> String {
        let skill_id = self.store.with_existing(user_id, |state| state.skill_id);
        match skill_id {
            Some(id) => {
                logging::log_user_action(user_id, "giveup", Some(id.as_str()));
                format_plan(&self.skills.get(id).plan())
            }
            None => NO_ACTIVE_PROBLEM.to_string(),
        }
    }

    /// Human-readable list of supported problem types
    pub fn list_supported_types(&self) -> String {
        let topics: Vec<String> = self
            .skills
            .iter()
            .map(|skill| format!("• {}", skill.topic()))
            .collect();
        format!(
            "Supported problem types so far:\n{}\n\nJust send the problem statement in free form.",
            topics.join("\n")
        )
    }

    fn begin(&self, slot: &mut Option<TutorState>, user_id: UserId, problem_text: &str) -> Vec<String> {
        let skill = self.skills.best_skill(problem_text);
        if let Some(top) = classify(problem_text).first() {
            if top.skill != skill.id() {
                debug!(user_id = user_id, selected = %skill.id(), classified = %top.skill, "Classifier and skill selection disagree");
            }
        }

        let state = skill.init(problem_text);
        logging::log_session_started(user_id, skill.id().as_str(), state.steps().len());

        let mut replies = vec![PROBLEM_ACCEPTED.to_string()];
        replies.extend(state.step_text());
        *slot = Some(state);
        replies
    }

    fn advance(&self, slot: &mut Option<TutorState>, user_id: UserId, answer: &str) -> Result<Vec<String>> {
        let Some(state) = slot.as_mut() else {
            return Err(CoachError::SessionNotFound { user_id });
        };
        let skill = self.skills.get(state.skill_id);
        let step = state.step_index;
        let validator = state.current_step().map(|s| s.validator().as_str()).unwrap_or("none");

        let transition = skill.advance(state, answer).map_err(|e| {
            warn!(user_id = user_id, skill = %skill.id(), step = step, error = %e, "Step transition failed");
            e
        })?;
        logging::log_step_result(user_id, skill.id().as_str(), step, validator, transition.is_accepted());

        match transition {
            Transition::Finished { feedback } => {
                logging::log_session_finished(user_id, skill.id().as_str(), state.elapsed_secs());
                *slot = None;
                Ok(vec![format!("{}\n\n{}", feedback, NEXT_PROBLEM_PROMPT)])
            }
            Transition::Rejected { feedback, .. } | Transition::Advanced { feedback, .. } => {
                let mut replies = vec![feedback];
                replies.extend(state.step_text());
                Ok(replies)
            }
        }
    }
}

impl Default for TutorService {
    fn default() -> Self {
        Self::new()
    }
}

fn is_active(slot: &Option<TutorState>) -> bool {
    slot.as_ref().is_some_and(|state| !state.finished)
}

fn format_plan(plan: &Plan) -> String {
    let stages: Vec<String> = plan
        .stages
        .iter()
        .enumerate()
        .map(|(i, stage)| format!("{}) {}", i + 1, stage))
        .collect();
    format!("{}\n{}\n\n{}", plan.title, stages.join("\n"), PLAN_FOOTER)
}

/// Log the engine's readiness
pub fn log_ready(service: &TutorService) {
    let skills: Vec<&str> = service.skills.iter().map(|s| s.id().as_str()).collect();
    info!(skills = ?skills, "Tutor engine ready");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::SkillId;

    #[test]
    fn test_first_message_starts_session() {
        let tutor = TutorService::new();
        let replies = tutor.handle_text(1, "  2x + 5 = 17 ").unwrap();
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0], PROBLEM_ACCEPTED);
        assert!(replies[1].starts_with("Step 1/5:\n"));

        let state = tutor.session(1).expect("session");
        assert_eq!(state.skill_id, SkillId::LinearEq);
        assert_eq!(state.problem_text, "2x + 5 = 17");
    }

    #[test]
    fn test_accept_then_present_next_step() {
        let tutor = TutorService::new();
        tutor.handle_text(1, "2x + 5 = 17").unwrap();
        let replies = tutor.handle_text(1, "2").unwrap();
        assert_eq!(replies, vec!["Accepted: a = 2".to_string(), tutor.session(1).unwrap().step_text().unwrap()]);
        assert!(replies[1].starts_with("Step 2/5:"));
    }

    #[test]
    fn test_rejection_represents_same_step() {
        let tutor = TutorService::new();
        tutor.handle_text(1, "2x + 5 = 17").unwrap();
        let replies = tutor.handle_text(1, "banana").unwrap();
        assert_eq!(replies.len(), 2);
        assert!(replies[1].starts_with("Step 1/5:"));
        assert_eq!(tutor.session(1).unwrap().step_index, 0);
    }

    #[test]
    fn test_submit_answer_without_session() {
        let tutor = TutorService::new();
        assert_eq!(tutor.submit_answer(9, "12").unwrap(), vec![NO_ACTIVE_PROBLEM.to_string()]);
        assert!(tutor.session(9).is_none());
    }

    #[test]
    fn test_advance_without_state_is_an_error() {
        let tutor = TutorService::new();
        let mut slot = None;
        let result = tutor.advance(&mut slot, 9, "12");
        assert!(matches!(result, Err(CoachError::SessionNotFound { user_id: 9 })));
    }

    #[test]
    fn test_start_new_session_replaces_existing() {
        let tutor = TutorService::new();
        tutor.handle_text(1, "2x + 5 = 17").unwrap();
        tutor.handle_text(1, "2").unwrap();
        tutor.start_new_session(1, "1/2 + 1/3");
        let state = tutor.session(1).unwrap();
        assert_eq!(state.skill_id, SkillId::FracAdd);
        assert_eq!(state.step_index, 0);
    }

    #[test]
    fn test_reset_and_missing_session_messages() {
        let tutor = TutorService::new();
        tutor.handle_text(3, "x^2 = 4").unwrap();
        assert_eq!(tutor.reset_session(3), SESSION_RESET);
        assert!(tutor.session(3).is_none());
        assert_eq!(tutor.request_hint(3), NO_SESSION_FOR_HINT);
        assert_eq!(tutor.request_plan(3), NO_ACTIVE_PROBLEM);
    }

    #[test]
    fn test_plan_does_not_touch_scratch() {
        let tutor = TutorService::new();
        tutor.handle_text(4, "2x + 5 = 17").unwrap();
        tutor.handle_text(4, "2").unwrap();
        tutor.request_hint(4);
        let before = tutor.session(4).unwrap();

        let plan = tutor.request_plan(4);
        assert!(plan.starts_with("Plan for solving the linear equation ax + b = c:\n1) "));
        assert!(plan.ends_with(PLAN_FOOTER));
        assert_eq!(tutor.session(4).unwrap(), before);
    }

    #[test]
    fn test_supported_types_in_registry_order() {
        let text = TutorService::new().list_supported_types();
        let linear = text.find("Linear equations").unwrap();
        let fractions = text.find("Adding fractions").unwrap();
        let quadratic = text.find("Quadratic equations").unwrap();
        let proportion = text.find("Proportions").unwrap();
        assert!(linear < fractions && fractions < quadratic && quadratic < proportion);
    }
}
