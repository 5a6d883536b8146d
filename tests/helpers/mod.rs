//! Test helpers module
//!
//! Shared setup for the integration tests: logging, user ids and a driver
//! that plays a whole dialogue against the tutoring engine.

pub mod test_data;

pub use test_data::*;

use std::sync::Once;

use math_coach::TutorService;

static INIT: Once = Once::new();

/// Initialize logging for tests (called once)
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init();
    });
}

/// Fresh engine with test logging installed
pub fn test_tutor() -> TutorService {
    init_test_logging();
    TutorService::new()
}

pub fn test_user_id() -> i64 {
    123456789
}

/// Send the problem and then every answer, collecting the replies of each turn
pub fn run_dialogue(tutor: &TutorService, user_id: i64, problem: &str, answers: &[&str]) -> Vec<Vec<String>> {
    let mut turns = Vec::with_capacity(answers.len() + 1);
    turns.push(tutor.handle_text(user_id, problem).expect("problem accepted"));
    for answer in answers {
        turns.push(tutor.handle_text(user_id, answer).expect("answer handled"));
    }
    turns
}
