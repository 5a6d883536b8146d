//! Canonical dialogues used across the integration tests

/// A problem statement with correct answers to every step
pub struct Dialogue {
    pub problem: &'static str,
    pub answers: &'static [&'static str],
    pub final_feedback: &'static str,
}

pub const LINEAR: Dialogue = Dialogue {
    problem: "2x + 5 = 17",
    answers: &["2", "5", "17", "12", "6"],
    final_feedback: "Excellent! x = 6. You reached the answer yourself.",
};

pub const FRACTIONS: Dialogue = Dialogue {
    problem: "2/3 + 3/4",
    answers: &["3, 4", "12", "8, 9", "17", "17/12"],
    final_feedback: "Excellent! The fraction is already irreducible.",
};

pub const FRACTIONS_REDUCIBLE: Dialogue = Dialogue {
    problem: "1/6 + 1/3",
    answers: &["6, 3", "6", "1, 2", "3", "3/6"],
    final_feedback: "Good! The irreducible form is 1/2.",
};

pub const QUADRATIC: Dialogue = Dialogue {
    problem: "x^2 - 5x + 6 = 0",
    answers: &["1, -5, 6", "1", "2", "2, 3"],
    final_feedback: "Great work! You derived the roots yourself.",
};

pub const PROPORTION: Dialogue = Dialogue {
    problem: "3:4 = 6:y",
    answers: &["3/4", "3y = 24", "x = 24/3", "8"],
    final_feedback: "Done! You found the value of x yourself: x = 8.",
};

pub fn all_dialogues() -> [Dialogue; 5] {
    [LINEAR, FRACTIONS, FRACTIONS_REDUCIBLE, QUADRATIC, PROPORTION]
}
