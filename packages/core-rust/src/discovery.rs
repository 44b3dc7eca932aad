//! Guided discovery: the questionnaire that synthesizes filter criteria.
//!
//! A [`StyleFinder`] walks a fixed, ordered prefix of the question bank.
//! Each answer option carries a [`CriteriaFragment`]; completing the flow
//! compiles every answered question's fragments into one
//! [`FilterCriteria`], merging in question order and, within a
//! multiple-choice answer, in the order the options were selected.
//!
//! Question selection is deliberately a deterministic prefix of the bank,
//! so the same flow always offers the same questions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{AgeGroup, Condition, Season, Style, TargetGender};
use crate::criteria::{CriteriaFragment, FilterCriteria, PriceBounds};

/// Number of questions a default flow asks.
pub const DEFAULT_QUESTION_COUNT: usize = 5;

/// How many options a question accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Selecting an option replaces the previous answer.
    Single,
    /// Selecting an option toggles its membership in the answer set.
    Multiple,
}

/// One selectable answer, carrying the criteria fragment it contributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOption {
    /// Stable identifier recorded in the answer map.
    pub value: String,
    /// Display label.
    pub label: String,
    /// Partial criteria merged into the compiled result when selected.
    pub fragment: CriteriaFragment,
}

/// One question in the bank. Immutable after definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub mode: SelectionMode,
    pub options: Vec<AnswerOption>,
}

/// Recorded answer for one question.
///
/// Multiple-choice answers keep selection order, which fixes the fragment
/// merge order at compile time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Single(String),
    Multiple(Vec<String>),
}

impl Answer {
    fn is_empty(&self) -> bool {
        match self {
            Self::Single(value) => value.is_empty(),
            Self::Multiple(values) => values.is_empty(),
        }
    }
}

/// Position of a [`StyleFinder`] in its flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Answering the question at this index.
    Question(usize),
    /// All questions answered; compiled criteria available.
    Completed,
}

/// A refused discovery transition.
///
/// Refusals are synchronous and leave the flow state untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiscoveryError {
    #[error("current question has no answer yet")]
    AnswerRequired,
    #[error("discovery flow already completed")]
    AlreadyComplete,
    #[error("option {value:?} does not belong to the current question")]
    UnknownOption { value: String },
}

/// Questionnaire state machine over a fixed prefix of the question bank.
///
/// Construction and [`start`](StyleFinder::start) both leave the flow at
/// the first question with no recorded answers; re-opening after a prior
/// completion starts over.
#[derive(Debug, Clone)]
pub struct StyleFinder {
    questions: Vec<Question>,
    current: usize,
    answers: HashMap<String, Answer>,
    compiled: Option<FilterCriteria>,
}

impl Default for StyleFinder {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleFinder {
    /// Flow over the default five-question prefix of the bank.
    #[must_use]
    pub fn new() -> Self {
        Self::with_question_count(DEFAULT_QUESTION_COUNT)
    }

    /// Flow over the first `count` bank questions (clamped to the bank size).
    #[must_use]
    pub fn with_question_count(count: usize) -> Self {
        let mut questions = question_bank();
        questions.truncate(count.max(1));
        Self {
            questions,
            current: 0,
            answers: HashMap::new(),
            compiled: None,
        }
    }

    /// Resets to the first question with an empty answer map.
    pub fn start(&mut self) {
        self.current = 0;
        self.answers.clear();
        self.compiled = None;
    }

    /// Current position in the flow.
    #[must_use]
    pub fn step(&self) -> Step {
        if self.compiled.is_some() {
            Step::Completed
        } else {
            Step::Question(self.current)
        }
    }

    /// The question currently being answered, or `None` once completed.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.compiled.is_some() {
            None
        } else {
            self.questions.get(self.current)
        }
    }

    /// Total number of questions in this flow.
    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.compiled.is_some()
    }

    /// Recorded answer for a question, if any.
    #[must_use]
    pub fn answer(&self, question_id: &str) -> Option<&Answer> {
        self.answers.get(question_id)
    }

    /// Records `value` as an answer to the current question.
    ///
    /// Single-choice questions replace their previous answer; multiple-
    /// choice questions toggle membership, preserving selection order.
    pub fn select_option(&mut self, value: &str) -> Result<(), DiscoveryError> {
        if self.compiled.is_some() {
            return Err(DiscoveryError::AlreadyComplete);
        }
        let question = &self.questions[self.current];
        if !question.options.iter().any(|option| option.value == value) {
            return Err(DiscoveryError::UnknownOption {
                value: value.to_owned(),
            });
        }

        match question.mode {
            SelectionMode::Single => {
                self.answers
                    .insert(question.id.clone(), Answer::Single(value.to_owned()));
            }
            SelectionMode::Multiple => {
                let entry = self
                    .answers
                    .entry(question.id.clone())
                    .or_insert_with(|| Answer::Multiple(Vec::new()));
                if let Answer::Multiple(values) = entry {
                    if let Some(position) = values.iter().position(|v| v == value) {
                        values.remove(position);
                    } else {
                        values.push(value.to_owned());
                    }
                }
            }
        }
        Ok(())
    }

    /// Moves to the next question, or compiles on the last one.
    ///
    /// Refused with [`DiscoveryError::AnswerRequired`] while the current
    /// question has no (or an emptied-out) answer.
    pub fn advance(&mut self) -> Result<Step, DiscoveryError> {
        if self.compiled.is_some() {
            return Err(DiscoveryError::AlreadyComplete);
        }
        let question = &self.questions[self.current];
        let answered = self
            .answers
            .get(&question.id)
            .is_some_and(|answer| !answer.is_empty());
        if !answered {
            return Err(DiscoveryError::AnswerRequired);
        }

        if self.current + 1 < self.questions.len() {
            self.current += 1;
            Ok(Step::Question(self.current))
        } else {
            self.compiled = Some(self.compile());
            Ok(Step::Completed)
        }
    }

    /// Moves back one question. No-op at the first question or once
    /// completed.
    pub fn retreat(&mut self) -> Step {
        if self.compiled.is_none() && self.current > 0 {
            self.current -= 1;
        }
        self.step()
    }

    /// The compiled criteria, available once the flow completed.
    #[must_use]
    pub fn compiled_criteria(&self) -> Option<&FilterCriteria> {
        self.compiled.as_ref()
    }

    /// Merges every answered question's fragments into fresh criteria.
    ///
    /// Question order first, then selection order within a multiple-choice
    /// answer, so later answers win on overlapping scalar fields.
    fn compile(&self) -> FilterCriteria {
        let mut criteria = FilterCriteria::default();
        for question in &self.questions {
            let Some(answer) = self.answers.get(&question.id) else {
                continue;
            };
            match answer {
                Answer::Single(value) => {
                    if let Some(option) = find_option(question, value) {
                        criteria = criteria.merged(&option.fragment);
                    }
                }
                Answer::Multiple(values) => {
                    for value in values {
                        if let Some(option) = find_option(question, value) {
                            criteria = criteria.merged(&option.fragment);
                        }
                    }
                }
            }
        }
        criteria
    }
}

fn find_option<'a>(question: &'a Question, value: &str) -> Option<&'a AnswerOption> {
    question.options.iter().find(|option| option.value == value)
}

/// The full ordered question bank. Flows take a prefix of it.
#[must_use]
pub fn question_bank() -> Vec<Question> {
    vec![
        question(
            "occasion",
            "What's the occasion you're shopping for?",
            SelectionMode::Single,
            vec![
                option(
                    "casual",
                    "Casual Hangout",
                    CriteriaFragment {
                        styles: set([Style::Casual]),
                        categories: labels(["t-shirts", "jeans", "sneakers"]),
                        ..CriteriaFragment::default()
                    },
                ),
                option(
                    "work",
                    "Work / Business",
                    CriteriaFragment {
                        styles: set([Style::Formal, Style::Business]),
                        categories: labels(["shirts", "pants", "blazers"]),
                        ..CriteriaFragment::default()
                    },
                ),
                option(
                    "party",
                    "Party / Night Out",
                    CriteriaFragment {
                        styles: set([Style::Party]),
                        categories: labels(["dresses", "heels", "accessories"]),
                        ..CriteriaFragment::default()
                    },
                ),
                option(
                    "workout",
                    "Workout / Sports",
                    CriteriaFragment {
                        categories: labels(["activewear", "sneakers"]),
                        materials: labels(["polyester", "spandex"]),
                        ..CriteriaFragment::default()
                    },
                ),
                option(
                    "formal",
                    "Formal Event",
                    CriteriaFragment {
                        styles: set([Style::Formal]),
                        categories: labels(["suits", "dresses", "formal shoes"]),
                        ..CriteriaFragment::default()
                    },
                ),
            ],
        ),
        question(
            "budget",
            "What's your budget range?",
            SelectionMode::Single,
            vec![
                option(
                    "budget",
                    "Under $50",
                    CriteriaFragment {
                        price_range: Some(PriceBounds::between(0.0, 50.0)),
                        ..CriteriaFragment::default()
                    },
                ),
                option(
                    "mid",
                    "$50 - $150",
                    CriteriaFragment {
                        price_range: Some(PriceBounds::between(50.0, 150.0)),
                        ..CriteriaFragment::default()
                    },
                ),
                option(
                    "premium",
                    "$150 - $300",
                    CriteriaFragment {
                        price_range: Some(PriceBounds::between(150.0, 300.0)),
                        ..CriteriaFragment::default()
                    },
                ),
                option(
                    "luxury",
                    "$300+",
                    CriteriaFragment {
                        price_range: Some(PriceBounds::between(300.0, 2000.0)),
                        ..CriteriaFragment::default()
                    },
                ),
            ],
        ),
        question(
            "style",
            "Which style speaks to you?",
            SelectionMode::Multiple,
            vec![
                option(
                    "minimalist",
                    "Minimalist",
                    CriteriaFragment {
                        styles: set([Style::Minimalist]),
                        ..CriteriaFragment::default()
                    },
                ),
                option(
                    "streetwear",
                    "Streetwear",
                    CriteriaFragment {
                        styles: set([Style::Streetwear]),
                        ..CriteriaFragment::default()
                    },
                ),
                option(
                    "vintage",
                    "Vintage Vibes",
                    CriteriaFragment {
                        styles: set([Style::Vintage]),
                        conditions: set([Condition::Vintage]),
                        ..CriteriaFragment::default()
                    },
                ),
                option(
                    "bohemian",
                    "Bohemian",
                    CriteriaFragment {
                        styles: set([Style::Bohemian]),
                        ..CriteriaFragment::default()
                    },
                ),
                option(
                    "classic",
                    "Classic",
                    CriteriaFragment {
                        styles: set([Style::Formal, Style::Business]),
                        ..CriteriaFragment::default()
                    },
                ),
            ],
        ),
        question(
            "season",
            "What season are you shopping for?",
            SelectionMode::Single,
            vec![
                option(
                    "summer",
                    "Summer Vibes",
                    CriteriaFragment {
                        seasons: set([Season::Summer]),
                        materials: labels(["cotton", "linen"]),
                        ..CriteriaFragment::default()
                    },
                ),
                option(
                    "winter",
                    "Winter Warmth",
                    CriteriaFragment {
                        seasons: set([Season::Winter]),
                        materials: labels(["wool", "cashmere"]),
                        ..CriteriaFragment::default()
                    },
                ),
                option(
                    "spring",
                    "Spring Fresh",
                    CriteriaFragment {
                        seasons: set([Season::Spring]),
                        ..CriteriaFragment::default()
                    },
                ),
                option(
                    "fall",
                    "Fall Fashion",
                    CriteriaFragment {
                        seasons: set([Season::Fall]),
                        ..CriteriaFragment::default()
                    },
                ),
                option(
                    "all",
                    "All Season",
                    CriteriaFragment {
                        seasons: set([Season::AllSeason]),
                        ..CriteriaFragment::default()
                    },
                ),
            ],
        ),
        question(
            "audience",
            "Who are you shopping for?",
            SelectionMode::Single,
            vec![
                option(
                    "men",
                    "Men",
                    CriteriaFragment {
                        genders: set([TargetGender::Men]),
                        ..CriteriaFragment::default()
                    },
                ),
                option(
                    "women",
                    "Women",
                    CriteriaFragment {
                        genders: set([TargetGender::Women]),
                        ..CriteriaFragment::default()
                    },
                ),
                option(
                    "unisex",
                    "Unisex",
                    CriteriaFragment {
                        genders: set([TargetGender::Unisex]),
                        ..CriteriaFragment::default()
                    },
                ),
                option(
                    "kids",
                    "Kids",
                    CriteriaFragment {
                        genders: set([TargetGender::Kids]),
                        age_groups: set([AgeGroup::Child, AgeGroup::Teen]),
                        ..CriteriaFragment::default()
                    },
                ),
            ],
        ),
    ]
}

fn question(id: &str, prompt: &str, mode: SelectionMode, options: Vec<AnswerOption>) -> Question {
    Question {
        id: id.to_owned(),
        prompt: prompt.to_owned(),
        mode,
        options,
    }
}

fn option(value: &str, label: &str, fragment: CriteriaFragment) -> AnswerOption {
    AnswerOption {
        value: value.to_owned(),
        label: label.to_owned(),
        fragment,
    }
}

fn set<T: Ord, const N: usize>(values: [T; N]) -> std::collections::BTreeSet<T> {
    values.into_iter().collect()
}

fn labels<const N: usize>(values: [&str; N]) -> std::collections::BTreeSet<String> {
    values.into_iter().map(str::to_owned).collect()
}

#[cfg(test)]
mod tests {
    // Compiled bounds are copied verbatim from fragments, so float
    // equality is sound here.
    #![allow(clippy::float_cmp)]

    use super::*;

    /// Answers the current question with `value` and advances.
    fn answer_and_advance(finder: &mut StyleFinder, value: &str) -> Step {
        finder.select_option(value).expect("option exists");
        finder.advance().expect("answered question advances")
    }

    // ---- Flow transitions ----

    #[test]
    fn starts_at_first_question_with_no_answers() {
        let finder = StyleFinder::new();
        assert_eq!(finder.step(), Step::Question(0));
        assert_eq!(finder.question_count(), DEFAULT_QUESTION_COUNT);
        assert_eq!(
            finder.current_question().map(|q| q.id.as_str()),
            Some("occasion")
        );
        assert!(!finder.is_complete());
    }

    #[test]
    fn question_prefix_is_deterministic() {
        let first = StyleFinder::new();
        let second = StyleFinder::new();
        let first_ids: Vec<_> = (0..first.question_count())
            .map(|i| question_bank()[i].id.clone())
            .collect();
        assert_eq!(
            first_ids,
            vec!["occasion", "budget", "style", "season", "audience"]
        );
        assert_eq!(first.question_count(), second.question_count());
    }

    #[test]
    fn advance_without_answer_is_refused() {
        let mut finder = StyleFinder::new();
        assert_eq!(finder.advance(), Err(DiscoveryError::AnswerRequired));
        assert_eq!(finder.step(), Step::Question(0));
    }

    #[test]
    fn advance_moves_through_questions_to_completion() {
        let mut finder = StyleFinder::new();
        assert_eq!(answer_and_advance(&mut finder, "casual"), Step::Question(1));
        assert_eq!(answer_and_advance(&mut finder, "mid"), Step::Question(2));
        assert_eq!(
            answer_and_advance(&mut finder, "minimalist"),
            Step::Question(3)
        );
        assert_eq!(answer_and_advance(&mut finder, "summer"), Step::Question(4));
        assert_eq!(answer_and_advance(&mut finder, "women"), Step::Completed);
        assert!(finder.is_complete());
        assert!(finder.compiled_criteria().is_some());
        assert_eq!(finder.current_question(), None);
    }

    #[test]
    fn retreat_is_a_no_op_at_the_first_question() {
        let mut finder = StyleFinder::new();
        assert_eq!(finder.retreat(), Step::Question(0));

        answer_and_advance(&mut finder, "casual");
        assert_eq!(finder.retreat(), Step::Question(0));
    }

    #[test]
    fn selecting_unknown_option_is_refused() {
        let mut finder = StyleFinder::new();
        let result = finder.select_option("skydiving");
        assert_eq!(
            result,
            Err(DiscoveryError::UnknownOption {
                value: "skydiving".to_owned()
            })
        );
    }

    #[test]
    fn operations_after_completion_are_refused() {
        let mut finder = StyleFinder::with_question_count(1);
        answer_and_advance(&mut finder, "casual");
        assert!(finder.is_complete());
        assert_eq!(
            finder.select_option("work"),
            Err(DiscoveryError::AlreadyComplete)
        );
        assert_eq!(finder.advance(), Err(DiscoveryError::AlreadyComplete));
        assert_eq!(finder.retreat(), Step::Completed);
    }

    #[test]
    fn start_resets_a_completed_flow() {
        let mut finder = StyleFinder::with_question_count(1);
        answer_and_advance(&mut finder, "casual");
        assert!(finder.is_complete());

        finder.start();
        assert_eq!(finder.step(), Step::Question(0));
        assert!(finder.compiled_criteria().is_none());
        assert_eq!(finder.answer("occasion"), None);
    }

    // ---- Answer recording ----

    #[test]
    fn single_select_replaces_previous_answer() {
        let mut finder = StyleFinder::new();
        finder.select_option("casual").expect("option exists");
        finder.select_option("party").expect("option exists");
        assert_eq!(
            finder.answer("occasion"),
            Some(&Answer::Single("party".to_owned()))
        );
    }

    #[test]
    fn multi_select_toggles_membership() {
        let mut finder = StyleFinder::new();
        answer_and_advance(&mut finder, "casual");
        answer_and_advance(&mut finder, "mid");

        // Now on the multiple-choice style question.
        finder.select_option("vintage").expect("option exists");
        finder.select_option("bohemian").expect("option exists");
        assert_eq!(
            finder.answer("style"),
            Some(&Answer::Multiple(vec![
                "vintage".to_owned(),
                "bohemian".to_owned()
            ]))
        );

        // Selecting again removes.
        finder.select_option("vintage").expect("option exists");
        assert_eq!(
            finder.answer("style"),
            Some(&Answer::Multiple(vec!["bohemian".to_owned()]))
        );
    }

    #[test]
    fn emptied_multi_select_blocks_advance() {
        let mut finder = StyleFinder::new();
        answer_and_advance(&mut finder, "casual");
        answer_and_advance(&mut finder, "mid");

        finder.select_option("vintage").expect("option exists");
        finder.select_option("vintage").expect("option exists"); // toggled off
        assert_eq!(finder.advance(), Err(DiscoveryError::AnswerRequired));
    }

    // ---- Compilation ----

    fn complete_flow(selections: [&str; DEFAULT_QUESTION_COUNT]) -> FilterCriteria {
        let mut finder = StyleFinder::new();
        for value in selections {
            answer_and_advance(&mut finder, value);
        }
        finder
            .compiled_criteria()
            .expect("flow completed")
            .clone()
    }

    #[test]
    fn compile_merges_fragments_across_questions() {
        let criteria = complete_flow(["party", "mid", "vintage", "winter", "women"]);

        assert!(criteria.styles.contains(&Style::Party));
        assert!(criteria.styles.contains(&Style::Vintage));
        assert!(criteria.conditions.contains(&Condition::Vintage));
        assert!(criteria.categories.contains("dresses"));
        assert!(criteria.materials.contains("wool"));
        assert!(criteria.seasons.contains(&Season::Winter));
        assert!(criteria.genders.contains(&TargetGender::Women));
        assert_eq!(criteria.price_range.min, 50.0);
        assert_eq!(criteria.price_range.max, 150.0);
    }

    #[test]
    fn compile_unions_overlapping_style_fragments() {
        // "work" (occasion) and "classic" (style) both contribute the
        // formal and business styles; the union holds each once.
        let mut finder = StyleFinder::new();
        answer_and_advance(&mut finder, "work");
        answer_and_advance(&mut finder, "budget");
        finder.select_option("classic").expect("option exists");
        finder.advance().expect("answered");
        answer_and_advance(&mut finder, "fall");
        answer_and_advance(&mut finder, "men");

        let criteria = finder.compiled_criteria().expect("flow completed");
        assert!(criteria.styles.contains(&Style::Formal));
        assert!(criteria.styles.contains(&Style::Business));
        assert_eq!(criteria.styles.len(), 2);
    }

    #[test]
    fn re_answering_a_single_select_replaces_its_fragment() {
        let mut finder = StyleFinder::with_question_count(2);
        answer_and_advance(&mut finder, "casual");
        finder.retreat();
        finder.select_option("work").expect("option exists");
        finder.advance().expect("answered");
        answer_and_advance(&mut finder, "luxury");

        let criteria = finder.compiled_criteria().expect("flow completed");
        // Re-answering the single-select replaced "casual" with "work".
        assert!(criteria.styles.contains(&Style::Business));
        assert!(!criteria.styles.contains(&Style::Casual));
        assert_eq!(criteria.price_range.min, 300.0);
    }

    #[test]
    fn compile_runs_in_question_order_not_answer_order() {
        // One flow answers straight through; the other backtracks and
        // re-answers along the way. Both must compile identically because
        // merge order is fixed by question order, not answering order.
        let mut forward = StyleFinder::with_question_count(2);
        answer_and_advance(&mut forward, "casual");
        answer_and_advance(&mut forward, "mid");

        let mut reordered = StyleFinder::with_question_count(2);
        reordered.select_option("casual").expect("option exists");
        reordered.advance().expect("answered");
        reordered.select_option("mid").expect("option exists");
        reordered.retreat();
        reordered.select_option("casual").expect("option exists");
        reordered.advance().expect("answered");
        reordered.advance().expect("answered");

        assert_eq!(
            forward.compiled_criteria(),
            reordered.compiled_criteria()
        );
    }

    #[test]
    fn every_selected_multi_option_contributes_its_fragment() {
        let mut finder = StyleFinder::new();
        answer_and_advance(&mut finder, "casual");
        answer_and_advance(&mut finder, "mid");
        finder.select_option("classic").expect("option exists");
        finder.select_option("minimalist").expect("option exists");
        finder.advance().expect("answered");
        answer_and_advance(&mut finder, "fall");
        answer_and_advance(&mut finder, "unisex");

        let criteria = finder.compiled_criteria().expect("flow completed");
        for style in [Style::Formal, Style::Business, Style::Minimalist] {
            assert!(criteria.styles.contains(&style));
        }
    }

    #[test]
    fn budget_fragment_replaces_the_default_price_window() {
        let criteria = complete_flow(["casual", "luxury", "streetwear", "all", "men"]);
        assert_eq!(criteria.price_range.min, 300.0);
        assert_eq!(criteria.price_range.max, 2000.0);
    }
}
