mod test_utils;

use mcq_session::generators::McqPayload;
use mcq_session::{score, AnswerMap};
use test_utils::{arithmetic_question, capital_question, planet_question, question_set};

fn answers(pairs: &[(usize, &str)]) -> AnswerMap {
    pairs.iter().map(|(i, k)| (*i, (*k).to_string())).collect()
}

#[test]
fn single_correct_answer_scores_full_marks() {
    let questions = question_set(vec![arithmetic_question()]);
    let summary = score(&questions, &answers(&[(0, "B")]));

    assert_eq!(summary.total, 1);
    assert_eq!(summary.correct, 1);
    assert_eq!(summary.percentage, 100.0);
    assert_eq!(summary.is_correct(0), Some(true));
    assert_eq!(summary.marks(), "100.0%");
}

#[test]
fn single_wrong_answer_scores_zero() {
    let questions = question_set(vec![arithmetic_question()]);
    let summary = score(&questions, &answers(&[(0, "A")]));

    assert_eq!(summary.total, 1);
    assert_eq!(summary.correct, 0);
    assert_eq!(summary.percentage, 0.0);
    assert_eq!(summary.is_correct(0), Some(false));
}

#[test]
fn one_of_two_correct_is_fifty_percent() {
    let questions = question_set(vec![arithmetic_question(), capital_question()]);
    let summary = score(&questions, &answers(&[(0, "B"), (1, "C")]));

    assert_eq!(summary.correct, 1);
    assert_eq!(summary.percentage, 50.0);
    assert_eq!(summary.is_correct(0), Some(true));
    assert_eq!(summary.is_correct(1), Some(false));
}

#[test]
fn thirds_round_to_one_decimal() {
    let questions = question_set(vec![arithmetic_question(), capital_question(), planet_question()]);
    let summary = score(&questions, &answers(&[(0, "B"), (1, "A"), (2, "A")]));

    assert_eq!(summary.correct, 2);
    assert_eq!(summary.percentage, 66.7);
    assert_eq!(summary.marks(), "66.7%");
}

#[test]
fn only_first_correct_key_counts() {
    let multi = McqPayload::new("Pick a prime", [("A", "2"), ("B", "3"), ("C", "4")], &["A", "B"]);
    let questions = question_set(vec![multi]);

    assert_eq!(score(&questions, &answers(&[(0, "A")])).correct, 1);
    assert_eq!(score(&questions, &answers(&[(0, "B")])).correct, 0);
}

#[test]
fn question_without_correct_key_is_wrong() {
    let unkeyed = McqPayload::new("Unanswerable?", [("A", "yes"), ("B", "no")], &[]);
    let questions = question_set(vec![unkeyed]);

    let summary = score(&questions, &answers(&[(0, "A")]));
    assert_eq!(summary.correct, 0);
    assert_eq!(summary.is_correct(0), Some(false));
}

#[test]
fn scoring_is_deterministic() {
    let questions = question_set(vec![arithmetic_question(), capital_question(), planet_question()]);
    let map = answers(&[(0, "B"), (1, "B"), (2, "B")]);

    assert_eq!(score(&questions, &map), score(&questions, &map));
}
