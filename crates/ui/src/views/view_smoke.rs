use chrono::Duration;
use quiz_core::model::TopicId;
use quiz_core::time::fixed_now;
use quiz_core::{QuizSummary, RenderCommand, TopicCatalog, TopicTile};

use super::test_harness::{render_commands, render_screen};
use crate::vm::ScreenVm;

fn builtin_topics() -> RenderCommand {
    let catalog = TopicCatalog::builtin().unwrap();
    RenderCommand::Topics {
        topics: catalog
            .topics()
            .map(|topic| TopicTile::from(topic.as_ref()))
            .collect(),
    }
}

fn topic(id: &str) -> TopicId {
    TopicId::new(id).unwrap()
}

#[test]
fn welcome_screen_lists_topics_and_stats() {
    let html = render_commands([
        builtin_topics(),
        RenderCommand::Progress { xp: 30, level: 2 },
        RenderCommand::Engagement { value: 7 },
    ]);
    for title in ["Photosynthesis", "Electricity Basics", "Titration (Demo)"] {
        assert!(html.contains(title), "missing {title} in {html}");
    }
    assert!(html.contains("Pick a topic"), "missing welcome text in {html}");
    assert!(html.contains(">30<"), "missing xp in {html}");
    assert!(html.contains(">2<"), "missing level in {html}");
    assert!(html.contains(">7<"), "missing engagement in {html}");
}

#[test]
fn lesson_view_renders_markdown_and_start_button() {
    let catalog = TopicCatalog::builtin().unwrap();
    let electricity = catalog.get_str("electricity").unwrap();
    let html = render_commands([RenderCommand::lesson(&electricity)]);
    assert!(html.contains("Electricity Basics - Lesson"), "missing title in {html}");
    assert!(html.contains("<strong>Voltage (V)</strong>"), "missing lesson html in {html}");
    assert!(html.contains("Start Quiz on"), "missing start button in {html}");
}

#[test]
fn quiz_view_shows_question_and_progress() {
    let html = render_commands([RenderCommand::Question {
        topic_id: topic("electricity"),
        prompt: "Unit of current?".into(),
        options: vec!["Volts".into(), "Amps".into(), "Ohms".into()],
        number: 1,
        total: 6,
    }]);
    assert!(html.contains("Q1. Unit of current?"), "missing prompt in {html}");
    for option in ["Volts", "Amps", "Ohms"] {
        assert!(html.contains(option), "missing {option} in {html}");
    }
    assert!(html.contains("Question 1 of 6"), "missing progress in {html}");
}

#[test]
fn quiz_view_locks_options_after_feedback() {
    let html = render_commands([
        RenderCommand::Question {
            topic_id: topic("electricity"),
            prompt: "Unit of current?".into(),
            options: vec!["Volts".into(), "Amps".into(), "Ohms".into()],
            number: 1,
            total: 6,
        },
        RenderCommand::Feedback {
            correct: false,
            correct_option_text: "Amps".into(),
            points: 0,
        },
    ]);
    assert!(html.contains("Wrong. Correct answer: Amps"), "missing feedback in {html}");
    assert!(html.contains("feedback wrong"), "missing feedback class in {html}");
    assert!(html.contains("disabled"), "options not disabled in {html}");
}

#[test]
fn summary_view_shows_counts_and_actions() {
    let html = render_commands([RenderCommand::Summary(QuizSummary {
        topic_id: topic("photosynthesis"),
        topic_title: "Photosynthesis".into(),
        correct_count: 7,
        total_questions: 8,
        earned_xp: 210,
        bonus: 50,
        started_at: fixed_now(),
        completed_at: fixed_now() + Duration::seconds(12),
    })]);
    assert!(html.contains("Quiz Complete"), "missing title in {html}");
    assert!(html.contains("7 / 8"), "missing score in {html}");
    assert!(html.contains("210"), "missing earned xp in {html}");
    assert!(html.contains("12s"), "missing elapsed time in {html}");
    assert!(html.contains("Back to Lesson"), "missing back button in {html}");
    assert!(html.contains("Retake Quiz"), "missing retake button in {html}");
}

#[test]
fn error_view_shows_message() {
    let html = render_commands([RenderCommand::error("Topic not found.")]);
    assert!(html.contains("Topic not found."), "missing error in {html}");
}

#[test]
fn default_screen_renders_starting_stats() {
    let html = render_screen(ScreenVm::default());
    assert!(html.contains("Level: "), "missing level label in {html}");
    assert!(html.contains(r#"<strong id="level">1</strong>"#), "missing level 1 in {html}");
}
