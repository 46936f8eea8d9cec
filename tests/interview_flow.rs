//! End-to-end interview scenarios driven through the library API

use chrono::{Local, TimeZone};
use morning_interview::interview::{
    command_script, export_plan, ConfidenceBand, Interview, Stage, Step, Synthesis,
};

const NEUTRAL: &str = "Nothing much";

fn finish_questions(interview: &mut Interview, answers: &[&str]) -> Step {
    let mut last = Step::Ignored;
    for text in answers {
        last = interview.advance(text);
    }
    last
}

#[test]
fn test_weekly_status_morning() {
    let mut interview = Interview::start();

    let step = interview.advance("Need to send the weekly status update before Friday");
    assert_eq!(step.detected().len(), 1);
    let task = &step.detected()[0];
    assert_eq!(task.category, "weekly_status");
    assert_eq!(task.confidence_percent(), 95);
    assert_eq!(task.band(), ConfidenceBand::High);
    assert_eq!(interview.stage(), Stage::Focus);

    let last = finish_questions(&mut interview, &[NEUTRAL; 7]);
    match last {
        Step::Synthesis {
            outcome: Synthesis::Summary {
                task_count,
                total_minutes,
            },
            ..
        } => {
            assert_eq!(task_count, 1);
            assert_eq!(total_minutes, 30);
        }
        other => panic!("expected summary, got {:?}", other),
    }

    let summary = interview.state().last_assistant_text().unwrap();
    assert!(summary.starts_with("Excellent! I've identified 1 tasks"));
    assert!(summary.contains("saving you 30 minutes today"));
}

#[test]
fn test_repeat_category_is_not_detected_twice() {
    let mut interview = Interview::start();
    interview.advance("status report");
    let step = interview.advance("another status report, weekly this time");

    assert!(step.detected().is_empty());
    assert_eq!(interview.state().tasks.len(), 1);
    assert_eq!(interview.state().tasks[0].confidence_percent(), 70);
}

#[test]
fn test_several_categories_from_one_answer() {
    let mut interview = Interview::start();
    let step = interview.advance("Client proposal draft and the meeting notes");

    let categories: Vec<&str> = step.detected().iter().map(|t| t.category.as_str()).collect();
    assert_eq!(
        categories,
        vec!["proposal_pipeline", "meeting_processor", "client_updates"]
    );
}

#[test]
fn test_no_tasks_asks_for_clarification_then_recovers() {
    let mut interview = Interview::start();
    let last = finish_questions(&mut interview, &[NEUTRAL; 8]);

    assert!(matches!(
        last,
        Step::Synthesis {
            outcome: Synthesis::NeedsMoreDetail,
            ..
        }
    ));
    assert_eq!(interview.stage(), Stage::Synthesis);
    assert_eq!(interview.quick_replies()[0], "Writing proposals");

    let step = interview.pick(1).unwrap();
    assert_eq!(step.detected().len(), 1);
    assert_eq!(step.detected()[0].category, "proposal_pipeline");
    assert!(matches!(
        step,
        Step::Synthesis {
            outcome: Synthesis::Summary { task_count: 1, total_minutes: 90 },
            ..
        }
    ));
}

#[test]
fn test_more_context_adds_tasks_after_synthesis() {
    let mut interview = Interview::start();
    let mut answers = vec!["Weekly status"];
    answers.extend([NEUTRAL; 7]);
    finish_questions(&mut interview, &answers);
    assert_eq!(interview.state().tasks.len(), 1);

    interview.add_more_context();
    assert_eq!(interview.stage(), Stage::Synthesis);
    assert_eq!(interview.quick_replies().len(), 5);

    let step = interview.advance("Updating the technical documentation guide");
    assert_eq!(step.detected().len(), 1);
    assert_eq!(interview.state().tasks.len(), 2);
    assert_eq!(interview.state().total_minutes(), 70);
}

#[test]
fn test_selection_drives_script_and_plan() {
    let mut interview = Interview::start();
    interview.advance("Meeting notes from the client call");
    interview.advance("And the weekly status");
    finish_questions(&mut interview, &[NEUTRAL; 6]);

    assert_eq!(command_script(interview.state()), "");

    let meeting = interview
        .resolve_task("meeting_processor")
        .unwrap()
        .id
        .clone();
    assert!(interview.toggle_selection(&meeting).unwrap());

    let script = command_script(interview.state());
    assert!(script.starts_with("# Task 1: Meeting Notes Processor\n"));
    assert!(script.contains("## Command: action_extractor.md\n.Open .claude/commands/action_extractor.md\n"));
    assert!(!script.contains("Weekly Status Generator"));

    interview.select_all();
    let now = Local.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap();
    let plan = export_plan(interview.state(), now);

    assert_eq!(plan.file_name, "morning-plan-2026-10-19.md");
    assert!(plan.markdown.starts_with("# Morning Agentic Plan\n## Monday 19 October 2026\n"));
    assert!(plan.markdown.contains("## Discovered Tasks (3)"));
    assert!(plan.markdown.contains("## Total Time Saved: 100 minutes"));
    assert!(plan.markdown.contains("- Nothing much\n"));
    assert!(!plan.markdown.contains("- Meeting notes from the client call\n"));
}

#[test]
fn test_state_survives_json_roundtrip() {
    let mut interview = Interview::start();
    interview.advance("RFP response due");
    interview.select_all();

    let json = serde_json::to_string(interview.state()).unwrap();
    let resumed = Interview::resume(serde_json::from_str(&json).unwrap());

    assert_eq!(resumed.stage(), Stage::Focus);
    assert_eq!(resumed.state().selected.len(), 1);
    assert_eq!(resumed.quick_replies(), interview.quick_replies());
}
