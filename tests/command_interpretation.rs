//! Command interpretation as seen through the public API.

use voicetask::interpreter::{Intent, NoOpReason, interpret, parse_reminder_time};
use voicetask::registry::TaskRegistry;

#[test]
fn remind_phrase_always_wins() {
    let mut registry = TaskRegistry::new();
    registry.add("milk");

    let inputs = [
        ("remind me to add milk", "add milk"),
        ("Remind me to remove milk", "remove milk"),
        ("add this: remind me to show up", "show up"),
        ("show remove add remind me to  x  ", "x"),
        ("remind me to", ""),
    ];
    for (text, task) in inputs {
        assert_eq!(
            interpret(text, &registry),
            Intent::SetReminder {
                task: task.to_owned()
            },
            "input: {text}"
        );
    }
}

#[test]
fn keyword_priority_is_add_remove_show() {
    let mut registry = TaskRegistry::new();
    registry.add("show tickets");

    assert_eq!(
        interpret("add show tickets", &registry),
        Intent::AddTask {
            task: "show tickets".to_owned()
        }
    );
    assert_eq!(
        interpret("remove show tickets", &registry),
        Intent::RemoveTask {
            task: "show tickets".to_owned()
        }
    );
    assert_eq!(interpret("show", &registry), Intent::ShowTasks);
}

#[test]
fn remove_matches_exact_text_only() {
    let mut registry = TaskRegistry::new();
    registry.add("buy milk");

    assert_eq!(
        interpret("remove milk", &registry),
        Intent::NoOp(NoOpReason::TaskNotFound)
    );
    assert_eq!(
        interpret("remove buy milk", &registry),
        Intent::RemoveTask {
            task: "buy milk".to_owned()
        }
    );
}

#[test]
fn reminder_time_needs_exact_format() {
    assert!(parse_reminder_time("2030-05-06 07:08").is_some());
    assert!(parse_reminder_time("07:08 2030-05-06").is_none());
    assert!(parse_reminder_time("in ten minutes").is_none());
}
