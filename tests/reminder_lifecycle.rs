//! Reminder lifecycle: scheduling, firing on the poll loop, and races
//! between the interactive side and a tick.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashSet;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::oneshot;
use voicetask::presentation::{DateTimePrompt, FixedPrompt};
use voicetask::scheduler::{Notification, Reminder};
use voicetask::{AppContext, CommandOutcome, StateStore};

fn at(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2030, 1, 1)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

fn open(dir: &tempfile::TempDir) -> (AppContext, UnboundedReceiver<Notification>) {
    AppContext::open(StateStore::new(dir.path().join("tasks.json")))
}

#[tokio::test]
async fn past_due_reminder_fires_once_on_next_poll() {
    let dir = tempfile::tempdir().unwrap();
    let (ctx, mut notifications) = open(&dir);
    let ctx = ctx.with_poll_interval(Duration::from_millis(20));

    let mut prompt = FixedPrompt::new(Some("2001-01-01 00:00".to_owned()));
    let outcome = ctx.handle("remind me to water the plants", &mut prompt).await;
    assert!(matches!(outcome, CommandOutcome::ReminderSet(_)));

    let handle = ctx.spawn_scheduler();

    let note = tokio::time::timeout(Duration::from_secs(5), notifications.recv())
        .await
        .expect("reminder fired")
        .expect("channel open");
    assert_eq!(note.task, "water the plants");
    assert_eq!(note.message(), "Reminder: water the plants");

    // Several more ticks pass without a second notification.
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert!(notifications.try_recv().is_err());
    assert!(ctx.reminders().is_empty());
    assert!(ctx.store().load().reminders.is_empty());

    handle.abort();
}

#[tokio::test]
async fn future_reminder_stays_pending() {
    let dir = tempfile::tempdir().unwrap();
    let (ctx, mut notifications) = open(&dir);
    let ctx = ctx.with_poll_interval(Duration::from_millis(20));

    let mut prompt = FixedPrompt::new(Some("2999-12-31 23:59".to_owned()));
    ctx.handle("remind me to renew passport", &mut prompt).await;

    let handle = ctx.spawn_scheduler();
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert!(notifications.try_recv().is_err());
    assert_eq!(ctx.reminders().len(), 1);

    handle.abort();
}

#[test]
fn reminder_left_over_from_last_run_fires_late() {
    let dir = tempfile::tempdir().unwrap();
    {
        let (ctx, _rx) = open(&dir);
        ctx.schedule_reminder("while asleep", at(3, 0));
    }

    let (ctx, mut notifications) = open(&dir);
    assert_eq!(ctx.scheduler().tick_at(at(9, 0)), 1);
    assert_eq!(notifications.try_recv().unwrap().due, at(3, 0));
    assert_eq!(ctx.scheduler().tick_at(at(9, 1)), 0);
}

#[test]
fn concurrent_adds_during_ticks_lose_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let (ctx, mut notifications) = open(&dir);
    let now = at(12, 0);

    for i in 0..20 {
        ctx.schedule_reminder(format!("overdue {i}"), at(11, 0));
    }

    let scheduler = ctx.scheduler().clone();
    let ticker = std::thread::spawn(move || {
        let mut fired = 0;
        for _ in 0..100 {
            fired += scheduler.tick_at(now);
        }
        fired
    });

    for i in 0..40 {
        ctx.schedule_reminder(format!("later {i}"), at(13, 0));
        ctx.schedule_reminder(format!("overdue late {i}"), at(11, 30));
    }

    let mut fired = ticker.join().expect("ticker thread");
    fired += ctx.scheduler().tick_at(now);
    assert_eq!(fired, 60);

    let mut seen = HashSet::new();
    while let Ok(note) = notifications.try_recv() {
        assert!(seen.insert(note.task.clone()), "fired twice: {}", note.task);
    }
    assert_eq!(seen.len(), 60);

    let pending = ctx.reminders();
    assert_eq!(pending.len(), 40);
    assert!(pending.iter().all(|r| r.time == at(13, 0)));
    assert_eq!(ctx.store().load().reminders, pending);
}

#[test]
fn identical_reminders_fire_separately() {
    let dir = tempfile::tempdir().unwrap();
    let (ctx, mut notifications) = open(&dir);
    ctx.schedule_reminder("stand up", at(10, 0));
    ctx.schedule_reminder("stand up", at(10, 0));

    assert_eq!(ctx.scheduler().tick_at(at(10, 0)), 2);
    assert!(notifications.try_recv().is_ok());
    assert!(notifications.try_recv().is_ok());
    assert_eq!(ctx.reminders(), Vec::<Reminder>::new());
}

/// Answers the time prompt only once the test releases it.
struct GatedPrompt {
    asked: Option<oneshot::Sender<()>>,
    answer: Option<oneshot::Receiver<String>>,
}

#[async_trait]
impl DateTimePrompt for GatedPrompt {
    async fn ask_datetime(&mut self) -> Option<String> {
        if let Some(asked) = self.asked.take() {
            let _ = asked.send(());
        }
        self.answer.take()?.await.ok()
    }
}

#[tokio::test]
async fn scheduler_fires_while_time_prompt_is_open() {
    let dir = tempfile::tempdir().unwrap();
    let (ctx, mut notifications) = open(&dir);
    ctx.schedule_reminder("overdue", at(0, 0) - chrono::Duration::days(3650));

    let (asked_tx, asked_rx) = oneshot::channel();
    let (answer_tx, answer_rx) = oneshot::channel();
    let mut prompt = GatedPrompt {
        asked: Some(asked_tx),
        answer: Some(answer_rx),
    };

    let waiting_side = async {
        asked_rx.await.unwrap();
        // The prompt is open: the scheduler and the task list stay usable.
        let scheduler = ctx.scheduler().clone();
        let fired = tokio::time::timeout(
            Duration::from_secs(5),
            tokio::task::spawn_blocking(move || scheduler.tick()),
        )
        .await
        .expect("tick finished while prompt was open")
        .unwrap();
        assert!(ctx.tasks().is_empty());
        answer_tx.send("2030-01-01 12:00".to_owned()).unwrap();
        fired
    };

    let (outcome, fired) = tokio::join!(ctx.handle("remind me to x", &mut prompt), waiting_side);

    assert_eq!(fired, 1);
    assert_eq!(notifications.try_recv().unwrap().task, "overdue");
    assert_eq!(
        outcome,
        CommandOutcome::ReminderSet(Reminder::new("x", at(12, 0)))
    );
    assert_eq!(ctx.reminders(), vec![Reminder::new("x", at(12, 0))]);
    assert_eq!(ctx.store().load().reminders, ctx.reminders());
}
