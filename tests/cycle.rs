// tests/cycle.rs
//
// Runner behaviour with fake specs and a recording mailer; no network.
//
use std::cell::{Cell, RefCell};
use std::fs;
use std::path::Path;

use lettre::Address;
use watcher::error::{CheckError, DeliveryError, StateError, WatchError};
use watcher::notify::{EmailMessage, Mailer};
use watcher::runner::{self, Envelope, Outcome};
use watcher::specs::{Spec, TwoStateSpec};
use watcher::store::SpecState;

enum Answer {
    Reached,
    NotReached,
    Fails,
}

struct FakeSpec {
    answer: Answer,
    checks: Cell<usize>,
}

impl FakeSpec {
    fn new(answer: Answer) -> Self {
        Self { answer, checks: Cell::new(0) }
    }
}

impl Spec for FakeSpec {
    fn name(&self) -> &str {
        "fake_spec"
    }

    fn reached_active_state(&self) -> Result<bool, CheckError> {
        self.checks.set(self.checks.get() + 1);
        match self.answer {
            Answer::Reached => Ok(true),
            Answer::NotReached => Ok(false),
            Answer::Fails => Err(CheckError::Status { url: "http://fake/".into(), status: 503 }),
        }
    }

    fn render_email_message(&self, message: &mut EmailMessage) {
        message.subject = "Fake subject".into();
        message.body = "Fake content".into();
    }
}

#[derive(Default)]
struct RecordingMailer {
    sent: RefCell<Vec<EmailMessage>>,
    broken: bool,
}

impl RecordingMailer {
    fn broken() -> Self {
        Self { broken: true, ..Default::default() }
    }

    fn count(&self) -> usize {
        self.sent.borrow().len()
    }
}

impl Mailer for RecordingMailer {
    fn send(&self, message: &EmailMessage) -> Result<(), DeliveryError> {
        if self.broken {
            // a message with no recipients never builds
            return EmailMessage::new(message.from.clone(), &[]).to_lettre().map(|_| ());
        }
        self.sent.borrow_mut().push(message.clone());
        Ok(())
    }
}

fn addr(s: &str) -> Address {
    s.parse().unwrap()
}

fn envelope() -> Envelope {
    Envelope { sender: addr("a@x.org"), recipients: vec![addr("a@x.org"), addr("b@x.org")] }
}

fn read(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok()
}

#[test]
fn notifies_exactly_once_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state_fake.txt");
    let spec = FakeSpec::new(Answer::Reached);
    let mailer = RecordingMailer::default();

    let first = runner::run(&spec, &state, &envelope(), &mailer).unwrap();
    assert_eq!(first, Outcome::Notified);
    assert_eq!(mailer.count(), 1);
    assert_eq!(read(&state).as_deref(), Some("1"));

    let second = runner::run(&spec, &state, &envelope(), &mailer).unwrap();
    assert_eq!(second, Outcome::AlreadyActive);
    assert_eq!(mailer.count(), 1);
    assert_eq!(spec.checks.get(), 1, "active state must skip the check");
    assert_eq!(read(&state).as_deref(), Some("1"));
}

#[test]
fn sent_message_has_envelope_and_rendered_content() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state.txt");
    let mailer = RecordingMailer::default();

    runner::run(&FakeSpec::new(Answer::Reached), &state, &envelope(), &mailer).unwrap();

    let sent = mailer.sent.borrow();
    let msg = &sent[0];
    assert_eq!(msg.from, addr("a@x.org"));
    assert_eq!(msg.to_header(), "a@x.org, b@x.org");
    assert_eq!(msg.subject, "Fake subject");
    assert_eq!(msg.body, "Fake content");
}

#[test]
fn passive_condition_never_notifies() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state.txt");
    let spec = FakeSpec::new(Answer::NotReached);
    let mailer = RecordingMailer::default();

    for _ in 0..3 {
        let outcome = runner::run(&spec, &state, &envelope(), &mailer).unwrap();
        assert_eq!(outcome, Outcome::StillPassive);
    }
    assert_eq!(mailer.count(), 0);
    assert_eq!(spec.checks.get(), 3);
    assert_eq!(read(&state).as_deref(), Some("0"));
}

#[test]
fn failed_delivery_leaves_state_for_retry() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state.txt");
    let spec = FakeSpec::new(Answer::Reached);

    let err = runner::run(&spec, &state, &envelope(), &RecordingMailer::broken()).unwrap_err();
    assert!(matches!(err, WatchError::Delivery(_)));
    assert_eq!(read(&state), None, "state must not be committed");

    let mailer = RecordingMailer::default();
    let outcome = runner::run(&spec, &state, &envelope(), &mailer).unwrap();
    assert_eq!(outcome, Outcome::Notified);
    assert_eq!(spec.checks.get(), 2, "retry re-evaluates the condition");
    assert_eq!(mailer.count(), 1);
    assert_eq!(read(&state).as_deref(), Some("1"));
}

#[test]
fn failed_delivery_keeps_previous_passive_file() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state.txt");
    fs::write(&state, "0").unwrap();

    let res = runner::run(&FakeSpec::new(Answer::Reached), &state, &envelope(), &RecordingMailer::broken());
    assert!(res.is_err());
    assert_eq!(read(&state).as_deref(), Some("0"));
}

#[test]
fn failed_check_sends_nothing_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state.txt");
    let mailer = RecordingMailer::default();

    let err = runner::run(&FakeSpec::new(Answer::Fails), &state, &envelope(), &mailer).unwrap_err();
    assert!(matches!(err, WatchError::Check(CheckError::Status { status: 503, .. })));
    assert_eq!(mailer.count(), 0);
    assert_eq!(read(&state), None);
}

#[test]
fn malformed_state_is_reported_not_defaulted() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state.txt");
    fs::write(&state, "X").unwrap();
    let spec = FakeSpec::new(Answer::Reached);
    let mailer = RecordingMailer::default();

    let err = runner::run(&spec, &state, &envelope(), &mailer).unwrap_err();
    assert!(matches!(err, WatchError::State(StateError::Format { .. })));
    assert_eq!(spec.checks.get(), 0);
    assert_eq!(mailer.count(), 0);
    assert_eq!(read(&state).as_deref(), Some("X"));
}

#[test]
fn need_to_notify_checks_at_most_once() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state.txt");
    let spec = FakeSpec::new(Answer::Reached);

    let mut tracked = TwoStateSpec::open(&spec, &state).unwrap();
    assert_eq!(tracked.state(), SpecState::Passive);
    assert!(tracked.need_to_notify().unwrap());
    assert!(!tracked.need_to_notify().unwrap());
    assert_eq!(spec.checks.get(), 1);
    assert_eq!(tracked.state(), SpecState::Active);

    // nothing on disk until close
    assert_eq!(read(&state), None);
    assert_eq!(tracked.close().unwrap(), SpecState::Active);
    assert_eq!(read(&state).as_deref(), Some("1"));
}

#[test]
fn scoped_error_skips_close() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state.txt");
    let spec = FakeSpec::new(Answer::Reached);

    let res: Result<(), WatchError> = TwoStateSpec::scoped(&spec, &state, |tracked| {
        tracked.need_to_notify()?;
        Err(CheckError::Status { url: "late".into(), status: 500 }.into())
    });
    assert!(res.is_err());
    assert_eq!(read(&state), None);
}

// Runs that overlap on one state file are not coordinated: both see passive
// and both decide to notify before either commits.
#[test]
fn overlapping_runs_both_notify() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state.txt");
    let spec = FakeSpec::new(Answer::Reached);

    let mut a = TwoStateSpec::open(&spec, &state).unwrap();
    let mut b = TwoStateSpec::open(&spec, &state).unwrap();
    assert!(a.need_to_notify().unwrap());
    assert!(b.need_to_notify().unwrap());
    a.close().unwrap();
    b.close().unwrap();
    assert_eq!(read(&state).as_deref(), Some("1"));
}
