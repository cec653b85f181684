// src/runner.rs
use std::path::Path;

use lettre::Address;

use crate::{
    error::WatchError,
    notify::{EmailMessage, Mailer},
    specs::{Spec, TwoStateSpec},
};

/// Who the notification goes from and to.
#[derive(Clone, Debug)]
pub struct Envelope {
    pub sender: Address,
    pub recipients: Vec<Address>,
}

/// What one cycle did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// State was already active; nothing checked, nothing sent.
    AlreadyActive,
    /// Checked, not reached. State stays passive.
    StillPassive,
    /// Reached on this run; email sent and state committed as active.
    Notified,
}

/// One full cycle: load state → check (if passive) → notify → persist.
///
/// State is written only after the check and the send both succeed. If
/// either fails the file keeps its previous value and the error is returned.
pub fn run<S: Spec + ?Sized>(
    spec: &S,
    state_file: &Path,
    envelope: &Envelope,
    mailer: &dyn Mailer,
) -> Result<Outcome, WatchError> {
    TwoStateSpec::scoped(spec, state_file, |tracked| {
        if tracked.state().is_active() {
            logf!("Spec {} already notified, nothing to do", spec.name());
            return Ok(Outcome::AlreadyActive);
        }
        if !tracked.need_to_notify()? {
            return Ok(Outcome::StillPassive);
        }

        logf!("Sending notification to {} recipient(s)", envelope.recipients.len());
        let mut message = EmailMessage::new(envelope.sender.clone(), &envelope.recipients);
        tracked.spec().render_email_message(&mut message);
        mailer.send(&message)?;
        logf!("Notification sent: {:?}", message.subject);

        Ok(Outcome::Notified)
    })
}
