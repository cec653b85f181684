// src/specs/page.rs
//! Generic page-text spec.
//!
//! Fetches one URL and looks for one piece of text. Depending on the
//! [`Trigger`], the spec becomes active when the text shows up or when it
//! goes away (e.g. a "sold out" banner disappearing).

use crate::core::{html, net};
use crate::error::CheckError;
use crate::notify::EmailMessage;

use super::Spec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    /// Active once the text is on the page.
    Appears,
    /// Active once the text is no longer on the page.
    Disappears,
}

#[derive(Clone, Debug)]
pub struct PageWatch {
    pub name: String,
    pub url: String,
    pub text: String,
    pub trigger: Trigger,
    pub ignore_case: bool,
    pub subject: Option<String>,
    pub body: Option<String>,
}

impl PageWatch {
    pub fn new(url: impl Into<String>, text: impl Into<String>, trigger: Trigger) -> Self {
        Self {
            name: "page".to_string(),
            url: url.into(),
            text: text.into(),
            trigger,
            ignore_case: false,
            subject: None,
            body: None,
        }
    }

    /// Decide on an already-fetched document.
    pub fn evaluate(&self, doc: &str) -> bool {
        let present = html::page_contains(doc, &self.text, self.ignore_case);
        match self.trigger {
            Trigger::Appears => present,
            Trigger::Disappears => !present,
        }
    }
}

impl Spec for PageWatch {
    fn name(&self) -> &str {
        &self.name
    }

    fn reached_active_state(&self) -> Result<bool, CheckError> {
        let doc = net::http_get(&self.url)?;
        let reached = self.evaluate(&doc);
        logd!("Page: {} {:?} {:?} → {}", self.url, self.trigger, self.text, reached);
        Ok(reached)
    }

    fn render_email_message(&self, message: &mut EmailMessage) {
        message.subject = self
            .subject
            .clone()
            .unwrap_or_else(|| format!("Watched page changed: {}", self.url));

        message.body = self.body.clone().unwrap_or_else(|| {
            let what = match self.trigger {
                Trigger::Appears => "appeared on",
                Trigger::Disappears => "disappeared from",
            };
            format!("\"{}\" {} {}\n", self.text, what, self.url)
        });
    }
}
