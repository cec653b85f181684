// src/specs/raketa.rs
//! Raketa "Russkij kod 0286" pre-order watch.
//!
//! The product page shows "Предзаказ временно закрыт" (pre-order temporarily
//! closed) while pre-orders are off. The spec is active once that banner is
//! gone.

use crate::error::CheckError;
use crate::notify::EmailMessage;

use super::page::{PageWatch, Trigger};
use super::Spec;

pub const WATCHES_PAGE: &str = "https://raketa.com/product/raketa-russkij-kod-0286/";
pub const CLOSED_BANNER: &str = "Предзаказ временно закрыт";

#[derive(Clone, Debug)]
pub struct Raketa {
    page: PageWatch,
}

impl Raketa {
    pub fn new() -> Self {
        Self::with_url(WATCHES_PAGE)
    }

    /// Same spec against another URL (a mirror or a local fixture).
    pub fn with_url(url: &str) -> Self {
        let mut page = PageWatch::new(url, CLOSED_BANNER, Trigger::Disappears);
        page.name = "raketa".to_string();
        page.subject = Some("Предзаказ на часы Ракета открыт".to_string());
        page.body = Some(format!("Оформить предзаказ: {url}"));
        Self { page }
    }

    pub fn url(&self) -> &str {
        &self.page.url
    }

    pub fn evaluate(&self, doc: &str) -> bool {
        self.page.evaluate(doc)
    }
}

impl Default for Raketa {
    fn default() -> Self {
        Self::new()
    }
}

impl Spec for Raketa {
    fn name(&self) -> &str {
        self.page.name()
    }

    fn reached_active_state(&self) -> Result<bool, CheckError> {
        self.page.reached_active_state()
    }

    fn render_email_message(&self, message: &mut EmailMessage) {
        self.page.render_email_message(message)
    }
}
