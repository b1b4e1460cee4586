//! Human-readable endpoint check and section summaries.

#[cfg(test)]
#[path = "report_test.rs"]
mod report_test;

use std::fmt;
use std::time::Duration;

use kidoo::api::{ApiError, Resource};
use kidoo::content::settings::{
    ADDRESS, EMAIL, FACEBOOK_URL, INSTAGRAM_URL, NEWSLETTER_SIGNUP_TEXT, PHONE_NUMBER, TWITTER_URL, WHATSAPP_NUMBER,
    YOUTUBE_URL,
};
use kidoo::content::{LoadState, SettingsMap};

const SETTING_KEYS: [&str; 9] = [
    PHONE_NUMBER,
    EMAIL,
    ADDRESS,
    WHATSAPP_NUMBER,
    NEWSLETTER_SIGNUP_TEXT,
    FACEBOOK_URL,
    INSTAGRAM_URL,
    YOUTUBE_URL,
    TWITTER_URL,
];

pub fn resource_names() -> String {
    Resource::ALL.iter().map(|r| r.name()).collect::<Vec<_>>().join(", ")
}

/// One endpoint of a `check` run.
pub struct CheckLine {
    pub resource: Resource,
    pub result: Result<usize, ApiError>,
    pub elapsed: Duration,
}

impl fmt::Display for CheckLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = self.elapsed.as_millis();
        match &self.result {
            Ok(0) => write!(f, "EMPTY {:<16} {:>5}ms  sample content will be shown", self.resource.name(), ms),
            Ok(n) => write!(f, "OK    {:<16} {:>5}ms  {n} items", self.resource.name(), ms),
            Err(e) => write!(f, "FAIL  {:<16} {:>5}ms  {e}", self.resource.name(), ms),
        }
    }
}

/// What a page would display for one section.
#[derive(Debug, PartialEq, Eq)]
pub struct SectionReport {
    pub resource: Resource,
    pub items: usize,
    pub used_fallback: bool,
    pub error: Option<String>,
}

impl SectionReport {
    pub fn from_state<T>(resource: Resource, state: &LoadState<T>) -> Self {
        Self {
            resource,
            items: state.items().len(),
            used_fallback: state.used_fallback(),
            error: state.error().map(ToString::to_string),
        }
    }
}

impl fmt::Display for SectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = if self.used_fallback { "sample" } else { "server" };
        write!(f, "{}: {} items from {source}", self.resource, self.items)?;
        if let Some(error) = &self.error {
            write!(f, " ({error})")?;
        }
        Ok(())
    }
}

/// `(key, resolved value, supplied by the API)` for every known setting.
pub fn settings_rows(settings: &SettingsMap) -> Vec<(&'static str, String, bool)> {
    SETTING_KEYS
        .iter()
        .map(|key| (*key, settings.get(key).to_owned(), settings.is_overridden(key)))
        .collect()
}
