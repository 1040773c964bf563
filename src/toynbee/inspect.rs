//! # Inspection Run
//!
//! Walks every application × endpoint pair in order and either opens it in the
//! browser or fetches and renders it.
//!
//! Errors are sorted by how far they reach:
//! - A failed fetch is logged and the pair is skipped.
//! - A payload that fails to decode is logged; the report gets nothing for it.
//! - A template that fails to execute leaves a diagnostic block in the report.
//! - A browser that cannot be launched ends the run.
//!
//! The report writer is flushed exactly once, after the last pair.

use crate::browser::Opener;
use crate::endpoints::EndpointDescriptor;
use crate::error::{Error, RenderError, Result};
use crate::fetch::Fetcher;
use crate::render::TemplatePrinter;
use std::io::Write;
use tracing::{debug, warn};

pub const DEFAULT_PATH: &str = "/-/info";

#[derive(Debug, Clone)]
pub struct InspectOptions {
    /// Application names, substituted into every endpoint pattern.
    pub apps: Vec<String>,
    /// Appended to each endpoint base URL.
    pub path: String,
    /// Open each endpoint in the browser instead of fetching it.
    pub open: bool,
}

impl InspectOptions {
    pub fn new(apps: Vec<String>) -> Self {
        Self {
            apps,
            path: DEFAULT_PATH.to_string(),
            open: false,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }
}

/// What happened during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InspectSummary {
    pub fetched: usize,
    pub fetch_failures: usize,
    pub rendered: usize,
    pub render_failures: usize,
    pub opened: usize,
}

impl InspectSummary {
    pub fn fetch_attempts(&self) -> usize {
        self.fetched + self.fetch_failures
    }
}

pub fn inspect<F, O, W>(
    options: &InspectOptions,
    endpoints: &[EndpointDescriptor],
    printer: &TemplatePrinter,
    fetcher: &F,
    opener: &O,
    mut out: W,
) -> Result<InspectSummary>
where
    F: Fetcher + ?Sized,
    O: Opener + ?Sized,
    W: Write,
{
    if options.apps.is_empty() {
        return Err(Error::NoProjects);
    }

    let mut summary = InspectSummary::default();

    for app in &options.apps {
        for endpoint in endpoints {
            let url = endpoint.url(app, &options.path);

            if options.open {
                opener.open(&url)?;
                summary.opened += 1;
                continue;
            }

            let body = match fetcher.fetch(&url) {
                Ok(body) => body,
                Err(err) => {
                    warn!("{err}");
                    summary.fetch_failures += 1;
                    continue;
                }
            };
            summary.fetched += 1;

            match printer.render(&body, endpoint.label(), &mut out) {
                Ok(()) => summary.rendered += 1,
                Err(err @ RenderError::Execute { .. }) => {
                    debug!(%url, "{err}");
                    summary.render_failures += 1;
                }
                Err(err) => {
                    warn!("failed to render response for {url}: {err}");
                    summary.render_failures += 1;
                }
            }
        }
    }

    out.flush()?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::DEFAULT_ENDPOINTS;
    use crate::error::{FetchError, OpenError};
    use crate::render::DEFAULT_TEMPLATE;
    use crate::tabwriter::TabWriter;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Answers from a fixed map of URL → body; unknown URLs fail to connect.
    #[derive(Default)]
    struct RecordingFetcher {
        bodies: HashMap<String, String>,
        requests: RefCell<Vec<String>>,
    }

    impl RecordingFetcher {
        fn with(mut self, url: &str, body: &str) -> Self {
            self.bodies.insert(url.to_string(), body.to_string());
            self
        }

        fn answering_all(apps: &[&str], body: &str) -> Self {
            let mut fetcher = Self::default();
            for app in apps {
                for endpoint in DEFAULT_ENDPOINTS {
                    fetcher = fetcher.with(&endpoint.url(app, DEFAULT_PATH), body);
                }
            }
            fetcher
        }
    }

    impl Fetcher for RecordingFetcher {
        fn fetch(&self, url: &str) -> std::result::Result<Vec<u8>, FetchError> {
            self.requests.borrow_mut().push(url.to_string());
            match self.bodies.get(url) {
                Some(body) => Ok(body.clone().into_bytes()),
                None => Err(unreachable_request(url)),
            }
        }
    }

    /// Produces a genuine transport error by asking a client for an invalid URL.
    fn unreachable_request(url: &str) -> FetchError {
        let source = reqwest::blocking::Client::new()
            .get("http://")
            .send()
            .unwrap_err();
        FetchError::Request {
            url: url.to_string(),
            source,
        }
    }

    #[derive(Default)]
    struct RecordingOpener {
        opened: RefCell<Vec<String>>,
        fail: bool,
    }

    impl Opener for RecordingOpener {
        fn open(&self, url: &str) -> std::result::Result<(), OpenError> {
            if self.fail {
                return Err(OpenError::UnsupportedPlatform("test".into()));
            }
            self.opened.borrow_mut().push(url.to_string());
            Ok(())
        }
    }

    fn default_printer() -> TemplatePrinter {
        TemplatePrinter::compile(DEFAULT_TEMPLATE).unwrap()
    }

    fn options(apps: &[&str]) -> InspectOptions {
        InspectOptions::new(apps.iter().map(|a| a.to_string()).collect())
    }

    #[test]
    fn fetches_every_app_endpoint_pair() {
        let fetcher = RecordingFetcher::answering_all(&["app1", "app2"], r#"{"commit":"abc"}"#);
        let opener = RecordingOpener::default();
        let mut out: Vec<u8> = Vec::new();

        let summary = inspect(
            &options(&["app1", "app2"]),
            DEFAULT_ENDPOINTS,
            &default_printer(),
            &fetcher,
            &opener,
            &mut out,
        )
        .unwrap();

        assert_eq!(fetcher.requests.borrow().len(), 12);
        assert!(opener.opened.borrow().is_empty());
        assert_eq!(summary.fetch_attempts(), 12);
        assert_eq!(summary.rendered, 12);

        let requests = fetcher.requests.borrow();
        assert_eq!(requests[0], "https://app1-blue1.example.com/-/info");
        assert_eq!(requests[6], "https://app2-blue1.example.com/-/info");
    }

    #[test]
    fn open_mode_opens_every_pair_without_fetching() {
        let fetcher = RecordingFetcher::default();
        let opener = RecordingOpener::default();
        let mut out: Vec<u8> = Vec::new();

        let summary = inspect(
            &options(&["app1", "app2"]).with_open(true),
            DEFAULT_ENDPOINTS,
            &default_printer(),
            &fetcher,
            &opener,
            &mut out,
        )
        .unwrap();

        assert!(fetcher.requests.borrow().is_empty());
        assert_eq!(opener.opened.borrow().len(), 12);
        assert_eq!(summary.opened, 12);
        assert_eq!(summary.fetch_attempts(), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn open_mode_uses_custom_path() {
        let opener = RecordingOpener::default();
        inspect(
            &options(&["web"]).with_open(true).with_path("/status"),
            &DEFAULT_ENDPOINTS[..1],
            &default_printer(),
            &RecordingFetcher::default(),
            &opener,
            std::io::sink(),
        )
        .unwrap();

        assert_eq!(
            *opener.opened.borrow(),
            vec!["https://web-blue1.example.com/status".to_string()]
        );
    }

    #[test]
    fn open_failure_is_fatal() {
        let opener = RecordingOpener {
            fail: true,
            ..Default::default()
        };
        let err = inspect(
            &options(&["app1"]).with_open(true),
            DEFAULT_ENDPOINTS,
            &default_printer(),
            &RecordingFetcher::default(),
            &opener,
            std::io::sink(),
        )
        .unwrap_err();

        assert!(matches!(err, Error::Open(OpenError::UnsupportedPlatform(_))));
    }

    #[test]
    fn no_apps_is_an_error_before_any_request() {
        let fetcher = RecordingFetcher::default();
        let err = inspect(
            &options(&[]),
            DEFAULT_ENDPOINTS,
            &default_printer(),
            &fetcher,
            &RecordingOpener::default(),
            std::io::sink(),
        )
        .unwrap_err();

        assert!(matches!(err, Error::NoProjects));
        assert!(fetcher.requests.borrow().is_empty());
    }

    #[test]
    fn fetch_failures_do_not_stop_the_run() {
        let endpoints = &DEFAULT_ENDPOINTS[..3];
        let fetcher = RecordingFetcher::default()
            .with(&endpoints[0].url("app", DEFAULT_PATH), r#"{"commit":"one"}"#)
            .with(&endpoints[2].url("app", DEFAULT_PATH), r#"{"commit":"three"}"#);
        let mut out: Vec<u8> = Vec::new();

        let summary = inspect(
            &options(&["app"]),
            endpoints,
            &default_printer(),
            &fetcher,
            &RecordingOpener::default(),
            &mut out,
        )
        .unwrap();

        assert_eq!(summary.fetched, 2);
        assert_eq!(summary.fetch_failures, 1);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "commitDetail: server1 Blue\tCommit: one\ncommitDetail: server2r1 Blue\tCommit: three\n"
        );
    }

    #[test]
    fn render_failures_do_not_stop_the_run() {
        let endpoints = &DEFAULT_ENDPOINTS[..3];
        let fetcher = RecordingFetcher::default()
            .with(&endpoints[0].url("app", DEFAULT_PATH), "not json")
            .with(&endpoints[1].url("app", DEFAULT_PATH), r#"{"version":"2"}"#)
            .with(&endpoints[2].url("app", DEFAULT_PATH), r#"{"commit":"ok"}"#);
        let mut out: Vec<u8> = Vec::new();

        let summary = inspect(
            &options(&["app"]),
            endpoints,
            &default_printer(),
            &fetcher,
            &RecordingOpener::default(),
            &mut out,
        )
        .unwrap();

        assert_eq!(summary.fetched, 3);
        assert_eq!(summary.render_failures, 2);
        assert_eq!(summary.rendered, 1);

        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("not json"));
        assert!(text.contains(r#"raw data was:"#));
        assert!(text.contains(r#"{"version":"2"}"#));
        assert!(text.ends_with("commitDetail: server2r1 Blue\tCommit: ok\n"));
    }

    #[test]
    fn report_is_aligned_on_single_flush() {
        let endpoints = &DEFAULT_ENDPOINTS[..2];
        let fetcher = RecordingFetcher::default()
            .with(&endpoints[0].url("app", DEFAULT_PATH), r#"{"commit":"aaa"}"#)
            .with(&endpoints[1].url("app", DEFAULT_PATH), r#"{"commit":"bbb"}"#);
        let mut out: Vec<u8> = Vec::new();

        inspect(
            &options(&["app"]),
            endpoints,
            &default_printer(),
            &fetcher,
            &RecordingOpener::default(),
            TabWriter::new(&mut out),
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        // "commitDetail: server1 Green" is 27 wide, plus 8 padding.
        assert_eq!(
            text,
            format!(
                "commitDetail: server1 Blue{}Commit: aaa\ncommitDetail: server1 Green{}Commit: bbb\n",
                " ".repeat(9),
                " ".repeat(8)
            )
        );
    }
}
