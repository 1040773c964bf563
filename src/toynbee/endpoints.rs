//! # Endpoint Table
//!
//! Every deployment target is described by a URL pattern with a single `%s` slot
//! for the application name, plus a human readable label. The label is what ends
//! up in `{{ commitDetail }}` when rendering.
//!
//! [`DEFAULT_ENDPOINTS`] is compiled into the binary. Swapping it for another list
//! is the supported way to point the tool at a different fleet; [`inspect`]
//! accepts any slice of descriptors.
//!
//! [`inspect`]: crate::inspect::inspect

use crate::error::{Error, Result};
use std::borrow::Cow;

/// The substitution slot replaced by the application name.
pub const APP_SLOT: &str = "%s";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointDescriptor {
    url_pattern: Cow<'static, str>,
    label: Cow<'static, str>,
}

impl EndpointDescriptor {
    /// Builds a descriptor from a pattern known to hold exactly one slot.
    pub const fn from_static(url_pattern: &'static str, label: &'static str) -> Self {
        Self {
            url_pattern: Cow::Borrowed(url_pattern),
            label: Cow::Borrowed(label),
        }
    }

    /// Builds a descriptor, rejecting patterns without exactly one `%s` slot.
    pub fn new(url_pattern: impl Into<String>, label: impl Into<String>) -> Result<Self> {
        let url_pattern = url_pattern.into();
        if url_pattern.matches(APP_SLOT).count() != 1 {
            return Err(Error::EndpointPattern {
                pattern: url_pattern,
            });
        }
        Ok(Self {
            url_pattern: Cow::Owned(url_pattern),
            label: Cow::Owned(label.into()),
        })
    }

    pub fn url_pattern(&self) -> &str {
        &self.url_pattern
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// The base URL for `app`, without any path.
    pub fn base_url(&self, app: &str) -> String {
        self.url_pattern.replacen(APP_SLOT, app, 1)
    }

    /// The full URL for `app`: base URL followed by `path_suffix` verbatim.
    pub fn url(&self, app: &str, path_suffix: &str) -> String {
        let mut url = self.base_url(app);
        url.push_str(path_suffix);
        url
    }
}

pub const DEFAULT_ENDPOINTS: &[EndpointDescriptor] = &[
    EndpointDescriptor::from_static("https://%s-blue1.example.com", "server1 Blue"),
    EndpointDescriptor::from_static("https://%s-green1.example.com", "server1 Green"),
    EndpointDescriptor::from_static("https://%s-blue-r1.example.com", "server2r1 Blue"),
    EndpointDescriptor::from_static("https://%s-green-r1.example.com", "server2r1 Green"),
    EndpointDescriptor::from_static("https://%s-blue-r2.example.com", "server2r2 Blue"),
    EndpointDescriptor::from_static("https://%s-green-r2.example.com", "server2r2 Green"),
];
