//! # Template Rendering
//!
//! This is the heart of the tool: a user supplied template is compiled once and then
//! executed against every JSON payload the fetch loop brings back.
//!
//! ## Template Syntax
//!
//! Templates use [minijinja](https://docs.rs/minijinja) (Jinja2-compatible). Every
//! top-level key of the payload is a template variable, plus `commitDetail`, which
//! holds the label of the endpoint the payload came from:
//!
//! ```jinja
//! {{ commitDetail }}	{{ commit | short }}	{{ build.branch }}
//! ```
//!
//! The environment is strict: referencing a key the payload does not have is an
//! error rather than an empty string, so a typo in a template never passes for a
//! missing deployment.
//!
//! Scalars print as they appear in the payload: `true`, `null`, and `1000` for a
//! JSON `1e3`.
//!
//! ## Failure Handling
//!
//! The payload shape is not known ahead of time, so a template that works against
//! one endpoint can fail against the next. [`TemplatePrinter::render`] contains
//! every such failure:
//!
//! | Failure                        | Output written              | Returned                 |
//! |--------------------------------|-----------------------------|--------------------------|
//! | payload does not decode        | nothing                     | [`RenderError::Decode`]  |
//! | template error while executing | partial output + diagnostic | [`RenderError::Execute`] |
//! | panic while executing          | partial output + diagnostic | [`RenderError::Execute`] |
//!
//! The diagnostic block goes into the same writer as the report, right where the
//! row would have been, and holds everything needed to fix the template without
//! re-running against production.

use crate::error::{RenderError, Result};
use minijinja::value::ValueKind;
use minijinja::{
    escape_formatter, AutoEscape, Environment, Output, State, UndefinedBehavior, Value,
};
use serde::Serialize;
use serde_json::Map;
use std::any::Any;
use std::fmt;
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};

/// Key injected into every payload, holding the endpoint label.
pub const LABEL_KEY: &str = "commitDetail";

/// Prints the endpoint label followed by the `commit` field of the payload.
pub const DEFAULT_TEMPLATE: &str = "commitDetail: {{ commitDetail }}\tCommit: {{ commit }}\n";

const TEMPLATE_NAME: &str = "output";

/// Commit hashes are abbreviated to this many characters by the `short` filter.
pub const SHORT_HASH_LEN: usize = 7;

/// The variables a template is executed against: the decoded payload plus the
/// injected [`LABEL_KEY`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RenderContext(Map<String, serde_json::Value>);

impl RenderContext {
    /// Decodes `payload` and injects `label`, overwriting any `commitDetail` the
    /// payload carried itself.
    ///
    /// A top-level `null` decodes to an empty context. Any other non-object
    /// document is rejected.
    pub fn decode(payload: &[u8], label: &str) -> std::result::Result<Self, serde_json::Error> {
        let mut fields = match serde_json::from_slice(payload)? {
            serde_json::Value::Null => Map::new(),
            other => serde_json::from_value::<Map<String, serde_json::Value>>(other)?,
        };
        fields.insert(
            LABEL_KEY.to_string(),
            serde_json::Value::String(label.to_string()),
        );
        Ok(Self(fields))
    }

    /// Looks up a top-level field, including the injected label.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    /// Number of top-level fields, the label included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for a decoded context, since the label is always present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RenderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(&self.0) {
            Ok(json) => f.write_str(&json),
            Err(_) => write!(f, "{:?}", self.0),
        }
    }
}

/// A compiled template, ready to be executed once per endpoint.
pub struct TemplatePrinter {
    source: String,
    env: Environment<'static>,
}

impl fmt::Debug for TemplatePrinter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplatePrinter")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl TemplatePrinter {
    /// Compiles `source`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Template`](crate::error::Error::Template) on a syntax error.
    pub fn compile(source: &str) -> Result<Self> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_formatter(format_json_scalar);
        register_filters(&mut env);

        env.add_template_owned(TEMPLATE_NAME, source.to_string())?;

        Ok(Self {
            source: source.to_string(),
            env,
        })
    }

    /// The template text as the user wrote it.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Renders one payload into `sink`.
    ///
    /// Never panics. On an execution failure the diagnostic block is written to
    /// `sink` before the error is returned; on a decode failure `sink` is left
    /// untouched.
    pub fn render<W: Write + ?Sized>(
        &self,
        payload: &[u8],
        label: &str,
        sink: &mut W,
    ) -> std::result::Result<(), RenderError> {
        let context = RenderContext::decode(payload, label)?;

        if let Err(message) = self.safe_execute(sink, &context) {
            self.write_diagnostics(sink, &message, payload, &context)?;
            return Err(RenderError::Execute {
                template: self.source.clone(),
                message,
            });
        }
        Ok(())
    }

    /// Executes the template, turning both template errors and panics into a
    /// message.
    fn safe_execute<W: Write + ?Sized>(
        &self,
        sink: &mut W,
        context: &RenderContext,
    ) -> std::result::Result<(), String> {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let template = self.env.get_template(TEMPLATE_NAME)?;
            template.render_captured_to(context, &mut *sink).map(|_| ())
        }));

        match outcome {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => Err(err.to_string()),
            Err(payload) => Err(format!("caught panic: {}", panic_message(payload.as_ref()))),
        }
    }

    fn write_diagnostics<W: Write + ?Sized>(
        &self,
        sink: &mut W,
        message: &str,
        payload: &[u8],
        context: &RenderContext,
    ) -> std::io::Result<()> {
        writeln!(
            sink,
            "Error executing template: {message}. Printing more information for debugging the template:"
        )?;
        writeln!(sink, "\ttemplate was:\n\t\t{}", self.source)?;
        writeln!(
            sink,
            "\traw data was:\n\t\t{}",
            String::from_utf8_lossy(payload)
        )?;
        writeln!(sink, "\tobject given to template engine was:\n\t\t{context}\n")
    }
}

/// Prints payload scalars the way they appear in JSON: `true`, `null` and `1000`
/// rather than `True`, `none` and `1000.0`.
fn format_json_scalar(
    out: &mut Output,
    state: &State,
    value: &Value,
) -> std::result::Result<(), minijinja::Error> {
    match value.kind() {
        ValueKind::Bool => out.write_str(if value.is_true() { "true" } else { "false" })?,
        ValueKind::None => out.write_str("null")?,
        ValueKind::Number if !value.is_integer() => match f64::try_from(value.clone()) {
            Ok(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                out.write_str(&(n as i64).to_string())?
            }
            _ => return escape_formatter(out, state, value),
        },
        _ => return escape_formatter(out, state, value),
    }
    Ok(())
}

fn register_filters(env: &mut Environment<'static>) {
    env.add_filter("short", |value: Value, len: Option<usize>| -> String {
        value
            .to_string()
            .chars()
            .take(len.unwrap_or(SHORT_HASH_LEN))
            .collect()
    });
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
