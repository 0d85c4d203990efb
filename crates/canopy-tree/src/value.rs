//! Attribute values and event handlers.
//!
//! A rendered node's attributes ("props") are an explicit mapping from name
//! to [`PropValue`]. Handlers are ordinary values in that mapping, which is
//! what lets the event simulator find `onChangeText` by name.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// Map of attribute names to values for a component node.
pub type AttributesMap = HashMap<String, PropValue>;

/// Error returned by a handler. Propagated to the caller of `simulate` as-is.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

type HandlerFn = dyn Fn(&[PropValue]) -> Result<PropValue, HandlerError> + Send + Sync;

/// A single attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    /// A string value, e.g. `testID="submit"`.
    String(String),
    /// A numeric value.
    Number(f64),
    /// A boolean value, e.g. `disabled={true}`.
    Bool(bool),
    /// An explicit null / undefined value.
    Null,
    /// An invocable event handler, e.g. `onPress={...}`.
    Handler(Handler),
}

impl PropValue {
    /// Coerce the value to the string used by attribute selectors.
    ///
    /// Integral numbers print without a fraction (`1`, not `1.0`).
    /// Handlers have no string form and return `None`.
    #[must_use]
    pub fn coerce_to_string(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::String(s) => Some(Cow::Borrowed(s.as_str())),
            Self::Number(n) => Some(Cow::Owned(format_number(*n))),
            Self::Bool(true) => Some(Cow::Borrowed("true")),
            Self::Bool(false) => Some(Cow::Borrowed("false")),
            Self::Null => Some(Cow::Borrowed("null")),
            Self::Handler(_) => None,
        }
    }

    /// Returns the handler if this value is invocable.
    #[must_use]
    pub const fn as_handler(&self) -> Option<&Handler> {
        match self {
            Self::Handler(h) => Some(h),
            _ => None,
        }
    }

    /// Returns the string slice if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Short name of the value's kind, for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Number(_) => "number",
            Self::Bool(_) => "boolean",
            Self::Null => "null",
            Self::Handler(_) => "handler",
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let sign = if n > 0.0 { "" } else { "-" };
        format!("{sign}Infinity")
    } else if n == 0.0 {
        // -0 prints as 0
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        // Exponent form with an explicit sign, as in `1e+21` and `1.5e-7`
        let formatted = format!("{n:e}");
        match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => formatted,
        }
    } else {
        // f64's Display already drops a trailing `.0`
        format!("{n}")
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<f64> for PropValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for PropValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Handler> for PropValue {
    fn from(h: Handler) -> Self {
        Self::Handler(h)
    }
}

/// An invocable attribute value.
///
/// Cloning a handler shares the underlying function; two handlers compare
/// equal only if they are clones of the same function.
#[derive(Clone)]
pub struct Handler {
    label: Option<String>,
    func: Arc<HandlerFn>,
}

impl Handler {
    /// Wrap a function as an anonymous handler.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&[PropValue]) -> Result<PropValue, HandlerError> + Send + Sync + 'static,
    {
        Self {
            label: None,
            func: Arc::new(func),
        }
    }

    /// Wrap a function as a handler with a label shown in snapshots.
    pub fn named<F>(label: impl Into<String>, func: F) -> Self
    where
        F: Fn(&[PropValue]) -> Result<PropValue, HandlerError> + Send + Sync + 'static,
    {
        Self {
            label: Some(label.into()),
            func: Arc::new(func),
        }
    }

    /// A handler that records every call and returns `Null`.
    ///
    /// The returned [`CallLog`] observes the calls made through any clone
    /// of the handler.
    #[must_use]
    pub fn spy(label: impl Into<String>) -> (Self, CallLog) {
        let log = CallLog::default();
        let sink = log.clone();
        let handler = Self::named(label, move |args| {
            sink.record(args);
            Ok(PropValue::Null)
        });
        (handler, log)
    }

    /// The handler's label, if it was given one.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Invoke the handler with the given arguments.
    ///
    /// # Errors
    ///
    /// Returns whatever error the wrapped function returns.
    pub fn call(&self, args: &[PropValue]) -> Result<PropValue, HandlerError> {
        (self.func)(args)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "Handler({label})"),
            None => f.write_str("Handler(<anonymous>)"),
        }
    }
}

impl PartialEq for Handler {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

/// Shared record of the argument lists a [`Handler::spy`] was called with.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<Vec<PropValue>>>>,
}

impl CallLog {
    fn record(&self, args: &[PropValue]) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(args.to_vec());
    }

    /// All recorded calls, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<Vec<PropValue>> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of recorded calls.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether the handler was never called.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.call_count() == 0
    }
}
