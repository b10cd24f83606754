//! Dialog configuration options and the tagged `data` payload.

use crate::error::DialogResult;
use crate::scope::Scope;
use serde_json::Value;

/// Default CSS class applied to the dialog root.
pub const DEFAULT_CLASS_NAME: &str = "theme-default";

/// Arbitrary payload exposed to the dialog's scope as `dialog_data`.
///
/// The original shape of `data` is duck-typed; here it is an explicit
/// tagged variant. The parse-trigger rule: a raw string whose first
/// non-whitespace character is `{` is parsed as JSON by [`DataPayload::parsed`].
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum DataPayload {
    /// A plain string passed through unchanged
    Raw(String),
    /// A structured value, either supplied directly or parsed from a
    /// JSON-looking string
    Structured(Value),
}

impl DataPayload {
    /// Apply the parse-trigger rule. `Raw` strings with a leading `{`
    /// become `Structured`; a parse failure is a hard error surfaced
    /// out of `open`. Everything else is returned unchanged.
    pub fn parsed(self) -> DialogResult<DataPayload> {
        match self {
            DataPayload::Raw(s) if s.trim_start().starts_with('{') => {
                let value: Value = serde_json::from_str(&s)?;
                Ok(DataPayload::Structured(value))
            }
            other => Ok(other),
        }
    }
}

impl From<&str> for DataPayload {
    fn from(s: &str) -> Self {
        DataPayload::Raw(s.to_string())
    }
}

impl From<String> for DataPayload {
    fn from(s: String) -> Self {
        DataPayload::Raw(s)
    }
}

impl From<Value> for DataPayload {
    fn from(value: Value) -> Self {
        DataPayload::Structured(value)
    }
}

/// Configuration for one `open` call.
///
/// Every field is optional in spirit: `default()` carries the documented
/// defaults, and callers layer overrides on top with the builder methods.
/// Options are owned values, so one call's options can never leak into
/// another call's defaults.
#[derive(Debug, Clone)]
pub struct DialogOptions {
    /// Raw markup, a cache lookup key, or a fetchable reference
    pub template: Option<String>,
    /// Treat `template` as literal markup rather than a reference
    pub plain: bool,
    /// Parent data scope; the controller's root scope when absent
    pub scope: Option<Scope>,
    /// Name of a controller to attach to the dialog's root element
    pub controller: Option<String>,
    /// CSS class(es) applied to the dialog root
    pub class_name: String,
    /// Inject a close-affordance element into the markup
    pub show_close: bool,
    /// Clicking the overlay or the close affordance closes the dialog
    pub close_by_document: bool,
    /// Pressing Escape closes open dialogs
    pub close_by_escape: bool,
    /// Payload exposed to the dialog's scope as `dialog_data`
    pub data: Option<DataPayload>,
}

impl Default for DialogOptions {
    fn default() -> Self {
        Self {
            template: None,
            plain: false,
            scope: None,
            controller: None,
            class_name: DEFAULT_CLASS_NAME.to_string(),
            show_close: true,
            close_by_document: true,
            close_by_escape: true,
            data: None,
        }
    }
}

impl DialogOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn plain(mut self, plain: bool) -> Self {
        self.plain = plain;
        self
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn with_controller(mut self, controller: impl Into<String>) -> Self {
        self.controller = Some(controller.into());
        self
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    pub fn show_close(mut self, show_close: bool) -> Self {
        self.show_close = show_close;
        self
    }

    pub fn close_by_document(mut self, close_by_document: bool) -> Self {
        self.close_by_document = close_by_document;
        self
    }

    pub fn close_by_escape(mut self, close_by_escape: bool) -> Self {
        self.close_by_escape = close_by_escape;
        self
    }

    pub fn with_data(mut self, data: impl Into<DataPayload>) -> Self {
        self.data = Some(data.into());
        self
    }
}
