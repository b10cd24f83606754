//! Declarative attribute adapter.
//!
//! Pure glue between a clickable host element and the controller: a bag of
//! string attributes is mapped onto [`DialogOptions`] and `open` is called
//! on activation. An optional `close_previous` attribute closes a named
//! prior dialog first. Boolean attributes follow the attribute convention:
//! only the literal string `"false"` disables, anything else (including
//! absence) keeps the default of `true`.

use crate::controller::{DialogController, DialogHandle};
use crate::error::DialogResult;
use crate::options::{DataPayload, DialogOptions};

#[derive(Debug, Clone, Default)]
pub struct TriggerAttrs {
    /// Template reference to open
    pub template: Option<String>,
    pub class_name: Option<String>,
    pub controller: Option<String>,
    /// Raw data attribute; JSON-looking strings are parsed downstream
    pub data: Option<String>,
    pub show_close: Option<String>,
    pub close_by_document: Option<String>,
    pub close_by_escape: Option<String>,
    /// Element id of a prior dialog to close before opening
    pub close_previous: Option<String>,
}

impl TriggerAttrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn with_controller(mut self, controller: impl Into<String>) -> Self {
        self.controller = Some(controller.into());
        self
    }

    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn with_show_close(mut self, value: impl Into<String>) -> Self {
        self.show_close = Some(value.into());
        self
    }

    pub fn with_close_by_document(mut self, value: impl Into<String>) -> Self {
        self.close_by_document = Some(value.into());
        self
    }

    pub fn with_close_by_escape(mut self, value: impl Into<String>) -> Self {
        self.close_by_escape = Some(value.into());
        self
    }

    pub fn with_close_previous(mut self, id: impl Into<String>) -> Self {
        self.close_previous = Some(id.into());
        self
    }

    fn flag(attr: &Option<String>) -> bool {
        attr.as_deref() != Some("false")
    }

    /// Map the attributes onto options, starting from `base`.
    pub fn to_options(&self, base: DialogOptions) -> DialogOptions {
        let mut options = base;
        options.template = self.template.clone();
        if let Some(class_name) = &self.class_name {
            options.class_name = class_name.clone();
        }
        options.controller = self.controller.clone();
        options.data = self.data.clone().map(DataPayload::Raw);
        options.show_close = Self::flag(&self.show_close);
        options.close_by_document = Self::flag(&self.close_by_document);
        options.close_by_escape = Self::flag(&self.close_by_escape);
        options
    }

    /// The click handler body: close the named previous dialog if any,
    /// then open with the mapped options.
    pub async fn activate(
        &self,
        controller: &mut DialogController,
    ) -> DialogResult<DialogHandle> {
        if let Some(previous) = &self.close_previous {
            controller.close(previous);
        }
        let options = self.to_options(controller.defaults());
        controller.open(options).await
    }
}
