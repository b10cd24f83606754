//! Modal dialog overlay lifecycle management for host documents.
//!
//! `scrim` owns the hard part of modal dialogs: the lifecycle state
//! machine. Opening resolves a template (inline, cached, or fetched),
//! mounts an overlay + content element tree into the host document, wires
//! an isolated child data scope, and arbitrates shared document-level
//! keyboard and pointer listeners across any number of concurrently open
//! dialogs. Closing unwinds all of that, with teardown gated on the exit
//! animation when the host supports animation-completion events.
//!
//! ```no_run
//! use scrim::{DialogController, StaticTemplateLoader};
//!
//! # async fn demo() -> scrim::DialogResult<()> {
//! let mut dialogs = DialogController::new(Box::new(
//!     StaticTemplateLoader::new().with_template("greeting.html", "<p>hello</p>"),
//! ));
//!
//! let handle = dialogs
//!     .open(dialogs.defaults().with_template("greeting.html"))
//!     .await?;
//! dialogs.tick()?; // bind markup to scope, one tick after mount
//! dialogs.close(&handle.root);
//! # Ok(())
//! # }
//! ```

pub mod capability;
pub mod controller;
pub mod dom;
pub mod error;
pub mod events;
pub mod instance;
pub mod options;
pub mod registry;
pub mod scope;
pub mod template;
pub mod trigger;

pub use capability::{Capabilities, EnvironmentProbe, PointerBackend};
pub use controller::{BindingCompiler, DialogController, DialogHandle, MarkupCompiler};
pub use dom::{Document, Element, KeyUp, PointerEvent};
pub use error::{DialogError, DialogResult};
pub use events::DialogEvent;
pub use instance::{DialogInstance, Teardown};
pub use options::{DataPayload, DialogOptions};
pub use registry::{DialogId, DialogRegistry};
pub use scope::Scope;
pub use template::{
    FileTemplateLoader, HttpTemplateLoader, StaticTemplateLoader, TemplateLoader,
    TemplateResolver, EMPTY_TEMPLATE,
};
pub use trigger::TriggerAttrs;
