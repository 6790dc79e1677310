//! Accordion widget core.
//!
//! An [`Accordion`] owns a fixed list of panels, each wrapping one nested
//! content item, and tracks which of them are expanded. Expanding or
//! collapsing a panel slides its content region and keeps signalling
//! [`AccordionEvent::Resize`](events::AccordionEvent::Resize) to the host
//! while the slide runs, so an embedding frame can follow the height change.
//!
//! Animations run as local tasks: drive the accordion from a
//! [`tokio::task::LocalSet`] on a current-thread runtime. Outside any
//! runtime, or with [`Timing::reduce_motion`](config::Timing), slides
//! complete instantly.

pub mod config;
pub mod content;
pub mod error;
pub mod events;
pub mod ids;
pub mod keys;
pub mod notifier;
pub mod panel;
pub mod slide;
pub mod view;
pub mod widget;
pub mod xapi;

pub use widget::{Accordion, AccordionBuilder};

pub mod prelude {
    pub use crate::config::{AccordionConfig, HeadingLevel, InitialMode, OpenMode, PanelParams, Timing};
    pub use crate::content::{ContentDescriptor, ContentFactory, ContentInstance, EmptyContent, Region};
    pub use crate::error::{AccordionError, CallbackError, ConfigError, ContentError};
    pub use crate::events::{AccordionEvent, EventEmitter, EventKind, SubscriptionId};
    pub use crate::ids::IdSource;
    pub use crate::keys::{EventResult, Key};
    pub use crate::notifier::{LoopHandle, LoopId, ResizeNotifier};
    pub use crate::panel::{Panel, PanelState};
    pub use crate::slide::Easing;
    pub use crate::view::{Container, Section};
    pub use crate::widget::{Accordion, AccordionBuilder};
    pub use crate::xapi::XapiStatement;
}
