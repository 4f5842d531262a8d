#![forbid(unsafe_code)]

//! Panels: navigation engine for tab panels, carousels, and step wizards.
//!
//! # Role in FrankenTUI
//! `ftui-panels` owns the headless state behind any "one of N named panels is
//! visible" view. It decides which panel is current, how to step between
//! panels, which transition to play, and which hidden panels keep their
//! rendered state. Drawing is left to the widget layer.
//!
//! # Primary responsibilities
//! - **PanelRegistry**: flattens raw children into an ordered panel list.
//! - **NavigationEngine**: resolves the selection, steps forward and backward
//!   over enabled panels with optional wraparound, and emits change events.
//! - **DirectionPolicy**: semantic direction and transition naming.
//! - **RetentionCache**: bounded keep-alive set for hidden panels.
//! - **GestureAdapter**: swipe to navigation step, axis and RTL aware.
//!
//! # Controlled selection
//! The caller owns the selection. The engine asks for changes with
//! [`PanelEvent::UpdateSelection`] and learns about confirmed ones through
//! [`NavigationEngine::on_selection_changed`]. Work that a UI loop would defer
//! runs when the caller calls [`NavigationEngine::settle`] (after a render
//! pass) or [`NavigationEngine::tick`] (on the next scheduling tick).
//!
//! # Example
//! ```
//! use ftui_panels::{NavigationEngine, PanelDescriptor, PanelEvent, PanelsConfig};
//!
//! let mut engine = NavigationEngine::<()>::new(PanelsConfig::default(), Some("a".into()));
//! engine.set_children([
//!     PanelDescriptor::new("a", ()).into(),
//!     PanelDescriptor::new("b", ()).disabled(true).into(),
//!     PanelDescriptor::new("c", ()).into(),
//! ]);
//!
//! engine.next();
//! let events = engine.drain_events();
//! assert_eq!(events, vec![PanelEvent::UpdateSelection("c".into())]);
//!
//! engine.on_selection_changed(Some("c".into()), Some("a".into()));
//! assert_eq!(engine.current_index(), Some(2));
//! ```

pub mod config;
pub mod content;
pub mod direction;
pub mod engine;
pub mod gesture;
pub mod name;
pub mod registry;
pub mod retention;
pub mod schedule;
pub mod selection;

pub use config::{PanelsConfig, PanelsConfigError, RetentionConfig};
pub use content::{PanelContent, visible_panel};
pub use direction::{Direction, TRANSITION_NAMESPACE, TransitionPolicy, direction_between};
pub use engine::{NavigationEngine, NavigationState, PanelEvent};
pub use gesture::{GestureAdapter, SwipeDirection, TextDirection};
pub use name::PanelName;
pub use registry::{
    Availability, DisableFlag, Panel, PanelDescriptor, PanelNode, PanelProps, PanelRegistry,
};
pub use retention::{RetentionCache, RetentionFilter};
pub use schedule::{DeferredQueue, Phase};
pub use selection::{index_of, is_valid_name};

#[cfg(feature = "regex-filter")]
pub use retention::PatternFilter;
