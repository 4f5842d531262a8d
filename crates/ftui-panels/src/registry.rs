#![forbid(unsafe_code)]

//! Panel registry: the ordered list of navigable panels.
//!
//! Raw child descriptors arrive as a tree of [`PanelNode`]s (groups come from
//! list-valued children). [`PanelRegistry::rebuild`] flattens the tree, drops
//! descriptors that cannot be navigated to, and normalises each disable flag
//! into an [`Availability`] so nothing downstream re-checks raw flags.
//!
//! # Filter rule
//!
//! A descriptor is dropped when it has no props, when it targets a named
//! (non-default) slot, or when its name is not a valid selection value.

use crate::name::PanelName;
use crate::selection::is_valid_name;

/// Disable flag as it arrives from markup or code.
///
/// Markup hands over empty attribute strings (`<panel disable>`), code hands
/// over booleans. Only `Flag(true)` and `Attr("")` mean disabled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DisableFlag {
    /// No flag given.
    #[default]
    Absent,
    /// Boolean flag from code.
    Flag(bool),
    /// Attribute value from markup.
    Attr(String),
}

impl DisableFlag {
    /// Normalise to an availability.
    #[must_use]
    pub fn availability(&self) -> Availability {
        match self {
            Self::Flag(true) => Availability::Disabled,
            Self::Attr(value) if value.is_empty() => Availability::Disabled,
            _ => Availability::Enabled,
        }
    }
}

/// Whether a panel can be navigated to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Availability {
    #[default]
    Enabled,
    Disabled,
}

/// Props of a raw panel descriptor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelProps {
    /// Panel name; required for the panel to be navigable.
    pub name: Option<PanelName>,
    /// Raw disable flag.
    pub disable: DisableFlag,
    /// Named slot this child is projected into, `None` for the default slot.
    pub slot: Option<String>,
}

/// A raw child descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelDescriptor<C> {
    /// Props, `None` for children that carry none (text, comments).
    pub props: Option<PanelProps>,
    /// Opaque content handed back to the render surface.
    pub content: C,
}

impl<C> PanelDescriptor<C> {
    /// Create an enabled descriptor with the given name.
    #[must_use]
    pub fn new(name: impl Into<PanelName>, content: C) -> Self {
        Self {
            props: Some(PanelProps {
                name: Some(name.into()),
                ..PanelProps::default()
            }),
            content,
        }
    }

    /// Create a descriptor without props.
    #[must_use]
    pub fn bare(content: C) -> Self {
        Self {
            props: None,
            content,
        }
    }

    /// Set a boolean disable flag.
    #[must_use]
    pub fn disabled(self, disabled: bool) -> Self {
        self.disable(DisableFlag::Flag(disabled))
    }

    /// Set the raw disable flag.
    #[must_use]
    pub fn disable(mut self, flag: DisableFlag) -> Self {
        self.props.get_or_insert_with(PanelProps::default).disable = flag;
        self
    }

    /// Project this child into a named slot.
    #[must_use]
    pub fn slot(mut self, slot: impl Into<String>) -> Self {
        self.props.get_or_insert_with(PanelProps::default).slot = Some(slot.into());
        self
    }
}

/// A child node: a single descriptor or a list-valued group.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelNode<C> {
    Panel(PanelDescriptor<C>),
    Group(Vec<PanelNode<C>>),
}

impl<C> From<PanelDescriptor<C>> for PanelNode<C> {
    fn from(descriptor: PanelDescriptor<C>) -> Self {
        Self::Panel(descriptor)
    }
}

impl<C> From<Vec<PanelNode<C>>> for PanelNode<C> {
    fn from(group: Vec<PanelNode<C>>) -> Self {
        Self::Group(group)
    }
}

/// A navigable panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel<C> {
    name: PanelName,
    availability: Availability,
    content: C,
}

impl<C> Panel<C> {
    /// Create an enabled panel.
    #[must_use]
    pub fn new(name: impl Into<PanelName>, content: C) -> Self {
        Self {
            name: name.into(),
            availability: Availability::Enabled,
            content,
        }
    }

    /// Set availability.
    #[must_use]
    pub fn availability(mut self, availability: Availability) -> Self {
        self.availability = availability;
        self
    }

    /// Panel name.
    #[must_use]
    pub fn name(&self) -> &PanelName {
        &self.name
    }

    /// Panel content.
    #[must_use]
    pub fn content(&self) -> &C {
        &self.content
    }

    /// Whether the panel can be navigated to.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.availability == Availability::Enabled
    }

    /// Rendering key derived from the name.
    #[must_use]
    pub fn key(&self) -> String {
        self.name.content_key()
    }
}

/// Ordered list of navigable panels, rebuilt on every content change.
#[derive(Debug, Clone)]
pub struct PanelRegistry<C> {
    panels: Vec<Panel<C>>,
}

impl<C> Default for PanelRegistry<C> {
    fn default() -> Self {
        Self { panels: Vec::new() }
    }
}

impl<C> PanelRegistry<C> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list from raw children. Returns the new length.
    pub fn rebuild(&mut self, children: impl IntoIterator<Item = PanelNode<C>>) -> usize {
        let mut panels = Vec::new();
        for node in children {
            flatten_into(node, &mut panels);
        }
        self.panels = panels;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "panels.rebuild",
            len = self.panels.len(),
            enabled = self.panels.iter().filter(|p| p.is_enabled()).count()
        );

        self.panels.len()
    }

    /// All navigable panels, enabled or not.
    #[must_use]
    pub fn list(&self) -> &[Panel<C>] {
        &self.panels
    }

    /// Number of panels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Panel at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Panel<C>> {
        self.panels.get(index)
    }

    /// Enabled panels in list order.
    #[must_use]
    pub fn enabled_panels(&self) -> Vec<&Panel<C>> {
        self.panels.iter().filter(|p| p.is_enabled()).collect()
    }
}

fn flatten_into<C>(node: PanelNode<C>, out: &mut Vec<Panel<C>>) {
    match node {
        PanelNode::Group(children) => {
            for child in children {
                flatten_into(child, out);
            }
        }
        PanelNode::Panel(PanelDescriptor { props, content }) => {
            let Some(props) = props else {
                return;
            };
            if props.slot.is_some() || !is_valid_name(props.name.as_ref()) {
                return;
            }
            let Some(name) = props.name else {
                return;
            };
            out.push(Panel {
                name,
                availability: props.disable.availability(),
                content,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names<C>(registry: &PanelRegistry<C>) -> Vec<String> {
        registry.list().iter().map(Panel::key).collect()
    }

    #[test]
    fn disable_flag_dual_representation() {
        assert_eq!(DisableFlag::Absent.availability(), Availability::Enabled);
        assert_eq!(DisableFlag::Flag(false).availability(), Availability::Enabled);
        assert_eq!(DisableFlag::Flag(true).availability(), Availability::Disabled);
        assert_eq!(
            DisableFlag::Attr(String::new()).availability(),
            Availability::Disabled
        );
        assert_eq!(
            DisableFlag::Attr("false".into()).availability(),
            Availability::Enabled
        );
    }

    #[test]
    fn rebuild_keeps_order_and_counts() {
        let mut registry = PanelRegistry::new();
        let len = registry.rebuild(vec![
            PanelDescriptor::new("a", ()).into(),
            PanelDescriptor::new("b", ()).into(),
            PanelDescriptor::new("c", ()).into(),
        ]);
        assert_eq!(len, 3);
        assert_eq!(names(&registry), ["a", "b", "c"]);
    }

    #[test]
    fn rebuild_flattens_nested_groups() {
        let mut registry = PanelRegistry::new();
        registry.rebuild(vec![
            PanelDescriptor::new("a", ()).into(),
            PanelNode::Group(vec![
                PanelDescriptor::new("b", ()).into(),
                PanelNode::Group(vec![PanelDescriptor::new("c", ()).into()]),
            ]),
            PanelDescriptor::new("d", ()).into(),
        ]);
        assert_eq!(names(&registry), ["a", "b", "c", "d"]);
    }

    #[test]
    fn rebuild_filters_unnavigable_children() {
        let mut registry = PanelRegistry::new();
        registry.rebuild(vec![
            PanelDescriptor::bare(()).into(),
            PanelDescriptor::new("header", ()).slot("before").into(),
            PanelDescriptor::new("", ()).into(),
            PanelDescriptor {
                props: Some(PanelProps::default()),
                content: (),
            }
            .into(),
            PanelDescriptor::new(0, ()).into(),
            PanelDescriptor::new(false, ()).into(),
        ]);
        assert_eq!(names(&registry), ["0", "false"]);
    }

    #[test]
    fn disabled_panels_stay_in_list() {
        let mut registry = PanelRegistry::new();
        registry.rebuild(vec![
            PanelDescriptor::new("a", ()).into(),
            PanelDescriptor::new("b", ()).disabled(true).into(),
            PanelDescriptor::new("c", ())
                .disable(DisableFlag::Attr(String::new()))
                .into(),
        ]);
        assert_eq!(registry.len(), 3);
        let enabled: Vec<String> = registry.enabled_panels().iter().map(|p| p.key()).collect();
        assert_eq!(enabled, ["a"]);
    }

    #[test]
    fn rebuild_replaces_previous_list() {
        let mut registry = PanelRegistry::new();
        registry.rebuild(vec![PanelDescriptor::new("a", 1).into()]);
        registry.rebuild(Vec::new());
        assert!(registry.is_empty());
        assert!(registry.get(0).is_none());
    }

    #[test]
    fn panel_accessors() {
        let panel = Panel::new("x", "body").availability(Availability::Disabled);
        assert_eq!(panel.name(), &PanelName::from("x"));
        assert_eq!(*panel.content(), "body");
        assert!(!panel.is_enabled());
    }
}
