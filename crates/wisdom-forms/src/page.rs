//! Sticky header and mobile navigation menu

use crate::dom::Dom;
use crate::error::DomError;

const SCROLLED_CLASS: &str = "scrolled";
const OPEN_CLASS: &str = "open";

/// Adds `scrolled` to the header once the page moves past a threshold
#[derive(Debug, Clone)]
pub struct HeaderScroll<N> {
    header: N,
    threshold: f64,
}

impl<N: Clone + PartialEq> HeaderScroll<N> {
    /// `None` when the page has no header with that id
    pub fn register<D: Dom<Node = N>>(dom: &D, header_id: &str, threshold: f64) -> Option<Self> {
        let header = dom.element_by_id(header_id)?;
        Some(Self { header, threshold })
    }

    /// Sync the header class with the scroll offset; returns whether it is marked scrolled
    pub fn on_scroll<D: Dom<Node = N>>(&self, dom: &mut D, scroll_y: f64) -> Result<bool, DomError> {
        let scrolled = scroll_y > self.threshold;
        if scrolled {
            dom.add_class(&self.header, SCROLLED_CLASS)?;
        } else {
            dom.remove_class(&self.header, SCROLLED_CLASS)?;
        }
        Ok(scrolled)
    }
}

/// Toggle button plus collapsible menu, kept in sync through ARIA attributes
#[derive(Debug, Clone)]
pub struct MobileMenu<N> {
    toggle: N,
    menu: N,
}

impl<N: Clone + PartialEq> MobileMenu<N> {
    /// `None` unless both the toggle and the menu exist
    pub fn register<D: Dom<Node = N>>(dom: &D, toggle_id: &str, menu_id: &str) -> Option<Self> {
        let toggle = dom.element_by_id(toggle_id)?;
        let menu = dom.element_by_id(menu_id)?;
        Some(Self { toggle, menu })
    }

    pub fn toggle_node(&self) -> &N {
        &self.toggle
    }

    pub fn menu_node(&self) -> &N {
        &self.menu
    }

    pub fn is_open<D: Dom<Node = N>>(&self, dom: &D) -> bool {
        dom.attribute(&self.toggle, "aria-expanded").as_deref() == Some("true")
    }

    /// Flip the menu; returns the new open state
    pub fn toggle<D: Dom<Node = N>>(&self, dom: &mut D) -> Result<bool, DomError> {
        let open = !self.is_open(dom);
        self.set_open(dom, open)?;
        Ok(open)
    }

    pub fn close<D: Dom<Node = N>>(&self, dom: &mut D) -> Result<(), DomError> {
        self.set_open(dom, false)
    }

    /// Escape closes an open menu and hands focus back to the toggle
    pub fn on_key<D: Dom<Node = N>>(&self, dom: &mut D, key: &str) -> Result<bool, DomError> {
        if key != "Escape" || !self.is_open(dom) {
            return Ok(false);
        }
        self.close(dom)?;
        dom.focus(&self.toggle)?;
        Ok(true)
    }

    fn set_open<D: Dom<Node = N>>(&self, dom: &mut D, open: bool) -> Result<(), DomError> {
        dom.set_attribute(&self.toggle, "aria-expanded", if open { "true" } else { "false" })?;
        dom.set_attribute(&self.menu, "aria-hidden", if open { "false" } else { "true" })?;
        if open {
            dom.add_class(&self.menu, OPEN_CLASS)
        } else {
            dom.remove_class(&self.menu, OPEN_CLASS)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryDom, NodeId};

    #[test]
    fn test_header_threshold() {
        let mut dom = MemoryDom::new();
        let header = dom.element(NodeId::ROOT, "header", &[("id", "site-header")]);
        let scroll = HeaderScroll::register(&dom, "site-header", 20.0).unwrap();

        assert!(!scroll.on_scroll(&mut dom, 0.0).unwrap());
        assert!(!scroll.on_scroll(&mut dom, 20.0).unwrap());
        assert!(!dom.has_class(&header, "scrolled"));

        assert!(scroll.on_scroll(&mut dom, 21.0).unwrap());
        assert!(dom.has_class(&header, "scrolled"));

        scroll.on_scroll(&mut dom, 5.0).unwrap();
        assert!(!dom.has_class(&header, "scrolled"));
    }

    #[test]
    fn test_missing_header_is_a_no_op() {
        let dom = MemoryDom::new();
        assert!(HeaderScroll::register(&dom, "site-header", 20.0).is_none());
    }

    fn menu_page() -> (MemoryDom, NodeId, NodeId) {
        let mut dom = MemoryDom::new();
        let toggle = dom.element(
            NodeId::ROOT,
            "button",
            &[("id", "mobile-menu-toggle"), ("aria-expanded", "false")],
        );
        let menu = dom.element(NodeId::ROOT, "nav", &[("id", "mobile-menu"), ("aria-hidden", "true")]);
        (dom, toggle, menu)
    }

    #[test]
    fn test_menu_toggle_mirrors_aria() {
        let (mut dom, toggle, menu) = menu_page();
        let mobile = MobileMenu::register(&dom, "mobile-menu-toggle", "mobile-menu").unwrap();

        assert!(mobile.toggle(&mut dom).unwrap());
        assert_eq!(dom.attribute(&toggle, "aria-expanded").as_deref(), Some("true"));
        assert_eq!(dom.attribute(&menu, "aria-hidden").as_deref(), Some("false"));
        assert!(dom.has_class(&menu, "open"));

        assert!(!mobile.toggle(&mut dom).unwrap());
        assert_eq!(dom.attribute(&menu, "aria-hidden").as_deref(), Some("true"));
        assert!(!dom.has_class(&menu, "open"));
    }

    #[test]
    fn test_escape_closes_and_refocuses() {
        let (mut dom, toggle, menu) = menu_page();
        let mobile = MobileMenu::register(&dom, "mobile-menu-toggle", "mobile-menu").unwrap();

        assert!(!mobile.on_key(&mut dom, "Escape").unwrap());

        mobile.toggle(&mut dom).unwrap();
        assert!(!mobile.on_key(&mut dom, "Enter").unwrap());
        assert!(mobile.on_key(&mut dom, "Escape").unwrap());
        assert!(!mobile.is_open(&dom));
        assert!(!dom.has_class(&menu, "open"));
        assert_eq!(dom.focused(), Some(toggle));
    }

    #[test]
    fn test_menu_needs_both_elements() {
        let mut dom = MemoryDom::new();
        dom.element(NodeId::ROOT, "button", &[("id", "mobile-menu-toggle")]);
        assert!(MobileMenu::register(&dom, "mobile-menu-toggle", "mobile-menu").is_none());
    }
}
