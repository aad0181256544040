//! Declarative element tree and a mock document to mount it in
//!
//! The popup renderer produces [`DomElement`] trees. In the browser they are
//! turned into real nodes; in tests they are mounted into [`MockDom`], which
//! stands in for `document.body`.

use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Tags that never have children or a closing tag
const VOID_TAGS: &[&str] = &["input", "br", "img", "hr"];

/// Represents a DOM element
#[derive(Debug, Clone, PartialEq)]
pub struct DomElement {
    /// Element ID
    pub id: String,
    /// Element tag name
    pub tag: String,
    /// Text content, emitted before any children
    pub text_content: String,
    /// Element attributes (`value`, `placeholder`, `data-op`, ...)
    pub attributes: BTreeMap<String, String>,
    /// CSS classes
    pub classes: Vec<String>,
    /// Inline style declarations, in order
    pub styles: Vec<(String, String)>,
    /// Child elements
    pub children: Vec<DomElement>,
}

impl Default for DomElement {
    fn default() -> Self {
        Self::new("div")
    }
}

impl DomElement {
    /// Creates a new DOM element with the given tag
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            id: String::new(),
            tag: tag.to_string(),
            text_content: String::new(),
            attributes: BTreeMap::new(),
            classes: Vec::new(),
            styles: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates an element with an ID
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Sets the text content
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text_content = text.to_string();
        self
    }

    /// Adds a class
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    /// Sets an attribute
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    /// Sets an inline style property, replacing an earlier value
    #[must_use]
    pub fn with_style(mut self, property: &str, value: &str) -> Self {
        self.styles.retain(|(p, _)| p != property);
        self.styles.push((property.to_string(), value.to_string()));
        self
    }

    /// Adds a child element
    #[must_use]
    pub fn with_child(mut self, child: DomElement) -> Self {
        self.children.push(child);
        self
    }

    /// Sets an inline style property in place
    pub fn set_style(&mut self, property: &str, value: &str) {
        match self.styles.iter_mut().find(|(p, _)| p == property) {
            Some((_, v)) => *v = value.to_string(),
            None => self.styles.push((property.to_string(), value.to_string())),
        }
    }

    /// Sets an attribute
    pub fn set_attr(&mut self, key: &str, value: &str) {
        self.attributes.insert(key.to_string(), value.to_string());
    }

    /// Checks if element has a class
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Gets an attribute value
    #[must_use]
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Gets an inline style value
    #[must_use]
    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    /// Inline styles as a `style` attribute value
    #[must_use]
    pub fn style_attr(&self) -> String {
        self.styles
            .iter()
            .map(|(p, v)| format!("{p}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Finds this element or a descendant by ID
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&DomElement> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    /// Mutable variant of [`DomElement::find`]
    pub fn find_mut(&mut self, id: &str) -> Option<&mut DomElement> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(id))
    }

    /// Collects this element and all descendants matching `pred`, depth first
    #[must_use]
    pub fn select<F>(&self, pred: F) -> Vec<&DomElement>
    where
        F: Fn(&DomElement) -> bool + Copy,
    {
        let mut found = Vec::new();
        if pred(self) {
            found.push(self);
        }
        for child in &self.children {
            found.extend(child.select(pred));
        }
        found
    }

    /// Serializes the tree as HTML
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        if !self.id.is_empty() {
            let _ = write!(out, " id=\"{}\"", escape(&self.id));
        }
        if !self.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape(&self.classes.join(" ")));
        }
        for (key, value) in &self.attributes {
            let _ = write!(out, " {key}=\"{}\"", escape(value));
        }
        if !self.styles.is_empty() {
            let _ = write!(out, " style=\"{}\"", escape(&self.style_attr()));
        }
        if VOID_TAGS.contains(&self.tag.as_str()) {
            out.push_str(" />");
            return;
        }
        out.push('>');
        out.push_str(&escape(&self.text_content));
        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// DOM events that can be dispatched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// Click event on an element
    Click {
        /// The ID of the clicked element
        element_id: String,
    },
    /// Input event with new value
    Input {
        /// The ID of the input element
        element_id: String,
        /// The new value entered
        value: String,
    },
    /// Key down event
    KeyDown {
        /// The key that was pressed
        key: String,
        /// The ID of the element that had focus, if any
        target_id: Option<String>,
    },
}

impl DomEvent {
    /// Creates a click event
    #[must_use]
    pub fn click(element_id: &str) -> Self {
        Self::Click {
            element_id: element_id.to_string(),
        }
    }

    /// Creates an input event
    #[must_use]
    pub fn input(element_id: &str, value: &str) -> Self {
        Self::Input {
            element_id: element_id.to_string(),
            value: value.to_string(),
        }
    }

    /// Creates a key down event
    #[must_use]
    pub fn key_down(key: &str, target_id: Option<&str>) -> Self {
        Self::KeyDown {
            key: key.to_string(),
            target_id: target_id.map(str::to_string),
        }
    }
}

/// Mock document body for driving the popup without a browser
#[derive(Debug)]
pub struct MockDom {
    /// The `<body>` element
    pub body: DomElement,
    /// Event history for verification
    event_history: Vec<DomEvent>,
    /// Whether text selection is enabled on the body
    user_select: bool,
}

impl Default for MockDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDom {
    /// Creates an empty document
    #[must_use]
    pub fn new() -> Self {
        Self {
            body: DomElement::new("body"),
            event_history: Vec::new(),
            user_select: true,
        }
    }

    /// Appends `element` to the body, replacing any top-level element with
    /// the same ID
    pub fn mount(&mut self, element: DomElement) {
        if !element.id.is_empty() {
            self.unmount(&element.id);
        }
        self.body.children.push(element);
    }

    /// Removes the top-level element with the given ID
    pub fn unmount(&mut self, id: &str) -> bool {
        let before = self.body.children.len();
        self.body.children.retain(|c| c.id != id);
        before != self.body.children.len()
    }

    /// Gets an element by ID
    #[must_use]
    pub fn get_element(&self, id: &str) -> Option<&DomElement> {
        self.body.find(id)
    }

    /// Gets a mutable element by ID
    pub fn get_element_mut(&mut self, id: &str) -> Option<&mut DomElement> {
        self.body.find_mut(id)
    }

    /// Whether `id` names `container_id` itself or one of its descendants
    #[must_use]
    pub fn contains(&self, container_id: &str, id: &str) -> bool {
        self.get_element(container_id)
            .is_some_and(|container| container.find(id).is_some())
    }

    /// Gets element text by ID
    #[must_use]
    pub fn get_element_text(&self, id: &str) -> Option<&str> {
        self.get_element(id).map(|e| e.text_content.as_str())
    }

    /// Gets the `value` of an input by ID
    #[must_use]
    pub fn input_value(&self, id: &str) -> Option<&str> {
        self.get_element(id).map(|e| e.get_attr("value").unwrap_or_default())
    }

    /// Records an event, applying `Input` values to their element
    pub fn dispatch_event(&mut self, event: DomEvent) {
        if let DomEvent::Input { element_id, value } = &event {
            if let Some(elem) = self.get_element_mut(element_id) {
                elem.set_attr("value", value);
            }
        }
        self.event_history.push(event);
    }

    /// Gets the event history
    #[must_use]
    pub fn event_history(&self) -> &[DomEvent] {
        &self.event_history
    }

    /// Clears event history
    pub fn clear_event_history(&mut self) {
        self.event_history.clear();
    }

    /// Enables or disables text selection on the body
    pub fn set_user_select(&mut self, enabled: bool) {
        self.user_select = enabled;
    }

    /// Whether text selection is enabled on the body
    #[must_use]
    pub fn user_select(&self) -> bool {
        self.user_select
    }
}
