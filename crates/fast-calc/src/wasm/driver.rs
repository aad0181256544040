//! WASM Driver - popup controller against a mock document
//!
//! Does what the browser glue does (turn DOM events into popup events and
//! apply outcomes to the document), with [`MockDom`] standing in for the
//! page.

use super::dom::{DomEvent, MockDom};
use crate::config::PopupConfig;
use crate::driver::PopupDriver;
use crate::popup::render::{HEADER_ID, OP_ATTR, POPUP_ID, RESULT_ID};
use crate::popup::{Field, Outcome, PopupController, PopupEvent, Position};

/// Driver wrapping a controller and a mock DOM
#[derive(Debug)]
pub struct WasmDriver {
    controller: PopupController,
    dom: MockDom,
}

impl Default for WasmDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl WasmDriver {
    /// Creates a driver with the default config
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(PopupConfig::default())
    }

    /// Creates a driver with a custom config
    #[must_use]
    pub fn with_config(config: PopupConfig) -> Self {
        Self {
            controller: PopupController::new(config),
            dom: MockDom::new(),
        }
    }

    /// Returns the controller
    #[must_use]
    pub fn controller(&self) -> &PopupController {
        &self.controller
    }

    /// Returns the DOM
    #[must_use]
    pub fn dom(&self) -> &MockDom {
        &self.dom
    }

    /// Returns the DOM for placing host-page elements
    pub fn dom_mut(&mut self) -> &mut MockDom {
        &mut self.dom
    }

    /// Releases a selection inside the popup
    pub fn select_inside_popup(&mut self, text: &str) {
        self.send(PopupEvent::Selection {
            text: text.to_string(),
            x: 0,
            y: 0,
            inside_popup: true,
        });
    }

    /// Handles an event and applies the outcome to the DOM
    pub fn send(&mut self, event: PopupEvent) -> Outcome {
        let outcome = self.controller.handle(event);
        self.sync_dom(outcome);
        outcome
    }

    fn sync_dom(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Unchanged => {}
            Outcome::Opened | Outcome::Rerender => {
                if let Some(tree) = self.controller.render() {
                    self.dom.mount(tree);
                }
            }
            Outcome::Moved(position) => {
                if let Some(root) = self.dom.get_element_mut(POPUP_ID) {
                    root.set_style("left", &format!("{}px", position.left));
                    root.set_style("top", &format!("{}px", position.top));
                }
            }
            Outcome::Closed => {
                self.dom.unmount(POPUP_ID);
            }
        }
        self.dom.set_user_select(!self.controller.is_dragging());
    }
}

impl PopupDriver for WasmDriver {
    fn select_text(&mut self, text: &str, x: i32, y: i32) {
        self.send(PopupEvent::DragEnd);
        self.send(PopupEvent::Selection {
            text: text.to_string(),
            x,
            y,
            inside_popup: false,
        });
    }

    fn type_into(&mut self, field: Field, value: &str) {
        if self.dom.get_element(field.id()).is_none() {
            return;
        }
        self.dom.dispatch_event(DomEvent::input(field.id(), value));
        if let Some(event) = PopupEvent::from_input(field.id(), value) {
            self.send(event);
        }
    }

    fn click(&mut self, element_id: &str) {
        let Some(element) = self.dom.get_element(element_id) else {
            return;
        };
        let event = PopupEvent::from_click(element_id, element.get_attr(OP_ATTR))
            .filter(|_| self.dom.contains(POPUP_ID, element_id));
        self.dom.dispatch_event(DomEvent::click(element_id));
        if let Some(event) = event {
            self.send(event);
        }
    }

    fn press_key(&mut self, key: &str, target_id: Option<&str>) {
        self.dom.dispatch_event(DomEvent::key_down(key, target_id));
        self.send(PopupEvent::key(key, target_id));
    }

    fn drag_header(&mut self, from: (i32, i32), to: (i32, i32)) {
        if self.dom.get_element(HEADER_ID).is_none() {
            return;
        }
        self.send(PopupEvent::DragStart {
            x: from.0,
            y: from.1,
        });
        self.send(PopupEvent::DragMove { x: to.0, y: to.1 });
        self.send(PopupEvent::DragEnd);
    }

    fn is_open(&self) -> bool {
        self.dom.get_element(POPUP_ID).is_some()
    }

    fn field_value(&self, field: Field) -> Option<String> {
        self.dom.input_value(field.id()).map(str::to_string)
    }

    fn result_text(&self) -> Option<String> {
        self.dom.get_element_text(RESULT_ID).map(str::to_string)
    }

    fn position(&self) -> Option<Position> {
        let root = self.dom.get_element(POPUP_ID)?;
        let px = |prop: &str| -> Option<i32> {
            root.style(prop)?.trim_end_matches("px").parse().ok()
        };
        Some(Position::new(px("left")?, px("top")?))
    }
}
