//! Browser bindings
//!
//! Page events are translated into [`PopupEvent`]s for a single shared
//! [`PopupController`]; each [`Outcome`] is applied to the live document by
//! rebuilding the popup from its rendered [`DomElement`] tree.

// Only compiled with the `wasm` feature (see mod.rs)

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    console, Document, Element, Event, HtmlElement, HtmlInputElement, HtmlSelectElement,
    KeyboardEvent, MouseEvent, Node,
};

use super::dom::DomElement;
use crate::config::PopupConfig;
use crate::popup::render::{CLOSE_ID, HEADER_ID, OP_ATTR, POPUP_ID};
use crate::popup::{Outcome, PopupController, PopupEvent};
use crate::quick::{QuickForm, CALC_BUTTON_ID, NUM1_ID, NUM2_ID, OPERATION_ID, OUTPUT_ID};

/// Page-wide state shared by the listeners
#[derive(Debug)]
struct ContentScript {
    controller: PopupController,
    /// Inline body `user-select` from before the current drag
    saved_user_select: Option<String>,
}

type SharedState = Rc<RefCell<ContentScript>>;

/// How the drag state changed across one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragEdge {
    Started,
    Ended,
}

const fn drag_edge(was_dragging: bool, is_dragging: bool) -> Option<DragEdge> {
    match (was_dragging, is_dragging) {
        (false, true) => Some(DragEdge::Started),
        (true, false) => Some(DragEdge::Ended),
        _ => None,
    }
}

/// Initialize the module in the browser
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console::log_1(&"Fast Calc WASM initialized".into());
}

/// Attaches the selection popup to the current page.
///
/// `config_json` is an optional [`PopupConfig`] in JSON form.
///
/// # Errors
///
/// Fails when the config does not parse or the page has no document.
#[wasm_bindgen]
pub fn start_content_script(config_json: Option<String>) -> Result<(), JsValue> {
    let config = load_config(config_json.as_deref())?;
    let document = document()?;
    let state: SharedState = Rc::new(RefCell::new(ContentScript {
        controller: PopupController::new(config),
        saved_user_select: None,
    }));

    listen(&document, &state, "mouseup", |event| {
        let mut events = vec![PopupEvent::DragEnd];
        if let Some(selection) = selection_event(event) {
            events.push(selection);
        }
        events
    })?;
    listen(&document, &state, "mousedown", |event| {
        let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
            return Vec::new();
        };
        let on_header = popup_target(event).is_some_and(|el| {
            el.id() != CLOSE_ID
                && el
                    .closest(&format!("#{HEADER_ID}"))
                    .ok()
                    .flatten()
                    .is_some()
        });
        if !on_header {
            return Vec::new();
        }
        vec![PopupEvent::DragStart {
            x: mouse.client_x(),
            y: mouse.client_y(),
        }]
    })?;
    listen(&document, &state, "mousemove", |event| {
        event
            .dyn_ref::<MouseEvent>()
            .map(|mouse| PopupEvent::DragMove {
                x: mouse.client_x(),
                y: mouse.client_y(),
            })
            .into_iter()
            .collect()
    })?;
    listen(&document, &state, "keydown", |event| {
        let Some(keyboard) = event.dyn_ref::<KeyboardEvent>() else {
            return Vec::new();
        };
        let target_id = popup_target(event)
            .map(|el| el.id())
            .filter(|id| !id.is_empty());
        vec![PopupEvent::key(&keyboard.key(), target_id.as_deref())]
    })?;
    listen(&document, &state, "click", |event| {
        let Some(element) = popup_target(event) else {
            return Vec::new();
        };
        let data_op = element.get_attribute(OP_ATTR);
        PopupEvent::from_click(&element.id(), data_op.as_deref())
            .into_iter()
            .collect()
    })?;
    listen(&document, &state, "input", |event| {
        let Some(input) =
            popup_target(event).and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        else {
            return Vec::new();
        };
        PopupEvent::from_input(&input.id(), &input.value())
            .into_iter()
            .collect()
    })?;

    console::log_1(&"Fast Calc content script attached".into());
    Ok(())
}

/// Wires the toolbar popup form (`num1`, `num2`, `operation`, `calcBtn`,
/// `output`).
///
/// # Errors
///
/// Fails when the config does not parse or the button is missing.
#[wasm_bindgen]
pub fn start_quick_calc(config_json: Option<String>) -> Result<(), JsValue> {
    let evaluator = load_config(config_json.as_deref())?.evaluator();
    let document = document()?;
    let button = document
        .get_element_by_id(CALC_BUTTON_ID)
        .ok_or_else(|| JsValue::from_str("calculate button not found"))?;

    let page = document.clone();
    let closure = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
        let value = |id: &str| {
            page.get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                .map(|input| input.value())
                .unwrap_or_default()
        };
        let operation = page
            .get_element_by_id(OPERATION_ID)
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
            .map(|select| select.value())
            .unwrap_or_default();
        let form = QuickForm::new(&value(NUM1_ID), &value(NUM2_ID), &operation);
        if let Some(output) = page.get_element_by_id(OUTPUT_ID) {
            output.set_text_content(Some(&form.compute(&evaluator)));
        }
    });
    button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn load_config(json: Option<&str>) -> Result<PopupConfig, JsValue> {
    match json {
        Some(json) => PopupConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string())),
        None => Ok(PopupConfig::default()),
    }
}

fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

/// The event target, if it sits inside the mounted popup
fn popup_target(event: &Event) -> Option<Element> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let popup = document().ok()?.get_element_by_id(POPUP_ID)?;
    let node: &Node = target.as_ref();
    popup.contains(Some(node)).then_some(target)
}

/// Reads the page selection at pointer release
fn selection_event(event: &Event) -> Option<PopupEvent> {
    let mouse = event.dyn_ref::<MouseEvent>()?;
    let selection = web_sys::window()?.get_selection().ok()??;
    Some(PopupEvent::Selection {
        text: selection.to_string().into(),
        x: mouse.client_x(),
        y: mouse.client_y(),
        inside_popup: popup_target(event).is_some(),
    })
}

/// Registers a document listener feeding the shared controller
fn listen(
    document: &Document,
    state: &SharedState,
    kind: &str,
    translate: impl Fn(&Event) -> Vec<PopupEvent> + 'static,
) -> Result<(), JsValue> {
    let state = Rc::clone(state);
    let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        for popup_event in translate(&event) {
            dispatch(&state, popup_event);
        }
    });
    document.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn dispatch(state: &SharedState, event: PopupEvent) {
    let mut state = state.borrow_mut();
    let was_dragging = state.controller.is_dragging();
    let outcome = state.controller.handle(event);
    let edge = drag_edge(was_dragging, state.controller.is_dragging());
    let applied = apply(&state.controller, outcome).and_then(|()| match edge {
        Some(edge) => toggle_user_select(&mut state, edge),
        None => Ok(()),
    });
    if let Err(err) = applied {
        console::error_1(&err);
    }
}

/// Suppresses page text selection for the length of a drag
fn toggle_user_select(state: &mut ContentScript, edge: DragEdge) -> Result<(), JsValue> {
    let style = body(&document()?)?.style();
    match edge {
        DragEdge::Started => {
            state.saved_user_select = Some(style.get_property_value("user-select")?);
            style.set_property("user-select", "none")
        }
        DragEdge::Ended => {
            let saved = state.saved_user_select.take().unwrap_or_default();
            style.set_property("user-select", &saved)
        }
    }
}

/// Applies an outcome to the live document
fn apply(controller: &PopupController, outcome: Outcome) -> Result<(), JsValue> {
    let document = document()?;
    match outcome {
        Outcome::Unchanged => {}
        Outcome::Opened | Outcome::Rerender => {
            if let Some(tree) = controller.render() {
                let focused = document
                    .active_element()
                    .map(|el| el.id())
                    .filter(|id| !id.is_empty() && tree.find(id).is_some());
                let node = build_node(&document, &tree)?;
                match document.get_element_by_id(POPUP_ID) {
                    Some(old) => old.replace_with_with_node_1(&node)?,
                    None => {
                        body(&document)?.append_child(&node)?;
                    }
                }
                if let Some(field) = focused
                    .and_then(|id| document.get_element_by_id(&id))
                    .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                {
                    field.focus()?;
                }
            }
        }
        Outcome::Moved(position) => {
            if let Some(root) = document
                .get_element_by_id(POPUP_ID)
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            {
                let style = root.style();
                style.set_property("left", &format!("{}px", position.left))?;
                style.set_property("top", &format!("{}px", position.top))?;
            }
        }
        Outcome::Closed => {
            if let Some(old) = document.get_element_by_id(POPUP_ID) {
                old.remove();
            }
        }
    }
    Ok(())
}

fn body(document: &Document) -> Result<HtmlElement, JsValue> {
    document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))
}

/// Builds real nodes for a rendered tree
fn build_node(document: &Document, element: &DomElement) -> Result<Element, JsValue> {
    let node = document.create_element(&element.tag)?;
    if !element.id.is_empty() {
        node.set_id(&element.id);
    }
    if !element.classes.is_empty() {
        node.set_class_name(&element.classes.join(" "));
    }
    for (key, value) in &element.attributes {
        node.set_attribute(key, value)?;
    }
    if !element.styles.is_empty() {
        node.set_attribute("style", &element.style_attr())?;
    }
    if !element.text_content.is_empty() {
        node.set_text_content(Some(&element.text_content));
    }
    for child in &element.children {
        node.append_child(&build_node(document, child)?)?;
    }
    Ok(node)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_edge_only_on_change() {
        assert_eq!(drag_edge(false, false), None);
        assert_eq!(drag_edge(true, true), None);
        assert_eq!(drag_edge(false, true), Some(DragEdge::Started));
        assert_eq!(drag_edge(true, false), Some(DragEdge::Ended));
    }
}
