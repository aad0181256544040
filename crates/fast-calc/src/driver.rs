//! Popup driver
//!
//! **Write the interaction once, run it against any host.** A driver plays
//! user gestures (select, type, click, press, drag) against a mounted popup
//! and reads back what the user would see. The `verify_*` functions are
//! host-independent scenarios.

use crate::core::Operation;
use crate::popup::render::op_button_id;
use crate::popup::{Field, Position};

/// Abstract driver for popup interactions
///
/// # Example
///
/// ```rust
/// use fast_calc::driver::{verify_subtract_then_reuse, PopupDriver};
/// use fast_calc::wasm::WasmDriver;
///
/// let mut driver = WasmDriver::new();
/// verify_subtract_then_reuse(&mut driver);
/// ```
pub trait PopupDriver {
    /// Selects `text` on the page and releases the pointer at `(x, y)`
    fn select_text(&mut self, text: &str, x: i32, y: i32);

    /// Replaces a field's text as if typed
    fn type_into(&mut self, field: Field, value: &str);

    /// Clicks the element with the given ID
    fn click(&mut self, element_id: &str);

    /// Presses a key with focus on `target_id`
    fn press_key(&mut self, key: &str, target_id: Option<&str>);

    /// Drags the header from one pointer position to another
    fn drag_header(&mut self, from: (i32, i32), to: (i32, i32));

    /// Whether the popup is on the page
    fn is_open(&self) -> bool;

    /// Field text, if the popup is open
    fn field_value(&self, field: Field) -> Option<String>;

    /// Result line text, if the popup is open
    fn result_text(&self) -> Option<String>;

    /// Popup position as rendered, if open
    fn position(&self) -> Option<Position>;

    /// Clicks an operator button
    fn click_operator(&mut self, op: Operation) {
        self.click(op_button_id(op));
    }
}

// ===== Host-independent scenarios =====

/// Select, subtract, reuse the result, divide
pub fn verify_subtract_then_reuse<D: PopupDriver>(driver: &mut D) {
    driver.select_text("42", 100, 100);
    assert!(driver.is_open());
    assert_eq!(driver.field_value(Field::First).as_deref(), Some("42"));

    driver.type_into(Field::Second, "8");
    driver.click_operator(Operation::Subtract);
    assert_eq!(driver.result_text().as_deref(), Some("=: 34"));

    driver.click("useLastResult");
    assert_eq!(driver.field_value(Field::Second).as_deref(), Some("34"));

    driver.click_operator(Operation::Divide);
    assert_eq!(driver.result_text().as_deref(), Some("=: 1.24"));
}

/// A blank second operand reports invalid input and keeps the popup
pub fn verify_blank_second_operand<D: PopupDriver>(driver: &mut D) {
    driver.select_text("42", 0, 0);
    driver.click_operator(Operation::Add);
    assert_eq!(driver.result_text().as_deref(), Some("Invalid input."));
    assert!(driver.is_open());
}

/// Escape removes the popup and the next selection starts over
pub fn verify_escape_resets<D: PopupDriver>(driver: &mut D) {
    driver.select_text("42", 0, 0);
    driver.type_into(Field::Second, "8");
    driver.click_operator(Operation::Multiply);
    driver.press_key("Escape", None);
    assert!(!driver.is_open());

    driver.select_text("5", 0, 0);
    assert!(driver.is_open());
    assert_eq!(driver.field_value(Field::First).as_deref(), Some("5"));
    assert_eq!(driver.field_value(Field::Second).as_deref(), Some(""));
    assert_eq!(driver.result_text().as_deref(), Some(""));
}

/// Enter in a field replays the highlighted operator
pub fn verify_enter_replays<D: PopupDriver>(driver: &mut D) {
    driver.select_text("9", 0, 0);
    driver.type_into(Field::Second, "3");
    driver.click_operator(Operation::Divide);
    assert_eq!(driver.result_text().as_deref(), Some("=: 3"));

    driver.type_into(Field::Second, "4");
    driver.press_key("Enter", Some(Field::Second.id()));
    assert_eq!(driver.result_text().as_deref(), Some("=: 2.25"));
}

/// Dragging the header moves the popup without touching its fields
pub fn verify_drag<D: PopupDriver>(driver: &mut D) {
    driver.select_text("1", 50, 50);
    let start = driver.position().unwrap_or_default();
    driver.drag_header(
        (start.left + 5, start.top + 5),
        (start.left + 105, start.top + 55),
    );
    assert_eq!(
        driver.position(),
        Some(Position::new(start.left + 100, start.top + 50))
    );
    assert_eq!(driver.field_value(Field::First).as_deref(), Some("1"));
}

/// Complete verification suite, each scenario on a fresh driver
pub fn run_all_scenarios<D: PopupDriver>(mut fresh: impl FnMut() -> D) {
    verify_subtract_then_reuse(&mut fresh());
    verify_blank_second_operand(&mut fresh());
    verify_escape_resets(&mut fresh());
    verify_enter_replays(&mut fresh());
    verify_drag(&mut fresh());
}
