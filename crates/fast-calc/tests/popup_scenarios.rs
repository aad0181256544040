//! End-to-end popup scenarios against the mock DOM
//!
//! Each test plays gestures through [`WasmDriver`] and checks only what a
//! user would see on the page.

use fast_calc::driver::{run_all_scenarios, PopupDriver};
use fast_calc::popup::render::OP_BUTTON_CLASS;
use fast_calc::prelude::*;

fn open_with(first: &str) -> WasmDriver {
    let mut driver = WasmDriver::new();
    driver.select_text(first, 0, 0);
    driver
}

fn highlighted_button(el: &DomElement) -> bool {
    el.has_class(OP_BUTTON_CLASS) && el.style("background").is_some()
}

fn result(driver: &WasmDriver) -> String {
    driver.result_text().unwrap_or_default()
}

// ===== Shared scenario suite =====

#[test]
fn test_all_scenarios() {
    run_all_scenarios(WasmDriver::new);
}

// ===== Selection =====

#[test]
fn test_non_numeric_selection_keeps_page_untouched() {
    let mut driver = WasmDriver::new();
    driver.select_text("hello world", 10, 10);
    driver.select_text("1.2.3", 10, 10);
    assert!(!driver.is_open());
    assert!(driver.dom().body.children.is_empty());
}

#[test]
fn test_selection_strips_currency_and_units() {
    let driver = open_with("-7 kg");
    assert_eq!(driver.field_value(Field::First).as_deref(), Some("-7"));

    let driver = open_with("Total: $1,234.50");
    assert_eq!(driver.field_value(Field::First).as_deref(), Some("1234.5"));
}

#[test]
fn test_second_selection_fills_second_field_in_place() {
    let mut driver = WasmDriver::new();
    driver.select_text("10", 0, 0);
    driver.select_text("2.5", 300, 300);

    assert_eq!(driver.position(), Some(Position::new(10, 10)));
    assert_eq!(driver.field_value(Field::First).as_deref(), Some("10"));
    assert_eq!(driver.field_value(Field::Second).as_deref(), Some("2.5"));

    driver.click_operator(Operation::Add);
    assert_eq!(result(&driver), "=: 12.5");
}

#[test]
fn test_popup_opens_offset_from_pointer() {
    let mut driver = WasmDriver::new();
    driver.select_text("1", 200, 75);
    assert_eq!(driver.position(), Some(Position::new(210, 85)));

    let config = PopupConfig::default().with_offset(0);
    let mut driver = WasmDriver::with_config(config);
    driver.select_text("1", 200, 75);
    assert_eq!(driver.position(), Some(Position::new(200, 75)));
}

// ===== Operators =====

#[test]
fn test_each_operator_from_the_popup() {
    let cases = [
        (Operation::Add, "=: 215"),
        (Operation::Subtract, "=: 185"),
        (Operation::Multiply, "=: 3000"),
        (Operation::Divide, "=: 13.33"),
        (Operation::Percent, "=: 30"),
    ];
    for (op, expected) in cases {
        let mut driver = open_with("200");
        driver.type_into(Field::Second, "15");
        driver.click_operator(op);
        assert_eq!(result(&driver), expected, "operator {op}");
    }
}

#[test]
fn test_division_by_zero_shows_infinity() {
    let mut driver = open_with("5");
    driver.type_into(Field::Second, "0");
    driver.click_operator(Operation::Divide);
    assert_eq!(result(&driver), "=: Infinity");

    driver.click("useLastResult");
    assert_eq!(
        driver.field_value(Field::Second).as_deref(),
        Some("Infinity")
    );
}

#[test]
fn test_division_by_zero_as_error_when_configured() {
    let config = PopupConfig::default().with_division_policy(DivisionPolicy::Error);
    let mut driver = WasmDriver::with_config(config);
    driver.select_text("5", 0, 0);
    driver.type_into(Field::Second, "0");
    driver.click_operator(Operation::Divide);
    assert_eq!(result(&driver), "Error: Division by zero");
    assert!(driver.controller().last_result().is_none());
}

#[test]
fn test_typed_fields_use_prefix_rules() {
    let mut driver = open_with("1");
    driver.type_into(Field::First, "12px");
    driver.type_into(Field::Second, "1,000");
    driver.click_operator(Operation::Add);
    assert_eq!(result(&driver), "=: 1012");
}

#[test]
fn test_large_results_use_exponent_form() {
    let mut driver = open_with("1");
    driver.type_into(Field::First, "1e21");
    driver.click("op-multiply");
    assert_eq!(result(&driver), "Invalid input.");

    driver.type_into(Field::Second, "1");
    driver.click("op-multiply");
    assert_eq!(result(&driver), "=: 1e+21");
}

#[test]
fn test_unknown_operator_highlights_nothing() {
    let mut driver = open_with("4");
    driver.type_into(Field::Second, "2");
    driver.click_operator(Operation::Add);
    driver.send(PopupEvent::OperatorClicked("^".into()));

    assert_eq!(result(&driver), "Error: Invalid operator");
    let root = driver.dom().get_element("fast-calc-popup").unwrap();
    let highlighted = root.select(highlighted_button);
    assert!(highlighted.is_empty());
}

#[test]
fn test_exactly_one_button_highlighted() {
    let mut driver = open_with("4");
    driver.type_into(Field::Second, "2");
    driver.click_operator(Operation::Add);
    driver.click_operator(Operation::Divide);

    let root = driver.dom().get_element("fast-calc-popup").unwrap();
    let highlighted = root.select(highlighted_button);
    assert_eq!(highlighted.len(), 1);
    assert_eq!(highlighted[0].id, "op-divide");
}

// ===== Keyboard =====

#[test]
fn test_enter_without_operator_does_nothing() {
    let mut driver = open_with("3");
    driver.type_into(Field::Second, "4");
    driver.press_key("Enter", Some("secondNum"));
    assert_eq!(result(&driver), "");
}

#[test]
fn test_enter_outside_fields_does_nothing() {
    let mut driver = open_with("3");
    driver.type_into(Field::Second, "4");
    driver.click_operator(Operation::Add);
    driver.type_into(Field::Second, "10");
    driver.press_key("Enter", None);
    assert_eq!(result(&driver), "=: 7");
    driver.press_key("Enter", Some("firstNum"));
    assert_eq!(result(&driver), "=: 13");
}

#[test]
fn test_escape_without_popup_is_harmless() {
    let mut driver = WasmDriver::new();
    driver.press_key("Escape", None);
    assert!(!driver.is_open());
}

// ===== Clear / last result =====

#[test]
fn test_use_last_result_before_any_calculation() {
    let mut driver = open_with("3");
    driver.type_into(Field::Second, "8");
    driver.click("useLastResult");
    assert_eq!(driver.field_value(Field::Second).as_deref(), Some("8"));
}

#[test]
fn test_clear_then_new_selection_starts_without_last_result() {
    let mut driver = open_with("6");
    driver.type_into(Field::Second, "7");
    driver.click_operator(Operation::Multiply);
    driver.click("clearFields");

    assert!(driver.is_open());
    assert_eq!(driver.field_value(Field::First).as_deref(), Some(""));
    assert_eq!(driver.field_value(Field::Second).as_deref(), Some(""));
    assert_eq!(result(&driver), "");

    driver.select_text("3", 100, 100);
    assert_eq!(driver.position(), Some(Position::new(110, 110)));
    assert_eq!(driver.field_value(Field::First).as_deref(), Some("3"));

    driver.click("useLastResult");
    assert_eq!(driver.field_value(Field::Second).as_deref(), Some(""));
    assert!(driver.controller().last_result().is_none());
}

#[test]
fn test_escape_forgets_last_result() {
    let mut driver = open_with("6");
    driver.type_into(Field::Second, "7");
    driver.click_operator(Operation::Multiply);
    driver.press_key("Escape", None);

    driver.select_text("1", 0, 0);
    driver.click("useLastResult");
    assert_eq!(driver.field_value(Field::Second).as_deref(), Some(""));
}

// ===== Drag =====

#[test]
fn test_drag_without_popup_is_ignored() {
    let mut driver = WasmDriver::new();
    driver.drag_header((0, 0), (50, 50));
    assert_eq!(driver.position(), None);
}

#[test]
fn test_moves_after_release_do_not_drag() {
    let mut driver = open_with("1");
    driver.drag_header((15, 15), (35, 25));
    assert_eq!(driver.position(), Some(Position::new(30, 20)));

    driver.send(PopupEvent::DragMove { x: 500, y: 500 });
    assert_eq!(driver.position(), Some(Position::new(30, 20)));
}

#[test]
fn test_rerender_keeps_dragged_position() {
    let mut driver = open_with("8");
    driver.drag_header((15, 15), (115, 15));
    driver.type_into(Field::Second, "2");
    driver.click_operator(Operation::Divide);
    assert_eq!(result(&driver), "=: 4");
    assert_eq!(driver.position(), Some(Position::new(110, 10)));
}
