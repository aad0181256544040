//! Popup rendering
//!
//! Pure function from popup state to element tree. The tree is rebuilt on
//! every transition; hosts either mount it into a [`MockDom`] or turn it
//! into real nodes.
//!
//! [`MockDom`]: crate::wasm::MockDom

use crate::config::PopupConfig;
use crate::core::Operation;
use crate::popup::{Field, Popup};
use crate::wasm::DomElement;

/// ID of the popup's root element
pub const POPUP_ID: &str = "fast-calc-popup";
/// ID of the drag handle
pub const HEADER_ID: &str = "popup-header";
/// ID of the close control
pub const CLOSE_ID: &str = "closePopup";
/// ID of the result line
pub const RESULT_ID: &str = "res";
/// ID of the clear button
pub const CLEAR_ID: &str = "clearFields";
/// ID of the "Use Last Result" button
pub const USE_LAST_RESULT_ID: &str = "useLastResult";
/// Class shared by the five operator buttons
pub const OP_BUTTON_CLASS: &str = "op-btn";
/// Attribute holding an operator button's symbol
pub const OP_ATTR: &str = "data-op";

/// Element ID of an operator button
#[must_use]
pub const fn op_button_id(op: Operation) -> &'static str {
    match op {
        Operation::Add => "op-add",
        Operation::Subtract => "op-subtract",
        Operation::Multiply => "op-multiply",
        Operation::Divide => "op-divide",
        Operation::Percent => "op-percent",
    }
}

/// Renders the popup as an element tree
#[must_use]
pub fn render(popup: &Popup, config: &PopupConfig) -> DomElement {
    let position = popup.position();
    DomElement::new("div")
        .with_id(POPUP_ID)
        .with_style("position", "fixed")
        .with_style("top", &format!("{}px", position.top))
        .with_style("left", &format!("{}px", position.left))
        .with_style("z-index", &config.z_index.to_string())
        .with_style("opacity", &config.opacity.to_string())
        .with_style("font-family", "sans-serif")
        .with_style("background", "white")
        .with_style("border", "1px solid #ccc")
        .with_style("box-shadow", "0px 0px 10px rgba(0,0,0,0.2)")
        .with_child(header(config))
        .with_child(
            DomElement::new("div")
                .with_style("display", "flex")
                .with_style("padding", "9px")
                .with_child(fields(popup))
                .with_child(operator_column(popup, config)),
        )
}

fn header(config: &PopupConfig) -> DomElement {
    DomElement::new("div")
        .with_id(HEADER_ID)
        .with_style("background", "#eee")
        .with_style("padding", "9px")
        .with_style("cursor", "move")
        .with_style("display", "flex")
        .with_style("justify-content", "space-between")
        .with_style("align-items", "center")
        .with_style("font-weight", "bold")
        .with_style("border-bottom", "2px solid #ccc")
        .with_child(DomElement::new("span").with_text(&config.title))
        .with_child(
            DomElement::new("span")
                .with_id(CLOSE_ID)
                .with_style("cursor", "pointer")
                .with_style("font-size", "18px")
                .with_text("\u{d7}"),
        )
}

fn fields(popup: &Popup) -> DomElement {
    let second = field_input(Field::Second, popup.field(Field::Second))
        .with_attr("placeholder", "select or type");

    DomElement::new("div")
        .with_style("flex", "1")
        .with_child(
            DomElement::new("div")
                .with_text("X: ")
                .with_child(field_input(Field::First, popup.field(Field::First))),
        )
        .with_child(DomElement::new("div").with_text("Y: ").with_child(second))
        .with_child(
            DomElement::new("div")
                .with_id(RESULT_ID)
                .with_style("margin-top", "9px")
                .with_style("font-weight", "bold")
                .with_text(popup.result_text()),
        )
        .with_child(
            DomElement::new("div")
                .with_style("margin-top", "10px")
                .with_style("display", "flex")
                .with_style("gap", "6px")
                .with_child(DomElement::new("button").with_id(CLEAR_ID).with_text("Clear"))
                .with_child(
                    DomElement::new("button")
                        .with_id(USE_LAST_RESULT_ID)
                        .with_text("Use Last Result"),
                ),
        )
}

fn field_input(field: Field, value: &str) -> DomElement {
    DomElement::new("input")
        .with_id(field.id())
        .with_attr("type", "text")
        .with_attr("value", value)
        .with_style("width", "90px")
}

fn operator_column(popup: &Popup, config: &PopupConfig) -> DomElement {
    Operation::ALL.into_iter().fold(
        DomElement::new("div")
            .with_style("display", "flex")
            .with_style("flex-direction", "column")
            .with_style("margin-left", "10px")
            .with_style("gap", "5px"),
        |column, op| {
            let mut button = DomElement::new("button")
                .with_id(op_button_id(op))
                .with_class(OP_BUTTON_CLASS)
                .with_attr(OP_ATTR, op.symbol())
                .with_style("padding", "6px")
                .with_text(op.symbol());
            if popup.active_operator() == Some(op) {
                button = button.with_style("background", &config.active_background);
            }
            column.with_child(button)
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::popup::Position;

    fn popup_at(left: i32, top: i32) -> Popup {
        Popup::new(42.0, Position::new(left, top))
    }

    #[test]
    fn test_render_ids() {
        let tree = render(&popup_at(0, 0), &PopupConfig::default());
        for id in [
            POPUP_ID,
            HEADER_ID,
            CLOSE_ID,
            "firstNum",
            "secondNum",
            RESULT_ID,
            CLEAR_ID,
            USE_LAST_RESULT_ID,
        ] {
            assert!(tree.find(id).is_some(), "missing #{id}");
        }
    }

    #[test]
    fn test_render_position_and_layering() {
        let tree = render(&popup_at(110, 60), &PopupConfig::default());
        assert_eq!(tree.style("position"), Some("fixed"));
        assert_eq!(tree.style("left"), Some("110px"));
        assert_eq!(tree.style("top"), Some("60px"));
        assert_eq!(tree.style("z-index"), Some("99999"));
        assert_eq!(tree.style("opacity"), Some("0.9"));
    }

    #[test]
    fn test_render_seeds_first_field() {
        let tree = render(&popup_at(0, 0), &PopupConfig::default());
        assert_eq!(tree.find("firstNum").unwrap().get_attr("value"), Some("42"));
        let second = tree.find("secondNum").unwrap();
        assert_eq!(second.get_attr("value"), Some(""));
        assert_eq!(second.get_attr("placeholder"), Some("select or type"));
    }

    #[test]
    fn test_render_operator_buttons_in_order() {
        let tree = render(&popup_at(0, 0), &PopupConfig::default());
        let ops: Vec<_> = tree
            .select(|e| e.has_class(OP_BUTTON_CLASS))
            .into_iter()
            .filter_map(|e| e.get_attr(OP_ATTR))
            .collect();
        assert_eq!(ops, vec!["+", "-", "*", "/", "%"]);
    }

    #[test]
    fn test_render_no_active_button_initially() {
        let tree = render(&popup_at(0, 0), &PopupConfig::default());
        assert!(tree
            .select(|e| e.has_class(OP_BUTTON_CLASS))
            .iter()
            .all(|e| e.style("background").is_none()));
    }

    #[test]
    fn test_render_title_from_config() {
        let config = PopupConfig::default().with_title("Sums");
        let tree = render(&popup_at(0, 0), &config);
        let header = tree.find(HEADER_ID).unwrap();
        assert_eq!(header.children[0].text_content, "Sums");
        assert_eq!(tree.find(CLOSE_ID).unwrap().text_content, "\u{d7}");
    }

    #[test]
    fn test_op_button_ids_unique() {
        let ids: std::collections::HashSet<_> =
            Operation::ALL.into_iter().map(op_button_id).collect();
        assert_eq!(ids.len(), Operation::ALL.len());
    }
}
