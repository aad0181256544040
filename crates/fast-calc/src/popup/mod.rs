//! Selection popup controller
//!
//! One [`PopupController`] per page owns everything the popup remembers:
//! the live popup (at most one), the first operand picked up from a
//! selection, and the last computed result. Hosts feed it [`PopupEvent`]s
//! and act on the returned [`Outcome`].
//!
//! ```text
//!            numeric selection (no first operand)
//!  closed ────────────────────────────────────────▶ open
//!    ▲                                               │ numeric selection → fills Y
//!    │          Escape / close button                │ operator / Enter  → result
//!    └───────────────────────────────────────────────┘ clear / use last  → fields
//! ```

mod drag;
pub mod render;

pub use drag::{DragState, Position};
pub use render::render;

use tracing::{debug, trace};

use crate::config::PopupConfig;
use crate::core::numeric::{extract_selection_number, format_number, parse_field};
use crate::core::{CalcError, Evaluator, Operation};
use crate::wasm::DomElement;

/// One of the two operand fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Operand A (`firstNum`)
    First,
    /// Operand B (`secondNum`)
    Second,
}

impl Field {
    /// Element ID of the field's input
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::First => "firstNum",
            Self::Second => "secondNum",
        }
    }

    /// Looks up a field by element ID
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "firstNum" => Some(Self::First),
            "secondNum" => Some(Self::Second),
            _ => None,
        }
    }
}

/// Page and popup events the controller reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupEvent {
    /// Pointer released with some text selected
    Selection {
        /// Raw selected text
        text: String,
        /// Pointer x in viewport pixels
        x: i32,
        /// Pointer y in viewport pixels
        y: i32,
        /// Whether the pointer was released inside the popup
        inside_popup: bool,
    },
    /// A field's text changed
    Input {
        /// Which field
        field: Field,
        /// New text
        value: String,
    },
    /// An operator button was clicked; carries its `data-op` symbol
    OperatorClicked(String),
    /// The clear button was clicked
    ClearClicked,
    /// The close control was clicked
    CloseClicked,
    /// The "Use Last Result" button was clicked
    UseLastResultClicked,
    /// A key was pressed
    Key {
        /// Key name (`"Escape"`, `"Enter"`, ...)
        key: String,
        /// ID of the focused element, if any
        target_id: Option<String>,
    },
    /// Pointer pressed on the header
    DragStart {
        /// Pointer x
        x: i32,
        /// Pointer y
        y: i32,
    },
    /// Pointer moved anywhere on the page
    DragMove {
        /// Pointer x
        x: i32,
        /// Pointer y
        y: i32,
    },
    /// Pointer released anywhere on the page
    DragEnd,
}

impl PopupEvent {
    /// Maps a click on an element to a popup event.
    ///
    /// `data_op` is the element's operator attribute; an element carrying
    /// one is always an operator button.
    #[must_use]
    pub fn from_click(element_id: &str, data_op: Option<&str>) -> Option<Self> {
        if let Some(symbol) = data_op {
            return Some(Self::OperatorClicked(symbol.to_string()));
        }
        match element_id {
            render::CLOSE_ID => Some(Self::CloseClicked),
            render::CLEAR_ID => Some(Self::ClearClicked),
            render::USE_LAST_RESULT_ID => Some(Self::UseLastResultClicked),
            _ => None,
        }
    }

    /// Maps an input event on an element to a popup event
    #[must_use]
    pub fn from_input(element_id: &str, value: &str) -> Option<Self> {
        Field::from_id(element_id).map(|field| Self::Input {
            field,
            value: value.to_string(),
        })
    }

    /// Creates a key event
    #[must_use]
    pub fn key(key: &str, target_id: Option<&str>) -> Self {
        Self::Key {
            key: key.to_string(),
            target_id: target_id.map(str::to_string),
        }
    }
}

/// What the host has to do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing visible changed
    Unchanged,
    /// A new popup replaced whatever was mounted
    Opened,
    /// The popup changed and must be re-rendered
    Rerender,
    /// The popup moved; only its position changed
    Moved(Position),
    /// The popup was removed
    Closed,
}

/// State of the live popup
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    first: String,
    second: String,
    result_text: String,
    active: Option<Operation>,
    position: Position,
    drag: DragState,
}

impl Popup {
    /// Creates a popup seeded with operand A
    #[must_use]
    pub fn new(first: f64, position: Position) -> Self {
        Self {
            first: format_number(first),
            second: String::new(),
            result_text: String::new(),
            active: None,
            position,
            drag: DragState::default(),
        }
    }

    /// Current text of a field
    #[must_use]
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::First => &self.first,
            Field::Second => &self.second,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::First => &mut self.first,
            Field::Second => &mut self.second,
        }
    }

    /// Text of the result line
    #[must_use]
    pub fn result_text(&self) -> &str {
        &self.result_text
    }

    /// The highlighted operator, replayed on Enter
    #[must_use]
    pub const fn active_operator(&self) -> Option<Operation> {
        self.active
    }

    /// Top-left corner in viewport pixels
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Whether the header is being dragged
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }
}

/// Owns the popup and its memory for one page
#[derive(Debug)]
pub struct PopupController {
    config: PopupConfig,
    evaluator: Evaluator,
    first_operand: Option<f64>,
    popup: Option<Popup>,
    last_result: Option<f64>,
}

impl Default for PopupController {
    fn default() -> Self {
        Self::new(PopupConfig::default())
    }
}

impl PopupController {
    /// Creates a controller with no popup
    #[must_use]
    pub fn new(config: PopupConfig) -> Self {
        Self {
            evaluator: config.evaluator(),
            config,
            first_operand: None,
            popup: None,
            last_result: None,
        }
    }

    /// The controller's configuration
    #[must_use]
    pub fn config(&self) -> &PopupConfig {
        &self.config
    }

    /// The live popup, if open
    #[must_use]
    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }

    /// Whether a popup is open
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.popup.is_some()
    }

    /// Operand A as picked up from the opening selection
    #[must_use]
    pub fn first_operand(&self) -> Option<f64> {
        self.first_operand
    }

    /// The most recent successful result
    #[must_use]
    pub fn last_result(&self) -> Option<f64> {
        self.last_result
    }

    /// Whether page text selection should be suppressed
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.popup.as_ref().is_some_and(Popup::is_dragging)
    }

    /// Renders the live popup
    #[must_use]
    pub fn render(&self) -> Option<DomElement> {
        self.popup.as_ref().map(|p| render(p, &self.config))
    }

    /// Applies one event
    pub fn handle(&mut self, event: PopupEvent) -> Outcome {
        trace!(?event, "popup event");
        match event {
            PopupEvent::Selection {
                text,
                x,
                y,
                inside_popup,
            } => {
                if inside_popup {
                    return Outcome::Unchanged;
                }
                self.select(&text, x, y)
            }
            PopupEvent::Input { field, value } => {
                if let Some(popup) = self.popup.as_mut() {
                    *popup.field_mut(field) = value;
                }
                Outcome::Unchanged
            }
            PopupEvent::OperatorClicked(symbol) => self.apply_operator(&symbol),
            PopupEvent::ClearClicked => self.clear(),
            PopupEvent::CloseClicked => self.close(),
            PopupEvent::UseLastResultClicked => self.use_last_result(),
            PopupEvent::Key { key, target_id } => self.key(&key, target_id.as_deref()),
            PopupEvent::DragStart { x, y } => {
                if let Some(popup) = self.popup.as_mut() {
                    popup.drag.begin(x, y, popup.position);
                }
                Outcome::Unchanged
            }
            PopupEvent::DragMove { x, y } => {
                let Some(popup) = self.popup.as_mut() else {
                    return Outcome::Unchanged;
                };
                match popup.drag.track(x, y) {
                    Some(position) => {
                        popup.position = position;
                        Outcome::Moved(position)
                    }
                    None => Outcome::Unchanged,
                }
            }
            PopupEvent::DragEnd => {
                if let Some(popup) = self.popup.as_mut() {
                    popup.drag.end();
                }
                Outcome::Unchanged
            }
        }
    }

    fn select(&mut self, text: &str, x: i32, y: i32) -> Outcome {
        let Some(number) = extract_selection_number(text) else {
            return Outcome::Unchanged;
        };

        if self.first_operand.is_some() {
            if let Some(popup) = self.popup.as_mut() {
                debug!(number, "selection fills second operand");
                popup.second = format_number(number);
                return Outcome::Rerender;
            }
        }

        let offset = self.config.offset_px;
        let position = Position::new(x.saturating_add(offset), y.saturating_add(offset));
        debug!(number, left = position.left, top = position.top, "opening popup");
        self.first_operand = Some(number);
        self.last_result = None;
        self.popup = Some(Popup::new(number, position));
        Outcome::Opened
    }

    fn apply_operator(&mut self, symbol: &str) -> Outcome {
        let Some(popup) = self.popup.as_mut() else {
            return Outcome::Unchanged;
        };

        let op = Operation::from_symbol(symbol);
        popup.active = op.as_ref().ok().copied();

        let (Some(a), Some(b)) = (parse_field(&popup.first), parse_field(&popup.second)) else {
            debug!(first = %popup.first, second = %popup.second, "invalid operand input");
            popup.result_text = CalcError::InvalidInput.display_message();
            return Outcome::Rerender;
        };

        match op.and_then(|op| self.evaluator.calculate(a, b, op)) {
            Ok(value) => {
                debug!(a, b, symbol, value, "evaluated");
                popup.result_text = format!("=: {}", format_number(value));
                self.last_result = Some(value);
            }
            Err(err) => {
                debug!(a, b, symbol, %err, "evaluation failed");
                popup.result_text = err.display_message();
            }
        }
        Outcome::Rerender
    }

    fn clear(&mut self) -> Outcome {
        let Some(popup) = self.popup.as_mut() else {
            return Outcome::Unchanged;
        };
        debug!("clearing popup fields");
        self.first_operand = None;
        popup.first.clear();
        popup.second.clear();
        popup.result_text.clear();
        popup.active = None;
        Outcome::Rerender
    }

    fn close(&mut self) -> Outcome {
        if self.popup.take().is_none() {
            return Outcome::Unchanged;
        }
        debug!("closing popup");
        self.first_operand = None;
        self.last_result = None;
        Outcome::Closed
    }

    fn use_last_result(&mut self) -> Outcome {
        match (self.popup.as_mut(), self.last_result) {
            (Some(popup), Some(value)) => {
                popup.second = format_number(value);
                Outcome::Rerender
            }
            _ => Outcome::Unchanged,
        }
    }

    fn key(&mut self, key: &str, target_id: Option<&str>) -> Outcome {
        match key {
            "Escape" => self.close(),
            "Enter" if target_id.and_then(Field::from_id).is_some() => {
                let active = self.popup.as_ref().and_then(Popup::active_operator);
                match active {
                    Some(op) => self.apply_operator(op.symbol()),
                    None => Outcome::Unchanged,
                }
            }
            _ => Outcome::Unchanged,
        }
    }
}
