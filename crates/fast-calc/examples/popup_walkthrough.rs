//! Selection Popup Walkthrough
//!
//! Plays a user session against the mock DOM and prints what the page
//! would show after each step.
//!
//! Run with: RUST_LOG=fast_calc=debug cargo run --example popup_walkthrough

use fast_calc::driver::{run_all_scenarios, PopupDriver};
use fast_calc::popup::render::POPUP_ID;
use fast_calc::popup::Field;
use fast_calc::prelude::Operation;
use fast_calc::wasm::WasmDriver;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Fast Calc - selection popup walkthrough");
    println!("=======================================");

    let mut driver = WasmDriver::new();

    println!("\n1. Select \"Subtotal: $1,299.99\" and release at (120, 80)");
    driver.select_text("Subtotal: $1,299.99", 120, 80);
    show(&driver);

    println!("\n2. Type 0.2 into the second field and click %");
    driver.type_into(Field::Second, "0.2");
    driver.click_operator(Operation::Percent);
    show(&driver);

    println!("\n3. Use the last result and subtract");
    driver.click("useLastResult");
    driver.click_operator(Operation::Subtract);
    show(&driver);

    println!("\n4. Drag the header 200px right");
    if let Some(at) = driver.position() {
        driver.drag_header((at.left + 5, at.top + 5), (at.left + 205, at.top + 5));
    }
    show(&driver);

    println!("\n5. Divide by zero");
    driver.type_into(Field::Second, "0");
    driver.click_operator(Operation::Divide);
    show(&driver);

    println!("\nDOM events recorded:");
    for (i, event) in driver.dom().event_history().iter().enumerate() {
        println!("   [{i}] {event:?}");
    }

    if let Some(popup) = driver.dom().get_element(POPUP_ID) {
        println!("\nMounted markup:\n{}", popup.to_html());
    }

    println!("\n6. Escape closes the popup");
    driver.press_key("Escape", None);
    println!("   open: {}", driver.is_open());

    println!("\nRunning the scenario suite...");
    run_all_scenarios(WasmDriver::new);
    println!("All scenarios passed.");
}

fn show(driver: &WasmDriver) {
    println!(
        "   A = {:?}  B = {:?}  result = {:?}  at {:?}",
        driver.field_value(Field::First).unwrap_or_default(),
        driver.field_value(Field::Second).unwrap_or_default(),
        driver.result_text().unwrap_or_default(),
        driver.position(),
    );
}
