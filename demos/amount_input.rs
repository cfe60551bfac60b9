// ============================================================================
// Amount Input Example
// ============================================================================

use futures::channel::oneshot;
use futures::executor::block_on;
use std::sync::Arc;
use tx_amount_core::prelude::*;

fn main() {
    #[cfg(feature = "logging")]
    let _ = tx_amount_core::utils::init_logging(tracing::Level::DEBUG);

    println!("=== Amount Input Example ===\n");

    // Sell form for an 18-decimal token with a balance of 3.5
    let weth = Token::new("weth", 18);
    let balance = TokenAmount::parse_units("3.5", weth.decimals).unwrap_or_default();
    let config = InputConfig::spendable(weth.decimals, balance).with_autofocus(true);

    let on_change = |event: InputEvent| match event {
        InputEvent::ValueChanged { amount } => println!("  -> upstream amount: {} units", amount),
        InputEvent::TextCorrected { previous, text } => {
            println!("  -> text corrected: {:?} -> {:?}", previous, text)
        },
        InputEvent::EditRejected { text, reason } => println!("  -> rejected {:?}: {}", text, reason),
        InputEvent::FocusRequested => println!("  -> focus requested"),
    };
    let mut input = BoundedDecimalInput::new(config, TokenAmount::ZERO, Arc::new(on_change));

    input.activate();
    for keystrokes in ["1", "1.", "1.2", "1.25", "12", "1.2.5", "abc"] {
        println!("Typing {:?}", keystrokes);
        let _ = input.edit(keystrokes);
        println!("  field shows {:?} ({:?})", input.current_text(), input.state());
    }

    println!("\nUpstream recomputes the amount to the full balance");
    input.set_value(balance);
    println!("  field shows {:?}", input.current_text());

    println!("\nView projection: {:?}", input.view());

    // Track the resulting market sell until it is mined
    println!("\n=== Submitting Market Order ===");
    let amount = input.value();
    let list = NotificationList::new();
    let id = list.push(Notification::new(
        NotificationKind::Market { side: Side::Sell },
        weth,
        amount,
        "0x9f3c5e1f00000000000000000000000000000000000000000000000000000001",
    ));

    let (mined_tx, mined_rx) = oneshot::channel::<Result<u64, String>>();
    let confirmation = async move {
        mined_rx
            .await
            .unwrap_or_else(|_| Err("transaction source dropped".to_string()))
    };

    if let Some(item) = list.find(&id) {
        println!("{}", item.title());
        println!("  explorer: {}", item.notification().explorer_url(Some(1)));
    }

    if let Some(observation) = list.watch(id, confirmation) {
        println!("  pending: {:?}", list.is_pending(&id));
        let _ = mined_tx.send(Ok(18_000_000));
        block_on(observation);
        println!("  pending after confirmation: {:?}", list.is_pending(&id));
    }

    list.teardown();
}
