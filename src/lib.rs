use js_sys::Function;
use serde::Deserialize;
use wasm_bindgen::prelude::*;

pub mod card;
pub mod deck;
pub mod error;
pub mod game;
pub mod hand;
pub mod resolver;
pub mod settings;
pub mod sim;
pub mod stats;
pub mod strategy;

pub use card::{card_value, Card, Rank, Suit};
pub use error::ResolveError;
pub use game::{GameState, RoundStatus, Session};
pub use hand::{hand_value, has_soft_ace, Hand};
pub use resolver::{
    classify_outcome, resolve_dealer_play, resolve_round, resolve_round_from_pile, Outcome,
    Resolution,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RoundInput {
    player_hand: Hand,
    dealer_hand: Hand,
    /// Cards the dealer draws, in order.
    draw_pile: Vec<Card>,
}

#[wasm_bindgen(js_name = handValue)]
pub fn hand_value_js(cards: &JsValue) -> Result<u32, JsValue> {
    console_error_panic_hook::set_once();
    let hand: Hand = serde_wasm_bindgen::from_value(cards.clone())
        .map_err(|err| JsValue::from_str(&format!("Invalid hand: {err}")))?;
    Ok(hand.value())
}

#[wasm_bindgen(js_name = cardValue)]
pub fn card_value_js(rank: &str) -> Result<u8, JsValue> {
    console_error_panic_hook::set_once();
    card_value(rank).map_err(|err| JsValue::from_str(&err.to_string()))
}

#[wasm_bindgen(js_name = classifyOutcome)]
pub fn classify_outcome_js(player_value: u32, dealer_value: u32) -> String {
    console_error_panic_hook::set_once();
    classify_outcome(player_value, dealer_value).to_string()
}

#[wasm_bindgen(js_name = resolveRound)]
pub fn resolve_round_js(params: &JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();
    let input: RoundInput = serde_wasm_bindgen::from_value(params.clone())
        .map_err(|err| JsValue::from_str(&format!("Invalid input: {err}")))?;

    let resolution = resolver::resolve_round_from_pile(
        &input.player_hand,
        input.dealer_hand,
        input.draw_pile,
    )
    .map_err(|err| JsValue::from_str(&format!("Resolution failed: {err}")))?;

    serde_wasm_bindgen::to_value(&resolution)
        .map_err(|err| JsValue::from_str(&format!("Serialization failed: {err}")))
}

#[wasm_bindgen(js_name = playSession)]
pub fn play_session(params: &JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();
    let input: sim::SessionInput = serde_wasm_bindgen::from_value(params.clone())
        .map_err(|err| JsValue::from_str(&format!("Invalid input: {err}")))?;

    let report = sim::run(input)
        .map_err(|err| JsValue::from_str(&format!("Session failed: {err}")))?;

    serde_wasm_bindgen::to_value(&report)
        .map_err(|err| JsValue::from_str(&format!("Serialization failed: {err}")))
}

#[wasm_bindgen(js_name = playSessionWithProgress)]
pub fn play_session_with_progress(
    params: &JsValue,
    progress_callback: &Function,
) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();
    let input: sim::SessionInput = serde_wasm_bindgen::from_value(params.clone())
        .map_err(|err| JsValue::from_str(&format!("Invalid input: {err}")))?;

    let mut progress_cb = |current: u32, total: u32| {
        let _ = progress_callback.call2(
            &JsValue::NULL,
            &JsValue::from(current),
            &JsValue::from(total),
        );
    };

    let report = sim::run_with_progress(input, &mut progress_cb)
        .map_err(|err| JsValue::from_str(&format!("Session failed: {err}")))?;

    serde_wasm_bindgen::to_value(&report)
        .map_err(|err| JsValue::from_str(&format!("Serialization failed: {err}")))
}
