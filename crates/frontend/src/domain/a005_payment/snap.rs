//! Bridge to the payment gateway's Snap checkout popup (`window.snap`).

use js_sys::{Function, Object, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use crate::shared::config::config;

const SCRIPT_ID: &str = "snap-js";

/// How the checkout popup ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    Success,
    Pending,
    Error,
    Closed,
}

impl PaymentOutcome {
    pub const ALL: [PaymentOutcome; 4] = [
        PaymentOutcome::Success,
        PaymentOutcome::Pending,
        PaymentOutcome::Error,
        PaymentOutcome::Closed,
    ];

    /// Name of the Snap option that reports this outcome
    pub fn callback_name(&self) -> &'static str {
        match self {
            PaymentOutcome::Success => "onSuccess",
            PaymentOutcome::Pending => "onPending",
            PaymentOutcome::Error => "onError",
            PaymentOutcome::Closed => "onClose",
        }
    }

    pub fn from_callback(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.callback_name() == name)
    }

    /// Whether the reservation list should be fetched again
    pub fn needs_refresh(&self) -> bool {
        matches!(self, PaymentOutcome::Success | PaymentOutcome::Pending)
    }

    pub fn message(&self) -> &'static str {
        match self {
            PaymentOutcome::Success => "Pembayaran berhasil",
            PaymentOutcome::Pending => "Pembayaran sedang diproses",
            PaymentOutcome::Error => "Pembayaran gagal, silakan coba lagi",
            PaymentOutcome::Closed => "Jendela pembayaran ditutup sebelum selesai",
        }
    }
}

/// Add the Snap script to the page once; the client key comes from config
pub fn ensure_script() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if document.get_element_by_id(SCRIPT_ID).is_some() {
        return;
    }
    let payment = &config().payment;
    if payment.snap_client_key.is_empty() {
        log::warn!("No Snap client key configured, payments are disabled");
        return;
    }
    let Ok(script) = document.create_element("script") else {
        return;
    };
    script.set_id(SCRIPT_ID);
    let _ = script.set_attribute("src", &payment.snap_script_url);
    let _ = script.set_attribute("data-client-key", &payment.snap_client_key);
    if let Some(body) = document.body() {
        if let Err(e) = body.append_child(&script) {
            log::error!("Failed to add Snap script: {:?}", e);
        }
    }
}

fn snap_pay_function() -> Option<(JsValue, Function)> {
    let window = web_sys::window()?;
    let snap = Reflect::get(&window, &JsValue::from_str("snap")).ok()?;
    if snap.is_undefined() || snap.is_null() {
        return None;
    }
    let pay = Reflect::get(&snap, &JsValue::from_str("pay")).ok()?;
    Some((snap, pay.dyn_into::<Function>().ok()?))
}

/// Open the checkout popup for `token`. `on_outcome` is called with whichever
/// callback Snap fires.
pub fn pay<F>(token: &str, on_outcome: F) -> Result<(), String>
where
    F: Fn(PaymentOutcome) + Clone + 'static,
{
    let (snap, pay) =
        snap_pay_function().ok_or_else(|| "Layanan pembayaran belum siap, coba lagi sebentar".to_string())?;

    let options = Object::new();
    for outcome in PaymentOutcome::ALL {
        let handler = on_outcome.clone();
        let callback = Closure::once_into_js(move |result: JsValue| {
            log::debug!("Snap {}: {:?}", outcome.callback_name(), result);
            handler(outcome);
        });
        Reflect::set(&options, &JsValue::from_str(outcome.callback_name()), &callback)
            .map_err(|e| format!("{:?}", e))?;
    }

    pay.call2(&snap, &JsValue::from_str(token), &options)
        .map_err(|e| format!("{:?}", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callback_names_map_back() {
        assert_eq!(PaymentOutcome::from_callback("onSuccess"), Some(PaymentOutcome::Success));
        assert_eq!(PaymentOutcome::from_callback("onPending"), Some(PaymentOutcome::Pending));
        assert_eq!(PaymentOutcome::from_callback("onError"), Some(PaymentOutcome::Error));
        assert_eq!(PaymentOutcome::from_callback("onClose"), Some(PaymentOutcome::Closed));
        assert_eq!(PaymentOutcome::from_callback("onDone"), None);
    }

    #[test]
    fn test_only_success_and_pending_refresh() {
        let refreshing: Vec<_> = PaymentOutcome::ALL.into_iter().filter(|o| o.needs_refresh()).collect();
        assert_eq!(refreshing, vec![PaymentOutcome::Success, PaymentOutcome::Pending]);
    }
}
