use contracts::system::auth::UserInfo;
use contracts::system::otp::PendingAction;
use web_sys::window;

const TOKEN_KEY: &str = "pal_token";
const USER_KEY: &str = "pal_user";
const PENDING_ACTION_KEY: &str = "pal_pending_action";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

fn get_session_storage() -> Option<web_sys::Storage> {
    window()?.session_storage().ok()?
}

/// Persist token and user JSON after sign-in
pub fn save_session(token: &str, user: &UserInfo) {
    if let Some(storage) = get_local_storage() {
        let _ = storage.set_item(TOKEN_KEY, token);
        match serde_json::to_string(user) {
            Ok(json) => {
                let _ = storage.set_item(USER_KEY, &json);
            }
            Err(e) => log::warn!("Could not serialize user: {}", e),
        }
    }
}

pub fn get_token() -> Option<String> {
    get_local_storage()?
        .get_item(TOKEN_KEY)
        .ok()?
        .filter(|t| !t.is_empty())
}

pub fn clear_session() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(TOKEN_KEY);
        let _ = storage.remove_item(USER_KEY);
    }
}

/// Hand an OTP action to the next page of the flow
pub fn save_pending_action(action: &PendingAction) {
    let Some(storage) = get_session_storage() else {
        return;
    };
    match serde_json::to_string(action) {
        Ok(json) => {
            let _ = storage.set_item(PENDING_ACTION_KEY, &json);
        }
        Err(e) => log::warn!("Could not serialize pending action: {}", e),
    }
}

pub fn load_pending_action() -> Option<PendingAction> {
    let json = get_session_storage()?.get_item(PENDING_ACTION_KEY).ok()??;
    serde_json::from_str(&json)
        .map_err(|e| log::warn!("Dropping unreadable pending action: {}", e))
        .ok()
}

pub fn clear_pending_action() {
    if let Some(storage) = get_session_storage() {
        let _ = storage.remove_item(PENDING_ACTION_KEY);
    }
}
