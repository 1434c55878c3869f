//! List UI helpers: debounced search box and sort indicators
use super::poll::{accept_ticket, issue_ticket, PollGuard};
use super::record_set::SortDirection;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;

const SEARCH_DEBOUNCE_MS: u32 = 300;

/// An outside value that differs from the typed text replaces it and makes
/// any debounce still pending stale.
fn follow_external(typing: &mut PollGuard, external: &str, typed: &str) -> bool {
    if external == typed {
        return false;
    }
    typing.invalidate();
    true
}

/// Search box with debounce and a clear button
#[component]
pub fn SearchInput(
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Cari...".to_string()
    } else {
        placeholder
    };

    // Local input text until the debounce fires
    let input_value = RwSignal::new(value.get_untracked());
    let pending = StoredValue::new_local(None::<Timeout>);
    let typing = StoredValue::new(PollGuard::new());

    // Follow external resets (e.g. collection switch)
    Effect::new(move |_| {
        let external = value.get();
        let replaced = typing
            .try_update_value(|g| input_value.with_untracked(|typed| follow_external(g, &external, typed)))
            .unwrap_or(false);
        if replaced {
            pending.set_value(None);
            input_value.set(external);
        }
    });

    let handle_input = move |text: String| {
        input_value.set(text.clone());
        let Some(ticket) = issue_ticket(typing) else {
            return;
        };
        let timeout = Timeout::new(SEARCH_DEBOUNCE_MS, move || {
            if accept_ticket(typing, ticket, "search") {
                on_change.run(text);
            }
        });
        // Dropping the previous Timeout cancels it
        pending.set_value(Some(timeout));
    };

    let clear = move |_| {
        typing.update_value(|g| g.invalidate());
        pending.set_value(None);
        input_value.set(String::new());
        on_change.run(String::new());
    };

    let is_active = move || !value.get().trim().is_empty();

    view! {
        <div class="search-input" class:search-input--active=is_active>
            <input
                type="search"
                placeholder=placeholder
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" on:click=clear title="Hapus">
                    {crate::shared::icons::icon("x")}
                </button>
            </Show>
        </div>
    }
}

/// Indicator shown next to a sortable header
pub fn get_sort_indicator(current_field: &str, field: &str, direction: SortDirection) -> &'static str {
    if current_field != field {
        " ⇅"
    } else if direction.is_ascending() {
        " ▲"
    } else {
        " ▼"
    }
}

pub fn get_sort_class(current_field: &str, field: &str) -> &'static str {
    if current_field == field {
        "sortable sortable--active"
    } else {
        "sortable"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outside_reset_drops_pending_search() {
        let mut typing = PollGuard::new();
        let ticket = typing.issue();
        // Debounced text already applied outside: nothing to replace
        assert!(!follow_external(&mut typing, "abc", "abc"));
        assert!(typing.is_current(ticket));
        // Collection switch clears the query while "abc" is still pending
        assert!(follow_external(&mut typing, "", "abc"));
        assert!(!typing.is_current(ticket));
    }

    #[test]
    fn test_sort_indicator() {
        assert_eq!(get_sort_indicator("name", "id", SortDirection::Ascending), " ⇅");
        assert_eq!(get_sort_indicator("id", "id", SortDirection::Ascending), " ▲");
        assert_eq!(get_sort_indicator("id", "id", SortDirection::Descending), " ▼");
        assert_eq!(get_sort_class("id", "id"), "sortable sortable--active");
    }
}
