//! PageFrame: standard root wrapper for every routed page.

use super::page_standard::*;
use leptos::prelude::*;

/// Root wrapper that sets `id`, `data-page-category` and the BEM modifier class.
#[component]
pub fn PageFrame(
    /// `{entity}--{category}`, e.g. `"a003_reservation--history"`
    page_id: &'static str,
    /// One of the PAGE_CAT_* constants from `page_standard`.
    category: &'static str,
    /// Page heading shown in `page__header`
    #[prop(optional, into)]
    title: Option<String>,
    #[prop(optional)]
    class: &'static str,
    children: Children,
) -> impl IntoView {
    debug_assert!(is_valid_page_id(page_id), "bad page id {page_id}");

    let base_class = match category {
        PAGE_CAT_DETAIL => "page page--detail",
        PAGE_CAT_DASHBOARD => "page page--dashboard",
        PAGE_CAT_AUTH => "page page--auth",
        _ => "page",
    };

    let full_class = if class.is_empty() {
        base_class.to_string()
    } else {
        format!("{base_class} {class}")
    };

    view! {
        <div id=page_id class=full_class data-page-category=category>
            {title.map(|t| view! {
                <div class="page__header">
                    <h1 class="page__title">{t}</h1>
                </div>
            })}
            <div class="page__content">{children()}</div>
        </div>
    }
}
