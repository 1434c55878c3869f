use leptos::prelude::*;

/// How long a notice stays on screen
const NOTICE_TTL_MS: u32 = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

impl NoticeKind {
    fn class(self) -> &'static str {
        match self {
            NoticeKind::Success => "notice notice--success",
            NoticeKind::Error => "notice notice--error",
            NoticeKind::Info => "notice notice--info",
        }
    }
}

/// A transient user-facing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, text: text.into() }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, text: text.into() }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// App-wide notice banner, provided once from `App`
#[derive(Clone, Copy)]
pub struct NoticeService {
    current: RwSignal<Option<(u64, Notice)>>,
    next_id: StoredValue<u64>,
}

impl NoticeService {
    pub fn new() -> Self {
        Self {
            current: RwSignal::new(None),
            next_id: StoredValue::new(1),
        }
    }

    pub fn show(&self, notice: Notice) {
        if notice.is_error() {
            log::warn!("notice: {}", notice.text);
        }
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        self.current.set(Some((id, notice)));

        // Only clear if no newer notice replaced this one meanwhile
        let current = self.current;
        leptos::task::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(NOTICE_TTL_MS).await;
            let expired = current
                .with_untracked(|c| c.as_ref().map(|(shown, _)| *shown == id).unwrap_or(false));
            if expired {
                current.set(None);
            }
        });
    }

    pub fn success(&self, text: impl Into<String>) {
        self.show(Notice::success(text));
    }

    pub fn error(&self, text: impl Into<String>) {
        self.show(Notice::error(text));
    }

    pub fn dismiss(&self) {
        self.current.set(None);
    }

    pub fn current(&self) -> Option<Notice> {
        self.current.get().map(|(_, n)| n)
    }
}

impl Default for NoticeService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_notice() -> NoticeService {
    use_context::<NoticeService>().expect("NoticeService not provided in context")
}

#[component]
pub fn NoticeBanner() -> impl IntoView {
    let notices = use_notice();

    view! {
        {move || notices.current().map(|notice| view! {
            <div class=notice.kind.class() role="status" on:click=move |_| notices.dismiss()>
                {notice.text}
            </div>
        })}
    }
}
