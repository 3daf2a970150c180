pub mod panels;
pub mod timetable;

use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::toast::{ActiveToast, ToastKind, ToastPhase};

pub use panels::panel_page;
pub use timetable::{generate_page, timetable_page, timetables_page};

/// Top-level navigation entry that is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    Data,
    Generate,
    Timetables,
}

const NAV_ACTIVE: &str = "px-3 py-4 text-sm font-medium border-b-2 text-white border-white";
const NAV_IDLE: &str = "px-3 py-4 text-sm font-medium border-b-2 text-indigo-200 border-transparent";

fn nav_link(href: &str, label: &str, active: bool) -> Markup {
    html! {
        a href=(href) class=(if active { NAV_ACTIVE } else { NAV_IDLE }) { (label) }
    }
}

fn toast(t: &ActiveToast) -> Markup {
    let colour = match t.kind {
        ToastKind::Success => "bg-green-600",
        ToastKind::Error => "bg-red-600",
    };
    let motion = match t.phase {
        ToastPhase::Visible => "",
        ToastPhase::Entering | ToastPhase::Leaving => "translate-y-10 opacity-0",
    };
    let icon = match t.kind {
        ToastKind::Success => "fa-check-circle",
        ToastKind::Error => "fa-exclamation-circle",
    };
    html! {
        div
            class={ "px-6 py-3 rounded-lg shadow-lg text-white font-medium transform transition-all duration-300 " (colour) " " (motion) }
            data-toast-id=(t.id)
            data-remaining-ms=(t.remaining.as_millis() as u64)
        {
            div class="flex items-center space-x-2" {
                i class={ "fa-solid " (icon) } {}
                span { (t.message) }
            }
        }
    }
}

/// Page chrome shared by every console page.
pub fn layout(title: &str, nav: Nav, toasts: &[ActiveToast], content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " | Smart Timetable" }
                script src="https://cdn.tailwindcss.com" {}
                link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css";
            }
            body class="bg-gray-50 min-h-screen" {
                nav class="bg-indigo-700 shadow" {
                    div class="max-w-7xl mx-auto px-6 flex items-center space-x-6" {
                        span class="text-white font-bold text-lg mr-6" { "Smart Timetable" }
                        (nav_link("/panels/departments", "Manage Data", nav == Nav::Data))
                        (nav_link("/generate", "Generate", nav == Nav::Generate))
                        (nav_link("/timetables", "Timetables", nav == Nav::Timetables))
                    }
                }
                main class="max-w-7xl mx-auto p-6" { (content) }
                div id="toasts" class="fixed bottom-4 right-4 space-y-2 z-50" {
                    @for t in toasts { (toast(t)) }
                }
                script { (PreEscaped(TOAST_SCRIPT)) }
            }
        }
    }
}

const TOAST_SCRIPT: &str = r#"
document.querySelectorAll('[data-remaining-ms]').forEach(function (el) {
    setTimeout(function () { el.classList.remove('translate-y-10', 'opacity-0'); }, 10);
    setTimeout(function () {
        el.classList.add('translate-y-10', 'opacity-0');
        setTimeout(function () { el.remove(); }, 300);
    }, parseInt(el.dataset.remainingMs, 10));
});
"#;

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn toast_markup_escapes_message_and_carries_lifetime() {
        let markup = toast(&ActiveToast {
            id: 3,
            message: "<b>db error</b>".into(),
            kind: ToastKind::Error,
            phase: ToastPhase::Visible,
            remaining: Duration::from_millis(2500),
        })
        .into_string();

        assert!(markup.contains("bg-red-600"));
        assert!(markup.contains("&lt;b&gt;db error&lt;/b&gt;"));
        assert!(markup.contains(r#"data-remaining-ms="2500""#));
    }

    #[test]
    fn layout_highlights_current_nav() {
        let page = layout("Generate", Nav::Generate, &[], html! { p { "body" } }).into_string();
        assert!(page.contains(&format!(r#"<a href="/generate" class="{}">"#, NAV_ACTIVE)));
        assert!(page.contains(&format!(r#"<a href="/timetables" class="{}">"#, NAV_IDLE)));
    }
}
