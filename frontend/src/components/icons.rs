use yew::prelude::*;

use crate::format::Icon;

fn icon_base(paths: &'static [&'static str], class: &'static str) -> Html {
    html! {
        <svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" class={class}>
            { for paths.iter().map(|path| html! { <path d={*path}></path> }) }
        </svg>
    }
}

fn paths(icon: Icon) -> &'static [&'static str] {
    match icon {
        Icon::ArrowLeft => &["M19 12H5", "M12 19l-7-7 7-7"],
        Icon::ArrowUpDown => &["M7 3v18", "M3 7l4-4 4 4", "M17 21V3", "M21 17l-4 4-4-4"],
        Icon::Banknote => &["M2 6h20v12H2z", "M12 12m-2 0a2 2 0 104 0 2 2 0 10-4 0", "M6 12h.01M18 12h.01"],
        Icon::Building => &["M4 21V3h10v18", "M14 9h6v12h-6", "M8 7h2M8 11h2M8 15h2", "M2 21h20"],
        Icon::Calendar => &["M3 5h18v16H3z", "M16 3v4M8 3v4", "M3 10h18"],
        Icon::ChevronLeft => &["M15 18l-6-6 6-6"],
        Icon::ChevronRight => &["M9 18l6-6-6-6"],
        Icon::Clock => &["M12 12m-9 0a9 9 0 1018 0 9 9 0 10-18 0", "M12 7v5l3 3"],
        Icon::CreditCard => &["M3 7h18v10H3z", "M3 11h18"],
        Icon::DollarSign => &["M12 2v20", "M17 5H9.5a3.5 3.5 0 000 7h5a3.5 3.5 0 010 7H6"],
        Icon::Edit => &["M11 4H4v16h16v-7", "M18.5 2.5a2.1 2.1 0 013 3L12 15l-4 1 1-4z"],
        Icon::FileText => &["M14 2H6v20h12V6z", "M14 2v4h4", "M8 13h8M8 17h8"],
        Icon::Globe => &["M12 12m-10 0a10 10 0 1020 0 10 10 0 10-20 0", "M2 12h20", "M12 2a15 15 0 010 20 15 15 0 010-20"],
        Icon::LayoutGrid => &["M3 3h8v8H3zM13 3h8v8h-8zM3 13h8v8H3zM13 13h8v8h-8z"],
        Icon::Pause => &["M6 4h4v16H6zM14 4h4v16h-4z"],
        Icon::Play => &["M5 3l14 9-14 9z"],
        Icon::Plus => &["M12 5v14M5 12h14"],
        Icon::Smartphone => &["M7 2h10v20H7z", "M12 18h.01"],
        Icon::Trash => &["M3 6h18", "M8 6V4h8v2", "M19 6l-1 14H6L5 6"],
        Icon::TrendingDown => &["M3 7l6 6 4-4 8 8", "M21 11v6h-6"],
        Icon::TrendingUp => &["M3 17l6-6 4 4 8-8", "M21 13V7h-6"],
        Icon::Wallet => &["M3 7h18v10H3zM16 7V5H5v2"],
    }
}

/// Stroke icon in the current text colour.
pub fn icon(icon: Icon, class: &'static str) -> Html {
    icon_base(paths(icon), class)
}
