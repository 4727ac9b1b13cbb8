use std::rc::Rc;

use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::{
    api::ApiClient,
    components::{icons::icon, page_shell},
    config::{load_settings, save_settings, AppConfig, AppSettings},
    format::Icon,
    pages::{
        dashboard::DashboardPage, day_view::DayViewPage, scheduled::ScheduledPage,
        transaction_form::TransactionFormPage,
    },
    query::{Epoch, QueryCache, QueryClient},
    route::{push, use_popstate, Navigator, Route},
};

const CURRENCIES: [(&str, &str); 6] = [
    ("USD", "USD ($)"),
    ("EUR", "EUR (€)"),
    ("GBP", "GBP (£)"),
    ("JPY", "JPY (¥)"),
    ("INR", "INR (₹)"),
    ("PHP", "PHP (₱)"),
];

#[derive(Properties, PartialEq)]
struct LayoutProps {
    children: Children,
    route: Route,
    on_navigate: Callback<Route>,
}

#[function_component(Layout)]
fn layout(props: &LayoutProps) -> Html {
    html! {
        <div class="flex h-screen bg-background">
            <div class="hidden md:flex">
                <Sidebar route={props.route.clone()} on_navigate={props.on_navigate.clone()} />
            </div>

            <div class="flex-1 flex flex-col overflow-hidden">
                <Header />
                <main class="flex-1 overflow-y-auto">
                    { for props.children.iter() }
                </main>
            </div>
        </div>
    }
}

/// Top bar with the display currency picker.
#[function_component(Header)]
fn header() -> Html {
    let settings = use_context::<UseStateHandle<AppSettings>>();
    let current = settings
        .as_ref()
        .map(|s| s.currency_code.clone())
        .unwrap_or_else(|| AppSettings::default().currency_code);

    let on_currency_change = Callback::from(move |e: Event| {
        if let Some(settings) = settings.as_ref() {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let next = AppSettings::for_currency(&select.value());
            save_settings(&next);
            settings.set(next);
        }
    });

    html! {
        <header class="bg-[#D8E1E8] border-b border-border h-16 flex items-center justify-between px-6">
            <div class="flex-1"></div>
            <label class="flex items-center gap-2 text-xs font-bold text-[#173E63]">
                {"Currency"}
                <select onchange={on_currency_change} class="px-3 py-1.5 bg-white border border-border rounded-lg text-sm text-foreground focus:outline-none focus:ring-2 focus:ring-primary">
                    { for CURRENCIES.iter().map(|(code, label)| html! {
                        <option value={*code} selected={current == *code}>{ *label }</option>
                    }) }
                </select>
            </label>
        </header>
    }
}

struct NavItem {
    label: &'static str,
    route: Route,
    icon: Icon,
}

#[derive(Properties, PartialEq)]
struct SidebarProps {
    route: Route,
    on_navigate: Callback<Route>,
}

#[function_component(Sidebar)]
fn sidebar(props: &SidebarProps) -> Html {
    let nav_items = vec![
        NavItem {
            label: "Dashboard",
            route: Route::Dashboard,
            icon: Icon::LayoutGrid,
        },
        NavItem {
            label: "Add Transaction",
            route: Route::AddTransaction,
            icon: Icon::Plus,
        },
        NavItem {
            label: "Scheduled",
            route: Route::Scheduled,
            icon: Icon::Clock,
        },
        NavItem {
            label: "Day View",
            route: Route::DayView {
                query: String::new(),
            },
            icon: Icon::Calendar,
        },
    ];

    html! {
        <div class="w-[220px] h-screen bg-[#D8E1E8] p-4 flex flex-col">
            <div class="flex items-center gap-3 px-2 mb-8">
                <div class="w-12 h-12 bg-[#173E63] rounded-full flex items-center justify-center text-white">
                    { icon(Icon::Wallet, "text-white") }
                </div>
                <span class="text-[#173E63] text-2xl font-black tracking-tight">{"Fintrack"}</span>
            </div>

            <div class="flex-1 bg-[#173E63] rounded-[24px] flex flex-col py-6 px-3 shadow-lg">
                <nav class="flex-1 space-y-2">
                    { for nav_items.into_iter().map(|item| {
                        let is_active = item.route.is_section_of(&props.route);
                        let class_name = if is_active {
                            "flex items-center gap-3 px-4 py-3 rounded-xl transition-all text-[13px] font-medium bg-[#B2CBDE] text-[#173E63] w-full"
                        } else {
                            "flex items-center gap-3 px-4 py-3 rounded-xl transition-all text-[13px] font-medium text-slate-300 hover:bg-white/5 hover:text-white w-full"
                        };
                        let on_navigate = props.on_navigate.clone();
                        let route = item.route;

                        html! {
                            <button type="button" class={class_name} onclick={Callback::from(move |_| on_navigate.emit(route.clone()))}>
                                <span class="shrink-0">{ icon(item.icon, "text-current") }</span>
                                <span class="truncate whitespace-nowrap text-left">{ item.label }</span>
                            </button>
                        }
                    }) }
                </nav>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct NotFoundProps {
    on_home: Callback<()>,
}

#[function_component(NotFoundPage)]
fn not_found_page(props: &NotFoundProps) -> Html {
    let on_home = {
        let on_home = props.on_home.clone();
        Callback::from(move |_| on_home.emit(()))
    };

    page_shell(
        "Page not found",
        html! {},
        html! {
            <div class="bg-card rounded-[10px] p-10 border border-border text-center">
                <p class="text-sm text-muted-foreground">{"The page you are looking for does not exist."}</p>
                <button type="button" onclick={on_home} class="mt-4 bg-primary text-primary-foreground px-4 py-2 rounded-xl font-bold text-sm hover:opacity-90 transition-all">
                    {"Back to dashboard"}
                </button>
            </div>
        },
    )
}

#[function_component(App)]
pub fn app() -> Html {
    let settings = use_state(load_settings);
    let route = use_state(Route::current);
    let api = use_memo(|_| ApiClient::new(AppConfig::from_env().api_base_url), ());
    let cache = use_mut_ref(QueryCache::default);
    let epoch = use_reducer(Epoch::default);

    use_popstate(route.clone());

    let client = {
        let epoch_handle = epoch.clone();
        let notify = Callback::from(move |_| epoch_handle.dispatch(()));
        QueryClient::new(Rc::clone(&api), cache, epoch.0, notify)
    };

    let on_navigate = {
        let route = route.clone();
        Callback::from(move |next: Route| {
            if *route != next {
                push(&next);
                route.set(next);
            }
        })
    };
    let navigator = Navigator(on_navigate.clone());

    let content = match &*route {
        Route::Dashboard => html! { <DashboardPage /> },
        Route::AddTransaction => html! { <TransactionFormPage /> },
        Route::EditTransaction(id) => html! { <TransactionFormPage key={id.clone()} id={Some(id.clone())} /> },
        Route::Scheduled => html! { <ScheduledPage /> },
        Route::DayView { query } => html! { <DayViewPage query={query.clone()} /> },
        Route::NotFound => {
            let on_navigate = on_navigate.clone();
            html! { <NotFoundPage on_home={Callback::from(move |_| on_navigate.emit(Route::Dashboard))} /> }
        }
    };

    html! {
        <ContextProvider<UseStateHandle<AppSettings>> context={settings}>
            <ContextProvider<QueryClient> context={client}>
                <ContextProvider<Navigator> context={navigator}>
                    <Layout route={(*route).clone()} {on_navigate}>
                        { content }
                    </Layout>
                </ContextProvider<Navigator>>
            </ContextProvider<QueryClient>>
        </ContextProvider<UseStateHandle<AppSettings>>>
    }
}
