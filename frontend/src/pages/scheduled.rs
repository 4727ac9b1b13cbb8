//! Recurring transactions: browse upcoming and completed schedules, pause,
//! resume or delete them.

use yew::prelude::*;

use crate::{
    components::{confirmation_modal::ConfirmationModal, icons::icon, page_shell},
    config::use_currency_symbol,
    confirm::{DeleteConfirmation, PendingDelete},
    format::{format_currency, format_short_date, format_time_12h, frequency_label, Icon},
    hooks::{
        use_completed_scheduled, use_delete_scheduled, use_toggle_scheduled,
        use_upcoming_scheduled,
    },
    model::ScheduledTransaction,
    query::QueryState,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ScheduleTab {
    Upcoming,
    Completed,
}

impl ScheduleTab {
    fn label(self) -> &'static str {
        match self {
            ScheduleTab::Upcoming => "Upcoming",
            ScheduleTab::Completed => "Completed",
        }
    }

    fn empty_message(self) -> &'static str {
        match self {
            ScheduleTab::Upcoming => "No upcoming scheduled transactions",
            ScheduleTab::Completed => "No completed scheduled transactions",
        }
    }
}

#[derive(Properties, PartialEq)]
struct ScheduledRowProps {
    item: ScheduledTransaction,
    currency_symbol: String,
    busy: bool,
    on_toggle: Callback<String>,
    on_delete: Callback<PendingDelete>,
}

#[function_component(ScheduledRow)]
fn scheduled_row(props: &ScheduledRowProps) -> Html {
    let item = &props.item;
    let kind = item.kind;

    let on_toggle = {
        let on_toggle = props.on_toggle.clone();
        let id = item.id.clone();
        Callback::from(move |_| on_toggle.emit(id.clone()))
    };
    let on_delete = {
        let on_delete = props.on_delete.clone();
        let target = PendingDelete::new(item.id.clone(), item.description.clone());
        Callback::from(move |_| on_delete.emit(target.clone()))
    };

    let (toggle_icon, toggle_label) = if item.is_active() {
        (Icon::Pause, "Pause")
    } else {
        (Icon::Play, "Resume")
    };

    let mut details = vec![
        format!(
            "{} at {}",
            format_short_date(&item.start_date),
            format_time_12h(&item.time)
        ),
        frequency_label(item.frequency_type).to_string(),
    ];
    if let Some(days) = item.remainder_days {
        details.push(format!("Remind {} day{} before", days, if days == 1 { "" } else { "s" }));
    }
    if let Some(accounts) = item.account_label() {
        details.push(accounts);
    }

    html! {
        <div class="flex items-center gap-4 px-6 py-4 hover:bg-muted/30 transition-colors">
            <div class={classes!("p-2", "rounded-[10px]", "bg-[#eef4f9]", kind.amount_class())}>
                { icon(kind.icon(), "text-current") }
            </div>
            <div class="flex-1 min-w-0">
                <div class="flex items-center gap-2">
                    <p class="text-sm font-bold text-foreground truncate">{ item.description.clone() }</p>
                    <span class="bg-secondary text-secondary-foreground px-2 py-0.5 rounded-full text-[10px] font-bold">{ kind.label() }</span>
                </div>
                <p class="text-xs text-muted-foreground mt-1">{ details.join(" · ") }</p>
            </div>
            <p class={classes!("text-sm", "font-semibold", kind.amount_class())}>
                { format!("{}{}", kind.sign(), format_currency(item.amount.abs(), &props.currency_symbol)) }
            </p>
            <div class="flex gap-1">
                <button type="button" onclick={on_toggle} disabled={props.busy} title={toggle_label} aria-label={toggle_label} class="p-1.5 rounded-lg hover:bg-secondary text-muted-foreground disabled:opacity-50">
                    { icon(toggle_icon, "w-4 h-4") }
                </button>
                <button type="button" onclick={on_delete} disabled={props.busy} aria-label="Delete" class="p-1.5 rounded-lg hover:bg-red-50 text-red-600 disabled:opacity-50">
                    { icon(Icon::Trash, "w-4 h-4") }
                </button>
            </div>
        </div>
    }
}

#[function_component(ScheduledPage)]
pub fn scheduled_page() -> Html {
    let tab = use_state(|| ScheduleTab::Upcoming);
    let confirmation = use_state(DeleteConfirmation::default);
    let currency_symbol = use_currency_symbol();

    let upcoming = use_upcoming_scheduled();
    let completed = use_completed_scheduled();
    let toggle = use_toggle_scheduled();
    let delete = use_delete_scheduled();

    let busy = toggle.pending() || delete.pending();

    let on_toggle = {
        let toggle = toggle.clone();
        let delete = delete.clone();
        Callback::from(move |id: String| {
            delete.clear_error();
            toggle.run(id, Callback::noop());
        })
    };
    let on_request_delete = {
        let confirmation = confirmation.clone();
        let delete = delete.clone();
        Callback::from(move |target: PendingDelete| {
            delete.clear_error();
            let mut next = (*confirmation).clone();
            next.request(target);
            confirmation.set(next);
        })
    };
    let on_cancel_delete = {
        let confirmation = confirmation.clone();
        Callback::from(move |_| confirmation.set(DeleteConfirmation::default()))
    };
    let on_confirm_delete = {
        let confirmation = confirmation.clone();
        let delete = delete.clone();
        Callback::from(move |_| {
            if let Some(id) = confirmation.confirm() {
                let confirmation = confirmation.clone();
                delete.run(
                    id,
                    Callback::from(move |_| confirmation.set(DeleteConfirmation::default())),
                );
            }
        })
    };

    let current = match *tab {
        ScheduleTab::Upcoming => &upcoming,
        ScheduleTab::Completed => &completed,
    };
    let count = current.data().map(Vec::len).unwrap_or_default();

    let tabs = html! {
        <div class="flex gap-1 p-1 bg-secondary rounded-xl w-fit">
            { for [ScheduleTab::Upcoming, ScheduleTab::Completed].into_iter().map(|option| {
                let class_name = if option == *tab {
                    "px-4 py-1.5 rounded-lg text-sm font-bold bg-card shadow-sm"
                } else {
                    "px-4 py-1.5 rounded-lg text-sm font-medium text-muted-foreground hover:bg-white/50"
                };
                let tab = tab.clone();
                html! {
                    <button type="button" class={class_name} onclick={Callback::from(move |_| tab.set(option))}>
                        { option.label() }
                    </button>
                }
            }) }
        </div>
    };

    let list = match current {
        QueryState::Idle | QueryState::Loading => html! {
            <div class="divide-y divide-border">
                { for (0..3).map(|_| html! {
                    <div class="px-6 py-4"><div class="h-10 rounded bg-secondary animate-pulse"></div></div>
                }) }
            </div>
        },
        QueryState::Failed(message) => html! {
            <p class="px-6 py-8 text-sm text-red-600 text-center">{ message.clone() }</p>
        },
        QueryState::Ready(items) if items.is_empty() => html! {
            <div class="px-6 py-10 text-center text-muted-foreground">
                <div class="flex justify-center mb-2">{ icon(Icon::Clock, "text-muted-foreground") }</div>
                <p class="text-sm">{ tab.empty_message() }</p>
            </div>
        },
        QueryState::Ready(items) => html! {
            <div class="divide-y divide-border">
                { for items.iter().map(|item| html! {
                    <ScheduledRow
                        key={item.id.clone()}
                        item={item.clone()}
                        currency_symbol={currency_symbol.clone()}
                        {busy}
                        on_toggle={on_toggle.clone()}
                        on_delete={on_request_delete.clone()}
                    />
                }) }
            </div>
        },
    };

    let error = toggle.error().or_else(|| delete.error());
    let dialog_message = confirmation
        .target()
        .map(PendingDelete::message)
        .unwrap_or_default();

    html! {
        { page_shell(
            "Scheduled Transactions",
            html! {},
            html! {
                <>
                    { tabs }
                    <div class="bg-card rounded-[10px] shadow-sm border border-border overflow-hidden">
                        <div class="p-6 border-b border-border">
                            <h3 class="font-bold text-foreground text-lg">{ format!("{} ({})", tab.label(), count) }</h3>
                        </div>
                        {
                            if let Some(error) = error {
                                html! { <p class="px-6 pt-4 text-sm text-red-600">{ error }</p> }
                            } else {
                                html! {}
                            }
                        }
                        { list }
                    </div>

                    <ConfirmationModal
                        open={confirmation.is_open()}
                        title="Delete Scheduled Transaction"
                        message={dialog_message}
                        pending={delete.pending()}
                        on_confirm={on_confirm_delete}
                        on_cancel={on_cancel_delete}
                    />
                </>
            }
        ) }
    }
}
