//! Transactions for a single calendar day, with day-by-day navigation.

use chrono::{Datelike, Local};
use rust_decimal::Decimal;
use yew::prelude::*;

use crate::{
    components::{
        confirmation_modal::ConfirmationModal,
        icons::icon,
        page_shell,
        summary_card::SummaryCard,
        transaction_card::{transaction_skeletons, TransactionCard},
    },
    config::use_currency_symbol,
    confirm::{DeleteConfirmation, PendingDelete},
    day::{DayCursor, DaySelection},
    format::{balance_display, format_currency, Icon},
    hooks::{use_delete_transaction, use_month_summary, use_transactions_by_date, DAY_PAGE_SIZE},
    model::MonthSummary,
    query::QueryState,
    route::{replace_url, use_navigator, Route},
};

#[derive(Properties, PartialEq)]
struct MonthStripProps {
    cursor: DayCursor,
    summary: Option<MonthSummary>,
    on_select: Callback<DayCursor>,
}

/// One button per day of the month, marked when the day has activity.
#[function_component(MonthStrip)]
fn month_strip(props: &MonthStripProps) -> Html {
    html! {
        <div class="flex gap-1 overflow-x-auto pb-1">
            { for props.cursor.days_in_month().into_iter().map(|date| {
                let day = date.day();
                let item = props.summary.as_ref().and_then(|s| s.day(day));
                let marker = match item {
                    Some(item) if item.income > Decimal::ZERO && item.expense > Decimal::ZERO => "bg-blue-500",
                    Some(item) if item.income > Decimal::ZERO => "bg-green-500",
                    Some(item) if item.expense > Decimal::ZERO => "bg-red-500",
                    _ => "bg-transparent",
                };
                let class_name = if date == props.cursor.date() {
                    "flex flex-col items-center gap-1 min-w-[2.25rem] px-2 py-1.5 rounded-lg bg-primary text-primary-foreground text-xs font-bold"
                } else {
                    "flex flex-col items-center gap-1 min-w-[2.25rem] px-2 py-1.5 rounded-lg hover:bg-secondary text-xs font-medium text-muted-foreground"
                };
                let on_select = props.on_select.clone();
                html! {
                    <button type="button" key={day.to_string()} class={class_name} onclick={Callback::from(move |_| on_select.emit(DayCursor::new(date)))}>
                        <span>{ day.to_string() }</span>
                        <span class={classes!("w-1.5", "h-1.5", "rounded-full", marker)}></span>
                    </button>
                }
            }) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct DayViewPageProps {
    /// `day=&month=&year=` from the URL.
    #[prop_or_default]
    pub query: String,
}

#[function_component(DayViewPage)]
pub fn day_view_page(props: &DayViewPageProps) -> Html {
    let today = Local::now().date_naive();
    let selection = {
        let query = props.query.clone();
        use_state(move || DaySelection::new(DayCursor::from_query(&query, today)))
    };
    let confirmation = use_state(DeleteConfirmation::default);
    let currency_symbol = use_currency_symbol();
    let navigator = use_navigator();
    let cursor = selection.cursor;

    // Back/forward hands us a new query.
    {
        let selection = selection.clone();
        use_effect_with_deps(
            move |query| {
                let parsed = DayCursor::from_query(query, Local::now().date_naive());
                if parsed != selection.cursor {
                    selection.set(selection.go_to(parsed));
                }
                || ()
            },
            props.query.clone(),
        );
    }

    use_effect_with_deps(
        |cursor| {
            replace_url(&Route::DayView { query: cursor.to_query() }.to_url());
            || ()
        },
        cursor,
    );

    let day = use_transactions_by_date(cursor.api_date(), selection.page, DAY_PAGE_SIZE);
    let month = use_month_summary(cursor.month(), cursor.year());
    let delete = use_delete_transaction();

    let set_cursor = {
        let selection = selection.clone();
        Callback::from(move |next: DayCursor| selection.set(selection.go_to(next)))
    };
    let on_prev = {
        let selection = selection.clone();
        Callback::from(move |_| selection.set(selection.go_to(selection.cursor.prev())))
    };
    let on_next = {
        let selection = selection.clone();
        Callback::from(move |_| selection.set(selection.go_to(selection.cursor.next())))
    };
    let on_today = {
        let selection = selection.clone();
        Callback::from(move |_| selection.set(selection.go_to(DayCursor::new(today))))
    };
    let on_edit = {
        let navigator = navigator.clone();
        Callback::from(move |id: String| navigator.go(Route::EditTransaction(id)))
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

    let loading = day.is_loading();
    let totals = day.data().cloned();
    let (income, spending, balance) = totals
        .as_ref()
        .map(|d| (d.total_income, d.total_expense, d.balance()))
        .unwrap_or_default();
    let (balance_text, balance_class) = balance_display(balance, &currency_symbol);

    let navigation = html! {
        <div class="flex items-center justify-between bg-card rounded-[10px] border border-border p-4">
            <button type="button" onclick={on_prev} aria-label="Previous day" class="p-2 rounded-full hover:bg-secondary">
                { icon(Icon::ChevronLeft, "text-foreground") }
            </button>
            <div class="flex items-center gap-2">
                { icon(Icon::Calendar, "text-muted-foreground") }
                <h2 class="text-lg font-bold text-foreground">{ cursor.label() }</h2>
                {
                    if cursor.is_today(today) {
                        html! { <span class="bg-primary text-primary-foreground px-2 py-0.5 rounded-full text-[10px] font-bold uppercase">{"Today"}</span> }
                    } else {
                        html! {
                            <button type="button" onclick={on_today} class="text-xs font-bold text-primary hover:underline">{"Go to today"}</button>
                        }
                    }
                }
            </div>
            <button type="button" onclick={on_next} aria-label="Next day" class="p-2 rounded-full hover:bg-secondary">
                { icon(Icon::ChevronRight, "text-foreground") }
            </button>
        </div>
    };

    let list = match &day {
        QueryState::Idle | QueryState::Loading => transaction_skeletons(3),
        QueryState::Failed(message) => html! {
            <p class="px-6 py-8 text-sm text-red-600 text-center">{ message.clone() }</p>
        },
        QueryState::Ready(data) if data.transactions.content.is_empty() => html! {
            <div class="px-6 py-10 text-center text-muted-foreground">
                <div class="flex justify-center mb-2">{ icon(Icon::Calendar, "text-muted-foreground") }</div>
                <p class="text-sm">{"No transactions for this day"}</p>
            </div>
        },
        QueryState::Ready(data) => {
            let listing = &data.transactions;
            let on_prev_page = {
                let selection = selection.clone();
                Callback::from(move |_| selection.set(selection.prev_page()))
            };
            let on_next_page = {
                let selection = selection.clone();
                Callback::from(move |_| selection.set(selection.next_page()))
            };
            html! {
                <>
                    <div class="divide-y divide-border">
                        { for listing.content.iter().map(|transaction| html! {
                            <TransactionCard
                                key={transaction.id.clone()}
                                transaction={transaction.clone()}
                                currency_symbol={currency_symbol.clone()}
                                on_edit={on_edit.clone()}
                                on_delete={on_request_delete.clone()}
                                show_date={false}
                                busy={delete.pending()}
                            />
                        }) }
                    </div>
                    {
                        if listing.total_pages > 1 {
                            html! {
                                <div class="flex items-center justify-between px-6 py-3 border-t border-border text-sm">
                                    <button type="button" onclick={on_prev_page} disabled={listing.first} class="font-bold text-primary disabled:text-muted-foreground">{"Previous"}</button>
                                    <span class="text-muted-foreground">{ format!("Page {} of {}", listing.number + 1, listing.total_pages) }</span>
                                    <button type="button" onclick={on_next_page} disabled={listing.last} class="font-bold text-primary disabled:text-muted-foreground">{"Next"}</button>
                                </div>
                            }
                        } else {
                            html! {}
                        }
                    }
                </>
            }
        }
    };

    let count = totals
        .as_ref()
        .map(|d| d.transactions.total_elements)
        .unwrap_or_default();
    let dialog_message = confirmation
        .target()
        .map(PendingDelete::message)
        .unwrap_or_default();

    page_shell(
        "Day View",
        html! {},
        html! {
            <>
                { navigation }
                <MonthStrip {cursor} summary={month.data().cloned()} on_select={set_cursor} />

                <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                    <SummaryCard title="Income" value={format_currency(income, &currency_symbol)} icon={Icon::TrendingUp} value_class="text-green-600" {loading} />
                    <SummaryCard title="Spending" value={format_currency(spending, &currency_symbol)} icon={Icon::TrendingDown} value_class="text-red-600" {loading} />
                    <SummaryCard title="Balance" value={balance_text} icon={Icon::Wallet} value_class={balance_class} {loading} />
                </div>

                <div class="bg-card rounded-[10px] shadow-sm border border-border overflow-hidden">
                    <div class="p-6 flex justify-between items-center border-b border-border">
                        <h3 class="font-bold text-foreground text-lg">{"Transactions"}</h3>
                        <span class="text-xs text-muted-foreground">{ format!("{} total", count) }</span>
                    </div>
                    {
                        if let Some(error) = delete.error() {
                            html! { <p class="px-6 pt-4 text-sm text-red-600">{ error }</p> }
                        } else {
                            html! {}
                        }
                    }
                    { list }
                </div>

                <ConfirmationModal
                    open={confirmation.is_open()}
                    title="Delete Transaction"
                    message={dialog_message}
                    pending={delete.pending()}
                    on_confirm={on_confirm_delete}
                    on_cancel={on_cancel_delete}
                />
            </>
        },
    )
}
