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
    format::{balance_display, format_currency, Icon},
    hooks::{
        use_account_summary, use_delete_transaction, use_recent_transactions,
        use_transaction_summary,
    },
    model::SummaryRange,
    query::QueryState,
    route::{use_navigator, Route},
};

const RECENT_LIMIT: usize = 6;

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let range = use_state(|| SummaryRange::AllTime);
    let confirmation = use_state(DeleteConfirmation::default);
    let currency_symbol = use_currency_symbol();
    let navigator = use_navigator();

    let summary = use_transaction_summary(*range);
    let accounts = use_account_summary();
    let recent = use_recent_transactions();
    let delete = use_delete_transaction();

    let on_add = {
        let navigator = navigator.clone();
        Callback::from(move |_| navigator.go(Route::AddTransaction))
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

    let range_tabs = html! {
        <div class="flex gap-1 p-1 bg-secondary rounded-xl">
            { for SummaryRange::ALL.iter().map(|option| {
                let option = *option;
                let class_name = if option == *range {
                    "px-4 py-1.5 rounded-lg text-sm font-bold bg-card shadow-sm"
                } else {
                    "px-4 py-1.5 rounded-lg text-sm font-medium text-muted-foreground hover:bg-white/50"
                };
                let range = range.clone();
                html! {
                    <button type="button" class={class_name} onclick={Callback::from(move |_| range.set(option))}>
                        { option.label() }
                    </button>
                }
            }) }
        </div>
    };

    let summary_cards = {
        let loading = summary.is_loading();
        let totals = summary.data().cloned().unwrap_or_default();
        let (balance, balance_class) = balance_display(totals.balance(), &currency_symbol);
        html! {
            <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                <SummaryCard title="Total Spending" value={format_currency(totals.total_expense, &currency_symbol)} icon={Icon::TrendingDown} value_class="text-red-600" {loading} />
                <SummaryCard title="Total Income" value={format_currency(totals.total_income, &currency_symbol)} icon={Icon::TrendingUp} value_class="text-green-600" {loading} />
                <SummaryCard title="Balance" value={balance} icon={Icon::Wallet} value_class={balance_class} {loading} />
            </div>
        }
    };

    let account_cards = {
        let loading = accounts.is_loading();
        let totals = accounts.data().cloned().unwrap_or_default();
        html! {
            <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                <SummaryCard title="Available Balance" value={format_currency(totals.available_amount, &currency_symbol)} icon={Icon::Building} {loading} />
                <SummaryCard title="Available Credit" value={format_currency(totals.available_credit, &currency_symbol)} icon={Icon::CreditCard} {loading} />
            </div>
        }
    };

    let recent_list = match &recent {
        QueryState::Idle | QueryState::Loading => transaction_skeletons(3),
        QueryState::Failed(message) => html! {
            <p class="px-6 py-8 text-sm text-red-600 text-center">{ message.clone() }</p>
        },
        QueryState::Ready(list) if list.is_empty() => html! {
            <div class="px-6 py-10 text-center">
                <p class="text-sm text-muted-foreground">{"No transactions yet."}</p>
                <button type="button" onclick={on_add.clone()} class="mt-3 text-sm font-bold text-primary hover:underline">
                    {"Add your first transaction"}
                </button>
            </div>
        },
        QueryState::Ready(list) => html! {
            <div class="divide-y divide-border">
                { for list.iter().take(RECENT_LIMIT).map(|transaction| html! {
                    <TransactionCard
                        key={transaction.id.clone()}
                        transaction={transaction.clone()}
                        currency_symbol={currency_symbol.clone()}
                        on_edit={on_edit.clone()}
                        on_delete={on_request_delete.clone()}
                        busy={delete.pending()}
                    />
                }) }
            </div>
        },
    };

    let dialog_message = confirmation
        .target()
        .map(PendingDelete::message)
        .unwrap_or_default();

    html! {
        { page_shell(
            "Dashboard",
            html! {
                <button onclick={on_add} class="flex items-center gap-2 bg-primary text-primary-foreground px-4 py-2 rounded-xl font-bold text-sm hover:opacity-90 transition-all">
                    { icon(Icon::Plus, "text-current") }
                    {"Add Transaction"}
                </button>
            },
            html! {
                <>
                    <div class="flex justify-end">{ range_tabs }</div>
                    { summary_cards }
                    { account_cards }

                    <div class="bg-card rounded-[10px] shadow-sm border border-border overflow-hidden">
                        <div class="p-6 flex justify-between items-center border-b border-border">
                            <h3 class="font-bold text-foreground text-lg">{"Recent Transactions"}</h3>
                        </div>
                        {
                            if let Some(error) = delete.error() {
                                html! { <p class="px-6 pt-4 text-sm text-red-600">{ error }</p> }
                            } else {
                                html! {}
                            }
                        }
                        { recent_list }
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
            }
        ) }
    }
}
