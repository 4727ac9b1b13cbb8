use yew::prelude::*;

use crate::{
    components::{account_display::PaymentModeBadge, icons::icon, tags::TagList},
    confirm::PendingDelete,
    format::{format_short_date, format_time_12h, signed_amount, Icon, TransactionKind},
    model::Transaction,
};

#[derive(Properties, PartialEq)]
pub struct TransactionCardProps {
    pub transaction: Transaction,
    pub currency_symbol: String,
    pub on_edit: Callback<String>,
    pub on_delete: Callback<PendingDelete>,
    /// Hides the date when the surrounding list is already for one day.
    #[prop_or(true)]
    pub show_date: bool,
    /// Disables the delete action while a delete is in flight.
    #[prop_or_default]
    pub busy: bool,
}

fn subtitle(transaction: &Transaction, kind: TransactionKind) -> String {
    if kind.is_transfer() {
        let from = transaction
            .from_account
            .as_ref()
            .or(transaction.account.as_ref())
            .map(|a| a.name.as_str())
            .unwrap_or("?");
        let to = transaction
            .to_account
            .as_ref()
            .map(|a| a.name.as_str())
            .unwrap_or("?");
        return format!("{} → {}", from, to);
    }

    if let Some(debt) = &transaction.debt {
        return format!("{} · {}", kind.name(), debt.person_name);
    }

    match (&transaction.category, &transaction.account) {
        (Some(category), Some(account)) => format!("{} · {}", category.name, account.name),
        (Some(category), None) => category.name.clone(),
        (None, Some(account)) => account.name.clone(),
        (None, None) => kind.name().to_string(),
    }
}

#[function_component(TransactionCard)]
pub fn transaction_card(props: &TransactionCardProps) -> Html {
    let transaction = &props.transaction;
    let kind = TransactionKind::from_code(transaction.kind);

    let on_edit = {
        let on_edit = props.on_edit.clone();
        let id = transaction.id.clone();
        Callback::from(move |_| on_edit.emit(id.clone()))
    };
    let on_delete = {
        let on_delete = props.on_delete.clone();
        let target = PendingDelete::new(transaction.id.clone(), transaction.description.clone());
        Callback::from(move |_| on_delete.emit(target.clone()))
    };

    let when = if props.show_date {
        format!(
            "{} · {}",
            format_short_date(&transaction.txn_date),
            format_time_12h(&transaction.txn_time)
        )
    } else {
        format_time_12h(&transaction.txn_time)
    };

    let payment_mode = transaction
        .payment_mode
        .as_ref()
        .or(transaction.from_payment_mode.as_ref());

    html! {
        <div class="flex items-center gap-4 px-6 py-4 hover:bg-muted/30 transition-colors">
            <div class={classes!("p-2", "rounded-[10px]", "bg-[#eef4f9]", kind.amount_class())}>
                { icon(kind.icon(), "text-current") }
            </div>
            <div class="flex-1 min-w-0">
                <p class="text-sm font-bold text-foreground truncate">
                    { if transaction.description.is_empty() { kind.name().to_string() } else { transaction.description.clone() } }
                </p>
                <p class="text-xs text-muted-foreground truncate">{ subtitle(transaction, kind) }</p>
                <div class="flex flex-wrap items-center gap-2 mt-1">
                    <span class="text-[10px] text-slate-400 font-bold uppercase tracking-tighter">{ when }</span>
                    {
                        if let Some(mode) = payment_mode {
                            html! { <PaymentModeBadge mode={mode.clone()} /> }
                        } else {
                            html! {}
                        }
                    }
                    <TagList tags={transaction.tag_names()} />
                </div>
            </div>
            <div class="text-right">
                <p class={classes!("text-sm", "font-semibold", kind.amount_class())}>
                    { signed_amount(kind, transaction.amount, &props.currency_symbol) }
                </p>
                <div class="flex justify-end gap-1 mt-1">
                    <button type="button" onclick={on_edit} class="p-1.5 rounded-lg hover:bg-secondary text-muted-foreground" aria-label="Edit transaction">
                        { icon(Icon::Edit, "w-4 h-4") }
                    </button>
                    <button type="button" onclick={on_delete} disabled={props.busy} class="p-1.5 rounded-lg hover:bg-red-50 text-red-600 disabled:opacity-50" aria-label="Delete transaction">
                        { icon(Icon::Trash, "w-4 h-4") }
                    </button>
                </div>
            </div>
        </div>
    }
}

/// Placeholder rows shown while a list loads.
pub fn transaction_skeletons(count: usize) -> Html {
    html! {
        <div class="divide-y divide-border">
            { for (0..count).map(|_| html! {
                <div class="flex items-center gap-4 px-6 py-4">
                    <div class="w-10 h-10 rounded-[10px] bg-secondary animate-pulse"></div>
                    <div class="flex-1 space-y-2">
                        <div class="h-3 w-1/3 rounded bg-secondary animate-pulse"></div>
                        <div class="h-3 w-1/4 rounded bg-secondary animate-pulse"></div>
                    </div>
                    <div class="h-4 w-16 rounded bg-secondary animate-pulse"></div>
                </div>
            }) }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::subtitle;
    use crate::{format::TransactionKind, model::Transaction};

    fn transaction(value: serde_json::Value) -> Transaction {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn transfer_subtitle_names_both_accounts() {
        let t = transaction(json!({
            "id": "t1", "txnDate": "2024-01-31", "txnTime": "09:00", "amount": 10, "type": 3,
            "fromAccount": { "id": "a", "name": "Checking", "type": 1 },
            "toAccount": { "id": "b", "name": "Savings", "type": 1 }
        }));

        assert_eq!(subtitle(&t, TransactionKind::Transfer), "Checking → Savings");
    }

    #[test]
    fn expense_subtitle_uses_category_and_account() {
        let t = transaction(json!({
            "id": "t2", "txnDate": "2024-01-31", "txnTime": "09:00", "amount": 10, "type": 1,
            "category": { "id": "c", "name": "Food", "type": 1 },
            "account": { "id": "a", "name": "Wallet", "type": 2 }
        }));

        assert_eq!(subtitle(&t, TransactionKind::Expense), "Food · Wallet");
    }

    #[test]
    fn debt_subtitle_names_the_person() {
        let t = transaction(json!({
            "id": "t3", "txnDate": "2024-01-31", "txnTime": "09:00", "amount": 10, "type": 5,
            "debt": { "id": "d", "personName": "Sam", "type": 1 }
        }));

        assert_eq!(subtitle(&t, TransactionKind::DebtExpense), "Debt Payment · Sam");
    }
}
