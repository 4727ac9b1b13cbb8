//! Create and edit page for transactions.

use chrono::Local;
use tracing::debug;
use yew::prelude::*;

use crate::{
    components::{
        account_display::{AccountDisplay, AccountPicker, AccountVariant, CategoryPicker},
        fields::{
            AmountInput, BackLink, FormActions, FormCard, FormError, FormInput, FormTabSelector,
            FormTextarea,
        },
        page_shell,
        tags::TagInput,
    },
    config::use_currency_symbol,
    form::{FormAction, FormErrors, TransactionFormState, EXPENSE_CATEGORY, INCOME_CATEGORY},
    hooks::{
        use_accounts, use_categories_by_type, use_create_transaction, use_default_account,
        use_default_category, use_transaction, use_update_transaction,
    },
    model::Account,
    query::QueryState,
    route::{use_navigator, Route},
};

const SAVE_FAILED: &str = "Failed to save transaction. Please try again.";

fn dispatcher<T: 'static>(
    form: &UseReducerHandle<TransactionFormState>,
    make: fn(T) -> FormAction,
) -> Callback<T> {
    let form = form.clone();
    Callback::from(move |value: T| form.dispatch(make(value)))
}

fn selected_account<'a>(accounts: &'a [Account], id: &Option<String>) -> Option<&'a Account> {
    let id = id.as_deref()?;
    accounts.iter().find(|account| account.id == id)
}

#[derive(Properties, PartialEq)]
pub struct TransactionFormPageProps {
    /// Present when editing an existing transaction.
    #[prop_or_default]
    pub id: Option<String>,
}

#[function_component(TransactionFormPage)]
pub fn transaction_form_page(props: &TransactionFormPageProps) -> Html {
    let form = use_reducer(|| {
        let now = Local::now().naive_local();
        TransactionFormState::new(now.date(), now.time())
    });
    let errors = use_state(FormErrors::default);
    let currency_symbol = use_currency_symbol();
    let navigator = use_navigator();

    let existing = use_transaction(props.id.clone());
    let accounts = use_accounts();
    let categories = use_categories_by_type(form.tab.category_type());
    let default_account = use_default_account();
    let default_expense = use_default_category(EXPENSE_CATEGORY);
    let default_income = use_default_category(INCOME_CATEGORY);
    let create = use_create_transaction();
    let update = use_update_transaction();

    {
        let form = form.clone();
        let loaded = existing.data().cloned().flatten();
        use_effect_with_deps(
            move |loaded| {
                if let Some(transaction) = loaded {
                    if !form.editing {
                        debug!(id = %transaction.id, "loaded transaction into form");
                        form.dispatch(FormAction::Load(transaction.clone()));
                    }
                }
                || ()
            },
            loaded,
        );
    }

    {
        let form = form.clone();
        let id = default_account.data().cloned().flatten().map(|account| account.id);
        use_effect_with_deps(
            move |id| {
                if let Some(id) = id {
                    form.dispatch(FormAction::DefaultAccountLoaded(id.clone()));
                }
                || ()
            },
            id,
        );
    }

    {
        let form = form.clone();
        let expense = default_expense.data().cloned().flatten().map(|c| c.id);
        let income = default_income.data().cloned().flatten().map(|c| c.id);
        use_effect_with_deps(
            move |(expense, income)| {
                let loaded = [(EXPENSE_CATEGORY, expense), (INCOME_CATEGORY, income)];
                for (category_type, id) in loaded {
                    if let Some(id) = id {
                        form.dispatch(FormAction::DefaultCategoryLoaded {
                            category_type,
                            id: id.clone(),
                        });
                    }
                }
                || ()
            },
            (expense, income),
        );
    }

    let pending = create.pending() || update.pending();

    let go_back = {
        let navigator = navigator.clone();
        Callback::from(move |_| navigator.go(Route::Dashboard))
    };

    let onsubmit = {
        let form = form.clone();
        let errors = errors.clone();
        let create = create.clone();
        let update = update.clone();
        let navigator = navigator.clone();
        let id = props.id.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let request = match form.validate() {
                Ok(request) => request,
                Err(found) => {
                    debug!(?found, "transaction form rejected");
                    errors.set(found);
                    return;
                }
            };
            errors.set(FormErrors::default());

            let navigator = navigator.clone();
            let on_saved = Callback::from(move |_| navigator.go(Route::Dashboard));
            match &id {
                Some(id) => update.run((id.clone(), request), on_saved),
                None => create.run(request, on_saved),
            }
        })
    };

    let editing = props.id.is_some();
    let title = if editing { "Edit Transaction" } else { "Add Transaction" };
    let header_action = html! { <BackLink label="Back to dashboard" on_click={go_back.clone()} /> };

    if editing {
        match &existing {
            QueryState::Idle | QueryState::Loading => {
                return page_shell(
                    title,
                    header_action,
                    html! {
                        <div class="space-y-4">
                            { for (0..3).map(|_| html! { <div class="h-24 rounded-[10px] bg-secondary animate-pulse"></div> }) }
                        </div>
                    },
                );
            }
            QueryState::Failed(message) => {
                return page_shell(title, header_action, html! { <FormError message={Some(message.clone())} /> });
            }
            QueryState::Ready(None) => {
                return page_shell(
                    title,
                    header_action,
                    html! { <p class="text-sm text-muted-foreground">{"Transaction not found."}</p> },
                );
            }
            QueryState::Ready(Some(_)) => {}
        }
    }

    let account_list = accounts.data().cloned().unwrap_or_default();
    let category_list = categories.data().cloned().unwrap_or_default();
    let save_error = create
        .error()
        .or_else(|| update.error())
        .map(|_| SAVE_FAILED.to_string());

    let source = selected_account(&account_list, &form.account_id).cloned();
    let destination = selected_account(&account_list, &form.to_account_id).cloned();
    let destination_options: Vec<Account> = form
        .destination_options(&account_list)
        .into_iter()
        .cloned()
        .collect();

    let accounts_section = if form.tab.is_transfer() {
        html! {
            <FormCard title="Accounts" subtitle={Some("Where the money moves from and to")}>
                <AccountPicker
                    label="From account"
                    accounts={account_list.clone()}
                    selected={form.account_id.clone()}
                    on_select={dispatcher(&form, FormAction::SelectAccount)}
                    loading={accounts.is_loading()}
                    error={errors.account}
                />
                {
                    match source {
                        Some(account) => html! {
                            <AccountDisplay
                                {account}
                                variant={AccountVariant::From}
                                selected_payment_mode={form.payment_mode_id.clone()}
                                on_select_payment_mode={Some(dispatcher(&form, FormAction::SelectPaymentMode))}
                            />
                        },
                        None => html! {},
                    }
                }
                <AccountPicker
                    label="To account"
                    accounts={destination_options}
                    selected={form.to_account_id.clone()}
                    on_select={dispatcher(&form, FormAction::SelectToAccount)}
                    loading={accounts.is_loading()}
                    error={errors.to_account}
                />
                {
                    match destination {
                        Some(account) => html! {
                            <AccountDisplay
                                {account}
                                variant={AccountVariant::To}
                                selected_payment_mode={form.to_payment_mode_id.clone()}
                                on_select_payment_mode={Some(dispatcher(&form, FormAction::SelectToPaymentMode))}
                            />
                        },
                        None => html! {},
                    }
                }
            </FormCard>
        }
    } else {
        html! {
            <FormCard title="Category & Account">
                <CategoryPicker
                    categories={category_list}
                    selected={form.category_id.clone()}
                    on_select={dispatcher(&form, FormAction::SelectCategory)}
                    loading={categories.is_loading()}
                    error={errors.category}
                />
                <AccountPicker
                    label="Account"
                    accounts={account_list.clone()}
                    selected={form.account_id.clone()}
                    on_select={dispatcher(&form, FormAction::SelectAccount)}
                    loading={accounts.is_loading()}
                    error={errors.account}
                />
                {
                    match source {
                        Some(account) => html! {
                            <AccountDisplay
                                {account}
                                selected_payment_mode={form.payment_mode_id.clone()}
                                on_select_payment_mode={Some(dispatcher(&form, FormAction::SelectPaymentMode))}
                            />
                        },
                        None => html! {},
                    }
                }
            </FormCard>
        }
    };

    let on_add_tag = {
        let form = form.clone();
        Callback::from(move |_| form.dispatch(FormAction::AddDraftTag))
    };

    page_shell(
        title,
        header_action,
        html! {
            <form {onsubmit} class="space-y-6 max-w-3xl">
                <FormError message={save_error} />

                <FormTabSelector active={form.tab} on_select={dispatcher(&form, FormAction::SelectTab)} />

                <FormCard title="Details">
                    <AmountInput
                        value={form.amount.clone()}
                        on_change={dispatcher(&form, FormAction::SetAmount)}
                        currency_symbol={currency_symbol.clone()}
                        error={errors.amount}
                    />
                    <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                        <FormInput
                            label="Date"
                            input_type="date"
                            value={form.date.clone()}
                            on_change={dispatcher(&form, FormAction::SetDate)}
                            error={errors.date}
                        />
                        <FormInput
                            label="Time"
                            input_type="time"
                            value={form.time.clone()}
                            on_change={dispatcher(&form, FormAction::SetTime)}
                            error={errors.time}
                        />
                    </div>
                    <FormTextarea
                        label="Description"
                        placeholder="What was this for?"
                        value={form.description.clone()}
                        on_change={dispatcher(&form, FormAction::SetDescription)}
                        error={errors.description}
                    />
                </FormCard>

                { accounts_section }

                <FormCard title="Tags" subtitle={Some("Optional labels to group transactions")}>
                    <TagInput
                        tags={form.tags.clone()}
                        draft={form.tag_draft.clone()}
                        suggestions={form.suggested_tags()}
                        on_draft={dispatcher(&form, FormAction::SetTagDraft)}
                        on_add={on_add_tag}
                        on_toggle={dispatcher(&form, FormAction::ToggleTag)}
                    />
                </FormCard>

                <FormActions
                    submit_label={if editing { "Update Transaction" } else { "Save Transaction" }}
                    {pending}
                    on_cancel={go_back}
                />
            </form>
        },
    )
}
