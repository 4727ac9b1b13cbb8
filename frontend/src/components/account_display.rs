//! Account, payment mode and category presentation and pickers.

use yew::prelude::*;

use crate::{
    components::icons::icon,
    format::{AccountKind, PaymentModeKind},
    model::{Account, Category, PaymentMode},
};

/// Role an account plays in the transaction being shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AccountVariant {
    #[default]
    Default,
    From,
    To,
}

impl AccountVariant {
    fn caption(self) -> Option<&'static str> {
        match self {
            AccountVariant::Default => None,
            AccountVariant::From => Some("From"),
            AccountVariant::To => Some("To"),
        }
    }

    fn border_class(self) -> &'static str {
        match self {
            AccountVariant::Default => "border-border",
            AccountVariant::From => "border-red-200",
            AccountVariant::To => "border-green-200",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct PaymentModeBadgeProps {
    pub mode: PaymentMode,
}

#[function_component(PaymentModeBadge)]
pub fn payment_mode_badge(props: &PaymentModeBadgeProps) -> Html {
    let kind = PaymentModeKind::from_code(props.mode.kind);

    html! {
        <span class="inline-flex items-center gap-1.5 bg-secondary text-secondary-foreground px-2 py-0.5 rounded-full text-[10px] font-bold">
            <span class={classes!("w-4", "h-4", "rounded-full", "flex", "items-center", "justify-center", "text-white", kind.icon_class())}>
                { icon(kind.icon(), "w-3 h-3") }
            </span>
            { props.mode.name.clone() }
        </span>
    }
}

#[derive(Properties, PartialEq)]
pub struct AccountDisplayProps {
    pub account: Account,
    #[prop_or_default]
    pub variant: AccountVariant,
    #[prop_or_default]
    pub selected_payment_mode: Option<String>,
    /// When set, the account's linked payment modes become selectable.
    #[prop_or_default]
    pub on_select_payment_mode: Option<Callback<Option<String>>>,
}

#[function_component(AccountDisplay)]
pub fn account_display(props: &AccountDisplayProps) -> Html {
    let account = &props.account;
    let kind = AccountKind::from_code(account.kind);

    let payment_modes = match &props.on_select_payment_mode {
        Some(on_select) if !account.linked_payment_modes.is_empty() => {
            let chip = |id: Option<String>, label: String| {
                let active = props.selected_payment_mode == id;
                let class_name = if active {
                    "px-3 py-1 rounded-full text-xs font-bold bg-primary text-primary-foreground"
                } else {
                    "px-3 py-1 rounded-full text-xs font-bold bg-secondary text-secondary-foreground hover:opacity-80"
                };
                let on_select = on_select.clone();
                html! {
                    <button type="button" class={class_name} onclick={Callback::from(move |_| on_select.emit(id.clone()))}>
                        { label }
                    </button>
                }
            };

            html! {
                <div class="mt-3 pt-3 border-t border-border">
                    <p class="text-xs text-muted-foreground mb-2">{"Payment Mode"}</p>
                    <div class="flex flex-wrap gap-2">
                        { chip(None, "None".to_string()) }
                        { for account.linked_payment_modes.iter().map(|mode| chip(Some(mode.id.clone()), mode.name.clone())) }
                    </div>
                </div>
            }
        }
        _ => match props
            .selected_payment_mode
            .as_deref()
            .and_then(|id| account.payment_mode(id))
        {
            Some(mode) => html! {
                <div class="mt-2"><PaymentModeBadge mode={mode.clone()} /></div>
            },
            None => html! {},
        },
    };

    html! {
        <div class={classes!("bg-card", "rounded-[10px]", "p-4", "border", props.variant.border_class())}>
            {
                if let Some(caption) = props.variant.caption() {
                    html! { <p class="text-[10px] font-bold uppercase tracking-widest text-muted-foreground mb-2">{ caption }</p> }
                } else {
                    html! {}
                }
            }
            <div class="flex items-center gap-3">
                <div class="w-10 h-10 rounded-full bg-[#eef4f9] flex items-center justify-center font-bold text-[#173E63]">
                    { account.initial() }
                </div>
                <div class="flex-1 min-w-0">
                    <p class="font-bold text-foreground truncate">{ account.name.clone() }</p>
                    <span class={classes!("inline-flex", "items-center", "gap-1", "px-2", "py-0.5", "rounded-full", "text-[10px]", "font-bold", kind.badge_class())}>
                        { icon(kind.icon(), "w-3 h-3") }
                        { kind.name() }
                    </span>
                </div>
                {
                    if account.default {
                        html! { <span class="text-[10px] font-bold text-muted-foreground uppercase">{"Default"}</span> }
                    } else {
                        html! {}
                    }
                }
            </div>
            { payment_modes }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct AccountPickerProps {
    pub label: &'static str,
    pub accounts: Vec<Account>,
    pub selected: Option<String>,
    pub on_select: Callback<String>,
    #[prop_or_default]
    pub loading: bool,
    #[prop_or_default]
    pub error: Option<&'static str>,
}

#[function_component(AccountPicker)]
pub fn account_picker(props: &AccountPickerProps) -> Html {
    let body = if props.loading {
        html! { <div class="h-12 rounded-lg bg-secondary animate-pulse"></div> }
    } else if props.accounts.is_empty() {
        html! { <p class="text-sm text-muted-foreground">{"No accounts available."}</p> }
    } else {
        html! {
            <div class="grid grid-cols-2 md:grid-cols-3 gap-2">
                { for props.accounts.iter().map(|account| {
                    let kind = AccountKind::from_code(account.kind);
                    let active = props.selected.as_deref() == Some(account.id.as_str());
                    let class_name = if active {
                        "flex items-center gap-2 p-3 rounded-lg border-2 border-primary bg-[#eef4f9] text-left"
                    } else {
                        "flex items-center gap-2 p-3 rounded-lg border border-border hover:bg-secondary text-left"
                    };
                    let on_select = props.on_select.clone();
                    let id = account.id.clone();
                    html! {
                        <button type="button" key={account.id.clone()} class={class_name} onclick={Callback::from(move |_| on_select.emit(id.clone()))}>
                            <span class={kind.text_class()}>{ icon(kind.icon(), "w-4 h-4") }</span>
                            <span class="text-sm font-medium truncate">{ account.name.clone() }</span>
                        </button>
                    }
                }) }
            </div>
        }
    };

    html! {
        <div>
            <label class="block text-sm font-medium text-foreground mb-2">{ props.label }</label>
            { body }
            {
                if let Some(error) = props.error {
                    html! { <p class="text-xs text-red-600 mt-1">{ error }</p> }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct CategoryPickerProps {
    pub categories: Vec<Category>,
    pub selected: Option<String>,
    pub on_select: Callback<String>,
    #[prop_or_default]
    pub loading: bool,
    #[prop_or_default]
    pub error: Option<&'static str>,
}

#[function_component(CategoryPicker)]
pub fn category_picker(props: &CategoryPickerProps) -> Html {
    let body = if props.loading {
        html! { <div class="h-10 rounded-lg bg-secondary animate-pulse"></div> }
    } else if props.categories.is_empty() {
        html! { <p class="text-sm text-muted-foreground">{"No categories available."}</p> }
    } else {
        html! {
            <div class="flex flex-wrap gap-2">
                { for props.categories.iter().map(|category| {
                    let active = props.selected.as_deref() == Some(category.id.as_str());
                    let class_name = if active {
                        "flex items-center gap-2 px-3 py-2 rounded-full border-2 border-primary text-sm font-bold"
                    } else {
                        "flex items-center gap-2 px-3 py-2 rounded-full border border-border text-sm hover:bg-secondary"
                    };
                    let on_select = props.on_select.clone();
                    let id = category.id.clone();
                    let dot_style = format!("background-color: {}", if category.color.is_empty() { "#94a3b8" } else { category.color.as_str() });
                    html! {
                        <button type="button" key={category.id.clone()} class={class_name} onclick={Callback::from(move |_| on_select.emit(id.clone()))}>
                            <span class="w-2.5 h-2.5 rounded-full" style={dot_style}></span>
                            { category.name.clone() }
                        </button>
                    }
                }) }
            </div>
        }
    };

    html! {
        <div>
            <label class="block text-sm font-medium text-foreground mb-2">{"Category"}</label>
            { body }
            {
                if let Some(error) = props.error {
                    html! { <p class="text-xs text-red-600 mt-1">{ error }</p> }
                } else {
                    html! {}
                }
            }
        </div>
    }
}
