//! Form building blocks shared by the transaction form.

use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::{
    components::icons::icon,
    form::FormTab,
    format::Icon,
};

const INPUT_CLASS: &str = "w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary";
const INPUT_ERROR_CLASS: &str = "w-full px-4 py-2 bg-input border border-red-500 rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-red-500";

fn field_error(error: Option<&'static str>) -> Html {
    match error {
        Some(message) => html! { <p class="text-xs text-red-600 mt-1">{ message }</p> },
        None => html! {},
    }
}

#[derive(Properties, PartialEq)]
pub struct FormInputProps {
    pub label: &'static str,
    pub value: String,
    pub on_change: Callback<String>,
    #[prop_or("text")]
    pub input_type: &'static str,
    #[prop_or_default]
    pub placeholder: &'static str,
    #[prop_or_default]
    pub error: Option<&'static str>,
}

#[function_component(FormInput)]
pub fn form_input(props: &FormInputProps) -> Html {
    let oninput = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_change.emit(input.value());
        })
    };

    html! {
        <div>
            <label class="block text-sm font-medium text-foreground mb-2">{ props.label }</label>
            <input
                type={props.input_type}
                value={props.value.clone()}
                placeholder={props.placeholder}
                {oninput}
                class={if props.error.is_some() { INPUT_ERROR_CLASS } else { INPUT_CLASS }}
            />
            { field_error(props.error) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct FormTextareaProps {
    pub label: &'static str,
    pub value: String,
    pub on_change: Callback<String>,
    #[prop_or_default]
    pub placeholder: &'static str,
    #[prop_or_default]
    pub error: Option<&'static str>,
}

#[function_component(FormTextarea)]
pub fn form_textarea(props: &FormTextareaProps) -> Html {
    let oninput = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            on_change.emit(input.value());
        })
    };

    html! {
        <div>
            <label class="block text-sm font-medium text-foreground mb-2">{ props.label }</label>
            <textarea
                rows="3"
                value={props.value.clone()}
                placeholder={props.placeholder}
                {oninput}
                class={if props.error.is_some() { INPUT_ERROR_CLASS } else { INPUT_CLASS }}
            />
            { field_error(props.error) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct AmountInputProps {
    pub value: String,
    pub on_change: Callback<String>,
    pub currency_symbol: String,
    #[prop_or_default]
    pub error: Option<&'static str>,
}

/// Large amount field with the currency symbol as a prefix.
#[function_component(AmountInput)]
pub fn amount_input(props: &AmountInputProps) -> Html {
    let oninput = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_change.emit(input.value());
        })
    };

    html! {
        <div>
            <label class="block text-sm font-medium text-foreground mb-2">{"Amount"}</label>
            <div class="relative">
                <span class="absolute left-4 top-1/2 -translate-y-1/2 text-2xl font-bold text-muted-foreground">
                    { props.currency_symbol.clone() }
                </span>
                <input
                    type="number"
                    step="0.01"
                    min="0"
                    placeholder="0.00"
                    value={props.value.clone()}
                    {oninput}
                    class={classes!(
                        "pl-12", "text-2xl", "font-bold",
                        if props.error.is_some() { INPUT_ERROR_CLASS } else { INPUT_CLASS }
                    )}
                />
            </div>
            { field_error(props.error) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct FormTabSelectorProps {
    pub active: FormTab,
    pub on_select: Callback<FormTab>,
}

#[function_component(FormTabSelector)]
pub fn form_tab_selector(props: &FormTabSelectorProps) -> Html {
    html! {
        <div class="grid grid-cols-3 gap-2 p-1 bg-secondary rounded-xl">
            { for FormTab::ALL.iter().map(|tab| {
                let tab = *tab;
                let class_name = if tab == props.active {
                    "px-4 py-3 rounded-lg bg-card shadow-sm text-left"
                } else {
                    "px-4 py-3 rounded-lg text-left text-muted-foreground hover:bg-white/50"
                };
                let on_select = props.on_select.clone();
                html! {
                    <button type="button" class={class_name} onclick={Callback::from(move |_| on_select.emit(tab))}>
                        <p class="text-sm font-bold">{ tab.label() }</p>
                        <p class="text-xs text-muted-foreground">{ tab.description() }</p>
                    </button>
                }
            }) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct FormActionsProps {
    pub submit_label: &'static str,
    pub pending: bool,
    pub on_cancel: Callback<()>,
}

#[function_component(FormActions)]
pub fn form_actions(props: &FormActionsProps) -> Html {
    let on_cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_| on_cancel.emit(()))
    };

    html! {
        <div class="flex justify-end gap-3 pt-4 border-t border-border">
            <button type="button" onclick={on_cancel} disabled={props.pending} class="px-4 py-2 rounded-xl border border-border text-sm font-bold hover:bg-secondary transition-colors">
                {"Cancel"}
            </button>
            <button type="submit" disabled={props.pending} class="bg-primary text-primary-foreground px-4 py-2 rounded-xl font-bold text-sm hover:opacity-90 transition-all disabled:opacity-50">
                { if props.pending { "Saving..." } else { props.submit_label } }
            </button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct FormErrorProps {
    pub message: Option<String>,
}

#[function_component(FormError)]
pub fn form_error(props: &FormErrorProps) -> Html {
    match &props.message {
        Some(message) => html! {
            <div class="p-3 rounded-lg bg-red-50 border border-red-200 text-sm text-red-600">
                { message.clone() }
            </div>
        },
        None => html! {},
    }
}

#[derive(Properties, PartialEq)]
pub struct FormCardProps {
    pub title: &'static str,
    #[prop_or_default]
    pub subtitle: Option<&'static str>,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(FormCard)]
pub fn form_card(props: &FormCardProps) -> Html {
    html! {
        <div class="bg-card rounded-[10px] p-6 border border-border space-y-4">
            <div>
                <h3 class="font-bold text-foreground text-lg">{ props.title }</h3>
                {
                    if let Some(subtitle) = props.subtitle {
                        html! { <p class="text-xs text-muted-foreground">{ subtitle }</p> }
                    } else {
                        html! {}
                    }
                }
            </div>
            { for props.children.iter() }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct BackLinkProps {
    pub label: &'static str,
    pub on_click: Callback<()>,
}

#[function_component(BackLink)]
pub fn back_link(props: &BackLinkProps) -> Html {
    let onclick = {
        let on_click = props.on_click.clone();
        Callback::from(move |_| on_click.emit(()))
    };

    html! {
        <button type="button" {onclick} class="flex items-center gap-2 text-sm font-medium text-muted-foreground hover:text-foreground">
            { icon(Icon::ArrowLeft, "text-current") }
            <span>{ props.label }</span>
        </button>
    }
}
