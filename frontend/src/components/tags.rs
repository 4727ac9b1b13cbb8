use web_sys::{HtmlInputElement, KeyboardEvent};
use yew::prelude::*;

const VISIBLE_TAGS: usize = 3;

#[derive(Properties, PartialEq)]
pub struct TagListProps {
    pub tags: Vec<String>,
}

/// First few tags as chips, the rest folded into "+N".
#[function_component(TagList)]
pub fn tag_list(props: &TagListProps) -> Html {
    if props.tags.is_empty() {
        return html! {};
    }

    let hidden = props.tags.len().saturating_sub(VISIBLE_TAGS);

    html! {
        <div class="flex flex-wrap items-center gap-1">
            { for props.tags.iter().take(VISIBLE_TAGS).map(|tag| html! {
                <span class="bg-secondary text-secondary-foreground px-2 py-0.5 rounded-full text-[10px] font-bold">{ format!("#{}", tag) }</span>
            }) }
            {
                if hidden > 0 {
                    html! { <span class="text-[10px] font-bold text-muted-foreground">{ format!("+{}", hidden) }</span> }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TagInputProps {
    pub tags: Vec<String>,
    pub draft: String,
    pub suggestions: Vec<&'static str>,
    pub on_draft: Callback<String>,
    /// Adds the current draft.
    pub on_add: Callback<()>,
    /// Adds or removes a tag.
    pub on_toggle: Callback<String>,
}

#[function_component(TagInput)]
pub fn tag_input(props: &TagInputProps) -> Html {
    let oninput = {
        let on_draft = props.on_draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_draft.emit(input.value());
        })
    };

    let onkeydown = {
        let on_add = props.on_add.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                e.prevent_default();
                on_add.emit(());
            }
        })
    };

    let on_add_click = {
        let on_add = props.on_add.clone();
        Callback::from(move |_| on_add.emit(()))
    };

    html! {
        <div>
            <label class="block text-sm font-medium text-foreground mb-2">{"Tags"}</label>
            <div class="flex gap-2">
                <input
                    type="text"
                    placeholder="Add a tag"
                    value={props.draft.clone()}
                    {oninput}
                    {onkeydown}
                    class="flex-1 px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary"
                />
                <button type="button" onclick={on_add_click} class="px-4 py-2 rounded-lg bg-secondary text-sm font-bold hover:opacity-80">
                    {"Add"}
                </button>
            </div>

            {
                if props.tags.is_empty() {
                    html! {}
                } else {
                    html! {
                        <div class="flex flex-wrap gap-2 mt-3">
                            { for props.tags.iter().map(|tag| {
                                let on_toggle = props.on_toggle.clone();
                                let value = tag.clone();
                                html! {
                                    <button type="button" key={tag.clone()} onclick={Callback::from(move |_| on_toggle.emit(value.clone()))} class="flex items-center gap-1 bg-primary text-primary-foreground px-3 py-1 rounded-full text-xs font-bold">
                                        { format!("#{}", tag) }
                                        <span aria-hidden="true">{"×"}</span>
                                    </button>
                                }
                            }) }
                        </div>
                    }
                }
            }

            {
                if props.suggestions.is_empty() {
                    html! {}
                } else {
                    html! {
                        <div class="mt-3">
                            <p class="text-xs text-muted-foreground mb-2">{"Suggestions"}</p>
                            <div class="flex flex-wrap gap-2">
                                { for props.suggestions.iter().map(|tag| {
                                    let on_toggle = props.on_toggle.clone();
                                    let value = tag.to_string();
                                    html! {
                                        <button type="button" key={*tag} onclick={Callback::from(move |_| on_toggle.emit(value.clone()))} class="bg-secondary text-secondary-foreground px-3 py-1 rounded-full text-xs font-bold hover:opacity-80">
                                            { format!("+ {}", tag) }
                                        </button>
                                    }
                                }) }
                            </div>
                        </div>
                    }
                }
            }
        </div>
    }
}
