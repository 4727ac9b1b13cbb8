use yew::prelude::*;

use crate::{components::icons::icon, format::Icon};

#[derive(Properties, PartialEq)]
pub struct SummaryCardProps {
    pub title: &'static str,
    /// Already formatted amount.
    pub value: String,
    pub icon: Icon,
    #[prop_or("text-[#1D617A]")]
    pub value_class: &'static str,
    #[prop_or_default]
    pub loading: bool,
}

#[function_component(SummaryCard)]
pub fn summary_card(props: &SummaryCardProps) -> Html {
    html! {
        <div class="bg-card p-6 rounded-[10px] shadow-sm border border-border flex justify-between items-start">
            <div>
                <p class="text-muted-foreground text-[10px] font-bold mb-1 tracking-widest uppercase">{ props.title }</p>
                {
                    if props.loading {
                        html! { <div class="h-8 w-32 mt-1 rounded bg-secondary animate-pulse"></div> }
                    } else {
                        html! {
                            <h3 class={classes!("text-2xl", "font-bold", "tracking-tight", props.value_class)}>{ props.value.clone() }</h3>
                        }
                    }
                }
            </div>
            <div class="p-3 bg-[#eef4f9] rounded-[10px]">
                { icon(props.icon, "text-foreground") }
            </div>
        </div>
    }
}
