pub mod account_display;
pub mod confirmation_modal;
pub mod fields;
pub mod icons;
pub mod summary_card;
pub mod tags;
pub mod transaction_card;

/// Heading row plus content, shared by every page.
pub fn page_shell(title: &str, actions: yew::Html, children: yew::Html) -> yew::Html {
    yew::html! {
        <div class="p-6 max-w-7xl mx-auto">
            <div class="flex items-center justify-between pb-4 border-b border-border">
                <h1 class="text-2xl font-bold text-foreground">{ title.to_string() }</h1>
                { actions }
            </div>
            <div class="pt-5 space-y-6">
                { children }
            </div>
        </div>
    }
}
