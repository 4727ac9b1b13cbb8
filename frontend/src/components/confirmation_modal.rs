use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ConfirmationModalProps {
    pub open: bool,
    pub title: &'static str,
    pub message: String,
    #[prop_or("Delete")]
    pub confirm_label: &'static str,
    #[prop_or_default]
    pub pending: bool,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
}

#[function_component(ConfirmationModal)]
pub fn confirmation_modal(props: &ConfirmationModalProps) -> Html {
    if !props.open {
        return html! {};
    }

    let on_confirm = {
        let on_confirm = props.on_confirm.clone();
        Callback::from(move |_| on_confirm.emit(()))
    };
    let on_cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_| on_cancel.emit(()))
    };

    html! {
        <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/40 p-4">
            <div class="bg-white rounded-xl shadow-lg w-full max-w-md p-6" role="dialog" aria-modal="true">
                <h4 class="text-lg font-bold text-[#173E63]">{ props.title }</h4>
                <p class="text-sm text-slate-500 mt-2">{ props.message.clone() }</p>
                <div class="flex justify-end gap-3 mt-6">
                    <button type="button" onclick={on_cancel} disabled={props.pending} class="px-4 py-2 rounded-xl border border-border text-sm font-bold hover:bg-secondary transition-colors">
                        {"Cancel"}
                    </button>
                    <button type="button" onclick={on_confirm} disabled={props.pending} class="px-4 py-2 rounded-xl bg-red-600 text-white text-sm font-bold hover:bg-red-700 transition-colors disabled:opacity-50">
                        { if props.pending { "Deleting..." } else { props.confirm_label } }
                    </button>
                </div>
            </div>
        </div>
    }
}
