use payloads::ProductSize;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::product_form::ProductDraft;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub draft: ProductDraft,
    pub on_toggle: Callback<ProductSize>,
    pub on_stock_change: Callback<(ProductSize, String)>,
}

/// Size toggles for the draft's product type, followed by a stock input for
/// each selected size in selection order.
#[function_component]
pub fn SizeStockEditor(props: &Props) -> Html {
    let draft = &props.draft;

    html! {
        <div class="space-y-4">
            <div>
                <label class="block text-sm font-medium text-neutral-700 dark:text-neutral-300 mb-2">
                    {"Available Sizes"}
                </label>
                <div class="flex flex-wrap gap-2">
                    {for draft.product_type().sizes().iter().map(|&size| {
                        let selected = draft.is_selected(size);
                        let on_toggle = props.on_toggle.clone();
                        let class = if selected {
                            "px-3 py-1.5 text-sm font-medium rounded-md border \
                             bg-neutral-900 text-white border-neutral-900 \
                             dark:bg-neutral-100 dark:text-neutral-900"
                        } else {
                            "px-3 py-1.5 text-sm font-medium rounded-md border \
                             bg-white text-neutral-700 border-neutral-300 \
                             dark:bg-neutral-700 dark:text-neutral-300 \
                             dark:border-neutral-600 hover:bg-neutral-50"
                        };

                        html! {
                            <button
                                key={size.to_string()}
                                type="button"
                                {class}
                                onclick={Callback::from(move |_: MouseEvent| {
                                    on_toggle.emit(size);
                                })}
                            >
                                {size.to_string()}
                            </button>
                        }
                    })}
                </div>
            </div>

            {if draft.selected_sizes().is_empty() {
                html! {}
            } else {
                html! {
                    <div>
                        <label class="block text-sm font-medium text-neutral-700 dark:text-neutral-300 mb-2">
                            {"Stock per Size"}
                        </label>
                        <div class="grid grid-cols-3 gap-3">
                            {for draft.selected_sizes().iter().map(|&size| {
                                let on_stock_change = props.on_stock_change.clone();
                                let oninput = Callback::from(move |e: InputEvent| {
                                    let input: HtmlInputElement =
                                        e.target_unchecked_into();
                                    on_stock_change.emit((size, input.value()));
                                });

                                html! {
                                    <div key={size.to_string()} class="flex items-center gap-2">
                                        <span class="w-10 text-sm text-neutral-600 dark:text-neutral-400">
                                            {size.to_string()}
                                        </span>
                                        <input
                                            type="number"
                                            min="0"
                                            step="1"
                                            value={draft.stock(size).to_string()}
                                            {oninput}
                                            class="w-full px-2 py-1 border border-neutral-300 dark:border-neutral-600
                                                   rounded-md bg-white dark:bg-neutral-700
                                                   text-neutral-900 dark:text-neutral-100 text-sm
                                                   focus:outline-none focus:ring-2 focus:ring-neutral-500"
                                        />
                                    </div>
                                }
                            })}
                        </div>
                    </div>
                }
            }}
        </div>
    }
}
