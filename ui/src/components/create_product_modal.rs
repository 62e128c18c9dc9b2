use std::str::FromStr;

use jiff::Timestamp;
use payloads::{ProductSize, ProductType, requests::CreateProduct};
use strum::IntoEnumIterator;
use wasm_bindgen::JsCast;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::components::{ImageCapture, SizeStockEditor};
use crate::product_form::{DraftAction, ProductDraft};

#[derive(Properties, PartialEq)]
pub struct Props {
    pub on_close: Callback<()>,
    pub on_create: Callback<CreateProduct>,
}

/// Modal for adding a clothing or shoe product.
///
/// The draft lives only as long as the modal. On a valid submit the
/// request goes to `on_create` and the modal asks to be closed; on an
/// invalid one the error is shown and the draft is kept.
#[function_component]
pub fn CreateProductModal(props: &Props) -> Html {
    let draft = use_reducer(ProductDraft::default);
    let backdrop_ref = use_node_ref();

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        let backdrop_ref = backdrop_ref.clone();
        Callback::from(move |e: MouseEvent| {
            // Only close if clicking the backdrop itself, not its children
            if let Some(backdrop_element) =
                backdrop_ref.cast::<web_sys::Element>()
                && let Some(target) = e.target()
                && target.dyn_ref::<web_sys::Element>()
                    == Some(&backdrop_element)
            {
                on_close.emit(());
            }
        })
    };

    let on_name_input = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            draft.dispatch(DraftAction::SetName(input.value()));
        })
    };

    let on_price_input = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            draft.dispatch(DraftAction::SetPrice(input.value()));
        })
    };

    let on_type_change = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            match ProductType::from_str(&select.value()) {
                Ok(product_type) => {
                    draft.dispatch(DraftAction::SetType(product_type))
                }
                Err(_) => {
                    tracing::error!("Unknown product type {}", select.value())
                }
            }
        })
    };

    let on_toggle_size = {
        let draft = draft.clone();
        Callback::from(move |size: ProductSize| {
            draft.dispatch(DraftAction::ToggleSize(size));
        })
    };

    let on_stock_change = {
        let draft = draft.clone();
        Callback::from(move |(size, raw): (ProductSize, String)| {
            draft.dispatch(DraftAction::SetStock(size, raw));
        })
    };

    let on_image_change = {
        let draft = draft.clone();
        Callback::from(move |image: String| {
            draft.dispatch(DraftAction::SetImage(image));
        })
    };

    let on_image_clear = {
        let draft = draft.clone();
        Callback::from(move |_: ()| draft.dispatch(DraftAction::ClearImage))
    };

    let on_submit = {
        let draft = draft.clone();
        let on_create = props.on_create.clone();
        let on_close = props.on_close.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if let Err(err) =
                draft.submit(Timestamp::now(), &on_create, &on_close)
            {
                draft.dispatch(DraftAction::Reject(err));
            }
        })
    };

    html! {
        <div
            ref={backdrop_ref}
            class="fixed inset-0 bg-neutral-900 bg-opacity-50 flex items-center justify-center z-50"
            onclick={on_backdrop_click}
        >
            <div class="bg-white dark:bg-neutral-800 p-6 rounded-lg shadow-xl max-w-lg w-full mx-4
                        max-h-[90vh] overflow-y-auto border border-neutral-200 dark:border-neutral-700">
                <div class="flex justify-between items-center mb-4">
                    <h3 class="text-lg font-semibold text-neutral-900 dark:text-neutral-100">
                        {"Add New Product"}
                    </h3>
                    <button
                        type="button"
                        onclick={props.on_close.reform(|_: MouseEvent| ())}
                        class="text-neutral-500 hover:text-neutral-700 dark:text-neutral-400 dark:hover:text-neutral-200 text-2xl leading-none p-1"
                        title="Close"
                    >
                        {"×"}
                    </button>
                </div>

                {if let Some(err) = draft.rejection() {
                    html! {
                        <div class="p-4 rounded-md bg-red-50 dark:bg-red-900/20 border border-red-200 dark:border-red-800 mb-4">
                            <p class="text-sm text-red-700 dark:text-red-400">{err.to_string()}</p>
                        </div>
                    }
                } else {
                    html! {}
                }}

                <form onsubmit={on_submit} class="space-y-4">
                    <div>
                        <label class="block text-sm font-medium text-neutral-700 dark:text-neutral-300 mb-2">
                            {"Product Image *"}
                        </label>
                        <ImageCapture
                            image={AttrValue::from(draft.image().to_string())}
                            on_change={on_image_change}
                            on_clear={on_image_clear}
                        />
                    </div>

                    <div>
                        <label class="block text-sm font-medium text-neutral-700 dark:text-neutral-300 mb-2">
                            {"Name *"}
                        </label>
                        <input
                            type="text"
                            value={draft.name().to_string()}
                            oninput={on_name_input}
                            class="w-full px-3 py-2 border border-neutral-300 dark:border-neutral-600
                                   rounded-md shadow-sm bg-white dark:bg-neutral-700
                                   text-neutral-900 dark:text-neutral-100
                                   focus:outline-none focus:ring-2 focus:ring-neutral-500 focus:border-neutral-500"
                            placeholder="Enter product name"
                        />
                    </div>

                    <div class="grid grid-cols-2 gap-4">
                        <div>
                            <label class="block text-sm font-medium text-neutral-700 dark:text-neutral-300 mb-2">
                                {"Price *"}
                            </label>
                            <input
                                type="number"
                                step="0.01"
                                min="0"
                                value={draft.price().to_string()}
                                oninput={on_price_input}
                                class="w-full px-3 py-2 border border-neutral-300 dark:border-neutral-600
                                       rounded-md shadow-sm bg-white dark:bg-neutral-700
                                       text-neutral-900 dark:text-neutral-100
                                       focus:outline-none focus:ring-2 focus:ring-neutral-500 focus:border-neutral-500"
                                placeholder="0.00"
                            />
                        </div>

                        <div>
                            <label class="block text-sm font-medium text-neutral-700 dark:text-neutral-300 mb-2">
                                {"Type"}
                            </label>
                            <select
                                onchange={on_type_change}
                                class="w-full px-3 py-2 border border-neutral-300 dark:border-neutral-600
                                       rounded-md shadow-sm bg-white dark:bg-neutral-700
                                       text-neutral-900 dark:text-neutral-100
                                       focus:outline-none focus:ring-2 focus:ring-neutral-500"
                            >
                                {for ProductType::iter().map(|product_type| html! {
                                    <option
                                        value={product_type.to_string()}
                                        selected={product_type == draft.product_type()}
                                    >
                                        {product_type.label()}
                                    </option>
                                })}
                            </select>
                        </div>
                    </div>

                    <SizeStockEditor
                        draft={(*draft).clone()}
                        on_toggle={on_toggle_size}
                        on_stock_change={on_stock_change}
                    />

                    <div class="flex gap-3 pt-4">
                        <button
                            type="button"
                            onclick={props.on_close.reform(|_: MouseEvent| ())}
                            class="flex-1 py-2 px-4 border border-neutral-300 dark:border-neutral-600
                                   rounded-md shadow-sm text-sm font-medium text-neutral-700 dark:text-neutral-300
                                   bg-white dark:bg-neutral-700 hover:bg-neutral-50 dark:hover:bg-neutral-600
                                   focus:outline-none focus:ring-2 focus:ring-offset-2 focus:ring-neutral-500
                                   transition-colors duration-200"
                        >
                            {"Cancel"}
                        </button>
                        <button
                            type="submit"
                            class="flex-1 py-2 px-4 border border-transparent
                                   rounded-md shadow-sm text-sm font-medium text-white
                                   bg-neutral-900 hover:bg-neutral-800
                                   dark:bg-neutral-100 dark:text-neutral-900 dark:hover:bg-neutral-200
                                   focus:outline-none focus:ring-2 focus:ring-offset-2 focus:ring-neutral-500
                                   transition-colors duration-200"
                        >
                            {"Add Product"}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
