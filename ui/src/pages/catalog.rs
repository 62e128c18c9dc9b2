use payloads::requests::CreateProduct;
use yew::prelude::*;
use yewdux::prelude::*;

use crate::State;
use crate::components::CreateProductModal;
use crate::state::CatalogEntry;
use crate::utils::time::{format_listing_time, localize_timestamp};

#[function_component]
pub fn CatalogPage() -> Html {
    let (state, dispatch) = use_store::<State>();
    let show_modal = use_state(|| false);

    let open_modal = {
        let show_modal = show_modal.clone();
        Callback::from(move |_: MouseEvent| show_modal.set(true))
    };

    let close_modal = {
        let show_modal = show_modal.clone();
        Callback::from(move |_: ()| show_modal.set(false))
    };

    let on_create = dispatch.reduce_mut_callback_with(
        |state, product: CreateProduct| {
            let id = state.add_product(product);
            tracing::info!("Added product {} to catalog", id);
        },
    );

    html! {
        <main class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
            <div class="flex items-center justify-between mb-6">
                <div>
                    <h1 class="text-2xl font-semibold text-neutral-900 dark:text-white">
                        {"Products"}
                    </h1>
                    <p class="text-sm text-neutral-600 dark:text-neutral-400">
                        {format!(
                            "{} products, {} units in stock",
                            state.products.len(),
                            state.total_units()
                        )}
                    </p>
                </div>
                <button
                    onclick={open_modal}
                    class="py-2 px-4 rounded-md shadow-sm text-sm font-medium text-white
                           bg-neutral-900 hover:bg-neutral-800
                           dark:bg-neutral-100 dark:text-neutral-900 dark:hover:bg-neutral-200
                           transition-colors duration-200"
                >
                    {"Add Product"}
                </button>
            </div>

            {if state.products.is_empty() {
                html! {
                    <div class="text-center py-12">
                        <p class="text-neutral-600 dark:text-neutral-400">
                            {"No products yet"}
                        </p>
                    </div>
                }
            } else {
                html! {
                    <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4">
                        {for state.products.iter().map(|entry| html! {
                            <ProductCard key={entry.id.to_string()} entry={entry.clone()} />
                        })}
                    </div>
                }
            }}

            if *show_modal {
                <CreateProductModal on_close={close_modal} {on_create} />
            }
        </main>
    }
}

#[derive(Properties, PartialEq)]
struct ProductCardProps {
    entry: CatalogEntry,
}

#[function_component]
fn ProductCard(props: &ProductCardProps) -> Html {
    let product = &props.entry.product;
    let created_at =
        format_listing_time(&localize_timestamp(product.created_at));
    let sizes = product
        .stocked_sizes()
        .map(|(size, qty)| format!("{size}: {qty}"))
        .collect::<Vec<_>>()
        .join(", ");

    html! {
        <div class="border border-neutral-200 dark:border-neutral-700 rounded-lg
                    overflow-hidden bg-white dark:bg-neutral-800">
            <div class="aspect-square bg-neutral-100 dark:bg-neutral-700">
                <img
                    src={product.image.clone()}
                    alt={product.name.clone()}
                    class="w-full h-full object-cover"
                />
            </div>
            <div class="p-4 space-y-1">
                <div class="flex items-start justify-between gap-2">
                    <h3 class="font-medium text-neutral-900 dark:text-neutral-100">
                        {&product.name}
                    </h3>
                    <span class="text-sm font-semibold text-neutral-900 dark:text-neutral-100">
                        {format!("{:.2}", product.price)}
                    </span>
                </div>
                <p class="text-xs uppercase tracking-wide text-neutral-500 dark:text-neutral-400">
                    {product.product_type.label()}
                </p>
                <p class="text-sm text-neutral-600 dark:text-neutral-400">
                    {if sizes.is_empty() { "Out of stock".to_string() } else { sizes }}
                </p>
                <p class="text-xs text-neutral-500 dark:text-neutral-400">
                    {created_at}
                </p>
            </div>
        </div>
    }
}
