fn main() {
    catalog_ui::logs::init_logging();
    yew::Renderer::<catalog_ui::App>::new().render();
}
