pub mod create_product_modal;
pub mod image_capture;
pub mod size_stock_editor;

pub use create_product_modal::CreateProductModal;
pub use image_capture::ImageCapture;
pub use size_stock_editor::SizeStockEditor;
