//! UI Components
//!
//! Reusable Leptos components.

mod auth_modal;
mod dashboard_layout;
mod delete_confirm_button;
mod item_card;
mod multi_image_upload;
mod navbar;
mod quick_templates;
mod voice_input;

pub use auth_modal::AuthModal;
pub use dashboard_layout::DashboardLayout;
pub use delete_confirm_button::DeleteConfirmButton;
pub use item_card::ItemCard;
pub use multi_image_upload::{ImageSignal, MultiImageUpload};
pub use navbar::Navbar;
pub use quick_templates::QuickTemplates;
pub use voice_input::VoiceInput;
