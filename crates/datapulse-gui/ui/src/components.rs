mod app_header;
mod confirm_delete_modal;
mod loading_panel;
mod management_page;
mod not_configured;
mod status_card;
mod status_grid;
mod task_modal;

pub use app_header::AppHeader;
pub use confirm_delete_modal::ConfirmDeleteModal;
pub use loading_panel::LoadingPanel;
pub use management_page::ManagementPage;
pub use not_configured::NotConfigured;
pub use status_card::StatusCard;
pub use status_grid::StatusGrid;
pub use task_modal::TaskModal;
