pub mod create_project_modal;
pub mod project_card;
pub mod projects_page;
pub mod settings_panel;
