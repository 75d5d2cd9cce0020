pub mod camera_view;
pub mod error_view;
pub mod header;
pub mod loading_indicator;
pub mod result_view;
pub mod settings_panel;
pub mod splash;
pub mod uncertain_view;
pub mod upload_area;
