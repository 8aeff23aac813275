pub mod color;
pub mod confirm;
pub mod dashboard;
pub mod editor;
pub mod filters_box;
pub mod help;
pub mod login;
pub mod note_form;
pub mod note_list;
pub mod popup;
pub mod status_bar;
pub mod subject_list;
pub mod tabs;
pub mod tags;
pub mod task_list;
