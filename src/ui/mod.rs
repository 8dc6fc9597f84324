pub mod dashboard;
pub mod guide_view;
pub mod panels;
pub mod table_view;
