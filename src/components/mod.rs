pub mod editor_pane;
pub mod footer;
pub mod header;
pub mod modals;
pub mod sidebar;
pub mod summary;
