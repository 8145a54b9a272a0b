pub mod command_palette;
pub mod helpers;
pub mod template_selection;

pub use command_palette::CommandPaletteModal;
pub use template_selection::TemplateSelectionModal;
