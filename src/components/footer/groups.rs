use super::types::{FooterGroup, FooterItem};
use crate::app::state::{AppMode, AppState};

pub fn get_groups(state: &AppState) -> Vec<FooterGroup> {
    if state.last_error.is_some() {
        return vec![FooterGroup {
            name: "NOTICE",
            items: vec![FooterItem::new("Esc", "dismiss")],
        }];
    }

    match state.mode {
        AppMode::Editor => vec![
            FooterGroup {
                name: "EDIT",
                items: vec![
                    FooterItem::new("/", "commands"),
                    FooterItem {
                        key: "^S",
                        desc: "save",
                        highlighted: state.editor.dirty,
                    },
                    FooterItem::new("^N", "new"),
                ],
            },
            FooterGroup {
                name: "VIEW",
                items: vec![
                    FooterItem::new("Tab", "pages"),
                    FooterItem {
                        key: "^B",
                        desc: "summary",
                        highlighted: state.show_summary,
                    },
                    FooterItem {
                        key: "^E",
                        desc: "details",
                        highlighted: state.summary_expanded,
                    },
                    FooterItem::new("^Q", "quit"),
                ],
            },
        ],
        AppMode::Sidebar => vec![
            FooterGroup {
                name: "PAGES",
                items: vec![
                    FooterItem::new("j/k", "move"),
                    FooterItem::new("Enter", "open"),
                    FooterItem::new("n", "new"),
                    FooterItem {
                        key: "d",
                        desc: "delete",
                        highlighted: state.sidebar.pending_delete.is_some(),
                    },
                ],
            },
            FooterGroup {
                name: "LIST",
                items: vec![
                    FooterItem::new("s", "sort"),
                    FooterItem::new("r", "reload"),
                    FooterItem::new("Esc", "editor"),
                ],
            },
        ],
        AppMode::CommandPalette => vec![FooterGroup {
            name: "COMMANDS",
            items: vec![
                FooterItem::new("↑/↓", "select"),
                FooterItem::new("Enter", "run"),
                FooterItem::new("Esc", "close"),
            ],
        }],
        AppMode::TemplateSelection => vec![FooterGroup {
            name: "TEMPLATE",
            items: vec![
                FooterItem::new("j/k", "select"),
                FooterItem::new("Enter", "create"),
                FooterItem::new("Esc", "cancel"),
            ],
        }],
    }
}
