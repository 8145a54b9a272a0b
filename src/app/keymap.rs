use super::action::Action;
use super::state::AppMode;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

#[derive(Debug, PartialEq)]
pub struct KeyMap {
    /// Bindings available wherever no modal owns the keyboard.
    pub global: HashMap<KeyEvent, Action>,
    pub sidebar: HashMap<KeyEvent, Action>,
    pub template_selection: HashMap<KeyEvent, Action>,
}

impl Default for KeyMap {
    fn default() -> Self {
        let mut global = HashMap::new();
        let mut sidebar = HashMap::new();
        let mut template_selection = HashMap::new();

        global.insert(ctrl('q'), Action::Quit);
        global.insert(ctrl('s'), Action::SavePage);
        global.insert(ctrl('n'), Action::EnterTemplateSelection);
        global.insert(ctrl('b'), Action::ToggleSummary);
        global.insert(ctrl('e'), Action::ToggleSummaryDetail);
        global.insert(key(KeyCode::Tab), Action::FocusSidebar);
        global.insert(key(KeyCode::Esc), Action::CancelMode);

        sidebar.insert(key(KeyCode::Char('j')), Action::SidebarNext);
        sidebar.insert(key(KeyCode::Down), Action::SidebarNext);
        sidebar.insert(key(KeyCode::Char('k')), Action::SidebarPrev);
        sidebar.insert(key(KeyCode::Up), Action::SidebarPrev);
        sidebar.insert(key(KeyCode::Enter), Action::OpenSelectedPage);
        sidebar.insert(key(KeyCode::Char('o')), Action::OpenSelectedPage);
        sidebar.insert(key(KeyCode::Char('n')), Action::EnterTemplateSelection);
        sidebar.insert(key(KeyCode::Char('s')), Action::ToggleSidebarSort);
        sidebar.insert(key(KeyCode::Char('d')), Action::DeleteSelectedPage);
        sidebar.insert(key(KeyCode::Char('r')), Action::ReloadPages);
        sidebar.insert(key(KeyCode::Char('q')), Action::Quit);
        sidebar.insert(key(KeyCode::Tab), Action::FocusEditor);
        sidebar.insert(key(KeyCode::Esc), Action::FocusEditor);

        template_selection.insert(key(KeyCode::Char('j')), Action::TemplateNext);
        template_selection.insert(key(KeyCode::Down), Action::TemplateNext);
        template_selection.insert(key(KeyCode::Char('k')), Action::TemplatePrev);
        template_selection.insert(key(KeyCode::Up), Action::TemplatePrev);
        template_selection.insert(key(KeyCode::Enter), Action::CreateFromTemplate);
        template_selection.insert(key(KeyCode::Esc), Action::CancelMode);
        template_selection.insert(ctrl('q'), Action::Quit);

        Self {
            global,
            sidebar,
            template_selection,
        }
    }
}

impl KeyMap {
    #[must_use]
    pub fn get_action(&self, event: KeyEvent, mode: AppMode) -> Option<Action> {
        let event = normalize(event);
        let local = match mode {
            AppMode::Sidebar => self.sidebar.get(&event),
            AppMode::TemplateSelection => return self.template_selection.get(&event).cloned(),
            AppMode::Editor | AppMode::CommandPalette => None,
        };
        local.or_else(|| self.global.get(&event)).cloned()
    }
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::empty())
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

// Terminals disagree on whether shifted characters carry SHIFT, and key
// events may carry kind/state bits that must not affect lookup.
fn normalize(event: KeyEvent) -> KeyEvent {
    let modifiers = match event.code {
        KeyCode::Char(_) => event.modifiers - KeyModifiers::SHIFT,
        _ => event.modifiers,
    };
    KeyEvent::new(event.code, modifiers)
}
