use super::command_palette::CommandKind;
use super::state::AppTextArea;
use tui_textarea::CursorMove;

/// The `/query` text that opened the palette, in character columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TriggerRange {
    pub row: usize,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Paragraph,
    Heading(u8),
    BulletList,
    NumberedList,
    TaskList,
    Quote,
}

impl BlockKind {
    fn prefix(self) -> &'static str {
        match self {
            BlockKind::Paragraph => "",
            BlockKind::Heading(1) => "# ",
            BlockKind::Heading(2) => "## ",
            BlockKind::Heading(_) => "### ",
            BlockKind::BulletList => "- ",
            BlockKind::NumberedList => "1. ",
            BlockKind::TaskList => "- [ ] ",
            BlockKind::Quote => "> ",
        }
    }
}

/// Length in characters of the block marker a line starts with.
#[must_use]
pub fn block_prefix_len(line: &str) -> usize {
    for marker in ["- [ ] ", "- [x] ", "- [X] ", "### ", "## ", "# ", "- ", "* ", "> "] {
        if line.starts_with(marker) {
            return marker.chars().count();
        }
    }
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 && line[digits..].starts_with(". ") {
        return digits + 2;
    }
    0
}

/// Cursor jump to a buffer position. Positions past the `u16` range land on
/// the last reachable row or column instead of wrapping.
#[must_use]
pub fn jump(row: usize, col: usize) -> CursorMove {
    CursorMove::Jump(
        u16::try_from(row).unwrap_or(u16::MAX),
        u16::try_from(col).unwrap_or(u16::MAX),
    )
}

/// Editing capabilities the slash commands need from the host editor.
pub trait EditorHost {
    fn cursor(&self) -> (usize, usize);
    fn delete_range(&mut self, range: TriggerRange);
    fn set_block(&mut self, row: usize, block: BlockKind);
    fn wrap_code_block(&mut self, row: usize);
    fn insert_text(&mut self, text: &str);
    fn select(&mut self, from: (usize, usize), to: (usize, usize));
    fn text_before_cursor(&self, max_chars: usize) -> String;
}

/// What activating a catalog entry does.
#[derive(Clone, Copy)]
pub enum Invocation {
    Edit(fn(&mut dyn EditorHost, TriggerRange)),
    Feedback,
    Completion,
}

/// Dispatch table from catalog entries to their behaviour.
#[must_use]
pub fn invocation(kind: CommandKind) -> Invocation {
    match kind {
        CommandKind::ContinueWriting => Invocation::Completion,
        CommandKind::SendFeedback => Invocation::Feedback,
        CommandKind::Text => Invocation::Edit(|host, range| block(host, range, BlockKind::Paragraph)),
        CommandKind::TodoList => Invocation::Edit(|host, range| block(host, range, BlockKind::TaskList)),
        CommandKind::Heading1 => Invocation::Edit(|host, range| block(host, range, BlockKind::Heading(1))),
        CommandKind::Heading2 => Invocation::Edit(|host, range| block(host, range, BlockKind::Heading(2))),
        CommandKind::Heading3 => Invocation::Edit(|host, range| block(host, range, BlockKind::Heading(3))),
        CommandKind::BulletList => {
            Invocation::Edit(|host, range| block(host, range, BlockKind::BulletList))
        }
        CommandKind::NumberedList => {
            Invocation::Edit(|host, range| block(host, range, BlockKind::NumberedList))
        }
        CommandKind::Quote => Invocation::Edit(|host, range| block(host, range, BlockKind::Quote)),
        CommandKind::Code => Invocation::Edit(|host, range| {
            host.delete_range(range);
            host.wrap_code_block(range.row);
        }),
        CommandKind::Image => Invocation::Edit(|host, range| {
            host.delete_range(range);
            host.insert_text("![image]()");
        }),
    }
}

fn block(host: &mut dyn EditorHost, range: TriggerRange, kind: BlockKind) {
    host.delete_range(range);
    host.set_block(range.row, kind);
}

impl EditorHost for AppTextArea<'_> {
    fn cursor(&self) -> (usize, usize) {
        self.0.cursor()
    }

    fn delete_range(&mut self, range: TriggerRange) {
        let len = range.end.saturating_sub(range.start);
        self.move_cursor(jump(range.row, range.start));
        if len > 0 {
            self.delete_str(len);
        }
    }

    fn set_block(&mut self, row: usize, block: BlockKind) {
        let Some(line) = self.lines().get(row) else {
            return;
        };
        let old_prefix = block_prefix_len(line);
        let (_, col) = self.0.cursor();
        let body_col = col.saturating_sub(old_prefix);
        let prefix = block.prefix();

        self.move_cursor(jump(row, 0));
        if old_prefix > 0 {
            self.delete_str(old_prefix);
        }
        self.insert_str(prefix);
        let new_col = prefix.chars().count() + body_col;
        self.move_cursor(jump(row, new_col));
    }

    fn wrap_code_block(&mut self, row: usize) {
        let (_, col) = self.0.cursor();
        self.move_cursor(jump(row, 0));
        self.insert_str("```");
        self.insert_newline();
        self.move_cursor(jump(row + 1, usize::MAX));
        self.insert_newline();
        self.insert_str("```");
        self.move_cursor(jump(row + 1, col));
    }

    fn insert_text(&mut self, text: &str) {
        self.insert_str(text);
    }

    fn select(&mut self, from: (usize, usize), to: (usize, usize)) {
        self.cancel_selection();
        self.move_cursor(jump(from.0, from.1));
        self.start_selection();
        self.move_cursor(jump(to.0, to.1));
    }

    fn text_before_cursor(&self, max_chars: usize) -> String {
        let (row, col) = self.0.cursor();
        let lines = self.lines();
        let mut text = lines[..row].join("\n");
        if row > 0 {
            text.push('\n');
        }
        if let Some(current) = lines.get(row) {
            text.extend(current.chars().take(col));
        }
        crate::domain::completion::context_excerpt(&text, max_chars)
    }
}

/// Cursor position after inserting `text` at `start`.
#[must_use]
pub fn end_of_insert(start: (usize, usize), text: &str) -> (usize, usize) {
    let mut lines = text.split('\n');
    let first = lines.next().unwrap_or_default();
    match lines.last() {
        Some(last) => (
            start.0 + text.matches('\n').count(),
            last.chars().count(),
        ),
        None => (start.0, start.1 + first.chars().count()),
    }
}
