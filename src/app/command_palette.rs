#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    ContinueWriting,
    SendFeedback,
    Text,
    TodoList,
    Heading1,
    Heading2,
    Heading3,
    BulletList,
    NumberedList,
    Quote,
    Code,
    Image,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub title: &'static str,
    pub description: &'static str,
    pub search_terms: &'static [&'static str],
    pub icon: &'static str,
    pub kind: CommandKind,
}

const CATALOG: &[CommandSpec] = &[
    CommandSpec {
        title: "Continue writing",
        description: "Use AI to expand your thoughts.",
        search_terms: &["gpt"],
        icon: "✦",
        kind: CommandKind::ContinueWriting,
    },
    CommandSpec {
        title: "Send Feedback",
        description: "Let us know how we can improve.",
        search_terms: &[],
        icon: "✉",
        kind: CommandKind::SendFeedback,
    },
    CommandSpec {
        title: "Text",
        description: "Just start typing with plain text.",
        search_terms: &["p", "paragraph"],
        icon: "¶",
        kind: CommandKind::Text,
    },
    CommandSpec {
        title: "To-do List",
        description: "Track tasks with a to-do list.",
        search_terms: &["todo", "task", "list", "check", "checkbox"],
        icon: "☐",
        kind: CommandKind::TodoList,
    },
    CommandSpec {
        title: "Heading 1",
        description: "Big section heading.",
        search_terms: &["title", "big", "large"],
        icon: "H1",
        kind: CommandKind::Heading1,
    },
    CommandSpec {
        title: "Heading 2",
        description: "Medium section heading.",
        search_terms: &["subtitle", "medium"],
        icon: "H2",
        kind: CommandKind::Heading2,
    },
    CommandSpec {
        title: "Heading 3",
        description: "Small section heading.",
        search_terms: &["subtitle", "small"],
        icon: "H3",
        kind: CommandKind::Heading3,
    },
    CommandSpec {
        title: "Bullet List",
        description: "Create a simple bullet list.",
        search_terms: &["unordered", "point"],
        icon: "•",
        kind: CommandKind::BulletList,
    },
    CommandSpec {
        title: "Numbered List",
        description: "Create a list with numbering.",
        search_terms: &["ordered"],
        icon: "1.",
        kind: CommandKind::NumberedList,
    },
    CommandSpec {
        title: "Quote",
        description: "Capture a quote.",
        search_terms: &["blockquote"],
        icon: "❝",
        kind: CommandKind::Quote,
    },
    CommandSpec {
        title: "Code",
        description: "Capture a code snippet.",
        search_terms: &["codeblock"],
        icon: "</>",
        kind: CommandKind::Code,
    },
    CommandSpec {
        title: "Image",
        description: "Insert an image from your computer.",
        search_terms: &["photo", "picture", "media"],
        icon: "▣",
        kind: CommandKind::Image,
    },
];

/// The slash-command catalog in display order.
#[must_use]
pub fn get_commands() -> &'static [CommandSpec] {
    CATALOG
}

/// Keep the commands matching `query`, in their original order.
///
/// The query matches when it occurs in the title or the description, or when
/// a search term contains it. Search terms are matched as written, so `"p"`
/// finds "Text" through its `"p"` term while `"paragraphs"` does not.
#[must_use]
pub fn search_commands(commands: &[CommandSpec], query: &str) -> Vec<CommandSpec> {
    if query.is_empty() {
        return commands.to_vec();
    }

    let search = query.to_lowercase();
    commands
        .iter()
        .filter(|cmd| {
            cmd.title.to_lowercase().contains(&search)
                || cmd.description.to_lowercase().contains(&search)
                || cmd.search_terms.iter().any(|term| term.contains(&search))
        })
        .copied()
        .collect()
}
