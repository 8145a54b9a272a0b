use super::models::{Amount, EntryKind, LineItem};

/// Group label for transaction lines that appear before any heading.
pub const DEFAULT_GROUP: &str = "Other";

const LINE_MARKERS: &[&str] = &["- [ ] ", "- [x] ", "- [X] ", "- ", "* ", "> "];

/// Extract transaction lines from a page body.
///
/// Headings (`#` to `###`) set the group for the lines below them. A line is
/// a transaction when, after list, task or quote markers, it starts with a
/// sign glued to a digit: `+2.500.000 salary` is income, `-40.000 rent` an
/// expense. Fenced code blocks are skipped.
#[must_use]
pub fn parse_line_items<S: AsRef<str>>(lines: &[S]) -> Vec<LineItem> {
    let mut items = Vec::new();
    let mut group = DEFAULT_GROUP.to_string();
    let mut in_code = false;

    for line in lines {
        let line = line.as_ref().trim();

        if line.starts_with("```") {
            in_code = !in_code;
            continue;
        }
        if in_code || line.is_empty() {
            continue;
        }

        if let Some(title) = heading_title(line) {
            if !title.is_empty() {
                group = title.to_string();
            }
            continue;
        }

        if let Some((kind, amount)) = parse_entry(strip_markers(line)) {
            items.push(LineItem::new(group.clone(), amount, kind));
        }
    }

    items
}

fn heading_title(line: &str) -> Option<&str> {
    let hashes = line.chars().take_while(|c| *c == '#').count();
    if !(1..=3).contains(&hashes) {
        return None;
    }
    line[hashes..].strip_prefix(' ').map(str::trim)
}

fn strip_markers(mut line: &str) -> &str {
    loop {
        let stripped = LINE_MARKERS
            .iter()
            .find_map(|marker| line.strip_prefix(marker))
            .or_else(|| strip_ordinal(line));
        match stripped {
            Some(rest) => line = rest.trim_start(),
            None => return line,
        }
    }
}

fn strip_ordinal(line: &str) -> Option<&str> {
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    line[digits..].strip_prefix(". ")
}

fn parse_entry(text: &str) -> Option<(EntryKind, Amount)> {
    let mut chars = text.chars();
    let kind = match chars.next()? {
        '+' => EntryKind::Income,
        '-' => EntryKind::Expense,
        _ => return None,
    };
    let rest = chars.as_str();
    if !rest.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }

    let token: String = rest
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .filter(char::is_ascii_digit)
        .collect();

    match token.parse::<Amount>() {
        Ok(amount) => Some((kind, amount)),
        Err(e) => {
            tracing::warn!(line = text, error = %e, "amount out of range, line skipped");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_group_entries() {
        let body = [
            "# November",
            "+2.500.000 salary",
            "- [ ] -400.000 rent",
            "## December",
            "- +100 refund",
        ];
        let items = parse_line_items(&body);
        assert_eq!(
            items,
            vec![
                LineItem::new("November", 2_500_000, EntryKind::Income),
                LineItem::new("November", 400_000, EntryKind::Expense),
                LineItem::new("December", 100, EntryKind::Income),
            ]
        );
    }

    #[test]
    fn test_plain_bullets_are_not_entries() {
        let items = parse_line_items(&["- 40 apples", "-", "+ 3", "just text -5"]);
        assert!(items.is_empty());
    }

    #[test]
    fn test_lines_before_heading_use_default_group() {
        let items = parse_line_items(&["1. -15 coffee"]);
        assert_eq!(items, vec![LineItem::new(DEFAULT_GROUP, 15, EntryKind::Expense)]);
    }

    #[test]
    fn test_code_fences_are_skipped() {
        let items = parse_line_items(&["```", "+100", "```", "+5"]);
        assert_eq!(items, vec![LineItem::new(DEFAULT_GROUP, 5, EntryKind::Income)]);
    }

    #[test]
    fn test_out_of_range_amount_is_skipped() {
        let items = parse_line_items(&["+99999999999999999999 lottery", "-1.000 tea"]);
        assert_eq!(items, vec![LineItem::new(DEFAULT_GROUP, 1_000, EntryKind::Expense)]);
    }

    #[test]
    fn test_deep_headings_are_text() {
        let items = parse_line_items(&["# Food", "#### not a group", "-7"]);
        assert_eq!(items[0].group_label, "Food");
    }
}
