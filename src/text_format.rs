//! List and checkbox formatting over plain text content.
//!
//! Line prefixes (`•`, `N.`, `▪`, `[ ]`/`[x]`/`[-]`) are the only
//! record of list and checkbox state: formatting rewrites the string,
//! and a prefix edited away by hand simply means the state is gone and
//! the line is plain text again.

/// List style a line (or whole block) can be formatted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStyle {
    Bullet,
    Numbered,
    Square,
    Checkbox,
}

/// Three-state checkbox embedded in a line prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckboxState {
    Empty,
    Completed,
    Failed,
}

impl CheckboxState {
    pub fn marker(self) -> &'static str {
        match self {
            Self::Empty => "[ ]",
            Self::Completed => "[x]",
            Self::Failed => "[-]",
        }
    }

    /// `empty → completed → failed → empty`.
    pub fn next(self) -> Self {
        match self {
            Self::Empty => Self::Completed,
            Self::Completed => Self::Failed,
            Self::Failed => Self::Empty,
        }
    }
}

/// Prefix recognized at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinePrefix {
    Bullet,
    Numbered(u32),
    Square,
    Checkbox(CheckboxState),
}

/// Split a line into its recognized prefix (if any) and the rest.
pub fn split_prefix(line: &str) -> (Option<LinePrefix>, &str) {
    for (marker, state) in [
        ("[ ]", CheckboxState::Empty),
        ("[x]", CheckboxState::Completed),
        ("[-]", CheckboxState::Failed),
    ] {
        if let Some(rest) = line.strip_prefix(marker) {
            return (Some(LinePrefix::Checkbox(state)), rest.strip_prefix(' ').unwrap_or(rest));
        }
    }
    if let Some(rest) = line.strip_prefix('•') {
        return (Some(LinePrefix::Bullet), rest.strip_prefix(' ').unwrap_or(rest));
    }
    if let Some(rest) = line.strip_prefix('▪') {
        return (Some(LinePrefix::Square), rest.strip_prefix(' ').unwrap_or(rest));
    }
    let digits: usize = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        if let Some(rest) = line[digits..].strip_prefix('.') {
            if let Ok(number) = line[..digits].parse::<u32>() {
                return (
                    Some(LinePrefix::Numbered(number)),
                    rest.strip_prefix(' ').unwrap_or(rest),
                );
            }
        }
    }
    (None, line)
}

fn prefixed(style: ListStyle, number: u32, body: &str) -> String {
    match style {
        ListStyle::Bullet => format!("• {body}"),
        ListStyle::Numbered => format!("{number}. {body}"),
        ListStyle::Square => format!("▪ {body}"),
        ListStyle::Checkbox => format!("[ ] {body}"),
    }
}

/// Number for a line whose predecessor is `previous`: one past the
/// predecessor's number when it is itself numbered, otherwise 1.
fn next_number_after(previous: Option<&str>) -> u32 {
    match previous.map(split_prefix) {
        Some((Some(LinePrefix::Numbered(n)), _)) => n + 1,
        _ => 1,
    }
}

/// Apply `style` to every line of `text`. Existing prefixes are
/// stripped first; numbered lines count up from 1.
pub fn apply_list_style(text: &str, style: ListStyle) -> String {
    let mut out = Vec::new();
    let mut number = 1;
    for line in text.split('\n') {
        let (_, body) = split_prefix(line);
        out.push(prefixed(style, number, body));
        number += 1;
    }
    out.join("\n")
}

/// Apply `style` to the single line at `line_index` (the line holding
/// the caret during an edit session). A numbered prefix continues the
/// preceding line's count.
pub fn apply_list_style_to_line(text: &str, line_index: usize, style: ListStyle) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let Some(target) = lines.get(line_index) else {
        return text.to_owned();
    };
    let number = next_number_after(line_index.checked_sub(1).and_then(|i| lines.get(i).copied()));
    let (_, body) = split_prefix(target);
    let replacement = prefixed(style, number, body);

    let mut out: Vec<String> = lines.iter().map(|l| (*l).to_owned()).collect();
    out[line_index] = replacement;
    out.join("\n")
}

/// Remove any list/checkbox prefix from every line.
pub fn clear_list_style(text: &str) -> String {
    text.split('\n')
        .map(|line| split_prefix(line).1)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Advance the checkbox on the line at `line_index` through the
/// three-state cycle. Returns `None` when that line carries no
/// checkbox prefix.
pub fn cycle_checkbox_at_line(text: &str, line_index: usize) -> Option<String> {
    let lines: Vec<&str> = text.split('\n').collect();
    let target = lines.get(line_index)?;
    let (prefix, body) = split_prefix(target);
    let Some(LinePrefix::Checkbox(state)) = prefix else {
        return None;
    };

    let mut out: Vec<String> = lines.iter().map(|l| (*l).to_owned()).collect();
    out[line_index] = format!("{} {}", state.next().marker(), body);
    Some(out.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_every_known_prefix() {
        for line in ["• task", "3. task", "▪ task", "[ ] task", "[x] task", "[-] task"] {
            assert_eq!(split_prefix(line).1, "task", "line: {line}");
        }
        assert_eq!(split_prefix("plain task"), (None, "plain task"));
    }

    #[test]
    fn reformat_replaces_existing_prefix() {
        let text = "• one\n[x] two";
        assert_eq!(apply_list_style(text, ListStyle::Square), "▪ one\n▪ two");
    }

    #[test]
    fn numbered_list_counts_up() {
        let text = "alpha\nbeta\ngamma";
        assert_eq!(
            apply_list_style(text, ListStyle::Numbered),
            "1. alpha\n2. beta\n3. gamma"
        );
    }

    #[test]
    fn caret_line_numbering_continues_from_predecessor() {
        let text = "2. beta\ngamma";
        assert_eq!(
            apply_list_style_to_line(text, 1, ListStyle::Numbered),
            "2. beta\n3. gamma"
        );
        // No numbered predecessor: start at 1.
        let text = "plain\ngamma";
        assert_eq!(
            apply_list_style_to_line(text, 1, ListStyle::Numbered),
            "plain\n1. gamma"
        );
    }

    #[test]
    fn checkbox_cycle_full_loop() {
        let text = "[ ] Buy milk";
        let once = cycle_checkbox_at_line(text, 0).unwrap();
        assert_eq!(once, "[x] Buy milk");
        let twice = cycle_checkbox_at_line(&once, 0).unwrap();
        assert_eq!(twice, "[-] Buy milk");
        let thrice = cycle_checkbox_at_line(&twice, 0).unwrap();
        assert_eq!(thrice, "[ ] Buy milk");
    }

    #[test]
    fn cycle_on_plain_line_is_none() {
        assert!(cycle_checkbox_at_line("Buy milk", 0).is_none());
        assert!(cycle_checkbox_at_line("[ ] task", 5).is_none());
    }

    #[test]
    fn clearing_returns_plain_lines() {
        assert_eq!(clear_list_style("1. a\n• b\n[x] c"), "a\nb\nc");
    }
}
