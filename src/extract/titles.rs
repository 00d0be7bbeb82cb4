use crate::extract::dates::{strip_from_first_date, DateMatch};
use crate::extract::html::collapse_whitespace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleRules {
    pub context_chars: usize,
    pub min_context_len: usize,
}

/// One title per match. Titles combine the row label with the text just
/// before the date, and are numbered when the scope holds several dates.
pub fn build_titles(text: &str, label: &str, matches: &[DateMatch], rules: TitleRules) -> Vec<String> {
    let numbered = matches.len() > 1;

    matches
        .iter()
        .enumerate()
        .map(|(index, date)| {
            let title = match preceding_context(text, date.source_offset, rules.context_chars) {
                Some(context) if is_descriptive(&context, label, rules.min_context_len) => {
                    format!("{label} - {context}")
                }
                _ => label.to_string(),
            };
            if numbered {
                format!("{title} ({})", index + 1)
            } else {
                title
            }
        })
        .collect()
}

/// Up to `max_chars` characters before `offset`, cut at the first date they
/// contain. `None` when the match opens the text.
pub fn preceding_context(text: &str, offset: usize, max_chars: usize) -> Option<String> {
    if offset == 0 || offset > text.len() || !text.is_char_boundary(offset) {
        return None;
    }
    let before = &text[..offset];
    let start = match max_chars.checked_sub(1) {
        Some(skip) => before
            .char_indices()
            .rev()
            .nth(skip)
            .map(|(index, _)| index)
            .unwrap_or(0),
        None => offset,
    };
    let window = collapse_whitespace(&before[start..]);
    Some(strip_from_first_date(&window).to_string())
}

fn is_descriptive(context: &str, label: &str, min_len: usize) -> bool {
    context.chars().count() > min_len && context != label && !context.starts_with(label)
}
