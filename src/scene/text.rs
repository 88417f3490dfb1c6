//! Approximate text metrics for layout. Glyph shaping happens later in the rasterizer, so these
//! estimates only need to keep runs inside their boxes.

use crate::scene::node::FontFamily;

/// Average advance of one character as a fraction of the font size.
pub fn char_advance(family: FontFamily) -> f64 {
    match family {
        FontFamily::Sans => 0.55,
        FontFamily::Mono => 0.6,
    }
}

/// Estimated rendered width of `text`.
pub fn measure(text: &str, size: f64, family: FontFamily) -> f64 {
    text.chars().count() as f64 * size * char_advance(family)
}

/// Max characters of `family` at `size` that fit in `width`.
pub fn fit_chars(width: f64, size: f64, family: FontFamily) -> usize {
    let per = size * char_advance(family);
    if per <= 0.0 {
        return 0;
    }
    (width / per).floor().max(0.0) as usize
}

/// Cut `text` to at most `max_chars`, ending with an ellipsis when shortened.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }
    if max_chars == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max_chars - 1).collect();
    out.push('…');
    out
}

/// Greedy word wrap to lines of at most `max_chars`, keeping at most `max_lines`.
///
/// Words longer than a line are split. When lines are dropped the last kept line ends with an
/// ellipsis. Explicit newlines start a new line.
pub fn wrap(text: &str, max_chars: usize, max_lines: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines: Vec<String> = Vec::new();

    for para in text.lines() {
        let mut current = String::new();
        for word in para.split_whitespace() {
            let mut word: &str = word;
            loop {
                let cur_len = current.chars().count();
                let word_len = word.chars().count();
                let needed = if cur_len == 0 { word_len } else { cur_len + 1 + word_len };
                if needed <= max_chars {
                    if cur_len > 0 {
                        current.push(' ');
                    }
                    current.push_str(word);
                    break;
                }
                if cur_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    continue;
                }
                let split = word
                    .char_indices()
                    .nth(max_chars)
                    .map_or(word.len(), |(i, _)| i);
                lines.push(word[..split].to_owned());
                word = &word[split..];
                if word.is_empty() {
                    break;
                }
            }
        }
        lines.push(current);
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            let keep = max_chars.saturating_sub(1).min(last.chars().count());
            *last = last.chars().take(keep).collect::<String>();
            last.push('…');
        }
    }
    lines
}

#[cfg(test)]
#[path = "../../tests/unit/scene/text.rs"]
mod tests;
