//! Word wrapping for documentation comments.

/// Wrap `text` into lines no wider than `width` columns.
///
/// Lines only break between words. A word longer than `width` gets a line
/// of its own rather than being split, so joining the result with single
/// spaces gives back the whitespace-normalised input.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TEXT: &str = "The quick brown fox jumps over the lazy dog while a \
        particularly_long_identifier_that_cannot_fit waits its turn";

    #[test]
    fn breaks_at_word_boundaries() {
        let lines = wrap("alpha beta gamma delta", 11);
        assert_eq!(lines, vec!["alpha beta", "gamma delta"]);
    }

    #[test]
    fn rejoining_restores_the_text() {
        for width in [1, 5, 10, 20, 40, 80, 200] {
            let lines = wrap(TEXT, width);
            assert_eq!(lines.join(" "), TEXT, "width {width}");
            for line in &lines {
                assert!(
                    line.chars().count() <= width || !line.contains(' '),
                    "line '{line}' exceeds {width}"
                );
            }
        }
    }

    #[test]
    fn never_splits_words() {
        let words: Vec<&str> = TEXT.split(' ').collect();
        for line in wrap(TEXT, 7) {
            for word in line.split(' ') {
                assert!(words.contains(&word), "'{word}' is not a whole word");
            }
        }
    }

    #[test]
    fn empty_text_has_no_lines() {
        assert!(wrap("", 10).is_empty());
        assert!(wrap("   ", 10).is_empty());
    }
}
