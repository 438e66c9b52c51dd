//! Cleanup of language-model replies.

/// Split a reply into its meaningful lines.
///
/// Each line is trimmed and loses any leading or trailing `-` bullet
/// characters; lines left empty are dropped.
pub fn tidy_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim().trim_matches(|c: char| c == '-' || c == ' ').trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Like [`tidy_lines`], but rejoined into a single block.
pub fn tidy_block(text: &str) -> String {
    tidy_lines(text).join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tidy_lines_strips_bullets_and_blanks() {
        let reply = "- First caption\n\n-  Second caption \n   \n- Third\n";
        assert_eq!(
            tidy_lines(reply),
            vec!["First caption", "Second caption", "Third"]
        );
    }

    #[test]
    fn test_tidy_lines_handles_crlf_and_plain_lines() {
        let reply = "One\r\n- Two\r\n\r\nThree";
        assert_eq!(tidy_lines(reply), vec!["One", "Two", "Three"]);
    }

    #[test]
    fn test_tidy_lines_keeps_inner_dashes() {
        assert_eq!(
            tidy_lines("- Work-life balance? - never heard of it"),
            vec!["Work-life balance? - never heard of it"]
        );
    }

    #[test]
    fn test_tidy_lines_empty_reply() {
        assert!(tidy_lines("").is_empty());
        assert!(tidy_lines("\n - \n---\n").is_empty());
    }

    #[test]
    fn test_tidy_block_joins_lines() {
        assert_eq!(
            tidy_block("\n- A neon city at dusk\n\n- shot on 35mm\n"),
            "A neon city at dusk\nshot on 35mm"
        );
    }
}
