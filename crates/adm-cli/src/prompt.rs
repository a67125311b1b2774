//! Interactive yes/no confirmation

use std::io::{self, BufRead, Write};

/// Interpret a single answer line; `None` means ask again
pub fn parse_answer(line: &str) -> Option<bool> {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Ask `question` until the user answers yes or no.
///
/// End of input counts as "no".
pub fn confirm(input: &mut dyn BufRead, question: &str) -> io::Result<bool> {
    let mut stdout = io::stdout();
    loop {
        writeln!(stdout, "{}", question)?;
        stdout.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(false);
        }
        if let Some(answer) = parse_answer(&line) {
            return Ok(answer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_answer() {
        assert_eq!(parse_answer("y\n"), Some(true));
        assert_eq!(parse_answer("  YES "), Some(true));
        assert_eq!(parse_answer("n"), Some(false));
        assert_eq!(parse_answer("No\r\n"), Some(false));
        assert_eq!(parse_answer("maybe"), None);
        assert_eq!(parse_answer(""), None);
    }

    #[test]
    fn test_confirm_retries_until_answered() {
        let mut input = Cursor::new("what\n\nyes\n");
        assert!(confirm(&mut input, "Continue? (y/n)").unwrap());
    }

    #[test]
    fn test_confirm_eof_is_no() {
        let mut input = Cursor::new("");
        assert!(!confirm(&mut input, "Continue? (y/n)").unwrap());
        let mut input = Cursor::new("eh\n");
        assert!(!confirm(&mut input, "Continue? (y/n)").unwrap());
    }
}
