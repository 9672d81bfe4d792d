//! Console output of the one-shot `vote`, `reset` and `status` commands.
//!
//! Every line starts with a colored tag. Warnings and errors go to stderr so a
//! script reading stdout only sees what the ledger service confirmed.

use strum::Display;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Tag {
    Info,
    Warn,
    Error,
    Success,
}

impl Tag {
    fn ansi_color(self) -> &'static str {
        match self {
            Tag::Info => "1;33",
            Tag::Warn => "1;91",
            Tag::Error => "1;31",
            Tag::Success => "1;32",
        }
    }

    fn to_stderr(self) -> bool {
        matches!(self, Tag::Warn | Tag::Error)
    }
}

/// Formats one tagged line. Details follow the title after a tab.
pub fn format_line(tag: Tag, title: &str, details: Option<&str>) -> String {
    let mut line = format!("\x1b[{}m[{}]\x1b[0m {}", tag.ansi_color(), tag, title);
    if let Some(details) = details.filter(|d| !d.is_empty()) {
        line.push_str("\t ");
        line.push_str(details);
    }
    line
}

pub fn print_line(tag: Tag, title: &str, details: Option<&str>) {
    let line = format_line(tag, title, details);
    if tag.to_stderr() {
        eprintln!("{}", line);
    } else {
        println!("{}", line);
    }
}

#[macro_export]
macro_rules! print_cmd_info {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_line(
            $crate::cli_messages::Tag::Info,
            $title,
            Some(&format!($($details)*)),
        )
    };
}

#[macro_export]
macro_rules! print_cmd_warn {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_line(
            $crate::cli_messages::Tag::Warn,
            $title,
            Some(&format!($($details)*)),
        )
    };
}

/// Errors take the details as a plain `&str`, or none at all.
#[macro_export]
macro_rules! print_cmd_error {
    ($title:expr) => {
        $crate::cli_messages::print_line($crate::cli_messages::Tag::Error, $title, None)
    };
    ($title:expr, $details:expr) => {
        $crate::cli_messages::print_line($crate::cli_messages::Tag::Error, $title, Some($details))
    };
}

#[macro_export]
macro_rules! print_cmd_success {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_line(
            $crate::cli_messages::Tag::Success,
            $title,
            Some(&format!($($details)*)),
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_with_and_without_details() {
        assert_eq!(
            format_line(Tag::Success, "Vote recorded.", Some("0xabc")),
            "\x1b[1;32m[SUCCESS]\x1b[0m Vote recorded.\t 0xabc"
        );
        assert_eq!(
            format_line(Tag::Info, "Reset cancelled.", Some("")),
            "\x1b[1;33m[INFO]\x1b[0m Reset cancelled."
        );
        assert_eq!(
            format_line(Tag::Error, "Vote failed.", None),
            "\x1b[1;31m[ERROR]\x1b[0m Vote failed."
        );
    }
}
