//! Plain terminal output. Every line goes through [`print`], which hands it to
//! the tracing formatter so it never tears the spinner.

use colored::*;
use tracing::info;
use unicode_width::UnicodeWidthStr;

use crate::terminal::{banner, colors, logging};

pub const TOTAL_WIDTH: usize = 64;
const TREE_KEY_WIDTH: usize = 8;

#[macro_export]
macro_rules! mprint {
    () => {
        $crate::terminal::print::print("");
    };
    ($msg:expr) => {
        $crate::terminal::print::print($msg);
    };
}

pub fn print(msg: &str) {
    info!(target: logging::PRINT_TARGET, raw_msg = msg);
}

/// `text` centred in a rule of `fill` characters spanning [`TOTAL_WIDTH`].
fn ruled(text: &str, fill: &str) -> (String, String) {
    let free = TOTAL_WIDTH.saturating_sub(console::measure_text_width(text));
    let left = free / 2;
    (fill.repeat(left), fill.repeat(free - left))
}

pub fn banner(no_banner: bool, q_level: u8) {
    if no_banner || q_level > 0 {
        return;
    }

    let title = format!("⟦ SNIFFR v{} ⟧", env!("CARGO_PKG_VERSION"));
    let (left, right) = ruled(&title, "═");
    print(&format!(
        "{}{}{}",
        left.bright_black(),
        title.bright_green().bold(),
        right.bright_black()
    ));
    banner::print();
}

pub fn header(msg: &str, q_level: u8) {
    if q_level > 0 {
        return;
    }

    let title = format!("⟦ {} ⟧", msg.to_uppercase());
    let (left, right) = ruled(&title, "─");
    print(&format!(
        "{}{}{}",
        left.bright_black(),
        title.bright_green(),
        right.bright_black()
    ));
}

pub fn fat_separator() {
    print(&"═".repeat(TOTAL_WIDTH).bright_black().to_string());
}

/// `key....: value` with the dots padding `key` to `width` columns.
pub fn aligned_line(key: &str, value: &str, width: usize) {
    let dots = ".".repeat((width + 1).saturating_sub(key.width()));
    print_status(format!(
        "{}{}{} {}",
        key.color(colors::PRIMARY),
        dots.color(colors::SEPARATOR),
        ":".color(colors::SEPARATOR),
        value
    ));
}

pub fn print_status<T: AsRef<str>>(msg: T) {
    print(&format!("{} {}", ">".color(colors::SEPARATOR), msg.as_ref()));
}

pub fn tree_head(idx: usize, name: &str) {
    print(&format!(
        "{}{}{} {}",
        "[".color(colors::SEPARATOR),
        idx.to_string().color(colors::ACCENT),
        "]".color(colors::SEPARATOR),
        name.color(colors::PRIMARY)
    ));
}

pub fn as_tree_one_level(details: Vec<(String, ColoredString)>) {
    let last = details.len().saturating_sub(1);
    for (i, (key, value)) in details.into_iter().enumerate() {
        let branch = if i == last { "└─" } else { "├─" };
        let dots = ".".repeat(TREE_KEY_WIDTH.saturating_sub(key.width()));
        print(&format!(
            " {} {}{}{} {}",
            branch.bright_black(),
            key.color(colors::TEXT_DEFAULT),
            dots.color(colors::SEPARATOR),
            ":".color(colors::SEPARATOR),
            value
        ));
    }
}

pub fn centerln(msg: &str) {
    let (left, right) = ruled(msg, " ");
    print(&format!("{left}{msg}{right}"));
}

const NO_SIGNAL: &str = r#"
         _   _  ___    ____ ___ ____ _   _    _    _     
        | \ | |/ _ \  / ___|_ _/ ___| \ | |  / \  | |    
        |  \| | | | | \___ \| | |  _|  \| | / _ \ | |    
        | |\  | |_| |  ___) | | |_| | |\  |/ ___ \| |___ 
        |_| \_|\___/  |____/___\____|_| \_/_/   \_\_____|
"#;

pub fn no_results() {
    print(&NO_SIGNAL.red().bold().to_string());
}
