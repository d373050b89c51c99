use colored::*;

use crate::terminal::print;

const BANNER: &str = r#"
               _  __  __
     ___ _ __ (_)/ _|/ _|_ __
    / __| '_ \| | |_| |_| '__|
    \__ \ | | | |  _|  _| |
    |___/_| |_|_|_| |_| |_|
"#;

pub fn print() {
    print::print(&format!("{}", BANNER.bright_blue().bold()));
}
