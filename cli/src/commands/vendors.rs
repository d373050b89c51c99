use colored::*;

use crate::terminal::{colors, print};
use sniffr_common::{config::Config, success, vendors::VendorRepository};
use sniffr_core::vendors::VendorTable;

pub fn vendors(cfg: &Config) -> anyhow::Result<()> {
    let mut table = VendorTable::builtin();
    if let Some(path) = &cfg.vendor_db {
        let merged = table.merge_file(path)?;
        success!("Merged {merged} entries from {}", path.display());
    }

    let entries = table.entries();
    // Vendor ids always render as four hex digits.
    let key_width = 4;

    for (id, name) in &entries {
        let value = if table.has_sub_types(*id) {
            format!("{} {}", name, "(sub-types decoded)".color(colors::ACCENT))
        } else {
            name.to_string()
        };
        print::aligned_line(&id.to_string(), &value, key_width);
    }

    print::fat_separator();
    print::centerln(&format!("{} vendor names known", table.len().to_string().bold().green()));
    Ok(())
}
