use std::path::Path;
use std::process;

use furi_core::settings;

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &Path) {
    let s = die!(
        settings::Settings::load(file),
        "Error in {}: {}",
        file.display()
    );
    println!(
        "OK: service.base_url={}, service.timeout_ms={}, service.endpoint={:?}",
        s.service.base_url, s.service.timeout_ms, s.service.endpoint
    );
}
