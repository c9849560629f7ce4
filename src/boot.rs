use log::{error, info, warn};
use std::fs;
use std::path::Path;
use std::process;

use crate::config::GalleryConfig;

/// Templates the router renders; a missing one turns its page into a 500.
const TEMPLATES: &[&str] = &[
    "base.html.tera",
    "home.html.tera",
    "gallery.html.tera",
    "view_image.html.tera",
    "modify_form.html.tera",
    "upload_form.html.tera",
    "contact.html.tera",
    "question.html.tera",
    "don.html.tera",
    "exemple.html.tera",
];

#[derive(Debug, Default, PartialEq)]
pub struct BootReport {
    pub warnings: u32,
    pub errors: u32,
}

/// Run all boot checks. Call this before Rocket launches.
/// Aborts the process if the data directories cannot be prepared.
pub fn run(config: &GalleryConfig) {
    info!("Gallery boot check starting...");
    let report = check(config);

    if report.errors > 0 {
        error!(
            "Boot check FAILED: {} error(s), {} warning(s). Aborting.",
            report.errors, report.warnings
        );
        process::exit(1);
    }

    if report.warnings > 0 {
        warn!(
            "Boot check passed with {} warning(s). Some pages may not render.",
            report.warnings
        );
    } else {
        info!("Boot check passed.");
    }
}

pub fn check(config: &GalleryConfig) -> BootReport {
    let mut report = BootReport::default();

    // ── 1. Data directories ────────────────────────────
    let db_dir = Path::new(&config.database_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty());
    let dirs = db_dir
        .into_iter()
        .chain([Path::new(&config.uploads_dir), Path::new(&config.static_dir)]);
    for dir in dirs {
        if dir.exists() {
            continue;
        }
        match fs::create_dir_all(dir) {
            Ok(_) => info!("  Created directory: {}", dir.display()),
            Err(e) => {
                error!("  FAILED to create directory {}: {}", dir.display(), e);
                report.errors += 1;
            }
        }
    }

    // ── 2. Uploads directory writable ──────────────────
    let uploads = Path::new(&config.uploads_dir);
    if uploads.exists() {
        let test_file = uploads.join(".write_test");
        match fs::write(&test_file, "test") {
            Ok(_) => {
                let _ = fs::remove_file(&test_file);
            }
            Err(e) => {
                error!("  Uploads directory not writable: {}", e);
                report.errors += 1;
            }
        }
    }

    // ── 3. Templates ───────────────────────────────────
    let templates = Path::new(&config.templates_dir);
    for name in TEMPLATES {
        if !templates.join(name).exists() {
            warn!("  Missing template: {}", templates.join(name).display());
            report.warnings += 1;
        }
    }

    report
}
