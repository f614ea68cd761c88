// src/config/trusted.rs

//! Best-effort probe for the trusted keyring parts directory baked into apt-key

use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;

static TRUSTED_PARTS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*local\s+TRUSTEDPARTS\s*=\s*"(/[\w\./]+)"$"#)
        .expect("TRUSTEDPARTS pattern is valid")
});

/// Find the first `local TRUSTEDPARTS="/..."` assignment in an apt-key script
///
/// Returns `None` when the script is missing, unreadable, or has no match.
pub fn scrape_trusted_parts(script: &Path) -> Option<PathBuf> {
    let file = match File::open(script) {
        Ok(file) => file,
        Err(e) => {
            debug!("Cannot read {}: {}", script.display(), e);
            return None;
        }
    };

    for line in BufReader::new(file).lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                debug!("Stopped reading {}: {}", script.display(), e);
                return None;
            }
        };

        if let Some(caps) = TRUSTED_PARTS_RE.captures(&line) {
            let parts = PathBuf::from(&caps[1]);
            debug!("apt-key declares TRUSTEDPARTS={}", parts.display());
            return Some(parts);
        }
    }

    debug!("No TRUSTEDPARTS assignment in {}", script.display());
    None
}
