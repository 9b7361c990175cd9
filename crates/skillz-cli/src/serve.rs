//! `skillz serve`: the catalog server with graceful ctrl+c shutdown

use std::path::PathBuf;

use anyhow::{bail, Result};

use skillz_core::constants::catalog::SKILLS_URL_PREFIX;
use skillz_core::Settings;

/// Point the server at a `--root` directory laid out like the served site.
/// The server only reads local directories, so a remote `--url` is an error.
pub fn apply_source(settings: &mut Settings, root: Option<PathBuf>, url: Option<&str>) -> Result<()> {
    if let Some(url) = url {
        bail!("serve reads local directories; --url {} cannot be served", url);
    }
    if let Some(root) = root {
        settings.skills_dir = root.join(SKILLS_URL_PREFIX);
        settings.public_dir = root;
    }
    Ok(())
}

/// Run the serve command. Logging is already initialized (stdout).
pub async fn run(settings: Settings) -> Result<()> {
    print_banner(&settings);

    let server = skillz_server::start_server(settings.into());

    tokio::select! {
        result = server => {
            result?;
        }
        signal = tokio::signal::ctrl_c() => {
            signal?;
            println!("\n  Shutting down...");
        }
    }

    Ok(())
}

fn print_banner(settings: &Settings) {
    println!();
    println!("  \x1b[1;36m{}\x1b[0m server starting", settings.app_name);
    println!("  ─────────────────────────────────────");
    println!("  Local:   http://localhost:{}", settings.port);
    println!("  Skills:  {}", settings.skills_dir.display());
    println!("  Public:  {}", settings.public_dir.display());
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_maps_to_site_dirs() {
        let mut settings = Settings::default();
        apply_source(&mut settings, Some(PathBuf::from("site")), None).unwrap();
        assert_eq!(settings.public_dir, PathBuf::from("site"));
        assert_eq!(settings.skills_dir, PathBuf::from("site/skills"));
    }

    #[test]
    fn test_no_source_keeps_settings() {
        let mut settings = Settings::default();
        apply_source(&mut settings, None, None).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_url_is_rejected() {
        let mut settings = Settings::default();
        let err = apply_source(&mut settings, None, Some("https://x.io")).unwrap_err();
        assert!(err.to_string().contains("--url"));
    }
}
