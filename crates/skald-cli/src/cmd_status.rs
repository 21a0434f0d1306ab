use skald_core::Config;
use skald_log::SkaldPaths;
use skald_session::scan::resolve_root;
use std::path::Path;

pub fn execute(base: &Path) -> anyhow::Result<()> {
    let paths = SkaldPaths::discover(base.to_path_buf());
    let config = Config::load(&paths.config_json);

    println!("skald status");
    println!("  base:         {}", paths.root.display());
    println!(
        "  log file:     {} ({})",
        paths.log_file.display(),
        if paths.log_file_exists() {
            "present"
        } else {
            "missing — run `skald init`"
        }
    );
    println!("  keyword:      {}", config.keyword);
    println!("  debounce:     {} ms", config.debounce_ms);
    match resolve_root(&config) {
        Some(root) => println!(
            "  session store: {} ({})",
            root.display(),
            if root.is_dir() { "present" } else { "missing" }
        ),
        None => println!("  session store: unavailable (no platform config directory)"),
    }
    Ok(())
}
