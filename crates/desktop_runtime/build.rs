use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AppManifest {
    name: String,
    title: String,
    icon_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ShellManifest {
    schema_version: u32,
    #[serde(default)]
    window_manager: serde_json::Value,
    applications: Vec<AppManifest>,
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("shell.toml");
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let mut manifest: ShellManifest = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    if manifest.schema_version != 1 {
        panic!(
            "shell config schema mismatch in {}: expected 1 found {}",
            path.display(),
            manifest.schema_version
        );
    }
    if manifest.window_manager.is_null() {
        manifest.window_manager = serde_json::Value::Object(serde_json::Map::new());
    }
    if manifest.applications.is_empty() {
        panic!("shell config {} declares no applications", path.display());
    }

    let mut seen = BTreeSet::new();
    for app in &manifest.applications {
        if !seen.insert(app.name.as_str()) {
            panic!(
                "duplicate application `{}` in {}",
                app.name,
                path.display()
            );
        }
    }

    let json = serde_json::to_string_pretty(&manifest).expect("serialize shell config");
    let generated = format!(
        "/// Build-time generated shell configuration JSON.\n\
pub const SHELL_CONFIG_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("shell_config_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
