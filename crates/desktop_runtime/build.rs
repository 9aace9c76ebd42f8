use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const LAYOUT_FILE: &str = "desktop.layout.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct IconManifest {
    icon_id: String,
    label: String,
    glyph: String,
    anchor: String,
    x: i32,
    y: i32,
    #[serde(default)]
    opens: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WindowManifest {
    window_id: String,
    title: String,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    #[serde(default)]
    resizable: bool,
    #[serde(default = "enabled")]
    maximizable: bool,
    #[serde(default = "enabled")]
    draggable: bool,
    #[serde(default)]
    menu_label: Option<String>,
    #[serde(default)]
    body: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LayoutManifest {
    schema_version: u32,
    title: String,
    icons: Vec<IconManifest>,
    windows: Vec<WindowManifest>,
}

fn enabled() -> bool {
    true
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join(LAYOUT_FILE);
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let layout: LayoutManifest = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    if layout.schema_version != 1 {
        panic!(
            "layout schema mismatch in {}: expected 1 found {}",
            path.display(),
            layout.schema_version
        );
    }
    for icon in &layout.icons {
        if !matches!(
            icon.anchor.as_str(),
            "top-left" | "top-right" | "bottom-left" | "bottom-right"
        ) {
            panic!(
                "icon `{}` in {} has unknown anchor `{}`",
                icon.icon_id,
                path.display(),
                icon.anchor
            );
        }
    }

    let json = serde_json::to_string_pretty(&layout).expect("serialize desktop layout");
    let generated = format!(
        "/// Build-time generated desktop layout catalog JSON.\n\
pub const DESKTOP_LAYOUT_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("desktop_layout_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
