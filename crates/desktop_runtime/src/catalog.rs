//! Built-in desktop layout: which icons sit on the desktop and which windows they open.
//!
//! The catalog is authored in `desktop.layout.toml`, checked and converted to JSON by the build
//! script, and parsed once on first use.

use std::{collections::BTreeSet, sync::OnceLock};

use serde::Deserialize;
use thiserror::Error;

use crate::{
    model::{IconId, Point, Viewport, WindowId, WindowRect},
    reducer::OpenWindowRequest,
    window_manager::WindowFlags,
};

include!(concat!(env!("OUT_DIR"), "/desktop_layout_generated.rs"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconAnchor {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IconEntry {
    pub icon_id: String,
    pub label: String,
    pub glyph: String,
    pub anchor: IconAnchor,
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub opens: Option<String>,
}

impl IconEntry {
    pub fn id(&self) -> IconId {
        IconId::new(self.icon_id.clone())
    }

    pub fn opens_window(&self) -> Option<WindowId> {
        self.opens.clone().map(WindowId)
    }

    /// Resolves the anchored offsets into a raw pixel position for `viewport`.
    pub fn initial_position(&self, viewport: Viewport) -> Point {
        match self.anchor {
            IconAnchor::TopLeft => Point::new(self.x, self.y),
            IconAnchor::TopRight => Point::new(viewport.width - self.x, self.y),
            IconAnchor::BottomLeft => Point::new(self.x, viewport.height - self.y),
            IconAnchor::BottomRight => {
                Point::new(viewport.width - self.x, viewport.height - self.y)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WindowEntry {
    pub window_id: String,
    pub title: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub resizable: bool,
    #[serde(default = "enabled")]
    pub maximizable: bool,
    #[serde(default = "enabled")]
    pub draggable: bool,
    #[serde(default)]
    pub menu_label: Option<String>,
    #[serde(default)]
    pub body: Vec<String>,
}

fn enabled() -> bool {
    true
}

impl WindowEntry {
    pub fn id(&self) -> WindowId {
        WindowId::new(self.window_id.clone())
    }

    pub fn default_rect(&self) -> WindowRect {
        WindowRect {
            x: self.x,
            y: self.y,
            w: self.width,
            h: self.height,
        }
    }

    pub fn flags(&self) -> WindowFlags {
        WindowFlags {
            draggable: self.draggable,
            resizable: self.resizable,
            maximizable: self.maximizable,
        }
    }

    /// Request that opens this window at its default geometry.
    pub fn open_request(&self) -> OpenWindowRequest {
        OpenWindowRequest {
            window_id: self.id(),
            title: self.title.clone(),
            rect: self.default_rect(),
            flags: self.flags(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DesktopLayout {
    pub schema_version: u32,
    pub title: String,
    pub icons: Vec<IconEntry>,
    pub windows: Vec<WindowEntry>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("desktop layout parse failed: {0}")]
    Parse(String),
    #[error("unsupported desktop layout schema version {0}")]
    UnsupportedSchema(u32),
    #[error("duplicate icon id `{0}`")]
    DuplicateIcon(String),
    #[error("duplicate window id `{0}`")]
    DuplicateWindow(String),
    #[error("icon `{icon_id}` opens unknown window `{window_id}`")]
    UnknownWindowTarget { icon_id: String, window_id: String },
    #[error("icon `{0}` is not in the desktop layout")]
    UnknownIcon(String),
}

impl DesktopLayout {
    /// Parses and validates a layout catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] when the payload is malformed or internally inconsistent.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let layout: Self =
            serde_json::from_str(raw).map_err(|err| CatalogError::Parse(err.to_string()))?;
        layout.validate()?;
        Ok(layout)
    }

    /// Checks id uniqueness and that every icon target names a known window.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.schema_version != 1 {
            return Err(CatalogError::UnsupportedSchema(self.schema_version));
        }
        let mut window_ids = BTreeSet::new();
        for window in &self.windows {
            if !window_ids.insert(window.window_id.as_str()) {
                return Err(CatalogError::DuplicateWindow(window.window_id.clone()));
            }
        }
        let mut icon_ids = BTreeSet::new();
        for icon in &self.icons {
            if !icon_ids.insert(icon.icon_id.as_str()) {
                return Err(CatalogError::DuplicateIcon(icon.icon_id.clone()));
            }
            if let Some(target) = &icon.opens {
                if !window_ids.contains(target.as_str()) {
                    return Err(CatalogError::UnknownWindowTarget {
                        icon_id: icon.icon_id.clone(),
                        window_id: target.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn icon(&self, icon_id: &IconId) -> Option<&IconEntry> {
        self.icons.iter().find(|icon| icon.icon_id == icon_id.as_str())
    }

    pub fn window(&self, window_id: &WindowId) -> Option<&WindowEntry> {
        self.windows
            .iter()
            .find(|window| window.window_id == window_id.as_str())
    }

    /// Resolves the window an activated icon opens, if it opens one.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownIcon`] or [`CatalogError::UnknownWindowTarget`] when the
    /// icon or its target is missing from the layout.
    pub fn activation_target(
        &self,
        icon_id: &IconId,
    ) -> Result<Option<&WindowEntry>, CatalogError> {
        let icon = self
            .icon(icon_id)
            .ok_or_else(|| CatalogError::UnknownIcon(icon_id.to_string()))?;
        let Some(window_id) = icon.opens_window() else {
            return Ok(None);
        };
        self.window(&window_id)
            .map(Some)
            .ok_or_else(|| CatalogError::UnknownWindowTarget {
                icon_id: icon.icon_id.clone(),
                window_id: window_id.to_string(),
            })
    }

    /// Windows listed in the menu bar, in catalog order.
    pub fn menu_windows(&self) -> impl Iterator<Item = (&str, &WindowEntry)> {
        self.windows.iter().filter_map(|window| {
            window
                .menu_label
                .as_deref()
                .map(|label| (label, window))
        })
    }
}

/// Returns the built-in desktop layout.
pub fn desktop_layout() -> &'static DesktopLayout {
    static LAYOUT: OnceLock<DesktopLayout> = OnceLock::new();
    LAYOUT.get_or_init(|| {
        serde_json::from_str(DESKTOP_LAYOUT_JSON)
            .expect("generated desktop layout catalog should parse")
    })
}
