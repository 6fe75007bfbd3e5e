use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{AnnotileError, AnnotileResult};

/// A font registered with a [`FontLibrary`]: the shaping-side family plus the
/// raster-side font data.
#[derive(Clone)]
pub struct LoadedFont {
    family: String,
    render_font: vello_cpu::peniko::FontData,
}

impl LoadedFont {
    /// Family name as detected from the font data.
    pub fn family(&self) -> &str {
        &self.family
    }

    pub(crate) fn render_font(&self) -> &vello_cpu::peniko::FontData {
        &self.render_font
    }
}

impl std::fmt::Debug for LoadedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedFont")
            .field("family", &self.family)
            .finish()
    }
}

/// Explicit font-resolver handle for [`crate::LabelCompositor`].
///
/// Fonts are loaded once up front (bytes, files, or whole directories),
/// keyed by the family name detected from the font data, and resolved
/// read-only afterwards. The first registered family becomes the default;
/// an unknown family degrades to that default with a warning instead of
/// failing the call.
pub struct FontLibrary {
    font_ctx: parley::FontContext,
    fonts: HashMap<String, LoadedFont>,
    default_family: Option<String>,
}

impl Default for FontLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl FontLibrary {
    /// Construct an empty library.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            fonts: HashMap::new(),
            default_family: None,
        }
    }

    /// Register a font from raw TTF/OTF bytes, returning its family name.
    pub fn register_font_bytes(&mut self, bytes: Vec<u8>) -> AnnotileResult<String> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| AnnotileError::config("no font families registered from font bytes"))?;
        let family = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| AnnotileError::config("registered font family has no name"))?
            .to_string();

        let render_font =
            vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0);
        let key = family.to_ascii_lowercase();
        if self.default_family.is_none() {
            self.default_family = Some(key.clone());
        }
        self.fonts.insert(key, LoadedFont {
            family: family.clone(),
            render_font,
        });
        Ok(family)
    }

    /// Register a font file, returning its family name.
    pub fn load_font_file(&mut self, path: &Path) -> AnnotileResult<String> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font file '{}'", path.display()))?;
        self.register_font_bytes(bytes)
    }

    /// Register every `ttf`/`otf`/`ttc` file in `dir`, returning how many
    /// loaded. Unreadable entries and non-font files are skipped.
    pub fn load_font_dir(&mut self, dir: &Path) -> usize {
        let Ok(rd) = std::fs::read_dir(dir) else {
            return 0;
        };

        let mut loaded = 0;
        for entry in rd.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
                continue;
            };
            let ext = ext.to_ascii_lowercase();
            if ext != "ttf" && ext != "otf" && ext != "ttc" {
                continue;
            }
            if self.load_font_file(&path).is_ok() {
                loaded += 1;
            }
        }
        loaded
    }

    /// Make `family` the degradation target for unknown families.
    pub fn set_default_family(&mut self, family: &str) -> AnnotileResult<()> {
        let key = family.to_ascii_lowercase();
        if !self.fonts.contains_key(&key) {
            return Err(AnnotileError::config(format!(
                "unknown default font family '{family}'"
            )));
        }
        self.default_family = Some(key);
        Ok(())
    }

    /// Case-insensitive exact lookup.
    pub fn resolve(&self, family: &str) -> Option<&LoadedFont> {
        self.fonts.get(&family.to_ascii_lowercase())
    }

    /// Resolve `family`, degrading to the default on a miss.
    ///
    /// Returns `None` only when the library holds no fonts at all.
    pub fn resolve_or_default(&self, family: Option<&str>) -> Option<&LoadedFont> {
        if let Some(name) = family {
            if let Some(font) = self.resolve(name) {
                return Some(font);
            }
            tracing::warn!(family = name, "unknown font family, using library default");
        }
        self.default_font()
    }

    /// The default font, if any is loaded.
    pub fn default_font(&self) -> Option<&LoadedFont> {
        self.default_family
            .as_deref()
            .and_then(|key| self.fonts.get(key))
    }

    /// Registered family names, sorted.
    pub fn family_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fonts.values().map(|f| f.family()).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered fonts.
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// `true` when no fonts are registered.
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    pub(crate) fn context(&mut self) -> &mut parley::FontContext {
        &mut self.font_ctx
    }
}

impl std::fmt::Debug for FontLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontLibrary")
            .field("fonts", &self.family_names())
            .field("default_family", &self.default_family)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fonts/library.rs"]
mod tests;
