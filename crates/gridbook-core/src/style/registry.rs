//! Named style registry
//!
//! Named styles live in one workbook-owned table; cells refer to them by
//! [`StyleId`]. Redefining a name rewrites its table slot, so every cell
//! referencing it picks up the new definition on the next read.

use ahash::AHashMap;

use super::{Style, StylePatch};
use crate::cell::Cell;
use crate::error::{Error, Result};

/// Index of a named style in the workbook's style table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StyleId(u32);

impl StyleId {
    /// Raw table index
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// What happens when a style name is defined twice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum RedefinitionMode {
    /// The new definition replaces the old one in place
    #[default]
    Replace,
    /// Redefinition fails with [`Error::DuplicateStyleRedefinition`]
    Strict,
}

/// A named, reusable style bundle
#[derive(Debug, Clone, PartialEq)]
pub struct NamedStyle {
    pub name: String,
    pub patch: StylePatch,
}

/// Table of named styles with a name index
#[derive(Debug, Clone, Default)]
pub struct StyleRegistry {
    styles: Vec<NamedStyle>,
    by_name: AHashMap<String, StyleId>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define (or redefine) a named style
    ///
    /// The workbook passes the mode from its settings; the registry keeps none
    /// of its own.
    pub fn define_style<S: Into<String>>(
        &mut self,
        name: S,
        patch: StylePatch,
        mode: RedefinitionMode,
    ) -> Result<StyleId> {
        let name = name.into();

        if let Some(&id) = self.by_name.get(&name) {
            return match mode {
                RedefinitionMode::Strict => Err(Error::DuplicateStyleRedefinition(name)),
                RedefinitionMode::Replace => {
                    log::debug!("replacing named style '{}'", name);
                    self.styles[id.index()].patch = patch;
                    Ok(id)
                }
            };
        }

        let id = StyleId(self.styles.len() as u32);
        self.styles.push(NamedStyle {
            name: name.clone(),
            patch,
        });
        self.by_name.insert(name, id);
        Ok(id)
    }

    /// Mutate a named style in place
    pub fn update_style<F>(&mut self, name: &str, f: F) -> Result<StyleId>
    where
        F: FnOnce(&mut StylePatch),
    {
        let id = self
            .style_id(name)
            .ok_or_else(|| Error::StyleNotFound(name.to_string()))?;
        f(&mut self.styles[id.index()].patch);
        Ok(id)
    }

    /// Look up a style id by name (case-sensitive)
    pub fn style_id(&self, name: &str) -> Option<StyleId> {
        self.by_name.get(name).copied()
    }

    /// Look up a style id by name, failing with [`Error::StyleNotFound`]
    pub fn require(&self, name: &str) -> Result<StyleId> {
        self.style_id(name)
            .ok_or_else(|| Error::StyleNotFound(name.to_string()))
    }

    pub fn get(&self, id: StyleId) -> Option<&NamedStyle> {
        self.styles.get(id.index())
    }

    pub fn get_by_name(&self, name: &str) -> Option<&NamedStyle> {
        self.style_id(name).and_then(|id| self.get(id))
    }

    /// Iterate over all named styles in definition order
    pub fn iter(&self) -> impl Iterator<Item = (StyleId, &NamedStyle)> {
        self.styles
            .iter()
            .enumerate()
            .map(|(i, s)| (StyleId(i as u32), s))
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Compute the effective style of a cell
    ///
    /// Each axis is taken from the highest layer that sets it: direct overrides,
    /// then the named style, then `sheet_default`. An id missing from the table
    /// contributes nothing.
    pub fn resolve_effective_style(&self, sheet_default: &Style, cell: Option<&Cell>) -> Style {
        let mut style = sheet_default.clone();
        if let Some(cell) = cell {
            if let Some(named) = cell.named_style.and_then(|id| self.get(id)) {
                style.apply(&named.patch);
            }
            style.apply(&cell.overrides);
        }
        style
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Color, FillStyle, FontStyle};

    fn red_fill() -> StylePatch {
        StylePatch::new().with_fill(FillStyle::solid(Color::RED))
    }

    #[test]
    fn test_define_and_lookup() {
        let mut registry = StyleRegistry::new();
        let id = registry
            .define_style("header", red_fill(), RedefinitionMode::Replace)
            .unwrap();

        assert_eq!(registry.style_id("header"), Some(id));
        assert_eq!(registry.style_id("Header"), None);
        assert_eq!(registry.get(id).unwrap().name, "header");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_redefinition_replaces_in_place() {
        let mut registry = StyleRegistry::new();
        let first = registry
            .define_style("header", red_fill(), RedefinitionMode::Replace)
            .unwrap();
        let second = registry
            .define_style(
                "header",
                StylePatch::new().with_font(FontStyle::new().with_bold(true)),
                RedefinitionMode::Replace,
            )
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
        let patch = &registry.get(first).unwrap().patch;
        assert!(patch.fill.is_none());
        assert!(patch.font.as_ref().unwrap().bold);
    }

    #[test]
    fn test_strict_mode_rejects_redefinition() {
        let mut registry = StyleRegistry::new();
        registry
            .define_style("header", red_fill(), RedefinitionMode::Strict)
            .unwrap();

        let err = registry
            .define_style("header", StylePatch::new(), RedefinitionMode::Strict)
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateStyleRedefinition(name) if name == "header"));
        assert!(registry.get_by_name("header").unwrap().patch.fill.is_some());

        registry
            .define_style("header", StylePatch::new(), RedefinitionMode::Replace)
            .unwrap();
        assert!(registry.get_by_name("header").unwrap().patch.is_empty());
    }

    #[test]
    fn test_update_style() {
        let mut registry = StyleRegistry::new();
        registry
            .define_style("total", red_fill(), RedefinitionMode::Replace)
            .unwrap();
        registry
            .update_style("total", |p| p.fill = Some(FillStyle::solid(Color::GREEN)))
            .unwrap();
        assert_eq!(
            registry.get_by_name("total").unwrap().patch.fill,
            Some(FillStyle::solid(Color::GREEN))
        );

        assert!(matches!(
            registry.update_style("missing", |_| {}),
            Err(Error::StyleNotFound(_))
        ));
    }

    #[test]
    fn test_layering_per_axis() {
        let mut registry = StyleRegistry::new();
        let named = registry
            .define_style(
                "bold_red",
                StylePatch::new()
                    .with_font(FontStyle::new().with_bold(true))
                    .with_fill(FillStyle::solid(Color::RED)),
                RedefinitionMode::Replace,
            )
            .unwrap();

        let sheet_default = Style::new().font_name("Arial");
        let cell = Cell::new("x")
            .with_named_style(named)
            .with_overrides(StylePatch::new().with_fill(FillStyle::solid(Color::YELLOW)));

        let style = registry.resolve_effective_style(&sheet_default, Some(&cell));
        // font from named style, fill from the override
        assert!(style.font.bold);
        assert_eq!(style.fill, FillStyle::solid(Color::YELLOW));
        assert_eq!(style.border, sheet_default.border);

        let plain = registry.resolve_effective_style(&sheet_default, None);
        assert_eq!(plain, sheet_default);
    }
}
