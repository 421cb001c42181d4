//! Layout → variant module registry.

use plaudit_protocol::Layout;

/// Where a variant module lives and what it registers when loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleSpec {
    /// Layout the module renders.
    pub layout: Layout,
    /// Script path relative to the asset origin.
    pub script_path: &'static str,
    /// Global export the module registers once evaluated.
    pub export_name: &'static str,
}

static MODULES: [ModuleSpec; 6] = [
    ModuleSpec {
        layout: Layout::Carousel,
        script_path: "/widgets/carousel.js",
        export_name: "PlauditCarouselWidget",
    },
    ModuleSpec {
        layout: Layout::Grid,
        script_path: "/widgets/grid.js",
        export_name: "PlauditGridWidget",
    },
    ModuleSpec {
        layout: Layout::List,
        script_path: "/widgets/list.js",
        export_name: "PlauditListWidget",
    },
    ModuleSpec {
        layout: Layout::Bar,
        script_path: "/widgets/bar.js",
        export_name: "PlauditBarWidget",
    },
    ModuleSpec {
        layout: Layout::Badge,
        script_path: "/widgets/badge.js",
        export_name: "PlauditBadgeWidget",
    },
    ModuleSpec {
        layout: Layout::Masonry,
        script_path: "/widgets/masonry.js",
        export_name: "PlauditMasonryWidget",
    },
];

/// Maps layouts to module scripts served from one asset origin.
///
/// # Examples
///
/// ```
/// use plaudit_protocol::Layout;
/// use plaudit_runtime::ModuleRegistry;
///
/// let registry = ModuleRegistry::new("https://cdn.example.com/");
/// assert_eq!(registry.script_url(Layout::Grid), "https://cdn.example.com/widgets/grid.js");
/// assert_eq!(
///     registry.layout_for_url("https://cdn.example.com/widgets/grid.js"),
///     Some(Layout::Grid),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRegistry {
    asset_origin: String,
}

impl ModuleRegistry {
    /// Creates a registry for `asset_origin`.
    #[must_use]
    pub fn new(asset_origin: impl Into<String>) -> Self {
        let asset_origin: String = asset_origin.into();
        Self {
            asset_origin: asset_origin.trim_end_matches('/').to_string(),
        }
    }

    /// The origin module scripts are served from.
    #[must_use]
    pub fn asset_origin(&self) -> &str {
        &self.asset_origin
    }

    /// The module registered for `layout`.
    #[must_use]
    pub fn spec(&self, layout: Layout) -> Option<&'static ModuleSpec> {
        MODULES.iter().find(|spec| spec.layout == layout)
    }

    /// The absolute script URL of `layout`'s module.
    #[must_use]
    pub fn script_url(&self, layout: Layout) -> String {
        let path = self.spec(layout).map_or("", |spec| spec.script_path);
        format!("{}{path}", self.asset_origin)
    }

    /// Finds the layout whose module lives at `url`.
    #[must_use]
    pub fn layout_for_url(&self, url: &str) -> Option<Layout> {
        let path = url.strip_prefix(&self.asset_origin)?;
        MODULES
            .iter()
            .find(|spec| spec.script_path == path)
            .map(|spec| spec.layout)
    }

    /// Every registered module.
    pub fn modules(&self) -> impl Iterator<Item = &'static ModuleSpec> {
        MODULES.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_layout_is_registered() {
        let registry = ModuleRegistry::new("https://w.example");
        for layout in Layout::ALL {
            assert!(registry.spec(layout).is_some(), "{layout}");
        }
        let mut exports: Vec<&str> = registry.modules().map(|m| m.export_name).collect();
        exports.dedup();
        assert_eq!(exports.len(), 6);
    }

    #[test]
    fn foreign_urls_are_unknown() {
        let registry = ModuleRegistry::new("https://w.example");
        assert_eq!(registry.layout_for_url("https://other.example/widgets/grid.js"), None);
    }
}
