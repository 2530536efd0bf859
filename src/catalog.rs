//! Artwork catalog built from the artwork directory tree.
//!
//! Each configured category label maps to a sub-directory of the artwork root.
//! The catalog is scanned once at startup and shared read-only afterwards.

use crate::error::{AppError, Result};
use crate::file_utils;
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use std::sync::Arc;

static ORDER_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\s*").expect("valid order prefix pattern"));

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// A single artwork inside a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtworkItem {
    pub id: String,
    /// Raw category label, which is also the directory name.
    pub category: String,
    pub filename: String,
    pub alt: String,
}

impl ArtworkItem {
    /// Address of the image file: `{root}/{category}/{filename}`.
    pub fn image_url(&self, root: &str) -> String {
        format!("{}/{}/{}", root.trim_end_matches('/'), self.category, self.filename)
    }
}

/// A category with its ordered artworks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Raw label, e.g. `"3. Weather Report"`.
    pub label: String,
    /// Label without its ordering prefix, e.g. `"Weather Report"`.
    pub name: String,
    pub slug: String,
    pub artworks: Vec<ArtworkItem>,
}

/// Strips the ordering prefix of a category label.
pub fn display_name(label: &str) -> String {
    ORDER_PREFIX.replace(label, "").into_owned()
}

/// Builds the URL slug of a category display name.
pub fn slugify(name: &str) -> String {
    WHITESPACE.replace_all(&name.to_lowercase(), "-").into_owned()
}

impl Category {
    fn from_files(label: &str, filenames: Vec<String>) -> Self {
        let name = display_name(label);
        let slug = slugify(&name);
        let artworks = filenames
            .into_iter()
            .enumerate()
            .map(|(index, filename)| ArtworkItem {
                id: format!("{}-{}", slug, index + 1),
                category: label.to_string(),
                filename,
                alt: format!("Artwork from the {} series, number {}", name, index + 1),
            })
            .collect();

        Self {
            label: label.to_string(),
            name,
            slug,
            artworks,
        }
    }

    pub fn len(&self) -> usize {
        self.artworks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artworks.is_empty()
    }
}

/// All categories in their configured order.
#[derive(Debug, Clone, Default)]
pub struct ArtworkCatalog {
    root: String,
    categories: Vec<Arc<Category>>,
}

impl ArtworkCatalog {
    /// Scans `root/{label}` for every label. Unreadable directories yield empty categories.
    pub fn scan(root: &Path, labels: &[String]) -> Self {
        let categories = labels
            .iter()
            .map(|label| {
                let files = match file_utils::scan_directory(&root.join(label)) {
                    Ok(files) => files,
                    Err(e) => {
                        warn!("Could not read directory for {}: {}", label, e);
                        Vec::new()
                    }
                };
                let category = Category::from_files(label, files);
                info!(
                    "Catalog: {} ({}) with {} artworks",
                    category.name,
                    category.slug,
                    category.len()
                );
                Arc::new(category)
            })
            .collect();

        Self {
            root: root.to_string_lossy().into_owned(),
            categories,
        }
    }

    /// Base address that image URLs are derived from.
    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn categories(&self) -> &[Arc<Category>] {
        &self.categories
    }

    pub fn category_by_slug(&self, slug: &str) -> Result<Arc<Category>> {
        self.categories
            .iter()
            .find(|category| category.slug == slug)
            .cloned()
            .ok_or_else(|| AppError::CategoryNotFound(slug.to_string()))
    }

    /// Looks up a category a viewer can be built for; empty categories are rejected.
    pub fn viewer_category(&self, slug: &str) -> Result<Arc<Category>> {
        let category = self.category_by_slug(slug)?;
        if category.is_empty() {
            return Err(AppError::EmptyCategory(slug.to_string()));
        }
        Ok(category)
    }
}

/// One cross-category link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub name: String,
    pub slug: String,
}

/// Fixed category menu derived from the configured labels, independent of the scan.
#[derive(Debug, Clone, Default)]
pub struct CategoryMenu {
    entries: Vec<MenuEntry>,
}

impl CategoryMenu {
    pub fn from_labels(labels: &[String]) -> Self {
        let entries = labels
            .iter()
            .map(|label| {
                let name = display_name(label);
                MenuEntry {
                    slug: slugify(&name),
                    name,
                }
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    /// Menu entries other than `current_slug`, in menu order.
    pub fn others(&self, current_slug: &str) -> Vec<MenuEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.slug != current_slug)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};

    fn labels() -> Vec<String> {
        vec!["1. Artist Monologues".to_string(), "4. Bubble Moon".to_string()]
    }

    #[test]
    fn labels_map_to_names_and_slugs() {
        assert_eq!(display_name("2. Quest for Infinity"), "Quest for Infinity");
        assert_eq!(slugify("Quest for  Infinity"), "quest-for-infinity");
        assert_eq!(display_name("Untitled"), "Untitled");
    }

    #[test]
    fn scan_builds_ordered_items() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("1. Artist Monologues");
        fs::create_dir(&dir).unwrap();
        for name in ["02.jpg", "01.jpg", "readme.md"] {
            File::create(dir.join(name)).unwrap();
        }

        let catalog = ArtworkCatalog::scan(root.path(), &labels());
        let category = catalog.category_by_slug("artist-monologues").unwrap();

        assert_eq!(category.len(), 2);
        assert_eq!(category.artworks[0].filename, "01.jpg");
        assert_eq!(category.artworks[0].id, "artist-monologues-1");
        assert_eq!(
            category.artworks[1].alt,
            "Artwork from the Artist Monologues series, number 2"
        );
        assert_eq!(category.artworks[1].category, "1. Artist Monologues");
    }

    #[test]
    fn missing_directory_gives_empty_category_rejected_for_viewer() {
        let root = tempfile::tempdir().unwrap();
        let catalog = ArtworkCatalog::scan(root.path(), &labels());

        assert!(catalog.category_by_slug("bubble-moon").unwrap().is_empty());
        assert!(matches!(
            catalog.viewer_category("bubble-moon"),
            Err(AppError::EmptyCategory(_))
        ));
        assert!(matches!(
            catalog.viewer_category("nope"),
            Err(AppError::CategoryNotFound(_))
        ));
    }

    #[test]
    fn image_url_is_plain_concatenation() {
        let item = ArtworkItem {
            id: "weather-report-1".to_string(),
            category: "3. Weather Report".to_string(),
            filename: "rain.png".to_string(),
            alt: String::new(),
        };
        assert_eq!(item.image_url("/artwork/"), "/artwork/3. Weather Report/rain.png");
    }

    #[test]
    fn menu_excludes_current_category() {
        let menu = CategoryMenu::from_labels(&labels());
        let others = menu.others("artist-monologues");
        assert_eq!(others.len(), 1);
        assert_eq!(others[0].name, "Bubble Moon");
        assert_eq!(others[0].slug, "bubble-moon");
    }
}
