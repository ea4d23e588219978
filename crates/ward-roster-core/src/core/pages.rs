// crates/ward-roster-core/src/core/pages.rs
// ============================================================================
// Module: Ward Roster Page Registry
// Description: Registered feature pages and their visibility rules.
// Purpose: Supply the page count and per-page access tiers to the codec.
// Dependencies: crate::core::permission, serde
// ============================================================================

//! ## Overview
//! Each registered page owns one position in the permission bit vector, in
//! registration order. The registry is the only source of the page count; no
//! other component assumes a fixed number of pages.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::permission::AccessLevel;
use crate::core::permission::PermissionState;
use crate::core::permission::authorize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// A registered feature page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDescriptor {
    /// Display name.
    pub name: String,
    /// Page script file name.
    pub file: String,
    /// Whether the page is switched on.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Template the page file is generated from.
    #[serde(default)]
    pub template: Option<String>,
    /// Access tier required to view the page.
    #[serde(default)]
    pub access: AccessLevel,
}

/// Returns the default enabled flag for pages.
const fn default_enabled() -> bool {
    true
}

/// Visibility of one page for a given viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageVisibility {
    /// 1-indexed page position.
    pub index: usize,
    /// Page display name.
    pub name: String,
    /// Whether the viewer may open the page.
    pub visible: bool,
    /// Whether the viewer administers the page.
    pub admin: bool,
}

/// Ordered set of registered pages.
///
/// # Invariants
/// - Page `i` (1-indexed) owns bit `i` of every permission vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageRegistry {
    /// Pages in bit order.
    pages: Vec<PageDescriptor>,
}

impl Default for PageRegistry {
    fn default() -> Self {
        Self::new(default_pages())
    }
}

impl PageRegistry {
    /// Creates a registry from pages in bit order.
    #[must_use]
    pub const fn new(pages: Vec<PageDescriptor>) -> Self {
        Self {
            pages,
        }
    }

    /// Returns the number of registered pages (the permission vector width).
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Returns the page at `index` (1-indexed).
    #[must_use]
    pub fn page(&self, index: usize) -> Option<&PageDescriptor> {
        index.checked_sub(1).and_then(|index| self.pages.get(index))
    }

    /// Returns the 1-indexed position of the page named `name`.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.pages.iter().position(|page| page.name == name).map(|index| index + 1)
    }

    /// Iterates pages in bit order.
    pub fn iter(&self) -> std::slice::Iter<'_, PageDescriptor> {
        self.pages.iter()
    }

    /// Evaluates every page for a viewer (`None` when signed out).
    ///
    /// Disabled pages are never visible.
    #[must_use]
    pub fn visibility(&self, session: Option<&PermissionState>) -> Vec<PageVisibility> {
        self.pages
            .iter()
            .enumerate()
            .map(|(offset, page)| {
                let index = offset + 1;
                PageVisibility {
                    index,
                    name: page.name.clone(),
                    visible: page.enabled && authorize(page.access, session, index),
                    admin: session.is_some_and(|state| state.is_admin(index)),
                }
            })
            .collect()
    }
}

/// Returns the built-in page set.
#[must_use]
pub fn default_pages() -> Vec<PageDescriptor> {
    [
        ("Communication Log", "pages/01_communication_log.toml", "templates/page01.toml", AccessLevel::Authenticated),
        ("Pre-admission & Day Surgery", "pages/02_day_surgery.toml", "templates/page02.toml", AccessLevel::Authenticated),
        ("Operations Data Support", "pages/03_operations_data.toml", "templates/page03.toml", AccessLevel::Authenticated),
        ("Department Evaluation", "pages/04_department_evaluation.toml", "templates/page04.toml", AccessLevel::Authenticated),
        ("System Maintenance", "pages/99_system_maintenance.toml", "templates/page99.toml", AccessLevel::PageAdmin),
    ]
    .into_iter()
    .map(|(name, file, template, access)| PageDescriptor {
        name: name.to_string(),
        file: file.to_string(),
        enabled: true,
        template: Some(template.to_string()),
        access,
    })
    .collect()
}
