//! Tag catalog loading and queries.
//!
//! The catalog payload is the declarative object the dashboard UI consumes
//! to populate its module dropdown, chart legends, and tag pickers. This
//! module owns the wire format (exactly the payload's key names, so the
//! asset round-trips for the UI layer), the typed [`Catalog`] built from
//! it, and the query surface over modules and tags.

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{CatalogError, Tag, TagGroup};

/// The bundled canonical catalog payload for the facility. This is the
/// same object the dashboard loads, transcribed 1:1.
const EMBEDDED_CATALOG_JSON: &str = include_str!("../assets/catalog.json");

/// Date format used by the payload's `minDate`/`maxDate` fields.
const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

/// The catalog payload exactly as the UI consumes it.
///
/// `attributes` is positional: entry N holds the tags of module N. An
/// empty `maxDate` means data collection is ongoing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub name: String,
    pub desc: String,
    #[serde(rename = "minDate")]
    pub min_date: String,
    #[serde(rename = "maxDate")]
    pub max_date: String,
    pub modules: Vec<ModuleEntry>,
    pub attributes: Vec<Vec<TagEntry>>,
}

/// One entry of the payload's `modules` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleEntry {
    pub id: String,
    pub label: String,
}

/// One entry of a positional tag group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagEntry {
    pub id: String,
    pub desc: String,
}

// ---------------------------------------------------------------------------
// Typed catalog
// ---------------------------------------------------------------------------

/// Facility header with the date range parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct Facility {
    /// Short facility identifier (`name` on the wire).
    pub name: String,
    /// Display description (`desc` on the wire).
    pub description: String,
    /// First date for which telemetry exists.
    pub min_date: NaiveDate,
    /// Last date for which telemetry exists; `None` while collection is
    /// ongoing (empty string on the wire).
    pub max_date: Option<NaiveDate>,
}

impl Facility {
    /// Whether `date` falls inside the facility's data range. The range is
    /// inclusive on both ends and unbounded above while `max_date` is open.
    pub fn covers_date(&self, date: NaiveDate) -> bool {
        date >= self.min_date && self.max_date.is_none_or(|max| date <= max)
    }
}

/// A tag found by [`Catalog::find_tag`], together with every module whose
/// group carries it. Tracker tags resolve to both ARRAY E and TRACKING.
#[derive(Debug, Clone, PartialEq)]
pub struct TagMatch<'a> {
    pub tag: &'a Tag,
    pub module_ids: Vec<&'a str>,
}

/// The typed catalog: facility header, ordered modules, and one tag group
/// per module.
///
/// Construction enforces the positional invariant (as many tag groups as
/// modules, in matching order); everything else about the data's shape is
/// the business of [`crate::verify`].
#[derive(Debug, Clone)]
pub struct Catalog {
    facility: Facility,
    modules: Vec<ModuleEntry>,
    groups: Vec<TagGroup>,
}

impl Catalog {
    /// Parses the bundled canonical payload.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_CATALOG_JSON)
    }

    /// Parses a catalog from payload JSON.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::from_file(file)
    }

    /// Reads and parses a catalog payload from disk.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Builds the typed catalog from its wire form.
    ///
    /// Fails if the group count does not match the module count or if the
    /// facility dates do not parse. Unknown module ids are accepted here —
    /// the UI would still render them — and flagged by verification.
    pub fn from_file(file: CatalogFile) -> Result<Self, CatalogError> {
        if file.modules.len() != file.attributes.len() {
            return Err(CatalogError::GroupCountMismatch {
                modules: file.modules.len(),
                groups: file.attributes.len(),
            });
        }

        let min_date = NaiveDate::parse_from_str(&file.min_date, DATE_FORMAT).map_err(|_| {
            CatalogError::InvalidDate {
                field: "minDate",
                value: file.min_date.clone(),
            }
        })?;
        let max_date = if file.max_date.is_empty() {
            None
        } else {
            Some(
                NaiveDate::parse_from_str(&file.max_date, DATE_FORMAT).map_err(|_| {
                    CatalogError::InvalidDate {
                        field: "maxDate",
                        value: file.max_date.clone(),
                    }
                })?,
            )
        };

        let groups = file
            .modules
            .iter()
            .zip(file.attributes)
            .map(|(module, entries)| TagGroup {
                module_id: module.id.clone(),
                tags: entries
                    .into_iter()
                    .map(|entry| Tag {
                        id: entry.id,
                        description: entry.desc,
                    })
                    .collect(),
            })
            .collect();

        Ok(Catalog {
            facility: Facility {
                name: file.name,
                description: file.desc,
                min_date,
                max_date,
            },
            modules: file.modules,
            groups,
        })
    }

    /// The facility header.
    pub fn facility(&self) -> &Facility {
        &self.facility
    }

    /// The modules in payload order.
    pub fn modules(&self) -> &[ModuleEntry] {
        &self.modules
    }

    /// The tag groups in payload order (one per module).
    pub fn groups(&self) -> &[TagGroup] {
        &self.groups
    }

    /// The tag group of a module, or `None` if the catalog has no module
    /// with that id.
    pub fn group(&self, module_id: &str) -> Option<&TagGroup> {
        self.groups.iter().find(|g| g.module_id == module_id)
    }

    /// The tags of a module, or `None` for an unknown module id.
    pub fn tags_for_module(&self, module_id: &str) -> Option<&[Tag]> {
        self.group(module_id).map(|g| g.tags.as_slice())
    }

    /// Looks a tag up by id across all groups. The returned match borrows
    /// the first occurrence and lists every module carrying the id, in
    /// payload order.
    pub fn find_tag(&self, tag_id: &str) -> Option<TagMatch<'_>> {
        let mut tag = None;
        let mut module_ids = Vec::new();
        for group in &self.groups {
            if let Some(found) = group.tags.iter().find(|t| t.id == tag_id) {
                tag.get_or_insert(found);
                module_ids.push(group.module_id.as_str());
            }
        }
        tag.map(|tag| TagMatch { tag, module_ids })
    }

    /// Total number of tag entries, counting a tag once per group that
    /// carries it.
    pub fn tag_count(&self) -> usize {
        self.groups.iter().map(|g| g.tags.len()).sum()
    }

    /// Number of distinct tag ids.
    pub fn unique_tag_count(&self) -> usize {
        let mut ids = std::collections::HashSet::new();
        for group in &self.groups {
            for tag in &group.tags {
                ids.insert(tag.id.as_str());
            }
        }
        ids.len()
    }

    /// Tag ids that appear in more than one group, each listed once in
    /// order of first appearance. For the canonical catalog these are the
    /// 88 tracker tags shared by ARRAY E and TRACKING.
    pub fn duplicate_tag_ids(&self) -> Vec<&str> {
        let mut counts: std::collections::HashMap<&str, usize> = std::collections::HashMap::new();
        for group in &self.groups {
            let mut in_group = std::collections::HashSet::new();
            for tag in &group.tags {
                if in_group.insert(tag.id.as_str()) {
                    *counts.entry(tag.id.as_str()).or_insert(0) += 1;
                }
            }
        }
        let mut seen = std::collections::HashSet::new();
        let mut duplicates = Vec::new();
        for group in &self.groups {
            for tag in &group.tags {
                if counts[tag.id.as_str()] > 1 && seen.insert(tag.id.as_str()) {
                    duplicates.push(tag.id.as_str());
                }
            }
        }
        duplicates
    }

    /// Whether `date` falls inside the facility's data range.
    pub fn covers_date(&self, date: NaiveDate) -> bool {
        self.facility.covers_date(date)
    }

    /// Rebuilds the wire form. An open `max_date` becomes the empty string
    /// again, so the payload the UI sees is unchanged by a round trip.
    pub fn to_file(&self) -> CatalogFile {
        CatalogFile {
            name: self.facility.name.clone(),
            desc: self.facility.description.clone(),
            min_date: self.facility.min_date.format(DATE_FORMAT).to_string(),
            max_date: self
                .facility
                .max_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            modules: self.modules.clone(),
            attributes: self
                .groups
                .iter()
                .map(|group| {
                    group
                        .tags
                        .iter()
                        .map(|tag| TagEntry {
                            id: tag.id.clone(),
                            desc: tag.description.clone(),
                        })
                        .collect()
                })
                .collect(),
        }
    }

    /// Serializes the catalog back to pretty-printed payload JSON for the
    /// UI layer.
    pub fn to_ui_json(&self) -> Result<String, CatalogError> {
        serde_json::to_string_pretty(&self.to_file()).map_err(|e| CatalogError::Parse(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
