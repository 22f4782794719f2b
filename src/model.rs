/// Core data types for the solar facility tag catalog.
///
/// The shared domain model the rest of the crate builds on. Aside from a
/// few small format predicates on [`Tag`], nothing in here does any work:
/// no I/O and no dependencies beyond the standard library.

// ---------------------------------------------------------------------------
// Module codes
// ---------------------------------------------------------------------------

/// Module code for the facility-level group (meters and weather).
pub const MODULE_BASE: &str = "BASE";

/// Module codes for the five PV arrays.
pub const MODULE_ARRAY_A: &str = "A";
pub const MODULE_ARRAY_B: &str = "B";
pub const MODULE_ARRAY_C: &str = "C";
pub const MODULE_ARRAY_D: &str = "D";
pub const MODULE_ARRAY_E: &str = "E";

/// Module code for the irradiance sensor group.
pub const MODULE_IRRADIANCE: &str = "IRRADIANCE";

/// Module code for the tracker fleet group.
pub const MODULE_TRACKING: &str = "TRACKING";

/// Prefix carried by every tag id at this facility. Tag ids are built as
/// `UGA` + instrument designator + measurement suffix, all uppercase.
pub const FACILITY_TAG_PREFIX: &str = "UGA";

// ---------------------------------------------------------------------------
// Module classification
// ---------------------------------------------------------------------------

/// Which physical subsystem a dashboard module corresponds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleKind {
    /// Facility-level meters and the weather station.
    Facility,
    /// One of the PV arrays.
    Array,
    /// The irradiance sensor set.
    Irradiance,
    /// The dual-axis tracker fleet.
    Tracking,
}

// ---------------------------------------------------------------------------
// Tag types
// ---------------------------------------------------------------------------

/// A single measured or control point in the facility.
///
/// Corresponds to one `{id, desc}` entry of the catalog payload. The
/// description follows the facility convention `"<ID>: <text>"`, which the
/// UI layer relies on when building tag pickers.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub id: String,
    pub description: String,
}

impl Tag {
    /// Returns `true` if the id is non-empty, uppercase alphanumeric, and
    /// carries the facility prefix. An id violating this would be silently
    /// dropped by the historian the dashboard queries.
    pub fn has_valid_id(&self) -> bool {
        self.id.len() > FACILITY_TAG_PREFIX.len()
            && self.id.starts_with(FACILITY_TAG_PREFIX)
            && self
                .id
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    }

    /// Returns `true` if the description starts with the tag's own id
    /// followed by `": "`.
    pub fn has_conventional_description(&self) -> bool {
        self.description
            .strip_prefix(&self.id)
            .and_then(|rest| rest.strip_prefix(": "))
            .is_some_and(|text| !text.is_empty())
    }

    /// The free-text part of the description, with the `"<ID>: "` prefix
    /// stripped when present.
    pub fn short_description(&self) -> &str {
        self.description
            .strip_prefix(&self.id)
            .and_then(|rest| rest.strip_prefix(": "))
            .unwrap_or(&self.description)
    }
}

/// The ordered tags of one module, after the positional `attributes` arrays
/// of the payload have been zipped with the module list.
#[derive(Debug, Clone, PartialEq)]
pub struct TagGroup {
    pub module_id: String,
    pub tags: Vec<Tag>,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise when loading or processing a catalog.
#[derive(Debug, PartialEq)]
pub enum CatalogError {
    /// The catalog file could not be read.
    Io(String),
    /// The payload could not be deserialized.
    Parse(String),
    /// A facility date field did not parse as `YYYY-MM-DD`.
    InvalidDate { field: &'static str, value: String },
    /// The positional `attributes` arrays do not line up with the module
    /// list, so tags cannot be attributed to modules.
    GroupCountMismatch { modules: usize, groups: usize },
    /// A module id was requested that the catalog does not contain.
    UnknownModule(String),
    /// The configuration file was present but invalid.
    Config(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Io(msg) => write!(f, "I/O error: {}", msg),
            CatalogError::Parse(msg) => write!(f, "Parse error: {}", msg),
            CatalogError::InvalidDate { field, value } => {
                write!(f, "Invalid date in field '{}': '{}'", field, value)
            }
            CatalogError::GroupCountMismatch { modules, groups } => {
                write!(
                    f,
                    "Catalog has {} modules but {} tag groups",
                    modules, groups
                )
            }
            CatalogError::UnknownModule(id) => write!(f, "Unknown module: {}", id),
            CatalogError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::Io(err.to_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(id: &str, description: &str) -> Tag {
        Tag {
            id: id.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn test_well_formed_tag_id_is_valid() {
        let t = tag("UGAAMETERACL1V", "UGAAMETERACL1V: Phase to neutral voltage AN");
        assert!(t.has_valid_id());
    }

    #[test]
    fn test_lowercase_tag_id_is_invalid() {
        let t = tag("ugaameteracl1v", "ugaameteracl1v: Phase to neutral voltage AN");
        assert!(!t.has_valid_id(), "lowercase ids are not valid tag codes");
    }

    #[test]
    fn test_bare_prefix_is_not_a_valid_id() {
        let t = tag("UGA", "UGA: prefix only");
        assert!(
            !t.has_valid_id(),
            "the facility prefix alone does not identify an instrument"
        );
    }

    #[test]
    fn test_id_without_facility_prefix_is_invalid() {
        let t = tag("XYZMETERACW", "XYZMETERACW: Active Power");
        assert!(!t.has_valid_id());
    }

    #[test]
    fn test_id_with_separator_characters_is_invalid() {
        let t = tag("UGA-METER-ACW", "UGA-METER-ACW: Active Power");
        assert!(!t.has_valid_id(), "tag codes never contain separators");
    }

    #[test]
    fn test_conventional_description_is_detected() {
        let t = tag("UGAAINV01ERR", "UGAAINV01ERR: Error Code");
        assert!(t.has_conventional_description());
        assert_eq!(t.short_description(), "Error Code");
    }

    #[test]
    fn test_description_missing_id_prefix_is_unconventional() {
        let t = tag("UGAAINV01ERR", "Error Code");
        assert!(!t.has_conventional_description());
        assert_eq!(
            t.short_description(),
            "Error Code",
            "short_description falls back to the full text when unprefixed"
        );
    }

    #[test]
    fn test_description_with_wrong_id_prefix_is_unconventional() {
        let t = tag("UGAAINV01ERR", "UGAAINV02ERR: Error Code");
        assert!(!t.has_conventional_description());
    }

    #[test]
    fn test_description_with_prefix_but_no_text_is_unconventional() {
        let t = tag("UGAAINV01ERR", "UGAAINV01ERR: ");
        assert!(
            !t.has_conventional_description(),
            "a description must say something beyond the id"
        );
    }

    #[test]
    fn test_catalog_error_display_is_informative() {
        let err = CatalogError::GroupCountMismatch {
            modules: 8,
            groups: 7,
        };
        let text = err.to_string();
        assert!(text.contains('8') && text.contains('7'), "got: {}", text);
    }
}
