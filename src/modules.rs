/// Module registry for the solar facility dashboard.
///
/// Defines the canonical list of dashboard modules the catalog partitions
/// its tags into, along with their display labels and a description of the
/// physical subsystem behind each one. Module codes referenced anywhere
/// else in the crate should come from this registry, never be hardcoded,
/// so that verification and the payload stay in agreement.

use crate::model::{
    ModuleKind, MODULE_ARRAY_A, MODULE_ARRAY_B, MODULE_ARRAY_C, MODULE_ARRAY_D, MODULE_ARRAY_E,
    MODULE_BASE, MODULE_IRRADIANCE, MODULE_TRACKING,
};

// ---------------------------------------------------------------------------
// Module metadata
// ---------------------------------------------------------------------------

/// Metadata for a single dashboard module.
pub struct ModuleInfo {
    /// Short module code as it appears in the catalog payload.
    pub id: &'static str,
    /// Display label shown in the dashboard's module dropdown.
    pub label: &'static str,
    /// Human-readable description of the subsystem the module covers.
    pub description: &'static str,
    /// Subsystem classification.
    pub kind: ModuleKind,
}

/// All dashboard modules in canonical payload order. The tag groups of the
/// catalog are positional, so this order is load-bearing: group N belongs
/// to module N.
pub static MODULE_REGISTRY: &[ModuleInfo] = &[
    ModuleInfo {
        id: MODULE_BASE,
        label: "BASE",
        description: "Facility-level measurements: the per-array AC meters, \
                      the CONNEX and POI interconnect meters, and the MET01 \
                      weather station (pressure, humidity, temperature, \
                      rain, wind).",
        kind: ModuleKind::Facility,
    },
    ModuleInfo {
        id: MODULE_ARRAY_A,
        label: "ARRAY A",
        description: "Array A: eight string inverters plus reference cell, \
                      module temperature probes, and the soiling measurement \
                      station.",
        kind: ModuleKind::Array,
    },
    ModuleInfo {
        id: MODULE_ARRAY_B,
        label: "ARRAY B",
        description: "Array B: eight string inverters plus reference cell \
                      and module temperature probes.",
        kind: ModuleKind::Array,
    },
    ModuleInfo {
        id: MODULE_ARRAY_C,
        label: "ARRAY C",
        description: "Array C: eight string inverters plus reference cell \
                      and module temperature probes.",
        kind: ModuleKind::Array,
    },
    ModuleInfo {
        id: MODULE_ARRAY_D,
        label: "ARRAY D",
        description: "Array D: eight string inverters plus reference cell, \
                      module temperature probes, and the soiling measurement \
                      station.",
        kind: ModuleKind::Array,
    },
    ModuleInfo {
        id: MODULE_ARRAY_E,
        label: "ARRAY E",
        description: "Array E, the dual-axis tracking array. Its group \
                      carries the tracker position and setpoint tags, which \
                      also appear under TRACKING.",
        kind: ModuleKind::Array,
    },
    ModuleInfo {
        id: MODULE_IRRADIANCE,
        label: "IRRADIANCE",
        description: "Plane-of-array pyranometers for each array and the \
                      MET02 global/diffuse/direct/far-infrared irradiance \
                      sensors.",
        kind: ModuleKind::Irradiance,
    },
    ModuleInfo {
        id: MODULE_TRACKING,
        label: "TRACKING",
        description: "The 22-unit dual-axis tracker fleet: azimuth and \
                      elevation positions and setpoints per tracker.",
        kind: ModuleKind::Tracking,
    },
];

/// Returns the codes of all registered modules in canonical order.
pub fn all_module_ids() -> Vec<&'static str> {
    MODULE_REGISTRY.iter().map(|m| m.id).collect()
}

/// Looks up a module by code. Returns `None` if not registered.
pub fn find_module(id: &str) -> Option<&'static ModuleInfo> {
    MODULE_REGISTRY.iter().find(|m| m.id == id)
}

/// Returns all modules of the given kind, in canonical order.
pub fn modules_of_kind(kind: ModuleKind) -> Vec<&'static ModuleInfo> {
    MODULE_REGISTRY.iter().filter(|m| m.kind == kind).collect()
}

/// The canonical position of a module code, i.e. the index of the tag
/// group that belongs to it. Returns `None` for unregistered codes.
pub fn canonical_position(id: &str) -> Option<usize> {
    MODULE_REGISTRY.iter().position(|m| m.id == id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_module_ids_are_uppercase_codes() {
        // The UI builds query strings from these codes verbatim; anything
        // outside uppercase ASCII would not match the payload.
        for module in MODULE_REGISTRY {
            assert!(
                !module.id.is_empty(),
                "module '{}' has an empty code",
                module.label
            );
            assert!(
                module.id.chars().all(|c| c.is_ascii_uppercase()),
                "module code for '{}' should be uppercase letters, got '{}'",
                module.label,
                module.id
            );
        }
    }

    #[test]
    fn test_no_duplicate_module_ids() {
        let mut seen = std::collections::HashSet::new();
        for module in MODULE_REGISTRY {
            assert!(
                seen.insert(module.id),
                "duplicate module code '{}' found in MODULE_REGISTRY",
                module.id
            );
        }
    }

    #[test]
    fn test_registry_contains_all_expected_modules_in_order() {
        let expected = ["BASE", "A", "B", "C", "D", "E", "IRRADIANCE", "TRACKING"];
        let codes: Vec<_> = MODULE_REGISTRY.iter().map(|m| m.id).collect();
        assert_eq!(
            codes, expected,
            "MODULE_REGISTRY must list the modules in payload order"
        );
    }

    #[test]
    fn test_find_module_returns_correct_entry() {
        let module = find_module("IRRADIANCE").expect("IRRADIANCE should be registered");
        assert_eq!(module.id, "IRRADIANCE");
        assert_eq!(module.kind, ModuleKind::Irradiance);
    }

    #[test]
    fn test_find_module_returns_none_for_unknown_code() {
        assert!(find_module("F").is_none());
        assert!(find_module("base").is_none(), "lookup is case-sensitive");
    }

    #[test]
    fn test_all_module_ids_helper_matches_registry_length() {
        assert_eq!(all_module_ids().len(), MODULE_REGISTRY.len());
    }

    #[test]
    fn test_exactly_five_arrays_are_registered() {
        let arrays = modules_of_kind(ModuleKind::Array);
        assert_eq!(arrays.len(), 5);
        let codes: Vec<_> = arrays.iter().map(|m| m.id).collect();
        assert_eq!(codes, ["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn test_facility_irradiance_and_tracking_are_singletons() {
        assert_eq!(modules_of_kind(ModuleKind::Facility).len(), 1);
        assert_eq!(modules_of_kind(ModuleKind::Irradiance).len(), 1);
        assert_eq!(modules_of_kind(ModuleKind::Tracking).len(), 1);
    }

    #[test]
    fn test_canonical_position_matches_payload_order() {
        assert_eq!(canonical_position("BASE"), Some(0));
        assert_eq!(canonical_position("E"), Some(5));
        assert_eq!(canonical_position("TRACKING"), Some(7));
        assert_eq!(canonical_position("NOPE"), None);
    }

    #[test]
    fn test_every_module_has_a_label_and_description() {
        for module in MODULE_REGISTRY {
            assert!(
                !module.label.is_empty(),
                "module '{}' is missing a label",
                module.id
            );
            assert!(
                !module.description.is_empty(),
                "module '{}' is missing a description",
                module.id
            );
        }
    }
}
