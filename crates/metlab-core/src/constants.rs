/// Crate version, reported by the CLI and stamped into session snapshots.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Largest brochure accepted for upload: 50 MiB.
pub const MAX_BROCHURE_BYTES: u64 = 50 * 1024 * 1024;

/// The only content type accepted for brochures.
pub const BROCHURE_CONTENT_TYPE: &str = "application/pdf";

/// Base table of the equipment catalog.
pub const EQUIPMENT_TABLE: &str = "equipment";

/// Foreign-key column shared by every specification side table.
pub const SIDE_TABLE_KEY: &str = "equipment_id";

/// Object-store bucket holding brochures.
pub const BROCHURE_BUCKET: &str = "brochures";

/// Object-store bucket holding product images.
pub const IMAGE_BUCKET: &str = "equipment-images";

/// Current wizard snapshot format.
pub const SESSION_FORMAT_VERSION: u32 = 2;

/// Number of wizard steps; the last one shows results.
pub const WIZARD_STEPS: u8 = 4;

/// Categories offered when the catalog cannot be queried.
pub const FALLBACK_CATEGORIES: [&str; 6] = [
    "sectioning",
    "mounting",
    "grinding-polishing",
    "microscopy",
    "hardness-testing",
    "lab-furniture",
];
