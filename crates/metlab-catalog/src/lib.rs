//! Equipment catalog: form mapping, create/update with side tables,
//! listing and lookup, and brochure storage. Storage access goes through
//! the `IRecordStore` / `IObjectStore` seams; `memory` backs them
//! in-process and `remote` speaks the hosted REST and storage APIs.

pub mod brochure;
pub mod equipment;
pub mod form;
pub mod memory;
pub mod remote;

pub use brochure::{object_path_from_url, BrochureService, BrochureUpload};
pub use equipment::EquipmentService;
pub use form::{parse_equipment, parse_specs, slugify, EquipmentForm};
pub use memory::{InMemoryObjectStore, InMemoryRecordStore, StoreOp};
