pub mod equipment;
pub mod intake;
pub mod labels;
pub mod material;
pub mod recommendation;
pub mod stage;

pub use equipment::{
    CategorySpecs, Equipment, EquipmentCategory, EquipmentDetail, EquipmentStatus,
    GrindingPolishingSpecs, HardnessTestingSpecs, LabFurnitureSpecs, MicroscopySpecs,
    MountingSpecs, SectioningSpecs,
};
pub use intake::*;
pub use material::MaterialProfile;
pub use recommendation::{ItemCategory, Recommendation};
pub use stage::Stage;
