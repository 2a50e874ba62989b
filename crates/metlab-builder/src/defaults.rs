//! Generic per-stage suggestions used when a rule table yields nothing.

use metlab_core::models::{Recommendation, Stage};

pub fn fallback_for(stage: Stage) -> Recommendation {
    let (item, reasoning) = match stage {
        Stage::Sectioning => (
            "Abrasive Cut-off Saw",
            "General-purpose abrasive sectioning suits most metallic samples.",
        ),
        Stage::Mounting => (
            "Compression Mounting Press",
            "Compression mounting gives good edge retention for most materials.",
        ),
        Stage::Grinding => (
            "Grinder/Polisher",
            "A platen grinder with progressive SiC papers covers routine grinding.",
        ),
        Stage::Polishing => (
            "Grinder/Polisher",
            "A platen polisher with diamond suspensions covers routine polishing.",
        ),
        Stage::FinalPolishing => (
            "Colloidal Silica Polishing Suspension (0.05 µm)",
            "A final oxide polish removes the last fine scratches.",
        ),
        Stage::Etching => (
            "Fume Hood / Ventilation System",
            "Safe etchant handling requires ventilation.",
        ),
        Stage::Microscopy => (
            "Standard Metallurgical Microscope",
            "A reflected-light microscope covers routine microstructure inspection.",
        ),
        Stage::Cleaning => (
            "Ultrasonic Cleaner",
            "Ultrasonic cleaning removes residues between preparation steps.",
        ),
        Stage::Hardness => (
            "Hardness Tester (Vickers/Rockwell)",
            "Vickers for precision, Rockwell for production testing.",
        ),
    };
    Recommendation::equipment(stage, item, reasoning)
}
