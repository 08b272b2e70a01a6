//! Curated keyword sets per repair category and ADAS-part indicator.
//!
//! Synonyms, estimate-system abbreviations, and OEM-specific terms collected
//! from production estimates. Matching is boundary-safe, so short entries
//! ("radar") do not fire inside longer words.

use recal_core::types::{AdasPart, RepairKind};

/// Keywords for one repair category.
pub fn repair_category_keywords(kind: RepairKind) -> &'static [&'static str] {
    match kind {
        RepairKind::FrontBumper => &[
            "front bumper",
            "frt bumper",
            "fr bumper",
            "front fascia",
            "front cover",
            "bumper cover",
        ],
        RepairKind::RearBumper => &[
            "rear bumper",
            "rr bumper",
            "back bumper",
            "rear fascia",
            "rear cover",
        ],
        RepairKind::BumperReinforcement => &[
            "bumper reinforcement",
            "impact bar",
            "reinforcement bar",
            "rebar",
            "energy absorber",
        ],
        RepairKind::Grille => &[
            "grille",
            "grill",
            "radiator grille",
            "front grille",
            "grille assembly",
            "emblem",
        ],
        RepairKind::Windshield => &[
            "windshield",
            "windscreen",
            "w/shield",
            "front glass",
            "glass windshield",
        ],
        RepairKind::SideMirror => &[
            "side mirror",
            "door mirror",
            "outside mirror",
            "o/s mirror",
            "power mirror",
            "mirror assembly",
        ],
        RepairKind::Headlamp => &[
            "headlamp",
            "headlight",
            "head lamp",
            "composite lamp",
            "led headlamp",
            "hid lamp",
        ],
        RepairKind::Tailgate => &[
            "tailgate",
            "tail gate",
            "liftgate",
            "lift gate",
            "decklid",
            "deck lid",
            "trunk lid",
        ],
        RepairKind::Hood => &["hood", "bonnet", "hood panel"],
        RepairKind::Fender => &["fender", "front fender", "wing panel"],
        RepairKind::QuarterPanel => &[
            "quarter panel",
            "qtr panel",
            "rear quarter",
            "bedside",
        ],
        RepairKind::Door => &[
            "front door",
            "rear door",
            "door shell",
            "door assembly",
            "door skin",
        ],
        RepairKind::Roof => &["roof panel", "roof skin", "roof", "sunroof"],
        RepairKind::Alignment => &[
            "alignment",
            "wheel alignment",
            "four wheel alignment",
            "4 wheel alignment",
            "align",
        ],
        RepairKind::Suspension => &[
            "suspension",
            "strut",
            "control arm",
            "knuckle",
            "subframe",
            "crossmember",
        ],
        RepairKind::Steering => &[
            "steering",
            "steering column",
            "steering gear",
            "steering rack",
            "tie rod",
        ],
        RepairKind::Structural => &[
            "frame rail",
            "core support",
            "radiator support",
            "apron",
            "unibody",
            "pillar",
        ],
        RepairKind::RadarSensor => &[
            "radar",
            "distance sensor",
            "acc sensor",
            "cruise control module",
            "collision sensor",
        ],
        RepairKind::Camera => &[
            "camera",
            "lane camera",
            "windshield camera",
            "front camera",
        ],
        RepairKind::Calibration => &[
            "calibration",
            "calibrate",
            "recalibrate",
            "aiming",
            "target set",
            "adas",
        ],
    }
}

/// Keywords indicating a specific ADAS part appears in the estimate.
pub fn adas_part_keywords(part: AdasPart) -> &'static [&'static str] {
    match part {
        AdasPart::FrontRadar => &[
            "front radar",
            "radar sensor",
            "acc radar",
            "distance radar",
            "cruise radar",
            "millimeter wave radar",
            "adaptive cruise sensor",
        ],
        AdasPart::FrontCamera => &[
            "windshield camera",
            "forward camera",
            "front camera",
            "lane camera",
            "lane departure camera",
            "lkas camera",
            "multipurpose camera",
        ],
        AdasPart::BlindSpotMonitor => &[
            "blind spot",
            "blindspot",
            "bsm sensor",
            "blis",
            "side radar",
            "rear corner radar",
            "cross traffic",
        ],
        AdasPart::SurroundCamera => &[
            "surround view",
            "360 camera",
            "around view",
            "birds eye",
            "avm camera",
            "side camera",
        ],
        AdasPart::ParkingSensor => &[
            "parking sensor",
            "park sensor",
            "parking aid",
            "park assist sensor",
            "ultrasonic sensor",
            "pdc sensor",
            "sonar",
        ],
        AdasPart::SteeringAngleSensor => &[
            "steering angle sensor",
            "sas sensor",
            "steering sensor",
            "steering position sensor",
            "angle sensor",
        ],
        AdasPart::RearCamera => &[
            "backup camera",
            "back up camera",
            "rear camera",
            "rearview camera",
            "rear view camera",
            "reverse camera",
        ],
    }
}

/// All repair categories, in the fixed evaluation order.
pub const ALL_REPAIR_KINDS: &[RepairKind] = &[
    RepairKind::FrontBumper,
    RepairKind::RearBumper,
    RepairKind::BumperReinforcement,
    RepairKind::Grille,
    RepairKind::Windshield,
    RepairKind::SideMirror,
    RepairKind::Headlamp,
    RepairKind::Tailgate,
    RepairKind::Hood,
    RepairKind::Fender,
    RepairKind::QuarterPanel,
    RepairKind::Door,
    RepairKind::Roof,
    RepairKind::Alignment,
    RepairKind::Suspension,
    RepairKind::Steering,
    RepairKind::Structural,
    RepairKind::RadarSensor,
    RepairKind::Camera,
    RepairKind::Calibration,
];

/// All ADAS parts, in the fixed evaluation order.
pub const ALL_ADAS_PARTS: &[AdasPart] = &[
    AdasPart::FrontRadar,
    AdasPart::FrontCamera,
    AdasPart::BlindSpotMonitor,
    AdasPart::SurroundCamera,
    AdasPart::ParkingSensor,
    AdasPart::SteeringAngleSensor,
    AdasPart::RearCamera,
];
