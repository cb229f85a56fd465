//! Static content shown on the device

/// Pixel-art icon kind
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Icon {
    Plane,
    Phone,
    Browser,
}

impl Icon {
    /// Returns the 8×8 bitmap, one byte per row, MSB on the left
    pub fn bitmap(&self) -> [u8; 8] {
        match self {
            Icon::Plane => [
                0b0001_0000,
                0b0011_0000,
                0b0111_1110,
                0b1111_1111,
                0b0111_1110,
                0b0011_0000,
                0b0001_0000,
                0b0000_0000,
            ],
            Icon::Phone => [
                0b0111_1110,
                0b0100_0010,
                0b0100_0010,
                0b0100_0010,
                0b0100_0010,
                0b0111_1110,
                0b0101_1010,
                0b0111_1110,
            ],
            Icon::Browser => [
                0b1111_1111,
                0b1000_0001,
                0b1111_1111,
                0b1000_0001,
                0b1000_0001,
                0b1000_0001,
                0b1000_0001,
                0b1111_1111,
            ],
        }
    }

    /// Checks whether the pixel at `(x, y)` is lit
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        x < 8 && y < 8 && (self.bitmap()[y] >> (7 - x)) & 1 == 1
    }
}

/// Portfolio entry
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Project {
    pub id: &'static str,
    pub name: &'static str,
    pub subtitle: &'static str,
    pub year: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
    pub status: &'static str,
    pub icon: Icon,
}

/// Every project, in display order
pub const PROJECTS: [Project; 3] = [
    Project {
        id: "tomo",
        name: "TOMO",
        subtitle: "AI Travel Companion",
        year: "2025",
        description: "Your AI guide to Japan. ChatGPT meets Google Maps \
                      meets local knowledge.",
        tags: &["EXPO", "TS", "GPT-4"],
        status: "BUILDING",
        icon: Icon::Plane,
    },
    Project {
        id: "nokturn",
        name: "NOKTURN",
        subtitle: "AI Receptionist",
        year: "2024",
        description: "Never miss a call. AI answers phones for HVAC \
                      contractors.",
        tags: &["ELEVEN", "REACT", "NODE"],
        status: "BUILDING",
        icon: Icon::Phone,
    },
    Project {
        id: "studio",
        name: "STUDIO",
        subtitle: "Web Development",
        year: "2023+",
        description: "Premium websites for contractors. Built to convert.",
        tags: &["NEXT", "REACT", "TAIL"],
        status: "ACTIVE",
        icon: Icon::Browser,
    },
];

/// Skill meter, with a level out of [`Skill::MAX`]
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Skill {
    pub name: &'static str,
    pub level: u8,
}

impl Skill {
    /// Level of a full meter
    pub const MAX: u8 = 10;
}

/// Every skill, in display order
pub const SKILLS: [Skill; 6] = [
    Skill {
        name: "REACT/NEXT",
        level: 9,
    },
    Skill {
        name: "TYPESCRIPT",
        level: 8,
    },
    Skill {
        name: "NODE.JS",
        level: 8,
    },
    Skill {
        name: "REACT NATIVE",
        level: 7,
    },
    Skill {
        name: "AI/LLM",
        level: 8,
    },
    Skill {
        name: "UI/UX",
        level: 8,
    },
];

/// External link on the contact screen
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Link {
    pub label: &'static str,
    pub url: &'static str,
}

/// Every contact link, in display order
pub const CONTACT: [Link; 3] = [
    Link {
        label: "EMAIL",
        url: "mailto:hello@alec.dev",
    },
    Link {
        label: "TWITTER",
        url: "https://twitter.com",
    },
    Link {
        label: "GITHUB",
        url: "https://github.com",
    },
];

pub(crate) const OWNER: &str = "ALEC";
pub(crate) const ROLE: &str = "DEVELOPER";
pub(crate) const VERSION: &str = "v11 • 2025";

pub(crate) const ABOUT: [&str; 5] = [
    "I build apps and websites that solve real problems.",
    "11 ventures. Most failed. Each one taught me what actually works.",
    "Now I focus on:",
    "→ Apps that help people",
    "→ Sites that convert",
];

/// Credits roll, as `(heading, lines)` sections
pub(crate) const CREDITS: [(&str, &[&str]); 4] = [
    ("DEVELOPED BY", &[OWNER]),
    ("POWERED BY", &["RUST • EGUI", "CPAL"]),
    ("INSPIRED BY", &["NINTENDO 1989", "PIXEL ART ERA"]),
    ("SPECIAL THANKS", &["COFFEE", "LATE NIGHTS"]),
];
