use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Preset {
    pub name: &'static str,
    pub stock_lengths: &'static [u32],
}

pub const PRESETS: &[Preset] = &[
    Preset {
        name: "structural-steel",
        stock_lengths: &[6000, 12100, 15100],
    },
    Preset {
        name: "aluminium-profile",
        stock_lengths: &[6000, 6500],
    },
    Preset {
        name: "timber",
        stock_lengths: &[2400, 3000, 3600, 4800],
    },
];

pub fn find(name: &str) -> Option<&'static Preset> {
    PRESETS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
}
