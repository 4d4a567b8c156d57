pub mod assign;

pub use assign::{assign, PlacedPlayer};

use crate::models::{RoleCategory, SubRole};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Formations the pitch view knows how to lay out.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FormationKind {
    #[serde(rename = "4-2-3-1")]
    F4231,
    #[serde(rename = "4-3-3")]
    F433,
    #[serde(rename = "4-4-2")]
    F442,
    #[serde(rename = "3-5-2")]
    F352,
}

/// Template used when an identifier is unknown.
pub const FALLBACK_FORMATION: FormationKind = FormationKind::F433;

/// Identifier written for fresh installs and missing documents.
pub const DEFAULT_FORMATION_CODE: &str = "4-2-3-1";

impl FormationKind {
    pub fn code(&self) -> &'static str {
        match self {
            FormationKind::F4231 => "4-2-3-1",
            FormationKind::F433 => "4-3-3",
            FormationKind::F442 => "4-4-2",
            FormationKind::F352 => "3-5-2",
        }
    }

    pub fn all() -> [FormationKind; 4] {
        [FormationKind::F4231, FormationKind::F433, FormationKind::F442, FormationKind::F352]
    }

    pub fn template(&self) -> &'static FormationTemplate {
        TEMPLATES.iter().find(|t| t.kind == *self).unwrap_or_else(|| &TEMPLATES[0])
    }
}

impl FromStr for FormationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "4-2-3-1" => Ok(FormationKind::F4231),
            "4-3-3" => Ok(FormationKind::F433),
            "4-4-2" => Ok(FormationKind::F442),
            "3-5-2" => Ok(FormationKind::F352),
            _ => Err(format!("Unknown formation: {}", s)),
        }
    }
}

/// Pitch coordinates in percent. x runs left touchline to right touchline,
/// y runs attacking end (0) to own goal line (100).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PitchPos {
    pub x: f32,
    pub y: f32,
}

impl PitchPos {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x: x.clamp(0.0, 100.0), y: y.clamp(0.0, 100.0) }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TemplateSlot {
    pub role: SubRole,
    pub pos: PitchPos,
}

impl TemplateSlot {
    fn new(role: SubRole, x: f32, y: f32) -> Self {
        Self { role, pos: PitchPos::new(x, y) }
    }
}

/// Ordered slot list for one formation. Slot order is meaningful: the
/// overflow pass and the rendered output both follow it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormationTemplate {
    pub kind: FormationKind,
    pub slots: Vec<TemplateSlot>,
}

impl FormationTemplate {
    pub fn slot(&self, role: SubRole) -> Option<&TemplateSlot> {
        self.slots.iter().find(|s| s.role == role)
    }

    /// Tactical line of a slot. In 3-5-2 the wing backs are part of the
    /// five-man midfield, not the back line.
    pub fn slot_category(&self, role: SubRole) -> RoleCategory {
        if self.kind == FormationKind::F352 && matches!(role, SubRole::LWB | SubRole::RWB) {
            return RoleCategory::Midfield;
        }
        role.category()
    }

    fn create_4231() -> Self {
        Self {
            kind: FormationKind::F4231,
            slots: vec![
                TemplateSlot::new(SubRole::GK, 50.0, 92.0),
                TemplateSlot::new(SubRole::LB, 8.0, 76.0),
                TemplateSlot::new(SubRole::LCB, 33.0, 82.0),
                TemplateSlot::new(SubRole::RCB, 67.0, 82.0),
                TemplateSlot::new(SubRole::RB, 92.0, 76.0),
                TemplateSlot::new(SubRole::LDM, 32.0, 64.0),
                TemplateSlot::new(SubRole::RDM, 68.0, 64.0),
                TemplateSlot::new(SubRole::LM, 12.0, 40.0),
                TemplateSlot::new(SubRole::CAM, 50.0, 42.0),
                TemplateSlot::new(SubRole::RM, 88.0, 40.0),
                TemplateSlot::new(SubRole::ST, 50.0, 16.0),
            ],
        }
    }

    fn create_433() -> Self {
        Self {
            kind: FormationKind::F433,
            slots: vec![
                TemplateSlot::new(SubRole::GK, 50.0, 92.0),
                TemplateSlot::new(SubRole::LB, 8.0, 76.0),
                TemplateSlot::new(SubRole::LCB, 33.0, 82.0),
                TemplateSlot::new(SubRole::RCB, 67.0, 82.0),
                TemplateSlot::new(SubRole::RB, 92.0, 76.0),
                TemplateSlot::new(SubRole::LCM, 25.0, 58.0),
                TemplateSlot::new(SubRole::CM, 50.0, 62.0),
                TemplateSlot::new(SubRole::RCM, 75.0, 58.0),
                TemplateSlot::new(SubRole::LW, 12.0, 26.0),
                TemplateSlot::new(SubRole::ST, 50.0, 16.0),
                TemplateSlot::new(SubRole::RW, 88.0, 26.0),
            ],
        }
    }

    fn create_442() -> Self {
        Self {
            kind: FormationKind::F442,
            slots: vec![
                TemplateSlot::new(SubRole::GK, 50.0, 92.0),
                TemplateSlot::new(SubRole::LB, 8.0, 76.0),
                TemplateSlot::new(SubRole::LCB, 33.0, 82.0),
                TemplateSlot::new(SubRole::RCB, 67.0, 82.0),
                TemplateSlot::new(SubRole::RB, 92.0, 76.0),
                TemplateSlot::new(SubRole::LM, 12.0, 54.0),
                TemplateSlot::new(SubRole::LCM, 36.0, 58.0),
                TemplateSlot::new(SubRole::RCM, 64.0, 58.0),
                TemplateSlot::new(SubRole::RM, 88.0, 54.0),
                TemplateSlot::new(SubRole::CF, 35.0, 18.0),
                TemplateSlot::new(SubRole::ST, 65.0, 18.0),
            ],
        }
    }

    fn create_352() -> Self {
        Self {
            kind: FormationKind::F352,
            slots: vec![
                TemplateSlot::new(SubRole::GK, 50.0, 92.0),
                TemplateSlot::new(SubRole::LCB, 20.0, 82.0),
                TemplateSlot::new(SubRole::CB, 50.0, 85.0),
                TemplateSlot::new(SubRole::RCB, 80.0, 82.0),
                TemplateSlot::new(SubRole::LWB, 8.0, 52.0),
                TemplateSlot::new(SubRole::LCM, 30.0, 60.0),
                TemplateSlot::new(SubRole::CM, 50.0, 64.0),
                TemplateSlot::new(SubRole::RCM, 70.0, 60.0),
                TemplateSlot::new(SubRole::RWB, 92.0, 52.0),
                TemplateSlot::new(SubRole::CF, 38.0, 18.0),
                TemplateSlot::new(SubRole::ST, 62.0, 18.0),
            ],
        }
    }
}

static TEMPLATES: Lazy<Vec<FormationTemplate>> = Lazy::new(|| {
    vec![
        FormationTemplate::create_4231(),
        FormationTemplate::create_433(),
        FormationTemplate::create_442(),
        FormationTemplate::create_352(),
    ]
});

/// Resolve an identifier string to its template, falling back to 4-3-3 for
/// anything unknown.
pub fn lookup(code: &str) -> &'static FormationTemplate {
    let kind = FormationKind::from_str(code).unwrap_or(FALLBACK_FORMATION);
    kind.template()
}

// ============================================================================//
// Tests
// ============================================================================//
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_template_has_eleven_slots() {
        for kind in FormationKind::all() {
            assert_eq!(kind.template().slots.len(), 11, "{}", kind.code());
        }
    }

    #[test]
    fn unknown_code_falls_back_to_433() {
        assert_eq!(lookup("5-5-5").kind, FormationKind::F433);
        assert_eq!(lookup("4-4-2").kind, FormationKind::F442);
    }

    #[test]
    fn codes_roundtrip_through_serde() {
        let json = serde_json::to_string(&FormationKind::F4231).unwrap();
        assert_eq!(json, "\"4-2-3-1\"");
        let kind: FormationKind = serde_json::from_str("\"3-5-2\"").unwrap();
        assert_eq!(kind, FormationKind::F352);
    }

    #[test]
    fn wing_backs_join_the_midfield_in_352() {
        let t352 = FormationKind::F352.template();
        assert_eq!(t352.slot_category(SubRole::LWB), RoleCategory::Midfield);
        assert_eq!(t352.slot_category(SubRole::RWB), RoleCategory::Midfield);
        assert_eq!(t352.slot_category(SubRole::CB), RoleCategory::Defense);

        let t4231 = FormationKind::F4231.template();
        assert_eq!(t4231.slot_category(SubRole::LWB), RoleCategory::Defense);
    }

    #[test]
    fn goalkeeper_slot_sits_deepest() {
        for kind in FormationKind::all() {
            let template = kind.template();
            let gk = template.slot(SubRole::GK).unwrap();
            for slot in &template.slots {
                assert!(gk.pos.y >= slot.pos.y);
            }
        }
    }
}
