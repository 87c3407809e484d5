//! Declared tile attributes: breakability tier, collision layer, collectable kind.
//!
//! Descriptors spell these as strings. Each enum owns its canonical spellings
//! and parses a declared value under a [`CasePolicy`]. With
//! [`CasePolicy::Normalize`] a value that only matches after trimming and case
//! folding (e.g. `"brittle"` for [`BreakabilityTier::Brittle`]) is accepted and
//! flagged as normalized so the loader can warn about it. With
//! [`CasePolicy::Strict`] such a value is rejected.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a tile type, in `[0, tile_count)`.
pub type TileTypeId = u32;

/// How declared property values are matched against canonical names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CasePolicy {
    /// Trim and case-fold before matching; warn when that was needed.
    /// Collectable kinds also ignore underscores.
    #[default]
    Normalize,
    /// Only the exact canonical spelling is accepted.
    Strict,
}

impl CasePolicy {
    /// Parse a policy name as written in the config file.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "normalize" => Some(CasePolicy::Normalize),
            "strict" => Some(CasePolicy::Strict),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CasePolicy::Normalize => "normalize",
            CasePolicy::Strict => "strict",
        }
    }
}

/// A parsed declared value and whether it needed normalization to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Declared<T> {
    pub value: T,
    pub normalized: bool,
}

fn fold(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Case fold and also ignore underscores, so `MissileTank` meets `missile_tank`.
fn fold_identifier(raw: &str) -> String {
    fold(raw).replace('_', "")
}

fn match_declared<T: Copy>(
    raw: &str,
    names: &[(&'static str, T)],
    policy: CasePolicy,
    key: fn(&str) -> String,
) -> Option<Declared<T>> {
    if let Some((_, value)) = names.iter().find(|(name, _)| *name == raw) {
        return Some(Declared {
            value: *value,
            normalized: false,
        });
    }
    if policy == CasePolicy::Strict {
        return None;
    }
    let folded = key(raw);
    names
        .iter()
        .find(|(name, _)| key(name) == folded)
        .map(|(_, value)| Declared {
            value: *value,
            normalized: true,
        })
}

/// How much impact a destructible tile withstands before breaking.
///
/// Resistance ordering: `Brittle < Soft < Strong < Solid`. Solid tiles never
/// break through impacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BreakabilityTier {
    Brittle,
    Soft,
    Strong,
    Solid,
}

impl BreakabilityTier {
    const NAMES: [(&'static str, BreakabilityTier); 4] = [
        ("Brittle", BreakabilityTier::Brittle),
        ("Soft", BreakabilityTier::Soft),
        ("Strong", BreakabilityTier::Strong),
        ("Solid", BreakabilityTier::Solid),
    ];

    /// Number of counted impacts that breaks a tile of this tier.
    ///
    /// `None` means impacts never break it.
    pub fn hit_threshold(&self) -> Option<u32> {
        match self {
            BreakabilityTier::Brittle => Some(1),
            BreakabilityTier::Soft => Some(2),
            BreakabilityTier::Strong => Some(4),
            BreakabilityTier::Solid => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BreakabilityTier::Brittle => "Brittle",
            BreakabilityTier::Soft => "Soft",
            BreakabilityTier::Strong => "Strong",
            BreakabilityTier::Solid => "Solid",
        }
    }

    /// Parse a declared `breakability` value.
    pub fn parse(raw: &str, policy: CasePolicy) -> Result<Declared<Self>, String> {
        match_declared(raw, &Self::NAMES, policy, fold)
            .ok_or_else(|| format!("invalid breakability: {raw:?}"))
    }
}

impl fmt::Display for BreakabilityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which entities a tile physically blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CollisionLayer {
    /// Implicit layer for tiles that declare none.
    #[default]
    Terrain,
    /// Blocks only the player.
    Player,
    /// Blocks only creatures.
    Creature,
    /// Blocks nothing. Reported for broken tiles.
    Passable,
}

impl CollisionLayer {
    const NAMES: [(&'static str, CollisionLayer); 5] = [
        ("Terrain", CollisionLayer::Terrain),
        // Level data names the blocks-everything layer "all".
        ("All", CollisionLayer::Terrain),
        ("Player", CollisionLayer::Player),
        ("Creature", CollisionLayer::Creature),
        ("Passable", CollisionLayer::Passable),
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CollisionLayer::Terrain => "Terrain",
            CollisionLayer::Player => "Player",
            CollisionLayer::Creature => "Creature",
            CollisionLayer::Passable => "Passable",
        }
    }

    /// Whether this layer blocks anything at all.
    pub fn is_blocking(&self) -> bool {
        !matches!(self, CollisionLayer::Passable)
    }

    /// Parse a declared `collision_layer` value.
    pub fn parse(raw: &str, policy: CasePolicy) -> Result<Declared<Self>, String> {
        match_declared(raw, &Self::NAMES, policy, fold)
            .ok_or_else(|| format!("invalid collision layer: {raw:?}"))
    }
}

impl fmt::Display for CollisionLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The pickup a collectable tile grants on first contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectableKind {
    Health,
    Power,
    MissileTank,
    IceBeam,
    HighJump,
}

impl CollectableKind {
    const NAMES: [(&'static str, CollectableKind); 5] = [
        ("health", CollectableKind::Health),
        ("power", CollectableKind::Power),
        ("missile_tank", CollectableKind::MissileTank),
        ("ice_beam", CollectableKind::IceBeam),
        ("high_jump", CollectableKind::HighJump),
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CollectableKind::Health => "health",
            CollectableKind::Power => "power",
            CollectableKind::MissileTank => "missile_tank",
            CollectableKind::IceBeam => "ice_beam",
            CollectableKind::HighJump => "high_jump",
        }
    }

    /// Parse a declared `collectable` value.
    pub fn parse(raw: &str, policy: CasePolicy) -> Result<Declared<Self>, String> {
        if fold(raw) == "none" {
            return Err(String::from("collectable must have a type"));
        }
        match_declared(raw, &Self::NAMES, policy, fold_identifier)
            .ok_or_else(|| format!("invalid collectable type: {raw:?}"))
    }
}

impl fmt::Display for CollectableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_exact_match_is_not_normalized() {
        let parsed = BreakabilityTier::parse("Strong", CasePolicy::Normalize).unwrap();
        assert_eq!(parsed.value, BreakabilityTier::Strong);
        assert!(!parsed.normalized);
    }

    #[test]
    fn test_lowercase_brittle_is_normalized() {
        let parsed = BreakabilityTier::parse("brittle", CasePolicy::Normalize).unwrap();
        assert_eq!(parsed.value, BreakabilityTier::Brittle);
        assert!(parsed.normalized);
    }

    #[test]
    fn test_lowercase_brittle_rejected_when_strict() {
        assert!(BreakabilityTier::parse("brittle", CasePolicy::Strict).is_err());
        assert!(BreakabilityTier::parse("Brittle", CasePolicy::Strict).is_ok());
    }

    #[test]
    fn test_unknown_tier_rejected() {
        let err = BreakabilityTier::parse("Glass", CasePolicy::Normalize).unwrap_err();
        assert!(err.contains("Glass"));
    }

    #[test]
    fn test_tier_resistance_ordering() {
        assert!(BreakabilityTier::Brittle < BreakabilityTier::Soft);
        assert!(BreakabilityTier::Soft < BreakabilityTier::Strong);
        assert!(BreakabilityTier::Strong < BreakabilityTier::Solid);
    }

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(BreakabilityTier::Brittle.hit_threshold(), Some(1));
        assert_eq!(BreakabilityTier::Soft.hit_threshold(), Some(2));
        assert_eq!(BreakabilityTier::Strong.hit_threshold(), Some(4));
        assert_eq!(BreakabilityTier::Solid.hit_threshold(), None);
    }

    #[test]
    fn test_collectable_snake_case_and_camel_case() {
        let snake = CollectableKind::parse("missile_tank", CasePolicy::Normalize).unwrap();
        assert_eq!(snake.value, CollectableKind::MissileTank);
        assert!(!snake.normalized);

        let camel = CollectableKind::parse("MissileTank", CasePolicy::Normalize).unwrap();
        assert_eq!(camel.value, CollectableKind::MissileTank);
        assert!(camel.normalized);
    }

    #[test]
    fn test_collectable_none_rejected() {
        let err = CollectableKind::parse("none", CasePolicy::Normalize).unwrap_err();
        assert_eq!(err, "collectable must have a type");
    }

    #[test]
    fn test_collision_layer_parse_and_blocking() {
        let layer = CollisionLayer::parse(" player ", CasePolicy::Normalize).unwrap();
        assert_eq!(layer.value, CollisionLayer::Player);
        assert!(layer.normalized);
        assert!(CollisionLayer::Terrain.is_blocking());
        assert!(!CollisionLayer::Passable.is_blocking());
        assert_eq!(CollisionLayer::default(), CollisionLayer::Terrain);
    }

    #[test]
    fn test_normalization_does_not_strip_separators_from_tiers() {
        assert!(BreakabilityTier::parse("s o-l_id", CasePolicy::Normalize).is_err());
        assert!(BreakabilityTier::parse("So_ft", CasePolicy::Normalize).is_err());
        assert!(CollisionLayer::parse("pla-yer", CasePolicy::Normalize).is_err());
        assert!(CollectableKind::parse("missile tank", CasePolicy::Normalize).is_err());
    }

    #[test]
    fn test_collision_layer_all_is_terrain() {
        let exact = CollisionLayer::parse("All", CasePolicy::Strict).unwrap();
        assert_eq!(exact.value, CollisionLayer::Terrain);
        assert!(!exact.normalized);

        let lower = CollisionLayer::parse("all", CasePolicy::Normalize).unwrap();
        assert_eq!(lower.value, CollisionLayer::Terrain);
        assert!(lower.normalized);
        assert_eq!(CollisionLayer::Terrain.name(), "Terrain");
    }

    #[test]
    fn test_case_policy_names() {
        assert_eq!(CasePolicy::from_name("Strict"), Some(CasePolicy::Strict));
        assert_eq!(CasePolicy::from_name("normalize"), Some(CasePolicy::Normalize));
        assert_eq!(CasePolicy::from_name("loose"), None);
    }
}
