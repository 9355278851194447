//! Cultivation realms and the five elements.

/// Cultivation realm, ordered from mortal to tribulation crossing.
///
/// The discriminant is the realm's tier index used by world laws.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Realm {
    #[default]
    #[strum(to_string = "凡人", serialize = "mortal")]
    #[cfg_attr(feature = "serde", serde(rename = "凡人", alias = "mortal"))]
    Mortal = 0,

    #[strum(to_string = "炼气期", serialize = "qi_refining")]
    #[cfg_attr(feature = "serde", serde(rename = "炼气期", alias = "qi_refining"))]
    QiRefining = 1,

    #[strum(to_string = "筑基期", serialize = "foundation")]
    #[cfg_attr(feature = "serde", serde(rename = "筑基期", alias = "foundation"))]
    Foundation = 2,

    #[strum(to_string = "金丹期", serialize = "golden_core")]
    #[cfg_attr(feature = "serde", serde(rename = "金丹期", alias = "golden_core"))]
    GoldenCore = 3,

    #[strum(to_string = "元婴期", serialize = "nascent_soul")]
    #[cfg_attr(feature = "serde", serde(rename = "元婴期", alias = "nascent_soul"))]
    NascentSoul = 4,

    #[strum(to_string = "化神期", serialize = "spirit_severing")]
    #[cfg_attr(feature = "serde", serde(rename = "化神期", alias = "spirit_severing"))]
    SpiritSevering = 5,

    #[strum(to_string = "合体期", serialize = "fusion")]
    #[cfg_attr(feature = "serde", serde(rename = "合体期", alias = "fusion"))]
    Fusion = 6,

    #[strum(to_string = "大乘期", serialize = "mahayana")]
    #[cfg_attr(feature = "serde", serde(rename = "大乘期", alias = "mahayana"))]
    Mahayana = 7,

    #[strum(to_string = "渡劫期", serialize = "tribulation")]
    #[cfg_attr(feature = "serde", serde(rename = "渡劫期", alias = "tribulation"))]
    Tribulation = 8,
}

impl Realm {
    /// Tier index, 0 for mortals.
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Signed tier gap `self - other`.
    #[inline]
    pub const fn gap(self, other: Realm) -> i32 {
        self.index() as i32 - other.index() as i32
    }

    /// The realm directly above this one.
    pub fn next(self) -> Option<Realm> {
        Realm::from_repr(self.index() + 1)
    }
}

/// The five elements of spiritual roots and techniques.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Element {
    #[strum(to_string = "metal", serialize = "金")]
    #[cfg_attr(feature = "serde", serde(alias = "金"))]
    Metal,
    #[strum(to_string = "wood", serialize = "木")]
    #[cfg_attr(feature = "serde", serde(alias = "木"))]
    Wood,
    #[strum(to_string = "water", serialize = "水")]
    #[cfg_attr(feature = "serde", serde(alias = "水"))]
    Water,
    #[strum(to_string = "fire", serialize = "火")]
    #[cfg_attr(feature = "serde", serde(alias = "火"))]
    Fire,
    #[strum(to_string = "earth", serialize = "土")]
    #[cfg_attr(feature = "serde", serde(alias = "土"))]
    Earth,
}

impl Element {
    /// The element this one overcomes: metal cuts wood, wood parts earth,
    /// earth dams water, water quenches fire, fire melts metal.
    pub const fn counters(self) -> Element {
        match self {
            Element::Metal => Element::Wood,
            Element::Wood => Element::Earth,
            Element::Earth => Element::Water,
            Element::Water => Element::Fire,
            Element::Fire => Element::Metal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn realm_indices_follow_declaration_order() {
        let indices: Vec<u8> = Realm::iter().map(Realm::index).collect();
        assert_eq!(indices, (0..=8).collect::<Vec<_>>());
        assert_eq!(Realm::GoldenCore.gap(Realm::QiRefining), 2);
        assert_eq!(Realm::QiRefining.gap(Realm::GoldenCore), -2);
    }

    #[test]
    fn realm_parses_display_and_alias_names() {
        assert_eq!(Realm::from_str("金丹期"), Ok(Realm::GoldenCore));
        assert_eq!(Realm::from_str("golden_core"), Ok(Realm::GoldenCore));
        assert_eq!(Realm::GoldenCore.to_string(), "金丹期");
        assert!(Realm::from_str("仙人").is_err());
    }

    #[test]
    fn next_realm_stops_at_the_top() {
        assert_eq!(Realm::Mortal.next(), Some(Realm::QiRefining));
        assert_eq!(Realm::Tribulation.next(), None);
    }

    #[test]
    fn element_counters_form_a_cycle() {
        for element in Element::iter() {
            let mut current = element;
            for _ in 0..5 {
                current = current.counters();
            }
            assert_eq!(current, element);
            assert_ne!(element.counters(), element);
        }
        assert_eq!(Element::from_str("火"), Ok(Element::Fire));
    }
}
