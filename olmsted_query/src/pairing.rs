// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

// Heavy and light chain pairing.  Families from the same cells share a pair id.

use olmsted_core::defs::{Chain, ClonalFamily};

pub fn chain_of(f: Option<&ClonalFamily>) -> Chain {
    match f.and_then(|f| f.locus()) {
        Some(locus) if locus.to_lowercase() != "igh" => Chain::Light,
        _ => Chain::Heavy,
    }
}

// The other family of a pair, if there is exactly one.

pub fn paired_clone<'a, I>(all: I, f: &ClonalFamily) -> Option<&'a ClonalFamily>
where
    I: IntoIterator<Item = &'a ClonalFamily>,
{
    let pair_id = f.pair_id.as_ref()?;
    let mut partners = all
        .into_iter()
        .filter(|g| g.pair_id.as_ref() == Some(pair_id) && g.ident != f.ident);
    let partner = partners.next()?;
    if partners.next().is_some() {
        return None;
    }
    Some(partner)
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct HeavyLight {
    pub heavy: Option<ClonalFamily>,
    pub light: Option<ClonalFamily>,
}

pub fn heavy_light(selected: Option<&ClonalFamily>, paired: Option<&ClonalFamily>) -> HeavyLight {
    let selected = match selected {
        Some(f) => f,
        None => return HeavyLight::default(),
    };
    let (selected, paired) = (Some(selected.clone()), paired.cloned());
    match chain_of(selected.as_ref()) {
        Chain::Heavy => HeavyLight {
            heavy: selected,
            light: paired,
        },
        Chain::Light => HeavyLight {
            heavy: paired,
            light: selected,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{family, mock_state};
    use pretty_trace::PrettyTrace;

    #[test]
    fn test_chain_of() {
        PrettyTrace::new().on();
        assert_eq!(chain_of(Some(&family("a", "d", "IGH", 1))), Chain::Heavy);
        assert_eq!(chain_of(Some(&family("a", "d", "igh", 1))), Chain::Heavy);
        assert_eq!(chain_of(Some(&family("a", "d", "IGK", 1))), Chain::Light);
        assert_eq!(chain_of(Some(&family("a", "d", "IGL", 1))), Chain::Light);
        assert_eq!(chain_of(Some(&ClonalFamily::default())), Chain::Heavy);
        assert_eq!(chain_of(None), Chain::Heavy);
    }

    #[test]
    fn test_pairing() {
        PrettyTrace::new().on();
        let s = mock_state();
        let all = &s.families["dataset-1"];
        let f3 = &all[2];
        let f4 = &all[3];
        assert_eq!(paired_clone(all, f3).unwrap().ident, "family-4");
        assert_eq!(paired_clone(all, f4).unwrap().ident, "family-3");
        assert!(paired_clone(all, &all[0]).is_none());

        // Ordering follows the chain of the selected family.

        let hl = heavy_light(Some(f4), paired_clone(all, f4));
        assert_eq!(hl.heavy.unwrap().ident, "family-3");
        assert_eq!(hl.light.unwrap().ident, "family-4");
        let hl = heavy_light(Some(f3), paired_clone(all, f3));
        assert_eq!(hl.heavy.unwrap().ident, "family-3");
        assert_eq!(hl.light.unwrap().ident, "family-4");
        assert_eq!(heavy_light(None, Some(f3)), HeavyLight::default());

        // An ambiguous pair has no partner.

        let mut more = all.clone();
        let mut extra = f4.clone();
        extra.ident = "family-5".to_string();
        more.push(extra);
        assert!(paired_clone(&more, f3).is_none());

        // Families are searched across datasets without collecting them.

        let partner = paired_clone(s.families.values().flatten(), f3);
        assert_eq!(partner.unwrap().ident, "family-4");
    }
}
