//! Lineage string conventions shared by the SQL filters and the tests
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between consecutive ranks in a lineage string,
/// e.g. `Root; d__Bacteria; p__Firmicutes_C`.
pub const LINEAGE_SEPARATOR: &str = "; ";

/// Domain token for bacterial lineages
pub const DOMAIN_BACTERIA: &str = "d__Bacteria";

/// Domain token for archaeal lineages
pub const DOMAIN_ARCHAEA: &str = "d__Archaea";

/// Taxonomic ranks encoded in lineage strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Domain,
    Phylum,
    Class,
    Order,
    Family,
    Genus,
    Species,
}

impl Rank {
    /// The rank prefix as it appears in lineage strings
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Domain => "d__",
            Self::Phylum => "p__",
            Self::Class => "c__",
            Self::Order => "o__",
            Self::Family => "f__",
            Self::Genus => "g__",
            Self::Species => "s__",
        }
    }

    /// The rank prefix anchored at a rank boundary. Matching this token keeps
    /// the short prefix from matching inside an unrelated longer name.
    pub fn boundary_token(&self) -> String {
        format!("{}{}", LINEAGE_SEPARATOR, self.prefix())
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Domain => "domain",
            Self::Phylum => "phylum",
            Self::Class => "class",
            Self::Order => "order",
            Self::Family => "family",
            Self::Genus => "genus",
            Self::Species => "species",
        };
        write!(f, "{}", name)
    }
}

/// Whether a lineage belongs to one of the domains the comparator cares
/// about (Bacteria or Archaea), matched as a literal substring.
pub fn is_target_domain(lineage: &str) -> bool {
    lineage.contains(DOMAIN_BACTERIA) || lineage.contains(DOMAIN_ARCHAEA)
}

/// Whether a lineage is resolved to at least the given rank, i.e. carries
/// the rank's prefix at a rank boundary.
pub fn resolves_to_rank(lineage: &str, rank: Rank) -> bool {
    lineage.contains(&rank.boundary_token())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAMILY_LINEAGE: &str = "Root; d__Bacteria; p__Firmicutes_C; c__Negativicutes; \
                                  o__Acidaminococcales; f__Acidaminococcaceae";

    #[test]
    fn test_target_domain_matching() {
        assert!(is_target_domain(FAMILY_LINEAGE));
        assert!(is_target_domain("Root; d__Archaea; p__Thermoproteota"));
        assert!(!is_target_domain("Root; d__Eukaryota; p__Ascomycota"));
        assert!(!is_target_domain("Root"));
    }

    #[test]
    fn test_rank_resolution() {
        assert!(resolves_to_rank(FAMILY_LINEAGE, Rank::Family));
        assert!(resolves_to_rank(FAMILY_LINEAGE, Rank::Order));
        assert!(!resolves_to_rank(FAMILY_LINEAGE, Rank::Genus));

        let genus = format!("{}; g__Acidaminococcus", FAMILY_LINEAGE);
        assert!(resolves_to_rank(&genus, Rank::Genus));
        assert!(!resolves_to_rank(&genus, Rank::Species));
    }

    #[test]
    fn test_boundary_token_anchoring() {
        // A bare prefix inside a longer name must not count as resolution.
        let tricky = "Root; d__Bacteria; p__Bacteroidota; c__weird_g__name_c";
        assert!(!resolves_to_rank(tricky, Rank::Genus));
        assert_eq!(Rank::Genus.boundary_token(), "; g__");
    }

    #[test]
    fn test_rank_display() {
        assert_eq!(Rank::Genus.to_string(), "genus");
        assert_eq!(Rank::Domain.to_string(), "domain");
    }
}
