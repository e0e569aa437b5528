use phf::{Map, phf_map};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Identifies what kind of particle a [`super::particle::Particle`] represents.
///
/// The set is closed: coarse-grained amino acid residues, chain termini, common
/// monatomic ions, generic ion classes, titratable groups and a non-interacting ghost.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Species {
    // --- Amino acid residues ---
    Gly,
    Ala,
    Val,
    Leu,
    Ile,
    Phe,
    Trp,
    Tyr,
    His,
    Ser,
    Thr,
    Met,
    Cys,
    Asp,
    Gln,
    Glu,
    Asn,
    Lys,
    Arg,
    Pro,
    #[default]
    Unk,

    // --- Chain termini ---
    Ntr,
    Ctr,

    // --- Monatomic ions ---
    Na,
    K,
    Cl,
    Br,
    I,

    // --- Generic classes ---
    Ion,
    Cation,
    Anion,
    Ghost,

    // --- Titratable groups ---
    Rnh3,
    Rnh4,
    Rcooh,
    Rcoo,
}

#[rustfmt::skip]
static SYMBOLS: Map<&'static str, Species> = phf_map! {
    "GLY" => Species::Gly, "ALA" => Species::Ala, "VAL" => Species::Val,
    "LEU" => Species::Leu, "ILE" => Species::Ile, "PHE" => Species::Phe,
    "TRP" => Species::Trp, "TYR" => Species::Tyr, "HIS" => Species::His,
    "SER" => Species::Ser, "THR" => Species::Thr, "MET" => Species::Met,
    "CYS" => Species::Cys, "ASP" => Species::Asp, "GLN" => Species::Gln,
    "GLU" => Species::Glu, "ASN" => Species::Asn, "LYS" => Species::Lys,
    "ARG" => Species::Arg, "PRO" => Species::Pro, "UNK" => Species::Unk,
    "NTR" => Species::Ntr, "CTR" => Species::Ctr,
    "NA" => Species::Na, "K" => Species::K, "CL" => Species::Cl,
    "BR" => Species::Br, "I" => Species::I,
    "ION" => Species::Ion, "CATION" => Species::Cation, "ANION" => Species::Anion,
    "GHOST" => Species::Ghost,
    "RNH3" => Species::Rnh3, "RNH4" => Species::Rnh4,
    "RCOOH" => Species::Rcooh, "RCOO" => Species::Rcoo,
};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown species symbol: '{0}'")]
pub struct UnknownSpeciesError(pub String);

impl Species {
    pub fn symbol(&self) -> &'static str {
        match self {
            Species::Gly => "GLY",
            Species::Ala => "ALA",
            Species::Val => "VAL",
            Species::Leu => "LEU",
            Species::Ile => "ILE",
            Species::Phe => "PHE",
            Species::Trp => "TRP",
            Species::Tyr => "TYR",
            Species::His => "HIS",
            Species::Ser => "SER",
            Species::Thr => "THR",
            Species::Met => "MET",
            Species::Cys => "CYS",
            Species::Asp => "ASP",
            Species::Gln => "GLN",
            Species::Glu => "GLU",
            Species::Asn => "ASN",
            Species::Lys => "LYS",
            Species::Arg => "ARG",
            Species::Pro => "PRO",
            Species::Unk => "UNK",
            Species::Ntr => "NTR",
            Species::Ctr => "CTR",
            Species::Na => "NA",
            Species::K => "K",
            Species::Cl => "CL",
            Species::Br => "BR",
            Species::I => "I",
            Species::Ion => "ION",
            Species::Cation => "CATION",
            Species::Anion => "ANION",
            Species::Ghost => "GHOST",
            Species::Rnh3 => "RNH3",
            Species::Rnh4 => "RNH4",
            Species::Rcooh => "RCOOH",
            Species::Rcoo => "RCOO",
        }
    }

    pub fn is_amino_acid(&self) -> bool {
        *self <= Species::Unk
    }

    pub fn is_ion(&self) -> bool {
        matches!(
            self,
            Species::Na
                | Species::K
                | Species::Cl
                | Species::Br
                | Species::I
                | Species::Ion
                | Species::Cation
                | Species::Anion
        )
    }
}

impl FromStr for Species {
    type Err = UnknownSpeciesError;

    /// Parses a species symbol, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_uppercase();
        SYMBOLS
            .get(key.as_str())
            .copied()
            .ok_or_else(|| UnknownSpeciesError(s.to_string()))
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_parses_known_symbols() {
        assert_eq!(Species::from_str("NA"), Ok(Species::Na));
        assert_eq!(Species::from_str("GLY"), Ok(Species::Gly));
        assert_eq!(Species::from_str("RCOOH"), Ok(Species::Rcooh));
        assert_eq!(Species::from_str("ghost"), Ok(Species::Ghost));
    }

    #[test]
    fn from_str_is_case_insensitive_and_trims() {
        assert_eq!(Species::from_str("  cl "), Ok(Species::Cl));
        assert_eq!(Species::from_str("Cation"), Ok(Species::Cation));
    }

    #[test]
    fn from_str_rejects_unknown_symbols() {
        assert_eq!(
            Species::from_str("XYZ"),
            Err(UnknownSpeciesError("XYZ".to_string()))
        );
        assert!(Species::from_str("").is_err());
    }

    #[test]
    fn symbol_round_trips_through_lookup_table() {
        for (symbol, species) in SYMBOLS.entries() {
            assert_eq!(species.symbol(), *symbol);
            assert_eq!(Species::from_str(symbol), Ok(*species));
        }
    }

    #[test]
    fn classification_helpers_partition_the_set() {
        assert!(Species::Lys.is_amino_acid());
        assert!(!Species::Lys.is_ion());
        assert!(Species::Na.is_ion());
        assert!(!Species::Na.is_amino_acid());
        assert!(!Species::Ghost.is_ion());
        assert!(!Species::Ctr.is_amino_acid());
    }

    #[test]
    fn default_species_is_unknown() {
        assert_eq!(Species::default(), Species::Unk);
        assert_eq!(Species::default().to_string(), "UNK");
    }
}
