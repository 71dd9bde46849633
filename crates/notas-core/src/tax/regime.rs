//! ICMS regime sub-structures and their field tables.

use std::fmt;

/// Tag names (alternatives, first present wins) of each ICMS figure inside
/// one regime sub-structure. An empty slice means the regime never carries
/// that figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IcmsFieldTable {
    pub base: &'static [&'static str],
    pub rate: &'static [&'static str],
    pub value: &'static [&'static str],
    pub st_base: &'static [&'static str],
    pub st_rate: &'static [&'static str],
    pub st_value: &'static [&'static str],
    pub exempted: &'static [&'static str],
}

const NONE: &[&str] = &[];

const OWN: IcmsFieldTable = IcmsFieldTable {
    base: &["vBC"],
    rate: &["pICMS"],
    value: &["vICMS"],
    st_base: NONE,
    st_rate: NONE,
    st_value: NONE,
    exempted: NONE,
};

const OWN_EXEMPTED: IcmsFieldTable = IcmsFieldTable {
    exempted: &["vICMSDeson"],
    ..OWN
};

const OWN_AND_ST: IcmsFieldTable = IcmsFieldTable {
    st_base: &["vBCST"],
    st_rate: &["pICMSST"],
    st_value: &["vICMSST"],
    ..OWN
};

const OWN_AND_ST_EXEMPTED: IcmsFieldTable = IcmsFieldTable {
    exempted: &["vICMSDeson"],
    ..OWN_AND_ST
};

const ST_ONLY: IcmsFieldTable = IcmsFieldTable {
    base: NONE,
    rate: NONE,
    value: NONE,
    ..OWN_AND_ST
};

const ST_ONLY_EXEMPTED: IcmsFieldTable = IcmsFieldTable {
    exempted: &["vICMSDeson"],
    ..ST_ONLY
};

const ST_RETAINED: IcmsFieldTable = IcmsFieldTable {
    base: NONE,
    rate: NONE,
    value: NONE,
    st_base: &["vBCSTRet"],
    st_rate: &["pST", "pICMSSTRet"],
    st_value: &["vICMSSTRet"],
    exempted: NONE,
};

const EXEMPTED_ONLY: IcmsFieldTable = IcmsFieldTable {
    base: NONE,
    rate: NONE,
    value: NONE,
    st_base: NONE,
    st_rate: NONE,
    st_value: NONE,
    exempted: &["vICMSDeson"],
};

const MONOPHASE: IcmsFieldTable = IcmsFieldTable {
    value: &["vICMSMono"],
    ..EMPTY
};

const MONOPHASE_RETAINED: IcmsFieldTable = IcmsFieldTable {
    value: &["vICMSMonoRet"],
    ..EMPTY
};

const OTHER_STATE: IcmsFieldTable = IcmsFieldTable {
    base: &["vBCOutraUF"],
    rate: &["pICMSOutraUF"],
    value: &["vICMSOutraUF"],
    ..EMPTY
};

const EMPTY: IcmsFieldTable = IcmsFieldTable {
    base: NONE,
    rate: NONE,
    value: NONE,
    st_base: NONE,
    st_rate: NONE,
    st_value: NONE,
    exempted: NONE,
};

const GENERIC: IcmsFieldTable = OWN_AND_ST_EXEMPTED;

/// Closed family of ICMS sub-structures, one per taxation regime (CST/CSOSN).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IcmsRegime {
    Icms00,
    Icms02,
    Icms10,
    Icms15,
    Icms20,
    Icms30,
    Icms40,
    /// CTe exempt/not-taxed.
    Icms45,
    Icms51,
    Icms53,
    Icms60,
    Icms61,
    Icms70,
    Icms90,
    IcmsPart,
    IcmsSt,
    /// CTe: ICMS owed to another state.
    IcmsOutraUf,
    /// CTe: issuer under Simples Nacional.
    IcmsSn,
    IcmsSn101,
    IcmsSn102,
    IcmsSn201,
    IcmsSn202,
    IcmsSn500,
    IcmsSn900,
    /// A tag outside the known family, probed with the common field names.
    Unknown(String),
}

impl IcmsRegime {
    /// Classify a sub-structure by its local tag name.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "ICMS00" => IcmsRegime::Icms00,
            "ICMS02" => IcmsRegime::Icms02,
            "ICMS10" => IcmsRegime::Icms10,
            "ICMS15" => IcmsRegime::Icms15,
            "ICMS20" => IcmsRegime::Icms20,
            "ICMS30" => IcmsRegime::Icms30,
            "ICMS40" => IcmsRegime::Icms40,
            "ICMS45" => IcmsRegime::Icms45,
            "ICMS51" => IcmsRegime::Icms51,
            "ICMS53" => IcmsRegime::Icms53,
            "ICMS60" => IcmsRegime::Icms60,
            "ICMS61" => IcmsRegime::Icms61,
            "ICMS70" => IcmsRegime::Icms70,
            "ICMS90" => IcmsRegime::Icms90,
            "ICMSPart" => IcmsRegime::IcmsPart,
            "ICMSST" => IcmsRegime::IcmsSt,
            "ICMSOutraUF" => IcmsRegime::IcmsOutraUf,
            "ICMSSN" => IcmsRegime::IcmsSn,
            "ICMSSN101" => IcmsRegime::IcmsSn101,
            "ICMSSN102" => IcmsRegime::IcmsSn102,
            "ICMSSN201" => IcmsRegime::IcmsSn201,
            "ICMSSN202" => IcmsRegime::IcmsSn202,
            "ICMSSN500" => IcmsRegime::IcmsSn500,
            "ICMSSN900" => IcmsRegime::IcmsSn900,
            other => IcmsRegime::Unknown(other.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            IcmsRegime::Icms00 => "ICMS00",
            IcmsRegime::Icms02 => "ICMS02",
            IcmsRegime::Icms10 => "ICMS10",
            IcmsRegime::Icms15 => "ICMS15",
            IcmsRegime::Icms20 => "ICMS20",
            IcmsRegime::Icms30 => "ICMS30",
            IcmsRegime::Icms40 => "ICMS40",
            IcmsRegime::Icms45 => "ICMS45",
            IcmsRegime::Icms51 => "ICMS51",
            IcmsRegime::Icms53 => "ICMS53",
            IcmsRegime::Icms60 => "ICMS60",
            IcmsRegime::Icms61 => "ICMS61",
            IcmsRegime::Icms70 => "ICMS70",
            IcmsRegime::Icms90 => "ICMS90",
            IcmsRegime::IcmsPart => "ICMSPart",
            IcmsRegime::IcmsSt => "ICMSST",
            IcmsRegime::IcmsOutraUf => "ICMSOutraUF",
            IcmsRegime::IcmsSn => "ICMSSN",
            IcmsRegime::IcmsSn101 => "ICMSSN101",
            IcmsRegime::IcmsSn102 => "ICMSSN102",
            IcmsRegime::IcmsSn201 => "ICMSSN201",
            IcmsRegime::IcmsSn202 => "ICMSSN202",
            IcmsRegime::IcmsSn500 => "ICMSSN500",
            IcmsRegime::IcmsSn900 => "ICMSSN900",
            IcmsRegime::Unknown(tag) => tag,
        }
    }

    /// Fields carried by this regime.
    pub fn fields(&self) -> &'static IcmsFieldTable {
        match self {
            IcmsRegime::Icms00 | IcmsRegime::Icms51 => &OWN,
            IcmsRegime::Icms20 => &OWN_EXEMPTED,
            IcmsRegime::Icms10 | IcmsRegime::IcmsPart | IcmsRegime::IcmsSn900 => &OWN_AND_ST,
            IcmsRegime::Icms70 | IcmsRegime::Icms90 => &OWN_AND_ST_EXEMPTED,
            IcmsRegime::IcmsSn201 | IcmsRegime::IcmsSn202 => &ST_ONLY,
            IcmsRegime::Icms30 => &ST_ONLY_EXEMPTED,
            IcmsRegime::Icms60 | IcmsRegime::IcmsSt | IcmsRegime::IcmsSn500 => &ST_RETAINED,
            IcmsRegime::Icms40 => &EXEMPTED_ONLY,
            IcmsRegime::Icms02 | IcmsRegime::Icms15 | IcmsRegime::Icms53 => &MONOPHASE,
            IcmsRegime::Icms61 => &MONOPHASE_RETAINED,
            IcmsRegime::IcmsOutraUf => &OTHER_STATE,
            IcmsRegime::Icms45
            | IcmsRegime::IcmsSn
            | IcmsRegime::IcmsSn101
            | IcmsRegime::IcmsSn102 => &EMPTY,
            IcmsRegime::Unknown(_) => &GENERIC,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, IcmsRegime::Unknown(_))
    }
}

impl fmt::Display for IcmsRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Variants of a PIS or COFINS block, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContributionVariant {
    /// Rate-based (`PISAliq` / `COFINSAliq`).
    Rate,
    /// Other basis (`PISOutr` / `COFINSOutr`).
    Other,
    /// Not taxed (`PISNT` / `COFINSNT`).
    NotTaxed,
}

impl ContributionVariant {
    pub const ORDER: [ContributionVariant; 3] = [
        ContributionVariant::Rate,
        ContributionVariant::Other,
        ContributionVariant::NotTaxed,
    ];

    pub fn suffix(&self) -> &'static str {
        match self {
            ContributionVariant::Rate => "Aliq",
            ContributionVariant::Other => "Outr",
            ContributionVariant::NotTaxed => "NT",
        }
    }
}

/// The federal contributions read per item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contribution {
    Pis,
    Cofins,
}

impl Contribution {
    /// Container tag, also the prefix of its variant tags.
    pub fn tag(&self) -> &'static str {
        match self {
            Contribution::Pis => "PIS",
            Contribution::Cofins => "COFINS",
        }
    }

    /// Tag of the value field inside a variant.
    pub fn value_tag(&self) -> &'static str {
        match self {
            Contribution::Pis => "vPIS",
            Contribution::Cofins => "vCOFINS",
        }
    }

    /// Tag of one variant sub-structure, e.g. `PISAliq`.
    pub fn variant_tag(&self, variant: ContributionVariant) -> String {
        format!("{}{}", self.tag(), variant.suffix())
    }
}
