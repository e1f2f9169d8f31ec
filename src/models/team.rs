use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TeamCode {
    #[serde(rename = "ATL")] Atl,
    #[serde(rename = "BUF")] Buf,
    #[serde(rename = "CHI")] Chi,
    #[serde(rename = "CIN")] Cin,
    #[serde(rename = "CLE")] Cle,
    #[serde(rename = "DAL")] Dal,
    #[serde(rename = "DEN")] Den,
    #[serde(rename = "DET")] Det,
    #[serde(rename = "GB")] Gb,
    #[serde(rename = "TEN")] Ten,
    #[serde(rename = "IND")] Ind,
    #[serde(rename = "KC")] Kc,
    #[serde(rename = "LV")] Lv,
    #[serde(rename = "LAR")] Lar,
    #[serde(rename = "MIA")] Mia,
    #[serde(rename = "MIN")] Min,
    #[serde(rename = "NE")] Ne,
    #[serde(rename = "NO")] No,
    #[serde(rename = "NYG")] Nyg,
    #[serde(rename = "NYJ")] Nyj,
    #[serde(rename = "PHI")] Phi,
    #[serde(rename = "ARI")] Ari,
    #[serde(rename = "PIT")] Pit,
    #[serde(rename = "LAC")] Lac,
    #[serde(rename = "SF")] Sf,
    #[serde(rename = "SEA")] Sea,
    #[serde(rename = "TB")] Tb,
    #[serde(rename = "WSH")] Wsh,
    #[serde(rename = "CAR")] Car,
    #[serde(rename = "JAX")] Jax,
    #[serde(rename = "AFC")] Afc,
    #[serde(rename = "NFC")] Nfc,
    #[serde(rename = "BAL")] Bal,
    #[serde(rename = "HOU")] Hou,
}

impl TeamCode {
    /// Feed ordering; `Team::catalog` assigns ids from this order.
    pub const ALL: [TeamCode; 34] = [
        TeamCode::Atl, TeamCode::Buf, TeamCode::Chi, TeamCode::Cin, TeamCode::Cle,
        TeamCode::Dal, TeamCode::Den, TeamCode::Det, TeamCode::Gb, TeamCode::Ten,
        TeamCode::Ind, TeamCode::Kc, TeamCode::Lv, TeamCode::Lar, TeamCode::Mia,
        TeamCode::Min, TeamCode::Ne, TeamCode::No, TeamCode::Nyg, TeamCode::Nyj,
        TeamCode::Phi, TeamCode::Ari, TeamCode::Pit, TeamCode::Lac, TeamCode::Sf,
        TeamCode::Sea, TeamCode::Tb, TeamCode::Wsh, TeamCode::Car, TeamCode::Jax,
        TeamCode::Afc, TeamCode::Nfc, TeamCode::Bal, TeamCode::Hou,
    ];

    pub fn abbr(&self) -> &'static str {
        match self {
            TeamCode::Atl => "ATL",
            TeamCode::Buf => "BUF",
            TeamCode::Chi => "CHI",
            TeamCode::Cin => "CIN",
            TeamCode::Cle => "CLE",
            TeamCode::Dal => "DAL",
            TeamCode::Den => "DEN",
            TeamCode::Det => "DET",
            TeamCode::Gb => "GB",
            TeamCode::Ten => "TEN",
            TeamCode::Ind => "IND",
            TeamCode::Kc => "KC",
            TeamCode::Lv => "LV",
            TeamCode::Lar => "LAR",
            TeamCode::Mia => "MIA",
            TeamCode::Min => "MIN",
            TeamCode::Ne => "NE",
            TeamCode::No => "NO",
            TeamCode::Nyg => "NYG",
            TeamCode::Nyj => "NYJ",
            TeamCode::Phi => "PHI",
            TeamCode::Ari => "ARI",
            TeamCode::Pit => "PIT",
            TeamCode::Lac => "LAC",
            TeamCode::Sf => "SF",
            TeamCode::Sea => "SEA",
            TeamCode::Tb => "TB",
            TeamCode::Wsh => "WSH",
            TeamCode::Car => "CAR",
            TeamCode::Jax => "JAX",
            TeamCode::Afc => "AFC",
            TeamCode::Nfc => "NFC",
            TeamCode::Bal => "BAL",
            TeamCode::Hou => "HOU",
        }
    }

    pub fn from_abbr(s: &str) -> Option<Self> {
        let upper = s.to_uppercase();
        Self::ALL.iter().copied().find(|code| code.abbr() == upper)
    }

    pub fn full_name(&self) -> &'static str {
        match self {
            TeamCode::Atl => "Atlanta Falcons",
            TeamCode::Buf => "Buffalo Bills",
            TeamCode::Chi => "Chicago Bears",
            TeamCode::Cin => "Cincinnati Bengals",
            TeamCode::Cle => "Cleveland Browns",
            TeamCode::Dal => "Dallas Cowboys",
            TeamCode::Den => "Denver Broncos",
            TeamCode::Det => "Detroit Lions",
            TeamCode::Gb => "Green Bay Packers",
            TeamCode::Ten => "Tennessee Titans",
            TeamCode::Ind => "Indianapolis Colts",
            TeamCode::Kc => "Kansas City Chiefs",
            TeamCode::Lv => "Las Vegas Raiders",
            TeamCode::Lar => "Los Angeles Rams",
            TeamCode::Mia => "Miami Dolphins",
            TeamCode::Min => "Minnesota Vikings",
            TeamCode::Ne => "New England Patriots",
            TeamCode::No => "New Orleans Saints",
            TeamCode::Nyg => "New York Giants",
            TeamCode::Nyj => "New York Jets",
            TeamCode::Phi => "Philadelphia Eagles",
            TeamCode::Ari => "Arizona Cardinals",
            TeamCode::Pit => "Pittsburgh Steelers",
            TeamCode::Lac => "Los Angeles Chargers",
            TeamCode::Sf => "San Francisco 49ers",
            TeamCode::Sea => "Seattle Seahawks",
            TeamCode::Tb => "Tampa Bay Buccaneers",
            TeamCode::Wsh => "Washington",
            TeamCode::Car => "Carolina Panthers",
            TeamCode::Jax => "Jacksonville Jaguars",
            TeamCode::Afc => "AFC",
            TeamCode::Nfc => "NFC",
            TeamCode::Bal => "Baltimore Ravens",
            TeamCode::Hou => "Houston Texans",
        }
    }

    /// Last word of the full name ("Bears"). Single-word names are returned as is.
    pub fn short_name(&self) -> &'static str {
        let full = self.full_name();
        full.rsplit_once(' ').map(|(_, last)| last).unwrap_or(full)
    }

    /// Conference entries used by the feed for all-star games.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, TeamCode::Afc | TeamCode::Nfc)
    }

    pub fn home_city(&self) -> City {
        match self {
            TeamCode::Atl => City::Atlanta,
            TeamCode::Buf => City::OrchardPark,
            TeamCode::Chi => City::Chicago,
            TeamCode::Cin => City::Cincinnati,
            TeamCode::Cle => City::Cleveland,
            TeamCode::Dal => City::Irving,
            TeamCode::Den => City::Denver,
            TeamCode::Det => City::Detroit,
            TeamCode::Gb => City::GreenBay,
            TeamCode::Ten => City::Nashville,
            TeamCode::Ind => City::Indianapolis,
            TeamCode::Kc => City::KansasCity,
            TeamCode::Lv => City::Oakland,
            TeamCode::Lar | TeamCode::Lac => City::LosAngeles,
            TeamCode::Mia => City::Miami,
            TeamCode::Min => City::Minneapolis,
            TeamCode::Ne => City::Foxborough,
            TeamCode::No => City::NewOrleans,
            TeamCode::Nyg | TeamCode::Nyj => City::EastRutherford,
            TeamCode::Phi => City::Philadelphia,
            TeamCode::Ari => City::Glendale,
            TeamCode::Pit => City::Pittsburgh,
            TeamCode::Sf => City::SanFrancisco,
            TeamCode::Sea => City::Seattle,
            TeamCode::Tb => City::Tampa,
            TeamCode::Wsh => City::Landover,
            TeamCode::Car => City::Charlotte,
            TeamCode::Jax => City::Jacksonville,
            TeamCode::Afc | TeamCode::Nfc => City::Orlando,
            TeamCode::Bal => City::Baltimore,
            TeamCode::Hou => City::Houston,
        }
    }

    pub fn home_stadium(&self) -> Stadium {
        match self {
            TeamCode::Atl => Stadium::MercedesBenzStadium,
            TeamCode::Buf => Stadium::NewEraField,
            TeamCode::Chi => Stadium::SoldierField,
            TeamCode::Cin => Stadium::PaulBrownStadium,
            TeamCode::Cle => Stadium::FirstEnergyStadium,
            TeamCode::Dal => Stadium::AttStadium,
            TeamCode::Den => Stadium::EmpowerField,
            TeamCode::Det => Stadium::FordField,
            TeamCode::Gb => Stadium::LambeauField,
            TeamCode::Ten => Stadium::NissanStadium,
            TeamCode::Ind => Stadium::LucasOilStadium,
            TeamCode::Kc => Stadium::ArrowheadStadium,
            TeamCode::Lv => Stadium::RingCentralColiseum,
            TeamCode::Lar => Stadium::LosAngelesMemorialColiseum,
            TeamCode::Lac => Stadium::DignityHealthSportsPark,
            TeamCode::Mia => Stadium::HardRockStadium,
            TeamCode::Min => Stadium::UsBankStadium,
            TeamCode::Ne => Stadium::GilletteStadium,
            TeamCode::No => Stadium::MercedesBenzSuperdome,
            TeamCode::Nyg | TeamCode::Nyj => Stadium::MetLifeStadium,
            TeamCode::Phi => Stadium::LincolnFinancialField,
            TeamCode::Ari => Stadium::StateFarmStadium,
            TeamCode::Pit => Stadium::HeinzField,
            TeamCode::Sf => Stadium::LevisStadium,
            TeamCode::Sea => Stadium::CenturyLinkField,
            TeamCode::Tb => Stadium::RaymondJamesStadium,
            TeamCode::Wsh => Stadium::FedExField,
            TeamCode::Car => Stadium::BankOfAmericaStadium,
            TeamCode::Jax => Stadium::TiaaBankField,
            TeamCode::Afc | TeamCode::Nfc => Stadium::CampingWorldStadium,
            TeamCode::Bal => Stadium::MtBankStadium,
            TeamCode::Hou => Stadium::NrgStadium,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum City {
    #[serde(rename = "ATL")] Atlanta,
    #[serde(rename = "BAL")] Baltimore,
    #[serde(rename = "CHA")] Charlotte,
    #[serde(rename = "CHI")] Chicago,
    #[serde(rename = "CIN")] Cincinnati,
    #[serde(rename = "CLE")] Cleveland,
    #[serde(rename = "DEN")] Denver,
    #[serde(rename = "DET")] Detroit,
    #[serde(rename = "ER")] EastRutherford,
    #[serde(rename = "FOX")] Foxborough,
    #[serde(rename = "GLE")] Glendale,
    #[serde(rename = "GB")] GreenBay,
    #[serde(rename = "HOU")] Houston,
    #[serde(rename = "IND")] Indianapolis,
    #[serde(rename = "IRV")] Irving,
    #[serde(rename = "JAX")] Jacksonville,
    #[serde(rename = "KC")] KansasCity,
    #[serde(rename = "LA")] LosAngeles,
    #[serde(rename = "LAN")] Landover,
    #[serde(rename = "MIA")] Miami,
    #[serde(rename = "MIN")] Minneapolis,
    #[serde(rename = "NAS")] Nashville,
    #[serde(rename = "NO")] NewOrleans,
    #[serde(rename = "OAK")] Oakland,
    #[serde(rename = "OP")] OrchardPark,
    #[serde(rename = "ORL")] Orlando,
    #[serde(rename = "PHI")] Philadelphia,
    #[serde(rename = "PIT")] Pittsburgh,
    #[serde(rename = "SF")] SanFrancisco,
    #[serde(rename = "SEA")] Seattle,
    #[serde(rename = "TAM")] Tampa,
}

impl City {
    pub fn as_str(&self) -> &'static str {
        match self {
            City::Atlanta => "Atlanta",
            City::Baltimore => "Baltimore",
            City::Charlotte => "Charlotte",
            City::Chicago => "Chicago",
            City::Cincinnati => "Cincinnati",
            City::Cleveland => "Cleveland",
            City::Denver => "Denver",
            City::Detroit => "Detroit",
            City::EastRutherford => "East Rutherford",
            City::Foxborough => "Foxborough",
            City::Glendale => "Glendale",
            City::GreenBay => "Green Bay",
            City::Houston => "Houston",
            City::Indianapolis => "Indianapolis",
            City::Irving => "Irving",
            City::Jacksonville => "Jacksonville",
            City::KansasCity => "Kansas City",
            City::LosAngeles => "Los Angeles",
            City::Landover => "Landover",
            City::Miami => "Miami",
            City::Minneapolis => "Minneapolis",
            City::Nashville => "Nashville",
            City::NewOrleans => "New Orleans",
            City::Oakland => "Oakland",
            City::OrchardPark => "Orchard Park",
            City::Orlando => "Orlando",
            City::Philadelphia => "Philadelphia",
            City::Pittsburgh => "Pittsburgh",
            City::SanFrancisco => "San Francisco",
            City::Seattle => "Seattle",
            City::Tampa => "Tampa",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Stadium {
    #[serde(rename = "AS")] ArrowheadStadium,
    #[serde(rename = "ATS")] AttStadium,
    #[serde(rename = "BAS")] BankOfAmericaStadium,
    #[serde(rename = "CLF")] CenturyLinkField,
    #[serde(rename = "CWS")] CampingWorldStadium,
    #[serde(rename = "DHSP")] DignityHealthSportsPark,
    #[serde(rename = "EF")] EmpowerField,
    #[serde(rename = "FEF")] FedExField,
    #[serde(rename = "FES")] FirstEnergyStadium,
    #[serde(rename = "FF")] FordField,
    #[serde(rename = "GS")] GilletteStadium,
    #[serde(rename = "HF")] HeinzField,
    #[serde(rename = "HRS")] HardRockStadium,
    #[serde(rename = "LAMC")] LosAngelesMemorialColiseum,
    #[serde(rename = "LF")] LambeauField,
    #[serde(rename = "LFF")] LincolnFinancialField,
    #[serde(rename = "LS")] LevisStadium,
    #[serde(rename = "LOS")] LucasOilStadium,
    #[serde(rename = "MBS")] MercedesBenzStadium,
    #[serde(rename = "MBD")] MercedesBenzSuperdome,
    #[serde(rename = "MLS")] MetLifeStadium,
    #[serde(rename = "MTBS")] MtBankStadium,
    #[serde(rename = "NEF")] NewEraField,
    #[serde(rename = "NRGS")] NrgStadium,
    #[serde(rename = "NS")] NissanStadium,
    #[serde(rename = "PBS")] PaulBrownStadium,
    #[serde(rename = "RCC")] RingCentralColiseum,
    #[serde(rename = "RJS")] RaymondJamesStadium,
    #[serde(rename = "SF")] SoldierField,
    #[serde(rename = "SFS")] StateFarmStadium,
    #[serde(rename = "TBF")] TiaaBankField,
    #[serde(rename = "USBS")] UsBankStadium,
}

impl Stadium {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stadium::ArrowheadStadium => "Arrowhead Stadium",
            Stadium::AttStadium => "AT&T Stadium",
            Stadium::BankOfAmericaStadium => "Bank of America Stadium",
            Stadium::CenturyLinkField => "CenturyLink Field",
            Stadium::CampingWorldStadium => "Camping World Stadium",
            Stadium::DignityHealthSportsPark => "Dignity Health Sports Park",
            Stadium::EmpowerField => "Empower Field at Mile High",
            Stadium::FedExField => "FedExField",
            Stadium::FirstEnergyStadium => "FirstEnergy Stadium",
            Stadium::FordField => "Ford Field",
            Stadium::GilletteStadium => "Gillette Stadium",
            Stadium::HeinzField => "Heinz Field",
            Stadium::HardRockStadium => "Hard Rock Stadium",
            Stadium::LosAngelesMemorialColiseum => "Los Angeles Memorial Coliseum",
            Stadium::LambeauField => "Lambeau Field",
            Stadium::LincolnFinancialField => "Lincoln Financial Field",
            Stadium::LevisStadium => "Levi's Stadium",
            Stadium::LucasOilStadium => "Lucas Oil Stadium",
            Stadium::MercedesBenzStadium => "Mercedes-Benz Stadium",
            Stadium::MercedesBenzSuperdome => "Mercedes-Benz Superdome",
            Stadium::MetLifeStadium => "MetLife Stadium",
            Stadium::MtBankStadium => "M&T Bank Stadium",
            Stadium::NewEraField => "New Era Field",
            Stadium::NrgStadium => "NRG Stadium",
            Stadium::NissanStadium => "Nissan Stadium",
            Stadium::PaulBrownStadium => "Paul Brown Stadium",
            Stadium::RingCentralColiseum => "RingCentral Coliseum",
            Stadium::RaymondJamesStadium => "Raymond James Stadium",
            Stadium::SoldierField => "Soldier Field",
            Stadium::StateFarmStadium => "State Farm Stadium",
            Stadium::TiaaBankField => "TIAA Bank Field",
            Stadium::UsBankStadium => "U.S. Bank Stadium",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Team {
    pub id: i64,
    pub code: TeamCode,
    pub city: City,
    pub stadium: Stadium,
}

impl Team {
    pub fn new(id: i64, code: TeamCode) -> Self {
        Self {
            id,
            code,
            city: code.home_city(),
            stadium: code.home_stadium(),
        }
    }

    /// Every franchise plus the two conference placeholders, ids starting at 1.
    pub fn catalog() -> Vec<Team> {
        TeamCode::ALL
            .iter()
            .enumerate()
            .map(|(i, code)| Team::new(i as i64 + 1, *code))
            .collect()
    }

    pub fn full_name(&self) -> &'static str {
        self.code.full_name()
    }

    pub fn short_name(&self) -> &'static str {
        self.code.short_name()
    }

    pub fn is_placeholder(&self) -> bool {
        self.code.is_placeholder()
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.full_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_and_short_name() {
        assert_eq!(TeamCode::Chi.full_name(), "Chicago Bears");
        assert_eq!(TeamCode::Chi.short_name(), "Bears");
        assert_eq!(TeamCode::Tb.short_name(), "Buccaneers");
        assert_eq!(TeamCode::Wsh.short_name(), "Washington");
    }

    #[test]
    fn test_abbr_parsing() {
        assert_eq!(TeamCode::from_abbr("chi"), Some(TeamCode::Chi));
        assert_eq!(TeamCode::from_abbr("GB"), Some(TeamCode::Gb));
        assert_eq!(TeamCode::from_abbr("XYZ"), None);
    }

    #[test]
    fn test_catalog_ids_follow_feed_order() {
        let catalog = Team::catalog();
        assert_eq!(catalog.len(), 34);
        assert_eq!(catalog[0].code, TeamCode::Atl);
        assert_eq!(catalog[2].id, 3);
        assert_eq!(catalog[2].to_string(), "Chicago Bears");
        assert_eq!(catalog.iter().filter(|t| t.is_placeholder()).count(), 2);
    }

    #[test]
    fn test_serde_uses_abbreviations() {
        let team = Team::new(3, TeamCode::Chi);
        let json = serde_json::to_value(&team).unwrap();
        assert_eq!(json["code"], "CHI");
        assert_eq!(json["stadium"], "SF");
        assert_eq!(team.stadium.as_str(), "Soldier Field");
        assert_eq!(team.city.as_str(), "Chicago");
    }
}
