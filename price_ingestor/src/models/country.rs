//! Reference data for supported bidding zones.
//!
//! Each country is identified by an uppercase two-letter code and maps to an
//! ENTSO-E market domain (EIC code) and an IANA timezone. The table is
//! read-only after startup; absence of an entry for a requested country is an
//! input-validation failure, never a default.

use std::collections::HashMap;
use std::sync::LazyLock;

use chrono_tz::Tz;
use serde::Deserialize;

/// Static profile of one bidding zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryProfile {
    /// Uppercase two-letter country code, e.g. `NL`.
    pub code: &'static str,
    /// ENTSO-E market domain identifier (EIC code).
    pub domain: &'static str,
    /// Civil timezone used for local-time normalization.
    pub timezone: Tz,
}

impl CountryProfile {
    /// Looks up a profile by country code (case-insensitive).
    pub fn lookup(code: &str) -> Option<&'static CountryProfile> {
        PROFILES.get(code.trim().to_uppercase().as_str()).copied()
    }

    /// All supported country codes, sorted.
    pub fn supported_codes() -> Vec<&'static str> {
        let mut codes: Vec<&'static str> = PROFILES.keys().copied().collect();
        codes.sort_unstable();
        codes
    }
}

macro_rules! profiles {
    ($(($code:literal, $domain:literal, $tz:expr)),+ $(,)?) => {
        [$(CountryProfile { code: $code, domain: $domain, timezone: $tz }),+]
    };
}

static PROFILE_TABLE: [CountryProfile; 33] = {
    use chrono_tz::Europe::*;
    profiles![
        ("AL", "10YAL-KESH-----5", Tirane),
        ("AT", "10YAT-APG------L", Vienna),
        ("BA", "10YBA-JPCC-----D", Sarajevo),
        ("BE", "10YBE----------2", Brussels),
        ("BG", "10YCA-BULGARIA-R", Sofia),
        ("CH", "10YCH-SWISSGRIDZ", Zurich),
        ("CZ", "10YCZ-CEPS-----N", Prague),
        ("DE", "10Y1001A1001A83F", Berlin),
        ("DK", "10Y1001A1001A65H", Copenhagen),
        ("EE", "10Y1001A1001A39I", Tallinn),
        ("ES", "10YES-REE------0", Madrid),
        ("FI", "10YFI-1--------U", Helsinki),
        ("FR", "10YFR-RTE------C", Paris),
        ("GB", "10YGB----------A", London),
        ("GR", "10YGR-HTSO-----Y", Athens),
        ("HR", "10YHR-HEP------M", Zagreb),
        ("HU", "10YHU-MAVIR----U", Budapest),
        ("IE", "10YIE-1001A00010", Dublin),
        ("IT", "10YIT-GRTN-----B", Rome),
        ("LT", "10YLT-1001A0008Q", Vilnius),
        ("LU", "10YLU-CEGEDEL-NQ", Luxembourg),
        ("LV", "10YLV-1001A00074", Riga),
        ("ME", "10YCS-CG-TSO---S", Podgorica),
        ("MK", "10YMK-MEPSO----8", Skopje),
        ("NL", "10YNL----------L", Amsterdam),
        ("NO", "10YNO-0--------C", Oslo),
        ("PL", "10YPL-AREA-----S", Warsaw),
        ("PT", "10YPT-REN------W", Lisbon),
        ("RO", "10YRO-TEL------P", Bucharest),
        ("RS", "10YCS-SERBIATSOV", Belgrade),
        ("SE", "10YSE-1--------K", Stockholm),
        ("SI", "10YSI-ELES-----O", Ljubljana),
        ("SK", "10YSK-SEPS-----K", Bratislava),
    ]
};

static PROFILES: LazyLock<HashMap<&'static str, &'static CountryProfile>> =
    LazyLock::new(|| PROFILE_TABLE.iter().map(|p| (p.code, p)).collect());

/// Per-country tax parameters for the all-in consumer price.
///
/// All-in price = (wholesale_kwh + energy_tax + renewable_energy_tax) * (1 + vat_rate).
/// Additive components are EUR/kWh; `vat_rate` is a fraction (0.21 = 21 %).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TaxConfig {
    /// Energy tax, EUR per kWh.
    pub energy_tax: f64,
    /// Renewable energy surcharge, EUR per kWh.
    pub renewable_energy_tax: f64,
    /// VAT as a fraction of the pre-VAT price.
    pub vat_rate: f64,
}

/// Lookup table of tax parameters keyed by country code.
///
/// Countries absent from the table simply get no all-in price; this is a
/// logged warning, not an error (other countries in a run are unaffected).
#[derive(Debug, Clone, Default)]
pub struct TaxTable {
    entries: HashMap<String, TaxConfig>,
}

impl TaxTable {
    /// The built-in defaults. Values are household rates current at the time
    /// of writing; override with a TOML file for anything load-bearing.
    pub fn builtin() -> Self {
        let mut entries = HashMap::new();
        entries.insert(
            "NL".to_string(),
            TaxConfig { energy_tax: 0.10880, renewable_energy_tax: 0.0, vat_rate: 0.21 },
        );
        entries.insert(
            "DE".to_string(),
            TaxConfig { energy_tax: 0.02050, renewable_energy_tax: 0.0, vat_rate: 0.19 },
        );
        entries.insert(
            "BE".to_string(),
            TaxConfig { energy_tax: 0.05032, renewable_energy_tax: 0.0, vat_rate: 0.06 },
        );
        entries.insert(
            "FR".to_string(),
            TaxConfig { energy_tax: 0.03370, renewable_energy_tax: 0.0, vat_rate: 0.20 },
        );
        entries.insert(
            "AT".to_string(),
            TaxConfig { energy_tax: 0.01500, renewable_energy_tax: 0.00796, vat_rate: 0.20 },
        );
        Self { entries }
    }

    /// Builds a table from deserialized entries (e.g. a TOML override file).
    pub fn from_entries(entries: HashMap<String, TaxConfig>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(code, cfg)| (code.trim().to_uppercase(), cfg))
            .collect();
        Self { entries }
    }

    /// Tax parameters for `country`, if configured.
    pub fn get(&self, country: &str) -> Option<&TaxConfig> {
        self.entries.get(country)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let nl = CountryProfile::lookup("nl").expect("NL profile");
        assert_eq!(nl.domain, "10YNL----------L");
        assert_eq!(nl.timezone, chrono_tz::Europe::Amsterdam);
    }

    #[test]
    fn unknown_code_is_none() {
        assert!(CountryProfile::lookup("XX").is_none());
    }

    #[test]
    fn table_covers_all_supported_zones() {
        assert_eq!(CountryProfile::supported_codes().len(), 33);
    }

    #[test]
    fn builtin_taxes_cover_nl_but_not_pl() {
        let taxes = TaxTable::builtin();
        assert!(taxes.get("NL").is_some());
        assert!(taxes.get("PL").is_none());
    }

    #[test]
    fn from_entries_normalizes_codes() {
        let mut raw = HashMap::new();
        raw.insert(
            "nl ".to_string(),
            TaxConfig { energy_tax: 0.01, renewable_energy_tax: 0.005, vat_rate: 0.21 },
        );
        let table = TaxTable::from_entries(raw);
        assert!(table.get("NL").is_some());
    }
}
