//! FDSN web-service providers known by short-name.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A well-known FDSN data center that can be named in `Data_Access`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FdsnProvider {
    Bgr,
    Emsc,
    Eth,
    Geonet,
    Gfz,
    Icgc,
    Ingv,
    Ipgp,
    Iris,
    Isc,
    Knmi,
    Koeri,
    Lmu,
    Ncedc,
    Niep,
    Noa,
    Odc,
    Orfeus,
    RaspiShake,
    Resif,
    Scedc,
    Texnet,
    #[serde(rename = "UIB-NORSAR")]
    UibNorsar,
    Usgs,
    Usp,
}

impl FdsnProvider {
    pub const ALL: [FdsnProvider; 25] = [
        FdsnProvider::Bgr,
        FdsnProvider::Emsc,
        FdsnProvider::Eth,
        FdsnProvider::Geonet,
        FdsnProvider::Gfz,
        FdsnProvider::Icgc,
        FdsnProvider::Ingv,
        FdsnProvider::Ipgp,
        FdsnProvider::Iris,
        FdsnProvider::Isc,
        FdsnProvider::Knmi,
        FdsnProvider::Koeri,
        FdsnProvider::Lmu,
        FdsnProvider::Ncedc,
        FdsnProvider::Niep,
        FdsnProvider::Noa,
        FdsnProvider::Odc,
        FdsnProvider::Orfeus,
        FdsnProvider::RaspiShake,
        FdsnProvider::Resif,
        FdsnProvider::Scedc,
        FdsnProvider::Texnet,
        FdsnProvider::UibNorsar,
        FdsnProvider::Usgs,
        FdsnProvider::Usp,
    ];

    /// Short-name as written in a preference file (e.g. `IRIS`).
    pub fn short_name(&self) -> &'static str {
        match self {
            FdsnProvider::Bgr => "BGR",
            FdsnProvider::Emsc => "EMSC",
            FdsnProvider::Eth => "ETH",
            FdsnProvider::Geonet => "GEONET",
            FdsnProvider::Gfz => "GFZ",
            FdsnProvider::Icgc => "ICGC",
            FdsnProvider::Ingv => "INGV",
            FdsnProvider::Ipgp => "IPGP",
            FdsnProvider::Iris => "IRIS",
            FdsnProvider::Isc => "ISC",
            FdsnProvider::Knmi => "KNMI",
            FdsnProvider::Koeri => "KOERI",
            FdsnProvider::Lmu => "LMU",
            FdsnProvider::Ncedc => "NCEDC",
            FdsnProvider::Niep => "NIEP",
            FdsnProvider::Noa => "NOA",
            FdsnProvider::Odc => "ODC",
            FdsnProvider::Orfeus => "ORFEUS",
            FdsnProvider::RaspiShake => "RASPISHAKE",
            FdsnProvider::Resif => "RESIF",
            FdsnProvider::Scedc => "SCEDC",
            FdsnProvider::Texnet => "TEXNET",
            FdsnProvider::UibNorsar => "UIB-NORSAR",
            FdsnProvider::Usgs => "USGS",
            FdsnProvider::Usp => "USP",
        }
    }

    /// Base URL of the provider's FDSN web services.
    pub fn base_url(&self) -> &'static str {
        match self {
            FdsnProvider::Bgr => "http://eida.bgr.de",
            FdsnProvider::Emsc => "http://www.seismicportal.eu",
            FdsnProvider::Eth => "http://eida.ethz.ch",
            FdsnProvider::Geonet => "http://service.geonet.org.nz",
            FdsnProvider::Gfz => "http://geofon.gfz-potsdam.de",
            FdsnProvider::Icgc => "http://ws.icgc.cat",
            FdsnProvider::Ingv => "http://webservices.ingv.it",
            FdsnProvider::Ipgp => "http://ws.ipgp.fr",
            FdsnProvider::Iris => "http://service.iris.edu",
            FdsnProvider::Isc => "http://isc-mirror.iris.washington.edu",
            FdsnProvider::Knmi => "http://rdsa.knmi.nl",
            FdsnProvider::Koeri => "http://eida-service.koeri.boun.edu.tr",
            FdsnProvider::Lmu => "http://erde.geophysik.uni-muenchen.de",
            FdsnProvider::Ncedc => "http://service.ncedc.org",
            FdsnProvider::Niep => "http://eida-sc3.infp.ro",
            FdsnProvider::Noa => "http://eida.gein.noa.gr",
            FdsnProvider::Odc | FdsnProvider::Orfeus => "http://www.orfeus-eu.org",
            FdsnProvider::RaspiShake => "https://fdsnws.raspberryshakedata.com",
            FdsnProvider::Resif => "http://ws.resif.fr",
            FdsnProvider::Scedc => "http://service.scedc.caltech.edu",
            FdsnProvider::Texnet => "http://rtserve.beg.utexas.edu",
            FdsnProvider::UibNorsar => "http://eida.geo.uib.no",
            FdsnProvider::Usgs => "http://earthquake.usgs.gov",
            FdsnProvider::Usp => "http://sismo.iag.usp.br",
        }
    }

    /// Case-sensitive lookup by short-name.
    pub fn from_short_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.short_name() == name)
    }
}

impl fmt::Display for FdsnProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for FdsnProvider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_short_name(s).ok_or_else(|| Error::UnknownProvider(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_providers() {
        assert_eq!("IRIS".parse::<FdsnProvider>().unwrap(), FdsnProvider::Iris);
        assert_eq!(
            FdsnProvider::from_short_name("UIB-NORSAR"),
            Some(FdsnProvider::UibNorsar)
        );
        assert_eq!(FdsnProvider::Usgs.base_url(), "http://earthquake.usgs.gov");
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(FdsnProvider::from_short_name("iris"), None);
        assert!(matches!(
            "Iris".parse::<FdsnProvider>(),
            Err(Error::UnknownProvider(_))
        ));
    }

    #[test]
    fn test_short_names_are_unique() {
        let mut names: Vec<&str> = FdsnProvider::ALL.iter().map(|p| p.short_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), FdsnProvider::ALL.len());
    }

    #[test]
    fn test_serde_uses_short_name() {
        for provider in FdsnProvider::ALL {
            let json = serde_json::to_string(&provider).unwrap();
            assert_eq!(json, format!("\"{}\"", provider.short_name()));
        }
    }

    #[test]
    fn test_display_uses_short_name() {
        assert_eq!(FdsnProvider::Gfz.to_string(), "GFZ");
    }
}
