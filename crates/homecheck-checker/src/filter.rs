//! The fixed property search filter.

use url::Url;

/// Path of the count endpoint, relative to the listing site root.
const COUNT_PATH: &str = "properties-count/";

/// Search filter sent with every availability query.
///
/// Only [`SearchFilter::london`] is used in production; the filter is
/// not read from configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchFilter {
    pub location: &'static str,
    pub lat: f64,
    pub lon: f64,
    pub radius: u32,
    pub scheme_type: u32,
    pub rent_or_buy: u32,
}

impl SearchFilter {
    /// 50 unit radius around central London, shared ownership, buying.
    pub const fn london() -> Self {
        Self {
            location: "London",
            lat: 51.5074,
            lon: -0.1278,
            radius: 50,
            scheme_type: 14,
            rent_or_buy: 2,
        }
    }

    /// Query pairs in the order the site's search form submits them.
    /// Fields this checker does not filter on are sent empty.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let empty = String::new;
        vec![
            ("location", self.location.to_string()),
            ("lat", self.lat.to_string()),
            ("lon", self.lon.to_string()),
            ("developmentId", empty()),
            ("hasPolygon", "1".to_string()),
            ("userSearchId", empty()),
            ("hereLocation", empty()),
            ("radius", self.radius.to_string()),
            ("minBedrooms", empty()),
            ("maxBedrooms", empty()),
            ("schemeType[]", self.scheme_type.to_string()),
            ("minMonthlyCost", empty()),
            ("maxMonthlyCost", empty()),
            ("minDeposit", empty()),
            ("maxDeposit", empty()),
            ("rentOrBuy", self.rent_or_buy.to_string()),
            ("createdAtPeriod", empty()),
            ("minMinShareAvailable", empty()),
            ("maxMinShareAvailable", empty()),
            ("minFullMarketPrice", empty()),
            ("maxFullMarketPrice", empty()),
            ("viewType", "1".to_string()),
            ("campaignId", empty()),
            ("developerId", empty()),
            ("showAllPopular", "showAllPopular".to_string()),
            ("propertyTypeGroup", "undefined".to_string()),
            ("showAllOther", "1".to_string()),
            ("action", format!("/{}", COUNT_PATH)),
        ]
    }

    /// Full count-endpoint URL under `base`.
    pub fn query_url(&self, base: &str) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&format!("{}/{}", base.trim_end_matches('/'), COUNT_PATH))?;
        url.query_pairs_mut().extend_pairs(self.query_pairs());
        Ok(url)
    }
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self::london()
    }
}
