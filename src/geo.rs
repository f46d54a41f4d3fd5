use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;

/// Area details resolved from an Indian postal pincode.
#[derive(Debug, Clone, PartialEq)]
pub struct PostalArea {
    pub locality: String,
    pub district: String,
    pub state: String,
    pub country: String,
}

#[async_trait]
pub trait PincodeLookup: Send + Sync {
    /// `Ok(None)` means the pincode is well-formed but unknown.
    async fn lookup(&self, pincode: &str) -> anyhow::Result<Option<PostalArea>>;
}

pub struct PostalPincodeClient {
    base_url: String,
    client: reqwest::Client,
}

impl PostalPincodeClient {
    pub fn new() -> Self {
        Self::with_base_url("https://api.postalpincode.in".to_string())
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }
}

impl Default for PostalPincodeClient {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
struct PincodeEnvelope {
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "PostOffice")]
    post_offices: Option<Vec<PostOffice>>,
}

#[derive(Deserialize)]
struct PostOffice {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "District")]
    district: String,
    #[serde(rename = "State")]
    state: String,
    #[serde(rename = "Country")]
    country: String,
}

#[async_trait]
impl PincodeLookup for PostalPincodeClient {
    async fn lookup(&self, pincode: &str) -> anyhow::Result<Option<PostalArea>> {
        let url = format!("{}/pincode/{}", self.base_url, pincode);

        let envelopes: Vec<PincodeEnvelope> = self
            .client
            .get(&url)
            .send()
            .await
            .context("failed to call postal pincode API")?
            .json()
            .await
            .context("failed to parse postal pincode response")?;

        let Some(envelope) = envelopes.into_iter().next() else {
            return Ok(None);
        };
        if envelope.status != "Success" {
            return Ok(None);
        }
        let Some(office) = envelope.post_offices.and_then(|mut v| {
            if v.is_empty() {
                None
            } else {
                Some(v.remove(0))
            }
        }) else {
            return Ok(None);
        };

        Ok(Some(PostalArea {
            locality: office.name,
            district: office.district,
            state: office.state,
            country: office.country,
        }))
    }
}

/// Address details resolved from device coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoAddress {
    pub display_name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub country: Option<String>,
}

#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn reverse(&self, lat: f64, lon: f64) -> anyhow::Result<Option<GeoAddress>>;
}

pub struct NominatimClient {
    base_url: String,
    client: reqwest::Client,
}

impl NominatimClient {
    pub fn new() -> Self {
        Self::with_base_url("https://nominatim.openstreetmap.org".to_string())
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }
}

impl Default for NominatimClient {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
struct NominatimResponse {
    display_name: Option<String>,
    address: Option<NominatimAddress>,
}

#[derive(Deserialize)]
struct NominatimAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    state: Option<String>,
    postcode: Option<String>,
    country: Option<String>,
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn reverse(&self, lat: f64, lon: f64) -> anyhow::Result<Option<GeoAddress>> {
        let url = format!("{}/reverse", self.base_url);

        let resp: NominatimResponse = self
            .client
            .get(&url)
            .query(&[
                ("format", "jsonv2".to_string()),
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
            ])
            // Nominatim's usage policy requires an identifying UA.
            .header("User-Agent", "pujaportal/0.1")
            .send()
            .await
            .context("failed to call reverse geocoding API")?
            .json()
            .await
            .context("failed to parse reverse geocoding response")?;

        let Some(display_name) = resp.display_name else {
            return Ok(None);
        };

        let address = resp.address;
        let city = address
            .as_ref()
            .and_then(|a| a.city.clone().or_else(|| a.town.clone()).or_else(|| a.village.clone()));

        Ok(Some(GeoAddress {
            display_name,
            city,
            state: address.as_ref().and_then(|a| a.state.clone()),
            pincode: address.as_ref().and_then(|a| a.postcode.clone()),
            country: address.and_then(|a| a.country),
        }))
    }
}
