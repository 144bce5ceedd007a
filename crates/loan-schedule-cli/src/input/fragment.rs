use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;

/// base64url without padding on output; padded input is still accepted.
const FRAGMENT_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// A schedule link: the encoded fragment plus any display hints carried in
/// the query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub fragment: String,
    pub currency: Option<String>,
}

/// Accept a bare fragment, `#fragment`, or a full URL such as
/// `https://host/view.html?currency=EUR#AAGGoAH0...`.
pub fn parse_link(raw: &str) -> Link {
    let raw = raw.trim();
    let (before, fragment) = match raw.split_once('#') {
        Some((before, fragment)) => (before, fragment),
        None => ("", raw),
    };

    let currency = before.split_once('?').and_then(|(_, query)| {
        query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "currency")
            .map(|(_, value)| value.to_uppercase())
            .filter(|value| !value.is_empty())
    });

    Link {
        fragment: fragment.to_string(),
        currency,
    }
}

pub fn decode_fragment(fragment: &str) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    FRAGMENT_ENGINE
        .decode(fragment)
        .map_err(|e| format!("Invalid base64url fragment: {e}").into())
}

pub fn encode_fragment(bytes: &[u8]) -> String {
    FRAGMENT_ENGINE.encode(bytes)
}

/// Append `#fragment` to a base URL, replacing any fragment it already has.
pub fn build_url(base: &str, fragment: &str) -> String {
    let base = base.split_once('#').map_or(base, |(b, _)| b);
    format!("{base}#{fragment}")
}
