//! Best-effort location lookup for the New Year greeting.
//!
//! Fetches an IP-based location first and, when the user has opted in with
//! explicit coordinates, refines it with a city-level reverse lookup. Every
//! failure along the way resolves to a fixed fallback line; nothing here can
//! disturb the animation.

use std::sync::{Arc, RwLock};
use std::thread;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Utc};
use serde::Deserialize;

/// Timeout for HTTP requests.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const IP_LOOKUP_URL: &str = "https://ipapi.co/json/";

const REVERSE_LOOKUP_URL: &str = "https://nominatim.openstreetmap.org/reverse?format=json";

/// Greeting shown while the lookup is in flight or after it failed.
fn fallback_greeting(year: u32) -> String {
    format!("🎉 Happy New Year {year} to our friends around the world 🌍")
}

/// IP geolocation response (partial - only fields we need).
#[derive(Debug, Default, Deserialize)]
struct IpLocation {
    #[serde(default)]
    city: String,
    #[serde(default)]
    region: String,
    #[serde(default)]
    country_name: String,
    #[serde(default)]
    country_code: String,
    /// Offset like "+0900"; used instead of the IANA zone name, which would
    /// need a tz database this stack does not carry.
    #[serde(default)]
    utc_offset: String,
}

/// Reverse geocoding response (partial - only fields we need).
#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    address: Address,
}

#[derive(Debug, Default, Deserialize)]
struct Address {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
}

impl Address {
    /// Most specific settlement name present.
    fn place(&self) -> Option<&str> {
        self.city
            .as_deref()
            .or(self.town.as_deref())
            .or(self.village.as_deref())
    }
}

/// Greeting monitor that resolves the location in a background thread.
///
/// The message starts as the fallback and is replaced at most twice: once
/// from the IP lookup and once more if the precise lookup succeeds.
#[derive(Debug)]
pub struct GreetingMonitor {
    /// Current greeting text.
    message: Arc<RwLock<String>>,
    /// Year embedded in every variant of the message.
    year: u32,
    /// Opted-in coordinates for the precise lookup.
    coordinates: Option<(f64, f64)>,
}

impl GreetingMonitor {
    /// Create a new greeting monitor.
    pub fn new(year: u32, coordinates: Option<(f64, f64)>) -> Self {
        Self {
            message: Arc::new(RwLock::new(fallback_greeting(year))),
            year,
            coordinates,
        }
    }

    /// Spawn the one-shot lookup thread.
    pub fn start(&self) {
        let message = self.message.clone();
        let year = self.year;
        let coordinates = self.coordinates;

        thread::spawn(move || {
            let agent = ureq::Agent::config_builder()
                .timeout_global(Some(REQUEST_TIMEOUT))
                .build()
                .new_agent();

            let greeting = resolve_ip_greeting(fetch_ip_location(&agent), year, Utc::now());
            if let Ok(mut current) = message.write() {
                *current = greeting;
            }

            // Precise pass only with explicit opt-in; on failure the IP
            // greeting stays.
            if let Some((latitude, longitude)) = coordinates
                && let Ok(city) = fetch_reverse_city(&agent, latitude, longitude)
                && let Ok(mut current) = message.write()
            {
                *current = format_precise_greeting(&city, year);
            }
        });
    }

    /// The current greeting text.
    /// Non-blocking, so a lookup mid-write can never stall the frame loop.
    pub fn message(&self) -> String {
        if let Ok(message) = self.message.try_read() {
            return message.clone();
        }
        fallback_greeting(self.year)
    }
}

/// Map the lookup outcome to the displayed greeting; any failure becomes
/// the fallback.
fn resolve_ip_greeting(
    result: Result<IpLocation, String>,
    year: u32,
    now: DateTime<Utc>,
) -> String {
    match result {
        Ok(location) => format_ip_greeting(&location, year, now),
        Err(_) => fallback_greeting(year),
    }
}

/// Fetch the caller's approximate location from the IP geolocation service.
fn fetch_ip_location(agent: &ureq::Agent) -> Result<IpLocation, String> {
    agent
        .get(IP_LOOKUP_URL)
        .call()
        .map_err(|e| format!("HTTP error: {e}"))?
        .body_mut()
        .read_json()
        .map_err(|e| format!("JSON parse error: {e}"))
}

/// Reverse-geocode explicit coordinates to a settlement name.
fn fetch_reverse_city(
    agent: &ureq::Agent,
    latitude: f64,
    longitude: f64,
) -> Result<String, String> {
    let url = format!("{REVERSE_LOOKUP_URL}&lat={latitude}&lon={longitude}");

    let response: ReverseResponse = agent
        .get(&url)
        // Nominatim rejects requests without an identifying agent.
        .header("User-Agent", "bulkkot/0.1 (+https://github.com/am2rican5/bulkkot)")
        .call()
        .map_err(|e| format!("HTTP error: {e}"))?
        .body_mut()
        .read_json()
        .map_err(|e| format!("JSON parse error: {e}"))?;

    Ok(response.address.place().unwrap_or("your area").to_string())
}

/// Format the optimistic, IP-based greeting.
///
/// Empty place fields are skipped; with no place at all the fallback is
/// used. The local time line appears only when the offset parses.
fn format_ip_greeting(location: &IpLocation, year: u32, now: DateTime<Utc>) -> String {
    let place: Vec<&str> = [
        location.city.as_str(),
        location.region.as_str(),
        location.country_name.as_str(),
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .collect();

    if place.is_empty() {
        return fallback_greeting(year);
    }

    let mut greeting = format!(
        "🎉 Happy New Year {year} to our friends in {}",
        place.join(", ")
    );

    let flag = flag_emoji(&location.country_code);
    if !flag.is_empty() {
        greeting.push(' ');
        greeting.push_str(&flag);
    }

    if let Some(offset) = parse_utc_offset(&location.utc_offset) {
        let time = now.with_timezone(&offset).format("%I:%M %p");
        greeting.push_str(&format!("\n🕛 Local Time: {time}"));
    }

    greeting
}

/// Format the precise, city-level greeting.
fn format_precise_greeting(city: &str, year: u32) -> String {
    format!("🎉 Happy New Year {year} to our friends in {city} 🌟\nThank you for celebrating with us!")
}

/// Two-letter country code to its regional-indicator flag emoji.
fn flag_emoji(country_code: &str) -> String {
    let code = country_code.trim().to_uppercase();
    if code.len() != 2 || !code.bytes().all(|b| b.is_ascii_uppercase()) {
        return String::new();
    }

    code.bytes()
        .filter_map(|b| char::from_u32(0x1F1E6 + u32::from(b - b'A')))
        .collect()
}

/// Parse an offset like "+0900" or "-04:30" into a chrono offset.
fn parse_utc_offset(offset: &str) -> Option<FixedOffset> {
    let offset = offset.trim();
    let (sign, rest) = match offset.strip_prefix('+') {
        Some(rest) => (1, rest),
        None => (-1, offset.strip_prefix('-')?),
    };

    let digits = rest.replace(':', "");
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let hours: i32 = digits[0..2].parse().ok()?;
    let minutes: i32 = digits[2..4].parse().ok()?;
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_location() -> IpLocation {
        IpLocation {
            city: "Seoul".to_string(),
            region: "Seoul".to_string(),
            country_name: "South Korea".to_string(),
            country_code: "KR".to_string(),
            utc_offset: "+0900".to_string(),
        }
    }

    #[test]
    fn test_flag_emoji() {
        assert_eq!(flag_emoji("US"), "🇺🇸");
        assert_eq!(flag_emoji("kr"), "🇰🇷");
        assert_eq!(flag_emoji(""), "");
        assert_eq!(flag_emoji("USA"), "");
        assert_eq!(flag_emoji("1A"), "");
    }

    #[test]
    fn test_parse_utc_offset() {
        assert_eq!(parse_utc_offset("+0900"), FixedOffset::east_opt(9 * 3600));
        assert_eq!(
            parse_utc_offset("-0430"),
            FixedOffset::east_opt(-(4 * 3600 + 30 * 60))
        );
        assert_eq!(parse_utc_offset("+05:30"), FixedOffset::east_opt(5 * 3600 + 30 * 60));
        assert_eq!(parse_utc_offset("0900"), None);
        assert_eq!(parse_utc_offset("+9"), None);
        assert_eq!(parse_utc_offset(""), None);
    }

    #[test]
    fn test_ip_greeting_embeds_place_flag_and_local_time() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 3, 0, 0).unwrap();
        let greeting = format_ip_greeting(&sample_location(), 2026, now);

        assert!(greeting.contains("Happy New Year 2026"));
        assert!(greeting.contains("Seoul, Seoul, South Korea"));
        assert!(greeting.contains("🇰🇷"));
        assert!(greeting.contains("Local Time: 12:00 PM"));
    }

    #[test]
    fn test_ip_greeting_skips_empty_place_fields() {
        let location = IpLocation {
            city: String::new(),
            region: String::new(),
            country_name: "France".to_string(),
            country_code: "FR".to_string(),
            utc_offset: "nonsense".to_string(),
        };
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 3, 0, 0).unwrap();
        let greeting = format_ip_greeting(&location, 2026, now);

        assert!(greeting.contains("in France"));
        assert!(!greeting.contains(", ,"));
        assert!(!greeting.contains("Local Time"));
    }

    #[test]
    fn test_empty_location_resolves_to_fallback() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 3, 0, 0).unwrap();
        let greeting = format_ip_greeting(&IpLocation::default(), 2026, now);
        assert_eq!(greeting, fallback_greeting(2026));
    }

    #[test]
    fn test_failed_lookup_resolves_to_fallback() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 3, 0, 0).unwrap();
        let greeting = resolve_ip_greeting(Err("HTTP error: timed out".to_string()), 2026, now);
        assert_eq!(
            greeting,
            "🎉 Happy New Year 2026 to our friends around the world 🌍"
        );
    }

    #[test]
    fn test_ip_response_parses() {
        let payload = r#"{
            "ip": "203.0.113.7",
            "city": "Busan",
            "region": "Busan",
            "country_name": "South Korea",
            "country_code": "KR",
            "timezone": "Asia/Seoul",
            "utc_offset": "+0900",
            "org": "EXAMPLE-NET"
        }"#;

        let location: IpLocation = serde_json::from_str(payload).unwrap();
        assert_eq!(location.city, "Busan");
        assert_eq!(location.country_code, "KR");
        assert_eq!(location.utc_offset, "+0900");
    }

    #[test]
    fn test_reverse_response_prefers_city_over_town_and_village() {
        let payload = r#"{"address": {"city": "Daegu", "town": "T", "village": "V"}}"#;
        let response: ReverseResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(response.address.place(), Some("Daegu"));

        let payload = r#"{"address": {"village": "Hahoe"}}"#;
        let response: ReverseResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(response.address.place(), Some("Hahoe"));

        let payload = r#"{"address": {}}"#;
        let response: ReverseResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(response.address.place(), None);
    }

    #[test]
    fn test_precise_greeting() {
        let greeting = format_precise_greeting("Daegu", 2026);
        assert!(greeting.contains("in Daegu 🌟"));
        assert!(greeting.contains("Thank you for celebrating with us!"));
    }

    #[test]
    fn test_monitor_starts_on_the_fallback() {
        let monitor = GreetingMonitor::new(2026, None);
        assert_eq!(monitor.message(), fallback_greeting(2026));
    }
}
