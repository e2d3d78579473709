//! Built-in city index: the fallback source when the network is slow, down,
//! or returns nothing useful.

use super::scorer::RelevanceScorer;
use super::types::Candidate;

// ─── Built-in dataset ───────────────────────────────────────────

struct BuiltinCity {
    name: &'static str,
    country: &'static str,
    display: &'static str,
}

const fn city(name: &'static str, country: &'static str, display: &'static str) -> BuiltinCity {
    BuiltinCity { name, country, display }
}

const BUILTIN_CITIES: &[BuiltinCity] = &[
    city("New York", "US", "New York, United States"),
    city("Los Angeles", "US", "Los Angeles, United States"),
    city("Chicago", "US", "Chicago, United States"),
    city("Houston", "US", "Houston, United States"),
    city("Phoenix", "US", "Phoenix, United States"),
    city("Philadelphia", "US", "Philadelphia, United States"),
    city("San Antonio", "US", "San Antonio, United States"),
    city("San Diego", "US", "San Diego, United States"),
    city("Dallas", "US", "Dallas, United States"),
    city("Austin", "US", "Austin, United States"),
    city("Jacksonville", "US", "Jacksonville, United States"),
    city("Fort Worth", "US", "Fort Worth, United States"),
    city("Columbus", "US", "Columbus, United States"),
    city("Indianapolis", "US", "Indianapolis, United States"),
    city("Charlotte", "US", "Charlotte, United States"),
    city("San Francisco", "US", "San Francisco, United States"),
    city("Seattle", "US", "Seattle, United States"),
    city("Denver", "US", "Denver, United States"),
    city("Washington", "US", "Washington, United States"),
    city("Boston", "US", "Boston, United States"),
    city("Nashville", "US", "Nashville, United States"),
    city("Baltimore", "US", "Baltimore, United States"),
    city("Louisville", "US", "Louisville, United States"),
    city("Portland", "US", "Portland, United States"),
    city("Oklahoma City", "US", "Oklahoma City, United States"),
    city("Milwaukee", "US", "Milwaukee, United States"),
    city("Las Vegas", "US", "Las Vegas, United States"),
    city("Albuquerque", "US", "Albuquerque, United States"),
    city("Tucson", "US", "Tucson, United States"),
    city("Fresno", "US", "Fresno, United States"),
    city("Sacramento", "US", "Sacramento, United States"),
    city("Mesa", "US", "Mesa, United States"),
    city("Kansas City", "US", "Kansas City, United States"),
    city("Atlanta", "US", "Atlanta, United States"),
    city("Colorado Springs", "US", "Colorado Springs, United States"),
    city("Raleigh", "US", "Raleigh, United States"),
    city("Omaha", "US", "Omaha, United States"),
    city("Miami", "US", "Miami, United States"),
    city("Minneapolis", "US", "Minneapolis, United States"),
    city("Tampa", "US", "Tampa, United States"),
    city("New Orleans", "US", "New Orleans, United States"),
    city("Cleveland", "US", "Cleveland, United States"),
    city("Honolulu", "US", "Honolulu, United States"),
    city("Cincinnati", "US", "Cincinnati, United States"),
    city("Pittsburgh", "US", "Pittsburgh, United States"),
    city("Orlando", "US", "Orlando, United States"),
    city("Buffalo", "US", "Buffalo, United States"),
    city("Anchorage", "US", "Anchorage, United States"),
    city("Salt Lake City", "US", "Salt Lake City, United States"),
    city("Detroit", "US", "Detroit, United States"),
    // Canada
    city("Toronto", "CA", "Toronto, Canada"),
    city("Vancouver", "CA", "Vancouver, Canada"),
    city("Montreal", "CA", "Montreal, Canada"),
    city("Calgary", "CA", "Calgary, Canada"),
    city("Ottawa", "CA", "Ottawa, Canada"),
    // Latin America
    city("Mexico City", "MX", "Mexico City, Mexico"),
    city("Guadalajara", "MX", "Guadalajara, Mexico"),
    city("São Paulo", "BR", "São Paulo, Brazil"),
    city("Rio de Janeiro", "BR", "Rio de Janeiro, Brazil"),
    city("Buenos Aires", "AR", "Buenos Aires, Argentina"),
    city("Lima", "PE", "Lima, Peru"),
    city("Bogotá", "CO", "Bogotá, Colombia"),
    city("Santiago", "CL", "Santiago, Chile"),
    city("Caracas", "VE", "Caracas, Venezuela"),
    // Europe
    city("London", "GB", "London, United Kingdom"),
    city("Manchester", "GB", "Manchester, United Kingdom"),
    city("Edinburgh", "GB", "Edinburgh, United Kingdom"),
    city("Dublin", "IE", "Dublin, Ireland"),
    city("Paris", "FR", "Paris, France"),
    city("Lyon", "FR", "Lyon, France"),
    city("Marseille", "FR", "Marseille, France"),
    city("Berlin", "DE", "Berlin, Germany"),
    city("Munich", "DE", "Munich, Germany"),
    city("Hamburg", "DE", "Hamburg, Germany"),
    city("Frankfurt", "DE", "Frankfurt, Germany"),
    city("Madrid", "ES", "Madrid, Spain"),
    city("Barcelona", "ES", "Barcelona, Spain"),
    city("Lisbon", "PT", "Lisbon, Portugal"),
    city("Rome", "IT", "Rome, Italy"),
    city("Milan", "IT", "Milan, Italy"),
    city("Naples", "IT", "Naples, Italy"),
    city("Amsterdam", "NL", "Amsterdam, Netherlands"),
    city("Brussels", "BE", "Brussels, Belgium"),
    city("Zurich", "CH", "Zurich, Switzerland"),
    city("Geneva", "CH", "Geneva, Switzerland"),
    city("Vienna", "AT", "Vienna, Austria"),
    city("Prague", "CZ", "Prague, Czech Republic"),
    city("Warsaw", "PL", "Warsaw, Poland"),
    city("Budapest", "HU", "Budapest, Hungary"),
    city("Bucharest", "RO", "Bucharest, Romania"),
    city("Athens", "GR", "Athens, Greece"),
    city("Stockholm", "SE", "Stockholm, Sweden"),
    city("Copenhagen", "DK", "Copenhagen, Denmark"),
    city("Oslo", "NO", "Oslo, Norway"),
    city("Helsinki", "FI", "Helsinki, Finland"),
    city("Reykjavik", "IS", "Reykjavik, Iceland"),
    city("Kyiv", "UA", "Kyiv, Ukraine"),
    city("Moscow", "RU", "Moscow, Russia"),
    city("Istanbul", "TR", "Istanbul, Turkey"),
    // Middle East & Africa
    city("Cairo", "EG", "Cairo, Egypt"),
    city("Lagos", "NG", "Lagos, Nigeria"),
    city("Nairobi", "KE", "Nairobi, Kenya"),
    city("Addis Ababa", "ET", "Addis Ababa, Ethiopia"),
    city("Johannesburg", "ZA", "Johannesburg, South Africa"),
    city("Cape Town", "ZA", "Cape Town, South Africa"),
    city("Casablanca", "MA", "Casablanca, Morocco"),
    city("Tel Aviv", "IL", "Tel Aviv, Israel"),
    city("Dubai", "AE", "Dubai, United Arab Emirates"),
    city("Doha", "QA", "Doha, Qatar"),
    city("Riyadh", "SA", "Riyadh, Saudi Arabia"),
    city("Tehran", "IR", "Tehran, Iran"),
    // Asia & Oceania
    city("Karachi", "PK", "Karachi, Pakistan"),
    city("Mumbai", "IN", "Mumbai, India"),
    city("Delhi", "IN", "Delhi, India"),
    city("Bangalore", "IN", "Bangalore, India"),
    city("Kolkata", "IN", "Kolkata, India"),
    city("Dhaka", "BD", "Dhaka, Bangladesh"),
    city("Bangkok", "TH", "Bangkok, Thailand"),
    city("Hanoi", "VN", "Hanoi, Vietnam"),
    city("Ho Chi Minh City", "VN", "Ho Chi Minh City, Vietnam"),
    city("Singapore", "SG", "Singapore, Singapore"),
    city("Kuala Lumpur", "MY", "Kuala Lumpur, Malaysia"),
    city("Jakarta", "ID", "Jakarta, Indonesia"),
    city("Manila", "PH", "Manila, Philippines"),
    city("Hong Kong", "HK", "Hong Kong, Hong Kong"),
    city("Taipei", "TW", "Taipei, Taiwan"),
    city("Shanghai", "CN", "Shanghai, China"),
    city("Beijing", "CN", "Beijing, China"),
    city("Seoul", "KR", "Seoul, South Korea"),
    city("Tokyo", "JP", "Tokyo, Japan"),
    city("Osaka", "JP", "Osaka, Japan"),
    city("Sydney", "AU", "Sydney, Australia"),
    city("Melbourne", "AU", "Melbourne, Australia"),
    city("Brisbane", "AU", "Brisbane, Australia"),
    city("Perth", "AU", "Perth, Australia"),
    city("Auckland", "NZ", "Auckland, New Zealand"),
];

impl BuiltinCity {
    fn to_candidate(&self) -> Candidate {
        Candidate::new(self.name, self.country, self.display)
    }
}

/// Fixed list of well-known cities, searchable with the relevance scorer.
#[derive(Debug, Clone, Default)]
pub struct StaticCityIndex {
    scorer: RelevanceScorer,
}

impl StaticCityIndex {
    pub fn new(scorer: RelevanceScorer) -> Self {
        Self { scorer }
    }

    /// Every built-in city, in table order.
    pub fn cities(&self) -> Vec<Candidate> {
        BUILTIN_CITIES.iter().map(BuiltinCity::to_candidate).collect()
    }

    pub fn len(&self) -> usize {
        BUILTIN_CITIES.len()
    }

    pub fn is_empty(&self) -> bool {
        BUILTIN_CITIES.is_empty()
    }

    /// Best built-in matches for `query`, strongest first.
    pub fn search(&self, query: &str) -> Vec<Candidate> {
        let policy = self.scorer.policy();
        let mut scored: Vec<(f64, &BuiltinCity)> = BUILTIN_CITIES
            .iter()
            .map(|c| (self.scorer.score(c.name, query), c))
            .filter(|(score, _)| *score > policy.accept_threshold)
            .collect();

        // stable: equal scores keep table order
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(policy.max_results);

        scored.into_iter().map(|(_, c)| c.to_candidate()).collect()
    }
}
