//! Static California city table and great-circle distances in miles.
//!
//! Free-text city names are matched case-insensitively after trimming. Names
//! that are not in the table resolve to `None`, which callers treat as
//! "unknown distance" rather than near or far.

use geo::Point;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Earth's radius in miles
pub const EARTH_RADIUS_MILES: f64 = 3958.7613;

/// Known cities as (lowercase name, latitude, longitude)
const CITIES: &[(&str, f64, f64)] = &[
    ("los angeles", 34.052235, -118.243683),
    ("san diego", 32.715736, -117.161087),
    ("san jose", 37.338207, -121.886330),
    ("san francisco", 37.774929, -122.419418),
    ("fresno", 36.737797, -119.787125),
    ("sacramento", 38.581573, -121.494400),
    ("long beach", 33.770050, -118.193741),
    ("oakland", 37.804363, -122.271111),
    ("bakersfield", 35.373291, -119.018715),
    ("anaheim", 33.836594, -117.914299),
    ("riverside", 33.980601, -117.375494),
    ("stockton", 37.957702, -121.290779),
    ("irvine", 33.684567, -117.826508),
    ("chula vista", 32.640053, -117.084198),
    ("fremont", 37.548271, -121.988571),
    ("san bernardino", 34.108345, -117.289765),
    ("modesto", 37.639097, -120.996878),
    ("oxnard", 34.197605, -119.177521),
    ("fontana", 34.092232, -117.435051),
    ("moreno valley", 33.942467, -117.229672),
    ("huntington beach", 33.659484, -117.998802),
    ("glendale", 34.142506, -118.255073),
    ("santa ana", 33.745472, -117.867653),
    ("santa clarita", 34.391663, -118.542587),
    ("garden grove", 33.773907, -117.941448),
    ("ontario", 34.063346, -117.650887),
    ("rancho cucamonga", 34.106400, -117.593108),
    ("elk grove", 38.408799, -121.371618),
    ("corona", 33.875294, -117.566437),
    ("sunnyvale", 37.368832, -122.036346),
    ("santa clara", 37.354107, -121.955238),
    ("mountain view", 37.386052, -122.083851),
    ("palo alto", 37.441883, -122.143019),
    ("redwood city", 37.485215, -122.236355),
    ("san mateo", 37.562992, -122.325525),
    ("daly city", 37.687924, -122.470207),
    ("south san francisco", 37.654656, -122.407749),
    ("berkeley", 37.871593, -122.272743),
    ("richmond", 37.935758, -122.347750),
    ("concord", 37.977978, -122.031073),
    ("walnut creek", 37.910078, -122.065182),
    ("pleasanton", 37.662431, -121.874678),
    ("livermore", 37.681873, -121.768009),
    ("san leandro", 37.724929, -122.156076),
    ("hayward", 37.668820, -122.080796),
    ("union city", 37.593392, -122.043830),
    ("milpitas", 37.432335, -121.899574),
    ("cupertino", 37.322998, -122.032182),
    ("campbell", 37.287167, -121.949958),
    ("morgan hill", 37.130501, -121.654388),
    ("gilroy", 37.005781, -121.568275),
    ("petaluma", 38.232417, -122.636652),
    ("santa rosa", 38.440467, -122.714431),
    ("napa", 38.297539, -122.286865),
    ("fairfield", 38.249358, -122.039967),
    ("vacaville", 38.356579, -121.987747),
    ("vallejo", 38.104086, -122.256637),
    ("antioch", 38.004921, -121.805789),
    ("pittsburg", 38.027976, -121.884681),
    ("brentwood", 37.931868, -121.695786),
    ("danville", 37.821593, -121.999961),
    ("san ramon", 37.779927, -121.978015),
    ("ventura", 34.274647, -119.229034),
    ("simi valley", 34.269447, -118.781479),
    ("thousand oaks", 34.170559, -118.837593),
    ("santa barbara", 34.420830, -119.698189),
    ("goleta", 34.435829, -119.827640),
    ("san luis obispo", 35.282753, -120.659616),
    ("pismo beach", 35.142753, -120.641282),
    ("arroyo grande", 35.118587, -120.590726),
    ("santa maria", 34.953034, -120.435719),
    ("lompoc", 34.639150, -120.457940),
    ("salinas", 36.677737, -121.655501),
    ("monterey", 36.600238, -121.894676),
    ("carmel-by-the-sea", 36.555239, -121.923287),
    ("seaside", 36.611071, -121.851617),
    ("santa cruz", 36.974117, -122.030792),
    ("watsonville", 36.910231, -121.756894),
    ("redlands", 34.055568, -117.182541),
    ("yucaipa", 34.033627, -117.043091),
    ("rialto", 34.106400, -117.370323),
    ("hesperia", 34.426388, -117.300880),
    ("victorville", 34.536106, -117.291155),
    ("apple valley", 34.500831, -117.185875),
    ("barstow", 34.895798, -117.017284),
    ("temecula", 33.493640, -117.148361),
    ("murrieta", 33.553915, -117.213923),
    ("menifee", 33.697147, -117.185295),
    ("hemet", 33.747520, -116.971968),
    ("perris", 33.782520, -117.228649),
    ("beaumont", 33.929461, -116.977249),
    ("banning", 33.925571, -116.876411),
    ("upland", 34.097510, -117.648388),
    ("chino", 34.012234, -117.688942),
    ("chino hills", 33.989818, -117.732582),
    ("la verne", 34.100841, -117.767834),
    ("pomona", 34.055103, -117.749991),
    ("claremont", 34.096676, -117.719780),
    ("newport beach", 33.618912, -117.928947),
    ("laguna beach", 33.542717, -117.785358),
    ("laguna niguel", 33.522526, -117.707553),
    ("aliso viejo", 33.567684, -117.725609),
    ("mission viejo", 33.600021, -117.671997),
    ("lake forest", 33.646965, -117.686106),
    ("tustin", 33.745851, -117.826166),
    ("fullerton", 33.870365, -117.924212),
    ("brea", 33.916681, -117.900063),
    ("yorba linda", 33.888626, -117.813112),
    ("costa mesa", 33.641132, -117.918671),
    ("westminster", 33.751341, -117.993992),
    ("fountain valley", 33.709999, -117.953667),
    ("anaheim hills", 33.850000, -117.740000),
    ("seal beach", 33.741409, -118.104768),
    ("san clemente", 33.426971, -117.611992),
    ("dana point", 33.467235, -117.698112),
    ("san juan capistrano", 33.501693, -117.662552),
    ("pasadena", 34.147785, -118.144516),
    ("burbank", 34.180839, -118.308968),
    ("glendora", 34.136119, -117.865341),
    ("azusa", 34.133619, -117.907562),
    ("duarte", 34.139729, -117.977287),
    ("monrovia", 34.144261, -118.001948),
    ("arcadia", 34.136719, -118.041979),
    ("alhambra", 34.095287, -118.127014),
    ("montebello", 34.009460, -118.105743),
    ("whittier", 33.979179, -118.032844),
    ("downey", 33.940108, -118.133159),
    ("norwalk", 33.902237, -118.081733),
    ("cerritos", 33.858349, -118.064789),
    ("lakewood", 33.853626, -118.133957),
    ("redondo beach", 33.849182, -118.388405),
    ("manhattan beach", 33.884736, -118.410909),
    ("hermosa beach", 33.862236, -118.399519),
    ("torrance", 33.835293, -118.340628),
    ("inglewood", 33.961681, -118.353127),
    ("west hollywood", 34.090010, -118.406849),
    ("beverly hills", 34.073620, -118.400356),
    ("santa monica", 34.019454, -118.491191),
    ("malibu", 34.025921, -118.779757),
    ("turlock", 37.494656, -120.846595),
    ("ceres", 37.594933, -120.957710),
    ("merced", 37.302163, -120.482967),
    ("madera", 36.961338, -120.060722),
    ("visalia", 36.330230, -119.292061),
    ("hanford", 36.327450, -119.645684),
    ("porterville", 36.065231, -119.016769),
    ("lodi", 38.134148, -121.272453),
    ("tracy", 37.739651, -121.425224),
    ("yuba city", 39.140449, -121.616913),
    ("chico", 39.728494, -121.837479),
    ("redding", 40.586540, -122.391678),
    ("eureka", 40.802071, -124.163673),
    ("ukiah", 39.150172, -123.207783),
    ("davis", 38.544907, -121.740517),
    ("woodland", 38.678516, -121.773298),
    ("roseville", 38.752125, -121.288010),
    ("rocklin", 38.790733, -121.235783),
    ("lincoln", 38.891567, -121.293008),
    ("el dorado hills", 38.685736, -121.082168),
    ("folsom", 38.677959, -121.176064),
    ("placerville", 38.729625, -120.798546),
    ("auburn", 38.896565, -121.076890),
    ("grass valley", 39.219060, -121.061060),
    ("nevada city", 39.261559, -121.016059),
    ("palm springs", 33.830296, -116.545292),
    ("cathedral city", 33.780541, -116.466803),
    ("palm desert", 33.722245, -116.374456),
    ("la quinta", 33.663357, -116.310010),
    ("indio", 33.720577, -116.215561),
    ("coachella", 33.680300, -116.173897),
    ("desert hot springs", 33.961121, -116.501678),
    ("blythe", 33.610310, -114.596374),
    ("carlsbad", 33.158093, -117.350594),
    ("oceanside", 33.195869, -117.379483),
    ("vista", 33.200037, -117.242536),
    ("san marcos", 33.143372, -117.166144),
    ("escondido", 33.119206, -117.086421),
    ("poway", 32.962823, -117.035865),
    ("la jolla", 32.832811, -117.271271),
    ("encinitas", 33.036987, -117.291981),
    ("del mar", 32.959489, -117.265314),
    ("imperial beach", 32.583944, -117.113083),
    ("national city", 32.678108, -117.099197),
    ("el cajon", 32.794773, -116.962527),
    ("la mesa", 32.767829, -117.023084),
    ("santee", 32.838383, -116.973917),
    ("south lake tahoe", 38.939926, -119.977186),
    ("truckee", 39.327962, -120.183253),
    ("mammoth lakes", 37.648546, -118.972079),
    ("bishop", 37.363537, -118.395112),
];

static CITY_INDEX: LazyLock<HashMap<&'static str, Point<f64>>> = LazyLock::new(|| {
    CITIES
        .iter()
        .map(|&(name, lat, lon)| (name, Point::new(lon, lat)))
        .collect()
});

/// Lookup key for a free-text city name
#[inline]
fn city_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Resolve a city name to a point (x = longitude, y = latitude)
pub fn city_coordinates(name: &str) -> Option<Point<f64>> {
    let key = city_key(name);
    if key.is_empty() {
        return None;
    }
    CITY_INDEX.get(key.as_str()).copied()
}

pub fn is_known_city(name: &str) -> bool {
    city_coordinates(name).is_some()
}

/// Haversine distance between two points in miles
///
/// `sqrt(h)` is clamped to 1 so rounding can never push it outside the
/// domain of `asin`.
#[inline]
pub fn haversine_miles(a: Point<f64>, b: Point<f64>) -> f64 {
    let lat1_rad = a.y().to_radians();
    let lat2_rad = b.y().to_radians();
    let delta_lat = (b.y() - a.y()).to_radians();
    let delta_lon = (b.x() - a.x()).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_MILES * h.sqrt().min(1.0).asin()
}

/// Distance in miles between two named cities
///
/// Returns `None` when either name is missing, blank, or not in the table.
pub fn distance_miles(city_a: Option<&str>, city_b: Option<&str>) -> Option<f64> {
    let a = city_coordinates(city_a?)?;
    let b = city_coordinates(city_b?)?;
    Some(haversine_miles(a, b))
}
