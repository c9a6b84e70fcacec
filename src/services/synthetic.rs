//! Synthetic candidate population
//!
//! Stands in for a real user directory during demos, benchmarks and tests.
//! Generation is driven entirely by the supplied random source, so a seeded
//! generator always yields the same population (apart from user ids).

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::core::filters::eq_ignore_case;
use crate::models::User;

/// Activities offered in the app
pub const ACTIVITIES: &[&str] = &[
    "Hiking", "Pickleball", "Bowling", "Mini Golf", "Boba", "Movie", "Karaoke", "Dessert",
    "Cooking Class", "Theme Park", "Museum", "Yoga", "Coffee", "Brunch", "Golf",
    "Snowboarding", "Paddleboarding", "Apple Picking",
];

/// Activities nobody should have attended on their own
const PREMIUM_ACTIVITIES: &[&str] = &["Snowboarding", "Paddleboarding", "Apple Picking"];

/// Minimum attendees per activity in a generated population
pub const MIN_PER_ACTIVITY: usize = 60;

const GENDERS: &[&str] = &["Male", "Female"];
const ETHNICITIES: &[&str] = &["Caucasian", "Asian", "African American", "Hispanic", "Native American"];
const RELIGIONS: &[&str] = &[
    "Christian", "Catholic", "Muslim", "Jewish", "Hindu", "Buddhist", "Atheist", "Agnostic",
    "Spiritual", "None",
];
const VIBES: &[&str] = &["Chill", "Casual", "Party"];
const MBTI_TYPES: &[&str] = &[
    "ENFP", "ISTJ", "INFJ", "ENTP", "ISFJ", "INTP", "ESFP", "ESTJ", "ENFJ", "ISTP", "INFP",
    "ESTP", "ENTJ", "ESFJ", "INTJ",
];
const BADGES: &[&str] = &[
    "Planner Pro", "Team Player", "Cool", "Life of the Party", "Wingman",
    "Best Friend Material", "Early Bird", "Night Owl", "Icebreaker",
];

// Lancaster, Palmdale, Orange, Clovis, El Monte, West Covina, Compton,
// South Gate, Carson, Hawthorne and San Rafael are not in the city table.
const CITIES: &[&str] = &[
    "Los Angeles", "San Diego", "San Jose", "San Francisco", "Fresno", "Sacramento",
    "Long Beach", "Oakland", "Bakersfield", "Anaheim", "Riverside", "Stockton", "Irvine",
    "Chula Vista", "Fremont", "San Bernardino", "Modesto", "Oxnard", "Fontana",
    "Moreno Valley", "Huntington Beach", "Glendale", "Santa Clarita", "Garden Grove",
    "Santa Rosa", "Oceanside", "Rancho Cucamonga", "Ontario", "Elk Grove", "Corona",
    "Lancaster", "Palmdale", "Salinas", "Hayward", "Pomona", "Escondido", "Sunnyvale",
    "Torrance", "Pasadena", "Orange", "Fullerton", "Visalia", "Roseville", "Concord",
    "Thousand Oaks", "Simi Valley", "Vallejo", "Berkeley", "Santa Clara", "Carlsbad",
    "Fairfield", "Temecula", "Clovis", "Murrieta", "El Monte", "Antioch", "Ventura",
    "Richmond", "Costa Mesa", "West Covina", "Santa Maria", "Norwalk", "Daly City",
    "Burbank", "San Mateo", "Rialto", "El Cajon", "Vista", "Vacaville", "San Marcos",
    "Compton", "Hesperia", "Mission Viejo", "South Gate", "Carson", "Santa Monica",
    "Westminster", "Redding", "Santa Barbara", "Chico", "Whittier", "Newport Beach",
    "Hawthorne", "San Leandro", "San Rafael", "Mountain View", "Upland", "Turlock",
    "Fountain Valley", "Livermore", "Tracy", "Merced", "Chino", "Redwood City", "Hemet",
    "Lake Forest", "Napa", "Indio", "Menifee", "Arcadia",
];

const FIRST_NAMES_MALE: &[&str] = &[
    "James", "Michael", "Daniel", "Hiro", "Kenji", "Ravi", "Marcus", "Jalen", "Andre",
    "Diego", "Mateo", "Carlos", "Aaron", "Logan", "Ethan",
];
const FIRST_NAMES_FEMALE: &[&str] = &[
    "Emily", "Hannah", "Sarah", "Aiko", "Mei", "Priya", "Imani", "Nia", "Aaliyah", "Sofia",
    "Camila", "Lucia", "Ashley", "Megan", "Paige",
];
const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Brown", "Kim", "Nguyen", "Chen", "Patel", "Garcia", "Lopez",
    "Torres", "Begay", "Yazzie", "Redbird", "Walker", "Hall",
];

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, values: &[&'a str]) -> &'a str {
    values.choose(rng).copied().unwrap_or_default()
}

/// Generate one random Californian user
pub fn generate_user<R: Rng + ?Sized>(rng: &mut R) -> User {
    let gender = pick(rng, GENDERS);
    let first = if gender == "Male" {
        pick(rng, FIRST_NAMES_MALE)
    } else {
        pick(rng, FIRST_NAMES_FEMALE)
    };
    let last = pick(rng, LAST_NAMES);

    let mut user = User::new(format!("{} {}", first, last), rng.gen_range(18..=75));
    user.gender = gender.to_string();
    user.city = Some(pick(rng, CITIES).to_string());
    user.ethnicity = pick(rng, ETHNICITIES).to_string();
    user.religion = pick(rng, RELIGIONS).to_string();
    user.vibe = pick(rng, VIBES).to_string();
    user.mbti = pick(rng, MBTI_TYPES).to_string();
    user.attendance_rating = Some(rng.gen_range(3.0..=5.0));

    let badge_count = rng.gen_range(0..=3);
    user.badges = BADGES
        .choose_multiple(rng, badge_count)
        .map(|b| b.to_string())
        .collect();

    let attended = rng.gen_range(1..=4);
    user.attendance = ACTIVITIES
        .choose_multiple(rng, attended)
        .map(|a| a.to_string())
        .collect();
    let lone_premium = match user.attendance.as_slice() {
        [only] if PREMIUM_ACTIVITIES.contains(&only.as_str()) => Some(only.clone()),
        _ => None,
    };
    if let Some(only) = lone_premium {
        let others: Vec<&str> = ACTIVITIES.iter().copied().filter(|a| *a != only).collect();
        user.attendance.push(pick(rng, &others).to_string());
    }

    user
}

/// Generate `count` users, then top up attendance so every activity has at
/// least [`MIN_PER_ACTIVITY`] attendees (population permitting)
pub fn generate_population<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<User> {
    let mut users: Vec<User> = (0..count).map(|_| generate_user(rng)).collect();
    ensure_activity_coverage(&mut users, ACTIVITIES, MIN_PER_ACTIVITY, rng);
    debug!(count = users.len(), "generated synthetic population");
    users
}

/// Add each activity to random users' attendance until at least
/// `min_per_activity` users have attended it
pub fn ensure_activity_coverage<R: Rng + ?Sized>(
    users: &mut [User],
    activities: &[&str],
    min_per_activity: usize,
    rng: &mut R,
) {
    if users.is_empty() || min_per_activity == 0 {
        return;
    }

    for activity in activities {
        let mut current = users.iter().filter(|u| has_attended(u, activity)).count();
        if current >= min_per_activity {
            continue;
        }

        let mut indices: Vec<usize> = (0..users.len()).collect();
        indices.shuffle(rng);
        for i in indices {
            if current >= min_per_activity {
                break;
            }
            if !has_attended(&users[i], activity) {
                users[i].attendance.push(activity.to_string());
                current += 1;
            }
        }
    }
}

fn has_attended(user: &User, activity: &str) -> bool {
    user.attendance.iter().any(|a| eq_ignore_case(a, activity))
}
