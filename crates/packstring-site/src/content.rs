//! Seed content for the public pages
//!
//! Copy lives in code, not a CMS. Slugs here must match the catalog in
//! packstring-core; the availability store is keyed by the same slugs.

use packstring_availability::DateSlot;

/// Summary card for a trip category (homepage and trips hub).
#[derive(Debug, Clone)]
pub struct TripCard {
    pub title: &'static str,
    pub description: &'static str,
    pub image: &'static str,
    pub url: &'static str,
}

/// Client review quote on the homepage.
#[derive(Debug, Clone)]
pub struct Testimonial {
    pub quote: &'static str,
    pub name: &'static str,
    pub detail: &'static str,
}

/// One offering section on a trip category page. `availability` is
/// attached from the store at render time.
#[derive(Debug, Clone)]
pub struct TripSection {
    pub title: &'static str,
    pub slug: &'static str,
    pub tagline: &'static str,
    pub description: &'static str,
    pub location_label: &'static str,
    pub locations: &'static [&'static str],
    pub season: &'static str,
    pub includes: &'static [&'static str],
    pub duration: &'static str,
    pub price: &'static str,
    pub availability: Vec<DateSlot>,
}

impl TripSection {
    fn new(
        title: &'static str,
        slug: &'static str,
        tagline: &'static str,
        description: &'static str,
        location_label: &'static str,
        locations: &'static [&'static str],
        season: &'static str,
        includes: &'static [&'static str],
        duration: &'static str,
        price: &'static str,
    ) -> Self {
        Self {
            title,
            slug,
            tagline,
            description,
            location_label,
            locations,
            season,
            includes,
            duration,
            price,
            availability: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GalleryCategory {
    pub name: &'static str,
    pub slug: &'static str,
}

#[derive(Debug, Clone)]
pub struct GalleryImage {
    pub id: u32,
    pub src: &'static str,
    pub thumb: &'static str,
    pub alt: &'static str,
    pub category: &'static str,
}

pub fn trip_cards() -> Vec<TripCard> {
    vec![
        TripCard {
            title: "Fishing Trips",
            description: "The Missouri below Holter Dam produces more trout per mile than any river in the Lower 48. Jet boat, drift boat, wade, and lake trips. Half-day and full-day.",
            image: "/static/img/trips/fishing-card",
            url: "/trips/fishing/",
        },
        TripCard {
            title: "Hunting Trips",
            description: "Elk come through the Elkhorn timber like they have for centuries. Guided hunts for elk, deer, bear, and antelope on private ranches and public land near Helena.",
            image: "/static/img/trips/hunting-card",
            url: "/trips/hunting/",
        },
        TripCard {
            title: "Packages",
            description: "Three days. Three waters. Three chances to tell a story nobody back home will believe. The Triple Header and the 6-Pack.",
            image: "/static/img/trips/packages-card",
            url: "/trips/packages/",
        },
    ]
}

pub fn testimonials() -> Vec<Testimonial> {
    vec![
        Testimonial {
            quote: "Forrest put us on fish all day long. Best guide experience we've had in 20 years of fishing out West.",
            name: "Mike R.",
            detail: "Missouri River Jet Boat, June 2025",
        },
        Testimonial {
            quote: "Professional, knowledgeable, and genuinely fun to spend a day with. We'll be back every fall.",
            name: "Dan & Sarah K.",
            detail: "Elk Hunt, October 2024",
        },
        Testimonial {
            quote: "The Triple Header package was the highlight of our year. Fishing, hunting, and scenery you can't beat anywhere else.",
            name: "Tom W.",
            detail: "Triple Header Package, August 2025",
        },
    ]
}

pub fn fishing_trips() -> Vec<TripSection> {
    vec![
        TripSection::new(
            "Jet Boat Trips",
            "jet-boat",
            "Missouri River – Land of Giants",
            "Cover miles of prime water on the Missouri River below Holter Dam in our heated jet boat. This stretch is famous for producing trophy rainbow and brown trout year-round. Perfect for anglers who want to hit multiple productive runs in a single day.",
            "Waters",
            &["Missouri River (Craig to Cascade)"],
            "",
            &[
                "All flies and terminal tackle",
                "Heated jet boat with casting platforms",
                "Streamside lunch (full day)",
                "Drinks and snacks",
            ],
            "Full Day (8 hrs) or Half Day (4 hrs)",
            "From $500/person",
        ),
        TripSection::new(
            "Drift Boat Trips",
            "drift-boat",
            "Classic Fly Fishing at Its Best",
            "Float through scenic canyons and wade productive riffles from a traditional drift boat. A quieter, more intimate experience that puts you right in the seams where big fish hold. We fish the Missouri, Big Horn, and Blackfoot Rivers depending on season and conditions.",
            "Waters",
            &["Missouri River", "Big Horn River", "Blackfoot River"],
            "",
            &[
                "All flies and terminal tackle",
                "Drift boat with comfortable seating",
                "Streamside lunch (full day)",
                "Drinks and snacks",
            ],
            "Full Day (8 hrs) or Half Day (4 hrs)",
            "From $500/person",
        ),
        TripSection::new(
            "Lake Trips",
            "lake",
            "Big Water, Big Fish",
            "Target walleye, perch, and trout on Montana's premier reservoirs. We troll and jig aboard a fully equipped boat with electronics to find the fish. Great for families and groups looking for a fun, productive day on the water.",
            "Waters",
            &["Canyon Ferry Reservoir", "Fort Peck Lake", "Holter Lake"],
            "",
            &[
                "All tackle and bait",
                "Fully equipped fishing boat with electronics",
                "Lunch and drinks (full day)",
                "Fish cleaning and bagging",
            ],
            "Full Day (8 hrs) or Half Day (4 hrs)",
            "From $450/person",
        ),
        TripSection::new(
            "Wade Trips",
            "wade",
            "Boots in the Water, Rod in Hand",
            "For the angler who wants to feel the river underfoot. We hike into productive stretches of smaller rivers and creeks, targeting wild trout in pocket water and riffles. An ideal choice for fly fishing purists and anyone who loves exploring on foot.",
            "Waters",
            &["Gallatin River", "Shields River", "Various spring creeks"],
            "",
            &[
                "All flies and terminal tackle",
                "Waders and boots (if needed)",
                "Streamside lunch (full day)",
                "Drinks and snacks",
            ],
            "Full Day (8 hrs) or Half Day (4 hrs)",
            "From $400/person",
        ),
        TripSection::new(
            "Specialty Trips",
            "specialty",
            "Beyond Trout – Something Different",
            "Looking for something off the beaten path? We offer guided trips for pike, smallmouth bass, Chinook salmon, lake trout, and winter ice fishing. These trips are tailored to adventurous anglers who want a unique Montana experience.",
            "Waters",
            &["Missouri River", "Fort Peck Lake", "Canyon Ferry Reservoir", "Various rivers"],
            "",
            &[
                "All tackle and bait",
                "Specialized equipment for target species",
                "Lunch and drinks (full day)",
                "Ice fishing gear and shelter (winter trips)",
            ],
            "Full Day (8 hrs)",
            "From $450/person",
        ),
    ]
}

pub fn hunting_trips() -> Vec<TripSection> {
    vec![
        TripSection::new(
            "Elk Hunts",
            "elk-hunting",
            "Elkhorn Timber, Big Belt Country",
            "Elk push through the Elkhorn and Big Belt mountains every fall on the same trails they've used for generations. Forrest hunts them on a mix of private ranch land and public ground, glassing ridgelines at first light and working the timber as the day warms. Five to seven days in steep country. Come prepared to hike.",
            "Hunting Areas",
            &["Elkhorn Mountains", "Big Belt Mountains"],
            "Sept 15 – Nov 25",
            &[
                "Licensed guide service for the duration of the hunt",
                "Field dressing and caping",
                "Pack-out assistance (stock or ATV depending on terrain)",
                "Game care and cooling",
                "Camp setup and breakdown",
                "Spotting scopes and optics",
            ],
            "5–7 Days",
            "Contact for pricing",
        ),
        TripSection::new(
            "Deer Hunts",
            "deer-hunting",
            "Ranch Land and River Breaks",
            "Whitetail and mule deer on private ranches outside Helena and in the coulees along the Missouri River breaks. Forrest scouts these properties through the summer, running trail cameras and tracking patterns before the season opens. Spot-and-stalk or stand hunting depending on terrain and conditions. Three to five days.",
            "Hunting Areas",
            &["Helena area private ranches", "Missouri River breaks"],
            "Oct 20 – Nov 25",
            &[
                "Licensed guide service for the duration of the hunt",
                "Field dressing and caping",
                "Game care and cooling",
                "Trail camera scouting data",
                "Stand or blind setup where applicable",
                "Transport to and from hunting areas",
            ],
            "3–5 Days",
            "Contact for pricing",
        ),
        TripSection::new(
            "Bear Hunts",
            "bear-hunting",
            "Spring and Fall in the Elkhorns",
            "Black bear in the Elkhorn Mountains, the Big Belts, and Helena National Forest. Spring hunts run bait stations set weeks in advance. Fall hunts work spot-and-stalk through berry patches and creek bottoms. Forrest knows the drainages where bears den and feed. Five to seven days. Two seasons to hunt them.",
            "Hunting Areas",
            &["Elkhorn Mountains", "Big Belt Mountains", "Helena National Forest"],
            "Apr 15 – May 31, Sept 15 – Nov 25",
            &[
                "Licensed guide service for the duration of the hunt",
                "Bait station setup and maintenance (spring)",
                "Field dressing and skinning",
                "Game care and cooling",
                "Pack-out assistance",
                "Spotting scopes and optics",
            ],
            "5–7 Days",
            "Contact for pricing",
        ),
        TripSection::new(
            "Antelope Hunts",
            "antelope-hunting",
            "Open Prairie, Long Glass",
            "Pronghorn on central Montana prairie and Broadwater County grassland. Flat country where you can see for miles and so can they. Forrest runs spot-and-stalk and blind hunts over water sources. Two to three days. The fastest game animal in North America does not give you many chances.",
            "Hunting Areas",
            &["Central Montana prairie", "Broadwater County"],
            "Sept 1 – Oct 15",
            &[
                "Licensed guide service for the duration of the hunt",
                "Ground blind setup and placement",
                "Spotting and range estimation",
                "Field dressing",
                "Transport to and from hunting areas",
                "Game care and cooling",
            ],
            "2–3 Days",
            "Contact for pricing",
        ),
    ]
}

pub fn package_trips() -> Vec<TripSection> {
    vec![
        TripSection::new(
            "Montana Triple Header",
            "triple-header",
            "Fish. Hunt. Do It All in Five Days.",
            "Two days on the Missouri chasing trout. One day in the Elkhorns after elk or deer. Two flex days to fish Canyon Ferry, wade a spring creek, or just sit on the porch and do nothing. Forrest builds the itinerary around the season, the conditions, and what you came to do. Five days, four nights. Lodging, meals on guided days, and all gear included.",
            "Destinations",
            &["Missouri River", "Canyon Ferry", "Elkhorn Mountains"],
            "",
            &[
                "Lodging coordination (4 nights)",
                "All meals on guided days",
                "All fishing tackle and gear",
                "All hunting gear (rifle/bow not included)",
                "Game processing coordination",
                "Airport pickup from Helena Regional",
                "Custom itinerary planning",
            ],
            "5 Days / 4 Nights",
            "$3,500/person",
        ),
        TripSection::new(
            "Montana 6-Pack",
            "six-pack",
            "Seven Days. Five Waters. One State That Has It All.",
            "Three days fishing the Missouri, Fort Peck, and Canyon Ferry. Two days hunting the Elkhorns and Big Belts. Two days to pick your own – a second run at the river, a wade trip on the Gallatin, or a morning in a duck blind. Forrest handles the logistics. Lodging, meals, gear, transport, game processing. All of it. Seven days, six nights. The full Montana trip.",
            "Destinations",
            &["Missouri River", "Fort Peck", "Canyon Ferry", "Elkhorn Mountains", "Big Belt Mountains"],
            "",
            &[
                "Lodging coordination (6 nights)",
                "All meals on guided days",
                "All fishing tackle and gear",
                "All hunting gear (rifle/bow not included)",
                "Game processing coordination",
                "Airport pickup from Helena Regional",
                "Custom itinerary planning",
                "Flex day activity options",
            ],
            "7 Days / 6 Nights",
            "$5,500/person",
        ),
    ]
}

pub fn gallery_categories() -> Vec<GalleryCategory> {
    vec![
        GalleryCategory { name: "Fishing", slug: "fishing" },
        GalleryCategory { name: "Hunting", slug: "hunting" },
        GalleryCategory { name: "Scenery", slug: "scenery" },
        GalleryCategory { name: "Camp", slug: "camp" },
    ]
}

pub fn gallery_images() -> Vec<GalleryImage> {
    fn img(id: u32, alt: &'static str, category: &'static str) -> GalleryImage {
        // Src/thumb paths follow the fixed naming scheme of the asset set.
        let src = match id {
            1 => "/static/img/gallery/gallery-01",
            2 => "/static/img/gallery/gallery-02",
            3 => "/static/img/gallery/gallery-03",
            4 => "/static/img/gallery/gallery-04",
            5 => "/static/img/gallery/gallery-05",
            6 => "/static/img/gallery/gallery-06",
            7 => "/static/img/gallery/gallery-07",
            8 => "/static/img/gallery/gallery-08",
            9 => "/static/img/gallery/gallery-09",
            10 => "/static/img/gallery/gallery-10",
            11 => "/static/img/gallery/gallery-11",
            12 => "/static/img/gallery/gallery-12",
            13 => "/static/img/gallery/gallery-13",
            14 => "/static/img/gallery/gallery-14",
            15 => "/static/img/gallery/gallery-15",
            16 => "/static/img/gallery/gallery-16",
            17 => "/static/img/gallery/gallery-17",
            _ => "/static/img/gallery/gallery-18",
        };
        let thumb = match id {
            1 => "/static/img/gallery/gallery-01-thumb.webp",
            2 => "/static/img/gallery/gallery-02-thumb.webp",
            3 => "/static/img/gallery/gallery-03-thumb.webp",
            4 => "/static/img/gallery/gallery-04-thumb.webp",
            5 => "/static/img/gallery/gallery-05-thumb.webp",
            6 => "/static/img/gallery/gallery-06-thumb.webp",
            7 => "/static/img/gallery/gallery-07-thumb.webp",
            8 => "/static/img/gallery/gallery-08-thumb.webp",
            9 => "/static/img/gallery/gallery-09-thumb.webp",
            10 => "/static/img/gallery/gallery-10-thumb.webp",
            11 => "/static/img/gallery/gallery-11-thumb.webp",
            12 => "/static/img/gallery/gallery-12-thumb.webp",
            13 => "/static/img/gallery/gallery-13-thumb.webp",
            14 => "/static/img/gallery/gallery-14-thumb.webp",
            15 => "/static/img/gallery/gallery-15-thumb.webp",
            16 => "/static/img/gallery/gallery-16-thumb.webp",
            17 => "/static/img/gallery/gallery-17-thumb.webp",
            _ => "/static/img/gallery/gallery-18-thumb.webp",
        };
        GalleryImage { id, src, thumb, alt, category }
    }

    vec![
        img(1, "Jet boat on the Missouri at sunrise", "fishing"),
        img(2, "Drift boat below Holter Dam with mountains behind", "fishing"),
        img(3, "Angler landing a brown trout on the Missouri", "fishing"),
        img(4, "Canyon Ferry Lake at golden hour with calm water", "fishing"),
        img(5, "Wade fishing in a side channel of the Missouri", "fishing"),
        img(6, "Elk on a ridge in the Elkhorn Mountains at dawn", "hunting"),
        img(7, "Mule deer buck in the Big Belt foothills", "hunting"),
        img(8, "Hunter glassing a valley from a rocky overlook", "hunting"),
        img(9, "Antelope on open prairie south of Helena", "hunting"),
        img(10, "Missouri River canyon in fall color", "scenery"),
        img(11, "Snow-capped peaks above the Gates of the Mountains", "scenery"),
        img(12, "Sunrise over the Helena Valley looking west", "scenery"),
        img(13, "Elkhorn Mountains with wildflower meadow in foreground", "scenery"),
        img(14, "Storm clouds building over Canyon Ferry Lake", "scenery"),
        img(15, "Campfire on the riverbank after a full day on the water", "camp"),
        img(16, "Camp kitchen setup with the Missouri in the background", "camp"),
        img(17, "Gear laid out before a morning hunt", "camp"),
        img(18, "Tailgate lunch with a view of the valley", "camp"),
    ]
}
