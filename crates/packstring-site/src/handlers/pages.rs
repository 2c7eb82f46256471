//! Public page handlers
//!
//! Each handler builds its template from the seed content in
//! [`crate::content`], attaching live availability where the page shows
//! date slots.

use askama::Template;
use axum::extract::{Query, State};
use axum::response::Html;
use serde::Deserialize;

use packstring_core::{PageMeta, TripInfo};

use crate::content::{
    self, GalleryCategory, GalleryImage, Testimonial, TripCard, TripSection,
};
use crate::AppState;

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate {
    meta: PageMeta,
    cards: Vec<TripCard>,
    testimonials: Vec<Testimonial>,
}

pub async fn home(State(_state): State<AppState>) -> Html<String> {
    let template = HomeTemplate {
        meta: PageMeta::new("MT Hunt & Fish Outfitters | Guided Fishing & Hunting Trips in Montana")
            .with_description(
                "Guided fishing and hunting trips out of Helena, Montana. Missouri River trout, elk and deer hunts in the Elkhorns, and multi-day combo packages.",
            )
            .with_canonical("/"),
        cards: content::trip_cards(),
        testimonials: content::testimonials(),
    };
    Html(template.render().unwrap())
}

#[derive(Template)]
#[template(path = "trips.html")]
struct TripsHubTemplate {
    meta: PageMeta,
    cards: Vec<TripCard>,
}

pub async fn trips_hub(State(_state): State<AppState>) -> Html<String> {
    let template = TripsHubTemplate {
        meta: PageMeta::new("Trips | MT Hunt & Fish Outfitters")
            .with_description(
                "Fishing trips, hunting trips, and multi-day packages with a licensed Montana outfitter.",
            )
            .with_canonical("/trips/"),
        cards: content::trip_cards(),
    };
    Html(template.render().unwrap())
}

/// Shared template for the three trip category pages. A section with a
/// non-empty `season` renders the hunting layout variant.
#[derive(Template)]
#[template(path = "trips_category.html")]
struct TripCategoryTemplate {
    meta: PageMeta,
    heading: &'static str,
    intro: &'static str,
    sections: Vec<TripSection>,
}

fn attach_availability(state: &AppState, mut sections: Vec<TripSection>) -> Vec<TripSection> {
    for section in &mut sections {
        section.availability = state.availability.get(section.slug);
    }
    sections
}

pub async fn fishing(State(state): State<AppState>) -> Html<String> {
    let template = TripCategoryTemplate {
        meta: PageMeta::new("Fishing Trips | MT Hunt & Fish Outfitters")
            .with_description(
                "Guided fishing on the Missouri River, Canyon Ferry, and Fort Peck. Jet boat, drift boat, wade, and lake trips.",
            )
            .with_canonical("/trips/fishing/"),
        heading: "Fishing Trips",
        intro: "The Missouri below Holter Dam holds more trout per mile than any river in the Lower 48, and it is twenty minutes from the shop. Pick your water and how you want to fish it.",
        sections: attach_availability(&state, content::fishing_trips()),
    };
    Html(template.render().unwrap())
}

pub async fn hunting(State(state): State<AppState>) -> Html<String> {
    let template = TripCategoryTemplate {
        meta: PageMeta::new("Hunting Trips | MT Hunt & Fish Outfitters")
            .with_description(
                "Guided elk, deer, bear, and antelope hunts in the Elkhorn and Big Belt mountains near Helena, Montana.",
            )
            .with_canonical("/trips/hunting/"),
        heading: "Hunting Trips",
        intro: "Private ranch ground and public timber within an hour of Helena, scouted all summer so your week counts. Every hunt is guided by a licensed Montana outfitter.",
        sections: attach_availability(&state, content::hunting_trips()),
    };
    Html(template.render().unwrap())
}

pub async fn packages(State(state): State<AppState>) -> Html<String> {
    let template = TripCategoryTemplate {
        meta: PageMeta::new("Packages | MT Hunt & Fish Outfitters")
            .with_description(
                "Multi-day Montana combo trips. The Triple Header and the 6-Pack: fishing, hunting, lodging, and logistics handled.",
            )
            .with_canonical("/trips/packages/"),
        heading: "Packages",
        intro: "One booking, one guide, zero logistics on your plate. Fish and hunt the best of central Montana in a single trip.",
        sections: attach_availability(&state, content::package_trips()),
    };
    Html(template.render().unwrap())
}

#[derive(Template)]
#[template(path = "gallery.html")]
struct GalleryTemplate {
    meta: PageMeta,
    categories: Vec<GalleryCategory>,
    images: Vec<GalleryImage>,
}

pub async fn gallery(State(_state): State<AppState>) -> Html<String> {
    let template = GalleryTemplate {
        meta: PageMeta::new("Gallery | MT Hunt & Fish Outfitters")
            .with_description("Photos from the river, the mountains, and camp.")
            .with_canonical("/gallery/"),
        categories: content::gallery_categories(),
        images: content::gallery_images(),
    };
    Html(template.render().unwrap())
}

#[derive(Deserialize, Default)]
pub struct ContactQuery {
    #[serde(default)]
    pub sent: Option<String>,
}

#[derive(Template)]
#[template(path = "contact.html")]
pub(crate) struct ContactTemplate {
    pub meta: PageMeta,
    pub trips: &'static [TripInfo],
    pub sent: bool,
}

pub async fn contact(
    State(_state): State<AppState>,
    Query(query): Query<ContactQuery>,
) -> Html<String> {
    let template = ContactTemplate {
        meta: PageMeta::new("Contact | MT Hunt & Fish Outfitters")
            .with_description(
                "Request a trip date or ask a question. We respond within one business day.",
            )
            .with_canonical("/contact/"),
        trips: packstring_core::trip_catalog(),
        sent: query.sent.is_some(),
    };
    Html(template.render().unwrap())
}
