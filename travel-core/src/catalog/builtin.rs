use crate::model::{
    AirQuality, AirQualityStatus, Coordinates, Destination, Pollen, PollenLevel, SustainableOptions,
};

const GREEN: &str = "#4CAF50";
const ORANGE: &str = "#FF9800";
const RED: &str = "#F44336";

const IMAGE_QUERY: &str = "ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop";

fn image(photo: &str, width: u32) -> String {
    format!("https://images.unsplash.com/photo-{photo}?{IMAGE_QUERY}&w={width}&q=80")
}

fn options(transportation: &[&str], accommodation: &[&str], activities: &[&str]) -> SustainableOptions {
    let owned = |items: &[&str]| -> Vec<String> { items.iter().map(|s| (*s).to_string()).collect() };
    SustainableOptions {
        transportation: owned(transportation),
        accommodation: owned(accommodation),
        activities: owned(activities),
    }
}

fn good_air(aqi: u32) -> AirQuality {
    AirQuality { aqi, status: AirQualityStatus::Good, color: GREEN.into() }
}

fn pollen(level: PollenLevel, forecast: &str) -> Pollen {
    let color = match level {
        PollenLevel::Low => GREEN,
        PollenLevel::Medium => ORANGE,
        PollenLevel::High => RED,
    };
    Pollen { level, forecast: forecast.into(), color: color.into() }
}

pub(super) fn destinations() -> Vec<Destination> {
    vec![
        Destination {
            id: "1".into(),
            name: "Copenhagen".into(),
            country: "Denmark".into(),
            description: "One of the world's most sustainable cities with excellent bike \
                          infrastructure and renewable energy."
                .into(),
            image: image("1513622470522-26c3c8a854bc", 1740),
            coordinates: Coordinates::new(55.6761, 12.5683),
            eco_score: 92,
            air_quality: good_air(22),
            pollen: pollen(PollenLevel::Low, "Low pollen levels throughout summer"),
            sustainable_options: options(
                &["Bike rental", "Electric buses", "Walking tours"],
                &["Eco-certified hotels", "Green hostels"],
                &["Urban farming tours", "Sustainable food tours", "Harbor swimming"],
            ),
        },
        Destination {
            id: "2".into(),
            name: "Costa Rica".into(),
            country: "Costa Rica".into(),
            description: "A pioneer in ecotourism with rich biodiversity and renewable energy \
                          initiatives."
                .into(),
            image: image("1518259102261-b40117eabbc9", 1740),
            coordinates: Coordinates::new(9.7489, -83.7534),
            eco_score: 89,
            air_quality: good_air(18),
            pollen: pollen(PollenLevel::Medium, "Moderate levels during flowering season"),
            sustainable_options: options(
                &["Shared shuttles", "Public buses", "Electric car rentals"],
                &["Eco-lodges", "Sustainable resorts"],
                &["Wildlife conservation tours", "Rainforest hikes", "Sustainable coffee farm visits"],
            ),
        },
        Destination {
            id: "3".into(),
            name: "Kyoto".into(),
            country: "Japan".into(),
            description: "A city that balances traditional culture with modern sustainability \
                          practices."
                .into(),
            image: image("1493976040374-85c8e12f0c0e", 1740),
            coordinates: Coordinates::new(35.0116, 135.7681),
            eco_score: 85,
            air_quality: good_air(35),
            pollen: pollen(PollenLevel::High, "High cedar pollen in spring"),
            sustainable_options: options(
                &["Bicycle rentals", "Efficient public transit", "Walking tours"],
                &["Traditional ryokans with sustainable practices", "Green hotels"],
                &["Temple gardens tours", "Traditional crafts workshops", "Bamboo forest walks"],
            ),
        },
        Destination {
            id: "4".into(),
            name: "Vancouver".into(),
            country: "Canada".into(),
            description: "A coastal city with strong environmental policies and access to \
                          stunning nature."
                .into(),
            image: image("1559511260-66a654ae982a", 1744),
            coordinates: Coordinates::new(49.2827, -123.1207),
            eco_score: 88,
            air_quality: good_air(25),
            pollen: pollen(PollenLevel::Medium, "Moderate tree pollen in spring"),
            sustainable_options: options(
                &["SkyTrain", "Seabus", "Bike share programs"],
                &["LEED-certified hotels", "Eco-friendly B&Bs"],
                &["Stanley Park tours", "Sustainable food tours", "Nearby hiking"],
            ),
        },
        Destination {
            id: "5".into(),
            name: "Ljubljana".into(),
            country: "Slovenia".into(),
            description: "Europe's green capital with car-free zones and extensive recycling \
                          programs."
                .into(),
            image: image("1590089415225-401ed6f9db8e", 1974),
            coordinates: Coordinates::new(46.0569, 14.5058),
            eco_score: 90,
            air_quality: good_air(28),
            pollen: pollen(PollenLevel::Low, "Generally low except during peak spring"),
            sustainable_options: options(
                &["Bicycle rentals", "Electric tourist train", "Walking"],
                &["Eco-friendly hotels", "Green hostels"],
                &["Urban beekeeping tours", "Local food markets", "River kayaking"],
            ),
        },
        Destination {
            id: "6".into(),
            name: "Reykjavik".into(),
            country: "Iceland".into(),
            description: "Powered almost entirely by renewable geothermal energy with pristine \
                          air quality."
                .into(),
            image: image("1504284769000-7dadc0d2d2a5", 1740),
            coordinates: Coordinates::new(64.1466, -21.9426),
            eco_score: 94,
            air_quality: good_air(15),
            pollen: pollen(PollenLevel::Low, "Very low pollen counts year-round"),
            sustainable_options: options(
                &["Electric buses", "Walking tours", "Bike rentals"],
                &["Geothermally-powered hotels", "Eco-certified guesthouses"],
                &["Geothermal plant tours", "Whale watching", "Hot spring bathing"],
            ),
        },
    ]
}
