use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EcoTip {
    pub title: &'static str,
    pub description: &'static str,
}

/// Travel advice shown alongside the destination list.
pub const ECO_TIPS: [EcoTip; 6] = [
    EcoTip {
        title: "Choose Direct Flights",
        description: "Direct flights typically use less fuel than connecting flights, reducing your carbon footprint.",
    },
    EcoTip {
        title: "Pack Reusable Items",
        description: "Bring a reusable water bottle, shopping bag, and utensils to minimize waste during your travels.",
    },
    EcoTip {
        title: "Support Local Businesses",
        description: "Choose locally-owned accommodations, restaurants, and tour operators to support the local economy.",
    },
    EcoTip {
        title: "Check Air Quality",
        description: "Research air quality conditions before booking, especially if you have respiratory sensitivities.",
    },
    EcoTip {
        title: "Monitor Pollen Levels",
        description: "If you have allergies, check pollen forecasts and plan your trip during low-pollen seasons.",
    },
    EcoTip {
        title: "Use Renewable Energy",
        description: "Choose accommodations that use renewable energy sources like solar or wind power.",
    },
];
