use serde::{Deserialize, Serialize};

mod pricing;

pub use pricing::{PricingTier, Promotion, TravelRule, format_rand};

/// Static reference data about the business, injected into every outbound prompt.
///
/// Owned by the hosting application and never mutated during a session.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct BusinessContext {
    pub name: String,
    pub region: String,
    pub phone: String,
    pub email: String,
    pub chat_handle: String,
    pub setup: Option<String>,
    pub space_requirements: String,
    pub power_requirements: String,
    pub inclusions: Vec<String>,
    pub travel: TravelRule,
    pub promotion: Option<Promotion>,
    pub pricing_tiers: Vec<PricingTier>,
}

impl BusinessContext {
    /// `tel:` link for the contact phone, with all whitespace stripped.
    pub fn tel_link(&self) -> String {
        let digits = self
            .phone
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>();

        format!("tel:{digits}")
    }

    /// The chat handle as a clickable link. Bare numbers are turned into a wa.me link.
    pub fn chat_link(&self) -> String {
        if self.chat_handle.starts_with("http://") || self.chat_handle.starts_with("https://") {
            return self.chat_handle.clone();
        }

        let digits = self
            .chat_handle
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect::<String>();

        format!("https://wa.me/{digits}")
    }
}

impl Default for BusinessContext {
    fn default() -> Self {
        Self {
            name: "Sim2U".to_string(),
            region: "the Western Cape, South Africa".to_string(),
            phone: "083 318 2565".to_string(),
            email: "info@sim2umobilegolf.co.za".to_string(),
            chat_handle: "https://wa.me/27833182565".to_string(),
            pricing_tiers: vec![
                PricingTier::new("Birdie Package", 4, 6_300, 3_150),
                PricingTier::new("Eagle Package", 6, 9_000, 4_500),
                PricingTier::new("Full Day Package", 8, 12_000, 6_000),
            ],
            promotion: Some(Promotion {
                name: "Early Bird Special".to_string(),
                discount_percent: 50,
                note: Some("while we test the setup".to_string()),
            }),
            travel: TravelRule {
                free_radius_km: 20,
                per_km_rate: 9,
            },
            setup: Some(
                "We use a professional Sim2U branded inflatable booth that works beautifully outdoors at wine estates and luxury venues."
                    .to_string(),
            ),
            space_requirements: "3.3m height, 4.6m width, 5.25m length.".to_string(),
            power_requirements:
                "We need access to a standard power outlet. We provide a 30m extension lead."
                    .to_string(),
            inclusions: vec![
                "Full setup (Rapsodo MLM2PRO + Awesome Golf)".to_string(),
                "driving range".to_string(),
                "games".to_string(),
                "course play".to_string(),
                "shot tracking".to_string(),
                "setup/pack-down".to_string(),
            ],
        }
    }
}
