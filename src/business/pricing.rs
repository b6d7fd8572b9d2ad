use serde::{Deserialize, Serialize};

/// A bookable package. Prices are whole Rand.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PricingTier {
    pub label: String,
    pub duration_hours: u32,
    pub full_price: u32,
    pub discounted_price: u32,
}

impl PricingTier {
    pub fn new(
        label: impl Into<String>,
        duration_hours: u32,
        full_price: u32,
        discounted_price: u32,
    ) -> Self {
        Self {
            label: label.into(),
            duration_hours,
            full_price,
            discounted_price,
        }
    }

    pub fn is_discounted(&self) -> bool {
        self.discounted_price < self.full_price
    }

    /// e.g. `Birdie Package (4 Hours): Now R3,150 (Was R6,300)`
    pub fn describe(&self) -> String {
        let hours = match self.duration_hours {
            1 => "1 Hour".to_string(),
            n => format!("{n} Hours"),
        };

        if self.is_discounted() {
            format!(
                "{} ({}): Now {} (Was {})",
                self.label,
                hours,
                format_rand(self.discounted_price),
                format_rand(self.full_price)
            )
        } else {
            format!("{} ({}): {}", self.label, hours, format_rand(self.full_price))
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Promotion {
    pub name: String,
    pub discount_percent: u8,
    pub note: Option<String>,
}

impl Promotion {
    pub fn describe(&self) -> String {
        match &self.note {
            Some(note) => format!(
                "We are running an {}! {}% OFF all packages {}.",
                self.name, self.discount_percent, note
            ),
            None => format!(
                "We are running an {}! {}% OFF all packages.",
                self.name, self.discount_percent
            ),
        }
    }
}

/// Distance based travel fee: the first `free_radius_km` are free, then `per_km_rate` Rand per
/// kilometer, round trip.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TravelRule {
    pub free_radius_km: u32,
    pub per_km_rate: u32,
}

impl TravelRule {
    pub fn describe(&self) -> String {
        format!(
            "First {}km from base is FREE. Thereafter, {} per km (round trip).",
            self.free_radius_km,
            format_rand(self.per_km_rate)
        )
    }
}

/// Formats a whole Rand amount with thousands separators, `3150` becomes `R3,150`.
pub fn format_rand(amount: u32) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("R{grouped}")
}
