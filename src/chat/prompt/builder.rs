use std::ops::Deref;

use crate::business::BusinessContext;

/// The fully grounded prompt for one user turn.
pub struct ConciergePrompt {
    inner: String,
}

impl ConciergePrompt {
    pub fn into_inner(self) -> String {
        self.inner
    }
}

impl Deref for ConciergePrompt {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Composes persona, business facts, behavioral instructions and the user's text into a single
/// prompt string.
pub struct ConciergePromptBuilder<'a> {
    business: &'a BusinessContext,
}

impl<'a> ConciergePromptBuilder<'a> {
    pub fn new(business: &'a BusinessContext) -> Self {
        Self { business }
    }

    pub fn build(&self, user_text: &str) -> ConciergePrompt {
        let business = self.business;
        let mut prompt = String::new();

        //? Persona
        prompt.push_str(&format!(
            "You are the {} AI Concierge for a mobile golf simulator business in {}.\n",
            business.name, business.region
        ));

        //? Business facts
        prompt.push_str("Business Info:\n");
        Self::append_fact(&mut prompt, "Contact Phone", &business.phone);
        Self::append_fact(&mut prompt, "Contact Email", &business.email);
        Self::append_fact(
            &mut prompt,
            "WhatsApp",
            &format!("Available at the same number ({}).", business.chat_link()),
        );

        if let Some(promotion) = &business.promotion {
            Self::append_fact(&mut prompt, "PROMO", &promotion.describe());
        }

        let pricing_header = match &business.promotion {
            Some(promotion) => format!(
                "Packages & Pricing (After {}% Discount)",
                promotion.discount_percent
            ),
            None => "Packages & Pricing".to_string(),
        };
        prompt.push_str(&format!("- {pricing_header}:\n"));
        for tier in &business.pricing_tiers {
            prompt.push_str(&format!("  * {}\n", tier.describe()));
        }

        Self::append_fact(&mut prompt, "Travel Policy", &business.travel.describe());
        if let Some(setup) = &business.setup {
            Self::append_fact(&mut prompt, "Setup", setup);
        }
        if !business.inclusions.is_empty() {
            Self::append_fact(
                &mut prompt,
                "What's Included",
                &format!("{}.", business.inclusions.join(", ")),
            );
        }
        Self::append_fact(&mut prompt, "Requirements", &business.power_requirements);
        Self::append_fact(&mut prompt, "Space Req", &business.space_requirements);

        //? Instructions
        prompt.push_str("\nRespond professionally and charm the customer. ");
        if let Some(promotion) = &business.promotion {
            prompt.push_str(&format!(
                "Mention the {}% {} enthusiastically. ",
                promotion.discount_percent, promotion.name
            ));
        }
        prompt.push_str(&format!(
            "Be specific about the exact pricing amounts and the {}km travel rule. If they want to book, suggest they can call or WhatsApp us at {}. ",
            business.travel.free_radius_km, business.phone
        ));

        //? User text, verbatim
        prompt.push_str(&format!("User: {user_text}"));

        ConciergePrompt { inner: prompt }
    }

    fn append_fact(prompt: &mut String, label: &str, value: &str) {
        prompt.push_str(&format!("- {label}: {value}\n"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grounds_prompt_in_business_context() {
        let business = BusinessContext::default();
        let prompt = ConciergePromptBuilder::new(&business).build("Do you travel to Paarl?");

        assert!(prompt.starts_with(
            "You are the Sim2U AI Concierge for a mobile golf simulator business in the Western Cape, South Africa."
        ));
        assert!(prompt.contains("- Contact Phone: 083 318 2565"));
        assert!(prompt.contains("- Contact Email: info@sim2umobilegolf.co.za"));
        assert!(prompt.contains("Packages & Pricing (After 50% Discount)"));
        assert!(prompt.contains("* Birdie Package (4 Hours): Now R3,150 (Was R6,300)"));
        assert!(prompt.contains("* Eagle Package (6 Hours): Now R4,500 (Was R9,000)"));
        assert!(prompt.contains("* Full Day Package (8 Hours): Now R6,000 (Was R12,000)"));
        assert!(prompt.contains("First 20km from base is FREE. Thereafter, R9 per km (round trip)."));
        assert!(prompt.contains("Space Req: 3.3m height, 4.6m width, 5.25m length."));
        assert!(prompt.contains("Mention the 50% Early Bird Special enthusiastically."));
        assert!(prompt.contains("call or WhatsApp us at 083 318 2565"));
        assert!(prompt.ends_with("User: Do you travel to Paarl?"));
    }

    #[test]
    fn omits_promotion_when_none_is_running() {
        let mut business = BusinessContext::default();
        business.promotion = None;
        business.pricing_tiers.truncate(1);
        business.pricing_tiers[0].discounted_price = business.pricing_tiers[0].full_price;

        let prompt = ConciergePromptBuilder::new(&business).build("hi");

        assert!(!prompt.contains("PROMO"));
        assert!(!prompt.contains("enthusiastically"));
        assert!(prompt.contains("- Packages & Pricing:\n  * Birdie Package (4 Hours): R6,300\n"));
    }

    #[test]
    fn keeps_user_text_verbatim() {
        let business = BusinessContext::default();
        let text = "Price for {phone}?  Twice   spaced";

        let prompt = ConciergePromptBuilder::new(&business).build(text);

        assert!(prompt.ends_with(&format!("User: {text}")));
    }
}
