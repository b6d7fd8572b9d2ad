use crate::business::BusinessContext;

/// Placeholders available to configurable widget texts.
pub struct TemplateVariables<'a> {
    phone: &'a str,
    email: &'a str,
    business: &'a str,
}

impl<'a> TemplateVariables<'a> {
    pub fn new(phone: &'a str, email: &'a str, business: &'a str) -> Self {
        Self {
            phone,
            email,
            business,
        }
    }

    pub fn from_business(business: &'a BusinessContext) -> Self {
        Self::new(&business.phone, &business.email, &business.name)
    }

    /// Helper to substitute template placeholders in a string.
    pub fn substitute_template(&self, s: &str) -> String {
        s.replace("{phone}", self.phone)
            .replace("{email}", self.email)
            .replace("{business}", self.business)
    }
}
