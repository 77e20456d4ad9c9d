//! Editable onboarding form state.

use std::str::FromStr;

use crate::error::FormError;
use crate::onboarding::model::{OnboardingRequest, VegDays, Weekday};

/// Text-entry fields of the form, in display order.
///
/// The vegetarian-day schedule is edited separately, one weekday at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    WhatsappNumber,
    Email,
    Age,
    HeightCm,
    WeightKg,
    TargetWeightKg,
    Preferences,
    Allergies,
}

impl FormField {
    pub const ALL: [FormField; 8] = [
        FormField::WhatsappNumber,
        FormField::Email,
        FormField::Age,
        FormField::HeightCm,
        FormField::WeightKg,
        FormField::TargetWeightKg,
        FormField::Preferences,
        FormField::Allergies,
    ];

    /// Wire key, identical to the JSON key of the submitted record.
    pub fn key(self) -> &'static str {
        match self {
            Self::WhatsappNumber => "whatsappNumber",
            Self::Email => "email",
            Self::Age => "age",
            Self::HeightCm => "heightCm",
            Self::WeightKg => "weightKg",
            Self::TargetWeightKg => "targetWeightKg",
            Self::Preferences => "preferences",
            Self::Allergies => "allergies",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::WhatsappNumber => "WhatsApp number",
            Self::Email => "Email",
            Self::Age => "Age",
            Self::HeightCm => "Height (cm)",
            Self::WeightKg => "Current weight (kg)",
            Self::TargetWeightKg => "Target weight (kg)",
            Self::Preferences => "Food preferences",
            Self::Allergies => "Allergies (comma-separated)",
        }
    }

    pub fn is_required(self) -> bool {
        !matches!(self, Self::Preferences | Self::Allergies)
    }

    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Age | Self::HeightCm | Self::WeightKg | Self::TargetWeightKg
        )
    }
}

impl FromStr for FormField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.key() == s)
            .ok_or_else(|| FormError::UnknownField(s.to_string()))
    }
}

/// The record being filled in. Numbers stay `None` until entered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OnboardingForm {
    pub whatsapp_number: String,
    pub email: String,
    pub age: Option<i32>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub target_weight_kg: Option<f64>,
    pub preferences: String,
    pub allergies: String,
    pub veg_days: VegDays,
}

impl OnboardingForm {
    /// Replace one field from raw input.
    ///
    /// Text is stored as typed. Numeric fields accept a number or an empty
    /// string (which clears them); anything else is rejected and the
    /// previous value kept.
    pub fn set(&mut self, field: FormField, raw: &str) -> Result<(), FormError> {
        match field {
            FormField::WhatsappNumber => self.whatsapp_number = raw.to_string(),
            FormField::Email => self.email = raw.to_string(),
            FormField::Preferences => self.preferences = raw.to_string(),
            FormField::Allergies => self.allergies = raw.to_string(),
            FormField::Age => self.age = parse_number(field, raw)?,
            FormField::HeightCm => self.height_cm = parse_number(field, raw)?,
            FormField::WeightKg => self.weight_kg = parse_number(field, raw)?,
            FormField::TargetWeightKg => self.target_weight_kg = parse_number(field, raw)?,
        }
        Ok(())
    }

    /// Current value rendered as text, empty when unset.
    pub fn value(&self, field: FormField) -> String {
        fn num<T: ToString>(v: Option<T>) -> String {
            v.map(|v| v.to_string()).unwrap_or_default()
        }
        match field {
            FormField::WhatsappNumber => self.whatsapp_number.clone(),
            FormField::Email => self.email.clone(),
            FormField::Preferences => self.preferences.clone(),
            FormField::Allergies => self.allergies.clone(),
            FormField::Age => num(self.age),
            FormField::HeightCm => num(self.height_cm),
            FormField::WeightKg => num(self.weight_kg),
            FormField::TargetWeightKg => num(self.target_weight_kg),
        }
    }

    pub fn set_day(&mut self, day: Weekday, vegetarian: bool) {
        self.veg_days.set(day, vegetarian);
    }

    pub fn toggle_day(&mut self, day: Weekday) {
        let current = self.veg_days.get(day);
        self.veg_days.set(day, !current);
    }

    /// Wire keys of required fields that are still empty.
    pub fn missing_required(&self) -> Vec<&'static str> {
        FormField::ALL
            .into_iter()
            .filter(|f| f.is_required() && self.value(*f).is_empty())
            .map(FormField::key)
            .collect()
    }

    /// The record to submit, exactly as entered.
    pub fn to_payload(&self) -> Result<OnboardingRequest, FormError> {
        let missing = self.missing_required();
        let (Some(age), Some(height_cm), Some(weight_kg), Some(target_weight_kg)) =
            (self.age, self.height_cm, self.weight_kg, self.target_weight_kg)
        else {
            return Err(FormError::MissingRequired(missing));
        };
        if !missing.is_empty() {
            return Err(FormError::MissingRequired(missing));
        }

        Ok(OnboardingRequest {
            whatsapp_number: self.whatsapp_number.clone(),
            email: self.email.clone(),
            age,
            height_cm,
            weight_kg,
            target_weight_kg,
            preferences: Some(self.preferences.clone()),
            allergies: Some(self.allergies.clone()),
            veg_days: Some(self.veg_days),
        })
    }
}

fn parse_number<T: FromStr + NumberCheck>(field: FormField, raw: &str) -> Result<Option<T>, FormError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<T>()
        .ok()
        .filter(NumberCheck::is_finite_number)
        .map(Some)
        .ok_or_else(|| FormError::InvalidNumber {
            field: field.key(),
            value: raw.to_string(),
        })
}

/// Rejects NaN and infinities, which a number input never produces.
trait NumberCheck {
    fn is_finite_number(&self) -> bool;
}

impl NumberCheck for i32 {
    fn is_finite_number(&self) -> bool {
        true
    }
}

impl NumberCheck for f64 {
    fn is_finite_number(&self) -> bool {
        self.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> OnboardingForm {
        let mut form = OnboardingForm::default();
        form.set(FormField::WhatsappNumber, "+15550100").unwrap();
        form.set(FormField::Email, "a@example.com").unwrap();
        form.set(FormField::Age, "41").unwrap();
        form.set(FormField::HeightCm, "180.5").unwrap();
        form.set(FormField::WeightKg, "90").unwrap();
        form.set(FormField::TargetWeightKg, "82").unwrap();
        form
    }

    #[test]
    fn empty_form_lists_every_required_field() {
        let form = OnboardingForm::default();
        assert_eq!(
            form.missing_required(),
            vec!["whatsappNumber", "email", "age", "heightCm", "weightKg", "targetWeightKg"]
        );
        assert!(matches!(form.to_payload(), Err(FormError::MissingRequired(_))));
    }

    #[test]
    fn optional_fields_are_not_required() {
        let form = filled();
        assert!(form.missing_required().is_empty());
        let payload = form.to_payload().unwrap();
        assert_eq!(payload.preferences.as_deref(), Some(""));
        assert_eq!(payload.allergies.as_deref(), Some(""));
        assert_eq!(payload.veg_days, Some(VegDays::default()));
    }

    #[test]
    fn numeric_fields_reject_text_and_keep_previous_value() {
        let mut form = filled();
        let err = form.set(FormField::Age, "forty").unwrap_err();
        assert_eq!(
            err,
            FormError::InvalidNumber {
                field: "age",
                value: "forty".to_string()
            }
        );
        assert_eq!(form.age, Some(41));

        assert!(form.set(FormField::HeightCm, "NaN").is_err());
        assert!(form.set(FormField::WeightKg, "inf").is_err());
        assert_eq!(form.height_cm, Some(180.5));
    }

    #[test]
    fn clearing_a_number_makes_it_missing_again() {
        let mut form = filled();
        form.set(FormField::TargetWeightKg, "").unwrap();
        assert_eq!(form.missing_required(), vec!["targetWeightKg"]);
    }

    #[test]
    fn text_is_kept_verbatim() {
        let mut form = filled();
        form.set(FormField::Allergies, " nuts, , gluten ,").unwrap();
        let payload = form.to_payload().unwrap();
        assert_eq!(payload.allergies.as_deref(), Some(" nuts, , gluten ,"));
    }

    #[test]
    fn weekdays_toggle_independently() {
        let mut form = filled();
        form.toggle_day(Weekday::Monday);
        form.set_day(Weekday::Saturday, true);
        form.toggle_day(Weekday::Saturday);
        form.toggle_day(Weekday::Sunday);

        let days = form.to_payload().unwrap().veg_days.unwrap();
        assert_eq!(days.selected(), vec![Weekday::Monday, Weekday::Sunday]);
    }

    #[test]
    fn payload_encodes_with_wire_keys() {
        let json = serde_json::to_value(filled().to_payload().unwrap()).unwrap();
        for field in FormField::ALL {
            assert!(json.get(field.key()).is_some(), "missing {}", field.key());
        }
        assert!(json["vegDays"].get("wednesday").is_some());
    }

    #[test]
    fn fields_parse_from_wire_keys() {
        assert_eq!("heightCm".parse::<FormField>().unwrap(), FormField::HeightCm);
        assert!(matches!(
            "height".parse::<FormField>(),
            Err(FormError::UnknownField(_))
        ));
    }
}
