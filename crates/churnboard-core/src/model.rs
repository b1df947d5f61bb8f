use std::fmt;

use serde::Serialize;

/// Opaque customer identifier, non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CustomerId(String);

impl CustomerId {
    pub fn new(raw: &str) -> Result<Self, String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err("customer id cannot be empty".to_string());
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Female, Gender::Male];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Gender {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "female" | "f" => Ok(Gender::Female),
            "male" | "m" => Ok(Gender::Male),
            other => Err(format!("unknown gender '{other}'")),
        }
    }
}

/// Internet service tier. Variant order is the presentation order used by
/// every chart series keyed on this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum InternetService {
    #[serde(rename = "Fiber optic")]
    FiberOptic,
    #[serde(rename = "DSL")]
    Dsl,
    #[serde(rename = "No")]
    NoService,
}

impl InternetService {
    pub const ALL: [InternetService; 3] = [
        InternetService::FiberOptic,
        InternetService::Dsl,
        InternetService::NoService,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InternetService::FiberOptic => "Fiber optic",
            InternetService::Dsl => "DSL",
            InternetService::NoService => "No",
        }
    }
}

impl fmt::Display for InternetService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for InternetService {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fiber optic" | "fiber" => Ok(InternetService::FiberOptic),
            "dsl" => Ok(InternetService::Dsl),
            "no" | "none" => Ok(InternetService::NoService),
            other => Err(format!("unknown internet service '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Contract {
    #[serde(rename = "Month-to-month")]
    MonthToMonth,
    #[serde(rename = "One year")]
    OneYear,
    #[serde(rename = "Two year")]
    TwoYear,
}

impl Contract {
    pub const ALL: [Contract; 3] = [Contract::MonthToMonth, Contract::OneYear, Contract::TwoYear];

    pub fn as_str(&self) -> &'static str {
        match self {
            Contract::MonthToMonth => "Month-to-month",
            Contract::OneYear => "One year",
            Contract::TwoYear => "Two year",
        }
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Contract {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "month-to-month" | "monthly" => Ok(Contract::MonthToMonth),
            "one year" => Ok(Contract::OneYear),
            "two year" => Ok(Contract::TwoYear),
            other => Err(format!("unknown contract type '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PaymentMethod {
    #[serde(rename = "Electronic check")]
    ElectronicCheck,
    #[serde(rename = "Mailed check")]
    MailedCheck,
    #[serde(rename = "Bank transfer (automatic)")]
    BankTransfer,
    #[serde(rename = "Credit card (automatic)")]
    CreditCard,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::ElectronicCheck,
        PaymentMethod::MailedCheck,
        PaymentMethod::BankTransfer,
        PaymentMethod::CreditCard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::ElectronicCheck => "Electronic check",
            PaymentMethod::MailedCheck => "Mailed check",
            PaymentMethod::BankTransfer => "Bank transfer (automatic)",
            PaymentMethod::CreditCard => "Credit card (automatic)",
        }
    }

    /// Compact label for chart axes where the dataset strings are too wide.
    pub fn short_label(&self) -> &'static str {
        match self {
            PaymentMethod::ElectronicCheck => "Electronic",
            PaymentMethod::MailedCheck => "Mailed",
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::CreditCard => "Credit Card",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for PaymentMethod {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "electronic check" => Ok(PaymentMethod::ElectronicCheck),
            "mailed check" => Ok(PaymentMethod::MailedCheck),
            "bank transfer (automatic)" | "bank transfer" => Ok(PaymentMethod::BankTransfer),
            "credit card (automatic)" | "credit card" => Ok(PaymentMethod::CreditCard),
            other => Err(format!("unknown payment method '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MultipleLines {
    Yes,
    No,
    #[serde(rename = "No phone service")]
    NoPhoneService,
}

impl MultipleLines {
    pub fn as_str(&self) -> &'static str {
        match self {
            MultipleLines::Yes => "Yes",
            MultipleLines::No => "No",
            MultipleLines::NoPhoneService => "No phone service",
        }
    }
}

impl fmt::Display for MultipleLines {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for MultipleLines {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "yes" => Ok(MultipleLines::Yes),
            "no" => Ok(MultipleLines::No),
            "no phone service" => Ok(MultipleLines::NoPhoneService),
            other => Err(format!("unknown multiple-lines value '{other}'")),
        }
    }
}

/// One validated row of the source dataset. Immutable after load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerRecord {
    pub customer_id: CustomerId,
    pub gender: Gender,
    pub senior_citizen: bool,
    pub partner: bool,
    pub dependents: bool,
    pub tenure_months: u32,
    pub phone_service: bool,
    pub multiple_lines: MultipleLines,
    pub internet_service: InternetService,
    pub contract: Contract,
    pub paperless_billing: bool,
    pub payment_method: PaymentMethod,
    pub monthly_charges: f64,
    pub total_charges: f64,
    pub churned: bool,
}
