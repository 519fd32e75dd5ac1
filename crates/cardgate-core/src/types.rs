use serde::{Deserialize, Serialize};
use std::fmt;

/// Gateway API endpoints, relative to the configured base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Echo,
    PaymentInit,
    PaymentProcess,
    PaymentStatus,
    PaymentReverse,
    PaymentClose,
    PaymentRefund,
    CustomerInfo,
    OneclickInit,
    OneclickProcess,
}

impl Endpoint {
    /// Path of the endpoint below the API base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Echo => "echo",
            Self::PaymentInit => "payment/init",
            Self::PaymentProcess => "payment/process",
            Self::PaymentStatus => "payment/status",
            Self::PaymentReverse => "payment/reverse",
            Self::PaymentClose => "payment/close",
            Self::PaymentRefund => "payment/refund",
            Self::CustomerInfo => "customer/info",
            Self::OneclickInit => "oneclick/init",
            Self::OneclickProcess => "oneclick/process",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// `resultCode` reported by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResultCode {
    Ok,
    ParamInvalid,
    MissingParameter,
    MerchantBlocked,
    SessionExpired,
    PaymentNotFound,
    PaymentNotInValidState,
    PaymentMethodDisabled,
    PaymentMethodUnavailable,
    OperationNotAllowed,
    PaymentMethodError,
    MallPayNotOnboarded,
    CustomerNotFound,
    CustomerFoundNoSavedCards,
    CustomerFoundSavedCards,
    InternalError,
    /// A code this client does not know about.
    Other(i64),
}

impl ResultCode {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Ok,
            100 => Self::ParamInvalid,
            110 => Self::MissingParameter,
            120 => Self::MerchantBlocked,
            130 => Self::SessionExpired,
            140 => Self::PaymentNotFound,
            150 => Self::PaymentNotInValidState,
            160 => Self::PaymentMethodDisabled,
            170 => Self::PaymentMethodUnavailable,
            180 => Self::OperationNotAllowed,
            190 => Self::PaymentMethodError,
            230 => Self::MallPayNotOnboarded,
            800 => Self::CustomerNotFound,
            810 => Self::CustomerFoundNoSavedCards,
            820 => Self::CustomerFoundSavedCards,
            900 => Self::InternalError,
            other => Self::Other(other),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Self::Ok => 0,
            Self::ParamInvalid => 100,
            Self::MissingParameter => 110,
            Self::MerchantBlocked => 120,
            Self::SessionExpired => 130,
            Self::PaymentNotFound => 140,
            Self::PaymentNotInValidState => 150,
            Self::PaymentMethodDisabled => 160,
            Self::PaymentMethodUnavailable => 170,
            Self::OperationNotAllowed => 180,
            Self::PaymentMethodError => 190,
            Self::MallPayNotOnboarded => 230,
            Self::CustomerNotFound => 800,
            Self::CustomerFoundNoSavedCards => 810,
            Self::CustomerFoundSavedCards => 820,
            Self::InternalError => 900,
            Self::Other(code) => *code,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// `paymentStatus` reported by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    Initiated,
    InProgress,
    Cancelled,
    Confirmed,
    Reversed,
    Denied,
    WaitingForSettlement,
    Settled,
    RefundProcessing,
    Returned,
    Other(i64),
}

impl PaymentStatus {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Self::Initiated,
            2 => Self::InProgress,
            3 => Self::Cancelled,
            4 => Self::Confirmed,
            5 => Self::Reversed,
            6 => Self::Denied,
            7 => Self::WaitingForSettlement,
            8 => Self::Settled,
            9 => Self::RefundProcessing,
            10 => Self::Returned,
            other => Self::Other(other),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Self::Initiated => 1,
            Self::InProgress => 2,
            Self::Cancelled => 3,
            Self::Confirmed => 4,
            Self::Reversed => 5,
            Self::Denied => 6,
            Self::WaitingForSettlement => 7,
            Self::Settled => 8,
            Self::RefundProcessing => 9,
            Self::Returned => 10,
            Self::Other(code) => *code,
        }
    }

    /// Whether the payment has reached a state the gateway will not change.
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            Self::Cancelled | Self::Reversed | Self::Denied | Self::Settled | Self::Returned
        )
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Currencies accepted by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    CZK,
    EUR,
    USD,
    GBP,
    HUF,
    PLN,
    RON,
    NOK,
    SEK,
}

impl Currency {
    /// ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::CZK => "CZK",
            Self::EUR => "EUR",
            Self::USD => "USD",
            Self::GBP => "GBP",
            Self::HUF => "HUF",
            Self::PLN => "PLN",
            Self::RON => "RON",
            Self::NOK => "NOK",
            Self::SEK => "SEK",
        }
    }

    /// Parse from an ISO 4217 code (case-insensitive).
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "CZK" => Some(Self::CZK),
            "EUR" => Some(Self::EUR),
            "USD" => Some(Self::USD),
            "GBP" => Some(Self::GBP),
            "HUF" => Some(Self::HUF),
            "PLN" => Some(Self::PLN),
            "RON" => Some(Self::RON),
            "NOK" => Some(Self::NOK),
            "SEK" => Some(Self::SEK),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Payment page languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    Czech,
    English,
    German,
    French,
    Hungarian,
    Italian,
    Japanese,
    Polish,
    Portuguese,
    Romanian,
    Russian,
    Slovak,
    Spanish,
    Turkish,
    Vietnamese,
    Croatian,
    Slovenian,
    Swedish,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Czech => "cs",
            Self::English => "en",
            Self::German => "de",
            Self::French => "fr",
            Self::Hungarian => "hu",
            Self::Italian => "it",
            Self::Japanese => "ja",
            Self::Polish => "pl",
            Self::Portuguese => "pt",
            Self::Romanian => "ro",
            Self::Russian => "ru",
            Self::Slovak => "sk",
            Self::Spanish => "es",
            Self::Turkish => "tr",
            Self::Vietnamese => "vi",
            Self::Croatian => "hr",
            Self::Slovenian => "sl",
            Self::Swedish => "sv",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let lang = match code.to_lowercase().as_str() {
            "cs" => Self::Czech,
            "en" => Self::English,
            "de" => Self::German,
            "fr" => Self::French,
            "hu" => Self::Hungarian,
            "it" => Self::Italian,
            "ja" => Self::Japanese,
            "pl" => Self::Polish,
            "pt" => Self::Portuguese,
            "ro" => Self::Romanian,
            "ru" => Self::Russian,
            "sk" => Self::Slovak,
            "es" => Self::Spanish,
            "tr" => Self::Turkish,
            "vi" => Self::Vietnamese,
            "hr" => Self::Croatian,
            "sl" => Self::Slovenian,
            "sv" => Self::Swedish,
            _ => return None,
        };
        Some(lang)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// `payOperation` of a payment init.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PayOperation {
    #[default]
    Payment,
    /// Creates a template usable for later one-click payments.
    OneclickPayment,
}

impl PayOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Payment => "payment",
            Self::OneclickPayment => "oneclickPayment",
        }
    }
}

/// How the gateway sends the customer back to the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReturnMethod {
    #[default]
    Post,
    Get,
}

impl ReturnMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Post => "POST",
            Self::Get => "GET",
        }
    }
}

/// Signed response extensions this client verifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExtensionKind {
    /// Masked card number of the paying card.
    MaskCln,
    /// Masked card number of a recurring-payment template.
    MaskClnRp,
}

impl ExtensionKind {
    /// Signed fields of a masked-card extension, in signing order.
    pub const SIGNED_FIELDS: [&'static str; 5] =
        ["extension", "dttm", "maskedCln", "expiration", "longMaskedCln"];

    pub fn tag(&self) -> &'static str {
        match self {
            Self::MaskCln => "maskCln",
            Self::MaskClnRp => "maskClnRP",
        }
    }

    /// Recognise an `extension` tag. Unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "maskCln" => Some(Self::MaskCln),
            "maskClnRP" => Some(Self::MaskClnRp),
            _ => None,
        }
    }
}

impl fmt::Display for ExtensionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Card scheme, detected from the leading digits of a masked card number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardProvider {
    Visa,
    Amex,
    Diners,
    Jcb,
    MasterCard,
}

impl CardProvider {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Visa => "Visa",
            Self::Amex => "American Express",
            Self::Diners => "Diners Club",
            Self::Jcb => "JCB",
            Self::MasterCard => "MasterCard",
        }
    }

    /// Detect the scheme from the first six characters of `long_masked_cln`.
    pub fn detect(long_masked_cln: &str) -> Option<Self> {
        let prefix = long_masked_cln.get(..6)?;
        if !prefix.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let p2: u32 = prefix[..2].parse().ok()?;
        let p3: u32 = prefix[..3].parse().ok()?;
        let p4: u32 = prefix[..4].parse().ok()?;

        if prefix.starts_with('4') {
            Some(Self::Visa)
        } else if p2 == 34 || p2 == 37 {
            Some(Self::Amex)
        } else if (300..=305).contains(&p3) || p2 == 36 || p2 == 38 {
            Some(Self::Diners)
        } else if p4 == 2131 || p4 == 1800 || p2 == 35 {
            Some(Self::Jcb)
        } else if (51..=55).contains(&p2) || (2221..=2720).contains(&p4) {
            Some(Self::MasterCard)
        } else {
            None
        }
    }
}

impl fmt::Display for CardProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
