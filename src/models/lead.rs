use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::catalog::Rubles;
use crate::models::modal::ModalPhase;

/// A price shown in the booking form: either an amount or a label such as
/// "по прайсу" or "Консультация".
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum LeadPrice {
    Amount(Rubles),
    Label(String),
}

/// What the booking form was opened for.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BookingSubject {
    pub name: String,
    pub price: LeadPrice,
    #[serde(default)]
    pub is_complex: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zones: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ContactDetails {
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BookingLeadRequest {
    #[serde(flatten)]
    pub contact: ContactDetails,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub subject: BookingSubject,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GiftCertificateLeadRequest {
    #[serde(flatten)]
    pub contact: ContactDetails,
    pub amount: Rubles,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CheckoutRequest {
    #[serde(flatten)]
    pub contact: ContactDetails,
}

/// Inline form errors keyed by field name (`name`, `phone`, `date_time`).
pub type FieldErrors = BTreeMap<String, String>;

/// The ready-to-open messaging link. Nothing is sent from here; the client
/// navigates to `url` and the user presses send.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LeadHandoff {
    pub message: String,
    pub url: String,
    pub modal: ModalPhase,
    /// How long the client keeps the closing modal on screen.
    pub close_delay_ms: u64,
}
