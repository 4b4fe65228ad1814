//! Lead handoff: validates the contact form and turns a booking or a cart
//! into a pre-filled WhatsApp message link.
//!
//! No request is made to the messaging service. The client opens the
//! returned link, so a handoff cannot fail once validation passes.

use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use regex::Regex;
use url::Url;

use crate::error::{ApiError, ApiResult};
use crate::models::cart::CartItem;
use crate::models::catalog::Rubles;
use crate::models::lead::{
    BookingLeadRequest, BookingSubject, ContactDetails, FieldErrors, LeadHandoff, LeadPrice,
};
use crate::models::modal::{ModalEvent, ModalPhase, CLOSE_ANIMATION_DELAY};

/// Number of digits in a complete Russian phone number, country code included.
pub const PHONE_DIGITS: usize = 11;
pub const CLOSED_WEEKDAY: Weekday = Weekday::Sun;
pub const GIFT_CERTIFICATE_NAME: &str = "Подарочный сертификат";

const NBSP: char = '\u{a0}';

fn opening_hours() -> (NaiveTime, NaiveTime) {
    (
        NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
        NaiveTime::from_hms_opt(20, 0, 0).unwrap_or_default(),
    )
}

fn digits(input: &str) -> String {
    static NON_DIGITS: OnceLock<Regex> = OnceLock::new();
    let non_digits = NON_DIGITS.get_or_init(|| Regex::new(r"[^0-9]").expect("valid regex"));
    non_digits.replace_all(input, "").into_owned()
}

/// Formats whatever the user typed as `+7 (XXX) XXX-XX-XX`, filling in as
/// many groups as there are digits.
pub fn format_phone(input: &str) -> String {
    let mut digits = digits(input);
    digits.truncate(PHONE_DIGITS);
    let local = match digits.strip_prefix(['7', '8']) {
        Some(rest) => rest,
        None => digits.as_str(),
    };

    let group = |from: usize, to: usize| &local[from.min(local.len())..to.min(local.len())];

    let mut formatted = String::new();
    if !local.is_empty() {
        formatted.push_str("+7 (");
        formatted.push_str(group(0, 3));
    }
    if local.len() >= 4 {
        formatted.push_str(") ");
        formatted.push_str(group(3, 6));
    }
    if local.len() >= 7 {
        formatted.push('-');
        formatted.push_str(group(6, 8));
    }
    if local.len() >= 9 {
        formatted.push('-');
        formatted.push_str(group(8, 10));
    }
    formatted
}

/// `4973` -> `4 973 р.` with a non-breaking space between thousands.
pub fn format_rubles(amount: Rubles) -> String {
    let raw = amount.to_string();
    let mut grouped = String::with_capacity(raw.len() + raw.len() / 3);
    for (i, ch) in raw.chars().enumerate() {
        if i > 0 && (raw.len() - i) % 3 == 0 {
            grouped.push(NBSP);
        }
        grouped.push(ch);
    }
    format!("{} р.", grouped)
}

fn price_text(price: &LeadPrice) -> String {
    match price {
        LeadPrice::Amount(amount) => format_rubles(*amount),
        LeadPrice::Label(label) => label.clone(),
    }
}

fn validate_contact(contact: &ContactDetails, errors: &mut FieldErrors) {
    if contact.name.trim().is_empty() {
        errors.insert("name".to_string(), "Пожалуйста, введите имя.".to_string());
    }
    if digits(&format_phone(&contact.phone)).len() < PHONE_DIGITS {
        errors.insert(
            "phone".to_string(),
            "Пожалуйста, введите полный номер телефона.".to_string(),
        );
    }
}

/// Checks a booking form. `today` is the studio's current date.
pub fn validate_booking(
    contact: &ContactDetails,
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
    today: NaiveDate,
) -> ApiResult<()> {
    let mut errors = FieldErrors::new();
    validate_contact(contact, &mut errors);

    if let Some(date) = date {
        if date.weekday() == CLOSED_WEEKDAY {
            errors.insert(
                "date_time".to_string(),
                "Воскресенье - выходной. Пожалуйста, выберите другой день.".to_string(),
            );
        } else if date < today {
            errors.insert(
                "date_time".to_string(),
                "Пожалуйста, выберите дату не раньше сегодняшней.".to_string(),
            );
        }
    }

    if let Some(time) = time {
        let (opens, closes) = opening_hours();
        if !errors.contains_key("date_time") && (time < opens || time > closes) {
            errors.insert(
                "date_time".to_string(),
                "Мы работаем с 09:00 до 20:00.".to_string(),
            );
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(errors))
    }
}

pub fn validate_contact_only(contact: &ContactDetails) -> ApiResult<()> {
    let mut errors = FieldErrors::new();
    validate_contact(contact, &mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(errors))
    }
}

fn header(contact: &ContactDetails) -> String {
    format!(
        "Клиент: {}\nТелефон: {}",
        contact.name.trim(),
        format_phone(&contact.phone)
    )
}

pub fn booking_message(
    contact: &ContactDetails,
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
    subject: &BookingSubject,
) -> String {
    let details = match (&subject.zones, subject.is_complex) {
        (Some(zones), true) => {
            let lines: Vec<String> = zones.iter().map(|z| format!("· {}", z)).collect();
            format!("Выбранные зоны:\n{}", lines.join("\n"))
        }
        _ => format!("Услуга: {}", subject.name),
    };

    let date = date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "Не указана".to_string());
    let time = time
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "Не указано".to_string());

    format!(
        "🎉 НОВАЯ ЗАЯВКА С САЙТА! 🎉\n\n{}\n\nЖелаемая Дата: {}\nЖелаемое Время: {}\n\n{}\n\nИтоговая сумма: {}\n\nПожалуйста, подтвердите запись.",
        header(contact),
        date,
        time,
        details,
        price_text(&subject.price),
    )
}

/// A label price has no nominal value and renders as "сумма не указана".
pub fn gift_certificate_message(contact: &ContactDetails, price: &LeadPrice) -> String {
    let nominal = match price {
        LeadPrice::Amount(amount) => format_rubles(*amount),
        LeadPrice::Label(_) => "сумма не указана".to_string(),
    };
    format!(
        "🎉 ЗАЯВКА НА ПОДАРОЧНЫЙ СЕРТИФИКАТ! 🎉\n\n{}\n\nНоминал сертификата: {}\n\nПожалуйста, свяжитесь со мной для оформления.",
        header(contact),
        nominal,
    )
}

pub fn cart_message(contact: &ContactDetails, items: &[CartItem], total: Rubles) -> String {
    let mut message = format!(
        "🎉 НОВАЯ ЗАЯВКА С САЙТА! 🎉\n\n{}\n\nЗдравствуйте! Хочу оформить заявку:\n",
        header(contact)
    );

    let services: Vec<String> = items
        .iter()
        .filter(|item| item.is_service())
        .map(|item| format!("· {} ({}) - {}", item.name, item.details, format_rubles(item.price)))
        .collect();
    if !services.is_empty() {
        message.push_str(&format!("\n🗓️ ЗАПИСЬ НА УСЛУГИ:\n{}\n", services.join("\n")));
    }

    let products: Vec<String> = items
        .iter()
        .filter(|item| item.is_product())
        .map(|item| {
            format!(
                "· {} ({}) - {} шт. x {}",
                item.name,
                item.details,
                item.quantity,
                format_rubles(item.price)
            )
        })
        .collect();
    if !products.is_empty() {
        message.push_str(&format!("\n🛍️ ЗАКАЗ КОСМЕТИКИ:\n{}\n", products.join("\n")));
    }

    message.push_str(&format!(
        "\nИтоговая сумма: {}\n\nПожалуйста, свяжитесь со мной для подтверждения.",
        format_rubles(total)
    ));
    message
}

/// Appends the message to the messaging link as `?text=`.
pub fn handoff(link: &str, message: &str) -> ApiResult<LeadHandoff> {
    let base = Url::parse(link)
        .map_err(|e| ApiError::Config(format!("Invalid messaging link '{}': {}", link, e)))?;
    let text = message.trim();
    let url = format!(
        "{}?text={}",
        base.as_str().trim_end_matches('?'),
        urlencoding::encode(text)
    );

    Ok(LeadHandoff {
        message: text.to_string(),
        url,
        modal: ModalPhase::Open
            .on(ModalEvent::Submitted)
            .unwrap_or(ModalPhase::Closing),
        close_delay_ms: CLOSE_ANIMATION_DELAY.as_millis() as u64,
    })
}

/// Validates a booking form and builds its handoff. Gift certificates
/// booked through the generic form get the certificate message and no
/// date checks.
pub fn booking_lead(request: &BookingLeadRequest, today: NaiveDate, link: &str) -> ApiResult<LeadHandoff> {
    let subject = &request.subject;
    if is_gift_certificate(subject) {
        return match subject.price {
            LeadPrice::Amount(amount) => gift_certificate_lead(&request.contact, amount, link),
            LeadPrice::Label(_) => {
                validate_contact_only(&request.contact)?;
                handoff(link, &gift_certificate_message(&request.contact, &subject.price))
            }
        };
    }

    validate_booking(&request.contact, request.date, request.time, today)?;
    let message = booking_message(&request.contact, request.date, request.time, subject);
    handoff(link, &message)
}

pub fn gift_certificate_lead(contact: &ContactDetails, amount: Rubles, link: &str) -> ApiResult<LeadHandoff> {
    if amount == 0 {
        return Err(ApiError::BadRequest(
            "Certificate amount must be positive".to_string(),
        ));
    }
    validate_contact_only(contact)?;
    handoff(link, &gift_certificate_message(contact, &LeadPrice::Amount(amount)))
}

pub fn cart_lead(
    contact: &ContactDetails,
    items: &[CartItem],
    total: Rubles,
    link: &str,
) -> ApiResult<LeadHandoff> {
    if items.is_empty() {
        return Err(ApiError::BadRequest("Cart is empty".to_string()));
    }
    validate_contact_only(contact)?;
    handoff(link, &cart_message(contact, items, total))
}

pub fn is_gift_certificate(subject: &BookingSubject) -> bool {
    subject.name.contains(GIFT_CERTIFICATE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(name: &str, phone: &str) -> ContactDetails {
        ContactDetails {
            name: name.to_string(),
            phone: phone.to_string(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_phone_mask() {
        assert_eq!(format_phone(""), "");
        assert_eq!(format_phone("9"), "+7 (9");
        assert_eq!(format_phone("8 912"), "+7 (912");
        assert_eq!(format_phone("79123"), "+7 (912) 3");
        assert_eq!(format_phone("+7 (912) 345-67-89"), "+7 (912) 345-67-89");
        assert_eq!(format_phone("89123456789000"), "+7 (912) 345-67-89");
    }

    #[test]
    fn test_rubles_format() {
        assert_eq!(format_rubles(0), "0 р.");
        assert_eq!(format_rubles(950), "950 р.");
        assert_eq!(format_rubles(4973), "4\u{a0}973 р.");
        assert_eq!(format_rubles(1234567), "1\u{a0}234\u{a0}567 р.");
    }

    #[test]
    fn test_validation_errors() {
        let today = date(2026, 10, 14);
        let result = validate_booking(&contact("  ", "912"), None, None, today);
        match result {
            Err(ApiError::Validation(fields)) => {
                assert!(fields.contains_key("name"));
                assert!(fields.contains_key("phone"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }

        // 2026-10-18 is a Sunday
        let sunday = validate_booking(&contact("Анна", "89123456789"), Some(date(2026, 10, 18)), None, today);
        assert!(matches!(sunday, Err(ApiError::Validation(f)) if f.contains_key("date_time")));

        let past = validate_booking(&contact("Анна", "89123456789"), Some(date(2026, 10, 13)), None, today);
        assert!(past.is_err());

        let late = validate_booking(
            &contact("Анна", "89123456789"),
            Some(date(2026, 10, 15)),
            NaiveTime::from_hms_opt(21, 0, 0),
            today,
        );
        assert!(late.is_err());

        let ok = validate_booking(
            &contact("Анна", "89123456789"),
            Some(date(2026, 10, 17)),
            NaiveTime::from_hms_opt(10, 30, 0),
            today,
        );
        assert!(ok.is_ok());
    }

    #[test]
    fn test_complex_booking_message() {
        let subject = BookingSubject {
            name: "Комплекс (2 зоны)".to_string(),
            price: LeadPrice::Amount(3150),
            is_complex: true,
            zones: Some(vec!["Голени".to_string(), "Подмышечные впадины".to_string()]),
        };
        let message = booking_message(&contact("Анна", "9123456789"), None, None, &subject);
        assert!(message.contains("Телефон: +7 (912) 345-67-89"));
        assert!(message.contains("Желаемая Дата: Не указана"));
        assert!(message.contains("Выбранные зоны:\n· Голени\n· Подмышечные впадины"));
        assert!(message.contains("Итоговая сумма: 3\u{a0}150 р."));
    }

    #[test]
    fn test_label_price_message() {
        let subject = BookingSubject {
            name: "Общая запись (без процедуры)".to_string(),
            price: LeadPrice::Label("по прайсу".to_string()),
            is_complex: false,
            zones: None,
        };
        let message = booking_message(
            &contact("Анна", "9123456789"),
            Some(date(2026, 10, 17)),
            NaiveTime::from_hms_opt(12, 0, 0),
            &subject,
        );
        assert!(message.contains("Услуга: Общая запись (без процедуры)"));
        assert!(message.contains("Желаемое Время: 12:00"));
        assert!(message.contains("Итоговая сумма: по прайсу"));
    }

    #[test]
    fn test_certificate_through_booking_form() {
        let request = BookingLeadRequest {
            contact: contact("Анна", "89123456789"),
            // A Sunday, ignored for certificates
            date: Some(date(2026, 10, 18)),
            time: None,
            subject: BookingSubject {
                name: GIFT_CERTIFICATE_NAME.to_string(),
                price: LeadPrice::Amount(5000),
                is_complex: false,
                zones: None,
            },
        };
        let lead = booking_lead(&request, date(2026, 10, 14), "https://wa.me/79000000000").unwrap();
        assert!(lead.message.starts_with("🎉 ЗАЯВКА НА ПОДАРОЧНЫЙ СЕРТИФИКАТ! 🎉"));
        assert!(lead.message.contains("Номинал сертификата: 5\u{a0}000 р."));
    }

    #[test]
    fn test_certificate_with_label_price() {
        let request = BookingLeadRequest {
            contact: contact("Анна", "89123456789"),
            date: Some(date(2026, 10, 18)),
            time: None,
            subject: BookingSubject {
                name: format!("{} (номинал на выбор)", GIFT_CERTIFICATE_NAME),
                price: LeadPrice::Label("по договорённости".to_string()),
                is_complex: false,
                zones: None,
            },
        };
        let lead = booking_lead(&request, date(2026, 10, 14), "https://wa.me/79000000000").unwrap();
        assert!(lead.message.starts_with("🎉 ЗАЯВКА НА ПОДАРОЧНЫЙ СЕРТИФИКАТ! 🎉"));
        assert!(lead.message.contains("Номинал сертификата: сумма не указана"));
        assert!(!lead.message.contains("Услуга:"));
    }

    #[test]
    fn test_cart_message_sections() {
        use crate::models::cart::CartItemType;

        let items = vec![
            CartItem {
                id: "service-lifting-session".to_string(),
                name: "Лифтинг-уход".to_string(),
                details: "Разовый сеанс".to_string(),
                price: 3500,
                quantity: 1,
                item_type: CartItemType::Service,
                product_ref: None,
                service_ref: None,
            },
            CartItem {
                id: "product-NMF Foam-200 мл".to_string(),
                name: "NMF Foam".to_string(),
                details: "200 мл".to_string(),
                price: 2100,
                quantity: 2,
                item_type: CartItemType::Product,
                product_ref: None,
                service_ref: None,
            },
        ];
        let message = cart_message(&contact("Анна", "9123456789"), &items, 7700);
        assert!(message.contains("🗓️ ЗАПИСЬ НА УСЛУГИ:\n· Лифтинг-уход (Разовый сеанс) - 3\u{a0}500 р."));
        assert!(message.contains("🛍️ ЗАКАЗ КОСМЕТИКИ:\n· NMF Foam (200 мл) - 2 шт. x 2\u{a0}100 р."));
        assert!(message.contains("Итоговая сумма: 7\u{a0}700 р."));

        assert!(cart_lead(&contact("Анна", "9123456789"), &[], 0, "https://wa.me/1").is_err());
    }

    #[test]
    fn test_handoff_link() {
        let lead = handoff("https://wa.me/79000000000", "Привет мир\n").unwrap();
        assert_eq!(lead.message, "Привет мир");
        assert!(lead.url.starts_with("https://wa.me/79000000000?text="));
        assert!(lead.url.ends_with("%20%D0%BC%D0%B8%D1%80"));
        assert_eq!(lead.modal, ModalPhase::Closing);

        assert!(handoff("not a link", "x").is_err());
    }
}
