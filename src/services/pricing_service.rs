use crate::error::{ApiError, ApiResult};
use crate::models::calculator::{CalculationResult, QuoteFlags, Selection, TierProgress};
use crate::models::cart::{PurchaseType, ServiceOffer};
use crate::models::catalog::{Rubles, Service};
use crate::models::lead::{BookingSubject, LeadPrice};
use crate::services::catalog_service::Catalog;

pub const FIRST_VISIT_PERCENT: u32 = 40;
pub const BUNDLE_PERCENT: u32 = 35;
pub const MEN_SURCHARGE_PERCENT: u32 = 30;
pub const COURSE_DISCOUNT_PERCENT: u32 = 10;
pub const COURSE_SESSIONS_MIN: u32 = 5;
pub const COURSE_SESSIONS_MAX: u32 = 10;

/// Zone count at which the top tier is reached.
const MAX_TIER_ZONES: u32 = 5;

pub struct PricingService;

impl PricingService {
    /// Tier discount for a custom complex of `count` zones.
    pub fn tier_percent(count: u32) -> u32 {
        match count {
            0 | 1 => 0,
            2 => 10,
            3 => 15,
            4 => 20,
            _ => 25,
        }
    }

    /// Discount for a custom complex; first visit overrides the tiers.
    pub fn discount_percent(count: u32, flags: QuoteFlags) -> u32 {
        if flags.is_first_visit && count > 0 {
            FIRST_VISIT_PERCENT
        } else {
            Self::tier_percent(count)
        }
    }

    /// floor(amount * percent / 100)
    pub fn percent_of(amount: Rubles, percent: u32) -> Rubles {
        (u64::from(amount) * u64::from(percent) / 100) as Rubles
    }

    /// ceil(price * 0.30) when the "for men" flag is set. Applied to the
    /// already discounted price.
    pub fn men_surcharge(price_after_discount: Rubles, is_for_men: bool) -> Rubles {
        if !is_for_men {
            return 0;
        }
        let scaled = u64::from(price_after_discount) * u64::from(MEN_SURCHARGE_PERCENT);
        scaled.div_ceil(100) as Rubles
    }

    /// Prices the current calculator selection.
    pub fn calculate(catalog: &Catalog, selection: &Selection, flags: QuoteFlags) -> CalculationResult {
        if selection.is_selected(catalog.bundle_zone_id()) {
            return Self::calculate_bundle(catalog, flags);
        }

        let active_zones: Vec<_> = catalog
            .zones()
            .filter(|zone| zone.id != catalog.bundle_zone_id() && selection.is_selected(&zone.id))
            .cloned()
            .collect();

        let total: Rubles = active_zones.iter().map(|zone| zone.price).sum();
        let count = active_zones.len() as u32;
        let discount_percent = Self::discount_percent(count, flags);
        let discount_amount = Self::percent_of(total, discount_percent);
        let price_after_discount = total - discount_amount;
        let surcharge = Self::men_surcharge(price_after_discount, flags.is_for_men);

        let tier_progress = if count > 0 && !flags.is_first_visit {
            Some(Self::tier_progress(count))
        } else {
            None
        };

        CalculationResult {
            active_zones,
            total,
            count,
            discount_percent,
            discount_amount,
            surcharge,
            final_price: price_after_discount + surcharge,
            is_full_body: false,
            bundle_savings: None,
            tier_progress,
            first_visit_banner: Self::first_visit_banner(count, flags),
        }
    }

    fn calculate_bundle(catalog: &Catalog, flags: QuoteFlags) -> CalculationResult {
        let bundle = catalog.bundle_zone();
        let list_price = bundle.original_price.unwrap_or(bundle.price);

        let (discount_percent, price_after_discount) = if flags.is_first_visit {
            (
                FIRST_VISIT_PERCENT,
                list_price - Self::percent_of(list_price, FIRST_VISIT_PERCENT),
            )
        } else {
            (BUNDLE_PERCENT, bundle.price)
        };

        let surcharge = Self::men_surcharge(price_after_discount, flags.is_for_men);

        CalculationResult {
            active_zones: vec![bundle.clone()],
            total: list_price,
            count: 1,
            discount_percent,
            discount_amount: list_price - price_after_discount,
            surcharge,
            final_price: price_after_discount + surcharge,
            is_full_body: true,
            bundle_savings: Some(catalog.bundle_components_price().saturating_sub(bundle.price)),
            tier_progress: None,
            first_visit_banner: Self::first_visit_banner(1, flags),
        }
    }

    fn first_visit_banner(count: u32, flags: QuoteFlags) -> Option<String> {
        (flags.is_first_visit && count > 0)
            .then(|| "🎉 Применена скидка 40% для первого визита!".to_string())
    }

    /// How far a custom complex is from the next discount tier.
    pub fn tier_progress(count: u32) -> TierProgress {
        let current_percent = Self::tier_percent(count);
        let progress = (count * 100 / MAX_TIER_ZONES).min(100);

        if count >= MAX_TIER_ZONES {
            return TierProgress {
                current_percent,
                next_percent: None,
                zones_needed: 0,
                progress,
                message: "🎉 Максимальная выгода!".to_string(),
                sub_message: format!("Ваша скидка: {}%", current_percent),
            };
        }

        if count >= 2 {
            let next_percent = Self::tier_percent(count + 1);
            return TierProgress {
                current_percent,
                next_percent: Some(next_percent),
                zones_needed: 1,
                progress,
                message: format!("Выберите ещё 1 зону до скидки {}%", next_percent),
                sub_message: format!("Текущая скидка: {}%", current_percent),
            };
        }

        let zones_needed = 2 - count;
        let word = if zones_needed == 1 { "зону" } else { "зоны" };
        TierProgress {
            current_percent,
            next_percent: Some(Self::tier_percent(2)),
            zones_needed,
            progress,
            message: format!("Выберите ещё {} {}... чтобы получить скидку 10%", zones_needed, word),
            sub_message: "Скидка от 2-х зон".to_string(),
        }
    }

    /// Booking form data for a calculated complex, `None` when nothing is selected.
    pub fn complex_booking(result: &CalculationResult, flags: QuoteFlags) -> Option<BookingSubject> {
        if result.count == 0 {
            return None;
        }

        let mut name = if result.is_full_body {
            "Комплекс \"Всё тело\"".to_string()
        } else {
            format!("Комплекс ({} {})", result.count, zone_word(result.count))
        };

        let mut modifiers = Vec::new();
        if flags.is_first_visit {
            modifiers.push("первый визит");
        }
        if flags.is_for_men {
            modifiers.push("мужской");
        }
        if !modifiers.is_empty() {
            name.push_str(&format!(" ({})", modifiers.join(", ")));
        }

        Some(BookingSubject {
            name,
            price: LeadPrice::Amount(result.final_price),
            is_complex: true,
            zones: Some(result.active_zones.iter().map(|z| z.name.clone()).collect()),
        })
    }

    /// Course sessions are round(price * 0.9) each.
    pub fn course_session_price(price: Rubles) -> Rubles {
        let discounted = u64::from(price) * u64::from(100 - COURSE_DISCOUNT_PERCENT);
        ((discounted + 50) / 100) as Rubles
    }

    /// Price of a single visit or of a course of `sessions` visits.
    pub fn service_offer(
        service: &Service,
        purchase: PurchaseType,
        sessions: Option<u32>,
    ) -> ApiResult<ServiceOffer> {
        match purchase {
            PurchaseType::Session => Ok(ServiceOffer {
                service_id: service.id.clone(),
                purchase,
                sessions: 1,
                price_per_session: service.price,
                total: service.price,
                savings: 0,
            }),
            PurchaseType::Course => {
                if !service.course_eligible {
                    return Err(ApiError::BadRequest(format!(
                        "'{}' is not sold as a course",
                        service.id
                    )));
                }
                let sessions = sessions.unwrap_or(COURSE_SESSIONS_MIN);
                if !(COURSE_SESSIONS_MIN..=COURSE_SESSIONS_MAX).contains(&sessions) {
                    return Err(ApiError::BadRequest(format!(
                        "A course has {} to {} sessions",
                        COURSE_SESSIONS_MIN, COURSE_SESSIONS_MAX
                    )));
                }
                let price_per_session = Self::course_session_price(service.price);
                let total = price_per_session * sessions;
                Ok(ServiceOffer {
                    service_id: service.id.clone(),
                    purchase,
                    sessions,
                    price_per_session,
                    total,
                    savings: (service.price * sessions).saturating_sub(total),
                })
            }
        }
    }
}

/// 1 зона, 2-4 зоны, 5+ зон
fn zone_word(count: u32) -> &'static str {
    match count {
        1 => "зона",
        2..=4 => "зоны",
        _ => "зон",
    }
}
