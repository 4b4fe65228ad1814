use actix_web::test;
use serde_json::json;

mod common;
use common::{TestApp, WHATSAPP_LINK};

#[actix_web::test]
async fn test_booking_lead() {
    let app = test::init_service(TestApp::new().create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/leads/booking")
        .set_json(json!({
            "name": "Мария",
            "phone": "+7 916 123 45 67",
            "date": "2030-01-07",
            "time": "12:30:00",
            "subject": { "name": "Лифтинг-уход", "price": 3500 }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("Мария"));
    assert!(message.contains("Лифтинг-уход"));
    assert!(message.contains("3\u{a0}500 р."));

    let url = body["url"].as_str().unwrap();
    assert!(url.starts_with(&format!("{}?text=", WHATSAPP_LINK)));
    assert!(!url.contains(' '));
    assert_eq!(body["modal"], "closing");
    assert_eq!(body["close_delay_ms"], 200);
}

#[actix_web::test]
async fn test_booking_lead_validation_errors() {
    let app = test::init_service(TestApp::new().create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/leads/booking")
        .set_json(json!({
            "name": "  ",
            "phone": "916",
            "date": "2030-01-06",
            "subject": { "name": "Лифтинг-уход", "price": "по прайсу" }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    let fields = body["fields"].as_object().unwrap();
    assert!(fields.contains_key("name"));
    assert!(fields.contains_key("phone"));
    assert!(fields.contains_key("date_time"));
}

#[actix_web::test]
async fn test_booking_outside_opening_hours() {
    let app = test::init_service(TestApp::new().create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/leads/booking")
        .set_json(json!({
            "name": "Мария",
            "phone": "89161234567",
            "date": "2030-01-07",
            "time": "21:00:00",
            "subject": { "name": "Лифтинг-уход", "price": 3500 }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["fields"]["date_time"], "Мы работаем с 09:00 до 20:00.");
}

#[actix_web::test]
async fn test_gift_certificate_lead() {
    let app = test::init_service(TestApp::new().create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/leads/gift-certificate")
        .set_json(json!({ "name": "Ольга", "phone": "79161234567", "amount": 5000 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("Подарочный сертификат"));
    assert!(message.contains("5\u{a0}000 р."));
}

#[actix_web::test]
async fn test_gift_certificate_zero_amount_is_400() {
    let app = test::init_service(TestApp::new().create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/leads/gift-certificate")
        .set_json(json!({ "name": "Ольга", "phone": "79161234567", "amount": 0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
}
