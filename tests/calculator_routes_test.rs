use actix_web::test;
use serde_json::json;

mod common;
use common::TestApp;

#[actix_web::test]
async fn test_toggle_individual_zone_drops_bundle() {
    let app = test::init_service(TestApp::new().create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/calculator/toggle")
        .set_json(json!({ "selection": { "full-body": true }, "zone_id": "underarms" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["selection"], json!({ "underarms": true }));
}

#[actix_web::test]
async fn test_toggle_bundle_drops_individual_zones() {
    let app = test::init_service(TestApp::new().create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/calculator/toggle")
        .set_json(json!({
            "selection": { "underarms": true, "shins": true },
            "zone_id": "full-body"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["selection"], json!({ "full-body": true }));
}

#[actix_web::test]
async fn test_toggle_unknown_zone() {
    let app = test::init_service(TestApp::new().create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/calculator/toggle")
        .set_json(json!({ "selection": {}, "zone_id": "elbows" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);
}

#[actix_web::test]
async fn test_quote_three_zones_for_men() {
    let app = test::init_service(TestApp::new().create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/calculator/quote")
        .set_json(json!({
            "selection": { "underarms": true, "shins": true, "thighs": true },
            "is_for_men": true
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    let calculation = &body["calculation"];
    assert_eq!(calculation["total"], 5400);
    assert_eq!(calculation["discount_percent"], 15);
    assert_eq!(calculation["discount_amount"], 810);
    assert_eq!(calculation["surcharge"], 1377);
    assert_eq!(calculation["final_price"], 5967);

    assert_eq!(body["booking"]["name"], "Комплекс (3 зоны) (мужской)");
    assert_eq!(body["booking"]["price"], 5967);
    assert_eq!(body["booking"]["is_complex"], true);
}

#[actix_web::test]
async fn test_quote_first_visit_bundle() {
    let app = test::init_service(TestApp::new().create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/calculator/quote")
        .set_json(json!({
            "selection": { "full-body": true },
            "is_first_visit": true
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["calculation"]["discount_percent"], 40);
    assert_eq!(body["calculation"]["final_price"], 10800);
    assert_eq!(body["calculation"]["is_full_body"], true);
}

#[actix_web::test]
async fn test_quote_empty_selection_has_no_booking() {
    let app = test::init_service(TestApp::new().create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/calculator/quote")
        .set_json(json!({ "selection": {} }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["calculation"]["final_price"], 0);
    assert!(body["booking"].is_null());
}

#[actix_web::test]
async fn test_course_offer() {
    let app = test::init_service(TestApp::new().create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/services/lifting/offer")
        .set_json(json!({ "purchase": "course", "sessions": 5 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["price_per_session"], 3150);
    assert_eq!(body["total"], 15750);
    assert_eq!(body["savings"], 1750);
}

#[actix_web::test]
async fn test_course_offer_rejected_for_single_visit_service() {
    let app = test::init_service(TestApp::new().create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/services/express-clean/offer")
        .set_json(json!({ "purchase": "course", "sessions": 5 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
}
