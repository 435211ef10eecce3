use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use cropwise::config::ServiceConfig;
use cropwise::datasources::{
    PredictionClient, PredictionService, RecommendBody, RotationBody, YieldBody,
};
use cropwise::logic::{RecommendationResolver, RotationResolver};
use cropwise::models::{
    AgronomicReadings, RecommendationRequest, RecommendationSource, RotationPath,
    RotationRequest, Season, SoilType,
};
use cropwise::CropWiseError;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client(url: String) -> PredictionClient {
    PredictionClient::new(ServiceConfig {
        url,
        timeout_secs: 1,
        ..Default::default()
    })
    .unwrap()
}

fn rotation_body() -> RotationBody {
    RotationBody {
        soil_type: "alluvial".into(),
        crop1: "wheat".into(),
        ..Default::default()
    }
}

#[tokio::test]
async fn recommend_posts_body_and_parses_crops() {
    let captured: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
    let sink = captured.clone();
    let router = Router::new().route(
        "/api/recommend",
        post(move |Json(body): Json<Value>| {
            let sink = sink.clone();
            async move {
                *sink.lock().unwrap() = Some(body);
                Json(json!({ "crops": ["Wheat", " Teff ", ""] }))
            }
        }),
    );
    let client = client(serve(router).await);

    let readings = AgronomicReadings {
        ph: Some(6.5),
        ..Default::default()
    };
    let body = RecommendBody::new(SoilType::Alluvial, Some("Lucknow"), readings);
    let response = client.recommend(&body).await.unwrap();
    assert_eq!(response.crop_names(), vec!["Wheat", "Teff"]);

    let sent = captured.lock().unwrap().clone().unwrap();
    assert_eq!(sent["soil"], "alluvial");
    assert_eq!(sent["location"], "Lucknow");
    assert_eq!(sent["ph"], 6.5);
    assert!(sent.get("humidity").is_none());
}

#[tokio::test]
async fn non_success_status_is_service_unavailable() {
    let router = Router::new().route(
        "/api/recommend",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model crashed") }),
    );
    let client = client(serve(router).await);

    let body = RecommendBody::new(SoilType::Black, None, AgronomicReadings::default());
    let err = client.recommend(&body).await.unwrap_err();
    match err {
        CropWiseError::ServiceUnavailable(msg) => assert!(msg.contains("500")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn malformed_body_is_service_unavailable() {
    let router = Router::new().route("/api/rotation", post(|| async { "not json" }));
    let client = client(serve(router).await);

    let err = client.rotation(&rotation_body()).await.unwrap_err();
    assert!(matches!(err, CropWiseError::ServiceUnavailable(_)));
}

#[tokio::test]
async fn missing_and_null_rotation_fields_are_absent() {
    let router = Router::new().route(
        "/api/rotation",
        post(|| async { Json(json!({ "yield_t_per_ha": null })) }),
    );
    let client = client(serve(router).await);

    let response = client.rotation(&rotation_body()).await.unwrap();
    assert!(response.yield_t_per_ha.is_none());
    assert!(response.carbon_kg_co2.is_none());
}

#[tokio::test]
async fn negative_yield_is_rejected() {
    let router = Router::new().route(
        "/api/yield",
        post(|| async { Json(json!({ "yield_t_per_ha": -1.0 })) }),
    );
    let client = client(serve(router).await);

    let body = YieldBody {
        crop: "wheat".into(),
        season: "rabi".into(),
        state: "punjab".into(),
        area_hectares: None,
    };
    let err = client.predict_yield(&body).await.unwrap_err();
    assert!(matches!(err, CropWiseError::ServiceUnavailable(_)));
}

#[tokio::test]
async fn slow_service_times_out() {
    let router = Router::new().route(
        "/api/recommend",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({ "crops": ["Rice"] }))
        }),
    );
    let client = client(serve(router).await);

    let body = RecommendBody::new(SoilType::Red, None, AgronomicReadings::default());
    let err = client.recommend(&body).await.unwrap_err();
    match err {
        CropWiseError::ServiceUnavailable(msg) => assert!(msg.contains("timed out")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn resolver_falls_back_when_service_errors() {
    let router = Router::new().route(
        "/api/recommend",
        post(|| async { StatusCode::SERVICE_UNAVAILABLE }),
    );
    let resolver = RecommendationResolver::new(Arc::new(client(serve(router).await)));

    let request = RecommendationRequest::new(SoilType::Alluvial, Season::Rabi);
    let result = resolver.resolve(&request).await.unwrap();
    assert_eq!(result.source, RecommendationSource::FallbackError);
    assert!(result.notice.is_some());
    assert_eq!(result.crops[0].name, "Wheat");
}

#[tokio::test]
async fn resolver_enriches_remote_names() {
    let router = Router::new().route(
        "/api/recommend",
        post(|| async { Json(json!({ "crops": ["cotton", "Teff"] })) }),
    );
    let resolver = RecommendationResolver::new(Arc::new(client(serve(router).await)));

    let request = RecommendationRequest::new(SoilType::Black, Season::Kharif);
    let result = resolver.resolve(&request).await.unwrap();
    assert_eq!(result.source, RecommendationSource::RemoteEnriched);
    assert_eq!(result.crops[0].name, "Cotton");
    assert_eq!(result.crops[1].name, "Teff");
    assert!(result.notice.is_none());
}

#[tokio::test]
async fn rotation_resolver_builds_remote_plan_over_http() {
    let router = Router::new().route(
        "/api/rotation",
        post(|| async { Json(json!({ "yield_t_per_ha": 3.456, "carbon_kg_co2": 120.0 })) }),
    );
    let resolver = RotationResolver::new(Arc::new(client(serve(router).await)));

    let request = RotationRequest::new("Wheat", SoilType::Alluvial).with_crop2("Chickpea");
    let plan = resolver.resolve(&request).await.unwrap();
    assert_eq!(plan.path, RotationPath::RemoteAugmented);
    assert_eq!(plan.crops(), vec!["Wheat", "Chickpea"]);
    assert_eq!(plan.soil_health_note, "Predicted yield: 3.46 tons/ha");
    assert_eq!(plan.pest_reduction, "Carbon impact: 120.00 kg CO2/ha");
}

#[tokio::test]
async fn rotation_resolver_surfaces_service_failure() {
    let router = Router::new().route(
        "/api/rotation",
        post(|| async { StatusCode::BAD_GATEWAY }),
    );
    let resolver = RotationResolver::new(Arc::new(client(serve(router).await)));

    let request = RotationRequest::new("Wheat", SoilType::Alluvial);
    let err = resolver.resolve(&request).await.unwrap_err();
    assert!(matches!(err, CropWiseError::ServiceUnavailable(_)));
}

#[tokio::test]
async fn connection_probe_accepts_any_status() {
    let router = Router::new().route("/health", get(|| async { "ok" }));
    let client = client(serve(router).await);
    assert!(client.test_connection().await.unwrap());
}

#[tokio::test]
async fn connection_probe_reports_closed_port() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client(format!("http://{}", addr));
    assert!(!client.test_connection().await.unwrap());
}
