use axum::Json;
use serde_json::{json, Value};

/// Static list of invited speakers shown on the home page.
pub async fn list_handler() -> Json<Value> {
    Json(json!([
        {
            "name": "Ing. Carlos Méndez",
            "topic": "Inteligencia Artificial Aplicada",
            "photo": "/1.jpg"
        },
        {
            "name": "Dra. Lucía Fernández",
            "topic": "Ciberseguridad en el Mundo Actual",
            "photo": "/2.jpg"
        },
        {
            "name": "Lic. Pablo García",
            "topic": "Transformación Digital en Educación",
            "photo": "/3.jpg"
        }
    ]))
}
