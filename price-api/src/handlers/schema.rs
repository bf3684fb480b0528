//! Feature schema handler

use axum::Json;

use price_core::LayoutInfo;

pub async fn get() -> Json<LayoutInfo> {
    Json(LayoutInfo::current())
}
