//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::Order;
use crate::db::repository::{OrderRepository, record_id};
use crate::orders;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::models::{OrderQuery, PlaceOrderRequest, ShippingAddress, UpdateOrderStatusRequest};
use shared::response::{PageMeta, Paginated};

fn validate_shipping_address(address: &ShippingAddress) -> AppResult<()> {
    validate_required_text(&address.full_name, "full_name", MAX_NAME_LEN)?;
    validate_required_text(&address.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&address.street, "street", MAX_ADDRESS_LEN)?;
    validate_required_text(&address.city, "city", MAX_NAME_LEN)?;
    validate_required_text(&address.state, "state", MAX_NAME_LEN)?;
    validate_required_text(&address.country, "country", MAX_NAME_LEN)?;
    validate_required_text(&address.zip_code, "zip_code", MAX_SHORT_TEXT_LEN)?;
    Ok(())
}

/// POST /api/orders - place an order from the caller's cart
pub async fn place(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<PlaceOrderRequest>,
) -> AppResult<Json<Order>> {
    validate_shipping_address(&req.shipping_address)?;
    validate_optional_text(&req.notes, "notes", MAX_NOTE_LEN)?;

    let order = orders::place_order(state.db(), &user.id, req).await?;
    tracing::info!(
        order_number = %order.order_number,
        user = %order.user,
        total = order.total,
        "Order placed"
    );
    Ok(Json(order))
}

/// GET /api/orders/my - the caller's own orders, newest first
pub async fn list_mine(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<OrderQuery>,
) -> AppResult<Json<Paginated<Order>>> {
    let repo = OrderRepository::new(state.db().clone());
    let (data, total) = repo.find_for_user(&user.id, &query).await?;
    Ok(Json(paginated(data, total, &query)))
}

/// GET /api/orders/number/{order_number} - owner or admin only
pub async fn get_by_number(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(order_number): Path<String>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.db().clone());
    let order = repo
        .find_by_number(&order_number)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {order_number}")))?;

    let caller = record_id("user", &user.id)?.to_string();
    if order.user != caller && !user.is_admin() {
        // Not-found rather than forbidden, so order numbers cannot be probed
        return Err(AppError::not_found(format!("Order {order_number}")));
    }
    Ok(Json(order))
}

/// GET /api/orders - admin listing with status filters
pub async fn list_all(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<OrderQuery>,
) -> AppResult<Json<Paginated<Order>>> {
    user.require_admin()?;

    let repo = OrderRepository::new(state.db().clone());
    let (data, total) = repo.find_all(&query).await?;
    Ok(Json(paginated(data, total, &query)))
}

/// PATCH /api/orders/{id}/status - admin only
pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateOrderStatusRequest>,
) -> AppResult<Json<Order>> {
    user.require_admin()?;
    validate_optional_text(&req.tracking_number, "tracking_number", MAX_SHORT_TEXT_LEN)?;

    let order = orders::apply_status_update(state.db(), &id, req).await?;
    tracing::info!(
        order_number = %order.order_number,
        status = ?order.order_status,
        "Order status updated"
    );
    Ok(Json(order))
}

fn paginated(data: Vec<Order>, total: u64, query: &OrderQuery) -> Paginated<Order> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(10).clamp(1, 100);
    Paginated {
        data,
        meta: PageMeta::new(total, page, limit),
    }
}
