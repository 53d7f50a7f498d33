use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::error::AppError;
use crate::application::ports::bid_repository::{BidChanges, NewBid};
use crate::application::use_cases::bids::create_bid::CreateBid;
use crate::application::use_cases::bids::delete_bid::DeleteBid;
use crate::application::use_cases::bids::get_bid::GetBid;
use crate::application::use_cases::bids::list_bids::ListBids;
use crate::application::use_cases::bids::update_bid::UpdateBid;
use crate::bootstrap::app_context::AppContext;
use crate::domain::bids::bid as domain;
use crate::presentation::http::auth::{Bearer, current_user};

#[derive(Debug, Serialize, ToSchema)]
pub struct BidResponse {
    pub id: Uuid,
    /// The parent project's title, as rendered by the API.
    pub project: String,
    pub project_id: Uuid,
    /// The bidding freelancer's username.
    pub freelancer: String,
    pub freelancer_id: Uuid,
    #[schema(value_type = String)]
    pub amount: BigDecimal,
    pub cover_letter: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BidListResponse {
    pub items: Vec<BidResponse>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBidRequest {
    pub project_id: Uuid,
    #[schema(value_type = String)]
    pub amount: BigDecimal,
    pub cover_letter: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateBidRequest {
    #[schema(value_type = Option<String>)]
    pub amount: Option<BigDecimal>,
    pub cover_letter: Option<String>,
}

fn bid_response(b: domain::Bid) -> BidResponse {
    BidResponse {
        id: b.id,
        project: b.project_title,
        project_id: b.project_id,
        freelancer: b.freelancer_username,
        freelancer_id: b.freelancer_id,
        amount: b.amount,
        cover_letter: b.cover_letter,
        created_at: b.created_at,
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/bids", get(list_bids).post(create_bid))
        .route(
            "/bids/:id",
            get(get_bid)
                .put(update_bid)
                .patch(update_bid)
                .delete(delete_bid),
        )
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/bids", tag = "Bids",
    responses((status = 200, body = BidListResponse)))]
pub async fn list_bids(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<BidListResponse>, AppError> {
    let caller = current_user(&ctx, bearer).await?;

    let repo = ctx.bid_repo();
    let uc = ListBids {
        repo: repo.as_ref(),
    };
    let bids = uc.execute(&caller).await?;
    Ok(Json(BidListResponse {
        items: bids.into_iter().map(bid_response).collect(),
    }))
}

#[utoipa::path(post, path = "/api/bids", tag = "Bids", request_body = CreateBidRequest, responses(
    (status = 201, body = BidResponse),
    (status = 403, description = "Caller is not a freelancer"),
    (status = 409, description = "Already bid on this project")
))]
pub async fn create_bid(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Json(req): Json<CreateBidRequest>,
) -> Result<(StatusCode, Json<BidResponse>), AppError> {
    let caller = current_user(&ctx, bearer).await?;
    let new = NewBid {
        project_id: req.project_id,
        amount: req.amount,
        cover_letter: req.cover_letter,
    };

    let bids = ctx.bid_repo();
    let projects = ctx.project_repo();
    let uc = CreateBid {
        bids: bids.as_ref(),
        projects: projects.as_ref(),
    };
    let bid = uc.execute(&caller, &new).await?;
    Ok((StatusCode::CREATED, Json(bid_response(bid))))
}

#[utoipa::path(get, path = "/api/bids/{id}", tag = "Bids",
    params(("id" = Uuid, Path, description = "Bid ID")),
    responses((status = 200, body = BidResponse), (status = 404)))]
pub async fn get_bid(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<Uuid>,
) -> Result<Json<BidResponse>, AppError> {
    let caller = current_user(&ctx, bearer).await?;

    let repo = ctx.bid_repo();
    let uc = GetBid {
        repo: repo.as_ref(),
    };
    let bid = uc.execute(&caller, id).await?;
    Ok(Json(bid_response(bid)))
}

#[utoipa::path(put, path = "/api/bids/{id}", tag = "Bids", request_body = UpdateBidRequest,
    params(("id" = Uuid, Path, description = "Bid ID")),
    responses((status = 200, body = BidResponse), (status = 403), (status = 404)))]
pub async fn update_bid(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateBidRequest>,
) -> Result<Json<BidResponse>, AppError> {
    let caller = current_user(&ctx, bearer).await?;
    let changes = BidChanges {
        amount: req.amount,
        cover_letter: req.cover_letter,
    };

    let repo = ctx.bid_repo();
    let uc = UpdateBid {
        repo: repo.as_ref(),
    };
    let bid = uc.execute(&caller, id, &changes).await?;
    Ok(Json(bid_response(bid)))
}

#[utoipa::path(delete, path = "/api/bids/{id}", tag = "Bids",
    params(("id" = Uuid, Path, description = "Bid ID")),
    responses((status = 204), (status = 403), (status = 404)))]
pub async fn delete_bid(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let caller = current_user(&ctx, bearer).await?;

    let repo = ctx.bid_repo();
    let uc = DeleteBid {
        repo: repo.as_ref(),
    };
    uc.execute(&caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
