use actix_web::{HttpResponse, Responder, get, post, rt::time::timeout, web};
use log::{debug, error, info, warn};
use std::pin::pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::models::{AppState, BlockResponse, MineResponse, ValidateResponse};
use crate::error::LedgerError;
use crate::transaction::Transaction;

pub const INVALID_TRANSACTION: &str = "invalid transaction";

/// List every block, genesis first, with its payload decoded.
#[get("/blocks")]
pub async fn get_blocks(state: web::Data<AppState>) -> impl Responder {
    // A mining job can hold the lock for up to `mining_timeout`; wait for it
    // on the blocking pool instead of an actix worker.
    let snapshot = web::block(move || {
        let bc = state.chain();
        bc.blocks()
            .iter()
            .map(BlockResponse::from)
            .collect::<Vec<_>>()
    })
    .await;
    match snapshot {
        Ok(blocks) => HttpResponse::Ok().json(blocks),
        Err(err) => {
            error!("GET /blocks - snapshot task failed: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Validate the whole chain.
#[get("/validate")]
pub async fn validate_chain(state: web::Data<AppState>) -> impl Responder {
    let report = web::block(move || {
        let bc = state.chain();
        ValidateResponse {
            valid: bc.is_valid(),
            length: bc.len(),
        }
    })
    .await;
    match report {
        Ok(resp) => HttpResponse::Ok().json(resp),
        Err(err) => {
            error!("GET /validate - validation task failed: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Mine a block carrying the submitted transaction.
///
/// The search runs on the blocking pool while holding the chain lock, so
/// concurrent submissions are appended one at a time. If it outlives
/// `mining_timeout` the search is cancelled, and the handler still waits for
/// the job: the response always reports what happened to the chain.
#[post("/mine")]
pub async fn mine_block(
    state: web::Data<AppState>,
    body: web::Json<Transaction>,
) -> impl Responder {
    let tx = body.into_inner();
    if let Err(reason) = tx.validate() {
        warn!("POST /mine - rejected: {reason}");
        return HttpResponse::BadRequest().body(INVALID_TRANSACTION);
    }
    debug!("POST /mine - from={} to={} amount={}", tx.from, tx.to, tx.amount);

    let cancel = Arc::new(AtomicBool::new(false));
    let mut job = pin!({
        let state = state.clone();
        let cancel = Arc::clone(&cancel);
        web::block(move || {
            let mut bc = state.chain();
            let block = bc.add_block_until(&tx, &cancel).cloned()?;
            Ok::<_, LedgerError>((bc.len() - 1, block))
        })
    });

    let outcome = match timeout(state.mining_timeout, job.as_mut()).await {
        Ok(outcome) => outcome,
        Err(_) => {
            cancel.store(true, Ordering::Relaxed);
            warn!(
                "POST /mine - mining timed out after {:?}, cancelling",
                state.mining_timeout
            );
            job.await
        }
    };

    match outcome {
        Ok(Ok((index, block))) => {
            let resp = MineResponse {
                mined_index: index,
                hash: hex::encode(block.hash()),
                nonce: block.nonce(),
            };
            info!(
                "MINER - sealed block #{} (hash={}, nonce={})",
                resp.mined_index, resp.hash, resp.nonce
            );
            HttpResponse::Created().json(resp)
        }
        Ok(Err(err @ LedgerError::Cancelled { .. })) => {
            warn!("POST /mine - {err}");
            HttpResponse::ServiceUnavailable().body("mining timed out")
        }
        Ok(Err(err)) => {
            error!("POST /mine - mining failed: {err}");
            HttpResponse::InternalServerError().body(err.to_string())
        }
        Err(err) => {
            error!("POST /mine - mining task failed: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
