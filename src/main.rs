mod api;
mod blockchain;
mod config;
mod error;
mod transaction;

use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::info;

use api::AppState;
use blockchain::{Blockchain, ProofOfWork, SYSTEM_ACCOUNT};
use config::Config;
use transaction::Transaction;

/// Transfers appended at startup so a fresh node has something to show.
const DEMO_TRANSFERS: [(&str, i64); 3] = [
    ("Primeiro bloco depois do Gênesis", 50),
    ("Segundo bloco depois do Gênesis", 50),
    ("Terceiro bloco depois do Gênesis", 30),
];

fn seed_demo_blocks(bc: &mut Blockchain) -> error::Result<()> {
    for (to, amount) in DEMO_TRANSFERS {
        bc.add_block(&Transaction::new(SYSTEM_ACCOUNT, to, amount))?;
    }
    Ok(())
}

fn log_chain(bc: &Blockchain) {
    for block in bc.blocks() {
        info!(
            "block prev_hash={} data={} hash={} pow={}",
            hex::encode(block.prev_hash()),
            String::from_utf8_lossy(block.data()),
            hex::encode(block.hash()),
            ProofOfWork::new(block).validate()
        );
    }
    info!("chain valid? {}", bc.is_valid());
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let cfg = Config::from_env();

    let mut bc = Blockchain::new().map_err(std::io::Error::other)?;
    if cfg.seed_demo_blocks {
        seed_demo_blocks(&mut bc).map_err(std::io::Error::other)?;
    }
    log_chain(&bc);

    println!("⛓️ Starting blockchain API at http://{}:{}", cfg.host, cfg.port);

    let state = web::Data::new(AppState::new(bc, cfg.mining_timeout));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((cfg.host.as_str(), cfg.port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::{DEMO_TRANSFERS, seed_demo_blocks};
    use crate::blockchain::Blockchain;

    #[test]
    fn demo_seed_appends_three_valid_blocks() {
        let mut bc = Blockchain::new().unwrap();
        seed_demo_blocks(&mut bc).unwrap();
        assert_eq!(bc.len(), 1 + DEMO_TRANSFERS.len());
        assert!(bc.is_valid());
        assert_eq!(bc.last_block().transaction().unwrap().amount, 30);
    }
}
