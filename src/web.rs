use actix_web::{middleware, web, App, HttpResponse, HttpServer, Result};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::StorageError;
use crate::storage::JsonStorage;

/// Shared handle to the document store. Handlers only read.
pub struct AppState {
    pub storage: JsonStorage,
}

#[derive(Deserialize)]
pub struct HistoryQuery {
    player: Option<String>,
}

#[derive(Serialize)]
pub struct OpponentEntry {
    player_id: String,
    times_played: u32,
}

#[derive(Serialize)]
pub struct PlayerHistoryResponse {
    player_id: String,
    opponents: Vec<OpponentEntry>,
}

fn not_found(message: String) -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({"success": false, "error": message}))
}

fn storage_failure(err: StorageError) -> actix_web::Error {
    error!(%err, "storage read failed");
    actix_web::error::ErrorInternalServerError(format!("storage error: {}", err))
}

// League roster endpoint
async fn get_league(event_id: web::Path<String>, state: web::Data<AppState>) -> Result<HttpResponse> {
    match state.storage.load_league(&event_id).map_err(storage_failure)? {
        Some(league) => Ok(HttpResponse::Ok().json(league)),
        None => Ok(not_found(format!("league {} not found", event_id))),
    }
}

// Generated pods for one month
async fn get_matchings(path: web::Path<(String, String)>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let (event_id, month) = path.into_inner();
    match state
        .storage
        .load_assignment(&event_id, &month)
        .map_err(storage_failure)?
    {
        Some(result) => Ok(HttpResponse::Ok().json(result)),
        None => Ok(not_found(format!("no matchings found for {}", month))),
    }
}

// Full ledger, or one player's opponents with ?player=<id>
async fn get_history(
    event_id: web::Path<String>,
    query: web::Query<HistoryQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let history = state.storage.load_history(&event_id).map_err(storage_failure)?;

    match &query.player {
        Some(player_id) => {
            let opponents = history
                .previous_opponents(player_id)
                .into_iter()
                .map(|opponent| OpponentEntry {
                    times_played: history.times_played(player_id, &opponent),
                    player_id: opponent,
                })
                .collect();
            Ok(HttpResponse::Ok().json(PlayerHistoryResponse {
                player_id: player_id.clone(),
                opponents,
            }))
        }
        None => Ok(HttpResponse::Ok().json(history)),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/leagues/{event_id}", web::get().to(get_league))
        .route("/api/leagues/{event_id}/matchings/{month}", web::get().to(get_matchings))
        .route("/api/leagues/{event_id}/history", web::get().to(get_history));
}

pub async fn start_server(port: u16, storage: JsonStorage) -> std::io::Result<()> {
    info!(port, data_dir = %storage.data_dir().display(), "starting web server");
    let app_state = web::Data::new(AppState { storage });

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test};

    use crate::history::MatchHistory;
    use crate::roster::{League, Player};

    fn seeded_storage(dir: &std::path::Path) -> JsonStorage {
        let storage = JsonStorage::new(dir);
        let league = League::new(
            "ev",
            "Test League",
            vec![Player::new("1", "Alice"), Player::new("2", "Bob")],
        );
        storage.save_league(&league).unwrap();
        let mut history = MatchHistory::new("ev");
        history.add_pairing("1", "2", "February");
        history.add_pairing("2", "1", "March");
        storage.save_history(&history).unwrap();
        storage
    }

    #[actix_web::test]
    async fn league_endpoint_returns_roster() {
        let dir = tempfile::tempdir().unwrap();
        let state = web::Data::new(AppState { storage: seeded_storage(dir.path()) });
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::get().uri("/api/leagues/ev").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["eventId"], "ev");
        assert_eq!(body["players"].as_array().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn missing_documents_return_404() {
        let dir = tempfile::tempdir().unwrap();
        let state = web::Data::new(AppState { storage: seeded_storage(dir.path()) });
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::get().uri("/api/leagues/other").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get()
            .uri("/api/leagues/ev/matchings/June")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn player_history_counts_repeats() {
        let dir = tempfile::tempdir().unwrap();
        let state = web::Data::new(AppState { storage: seeded_storage(dir.path()) });
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::get()
            .uri("/api/leagues/ev/history?player=1")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["opponents"][0]["player_id"], "2");
        assert_eq!(body["opponents"][0]["times_played"], 2);
    }
}
