use tracing::debug;

use crate::models::Route;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub struct RouteController {
    state: AppState,
}

impl RouteController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn list(&self) -> Vec<Route> {
        let book = self.state.routes.read().await;
        debug!("📋 Listando {} roteiros", book.routes().len());
        book.routes().to_vec()
    }

    pub async fn get(&self, route_id: i64) -> Result<Route, AppError> {
        let book = self.state.routes.read().await;
        book.route_by_id(route_id)
            .cloned()
            .ok_or_else(|| crate::utils::errors::not_found_error("Route", &route_id.to_string()))
    }

    pub async fn start(&self, route_id: i64) -> Result<Route, AppError> {
        let mut book = self.state.routes.write().await;
        Ok(book.start_route(route_id)?.clone())
    }

    pub async fn finish(&self, route_id: i64) -> Result<Route, AppError> {
        let mut book = self.state.routes.write().await;
        Ok(book.finish_route(route_id)?.clone())
    }
}
