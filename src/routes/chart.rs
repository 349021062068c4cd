use crate::{handler::chart_handler, state::chart_state::ChartState};
use axum::{routing::get, Router};

pub fn routes() -> Router<ChartState> {
    Router::new().nest(
        "/charts",
        Router::new()
            .route(
                "/",
                get(chart_handler::list_charts).post(chart_handler::create_chart),
            )
            .route(
                "/:music_id",
                get(chart_handler::chart_detail)
                    .put(chart_handler::update_chart)
                    .delete(chart_handler::delete_chart),
            )
            .route("/:music_id/results", get(chart_handler::chart_results)),
    )
}
