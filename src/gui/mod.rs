//! The map window. Pins, the edit box and the marker list are drawn from a
//! [`MapView`](crate::MapView) backed by a headless surface.

mod app;
mod message;
mod screens;
mod state;
mod widgets;

pub use app::MarkerBoardApp;
pub use message::Message;
pub use state::AppState;

use crate::{BoardConfig, HttpMarkerStore, PortfolioClient};

/// Opens the window and blocks until it is closed.
pub fn run(store: HttpMarkerStore, config: BoardConfig) -> anyhow::Result<()> {
    let portfolio = PortfolioClient::new(config.clone())?;
    iced::application(
        move || MarkerBoardApp::new(store.clone(), portfolio.clone(), config.clone()),
        MarkerBoardApp::update,
        MarkerBoardApp::view,
    )
    .title(MarkerBoardApp::title)
    .run()?;
    Ok(())
}
