use std::sync::Arc;

use iced::Task;

use crate::{
    config::BoardConfig,
    core::{HttpMarkerStore, MarkerStore, PortfolioClient},
    gui::Message,
    map::{HeadlessSurface, MapView},
    models::LoginStatus,
};

/// State shared by every screen.
#[derive(Debug)]
pub struct AppState {
    pub store: HttpMarkerStore,
    pub portfolio: PortfolioClient,
    pub config: BoardConfig,
    pub view: MapView<HeadlessSurface>,
}

impl AppState {
    pub fn new(store: HttpMarkerStore, portfolio: PortfolioClient, config: BoardConfig) -> Self {
        let mut view = MapView::new(HeadlessSurface::new());
        view.initialize(&config);
        // no markers until the backend confirms a login
        view.set_login_status(Some(LoginStatus::LoggedOut));
        Self {
            store,
            portfolio,
            config,
            view,
        }
    }

    pub fn load_markers(&self) -> Task<Message> {
        let store = self.store.clone();
        Task::perform(
            async move { store.list().await.map_err(Arc::new) },
            Message::MarkersLoaded,
        )
    }

    pub fn check_login(&self) -> Task<Message> {
        let portfolio = self.portfolio.clone();
        Task::perform(
            async move {
                portfolio
                    .fetch_quotes(0)
                    .await
                    .map(|envelope| envelope.login_status())
                    .map_err(Arc::new)
            },
            Message::LoginChecked,
        )
    }
}
