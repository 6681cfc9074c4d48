use iced::{Element, Task};
use tracing::debug;

use crate::{
    config::BoardConfig,
    core::{HttpMarkerStore, PortfolioClient},
    gui::{
        AppState, Message,
        screens::{Screen, ScreenData, loading_page::LoadingPageScreen, map_page::MapScreen},
    },
};

pub struct MarkerBoardApp {
    state: AppState,
    screen: ScreenData,
}

impl MarkerBoardApp {
    pub fn new(
        store: HttpMarkerStore,
        portfolio: PortfolioClient,
        config: BoardConfig,
    ) -> (Self, Task<Message>) {
        let state = AppState::new(store, portfolio, config);
        let load = Task::batch([state.load_markers(), state.check_login()]);
        (
            Self {
                state,
                screen: ScreenData::LoadingPage(LoadingPageScreen),
            },
            load,
        )
    }

    pub fn title(&self) -> String {
        format!("Markerboard - {}", self.state.config.base_url)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match (&mut self.screen, message) {
            (screen, Message::MarkersLoaded(result)) => {
                match result {
                    Ok(markers) => {
                        if let Err(e) = self.state.view.apply_loaded(markers) {
                            self.state.view.report("Could not show markers", &e);
                        }
                    }
                    Err(e) => self.state.view.report("Could not load markers", &e),
                }
                if matches!(screen, ScreenData::LoadingPage(_)) {
                    debug!("switching to map screen");
                    *screen = ScreenData::MapPage(MapScreen::default());
                }
                Task::none()
            }
            (_, Message::LoginChecked(result)) => {
                match result {
                    Ok(status) => self.state.view.set_login_status(Some(status)),
                    Err(e) => self.state.view.report("Could not check login", &e),
                }
                Task::none()
            }
            (ScreenData::MapPage(page), Message::Map(msg)) => {
                page.update(msg, &mut self.state).map(Message::Map)
            }
            _ => Task::none(),
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        match &self.screen {
            ScreenData::LoadingPage(page) => page.view(&self.state).map(|never| match never {}),
            ScreenData::MapPage(page) => page.view(&self.state).map(Message::Map),
        }
    }
}
