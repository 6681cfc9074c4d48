use std::convert::Infallible;

use iced::{
    Element, Task,
    widget::{container, text},
};

use crate::gui::{AppState, screens::Screen};

#[derive(Debug, Clone)]
pub struct LoadingPageScreen;

impl Screen for LoadingPageScreen {
    type Message = Infallible;

    fn view<'a>(&'a self, state: &'a AppState) -> Element<'a, Self::Message> {
        container(text(format!("Loading markers from {}...", state.config.base_url)))
            .center_x(iced::Length::Fill)
            .center_y(iced::Length::Fill)
            .into()
    }

    fn update(&mut self, message: Self::Message, _state: &mut AppState) -> Task<Self::Message> {
        match message {}
    }
}
