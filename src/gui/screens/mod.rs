pub mod loading_page;
pub mod map_page;

use iced::{Element, Task};

use crate::gui::AppState;

pub trait Screen: Sized {
    type Message: std::fmt::Debug;
    fn view<'a>(&'a self, state: &'a AppState) -> Element<'a, Self::Message>;
    fn update(&mut self, message: Self::Message, state: &mut AppState) -> Task<Self::Message>;
}

#[derive(Debug, Clone)]
pub enum ScreenData {
    LoadingPage(loading_page::LoadingPageScreen),
    MapPage(map_page::MapScreen),
}
