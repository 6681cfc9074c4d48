use std::sync::Arc;

use crate::{
    error::BoardError,
    gui::screens::map_page::MapMessage,
    models::{LoginStatus, Marker},
};

#[derive(Debug, Clone)]
pub enum Message {
    MarkersLoaded(Result<Vec<Marker>, Arc<BoardError>>),
    LoginChecked(Result<LoginStatus, Arc<BoardError>>),
    Map(MapMessage),
}
