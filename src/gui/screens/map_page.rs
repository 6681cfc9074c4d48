use std::sync::Arc;

use iced::{
    Element, Length, Point, Task,
    widget::{button, canvas, column, container, mouse_area, row, scrollable, text, text_input},
};
use tracing::debug;

use crate::{
    core::MarkerStore,
    error::BoardError,
    gui::{
        AppState,
        screens::Screen,
        widgets::{MAP_HEIGHT, MAP_WIDTH, MapCanvas, layout, pin_at, unproject},
    },
    map::{CommitOutcome, PendingClear, PendingCommit, PinId},
};

#[derive(Debug, Clone, Default)]
pub struct MapScreen {
    draft: String,
    cursor: Option<Point>,
    selected: Option<PinId>,
}

#[derive(Debug, Clone)]
pub enum MapMessage {
    CursorMoved(Point),
    MapPressed,
    DraftChanged(String),
    Submit,
    CloseEdit,
    CommitSettled(PendingCommit, Result<(), Arc<BoardError>>),
    DeleteAll,
    ClearSettled(PendingClear, Result<(), Arc<BoardError>>),
    DismissNotices,
}

impl Screen for MapScreen {
    type Message = MapMessage;

    fn view<'a>(&'a self, state: &'a AppState) -> Element<'a, Self::Message> {
        let view = &state.view;
        let map = mouse_area(
            canvas(MapCanvas::new(view.surface(), state.config.center, self.selected))
                .width(Length::Fixed(MAP_WIDTH))
                .height(Length::Fixed(MAP_HEIGHT)),
        )
        .on_move(MapMessage::CursorMoved)
        .on_press(MapMessage::MapPressed);

        let info: Element<'a, MapMessage> = match self
            .selected
            .and_then(|pin| view.surface().click_pin(pin))
        {
            Some(content) => text(content).into(),
            None => text("Click the map to leave a marker.").into(),
        };

        let editor: Element<'a, MapMessage> = match view.session().position() {
            Some(position) => column![
                text(format!("New marker at {}", position)),
                row![
                    text_input("What happened here?", &self.draft)
                        .on_input(MapMessage::DraftChanged)
                        .on_submit(MapMessage::Submit),
                    button("Submit").on_press(MapMessage::Submit),
                    button("Close").on_press(MapMessage::CloseEdit),
                ]
                .spacing(10),
            ]
            .spacing(5)
            .into(),
            None => column![].into(),
        };

        let notices: Element<'a, MapMessage> = if view.notices().is_empty() {
            column![].into()
        } else {
            column![
                column(view.notices().iter().map(|n| text(n.to_string()).into())),
                button("Dismiss").on_press(MapMessage::DismissNotices),
            ]
            .spacing(5)
            .into()
        };

        let login = view
            .login_status()
            .map(|status| status.status_line())
            .unwrap_or_default();
        let list = column![
            text(login),
            text(format!("Markers ({})", view.list().len())).size(20),
            scrollable(column(view.list().lines().map(|line| text(line).into())).spacing(4))
                .height(Length::Fill),
            button("Delete markers").on_press(MapMessage::DeleteAll),
        ]
        .spacing(10);

        layout(
            list,
            container(column![map, info, editor, notices].spacing(10)),
        )
    }

    fn update(&mut self, message: Self::Message, state: &mut AppState) -> Task<Self::Message> {
        match message {
            MapMessage::CursorMoved(point) => {
                self.cursor = Some(point);
                Task::none()
            }
            MapMessage::MapPressed => {
                let Some(point) = self.cursor else {
                    return Task::none();
                };
                self.selected = pin_at(state.view.surface(), state.config.center, point);
                if self.selected.is_none() {
                    let position = unproject(point, state.config.center);
                    debug!(%position, "map clicked");
                    match state.view.on_map_click(position) {
                        // already reported by the view
                        Ok(_) | Err(BoardError::LoginRequired) => {}
                        Err(e) => state.view.report("Could not start a marker", &e),
                    }
                    self.draft.clear();
                }
                Task::none()
            }
            MapMessage::DraftChanged(draft) => {
                self.draft = draft;
                Task::none()
            }
            MapMessage::Submit => {
                let text = std::mem::take(&mut self.draft);
                match state.view.begin_commit(&text) {
                    CommitOutcome::Pending(pending) => {
                        let store = state.store.clone();
                        let marker = pending.marker().clone();
                        Task::perform(
                            async move { store.create(&marker).await.map_err(Arc::new) },
                            move |result| MapMessage::CommitSettled(pending, result),
                        )
                    }
                    CommitOutcome::Cancelled | CommitOutcome::Idle => Task::none(),
                }
            }
            MapMessage::CloseEdit => {
                state.view.close_edit();
                self.draft.clear();
                Task::none()
            }
            MapMessage::CommitSettled(pending, result) => {
                state
                    .view
                    .settle_commit(pending, result.as_ref().copied().map_err(|e| &**e));
                Task::none()
            }
            MapMessage::DeleteAll => {
                let pending = state.view.begin_clear();
                self.selected = None;
                let store = state.store.clone();
                Task::perform(
                    async move { store.delete_all().await.map_err(Arc::new) },
                    move |result| MapMessage::ClearSettled(pending, result),
                )
            }
            MapMessage::ClearSettled(pending, result) => {
                state
                    .view
                    .settle_clear(pending, result.as_ref().copied().map_err(|e| &**e));
                Task::none()
            }
            MapMessage::DismissNotices => {
                state.view.take_notices();
                Task::none()
            }
        }
    }
}
