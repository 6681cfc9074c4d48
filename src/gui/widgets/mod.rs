use iced::{
    Color, Element, Point, Rectangle, Renderer, Theme, border, mouse,
    widget::{
        canvas::{self, Frame, Geometry, Path, Stroke},
        column, container,
        container::{Style, bordered_box},
        row,
    },
};

use crate::{
    map::{HeadlessSurface, PinId, PinStyle},
    models::LatLng,
};

pub const MAP_WIDTH: f32 = 720.0;
pub const MAP_HEIGHT: f32 = 360.0;
const PIN_RADIUS: f32 = 5.0;

/// Equirectangular projection with `center`'s longitude in the middle.
pub fn project(position: LatLng, center: LatLng) -> Point {
    let lng = (position.lng - center.lng + 540.0).rem_euclid(360.0);
    Point::new(
        (lng / 360.0) as f32 * MAP_WIDTH,
        ((90.0 - position.lat) / 180.0) as f32 * MAP_HEIGHT,
    )
}

pub fn unproject(point: Point, center: LatLng) -> LatLng {
    let lng = f64::from(point.x / MAP_WIDTH) * 360.0 + center.lng - 180.0;
    let lat = 90.0 - f64::from(point.y / MAP_HEIGHT) * 180.0;
    LatLng::new(lat, lng).normalized()
}

/// The info-carrying pin under `point`, if any.
pub fn pin_at(surface: &HeadlessSurface, center: LatLng, point: Point) -> Option<PinId> {
    surface
        .pins()
        .filter(|(_, pin)| pin.info.is_some())
        .find(|(_, pin)| project(pin.position, center).distance(point) <= PIN_RADIUS + 2.0)
        .map(|(id, _)| id)
}

fn pin_color(style: PinStyle) -> Color {
    match style {
        PinStyle::Landmark => Color::from_rgb8(66, 133, 244),
        PinStyle::User => Color::from_rgb8(220, 60, 50),
        PinStyle::Editing => Color::from_rgb8(250, 170, 30),
    }
}

pub struct MapCanvas<'a> {
    surface: &'a HeadlessSurface,
    center: LatLng,
    selected: Option<PinId>,
}

impl<'a> MapCanvas<'a> {
    pub fn new(surface: &'a HeadlessSurface, center: LatLng, selected: Option<PinId>) -> Self {
        Self {
            surface,
            center,
            selected,
        }
    }
}

impl<Message> canvas::Program<Message> for MapCanvas<'_> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), Color::from_rgb8(170, 200, 230));

        let grid = Stroke::default()
            .with_color(Color::from_rgba8(255, 255, 255, 0.5))
            .with_width(1.0);
        for step in 1..12 {
            let x = MAP_WIDTH * step as f32 / 12.0;
            frame.stroke(&Path::line(Point::new(x, 0.0), Point::new(x, MAP_HEIGHT)), grid.clone());
        }
        for step in 1..6 {
            let y = MAP_HEIGHT * step as f32 / 6.0;
            frame.stroke(&Path::line(Point::new(0.0, y), Point::new(MAP_WIDTH, y)), grid.clone());
        }

        for (id, pin) in self.surface.pins() {
            let at = project(pin.position, self.center);
            let radius = match pin.style {
                PinStyle::Editing => PIN_RADIUS + 2.0,
                _ => PIN_RADIUS,
            };
            frame.fill(&Path::circle(at, radius), pin_color(pin.style));
            if self.selected == Some(id) {
                frame.stroke(
                    &Path::circle(at, radius + 3.0),
                    Stroke::default()
                        .with_color(theme.palette().text)
                        .with_width(2.0),
                );
            }
        }

        vec![frame.into_geometry()]
    }
}

fn panel_style(theme: &Theme) -> Style {
    bordered_box(theme).border(border::width(2))
}

/// Sidebar on the left, main content on the right.
pub fn layout<'a, Message>(
    sidebar: impl Into<Element<'a, Message>>,
    main_content: impl Into<Element<'a, Message>>,
) -> Element<'a, Message>
where
    Message: 'a,
{
    container(
        row![
            container(column![sidebar.into()])
                .style(panel_style)
                .padding(10)
                .width(iced::Length::FillPortion(1))
                .height(iced::Length::Fill),
            container(main_content.into())
                .padding(10)
                .width(iced::Length::FillPortion(3)),
        ]
        .spacing(10),
    )
    .padding(10)
    .center_x(iced::Length::Fill)
    .center_y(iced::Length::Fill)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIDWAY: LatLng = LatLng::new(28.2072, -177.3735);

    #[test]
    fn center_projects_to_the_middle() {
        let p = project(MIDWAY, MIDWAY);
        assert!((p.x - MAP_WIDTH / 2.0).abs() < 0.01);
    }

    #[test]
    fn unproject_inverts_project() {
        let beijing = LatLng::new(39.9042, 116.4074);
        let back = unproject(project(beijing, MIDWAY), MIDWAY);
        assert!((back.lat - beijing.lat).abs() < 0.01);
        assert!((back.lng - beijing.lng).abs() < 0.01);
    }
}
