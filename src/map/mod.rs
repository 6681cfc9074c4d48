//! The marker map: a synchronous model ([`MapView`]) that never performs
//! I/O, and [`Board`], which runs it against a marker store.

mod board;
mod collection;
mod session;
mod surface;
mod view;

pub use board::{Board, SubmitResult};
pub use collection::{MarkerCollection, MarkerList, RenderedMarker};
pub use session::{EditSession, SessionEnd, SessionState};
pub use surface::{HeadlessSurface, MapSurface, Pin, PinId, PinStyle};
pub use view::{CommitOutcome, MapView, PendingClear, PendingCommit};
