//! UI screens.

mod app;
mod schedule_screen;

pub use app::App;
pub use schedule_screen::{ScheduleAction, ScheduleFocus, ScheduleScreen, ScheduleView};
