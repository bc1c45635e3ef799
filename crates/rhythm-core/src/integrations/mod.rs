pub mod asana;
pub mod google_calendar;
pub mod google_tasks;
pub mod http;
pub mod traits;

pub use asana::AsanaTracker;
pub use google_calendar::GoogleCalendar;
pub use google_tasks::{task_lists, GoogleTasksList, TaskListInfo};
pub use traits::{CalendarSink, TaskTracker, TodoEntry, TodoList};
