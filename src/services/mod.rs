pub mod form;
pub mod panels;
pub mod timetable;

pub use form::{FormField, FormValues, NewEntity};
pub use panels::{ListBody, ListView};
pub use timetable::TimetablePage;
