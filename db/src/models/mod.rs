pub mod attendance_entry;
pub mod event;
pub mod event_attendance;
pub mod event_registration;
pub mod user;

pub use attendance_entry::Entity as AttendanceEntry;
pub use event::Entity as Event;
pub use event_attendance::Entity as EventAttendance;
pub use event_registration::Entity as EventRegistration;
pub use user::Entity as User;
