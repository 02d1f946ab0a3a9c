mod attendance_test;
mod auth_test;
mod events_test;
mod health_test;
mod recruitments_test;
mod users_test;
