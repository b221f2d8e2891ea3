mod admin_test;
mod attendance_test;
mod sessions_test;
mod state_test;
