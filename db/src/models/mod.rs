pub mod attendance_record;
pub mod session;
pub mod student;
pub mod teacher;

pub use attendance_record::Entity as AttendanceRecord;
pub use session::Entity as Session;
pub use student::Entity as Student;
pub use teacher::Entity as Teacher;
