pub mod session_notification;
