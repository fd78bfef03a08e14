mod api_ext;
mod email_notification;

pub use self::{api_ext::NotificationsApi, email_notification::EmailNotification};
