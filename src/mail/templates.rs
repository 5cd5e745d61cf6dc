use super::MailMessage;

///
/// The reset-link mail. The key is only ever transported inside this URL.
///
pub fn reset_link(name: &str, to: &str, base_url: &str, key: &str, window_minutes: i64) -> MailMessage {
    MailMessage {
        to: to.to_string(),
        subject: "Reset your password".to_string(),
        text: format!(
            "Hi {}\n\
            A request was made to reset the password for your account.\n\
            Please follow the link below to choose a new password. The link is valid for {} minutes \
            and can be used only once.\n\n\
            {}/auth/reset-password/{}\n\n\
            If you did not request this, you can safely ignore this mail.\n\
            Thank you.\nRegards, Tejas Enterprises",
            name, window_minutes, base_url, key),
    }
}

///
/// Sent after a successful reset so the owner learns of any change they didn't make.
///
pub fn password_changed(name: &str, to: &str) -> MailMessage {
    MailMessage {
        to: to.to_string(),
        subject: "Your password was changed".to_string(),
        text: format!(
            "Hi {}\n\
            The password for your account has just been changed.\n\
            If this was not you, please contact your administrator immediately.\n\
            Thank you.\nRegards, Tejas Enterprises",
            name),
    }
}
