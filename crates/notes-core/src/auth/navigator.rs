/// Where the user is sent to log in again, relative to the notes page
pub const DEFAULT_LOGIN_LOCATION: &str = "./authentication-login.html";

/// Side effect of an authentication failure: send the user back to login.
pub trait Navigator: Send + Sync {
    fn redirect_to_login(&self);
}
