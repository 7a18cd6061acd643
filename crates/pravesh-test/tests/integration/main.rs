mod helpers;
mod http_auth;
mod record_lifecycle;
mod registration;
