mod loonges;
mod mail;

pub use loonges::LoongesError;
pub use mail::MailError;
