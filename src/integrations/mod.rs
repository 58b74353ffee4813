//! External service integrations.

pub mod mailer {
    pub use crate::mailer::*;
}

pub mod email_template {
    pub use crate::email_template::*;
}
