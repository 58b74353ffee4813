// Domain-layer modules and shared errors/models
pub mod services {
    pub use crate::services::*;
}

pub mod validation {
    pub use crate::validation::*;
}

pub mod models {
    pub use crate::models::*;
}

pub mod errors {
    pub use crate::errors::*;
}
