pub mod env;
pub mod event;
pub mod record;
pub mod response;

pub use event::{EventBody, FormEvent};
pub use record::{FORM_ID, FormRecord};
pub use response::{FormResponse, ResponseHeaders};

pub type Error = Box<dyn std::error::Error + Send + Sync>;
