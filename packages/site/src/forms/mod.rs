mod application;
mod contact;
mod pipeline;
mod quote;

pub use application::{ApplicationForm, ApplicationPipeline};
pub use contact::{ContactForm, ContactPipeline};
pub use pipeline::{FormError, SubmitState, Submitter};
pub use quote::{QuoteForm, QuotePipeline};
