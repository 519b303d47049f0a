mod builder;
mod offer;

pub use builder::OfferTermsBuilder;
pub use offer::{Offer, OfferTerms};
